pub mod aur;
pub mod config;
pub mod logging;
pub mod report;
pub mod version;
