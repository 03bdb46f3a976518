//! Registry implementations for fetching upstream releases

pub mod cpan;
pub mod github;
pub mod npm;

pub use cpan::CpanRegistry;
pub use github::GitHubRegistry;
pub use npm::NpmRegistry;
