//! AUR access layer
//!
//! Lists a maintainer's packages through the RPC interface and fetches
//! package build recipes (`.SRCINFO`) from cgit.
//!
//! # Modules
//!
//! - [`client`]: HTTP client and the [`PackageSource`]/[`RecipeSource`] traits
//! - [`srcinfo`]: `.SRCINFO` parser
//! - [`types`]: `Package` and `BuildRecipe`

pub mod client;
pub mod srcinfo;
pub mod types;

pub use client::{AurClient, PackageSource, RecipeSource};
pub use types::{BuildRecipe, Package};
