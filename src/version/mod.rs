//! Upstream version resolution and comparison
//!
//! This module provides the core functionality for detecting a package's
//! upstream project, fetching its latest release, and comparing it with the
//! version declared by the package.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Provider   │────▶│  Resolver   │────▶│   Checker   │
//! │ (classify)  │     │ (+ recipe)  │     │  (verdict)  │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                            │                   │
//!                            ▼                   ▼
//!                     ┌─────────────┐     ┌─────────────┐
//!                     │ Registries  │     │   Pkgver    │
//!                     │(github,npm) │     │  (vercmp)   │
//!                     └─────────────┘     └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`checker`]: Verdict computation per package and per maintainer
//! - [`error`]: Error types for parsing, registries and resolution
//! - [`pkgver`]: `epoch:pkgver-pkgrel` model and pacman-style ordering
//! - [`provider`]: URL classification into upstream providers
//! - [`registry`]: Registry trait for fetching the latest release
//! - [`registries`]: Concrete registry implementations (GitHub, npm, CPAN)
//! - [`resolver`]: Upstream resolution with build-recipe fallback

pub mod checker;
pub mod error;
pub mod pkgver;
pub mod provider;
pub mod registries;
pub mod registry;
pub mod resolver;
