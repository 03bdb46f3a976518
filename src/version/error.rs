use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VersionError {
    #[error("invalid version format: {0}")]
    Invalid(String),
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Rate limited: retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("Package not found: {0}")]
    NotFound(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("No release data for {0}")]
    NoRelease(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error(transparent)]
    InvalidVersion(#[from] VersionError),
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("No upstream provider matches {0}")]
    NoProviderMatch(String),

    #[error("No release found for {url}: {source}")]
    NoReleaseFound {
        url: String,
        #[source]
        source: RegistryError,
    },

    #[error("No release found for {package}: {source}")]
    Exhausted {
        package: String,
        #[source]
        source: Box<ResolveError>,
    },
}
