//! Registry trait for fetching the latest upstream release

#[cfg(test)]
use mockall::automock;

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::version::error::RegistryError;
use crate::version::provider::RegistryKind;

/// Trait for fetching the latest release of an upstream project
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait Registry: Send + Sync {
    /// Returns the kind of registry this implementation handles
    fn kind(&self) -> RegistryKind;

    /// Fetches the raw version string of the latest release
    ///
    /// # Arguments
    /// * `identifier` - Identifier extracted from the source URL
    ///   (e.g., "owner/repo" for GitHub, "left-pad" for npm)
    ///
    /// # Returns
    /// * `Ok(String)` - The latest version as published upstream
    /// * `Err(RegistryError)` - If the fetch fails or no release exists
    async fn fetch_latest(&self, identifier: &str) -> Result<String, RegistryError>;
}

/// Send a GET request and decode a JSON body, mapping HTTP failures
pub(crate) async fn get_json<T: DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
    identifier: &str,
) -> Result<T, RegistryError> {
    debug!("Fetching {}", url);

    let response = client
        .get(url)
        .header("Accept", "application/json")
        .send()
        .await?;
    let response = check_status(response, identifier)?;

    response.json().await.map_err(|e| {
        warn!("Failed to parse response from {}: {}", url, e);
        RegistryError::InvalidResponse(e.to_string())
    })
}

/// Map non-success statuses to registry errors
pub(crate) fn check_status(response: Response, identifier: &str) -> Result<Response, RegistryError> {
    let status = response.status();

    if status == StatusCode::NOT_FOUND {
        return Err(RegistryError::NotFound(identifier.to_string()));
    }

    let header = |name: &str| {
        response
            .headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    let exhausted = header("x-ratelimit-remaining").is_some_and(|v| v == "0");
    if status == StatusCode::TOO_MANY_REQUESTS || (status == StatusCode::FORBIDDEN && exhausted) {
        return Err(RegistryError::RateLimited {
            retry_after_secs: header("retry-after").and_then(|v| v.parse().ok()),
        });
    }

    if !status.is_success() {
        warn!("{} returned status {}", response.url(), status);
        return Err(RegistryError::InvalidResponse(format!(
            "Unexpected status: {}",
            status
        )));
    }

    Ok(response)
}
