//! AUR RPC and cgit client

#[cfg(test)]
use mockall::automock;

use reqwest::Url;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::aur::srcinfo::parse_srcinfo;
use crate::aur::types::{BuildRecipe, Package};
use crate::version::error::RegistryError;
use crate::version::registry::{check_status, get_json};

/// Default base URL for the AUR
pub const DEFAULT_BASE_URL: &str = "https://aur.archlinux.org";

/// Source of the packages owned by a maintainer
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait PackageSource: Send + Sync {
    /// List every package maintained by `maintainer`
    async fn search_by_maintainer(&self, maintainer: &str) -> Result<Vec<Package>, RegistryError>;
}

/// Source of package build recipes
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait RecipeSource: Send + Sync {
    /// Fetch the build recipe of `package_name`
    async fn fetch_recipe(&self, package_name: &str) -> Result<BuildRecipe, RegistryError>;
}

/// Response from the AUR RPC interface (v5)
#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    results: Vec<Package>,
}

/// Client for aur.archlinux.org
#[derive(Clone)]
pub struct AurClient {
    client: reqwest::Client,
    base_url: String,
}

impl AurClient {
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Build `{base}/{path}/{segment}?{query}` with `segment` and `query` encoded
    fn endpoint(
        &self,
        path: &str,
        segment: Option<&str>,
        query: &[(&str, &str)],
    ) -> Result<Url, RegistryError> {
        let raw = format!("{}/{}", self.base_url, path);
        let mut url = Url::parse_with_params(&raw, query)
            .map_err(|e| RegistryError::InvalidUrl(format!("{}: {}", raw, e)))?;

        if let Some(segment) = segment {
            url.path_segments_mut()
                .map_err(|_| RegistryError::InvalidUrl(raw.clone()))?
                .push(segment);
        }

        Ok(url)
    }
}

#[async_trait::async_trait]
impl PackageSource for AurClient {
    async fn search_by_maintainer(&self, maintainer: &str) -> Result<Vec<Package>, RegistryError> {
        let url = self.endpoint(
            "rpc/v5/search",
            Some(maintainer),
            &[("by", "maintainer")],
        )?;
        let response: RpcResponse = get_json(&self.client, url.as_str(), maintainer).await?;

        if response.kind == "error" {
            let message = response.error.unwrap_or_else(|| "unknown error".to_string());
            warn!("AUR RPC error for maintainer {}: {}", maintainer, message);
            return Err(RegistryError::InvalidResponse(message));
        }

        debug!(
            "Found {} packages for maintainer {}",
            response.results.len(),
            maintainer
        );

        Ok(response.results)
    }
}

#[async_trait::async_trait]
impl RecipeSource for AurClient {
    async fn fetch_recipe(&self, package_name: &str) -> Result<BuildRecipe, RegistryError> {
        let url = self.endpoint("cgit/aur.git/plain/.SRCINFO", None, &[("h", package_name)])?;
        debug!("Fetching {}", url);

        let response = self.client.get(url).send().await?;
        let body = check_status(response, package_name)?.text().await?;

        // cgit answers unknown branches with an empty page
        if body.trim().is_empty() {
            return Err(RegistryError::NotFound(package_name.to_string()));
        }

        Ok(parse_srcinfo(&body))
    }
}
