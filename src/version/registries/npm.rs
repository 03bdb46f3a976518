//! npm registry dist-tags implementation

use serde::Deserialize;

use crate::version::error::RegistryError;
use crate::version::provider::RegistryKind;
use crate::version::registry::{Registry, get_json};

/// Default base URL for npm registry
pub const DEFAULT_BASE_URL: &str = "https://registry.npmjs.org";

/// Response from the dist-tags endpoint
#[derive(Debug, Deserialize)]
struct DistTags {
    #[serde(default)]
    latest: String,
}

/// Registry implementation for npm registry API
pub struct NpmRegistry {
    client: reqwest::Client,
    base_url: String,
}

impl NpmRegistry {
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Encode package name for URL (handles scoped packages)
    fn encode_package_name(package_name: &str) -> String {
        if package_name.starts_with('@') {
            // Scoped package: @scope/name -> @scope%2Fname
            package_name.replace('/', "%2F")
        } else {
            package_name.to_string()
        }
    }
}

#[async_trait::async_trait]
impl Registry for NpmRegistry {
    fn kind(&self) -> RegistryKind {
        RegistryKind::Npm
    }

    async fn fetch_latest(&self, identifier: &str) -> Result<String, RegistryError> {
        let url = format!(
            "{}/-/package/{}/dist-tags",
            self.base_url,
            Self::encode_package_name(identifier)
        );

        let tags: DistTags = get_json(&self.client, &url, identifier).await?;

        if tags.latest.is_empty() {
            return Err(RegistryError::NoRelease(identifier.to_string()));
        }

        Ok(tags.latest)
    }
}
