//! MetaCPAN release API implementation
//!
//! API documentation: https://github.com/metacpan/metacpan-api/blob/master/docs/API-docs.md

use serde::Deserialize;

use crate::version::error::RegistryError;
use crate::version::provider::RegistryKind;
use crate::version::registry::{Registry, get_json};

/// Default base URL for MetaCPAN API
pub const DEFAULT_BASE_URL: &str = "https://fastapi.metacpan.org";

/// Latest release of a distribution
#[derive(Debug, Deserialize)]
struct CpanRelease {
    #[serde(default)]
    version: String,
}

/// Registry implementation for MetaCPAN
pub struct CpanRegistry {
    client: reqwest::Client,
    base_url: String,
}

impl CpanRegistry {
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait::async_trait]
impl Registry for CpanRegistry {
    fn kind(&self) -> RegistryKind {
        RegistryKind::Cpan
    }

    async fn fetch_latest(&self, identifier: &str) -> Result<String, RegistryError> {
        let url = format!("{}/v1/release/{}", self.base_url, identifier);
        let release: CpanRelease = get_json(&self.client, &url, identifier).await?;

        if release.version.is_empty() {
            return Err(RegistryError::NoRelease(identifier.to_string()));
        }

        Ok(release.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    fn registry(server: &Server) -> CpanRegistry {
        CpanRegistry::new(reqwest::Client::new(), &server.url())
    }

    #[tokio::test]
    async fn fetch_latest_returns_release_version() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/v1/release/Moose")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "name": "Moose-2.2207",
                    "distribution": "Moose",
                    "version": "2.2207",
                    "status": "latest"
                }"#,
            )
            .create_async()
            .await;

        let result = registry(&server).fetch_latest("Moose").await.unwrap();

        mock.assert_async().await;
        assert_eq!(result, "2.2207");
    }

    #[tokio::test]
    async fn fetch_latest_returns_no_release_for_empty_version() {
        let mut server = Server::new_async().await;

        server
            .mock("GET", "/v1/release/Empty-Dist")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"distribution": "Empty-Dist", "version": ""}"#)
            .create_async()
            .await;

        let result = registry(&server).fetch_latest("Empty-Dist").await;

        assert!(matches!(result, Err(RegistryError::NoRelease(_))));
    }

    #[tokio::test]
    async fn fetch_latest_returns_not_found_for_unknown_distribution() {
        let mut server = Server::new_async().await;

        server
            .mock("GET", "/v1/release/No-Such-Dist")
            .with_status(404)
            .with_body(r#"{"code": 404, "message": "Not found"}"#)
            .create_async()
            .await;

        let result = registry(&server).fetch_latest("No-Such-Dist").await;

        assert!(matches!(result, Err(RegistryError::NotFound(_))));
    }

    #[tokio::test]
    async fn fetch_latest_returns_invalid_response_for_undecodable_body() {
        let mut server = Server::new_async().await;

        server
            .mock("GET", "/v1/release/Moose")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let result = registry(&server).fetch_latest("Moose").await;

        assert!(matches!(result, Err(RegistryError::InvalidResponse(_))));
    }
}
