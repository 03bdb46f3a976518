//! GitHub Releases API registry implementation

use serde::Deserialize;
use tracing::debug;

use crate::version::error::RegistryError;
use crate::version::provider::RegistryKind;
use crate::version::registry::{Registry, get_json};

/// Default base URL for GitHub API
pub const DEFAULT_BASE_URL: &str = "https://api.github.com";

/// Response item from GitHub Releases API
#[derive(Debug, Deserialize)]
struct Release {
    tag_name: String,
    #[serde(default)]
    draft: bool,
    #[serde(default)]
    prerelease: bool,
}

/// Response item from GitHub Tags API
#[derive(Debug, Deserialize)]
struct Tag {
    name: String,
}

/// Registry implementation for GitHub Releases API
///
/// Uses the newest published release, falling back to the newest tag for
/// repositories that never publish releases.
pub struct GitHubRegistry {
    client: reqwest::Client,
    base_url: String,
}

impl GitHubRegistry {
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn latest_release(&self, repo: &str) -> Result<Option<String>, RegistryError> {
        let url = format!("{}/repos/{}/releases", self.base_url, repo);
        let releases: Vec<Release> = get_json(&self.client, &url, repo).await?;

        Ok(releases
            .into_iter()
            .find(|r| !r.draft && !r.prerelease)
            .map(|r| r.tag_name))
    }

    async fn latest_tag(&self, repo: &str) -> Result<Option<String>, RegistryError> {
        let url = format!("{}/repos/{}/tags", self.base_url, repo);
        let tags: Vec<Tag> = get_json(&self.client, &url, repo).await?;

        Ok(tags.into_iter().next().map(|t| t.name))
    }
}

#[async_trait::async_trait]
impl Registry for GitHubRegistry {
    fn kind(&self) -> RegistryKind {
        RegistryKind::GitHub
    }

    async fn fetch_latest(&self, identifier: &str) -> Result<String, RegistryError> {
        let tag = match self.latest_release(identifier).await? {
            Some(tag) => tag,
            None => {
                debug!("No published release for {}, trying tags", identifier);
                self.latest_tag(identifier)
                    .await?
                    .ok_or_else(|| RegistryError::NoRelease(identifier.to_string()))?
            }
        };

        let repo_name = identifier.rsplit('/').next().unwrap_or(identifier);
        let version = normalize_tag(&tag, repo_name);
        if version.is_empty() {
            return Err(RegistryError::NoRelease(identifier.to_string()));
        }

        Ok(version.to_string())
    }
}

/// Strip common tag decorations: `v1.2.3` and `<repo>-1.2.3` become `1.2.3`
fn normalize_tag<'a>(tag: &'a str, repo_name: &str) -> &'a str {
    let tag = tag.trim();

    let tag = tag
        .strip_prefix(repo_name)
        .and_then(|rest| rest.strip_prefix(['-', '_']))
        .filter(|rest| rest.starts_with(|c: char| c.is_ascii_digit() || c == 'v'))
        .unwrap_or(tag);

    match tag.strip_prefix(['v', 'V']) {
        Some(rest) if rest.starts_with(|c: char| c.is_ascii_digit()) => rest,
        _ => tag,
    }
}
