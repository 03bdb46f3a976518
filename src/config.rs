use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;

use crate::aur::client::{self, AurClient};
use crate::version::registries::{CpanRegistry, GitHubRegistry, NpmRegistry, cpan, github, npm};
use crate::version::registry::Registry;
use crate::version::resolver::UpstreamResolver;

/// Timeout for a single HTTP request in milliseconds (30 seconds)
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Number of packages checked at the same time
pub const DEFAULT_CONCURRENCY: usize = 8;

/// User agent sent with every request
pub const USER_AGENT: &str = concat!("aur-upstream-check/", env!("CARGO_PKG_VERSION"));

/// Tool configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub http: HttpConfig,
    pub endpoints: EndpointsConfig,
    pub concurrency: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http: HttpConfig::default(),
            endpoints: EndpointsConfig::default(),
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct HttpConfig {
    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

/// Base URLs of the services queried
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct EndpointsConfig {
    pub aur: String,
    pub github: String,
    pub npm: String,
    pub cpan: String,
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            aur: client::DEFAULT_BASE_URL.to_string(),
            github: github::DEFAULT_BASE_URL.to_string(),
            npm: npm::DEFAULT_BASE_URL.to_string(),
            cpan: cpan::DEFAULT_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl Config {
    /// Load configuration from a JSON file
    ///
    /// A missing file yields the default configuration.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Returns the path to the configuration directory for aur-upstream-check.
/// Uses $XDG_CONFIG_HOME/aur-upstream-check if XDG_CONFIG_HOME is set,
/// otherwise falls back to ~/.config/aur-upstream-check,
/// or ./aur-upstream-check if neither is available.
pub fn config_dir() -> PathBuf {
    config_dir_with_env(std::env::var("XDG_CONFIG_HOME").ok(), dirs::home_dir())
}

/// Returns the path to the default configuration file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.json")
}

fn config_dir_with_env(xdg_config_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let config_dir = xdg_config_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".config")))
        .unwrap_or_else(|| PathBuf::from("."));

    config_dir.join("aur-upstream-check")
}

/// Build the HTTP client shared by every registry
pub fn build_http_client(config: &Config) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_millis(config.http.timeout_ms))
        .build()
}

/// Create the AUR client and the resolver for all supported registries
pub fn create_default_resolver(
    config: &Config,
    client: &reqwest::Client,
) -> (AurClient, UpstreamResolver) {
    let endpoints = &config.endpoints;
    let aur = AurClient::new(client.clone(), &endpoints.aur);

    let registries: Vec<Arc<dyn Registry>> = vec![
        Arc::new(GitHubRegistry::new(client.clone(), &endpoints.github)),
        Arc::new(NpmRegistry::new(client.clone(), &endpoints.npm)),
        Arc::new(CpanRegistry::new(client.clone(), &endpoints.cpan)),
    ];

    let resolver = UpstreamResolver::new(registries, Arc::new(aur.clone()));
    (aur, resolver)
}
