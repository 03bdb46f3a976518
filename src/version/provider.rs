//! Upstream provider detection from source URLs
//!
//! Providers are tried in declaration order and the first matching pattern
//! wins. Each pattern captures the identifier its registry needs; multiple
//! capture groups are joined with `/` (e.g. `owner/repo`).

use std::sync::LazyLock;

use regex::Regex;

use crate::version::error::ResolveError;

/// Upstream provider recognized from a URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    /// github.com/<owner>/<repo>
    GitHub,
    /// <owner>.github.io/<repo>
    GitHubPages,
    /// npmjs.com package pages and registry tarballs
    Npm,
    /// MetaCPAN / CPAN distributions
    Cpan,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::GitHub => "github",
            Provider::GitHubPages => "github_pages",
            Provider::Npm => "npm",
            Provider::Cpan => "cpan",
        }
    }

    /// Registry that resolves releases for this provider
    pub fn registry_kind(&self) -> RegistryKind {
        match self {
            Provider::GitHub | Provider::GitHubPages => RegistryKind::GitHub,
            Provider::Npm => RegistryKind::Npm,
            Provider::Cpan => RegistryKind::Cpan,
        }
    }
}

/// Type of upstream registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegistryKind {
    /// GitHub releases and tags API
    GitHub,
    /// npm registry dist-tags
    Npm,
    /// MetaCPAN release API
    Cpan,
}

impl RegistryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistryKind::GitHub => "github",
            RegistryKind::Npm => "npm",
            RegistryKind::Cpan => "cpan",
        }
    }
}

/// A URL matched to a provider, with the extracted identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upstream {
    pub provider: Provider,
    /// Identifier passed to the registry (e.g. "owner/repo", "left-pad")
    pub identifier: String,
    /// The URL the identifier was extracted from
    pub url: String,
}

static PATTERNS: LazyLock<Vec<(Provider, Regex)>> = LazyLock::new(|| {
    [
        (
            Provider::GitHub,
            r"github\.com[/:]([A-Za-z0-9_.-]+)/([A-Za-z0-9_.-]+?)(?:\.git)?(?:[/#?]|$)",
        ),
        (
            Provider::GitHubPages,
            r"([A-Za-z0-9-]+)\.github\.io/([A-Za-z0-9_.-]+?)(?:\.git)?(?:[/#?]|$)",
        ),
        (
            Provider::Npm,
            r"registry\.npmjs\.org/((?:@[^/]+/)?[^/@]+)/-/",
        ),
        (
            Provider::Npm,
            r"npmjs\.(?:com|org)/package/((?:@[^/#?]+/)?[^/#?]+)",
        ),
        (
            Provider::Cpan,
            r"cpan\.org/release/[A-Z0-9-]+/([A-Za-z0-9_-]+?)-v?\d",
        ),
        (
            Provider::Cpan,
            r"cpan\.org/(?:release|dist)/([A-Za-z0-9_-]+)(?:[/#?]|$)",
        ),
        (
            Provider::Cpan,
            r"cpan\.org/authors/id/(?:[^/]+/)+([A-Za-z0-9_-]+?)-v?\d[^/]*\.(?:tar\.gz|tgz|tar\.bz2|tar\.xz|zip)",
        ),
    ]
    .into_iter()
    .map(|(provider, pattern)| {
        (
            provider,
            Regex::new(pattern).expect("provider patterns are valid regexes"),
        )
    })
    .collect()
});

/// Find the provider for a URL and extract its identifier
pub fn classify(url: &str) -> Result<Upstream, ResolveError> {
    PATTERNS
        .iter()
        .find_map(|(provider, regex)| {
            let captures = regex.captures(url)?;
            let identifier = captures
                .iter()
                .skip(1)
                .flatten()
                .map(|m| m.as_str())
                .collect::<Vec<_>>()
                .join("/");
            Some(Upstream {
                provider: *provider,
                identifier,
                url: url.to_string(),
            })
        })
        .ok_or_else(|| ResolveError::NoProviderMatch(url.to_string()))
}
