//! Common types for AUR packages

use serde::Deserialize;

/// A package as listed by the AUR
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Package {
    /// Package name (e.g., "yay", "python-foo")
    #[serde(rename = "Name")]
    pub name: String,
    /// Declared version, `[epoch:]pkgver-pkgrel`
    #[serde(rename = "Version")]
    pub version: String,
    /// Upstream URL, empty when the package declares none
    #[serde(rename = "URL", default, deserialize_with = "null_as_empty")]
    pub url: String,
}

impl Package {
    pub fn new(name: &str, version: &str, url: &str) -> Self {
        Self {
            name: name.to_string(),
            version: version.to_string(),
            url: url.to_string(),
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Build recipe of a package, reduced to its declared sources
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildRecipe {
    /// Source entries in declaration order, architecture-independent first
    pub sources: Vec<String>,
}

impl BuildRecipe {
    /// The first declared source, the one used for upstream detection
    pub fn first_source(&self) -> Option<&str> {
        self.sources.first().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn package_deserializes_rpc_result() {
        let package: Package = serde_json::from_str(
            r#"{
                "ID": 1,
                "Name": "foo",
                "PackageBase": "foo",
                "Version": "1:2.0-3",
                "URL": "https://github.com/acme/foo",
                "Maintainer": "alice"
            }"#,
        )
        .unwrap();

        assert_eq!(package, Package::new("foo", "1:2.0-3", "https://github.com/acme/foo"));
    }

    #[test]
    fn package_deserializes_null_url_as_empty() {
        let package: Package =
            serde_json::from_str(r#"{"Name": "bar", "Version": "1.0-1", "URL": null}"#).unwrap();

        assert_eq!(package.url, "");
    }

    #[test]
    fn first_source_returns_none_for_empty_recipe() {
        assert_eq!(BuildRecipe::default().first_source(), None);
    }
}
