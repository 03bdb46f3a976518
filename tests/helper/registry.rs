//! Registry test utilities

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use aur_upstream_check::aur::{BuildRecipe, Package, PackageSource, RecipeSource};
use aur_upstream_check::version::error::RegistryError;
use aur_upstream_check::version::provider::RegistryKind;
use aur_upstream_check::version::registry::Registry;
use aur_upstream_check::version::resolver::UpstreamResolver;

/// Fake registry answering from a fixed table
pub struct FakeRegistry {
    kind: RegistryKind,
    releases: HashMap<String, String>,
}

impl FakeRegistry {
    pub fn new(kind: RegistryKind) -> Self {
        Self {
            kind,
            releases: HashMap::new(),
        }
    }

    pub fn with_release(mut self, identifier: &str, version: &str) -> Self {
        self.releases
            .insert(identifier.to_string(), version.to_string());
        self
    }
}

#[async_trait]
impl Registry for FakeRegistry {
    fn kind(&self) -> RegistryKind {
        self.kind
    }

    async fn fetch_latest(&self, identifier: &str) -> Result<String, RegistryError> {
        match self.releases.get(identifier) {
            Some(version) => Ok(version.clone()),
            None => Err(RegistryError::NotFound(identifier.to_string())),
        }
    }
}

/// Fake recipe source keyed by package name
#[derive(Default)]
pub struct FakeRecipeSource {
    recipes: HashMap<String, Vec<String>>,
}

impl FakeRecipeSource {
    pub fn with_sources(mut self, package: &str, sources: Vec<&str>) -> Self {
        self.recipes.insert(
            package.to_string(),
            sources.into_iter().map(|s| s.to_string()).collect(),
        );
        self
    }
}

#[async_trait]
impl RecipeSource for FakeRecipeSource {
    async fn fetch_recipe(&self, package_name: &str) -> Result<BuildRecipe, RegistryError> {
        match self.recipes.get(package_name) {
            Some(sources) => Ok(BuildRecipe {
                sources: sources.clone(),
            }),
            None => Err(RegistryError::NotFound(package_name.to_string())),
        }
    }
}

/// Fake package source returning a fixed package list for one maintainer
pub struct FakePackageSource {
    maintainer: String,
    packages: Vec<Package>,
}

impl FakePackageSource {
    pub fn new(maintainer: &str, packages: Vec<Package>) -> Self {
        Self {
            maintainer: maintainer.to_string(),
            packages,
        }
    }
}

#[async_trait]
impl PackageSource for FakePackageSource {
    async fn search_by_maintainer(&self, maintainer: &str) -> Result<Vec<Package>, RegistryError> {
        if maintainer == self.maintainer {
            Ok(self.packages.clone())
        } else {
            Err(RegistryError::InvalidResponse(format!(
                "No such user: {}",
                maintainer
            )))
        }
    }
}

/// Create a resolver backed by the given fakes
pub fn create_test_resolver(
    registries: Vec<FakeRegistry>,
    recipes: FakeRecipeSource,
) -> UpstreamResolver {
    let registries: Vec<Arc<dyn Registry>> = registries
        .into_iter()
        .map(|registry| Arc::new(registry) as Arc<dyn Registry>)
        .collect();
    UpstreamResolver::new(registries, Arc::new(recipes))
}
