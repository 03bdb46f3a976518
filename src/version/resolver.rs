//! Upstream version resolution for a package
//!
//! Tries the package's own URL first. When that fails, the package's build
//! recipe is fetched and its first source entry is tried instead.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::aur::{Package, RecipeSource};
use crate::version::error::{RegistryError, ResolveError};
use crate::version::pkgver::Version;
use crate::version::provider::{RegistryKind, classify};
use crate::version::registry::Registry;

/// Resolves the latest upstream version of packages
pub struct UpstreamResolver {
    registries: HashMap<RegistryKind, Arc<dyn Registry>>,
    recipes: Arc<dyn RecipeSource>,
}

impl UpstreamResolver {
    /// Create a resolver from registries (keyed by their kind) and a recipe source
    pub fn new(registries: Vec<Arc<dyn Registry>>, recipes: Arc<dyn RecipeSource>) -> Self {
        let registries = registries
            .into_iter()
            .map(|registry| (registry.kind(), registry))
            .collect();
        Self {
            registries,
            recipes,
        }
    }

    /// Resolve the latest upstream version for a single URL
    pub async fn resolve_url(&self, url: &str) -> Result<Version, ResolveError> {
        let upstream = classify(url)?;
        let kind = upstream.provider.registry_kind();

        let Some(registry) = self.registries.get(&kind) else {
            warn!("No {} registry configured for {}", kind.as_str(), url);
            return Err(ResolveError::NoProviderMatch(url.to_string()));
        };

        debug!(
            "Resolving {} via {} ({})",
            url,
            upstream.provider.as_str(),
            upstream.identifier
        );

        let no_release = |source: RegistryError| ResolveError::NoReleaseFound {
            url: url.to_string(),
            source,
        };

        let raw = registry
            .fetch_latest(&upstream.identifier)
            .await
            .map_err(no_release)?;

        Version::parse(&raw).map_err(|e| no_release(e.into()))
    }

    /// Resolve the latest upstream version of a package
    ///
    /// Falls back to the first source of the package's build recipe when the
    /// package URL cannot be resolved. The error of the first attempt is
    /// reported when the fallback fails too.
    pub async fn resolve(&self, package: &Package) -> Result<Version, ResolveError> {
        let original = match self.resolve_url(&package.url).await {
            Ok(version) => return Ok(version),
            Err(e) => e,
        };

        debug!(
            "Could not resolve {} from its URL ({}), trying build recipe",
            package.name, original
        );

        let exhausted = |source: ResolveError| ResolveError::Exhausted {
            package: package.name.clone(),
            source: Box::new(source),
        };

        let recipe = match self.recipes.fetch_recipe(&package.name).await {
            Ok(recipe) => recipe,
            Err(e) => {
                warn!("Failed to fetch build recipe for {}: {}", package.name, e);
                return Err(exhausted(original));
            }
        };

        let Some(source) = recipe.first_source() else {
            debug!("Build recipe for {} declares no sources", package.name);
            return Err(exhausted(original));
        };

        match self.resolve_url(source).await {
            Ok(version) => Ok(version),
            Err(e) => {
                debug!("Recipe source of {} did not resolve: {}", package.name, e);
                Err(exhausted(original))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aur::BuildRecipe;
    use crate::aur::client::MockRecipeSource;
    use crate::version::registry::MockRegistry;
    use mockall::predicate::eq;

    fn github_returning(identifier: &'static str, tag: &'static str) -> Arc<dyn Registry> {
        let mut registry = MockRegistry::new();
        registry.expect_kind().return_const(RegistryKind::GitHub);
        registry
            .expect_fetch_latest()
            .with(eq(identifier))
            .returning(move |_| Ok(tag.to_string()));
        Arc::new(registry)
    }

    fn no_recipe_expected() -> Arc<dyn RecipeSource> {
        let mut recipes = MockRecipeSource::new();
        recipes.expect_fetch_recipe().never();
        Arc::new(recipes)
    }

    fn recipe_with(sources: Vec<&'static str>) -> Arc<dyn RecipeSource> {
        let mut recipes = MockRecipeSource::new();
        recipes.expect_fetch_recipe().times(1).returning(move |_| {
            Ok(BuildRecipe {
                sources: sources.iter().map(|s| s.to_string()).collect(),
            })
        });
        Arc::new(recipes)
    }

    #[tokio::test]
    async fn resolve_uses_package_url() {
        let resolver = UpstreamResolver::new(
            vec![github_returning("acme/foo", "2.1")],
            no_recipe_expected(),
        );
        let package = Package::new("foo", "2.0-1", "https://github.com/acme/foo");

        let version = resolver.resolve(&package).await.unwrap();

        assert_eq!(version, Version::parse("2.1").unwrap());
    }

    #[tokio::test]
    async fn resolve_falls_back_to_first_recipe_source() {
        let resolver = UpstreamResolver::new(
            vec![github_returning("acme/foo", "3.0")],
            recipe_with(vec![
                "foo-3.0.tar.gz::https://github.com/acme/foo/archive/v3.0.tar.gz",
                "https://registry.npmjs.org/foo/-/foo-1.0.tgz",
            ]),
        );
        let package = Package::new("foo", "2.0-1", "https://foo.example.org");

        let version = resolver.resolve(&package).await.unwrap();

        assert_eq!(version, Version::parse("3.0").unwrap());
    }

    #[tokio::test]
    async fn resolve_reports_original_error_when_recipe_has_no_sources() {
        let resolver = UpstreamResolver::new(vec![], recipe_with(vec![]));
        let package = Package::new("foo", "1.0-1", "https://foo.example.org");

        let result = resolver.resolve(&package).await;

        match result {
            Err(ResolveError::Exhausted { package, source }) => {
                assert_eq!(package, "foo");
                assert!(matches!(
                    *source,
                    ResolveError::NoProviderMatch(ref url) if url == "https://foo.example.org"
                ));
            }
            other => panic!("expected Exhausted, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn resolve_reports_original_error_when_recipe_fetch_fails() {
        let mut recipes = MockRecipeSource::new();
        recipes
            .expect_fetch_recipe()
            .with(eq("foo"))
            .times(1)
            .returning(|name| Err(RegistryError::NotFound(name.to_string())));
        let resolver = UpstreamResolver::new(vec![], Arc::new(recipes));
        let package = Package::new("foo", "1.0-1", "");

        let result = resolver.resolve(&package).await;

        match result {
            Err(ResolveError::Exhausted { source, .. }) => {
                assert!(matches!(*source, ResolveError::NoProviderMatch(_)));
            }
            other => panic!("expected Exhausted, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn resolve_reports_original_error_when_recipe_source_fails() {
        let mut registry = MockRegistry::new();
        registry.expect_kind().return_const(RegistryKind::GitHub);
        registry
            .expect_fetch_latest()
            .with(eq("acme/foo"))
            .times(1)
            .returning(|id| Err(RegistryError::NoRelease(id.to_string())));
        let resolver = UpstreamResolver::new(
            vec![Arc::new(registry)],
            recipe_with(vec!["https://example.org/foo.tar.gz"]),
        );
        let package = Package::new("foo", "1.0-1", "https://github.com/acme/foo");

        let result = resolver.resolve(&package).await;

        match result {
            Err(ResolveError::Exhausted { source, .. }) => {
                assert!(matches!(
                    *source,
                    ResolveError::NoReleaseFound { ref url, source: RegistryError::NoRelease(_) }
                        if url == "https://github.com/acme/foo"
                ));
            }
            other => panic!("expected Exhausted, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn resolve_url_embeds_url_in_no_release_message() {
        let mut registry = MockRegistry::new();
        registry.expect_kind().return_const(RegistryKind::Npm);
        registry
            .expect_fetch_latest()
            .returning(|id| Err(RegistryError::NoRelease(id.to_string())));
        let resolver = UpstreamResolver::new(vec![Arc::new(registry)], no_recipe_expected());

        let err = resolver
            .resolve_url("https://www.npmjs.com/package/left-pad")
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "No release found for https://www.npmjs.com/package/left-pad: No release data for left-pad"
        );
    }

    #[tokio::test]
    async fn resolve_url_rejects_unparsable_upstream_version() {
        let resolver = UpstreamResolver::new(
            vec![github_returning("acme/foo", "release candidate")],
            no_recipe_expected(),
        );

        let result = resolver.resolve_url("https://github.com/acme/foo").await;

        assert!(matches!(
            result,
            Err(ResolveError::NoReleaseFound {
                source: RegistryError::InvalidVersion(_),
                ..
            })
        ));
    }

    #[tokio::test]
    async fn resolve_url_fails_without_registry_for_provider() {
        let resolver = UpstreamResolver::new(vec![], no_recipe_expected());

        let result = resolver.resolve_url("https://metacpan.org/release/Moose").await;

        assert!(matches!(result, Err(ResolveError::NoProviderMatch(_))));
    }
}
