//! Version comparison for packages

use futures::stream::{self, StreamExt};
use tracing::{debug, info};

use crate::aur::{Package, PackageSource};
use crate::version::error::RegistryError;
use crate::version::pkgver::Version;
use crate::version::resolver::UpstreamResolver;

/// Outcome of checking one package against its upstream
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Declared version is at least the upstream version
    UpToDate { declared: Version, upstream: Version },
    /// Upstream has a newer version
    OutOfDate { declared: Version, upstream: Version },
    /// Status could not be determined
    Unknown { reason: String },
}

impl Verdict {
    pub fn is_out_of_date(&self) -> bool {
        matches!(self, Verdict::OutOfDate { .. })
    }
}

/// A package paired with its verdict
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageReport {
    pub package: Package,
    pub verdict: Verdict,
}

/// Compare a declared version to the resolved upstream version
///
/// Upstream releases carry no epoch or package release, so the declared
/// epoch and release are kept and only the upstream part is replaced before
/// comparing. Equal versions count as up to date.
pub fn compare(declared: Version, upstream: &Version) -> Verdict {
    let upstream = declared.with_upstream(upstream);

    if declared < upstream {
        Verdict::OutOfDate { declared, upstream }
    } else {
        Verdict::UpToDate { declared, upstream }
    }
}

/// Check a single package
///
/// Every failure is turned into [`Verdict::Unknown`] carrying its message.
pub async fn check_package(resolver: &UpstreamResolver, package: &Package) -> Verdict {
    let declared = match Version::parse(&package.version) {
        Ok(version) => version,
        Err(e) => {
            return Verdict::Unknown {
                reason: e.to_string(),
            };
        }
    };

    let verdict = match resolver.resolve(package).await {
        Ok(upstream) => compare(declared, &upstream),
        Err(e) => Verdict::Unknown {
            reason: e.to_string(),
        },
    };

    debug!("{}: {:?}", package.name, verdict);
    verdict
}

/// Check every package of a maintainer
///
/// Packages are checked with at most `concurrency` in flight and reported in
/// the order the package source returned them. Only a failing maintainer
/// lookup is an error.
pub async fn check_maintainer(
    source: &dyn PackageSource,
    resolver: &UpstreamResolver,
    maintainer: &str,
    concurrency: usize,
) -> Result<Vec<PackageReport>, RegistryError> {
    let packages = source.search_by_maintainer(maintainer).await?;
    info!("Checking {} packages of {}", packages.len(), maintainer);

    let reports: Vec<PackageReport> = stream::iter(packages)
        .map(|package| async move {
            let verdict = check_package(resolver, &package).await;
            PackageReport { package, verdict }
        })
        .buffered(concurrency.max(1))
        .collect()
        .await;

    Ok(reports)
}
