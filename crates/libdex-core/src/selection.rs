//! Default-release selection: which release a detail view should present.

use std::cmp::Ordering;

use semver::Version;
use serde::{Deserialize, Serialize};

use crate::package::Package;
use crate::release::Release;

/// Caller-supplied criteria narrowing which release to present.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReleaseSelection {
    /// Restrict the choice to a specific artifact name.
    pub artifact: Option<String>,
    /// Restrict the choice to a specific version string.
    pub version: Option<String>,
}

/// The release a detail view presents, plus the artifact names and versions
/// available for switching.
#[derive(Debug, Clone, Serialize)]
pub struct ReleaseView {
    /// The chosen release.
    pub release: Release,
    /// Distinct artifact names published for the package, sorted.
    pub artifacts: Vec<String>,
    /// Distinct version strings, newest first.
    pub versions: Vec<String>,
}

/// Picks which release to present for a package given the caller's criteria.
pub trait ReleaseSelector: Send + Sync {
    /// Choose a release, or nothing when no release fits the criteria.
    fn select(
        &self,
        package: &Package,
        selection: &ReleaseSelection,
        releases: &[Release],
    ) -> Option<ReleaseView>;
}

/// Selection policy used when the caller supplies no criteria: the newest
/// version wins, comparing semver where both sides parse and falling back
/// to lexicographic order otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultReleaseSelector;

fn compare_versions(left: &str, right: &str) -> Ordering {
    match (Version::parse(left), Version::parse(right)) {
        (Ok(l), Ok(r)) => l.cmp(&r),
        _ => left.cmp(right),
    }
}

impl ReleaseSelector for DefaultReleaseSelector {
    fn select(
        &self,
        _package: &Package,
        selection: &ReleaseSelection,
        releases: &[Release],
    ) -> Option<ReleaseView> {
        let chosen = releases
            .iter()
            .filter(|r| {
                selection
                    .artifact
                    .as_ref()
                    .is_none_or(|a| *a == r.coordinate.artifact)
            })
            .filter(|r| {
                selection
                    .version
                    .as_ref()
                    .is_none_or(|v| *v == r.coordinate.version)
            })
            .max_by(|l, r| compare_versions(&l.coordinate.version, &r.coordinate.version))?;

        let mut artifacts: Vec<String> = releases
            .iter()
            .map(|r| r.coordinate.artifact.clone())
            .collect();
        artifacts.sort();
        artifacts.dedup();

        let mut versions: Vec<String> = releases
            .iter()
            .map(|r| r.coordinate.version.clone())
            .collect();
        versions.sort_by(|l, r| compare_versions(r, l));
        versions.dedup();

        Some(ReleaseView {
            release: chosen.clone(),
            artifacts,
            versions,
        })
    }
}
