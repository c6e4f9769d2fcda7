//! Package ↔ release correlation and the project-detail composite.

use libdex_core::package::Package;
use libdex_core::reference::{ArtifactCoordinate, PackageReference};
use libdex_core::release::Release;
use libdex_core::selection::{ReleaseSelection, ReleaseView};
use libdex_index::model::{Collection, QueryExpression, SearchRequest, SortDirective};
use serde::Serialize;

use crate::engine::{decode, SearchEngine};
use crate::error::QueryError;

/// Upper bound on the release history fetched for one package.
///
/// Generous enough for a realistic history; a package with more releases
/// silently loses the excess. Accepted limitation, not a failure.
pub const RELEASE_HISTORY_CAP: u64 = 1000;

/// The composite result backing a project detail page.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectDetail {
    /// The package itself, sanitized.
    pub package: Package,
    /// Number of releases found for the package, subject to
    /// [`RELEASE_HISTORY_CAP`].
    pub release_count: u64,
    /// The release chosen for presentation, when the selector found one.
    pub selected: Option<ReleaseView>,
}

impl SearchEngine {
    /// All releases belonging to `reference`: organization AND repository
    /// must both match.
    ///
    /// Order beyond the index's natural order is not defined.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError`] when the index round trip fails or a hit does
    /// not decode into a [`Release`].
    pub async fn releases_for(
        &self,
        reference: &PackageReference,
    ) -> Result<Vec<Release>, QueryError> {
        let request = SearchRequest {
            collection: Collection::Releases,
            query: QueryExpression::all_of(vec![
                QueryExpression::term("reference.organization", reference.organization.as_str()),
                QueryExpression::term("reference.repository", reference.repository.as_str()),
            ]),
            sort: SortDirective::Relevance,
            offset: 0,
            limit: RELEASE_HISTORY_CAP,
        };
        let result = self.index.search(&request).await?;
        result.hits.into_iter().map(decode).collect()
    }

    /// The release published at exactly `coordinate`, if any.
    ///
    /// More than one match indicates an upstream data-integrity problem;
    /// the first hit wins. Absence is a valid outcome, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError`] when the index round trip fails or the hit
    /// does not decode into a [`Release`].
    pub async fn resolve_artifact(
        &self,
        coordinate: &ArtifactCoordinate,
    ) -> Result<Option<Release>, QueryError> {
        let request = SearchRequest {
            collection: Collection::Releases,
            query: QueryExpression::all_of(vec![
                QueryExpression::term("coordinate.group", coordinate.group.as_str()),
                QueryExpression::term("coordinate.artifact", coordinate.artifact.as_str()),
                QueryExpression::term("coordinate.version", coordinate.version.as_str()),
            ]),
            sort: SortDirective::Relevance,
            offset: 0,
            limit: 1,
        };
        let result = self.index.search(&request).await?;
        result.hits.into_iter().next().map(decode).transpose()
    }

    /// The package identified by `reference`, sanitized, if it exists.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError`] when the index round trip fails or the hit
    /// does not decode into a [`Package`].
    pub async fn resolve_project(
        &self,
        reference: &PackageReference,
    ) -> Result<Option<Package>, QueryError> {
        let request = SearchRequest {
            collection: Collection::Packages,
            query: QueryExpression::all_of(vec![
                QueryExpression::term("organization", reference.organization.as_str()),
                QueryExpression::term("repository", reference.repository.as_str()),
            ]),
            sort: SortDirective::Relevance,
            offset: 0,
            limit: 1,
        };
        let result = self.index.search(&request).await?;
        result
            .hits
            .into_iter()
            .next()
            .map(|hit| decode::<Package>(hit).map(Package::sanitized))
            .transpose()
    }

    /// Project detail composite: the package, its release count, and the
    /// release chosen for presentation.
    ///
    /// [`Self::resolve_project`] and [`Self::releases_for`] are issued as
    /// two independent concurrent round trips; release choice is delegated
    /// to the injected selector. `None` when the package does not exist,
    /// regardless of whether releases were found.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError`] when either round trip fails or a document
    /// does not decode.
    pub async fn project_detail(
        &self,
        reference: &PackageReference,
        selection: &ReleaseSelection,
    ) -> Result<Option<ProjectDetail>, QueryError> {
        let (package, releases) = tokio::join!(
            self.resolve_project(reference),
            self.releases_for(reference),
        );
        let (package, releases) = (package?, releases?);
        let Some(package) = package else {
            return Ok(None);
        };
        let selected = self.selector.select(&package, selection, &releases);
        Ok(Some(ProjectDetail {
            package,
            release_count: u64::try_from(releases.len()).unwrap_or(u64::MAX),
            selected,
        }))
    }
}
