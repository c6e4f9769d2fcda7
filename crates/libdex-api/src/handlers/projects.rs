//! Handlers for project detail, release history, and artifact lookup.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use libdex_core::reference::{ArtifactCoordinate, PackageReference};
use libdex_core::release::Release;
use libdex_core::selection::ReleaseSelection;
use libdex_search::project::ProjectDetail;

use crate::handlers::search::internal_error;
use crate::router::AppState;

/// `GET /v1/projects/{organization}/{repository}` — project detail page
/// data, with optional `artifact` and `version` selection criteria.
///
/// # Errors
///
/// Returns `404` when the package does not exist and `500` when an index
/// round trip fails.
pub async fn project_detail_handler(
    State(state): State<AppState>,
    Path((organization, repository)): Path<(String, String)>,
    Query(selection): Query<ReleaseSelection>,
) -> Result<Json<ProjectDetail>, StatusCode> {
    let reference = PackageReference::new(organization, repository);
    state
        .engine
        .project_detail(&reference, &selection)
        .await
        .map_err(internal_error)?
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

/// `GET /v1/projects/{organization}/{repository}/releases` — full release
/// history for one package.
///
/// # Errors
///
/// Returns `500` when the index round trip fails.
pub async fn releases_handler(
    State(state): State<AppState>,
    Path((organization, repository)): Path<(String, String)>,
) -> Result<Json<Vec<Release>>, StatusCode> {
    let reference = PackageReference::new(organization, repository);
    state
        .engine
        .releases_for(&reference)
        .await
        .map(Json)
        .map_err(internal_error)
}

/// `GET /v1/artifacts/{group}/{artifact}/{version}` — resolve one release
/// by its exact artifact coordinate.
///
/// # Errors
///
/// Returns `404` when no release carries the coordinate and `500` when the
/// index round trip fails.
pub async fn artifact_handler(
    State(state): State<AppState>,
    Path((group, artifact, version)): Path<(String, String, String)>,
) -> Result<Json<Release>, StatusCode> {
    let coordinate = ArtifactCoordinate::new(group, artifact, version);
    state
        .engine
        .resolve_artifact(&coordinate)
        .await
        .map_err(internal_error)?
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}
