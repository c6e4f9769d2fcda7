//! Handlers for the package search and recency feed endpoints.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use libdex_core::package::Package;
use libdex_core::release::Release;
use libdex_search::error::QueryError;
use libdex_search::page::PageResult;
use log::error;
use serde::Deserialize;

use crate::router::AppState;

/// Query parameters for `GET /v1/search`.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// Full-text search query.
    pub q: Option<String>,
    /// Page number (default 1; non-positive values clamp to 1).
    pub page: Option<i64>,
    /// Sort key: `stars`, `forks`, `relevant`, `created`, or `updated`.
    pub sort: Option<String>,
}

/// `GET /v1/search` — full-text package search.
///
/// # Errors
///
/// Returns `500` when the index round trip fails.
pub async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<PageResult<Package>>, StatusCode> {
    let query = params.q.unwrap_or_default();
    let page = params.page.unwrap_or(1);
    let result = state
        .engine
        .find(&query, page, params.sort.as_deref())
        .await
        .map_err(internal_error)?;
    Ok(Json(result))
}

/// `GET /v1/latest/packages` — the most recently cataloged packages.
///
/// # Errors
///
/// Returns `500` when the index round trip fails.
pub async fn latest_packages_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Package>>, StatusCode> {
    state
        .engine
        .latest_packages()
        .await
        .map(Json)
        .map_err(internal_error)
}

/// `GET /v1/latest/releases` — the most recently published releases.
///
/// # Errors
///
/// Returns `500` when the index round trip fails.
pub async fn latest_releases_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Release>>, StatusCode> {
    state
        .engine
        .latest_releases()
        .await
        .map(Json)
        .map_err(internal_error)
}

/// Log an engine failure and surface it as `500`.
pub(crate) fn internal_error(e: QueryError) -> StatusCode {
    error!("query failed: {e}");
    StatusCode::INTERNAL_SERVER_ERROR
}
