//! Handler for the facet endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use libdex_index::model::Bucket;

use crate::handlers::search::internal_error;
use crate::router::AppState;

/// Fields a facet may be requested for.
const FACET_FIELDS: [&str; 3] = ["keywords", "targets", "dependencies"];

/// `GET /v1/facets/{field}` — term-frequency facet over the catalog.
///
/// # Errors
///
/// Returns `404` for a field outside the facet whitelist and `500` when
/// the index round trip fails.
pub async fn facet_handler(
    State(state): State<AppState>,
    Path(field): Path<String>,
) -> Result<Json<Vec<Bucket>>, StatusCode> {
    if !FACET_FIELDS.contains(&field.as_str()) {
        return Err(StatusCode::NOT_FOUND);
    }
    state
        .engine
        .facet(&field)
        .await
        .map(Json)
        .map_err(internal_error)
}
