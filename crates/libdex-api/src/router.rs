//! Axum router construction.

use std::sync::Arc;

use axum::routing::get;
use axum::{Json, Router};
use libdex_search::engine::SearchEngine;
use serde::Serialize;

use crate::handlers;

/// Shared state available to every handler.
#[derive(Clone)]
pub struct AppState {
    /// The query engine all routes delegate to.
    pub engine: Arc<SearchEngine>,
}

/// Response body for the health endpoint.
#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

/// Build the axum application router.
#[must_use]
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health_handler))
        .route("/v1/search", get(handlers::search::search_handler))
        .route(
            "/v1/latest/packages",
            get(handlers::search::latest_packages_handler),
        )
        .route(
            "/v1/latest/releases",
            get(handlers::search::latest_releases_handler),
        )
        .route("/v1/facets/{field}", get(handlers::facets::facet_handler))
        .route(
            "/v1/projects/{organization}/{repository}",
            get(handlers::projects::project_detail_handler),
        )
        .route(
            "/v1/projects/{organization}/{repository}/releases",
            get(handlers::projects::releases_handler),
        )
        .route(
            "/v1/artifacts/{group}/{artifact}/{version}",
            get(handlers::projects::artifact_handler),
        )
        .with_state(state)
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
