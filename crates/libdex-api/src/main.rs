//! libdex query API server entry point.

use std::sync::Arc;

use libdex_api::{
    config::ApiConfig,
    router::{build_router, AppState},
};
use libdex_core::selection::DefaultReleaseSelector;
use libdex_index::http::HttpDocumentIndex;
use libdex_search::engine::SearchEngine;
use libdex_search::facets::FacetExclusions;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let config = ApiConfig::from_env()?;
    let index = Arc::new(HttpDocumentIndex::new(config.index_url.clone()));
    let engine = Arc::new(SearchEngine::new(
        index,
        Arc::new(DefaultReleaseSelector),
        FacetExclusions::default(),
    ));
    let app = build_router(AppState { engine });
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    log::info!("listening on {}", config.bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
