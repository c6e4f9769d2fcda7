use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use libdex_api::router::{build_router, AppState};
use libdex_core::selection::DefaultReleaseSelector;
use libdex_index::memory::MemoryIndex;
use libdex_index::model::Collection;
use libdex_search::engine::SearchEngine;
use libdex_search::facets::FacetExclusions;
use serde_json::{json, Value};

fn server_over(index: MemoryIndex) -> TestServer {
    let engine = Arc::new(SearchEngine::new(
        Arc::new(index),
        Arc::new(DefaultReleaseSelector),
        FacetExclusions::default(),
    ));
    TestServer::new(build_router(AppState { engine })).unwrap()
}

fn seeded() -> MemoryIndex {
    let mut index = MemoryIndex::new();
    index.insert(
        Collection::Packages,
        "internal-doc-id",
        json!({
            "organization": "acme",
            "repository": "http-kit",
            "keywords": ["http", "client"],
            "description": "an http client library",
            "dependencies": ["scalatest", "http4s-core"],
            "created_at": "2024-01-01T00:00:00Z",
        }),
    );
    index.insert(
        Collection::Releases,
        "r1",
        json!({
            "coordinate": { "group": "org.acme", "artifact": "core", "version": "1.0.0" },
            "reference": { "organization": "acme", "repository": "http-kit" },
            "released_at": "2024-03-15T12:00:00Z",
        }),
    );
    index
}

#[tokio::test]
async fn health_endpoint_answers_ok() {
    let server = server_over(MemoryIndex::new());
    let response = server.get("/healthz").await;
    assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn search_clamps_the_page_and_never_leaks_document_ids() {
    let server = server_over(seeded());
    let response = server
        .get("/v1/search")
        .add_query_params([("q", "http"), ("page", "0")])
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["current_page"], 1);
    assert_eq!(body["total_hits"], 1);
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert!(items[0].get("id").is_none());
}

#[tokio::test]
async fn project_detail_returns_the_composite_or_404() {
    let server = server_over(seeded());

    let found = server.get("/v1/projects/acme/http-kit").await;
    assert_eq!(found.status_code(), StatusCode::OK);
    let body: Value = found.json();
    assert_eq!(body["release_count"], 1);
    assert_eq!(
        body["selected"]["release"]["coordinate"]["version"],
        "1.0.0"
    );

    let missing = server.get("/v1/projects/acme/unknown").await;
    assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn artifact_lookup_is_404_when_absent() {
    let server = server_over(seeded());

    let found = server.get("/v1/artifacts/org.acme/core/1.0.0").await;
    assert_eq!(found.status_code(), StatusCode::OK);

    let missing = server.get("/v1/artifacts/org.acme/core/9.9.9").await;
    assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn facets_reject_unknown_fields_and_filter_dependencies() {
    let server = server_over(seeded());

    let bogus = server.get("/v1/facets/stars").await;
    assert_eq!(bogus.status_code(), StatusCode::NOT_FOUND);

    let deps = server.get("/v1/facets/dependencies").await;
    assert_eq!(deps.status_code(), StatusCode::OK);
    let body: Value = deps.json();
    let terms: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["term"].as_str().unwrap())
        .collect();
    assert_eq!(terms, vec!["http4s-core"]);
}

#[tokio::test]
async fn latest_feeds_answer_with_arrays() {
    let server = server_over(seeded());

    let packages = server.get("/v1/latest/packages").await;
    assert_eq!(packages.status_code(), StatusCode::OK);
    let body: Value = packages.json();
    assert_eq!(body.as_array().unwrap().len(), 1);

    let releases = server.get("/v1/latest/releases").await;
    assert_eq!(releases.status_code(), StatusCode::OK);
}
