//! Search execution against the document index.

use std::sync::Arc;

use libdex_core::package::Package;
use libdex_core::release::Release;
use libdex_core::selection::ReleaseSelector;
use libdex_index::index::DocumentIndex;
use libdex_index::model::{
    Collection, FieldSort, QueryExpression, RawHit, SearchRequest, SortDirective,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::QueryError;
use crate::facets::FacetExclusions;
use crate::page::{resolve_page, total_pages, PageResult};
use crate::query::build_text_query;
use crate::sort::resolve_sort;

/// Number of documents a recency feed returns.
pub const LATEST_FEED_CAP: u64 = 12;

/// The catalog's query engine: stateless, read-only operations against an
/// injected document index.
///
/// Every operation issues one index round trip (the project-detail
/// composite issues two independent ones) and shapes the response; there is
/// no shared mutable state, so operations are safe to run concurrently and
/// to retry from the outside.
pub struct SearchEngine {
    pub(crate) index: Arc<dyn DocumentIndex>,
    pub(crate) selector: Arc<dyn ReleaseSelector>,
    pub(crate) exclusions: FacetExclusions,
}

impl SearchEngine {
    /// Create an engine over `index`, delegating release choice to
    /// `selector` and dependency-facet filtering to `exclusions`.
    #[must_use]
    pub fn new(
        index: Arc<dyn DocumentIndex>,
        selector: Arc<dyn ReleaseSelector>,
        exclusions: FacetExclusions,
    ) -> Self {
        Self {
            index,
            selector,
            exclusions,
        }
    }

    /// Free-text package search: one paginated, sorted index round trip.
    ///
    /// The caller-supplied page is clamped, never rejected; the returned
    /// metadata always echoes the page actually served. Every package is
    /// sanitized before it leaves the engine.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError`] when the index round trip fails or a hit does
    /// not decode into a [`Package`].
    pub async fn find(
        &self,
        raw_query: &str,
        page: i64,
        sort_key: Option<&str>,
    ) -> Result<PageResult<Package>, QueryError> {
        let window = resolve_page(page);
        let request = SearchRequest {
            collection: Collection::Packages,
            query: build_text_query(raw_query),
            sort: resolve_sort(sort_key),
            offset: window.offset,
            limit: window.limit,
        };
        let result = self.index.search(&request).await?;
        let items = result
            .hits
            .into_iter()
            .map(|hit| decode::<Package>(hit).map(Package::sanitized))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(PageResult {
            current_page: window.page,
            total_pages: total_pages(result.total),
            total_hits: result.total,
            items,
        })
    }

    /// The most recently cataloged packages, sanitized, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError`] when the index round trip fails or a hit does
    /// not decode.
    pub async fn latest_packages(&self) -> Result<Vec<Package>, QueryError> {
        let packages = self
            .latest::<Package>(Collection::Packages, "created_at")
            .await?;
        Ok(packages.into_iter().map(Package::sanitized).collect())
    }

    /// The most recently published releases, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError`] when the index round trip fails or a hit does
    /// not decode.
    pub async fn latest_releases(&self) -> Result<Vec<Release>, QueryError> {
        self.latest::<Release>(Collection::Releases, "released_at")
            .await
    }

    /// Unconditioned recency feed over one collection, capped at
    /// [`LATEST_FEED_CAP`].
    async fn latest<T: DeserializeOwned>(
        &self,
        collection: Collection,
        order_field: &str,
    ) -> Result<Vec<T>, QueryError> {
        let request = SearchRequest {
            collection,
            query: QueryExpression::MatchAll,
            sort: SortDirective::Field(FieldSort::descending(order_field)),
            offset: 0,
            limit: LATEST_FEED_CAP,
        };
        let result = self.index.search(&request).await?;
        result.hits.into_iter().map(decode).collect()
    }
}

/// Decode one hit into its entity shape, surfacing the storage identifier
/// to entities that model it.
pub(crate) fn decode<T: DeserializeOwned>(hit: RawHit) -> Result<T, QueryError> {
    let RawHit { id, mut source } = hit;
    if let Value::Object(map) = &mut source {
        map.entry("id")
            .or_insert_with(|| Value::String(id.clone()));
    }
    serde_json::from_value(source).map_err(|e| QueryError::Decode { id, source: e })
}
