//! Faceted aggregation over the whole catalog.

use std::collections::HashSet;

use libdex_index::model::{Bucket, Collection};

use crate::engine::SearchEngine;
use crate::error::QueryError;

/// Maximum number of buckets a facet reports.
pub const FACET_BUCKET_CAP: u64 = 50;

/// The one facet field filtered against the exclusion set.
const DEPENDENCIES_FIELD: &str = "dependencies";

/// Artifact names of ubiquitous testing, mocking, and logging libraries.
///
/// They appear in nearly every package's dependency list, so counting them
/// would drown the usage signal the dependency facet is meant to carry.
/// Static policy, not derived from the data.
// TODO: surface testing-framework popularity as its own comparison view
// instead of suppressing it here.
const DEFAULT_EXCLUDED_DEPENDENCIES: [&str; 20] = [
    "commons-logging",
    "easymock",
    "hamcrest-core",
    "jcl-over-slf4j",
    "junit",
    "junit-interface",
    "log4j",
    "logback-classic",
    "logback-core",
    "mockito-all",
    "mockito-core",
    "munit",
    "scala-logging",
    "scalacheck",
    "scalamock",
    "scalatest",
    "slf4j-api",
    "slf4j-simple",
    "specs2",
    "testng",
];

/// Immutable set of dependency identifiers excluded from the dependency
/// facet.
#[derive(Debug, Clone)]
pub struct FacetExclusions {
    entries: HashSet<String>,
}

impl FacetExclusions {
    /// Build an exclusion set from arbitrary identifiers.
    #[must_use]
    pub fn new(entries: impl IntoIterator<Item = String>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Whether `term` is excluded.
    #[must_use]
    pub fn contains(&self, term: &str) -> bool {
        self.entries.contains(term)
    }
}

impl Default for FacetExclusions {
    fn default() -> Self {
        Self::new(
            DEFAULT_EXCLUDED_DEPENDENCIES
                .iter()
                .map(|entry| (*entry).to_owned()),
        )
    }
}

impl SearchEngine {
    /// Term-frequency facet of `field` across every package.
    ///
    /// The `dependencies` facet is filtered against the injected exclusion
    /// set before sorting. Buckets come back sorted by count descending,
    /// equal counts ordered lexicographically by term so the output is
    /// deterministic regardless of index bucket order.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError`] when the index round trip fails.
    pub async fn facet(&self, field: &str) -> Result<Vec<Bucket>, QueryError> {
        let mut buckets = self
            .index
            .aggregate_terms(Collection::Packages, field, FACET_BUCKET_CAP)
            .await?;
        if field == DEPENDENCIES_FIELD {
            buckets.retain(|bucket| !self.exclusions.contains(&bucket.term));
        }
        buckets.sort_by(|l, r| r.count.cmp(&l.count).then_with(|| l.term.cmp(&r.term)));
        Ok(buckets)
    }
}
