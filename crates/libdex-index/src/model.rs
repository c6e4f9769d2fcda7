//! Transport-neutral query and response model for the document index.

use serde::{Deserialize, Serialize};

/// The two document collections the catalog queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    /// Package documents.
    Packages,
    /// Release documents.
    Releases,
}

impl Collection {
    /// Index-side name of the collection.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Packages => "packages",
            Self::Releases => "releases",
        }
    }
}

/// A structured query the index can evaluate.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryExpression {
    /// Matches every document.
    MatchAll,
    /// Exact term match on one field; dotted paths reach embedded documents.
    Term {
        /// Field path, e.g. `organization` or `reference.repository`.
        field: String,
        /// Literal value the field must carry.
        value: String,
    },
    /// Free-form relevance query in the index's own query grammar.
    Text {
        /// The query string, already escaped by the caller.
        query: String,
    },
    /// Boolean combination: every `must` clause is required, and when any
    /// `should` clause is present at least one has to match. Matching more
    /// clauses raises the document's score.
    Bool {
        /// Required clauses.
        must: Vec<QueryExpression>,
        /// Optional, score-raising clauses.
        should: Vec<QueryExpression>,
    },
}

impl QueryExpression {
    /// Exact term match of `value` on `field`.
    #[must_use]
    pub fn term(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Term {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Free-form relevance query.
    #[must_use]
    pub fn text(query: impl Into<String>) -> Self {
        Self::Text {
            query: query.into(),
        }
    }

    /// Disjunction: a document matching any clause is a hit.
    #[must_use]
    pub fn any_of(clauses: Vec<QueryExpression>) -> Self {
        Self::Bool {
            must: Vec::new(),
            should: clauses,
        }
    }

    /// Conjunction: every clause must match.
    #[must_use]
    pub fn all_of(clauses: Vec<QueryExpression>) -> Self {
        Self::Bool {
            must: clauses,
            should: Vec::new(),
        }
    }
}

/// Direction of a field sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Smallest value first.
    Asc,
    /// Largest value first.
    Desc,
}

/// How a multi-valued field collapses to a single sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortMode {
    /// Average of the values.
    Avg,
}

/// Sort on one document field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSort {
    /// Field path to sort on.
    pub field: String,
    /// Direction.
    pub order: SortOrder,
    /// Documents missing the field sort as if the value were `0`.
    pub missing_as_zero: bool,
    /// Multi-value collapse mode, when the field may carry several values.
    pub mode: Option<SortMode>,
}

impl FieldSort {
    /// Descending sort on `field`.
    #[must_use]
    pub fn descending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            order: SortOrder::Desc,
            missing_as_zero: false,
            mode: None,
        }
    }

    /// Treat documents missing the field as carrying `0`.
    #[must_use]
    pub fn with_missing_as_zero(mut self) -> Self {
        self.missing_as_zero = true;
        self
    }

    /// Collapse multi-valued fields with `mode`.
    #[must_use]
    pub fn with_mode(mut self, mode: SortMode) -> Self {
        self.mode = Some(mode);
        self
    }
}

/// Ordering directive for a search.
#[derive(Debug, Clone, PartialEq)]
pub enum SortDirective {
    /// By the index's computed relevance score, best first.
    Relevance,
    /// By one document field.
    Field(FieldSort),
}

/// One search round trip: query, ordering, and result window.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    /// Collection to search.
    pub collection: Collection,
    /// Query to evaluate.
    pub query: QueryExpression,
    /// Result ordering.
    pub sort: SortDirective,
    /// Number of leading hits to skip.
    pub offset: u64,
    /// Maximum number of hits to return.
    pub limit: u64,
}

/// One matching document.
#[derive(Debug, Clone)]
pub struct RawHit {
    /// Storage-internal document identifier.
    pub id: String,
    /// The document body as stored.
    pub source: serde_json::Value,
}

/// A window of matching documents plus the full hit count.
#[derive(Debug, Clone)]
pub struct RawPage {
    /// Total matches across the whole collection, not just this window.
    pub total: u64,
    /// The requested window of hits, in ranked order.
    pub hits: Vec<RawHit>,
}

/// One terms-aggregation bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bucket {
    /// The field value this bucket counts.
    pub term: String,
    /// Number of documents carrying the value.
    pub count: u64,
}
