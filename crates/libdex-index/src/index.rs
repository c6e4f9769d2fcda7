//! The async contract every index backend implements.

use std::future::Future;
use std::pin::Pin;

use crate::error::IndexError;
use crate::model::{Bucket, Collection, RawPage, SearchRequest};

/// Boxed future returned by dyn-compatible async trait methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A read-only document index: structured queries in, documents and counts
/// out.
///
/// Every method is a single round trip with no retry and no state; retry
/// policy belongs to callers or the transport. Implementations must be safe
/// to share across tasks.
pub trait DocumentIndex: Send + Sync {
    /// Execute one search and return the requested window of hits.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError`] when the index cannot be reached or answers
    /// outside the contract.
    fn search<'a>(
        &'a self,
        request: &'a SearchRequest,
    ) -> BoxFuture<'a, Result<RawPage, IndexError>>;

    /// Bucket every document of `collection` by the values of `field`,
    /// returning up to `size` buckets with their document counts.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError`] when the index cannot be reached or answers
    /// outside the contract.
    fn aggregate_terms<'a>(
        &'a self,
        collection: Collection,
        field: &'a str,
        size: u64,
    ) -> BoxFuture<'a, Result<Vec<Bucket>, IndexError>>;
}
