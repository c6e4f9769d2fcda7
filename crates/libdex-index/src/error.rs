//! Failure taxonomy for document-index round trips.

use thiserror::Error;

/// Errors surfaced by a [`DocumentIndex`](crate::index::DocumentIndex)
/// round trip.
///
/// Absence of a document is never an error; lookups that find nothing
/// return empty results.
#[derive(Debug, Error)]
pub enum IndexError {
    /// The index could not be reached or refused the request.
    #[error("document index unavailable: {0}")]
    Unavailable(String),
    /// The index answered with a payload outside the contract.
    #[error("malformed index response: {0}")]
    Malformed(String),
}
