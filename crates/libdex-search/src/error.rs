//! Failure taxonomy for query-engine operations.

use thiserror::Error;

/// Errors surfaced by the query engine.
///
/// Absence (a lookup finding nothing) is modelled as `None` or an empty
/// sequence, never as an error; invalid pagination input is clamped, never
/// rejected.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The document index failed the round trip.
    #[error(transparent)]
    Index(#[from] libdex_index::error::IndexError),
    /// A document could not be decoded into its entity shape. Fails only
    /// the operation that read it; concurrent operations are unaffected.
    #[error("document {id} does not match the expected entity shape: {source}")]
    Decode {
        /// Identifier of the offending document.
        id: String,
        /// The underlying decode failure.
        source: serde_json::Error,
    },
}
