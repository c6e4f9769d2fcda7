//! Query engine for the libdex catalog.
//!
//! Stateless, read-only operations against an injected document index:
//! free-text search with pagination and pluggable sorting, package↔release
//! correlation, recency feeds, and faceted aggregation.
#![deny(warnings, clippy::all, clippy::pedantic)]
#![warn(missing_docs)]

pub mod engine;
pub mod error;
pub mod facets;
pub mod page;
pub mod project;
pub mod query;
pub mod sort;
