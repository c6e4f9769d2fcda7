//! HTTP handlers for the catalog query API.

pub mod facets;
pub mod projects;
pub mod search;
