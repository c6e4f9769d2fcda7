//! Caller-facing sort keys mapped to index ordering directives.

use libdex_index::model::{FieldSort, SortDirective, SortMode};

/// Resolve a caller-supplied sort key to an ordering directive.
///
/// Total mapping, never fails: `relevant`, an absent key, and any
/// unrecognised key all fall back to relevance.
#[must_use]
pub fn resolve_sort(key: Option<&str>) -> SortDirective {
    match key {
        Some("stars") => popularity_sort("stars"),
        Some("forks") => popularity_sort("forks"),
        Some("created") => SortDirective::Field(FieldSort::descending("created_at")),
        Some("updated") => SortDirective::Field(FieldSort::descending("updated_at")),
        _ => SortDirective::Relevance,
    }
}

/// Popularity metrics may carry several platform readings per document:
/// missing counts sort as zero and multiple readings collapse to their
/// average.
fn popularity_sort(field: &str) -> SortDirective {
    SortDirective::Field(
        FieldSort::descending(field)
            .with_missing_as_zero()
            .with_mode(SortMode::Avg),
    )
}
