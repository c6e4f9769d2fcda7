//! Pagination arithmetic decoupled from the index's native paging.

use serde::Serialize;

/// Number of hits per page, shared by every paginated query in the system.
pub const PAGE_SIZE: u64 = 10;

/// The offset/limit window for one page, plus the clamped page number that
/// must be echoed back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// The page actually served, never the raw caller input.
    pub page: u64,
    /// Number of hits to skip.
    pub offset: u64,
    /// Number of hits to request.
    pub limit: u64,
}

/// Resolve a caller-supplied page number into a safe window.
///
/// Pages are 1-indexed; any requested page `<= 0` clamps to page 1 instead
/// of erroring. A page beyond the available results is not an error either:
/// the index naturally returns zero hits for the out-of-range offset.
#[must_use]
pub fn resolve_page(requested: i64) -> PageWindow {
    let page = u64::try_from(requested.max(1)).unwrap_or(1);
    PageWindow {
        page,
        offset: PAGE_SIZE.saturating_mul(page - 1),
        limit: PAGE_SIZE,
    }
}

/// Total pages for a reported hit count: `ceil(total_hits / PAGE_SIZE)`.
#[must_use]
pub fn total_pages(total_hits: u64) -> u64 {
    total_hits.div_ceil(PAGE_SIZE)
}

/// One page of results with its metadata.
#[derive(Debug, Clone, Serialize)]
pub struct PageResult<T> {
    /// The clamped page actually served (1-indexed).
    pub current_page: u64,
    /// Total pages available for the query.
    pub total_pages: u64,
    /// Total hits across all pages.
    pub total_hits: u64,
    /// The hits on this page, in ranked order.
    pub items: Vec<T>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_positive_pages_clamp_to_one() {
        for requested in [i64::MIN, -7, -1, 0] {
            let window = resolve_page(requested);
            assert_eq!(window.page, 1);
            assert_eq!(window.offset, 0);
            assert_eq!(window.limit, PAGE_SIZE);
        }
    }

    #[test]
    fn positive_pages_pass_through_with_offset_arithmetic() {
        for requested in [1, 2, 7, 1000] {
            let window = resolve_page(requested);
            assert_eq!(window.page, u64::try_from(requested).unwrap());
            assert_eq!(window.offset, PAGE_SIZE * (window.page - 1));
            assert_eq!(window.limit, PAGE_SIZE);
        }
    }

    #[test]
    fn total_pages_is_the_ceiling_of_hits_over_page_size() {
        assert_eq!(total_pages(0), 0);
        assert_eq!(total_pages(1), 1);
        assert_eq!(total_pages(10), 1);
        assert_eq!(total_pages(11), 2);
        assert_eq!(total_pages(95), 10);
        assert_eq!(total_pages(100), 10);
    }
}
