//! Page-based pagination math shared by every paginated listing.
//!
//! All listing endpoints use 1-based `page` + `limit` parameters and return
//! the same metadata block, so the arithmetic lives here instead of being
//! repeated per repository.

use serde::Serialize;

/// Default number of rows per page.
pub const DEFAULT_PAGE_LIMIT: i64 = 20;

/// Maximum number of rows per page.
pub const MAX_PAGE_LIMIT: i64 = 100;

/// Pagination metadata returned alongside every paginated listing.
///
/// Invariants: `pages == ceil(total / limit)`, `has_next == page < pages`,
/// `has_prev == page > 1`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub pages: i64,
    #[serde(rename = "hasNext")]
    pub has_next: bool,
    #[serde(rename = "hasPrev")]
    pub has_prev: bool,
}

impl Pagination {
    /// Build pagination metadata for a page of a `total`-row result set.
    pub fn new(page: i64, limit: i64, total: i64) -> Self {
        let pages = if limit > 0 {
            (total + limit - 1) / limit
        } else {
            0
        };
        Self {
            page,
            limit,
            total,
            pages,
            has_next: page < pages,
            has_prev: page > 1,
        }
    }
}

/// Clamp a user-provided page number to 1-based.
pub fn clamp_page(page: Option<i64>) -> i64 {
    page.unwrap_or(1).max(1)
}

/// Clamp a user-provided limit to valid bounds.
pub fn clamp_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_PAGE_LIMIT).max(1).min(MAX_PAGE_LIMIT)
}

/// Convert a 1-based page + limit into a SQL OFFSET.
pub fn offset(page: i64, limit: i64) -> i64 {
    (page - 1) * limit
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_is_ceiling_of_total_over_limit() {
        assert_eq!(Pagination::new(1, 20, 0).pages, 0);
        assert_eq!(Pagination::new(1, 20, 1).pages, 1);
        assert_eq!(Pagination::new(1, 20, 20).pages, 1);
        assert_eq!(Pagination::new(1, 20, 21).pages, 2);
        assert_eq!(Pagination::new(1, 20, 100).pages, 5);
    }

    #[test]
    fn has_next_matches_page_below_pages() {
        let p = Pagination::new(1, 10, 25);
        assert!(p.has_next);
        let p = Pagination::new(3, 10, 25);
        assert!(!p.has_next);
    }

    #[test]
    fn has_prev_only_after_first_page() {
        assert!(!Pagination::new(1, 10, 25).has_prev);
        assert!(Pagination::new(2, 10, 25).has_prev);
    }

    #[test]
    fn metadata_internally_consistent() {
        // hasNext == (page < pages), hasPrev == (page > 1) across a sweep.
        for total in [0, 1, 19, 20, 21, 55, 200] {
            for page in 1..=5 {
                let p = Pagination::new(page, 20, total);
                assert_eq!(p.has_next, page < p.pages);
                assert_eq!(p.has_prev, page > 1);
            }
        }
    }

    #[test]
    fn clamp_page_floors_at_one() {
        assert_eq!(clamp_page(None), 1);
        assert_eq!(clamp_page(Some(0)), 1);
        assert_eq!(clamp_page(Some(-3)), 1);
        assert_eq!(clamp_page(Some(7)), 7);
    }

    #[test]
    fn clamp_limit_bounds() {
        assert_eq!(clamp_limit(None), DEFAULT_PAGE_LIMIT);
        assert_eq!(clamp_limit(Some(0)), 1);
        assert_eq!(clamp_limit(Some(500)), MAX_PAGE_LIMIT);
        assert_eq!(clamp_limit(Some(50)), 50);
    }

    #[test]
    fn offset_is_zero_based() {
        assert_eq!(offset(1, 20), 0);
        assert_eq!(offset(3, 20), 40);
    }
}
