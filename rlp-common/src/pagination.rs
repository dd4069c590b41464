//! Pagination utilities
//!
//! Requests arrive either as `skip`/`limit` or as `page`/`per_page`; both are
//! normalized into a [`PageRequest`] (offset + limit) before reaching the store.

use serde::Serialize;

/// Default page size when the client does not supply one
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Largest page size a client may request
pub const MAX_PAGE_SIZE: i64 = 100;

/// Offset/limit window for a store query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Rows to skip (SQL OFFSET)
    pub offset: i64,
    /// Maximum rows to return (SQL LIMIT)
    pub limit: i64,
}

impl PageRequest {
    pub fn from_skip_limit(skip: i64, limit: i64) -> Self {
        Self {
            offset: skip,
            limit,
        }
    }

    /// Build from a 1-indexed page number
    pub fn from_page(page: i64, per_page: i64) -> Self {
        Self {
            offset: (page - 1) * per_page,
            limit: per_page,
        }
    }

    /// Build from a 1-indexed page number, or `None` if the offset does not
    /// fit in an `i64`
    pub fn checked_from_page(page: i64, per_page: i64) -> Option<Self> {
        let offset = page.checked_sub(1)?.checked_mul(per_page)?;
        Some(Self {
            offset,
            limit: per_page,
        })
    }

    /// 1-indexed page containing the first row of this window
    pub fn page(&self) -> i64 {
        self.offset / self.limit + 1
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::from_skip_limit(0, DEFAULT_PAGE_SIZE)
    }
}

/// Pagination metadata attached to list/search responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

/// Calculate pagination metadata from total results and the requested window
///
/// `total_pages` is `ceil(total / per_page)`, so an empty result set has zero
/// pages.
///
/// # Examples
/// ```
/// use rlp_common::pagination::{calculate_pagination, PageRequest};
///
/// // 25 total results at 10 per page = 3 pages
/// let meta = calculate_pagination(25, PageRequest::from_page(2, 10));
/// assert_eq!(meta.page, 2);
/// assert_eq!(meta.total_pages, 3);
/// ```
pub fn calculate_pagination(total: i64, request: PageRequest) -> PageMeta {
    let per_page = request.limit;
    let total_pages = (total + per_page - 1) / per_page;

    PageMeta {
        total,
        page: request.page(),
        per_page,
        total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_normal() {
        let meta = calculate_pagination(250, PageRequest::from_page(2, 100));
        assert_eq!(meta.page, 2);
        assert_eq!(meta.per_page, 100);
        assert_eq!(meta.total_pages, 3);
    }

    #[test]
    fn test_pagination_exact_page_boundary() {
        let meta = calculate_pagination(200, PageRequest::from_page(2, 100));
        assert_eq!(meta.total_pages, 2);
    }

    #[test]
    fn test_pagination_empty() {
        let meta = calculate_pagination(0, PageRequest::default());
        assert_eq!(meta.page, 1);
        assert_eq!(meta.total_pages, 0);
        assert_eq!(meta.per_page, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_skip_limit_maps_to_page() {
        let request = PageRequest::from_skip_limit(20, 10);
        assert_eq!(request.page(), 3);

        // Unaligned skip lands on the page holding its first row
        let request = PageRequest::from_skip_limit(15, 10);
        assert_eq!(request.page(), 2);
    }

    #[test]
    fn test_from_page_offset() {
        let request = PageRequest::from_page(3, 25);
        assert_eq!(request.offset, 50);
        assert_eq!(request.limit, 25);
    }

    #[test]
    fn test_checked_from_page_overflow() {
        assert_eq!(PageRequest::checked_from_page(3, 25), Some(PageRequest::from_page(3, 25)));
        assert_eq!(PageRequest::checked_from_page(i64::MAX, 100), None);
        assert!(PageRequest::checked_from_page(i64::MAX / 100 + 1, 100).is_some());
    }

    #[test]
    fn test_total_pages_is_ceiling() {
        for total in 0..=35 {
            for per_page in 1..=12 {
                let meta = calculate_pagination(total, PageRequest::from_page(1, per_page));
                let expected = (total as f64 / per_page as f64).ceil() as i64;
                assert_eq!(meta.total_pages, expected);
            }
        }
    }
}
