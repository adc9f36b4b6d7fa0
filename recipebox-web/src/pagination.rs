//! Pagination for the recipe overview and JSON listing

use serde::Serialize;

/// Where a page sits within a result set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    /// Current page number (1-indexed)
    pub page: i64,
    pub total_pages: i64,
    pub page_size: i64,
    /// Offset for SQL LIMIT/OFFSET query
    pub offset: i64,
}

impl Pagination {
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Clamp the requested page into `[1, max(total_pages, 1)]` and derive the offset
///
/// # Examples
/// ```
/// use recipebox_web::pagination::calculate_pagination;
///
/// let p = calculate_pagination(60, 3, 25);
/// assert_eq!(p.page, 3);
/// assert_eq!(p.total_pages, 3);
/// assert_eq!(p.offset, 50);
///
/// // out-of-range pages land on the last page
/// let p = calculate_pagination(60, 99, 25);
/// assert_eq!(p.page, 3);
/// ```
pub fn calculate_pagination(total_results: i64, requested_page: i64, page_size: i64) -> Pagination {
    let page_size = page_size.max(1);
    let total_pages = (total_results.max(0) + page_size - 1) / page_size;
    let page = requested_page.max(1).min(total_pages.max(1));
    let offset = (page - 1) * page_size;

    Pagination {
        page,
        total_pages,
        page_size,
        offset,
    }
}
