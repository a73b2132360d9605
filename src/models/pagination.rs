//! Pagination window and page result types.

use serde::{Deserialize, Serialize};

/// The limit/offset pair used to query one page from the record store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// The 1-based page number actually served.
    pub page: usize,
    /// Maximum records on the page.
    pub limit: usize,
    /// Records skipped before the page.
    pub offset: usize,
}

impl PageWindow {
    /// Computes the window for a requested page.
    ///
    /// Page numbers below 1 are served as page 1.
    ///
    /// ```
    /// use vacation_engine::models::PageWindow;
    ///
    /// let window = PageWindow::new(3, 10);
    /// assert_eq!(window.offset, 20);
    ///
    /// let window = PageWindow::new(0, 10);
    /// assert_eq!(window.page, 1);
    /// assert_eq!(window.offset, 0);
    /// ```
    pub fn new(requested_page: i64, page_size: usize) -> Self {
        let page = usize::try_from(requested_page.max(1)).unwrap_or(1);
        Self {
            page,
            limit: page_size,
            offset: (page - 1).saturating_mul(page_size),
        }
    }
}

/// Number of pages needed to show `total_count` items, `page_size` at a time.
pub fn total_pages(total_count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total_count.div_ceil(page_size)
}

/// One page of results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items on this page.
    pub items: Vec<T>,
    /// The 1-based page number.
    pub current_page: usize,
    /// Total number of pages.
    pub total_pages: usize,
    /// Total number of items across all pages.
    pub total_count: usize,
}
