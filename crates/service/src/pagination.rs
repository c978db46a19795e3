//! Pagination utilities for service layer
//!
//! Provides a simple `Pagination` struct that turns a 1-based page and a page
//! size into the slice of a result set to return.

use std::ops::Range;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;

/// Pagination parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based page index; 0 is treated as 1
    pub page: u32,
    /// max items per page
    pub limit: u32,
}

impl Pagination {
    pub fn new(page: u32, limit: u32) -> Self { Self { page, limit } }

    /// Offset of the first item on this page.
    pub fn offset(self) -> usize {
        let page = self.page.max(1) as usize;
        (page - 1).saturating_mul(self.limit as usize)
    }

    /// Index range into a result set of `total` items. Pages past the end
    /// yield an empty range instead of an error.
    pub fn window(self, total: usize) -> Range<usize> {
        let start = self.offset();
        if start >= total {
            return total..total;
        }
        let end = start.saturating_add(self.limit as usize).min(total);
        start..end
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { page: DEFAULT_PAGE, limit: DEFAULT_LIMIT } }
}
