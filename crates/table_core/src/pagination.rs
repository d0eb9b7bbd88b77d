use std::ops::Range;

use serde::{Deserialize, Serialize};

pub const ROWS_PER_PAGE_OPTIONS: [usize; 3] = [5, 10, 25];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: usize,
    pub rows_per_page: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 0,
            rows_per_page: ROWS_PER_PAGE_OPTIONS[0],
        }
    }
}

impl Pagination {
    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    /// Changing the page size always jumps back to the first page.
    /// A size of zero is clamped to one.
    pub fn set_rows_per_page(&mut self, rows_per_page: usize) {
        self.rows_per_page = rows_per_page.max(1);
        self.page = 0;
    }

    /// Index range of the visible page within `total` filtered rows,
    /// clamped so a page past the end yields an empty range.
    pub fn page_bounds(&self, total: usize) -> Range<usize> {
        let start = self.page.saturating_mul(self.rows_per_page).min(total);
        let end = start.saturating_add(self.rows_per_page).min(total);
        start..end
    }

    pub fn slice<'a, T>(&self, rows: &'a [T]) -> &'a [T] {
        &rows[self.page_bounds(rows.len())]
    }

    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.rows_per_page)
    }
}
