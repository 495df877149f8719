//! The visible window of rows.

use std::ops::Range;

/// Which rows of the displayed table are currently on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    page_size: usize,
    page: usize,
    rows: Range<usize>,
    generation: u64,
}

impl PageView {
    /// Create a page view. A page size of zero is treated as one.
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            page: 0,
            rows: 0..0,
            generation: 0,
        }
    }

    /// Rows per page.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Current 0-based page index.
    pub fn page(&self) -> usize {
        self.page
    }

    /// Row positions visible on the current page.
    pub fn rows(&self) -> Range<usize> {
        self.rows.clone()
    }

    /// Number of rebuilds so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of pages for a table with `row_count` rows. At least one.
    pub fn page_count(&self, row_count: usize) -> usize {
        row_count.div_ceil(self.page_size).max(1)
    }

    /// The page containing a row position.
    pub fn page_of(&self, position: usize) -> usize {
        position / self.page_size
    }

    /// Request a page. Clamped on the next rebuild.
    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    /// Recompute the visible window for a table with `row_count` rows.
    pub fn rebuild(&mut self, row_count: usize) {
        let last_page = self.page_count(row_count) - 1;
        self.page = self.page.min(last_page);
        let start = self.page * self.page_size;
        let end = (start + self.page_size).min(row_count);
        self.rows = start.min(end)..end;
        self.generation += 1;
    }
}
