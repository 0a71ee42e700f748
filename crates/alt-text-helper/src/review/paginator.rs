//! Fixed-size, 1-indexed pagination over the enriched image collection.

/// Images shown per review page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 6;

/// Page count for a collection: `ceil(count / page_size)`, 0 pages for an
/// empty collection (the UI suppresses pagination controls entirely).
pub fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size)
}

/// Current-page cursor. The collection itself is not owned; callers pass
/// the current count so the cursor can clamp itself when the collection
/// shrinks (e.g. after a category switch).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page_size: usize,
    current: usize,
}

impl Paginator {
    /// # Panics
    /// Panics if `page_size` is 0.
    pub fn new(page_size: usize) -> Self {
        assert!(page_size > 0, "page_size must be > 0");
        Self {
            page_size,
            current: 1,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Current page number, always in `[1, max(1, total_pages)]`.
    pub fn current_page(&self) -> usize {
        self.current
    }

    pub fn total_pages(&self, count: usize) -> usize {
        total_pages(count, self.page_size)
    }

    /// Pagination controls are rendered only when there is more than one
    /// page.
    pub fn controls_visible(&self, count: usize) -> bool {
        self.total_pages(count) > 1
    }

    pub fn is_last_page(&self, count: usize) -> bool {
        self.current >= self.total_pages(count).max(1)
    }

    pub fn reset(&mut self) {
        self.current = 1;
    }

    /// Clamps the cursor back into range after the collection changed.
    pub fn clamp(&mut self, count: usize) {
        let max = self.total_pages(count).max(1);
        self.current = self.current.clamp(1, max);
    }

    /// Moves to `page`, clamped into `[1, max(1, total_pages)]`. Returns
    /// the page actually selected.
    pub fn set_page(&mut self, page: usize, count: usize) -> usize {
        let max = self.total_pages(count).max(1);
        self.current = page.clamp(1, max);
        self.current
    }

    pub fn next(&mut self, count: usize) -> usize {
        self.set_page(self.current + 1, count)
    }

    pub fn prev(&mut self, count: usize) -> usize {
        self.set_page(self.current.saturating_sub(1), count)
    }

    /// The current page's window over `items`.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = (self.current - 1) * self.page_size;
        if start >= items.len() {
            return &[];
        }
        let end = (start + self.page_size).min(items.len());
        &items[start..end]
    }
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}
