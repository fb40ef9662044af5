//! Growing-prefix pagination.
//!
//! The listing pages reveal results incrementally: the visible window is
//! always `filtered[0..page * page_size]`, so advancing the page strictly
//! grows the visible set and never produces a disjoint page. The only state
//! transition is `advance`; there is no "go back" and no jump.

/// The visible prefix of a filtered set for a 1-based page number.
///
/// Total over its domain: a page past the end simply yields the whole set.
pub fn visible_slice<T>(filtered: &[T], page: usize, page_size: usize) -> &[T] {
    let end = page.saturating_mul(page_size).min(filtered.len());
    &filtered[..end]
}

/// True iff there are items beyond the current visible window.
pub fn has_more<T>(filtered: &[T], page: usize, page_size: usize) -> bool {
    page.saturating_mul(page_size) < filtered.len()
}

/// Current page number and fixed page size for one listing page.
///
/// Owned by the view controller; the controller is responsible for calling
/// `reset` whenever the filter or search query changes, otherwise the
/// "load more" state would not match the new result set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageState {
    page: usize,
    page_size: usize,
}

impl PageState {
    pub fn new(page_size: usize) -> Self {
        PageState { page: 1, page_size }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// The only state transition: grow the window by one page.
    pub fn advance(&mut self) {
        self.page = self.page.saturating_add(1);
    }

    /// Back to page 1.
    pub fn reset(&mut self) {
        self.page = 1;
    }

    pub fn visible<'a, T>(&self, filtered: &'a [T]) -> &'a [T] {
        visible_slice(filtered, self.page, self.page_size)
    }

    pub fn has_more<T>(&self, filtered: &[T]) -> bool {
        has_more(filtered, self.page, self.page_size)
    }
}
