//! Listing page orchestration.
//!
//! `ListView` wires CatalogStore -> FilterEngine -> Paginator for one
//! listing page and owns the mutable filter/search/page state. The load
//! lifecycle is a three-state machine: the view starts in `Loading`, moves
//! to a `Loaded` state when the source responds (or fails), and stays in
//! `Loaded` for the rest of its life while filter changes recompute the
//! visible set synchronously.

use crate::catalog::{CatalogStore, FacetIndex, Item};
use crate::filter::{self, FilterSpec, PageState};
use serde_json::Value;

/// Load lifecycle of a listing page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadState {
    /// Waiting for the initial catalog fetch.
    Loading,
    /// The source returned zero items, or the fetch failed.
    LoadedEmpty,
    /// Items arrived.
    LoadedNonEmpty,
}

/// One listing page: full item set, filter spec, and page window.
///
/// All operations are synchronous and total. Any filter or query mutation
/// resets the page window to 1.
#[derive(Debug)]
pub struct ListView {
    store: CatalogStore,
    spec: FilterSpec,
    page: PageState,
    state: LoadState,
}

impl ListView {
    /// A fresh view in `Loading`, with the page size fixed for its lifetime
    /// (8 for library-style pages, 12 for explore-style pages).
    pub fn new(page_size: usize) -> Self {
        ListView {
            store: CatalogStore::new(),
            spec: FilterSpec::default(),
            page: PageState::new(page_size),
            state: LoadState::Loading,
        }
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    /// The source responded with a raw payload. A non-array payload loads
    /// an empty catalog, which lands the view in `LoadedEmpty`.
    pub fn items_loaded(&mut self, payload: &Value) {
        self.store.load(payload);
        self.state = if self.store.is_empty() {
            LoadState::LoadedEmpty
        } else {
            LoadState::LoadedNonEmpty
        };
    }

    /// The fetch failed. Absence of data is an empty catalog, not an error
    /// state needing recovery.
    pub fn load_failed(&mut self) {
        self.store.load_items(Vec::new());
        self.state = LoadState::LoadedEmpty;
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.spec.set_query(query);
        self.page.reset();
    }

    pub fn toggle_category_value(&mut self, category: &str, value: &str) {
        self.spec.toggle_category_value(category, value);
        self.page.reset();
    }

    pub fn set_flag(&mut self, name: &str, active: bool) {
        self.spec.set_flag(name, active);
        self.page.reset();
    }

    /// Back to an empty spec and page 1.
    pub fn clear_filters(&mut self) {
        self.spec = FilterSpec::default();
        self.page.reset();
    }

    /// Reveal one more page of the current filtered set.
    pub fn load_more(&mut self) {
        self.page.advance();
    }

    /// The currently visible window: filter, then slice the growing prefix.
    /// Recomputed on every call; nothing is cached between state changes.
    pub fn visible(&self) -> Vec<&Item> {
        let mut filtered = filter::apply(self.store.get_all(), &self.spec);
        let end = self.page.visible(&filtered).len();
        filtered.truncate(end);
        filtered
    }

    pub fn has_more(&self) -> bool {
        let filtered = filter::apply(self.store.get_all(), &self.spec);
        self.page.has_more(&filtered)
    }

    /// Count of items passing the current spec, ignoring the page window.
    pub fn total_matching(&self) -> usize {
        filter::apply(self.store.get_all(), &self.spec).len()
    }

    pub fn spec(&self) -> &FilterSpec {
        &self.spec
    }

    pub fn page(&self) -> usize {
        self.page.page()
    }

    /// Filter values available on this page, derived when the catalog loaded.
    pub fn facets(&self) -> &FacetIndex {
        self.store.facets()
    }
}
