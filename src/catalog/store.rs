//! In-memory catalog storage.

use super::{FacetIndex, Item};
use serde_json::Value;
use tracing::{info, warn};

/// The authoritative, unfiltered item set for one page context.
///
/// The store is write-once-per-load: `load` replaces the full set wholesale
/// and re-derives the facet index, and nothing mutates items afterward.
/// Insertion order is preserved, which is what makes the downstream filter
/// stable.
#[derive(Debug, Default)]
pub struct CatalogStore {
    items: Vec<Item>,
    facets: FacetIndex,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the full set from a raw source payload.
    ///
    /// Anything other than a JSON array is treated as an empty catalog, not
    /// an error: the caller sees an empty list and carries on. Array entries
    /// that do not decode as items are skipped with a warning.
    pub fn load(&mut self, payload: &Value) {
        let entries = match payload.as_array() {
            Some(entries) => entries,
            None => {
                warn!("Catalog payload is not an array, loading empty catalog.");
                self.load_items(Vec::new());
                return;
            }
        };

        let mut items = Vec::with_capacity(entries.len());
        for entry in entries {
            match serde_json::from_value::<Item>(entry.clone()) {
                Ok(item) => items.push(item),
                Err(err) => warn!("Skipping malformed catalog entry: {}", err),
            }
        }
        self.load_items(items);
    }

    /// Replace the full set with already-decoded items.
    pub fn load_items(&mut self, items: Vec<Item>) {
        self.facets = FacetIndex::derive(&items);
        self.items = items;
        info!("Catalog loaded with {} items.", self.items.len());
    }

    /// The full set, unfiltered, in insertion order.
    pub fn get_all(&self) -> &[Item] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Facet index derived at load time.
    pub fn facets(&self) -> &FacetIndex {
        &self.facets
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn non_array_payload_loads_empty() {
        let mut store = CatalogStore::new();
        store.load(&json!({"error": "upstream unavailable"}));
        assert!(store.is_empty());
        assert!(store.facets().is_empty());

        store.load(&json!("nope"));
        assert!(store.is_empty());
    }

    #[test]
    fn load_replaces_wholesale_and_rebuilds_facets() {
        let mut store = CatalogStore::new();
        store.load(&json!([
            {"id": "t1", "kind": "track", "title": "One",
             "attributes": {"genres": ["Jazz"]}},
            {"id": "t2", "kind": "track", "title": "Two",
             "attributes": {"genres": ["Folk"]}},
        ]));
        assert_eq!(store.len(), 2);
        assert_eq!(store.facets().values("genres"), ["Folk", "Jazz"]);

        store.load(&json!([
            {"id": "t3", "kind": "track", "title": "Three",
             "attributes": {"genres": ["Ambient"]}},
        ]));
        assert_eq!(store.len(), 1);
        assert_eq!(store.facets().values("genres"), ["Ambient"]);
        assert!(store.get("t1").is_none());
        assert!(store.get("t3").is_some());
    }

    #[test]
    fn malformed_entries_are_skipped() {
        let mut store = CatalogStore::new();
        store.load(&json!([
            {"id": "t1", "kind": "track", "title": "One"},
            {"kind": "track"},
            42,
        ]));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get_all()[0].id, "t1");
    }

    #[test]
    fn preserves_insertion_order() {
        let mut store = CatalogStore::new();
        store.load(&json!([
            {"id": "b", "kind": "track", "title": "B"},
            {"id": "a", "kind": "track", "title": "A"},
            {"id": "c", "kind": "track", "title": "C"},
        ]));
        let ids: Vec<&str> = store.get_all().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["b", "a", "c"]);
    }
}
