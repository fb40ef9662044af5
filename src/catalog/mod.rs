//! Catalog data model and storage.

mod facets;
mod load;
mod models;
mod store;

pub use facets::FacetIndex;
pub use load::load_catalog_dir;
pub use models::{Item, ItemKind};
pub use store::CatalogStore;

use std::collections::HashMap;

/// All item sets served by one Sonara instance, one store per kind.
///
/// Populated once at startup and read-only afterward, so the server shares
/// it behind a plain `Arc`.
#[derive(Debug, Default)]
pub struct Catalog {
    stores: HashMap<ItemKind, CatalogStore>,
}

impl Catalog {
    pub fn new() -> Self {
        let stores = ItemKind::ALL
            .into_iter()
            .map(|kind| (kind, CatalogStore::new()))
            .collect();
        Catalog { stores }
    }

    pub fn store(&self, kind: ItemKind) -> &CatalogStore {
        &self.stores[&kind]
    }

    pub fn store_mut(&mut self, kind: ItemKind) -> &mut CatalogStore {
        self.stores
            .get_mut(&kind)
            .expect("all kinds are created in Catalog::new")
    }

    pub fn total_items(&self) -> usize {
        self.stores.values().map(CatalogStore::len).sum()
    }
}
