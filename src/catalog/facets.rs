//! Facet derivation for filter UIs.
//!
//! The set of "all available filter values" is derived once when a catalog
//! is loaded, not rescanned on every read. It is invalidated only by a
//! catalog reload.

use super::Item;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Sorted, deduplicated attribute values per category, as present in one
/// loaded catalog.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FacetIndex {
    values: BTreeMap<String, Vec<String>>,
}

impl FacetIndex {
    /// Scan the full item set and collect every categorical value.
    pub fn derive(items: &[Item]) -> Self {
        let mut sets: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for item in items {
            for (category, values) in &item.attributes {
                let set = sets.entry(category.clone()).or_default();
                for value in values {
                    set.insert(value.clone());
                }
            }
        }
        let values = sets
            .into_iter()
            .map(|(category, set)| (category, set.into_iter().collect()))
            .collect();
        FacetIndex { values }
    }

    /// All values seen for a category, sorted. Empty for unknown categories.
    pub fn values(&self, category: &str) -> &[String] {
        self.values
            .get(category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The categories that have at least one value.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
