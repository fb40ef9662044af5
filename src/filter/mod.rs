//! Client-style catalog filtering.
//!
//! Pure, synchronous filtering over an in-memory item set. An item passes a
//! spec iff it passes the free-text filter AND every non-empty categorical
//! filter (OR within a category, AND across categories) AND every active
//! boolean flag. Filtering is stable: input order is preserved, nothing is
//! sorted or mutated, and there are no error conditions anywhere in the
//! path. Malformed or missing attributes simply fail the filter they are
//! missing for.

mod paginator;

pub use paginator::{has_more, visible_slice, PageState};

use crate::catalog::Item;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Combined search/category/flag filter state for one listing page.
///
/// An empty spec imposes no constraint at all: `apply` returns the input
/// unchanged.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSpec {
    /// Free-text query, matched case-insensitively as a substring of the
    /// searchable fields. Empty means no text constraint.
    pub query: String,
    /// Accepted values per category. An absent category or an empty set
    /// imposes no constraint on that category.
    pub categories: BTreeMap<String, BTreeSet<String>>,
    /// Boolean flag constraints. Only `true` entries constrain; a flag set
    /// to `false` is the same as an absent one.
    pub flags: BTreeMap<String, bool>,
}

impl FilterSpec {
    /// True if the spec imposes no constraint.
    pub fn is_empty(&self) -> bool {
        self.query.is_empty()
            && self.categories.values().all(BTreeSet::is_empty)
            && !self.flags.values().any(|active| *active)
    }

    /// Add or remove `value` from a category's accepted set. Toggling is
    /// its own inverse; an emptied set is dropped so it stops constraining.
    pub fn toggle_category_value(&mut self, category: &str, value: &str) {
        let set = self.categories.entry(category.to_string()).or_default();
        if !set.remove(value) {
            set.insert(value.to_string());
        }
        if set.is_empty() {
            self.categories.remove(category);
        }
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn set_flag(&mut self, name: &str, active: bool) {
        if active {
            self.flags.insert(name.to_string(), true);
        } else {
            self.flags.remove(name);
        }
    }
}

/// True if `item` passes every active constraint of `spec`.
pub fn matches(item: &Item, spec: &FilterSpec) -> bool {
    matches_query(item, &spec.query)
        && matches_categories(item, &spec.categories)
        && matches_flags(item, &spec.flags)
}

/// Compute the visible subset for a spec. Pure and deterministic, preserves
/// input order.
pub fn apply<'a>(items: &'a [Item], spec: &FilterSpec) -> Vec<&'a Item> {
    items.iter().filter(|item| matches(item, spec)).collect()
}

fn matches_query(item: &Item, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let query = query.to_lowercase();
    if item.title.to_lowercase().contains(&query) {
        return true;
    }
    if item.description.to_lowercase().contains(&query) {
        return true;
    }
    if let Some(curator) = &item.curator {
        if curator.to_lowercase().contains(&query) {
            return true;
        }
    }
    item.attributes
        .values()
        .flatten()
        .any(|value| value.to_lowercase().contains(&query))
}

fn matches_categories(item: &Item, categories: &BTreeMap<String, BTreeSet<String>>) -> bool {
    categories.iter().all(|(category, accepted)| {
        if accepted.is_empty() {
            return true;
        }
        item.attribute_values(category)
            .iter()
            .any(|value| accepted.contains(value))
    })
}

fn matches_flags(item: &Item, flags: &BTreeMap<String, bool>) -> bool {
    flags
        .iter()
        .filter(|(_, active)| **active)
        .all(|(name, _)| item.flag(name))
}
