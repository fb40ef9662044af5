//! Catalog item models.
//!
//! Every browsable entity in Sonara (a track, a curated collection, a
//! geographic region, a blog post) is represented by the same flat `Item`
//! record: denormalized string attributes grouped by category, plus
//! independent boolean flags. Attribute values are plain strings, not
//! foreign keys.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The kind of catalog entity an item represents.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Track,
    Collection,
    Region,
    Post,
}

impl ItemKind {
    pub const ALL: [ItemKind; 4] = [
        ItemKind::Track,
        ItemKind::Collection,
        ItemKind::Region,
        ItemKind::Post,
    ];

    /// Parse the plural route segment used by the HTTP API and the
    /// catalog directory file names ("tracks", "collections", ...).
    pub fn from_route(segment: &str) -> Option<Self> {
        match segment {
            "tracks" => Some(ItemKind::Track),
            "collections" => Some(ItemKind::Collection),
            "regions" => Some(ItemKind::Region),
            "posts" => Some(ItemKind::Post),
            _ => None,
        }
    }

    /// The plural route segment for this kind.
    pub fn route(&self) -> &'static str {
        match self {
            ItemKind::Track => "tracks",
            ItemKind::Collection => "collections",
            ItemKind::Region => "regions",
            ItemKind::Post => "posts",
        }
    }
}

/// A single browsable catalog record.
///
/// Items are immutable once loaded. Categorical equality is case sensitive;
/// only the free-text search path lowercases values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub kind: ItemKind,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Author or curator display name, searchable like the title.
    #[serde(default)]
    pub curator: Option<String>,
    /// Categorical attribute lists keyed by category name
    /// (genres, instruments, languages, moods, tags, theme, era, region...).
    #[serde(default)]
    pub attributes: BTreeMap<String, Vec<String>>,
    /// Independent boolean flags (featured, curator_pick...).
    #[serde(default)]
    pub flags: BTreeMap<String, bool>,
    #[serde(default)]
    pub published: Option<NaiveDate>,
}

impl Item {
    /// True if the flag is present and set. Missing flags read as false.
    pub fn flag(&self, name: &str) -> bool {
        self.flags.get(name).copied().unwrap_or(false)
    }

    /// The attribute values for a category, empty if the category is absent.
    pub fn attribute_values(&self, category: &str) -> &[String] {
        self.attributes
            .get(category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
