//! Catalog loading from a directory of JSON payloads.
//!
//! The catalog directory holds one JSON array per item kind
//! (`tracks.json`, `collections.json`, `regions.json`, `posts.json`).
//! A missing file means an empty set for that kind. A file that parses
//! but is not an array is loaded as empty by the store, never surfaced
//! as an error.

use super::{Catalog, ItemKind};
use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

/// Build a full catalog from the payload files in `dir`.
///
/// Fails only on genuine IO/JSON-syntax problems with a present file;
/// absent files and non-array payloads degrade to empty sets.
pub fn load_catalog_dir<P: AsRef<Path>>(dir: P) -> Result<Catalog> {
    let dir = dir.as_ref();
    let mut catalog = Catalog::new();

    for kind in ItemKind::ALL {
        let path = dir.join(format!("{}.json", kind.route()));
        if !path.exists() {
            info!("No {} payload at {:?}, leaving set empty.", kind.route(), path);
            continue;
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read catalog payload {:?}", path))?;
        let payload: serde_json::Value = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse catalog payload {:?}", path))?;
        catalog.store_mut(kind).load(&payload);
    }

    info!(
        "Catalog directory {:?} loaded: {} tracks, {} collections, {} regions, {} posts.",
        dir,
        catalog.store(ItemKind::Track).len(),
        catalog.store(ItemKind::Collection).len(),
        catalog.store(ItemKind::Region).len(),
        catalog.store(ItemKind::Post).len(),
    );
    Ok(catalog)
}
