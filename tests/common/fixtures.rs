//! Test fixtures: catalog payload files and a user database
//!
//! The catalog shape is relied upon by assertions across the e2e tests;
//! update constants.rs when changing it.

use super::constants::*;
use anyhow::Result;
use serde_json::{json, Value};
use sonara_server::user::{register_user, SqliteUserStore, UserStore};
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

fn tracks_payload() -> Value {
    json!([
        {
            "id": "t1", "kind": "track", "title": "Desert Wind",
            "description": "Recorded at dawn in the dunes",
            "attributes": {"genres": ["Ambient"], "instruments": ["Oud"]},
            "flags": {"featured": true},
            "published": "2024-01-15",
        },
        {
            "id": "t2", "kind": "track", "title": "Night Train",
            "attributes": {"genres": ["Jazz"], "moods": ["Moody"]},
        },
        {
            "id": "t3", "kind": "track", "title": "River Song",
            "attributes": {"genres": ["Folk"], "languages": ["Quechua"]},
        },
        {
            "id": "t4", "kind": "track", "title": "Blue Lantern",
            "curator": "Lena Okafor",
            "attributes": {"genres": ["Jazz"]},
        },
        {
            "id": "t5", "kind": "track", "title": "Sunrise Raga",
            "attributes": {"genres": ["Classical"], "languages": ["Hindi"]},
        },
    ])
}

fn collections_payload() -> Value {
    let entries: Vec<Value> = (0..COLLECTION_COUNT)
        .map(|i| {
            json!({
                "id": format!("c{}", i),
                "kind": "collection",
                "title": format!("Collection {}", i),
                "curator": "Sonara Editors",
                "attributes": {
                    "genres": [if i % 2 == 0 { "Jazz" } else { "Folk" }]
                },
                "flags": {"curator_pick": i < 2},
            })
        })
        .collect();
    Value::Array(entries)
}

fn regions_payload() -> Value {
    json!([
        {
            "id": "r1", "kind": "region", "title": "Andes",
            "attributes": {"tags": ["Highlands", "Flute"]},
        },
        {
            "id": "r2", "kind": "region", "title": "Sahel",
            "attributes": {"tags": ["Desert", "Strings"]},
        },
        {
            "id": "r3", "kind": "region", "title": "Balkans",
            "attributes": {"tags": ["Brass"]},
        },
    ])
}

fn posts_payload() -> Value {
    let heritage = [1, 3, 6, 9];
    let featured = [1, 4];
    let entries: Vec<Value> = (1..=POST_COUNT)
        .map(|i| {
            let category = if heritage.contains(&i) {
                "Cultural Heritage"
            } else if i % 2 == 0 {
                "News"
            } else {
                "Interviews"
            };
            json!({
                "id": format!("p{}", i),
                "kind": "post",
                "title": format!("Post {}", i),
                "attributes": {"category": [category]},
                "flags": {"featured": featured.contains(&i)},
            })
        })
        .collect();
    Value::Array(entries)
}

/// Write the catalog payload files into a temp dir, returning (guard, dir).
pub fn create_test_catalog() -> Result<(TempDir, PathBuf)> {
    let temp_dir = TempDir::new()?;
    let dir = temp_dir.path().to_path_buf();

    std::fs::write(dir.join("tracks.json"), tracks_payload().to_string())?;
    std::fs::write(dir.join("collections.json"), collections_payload().to_string())?;
    std::fs::write(dir.join("regions.json"), regions_payload().to_string())?;
    std::fs::write(dir.join("posts.json"), posts_payload().to_string())?;

    Ok((temp_dir, dir))
}

/// Create a user database with the standard test user.
pub fn create_test_db_with_users() -> Result<(TempDir, Arc<dyn UserStore>)> {
    let temp_dir = TempDir::new()?;
    let store = SqliteUserStore::new(temp_dir.path().join("users.db"))?;
    register_user(&store, TEST_USER, TEST_PASS)?;
    Ok((temp_dir, Arc::new(store)))
}
