//! Sonara Catalog Server Library
//!
//! Backend for the Sonara music-discovery application: an in-memory
//! catalog of tracks, curated collections, regions and blog posts, with
//! the filtering/pagination core used by the listing pages, a thin HTTP
//! API, and a SQLite-backed user/preference store.

pub mod catalog;
pub mod config;
pub mod filter;
pub mod server;
pub mod user;
pub mod view;

// Re-export commonly used types for convenience
pub use catalog::{Catalog, CatalogStore, Item, ItemKind};
pub use filter::FilterSpec;
pub use server::{make_app, run_server, RequestsLoggingLevel, ServerConfig};
pub use user::{SqliteUserStore, ThemePreference, UserStore};
pub use view::{ListView, LoadState};
