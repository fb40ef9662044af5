//! Users, credentials, sessions and preferences.

pub mod auth;
mod sqlite_user_store;
mod store;
mod theme;

pub use sqlite_user_store::SqliteUserStore;
pub use store::{register_user, UserStore};
pub use theme::{ThemePreference, UnknownTheme};
