//! User store trait definition.

use super::auth::{AuthToken, AuthTokenValue, PasswordCredentials};
use super::theme::ThemePreference;
use anyhow::Result;

/// Storage backend for users, credentials, session tokens and preferences.
///
/// Lookup methods return `Option`: absence (unknown user, expired token,
/// unset preference) is a normal outcome, never an error.
pub trait UserStore: Send + Sync {
    fn create_user(&self, handle: &str) -> Result<i64>;

    fn get_user_id(&self, handle: &str) -> Option<i64>;

    fn get_user_handle(&self, user_id: i64) -> Option<String>;

    fn set_password_credentials(&self, credentials: &PasswordCredentials) -> Result<()>;

    fn get_password_credentials(&self, handle: &str) -> Option<PasswordCredentials>;

    fn add_auth_token(&self, token: &AuthToken) -> Result<()>;

    fn get_auth_token(&self, value: &AuthTokenValue) -> Option<AuthToken>;

    /// Returns true if a token was deleted.
    fn delete_auth_token(&self, value: &AuthTokenValue) -> Result<bool>;

    /// Update the token's last_used timestamp to now.
    fn touch_auth_token(&self, value: &AuthTokenValue) -> Result<()>;

    /// The stored theme, or `None` when the user never set one.
    fn get_theme(&self, user_id: i64) -> Option<ThemePreference>;

    /// Last write wins, no conflict resolution.
    fn set_theme(&self, user_id: i64, theme: ThemePreference) -> Result<()>;
}

/// Create a user with password credentials in one step.
///
/// Used by provisioning and test fixtures.
pub fn register_user(store: &dyn UserStore, handle: &str, password: &str) -> Result<i64> {
    let user_id = store.create_user(handle)?;
    let credentials = PasswordCredentials::create(user_id, password)?;
    store.set_password_credentials(&credentials)?;
    Ok(user_id)
}
