//! SQLite-backed user store.

use super::auth::{AuthToken, AuthTokenValue, PasswordCredentials, PasswordHasherKind};
use super::store::UserStore;
use super::theme::ThemePreference;
use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::str::FromStr;
use std::sync::Mutex;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS user (
    id INTEGER PRIMARY KEY,
    handle TEXT NOT NULL UNIQUE,
    created INTEGER DEFAULT (cast(strftime('%s','now') as int))
);
CREATE INDEX IF NOT EXISTS idx_user_handle ON user(handle);

CREATE TABLE IF NOT EXISTS user_password_credentials (
    user_id INTEGER NOT NULL UNIQUE REFERENCES user(id) ON DELETE CASCADE,
    salt TEXT NOT NULL,
    hash TEXT NOT NULL,
    hasher TEXT NOT NULL,
    created INTEGER DEFAULT (cast(strftime('%s','now') as int))
);

CREATE TABLE IF NOT EXISTS auth_token (
    user_id INTEGER NOT NULL REFERENCES user(id) ON DELETE CASCADE,
    value TEXT NOT NULL UNIQUE,
    created INTEGER DEFAULT (cast(strftime('%s','now') as int)),
    last_used INTEGER
);
CREATE INDEX IF NOT EXISTS idx_auth_token_value ON auth_token(value);

CREATE TABLE IF NOT EXISTS user_theme (
    user_id INTEGER PRIMARY KEY REFERENCES user(id) ON DELETE CASCADE,
    theme TEXT NOT NULL,
    updated INTEGER DEFAULT (cast(strftime('%s','now') as int))
);
";

fn unix_secs(time: SystemTime) -> i64 {
    time.duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

fn from_unix_secs(secs: i64) -> SystemTime {
    UNIX_EPOCH + Duration::from_secs(secs.max(0) as u64)
}

pub struct SqliteUserStore {
    connection: Mutex<Connection>,
}

impl SqliteUserStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path.as_ref())
            .with_context(|| format!("Failed to open user db at {:?}", path.as_ref()))?;
        connection.execute_batch("PRAGMA foreign_keys = ON;")?;
        connection
            .execute_batch(SCHEMA)
            .context("Failed to initialize user db schema")?;
        Ok(SqliteUserStore {
            connection: Mutex::new(connection),
        })
    }
}

impl UserStore for SqliteUserStore {
    fn create_user(&self, handle: &str) -> Result<i64> {
        let connection = self.connection.lock().unwrap();
        connection
            .execute("INSERT INTO user (handle) VALUES (?1)", params![handle])
            .with_context(|| format!("Failed to create user {}", handle))?;
        Ok(connection.last_insert_rowid())
    }

    fn get_user_id(&self, handle: &str) -> Option<i64> {
        let connection = self.connection.lock().unwrap();
        connection
            .query_row(
                "SELECT id FROM user WHERE handle = ?1",
                params![handle],
                |row| row.get(0),
            )
            .optional()
            .ok()
            .flatten()
    }

    fn get_user_handle(&self, user_id: i64) -> Option<String> {
        let connection = self.connection.lock().unwrap();
        connection
            .query_row(
                "SELECT handle FROM user WHERE id = ?1",
                params![user_id],
                |row| row.get(0),
            )
            .optional()
            .ok()
            .flatten()
    }

    fn set_password_credentials(&self, credentials: &PasswordCredentials) -> Result<()> {
        let connection = self.connection.lock().unwrap();
        connection.execute(
            "INSERT INTO user_password_credentials (user_id, salt, hash, hasher)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(user_id) DO UPDATE SET
                salt = excluded.salt, hash = excluded.hash, hasher = excluded.hasher",
            params![
                credentials.user_id,
                credentials.salt,
                credentials.hash,
                credentials.hasher.as_str(),
            ],
        )?;
        Ok(())
    }

    fn get_password_credentials(&self, handle: &str) -> Option<PasswordCredentials> {
        let connection = self.connection.lock().unwrap();
        let row = connection
            .query_row(
                "SELECT c.user_id, c.salt, c.hash, c.hasher
                 FROM user_password_credentials c
                 JOIN user u ON u.id = c.user_id
                 WHERE u.handle = ?1",
                params![handle],
                |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, String>(3)?,
                    ))
                },
            )
            .optional()
            .ok()
            .flatten()?;

        let (user_id, salt, hash, hasher) = row;
        let hasher = match PasswordHasherKind::from_str(&hasher) {
            Ok(hasher) => hasher,
            Err(err) => {
                warn!("Stored credentials for {} unusable: {}", handle, err);
                return None;
            }
        };
        Some(PasswordCredentials {
            user_id,
            hasher,
            salt,
            hash,
        })
    }

    fn add_auth_token(&self, token: &AuthToken) -> Result<()> {
        let connection = self.connection.lock().unwrap();
        connection.execute(
            "INSERT INTO auth_token (user_id, value, created, last_used)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                token.user_id,
                token.value.0,
                unix_secs(token.created),
                token.last_used.map(unix_secs),
            ],
        )?;
        Ok(())
    }

    fn get_auth_token(&self, value: &AuthTokenValue) -> Option<AuthToken> {
        let connection = self.connection.lock().unwrap();
        connection
            .query_row(
                "SELECT user_id, created, last_used FROM auth_token WHERE value = ?1",
                params![value.0],
                |row| {
                    Ok(AuthToken {
                        user_id: row.get(0)?,
                        created: from_unix_secs(row.get(1)?),
                        last_used: row.get::<_, Option<i64>>(2)?.map(from_unix_secs),
                        value: value.clone(),
                    })
                },
            )
            .optional()
            .ok()
            .flatten()
    }

    fn delete_auth_token(&self, value: &AuthTokenValue) -> Result<bool> {
        let connection = self.connection.lock().unwrap();
        let deleted = connection.execute(
            "DELETE FROM auth_token WHERE value = ?1",
            params![value.0],
        )?;
        Ok(deleted > 0)
    }

    fn touch_auth_token(&self, value: &AuthTokenValue) -> Result<()> {
        let connection = self.connection.lock().unwrap();
        connection.execute(
            "UPDATE auth_token SET last_used = ?1 WHERE value = ?2",
            params![unix_secs(SystemTime::now()), value.0],
        )?;
        Ok(())
    }

    fn get_theme(&self, user_id: i64) -> Option<ThemePreference> {
        let connection = self.connection.lock().unwrap();
        let stored: Option<String> = connection
            .query_row(
                "SELECT theme FROM user_theme WHERE user_id = ?1",
                params![user_id],
                |row| row.get(0),
            )
            .optional()
            .ok()
            .flatten();

        let stored = stored?;
        match stored.parse() {
            Ok(theme) => Some(theme),
            Err(err) => {
                // Unreadable values are treated as absence.
                debug!("Ignoring stored theme for user {}: {}", user_id, err);
                None
            }
        }
    }

    fn set_theme(&self, user_id: i64, theme: ThemePreference) -> Result<()> {
        let connection = self.connection.lock().unwrap();
        connection.execute(
            "INSERT INTO user_theme (user_id, theme, updated)
             VALUES (?1, ?2, cast(strftime('%s','now') as int))
             ON CONFLICT(user_id) DO UPDATE SET
                theme = excluded.theme, updated = excluded.updated",
            params![user_id, theme.as_str()],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::register_user;

    fn temp_store() -> (tempfile::TempDir, SqliteUserStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteUserStore::new(dir.path().join("users.db")).unwrap();
        (dir, store)
    }

    #[test]
    fn create_and_look_up_user() {
        let (_dir, store) = temp_store();
        let id = store.create_user("ayla").unwrap();
        assert_eq!(store.get_user_id("ayla"), Some(id));
        assert_eq!(store.get_user_handle(id).as_deref(), Some("ayla"));
        assert_eq!(store.get_user_id("nobody"), None);
    }

    #[test]
    fn duplicate_handle_is_an_error() {
        let (_dir, store) = temp_store();
        store.create_user("ayla").unwrap();
        assert!(store.create_user("ayla").is_err());
    }

    #[test]
    fn password_credentials_round_trip() {
        let (_dir, store) = temp_store();
        let id = register_user(&store, "ayla", "opensesame").unwrap();
        let credentials = store.get_password_credentials("ayla").unwrap();
        assert_eq!(credentials.user_id, id);
        assert!(credentials.verify("opensesame").unwrap());
        assert!(!credentials.verify("wrong").unwrap());
        assert!(store.get_password_credentials("nobody").is_none());
    }

    #[test]
    fn auth_token_lifecycle() {
        let (_dir, store) = temp_store();
        let id = store.create_user("ayla").unwrap();
        let token = AuthToken::new(id);
        store.add_auth_token(&token).unwrap();

        let fetched = store.get_auth_token(&token.value).unwrap();
        assert_eq!(fetched.user_id, id);
        assert!(fetched.last_used.is_none());

        store.touch_auth_token(&token.value).unwrap();
        let touched = store.get_auth_token(&token.value).unwrap();
        assert!(touched.last_used.is_some());

        assert!(store.delete_auth_token(&token.value).unwrap());
        assert!(!store.delete_auth_token(&token.value).unwrap());
        assert!(store.get_auth_token(&token.value).is_none());
    }

    #[test]
    fn theme_defaults_to_absent_then_last_write_wins() {
        let (_dir, store) = temp_store();
        let id = store.create_user("ayla").unwrap();
        assert_eq!(store.get_theme(id), None);

        store.set_theme(id, ThemePreference::Light).unwrap();
        store.set_theme(id, ThemePreference::System).unwrap();
        assert_eq!(store.get_theme(id), Some(ThemePreference::System));
    }
}
