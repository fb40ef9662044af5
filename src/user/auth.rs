//! Authentication primitives: password hashing and session tokens.

use anyhow::{bail, Result};
use rand::Rng;
use rand_distr::Alphanumeric;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::SystemTime;

/// Opaque session token string handed to clients.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Debug)]
pub struct AuthTokenValue(pub String);

impl AuthTokenValue {
    pub fn generate() -> AuthTokenValue {
        let rng = rand::rng();
        let random_string: String = rng
            .sample_iter(&Alphanumeric)
            .take(64)
            .map(char::from)
            .collect();
        AuthTokenValue(random_string)
    }
}

/// A persisted session token.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct AuthToken {
    pub user_id: i64,
    pub created: SystemTime,
    pub last_used: Option<SystemTime>,
    pub value: AuthTokenValue,
}

impl AuthToken {
    pub fn new(user_id: i64) -> Self {
        AuthToken {
            user_id,
            created: SystemTime::now(),
            last_used: None,
            value: AuthTokenValue::generate(),
        }
    }
}

mod sonara_argon2 {
    use anyhow::{anyhow, Result};
    use argon2::{
        password_hash::{
            rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
        },
        Argon2,
    };

    pub fn generate_b64_salt() -> String {
        SaltString::generate(&mut OsRng).to_string()
    }

    pub fn hash<T: AsRef<str>>(plain: &[u8], b64_salt: T) -> Result<String> {
        let argon2 = Argon2::default();
        let salt = SaltString::from_b64(b64_salt.as_ref()).map_err(|err| anyhow!("{}", err))?;
        let hash_string = argon2
            .hash_password(plain, &salt)
            .map_err(|err| anyhow!("{}", err))?
            .to_string();
        Ok(hash_string)
    }

    pub fn verify<T: AsRef<str>>(plain: &[u8], target_hash: T) -> Result<bool> {
        let argon2 = Argon2::default();
        let password_hash =
            PasswordHash::new(target_hash.as_ref()).map_err(|err| anyhow!("{}", err))?;
        Ok(argon2.verify_password(plain, &password_hash).is_ok())
    }
}

/// Which password hasher produced a stored credential.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum PasswordHasherKind {
    Argon2,
}

impl FromStr for PasswordHasherKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "argon2" => Ok(PasswordHasherKind::Argon2),
            _ => bail!("Unknown hasher {}", s),
        }
    }
}

impl PasswordHasherKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PasswordHasherKind::Argon2 => "argon2",
        }
    }

    pub fn generate_b64_salt(&self) -> String {
        match self {
            PasswordHasherKind::Argon2 => sonara_argon2::generate_b64_salt(),
        }
    }

    pub fn hash(&self, plain: &str, b64_salt: &str) -> Result<String> {
        match self {
            PasswordHasherKind::Argon2 => sonara_argon2::hash(plain.as_bytes(), b64_salt),
        }
    }

    pub fn verify(&self, plain: &str, target_hash: &str) -> Result<bool> {
        match self {
            PasswordHasherKind::Argon2 => sonara_argon2::verify(plain.as_bytes(), target_hash),
        }
    }
}

/// Stored password credentials for one user.
#[derive(Clone, Debug)]
pub struct PasswordCredentials {
    pub user_id: i64,
    pub hasher: PasswordHasherKind,
    pub salt: String,
    pub hash: String,
}

impl PasswordCredentials {
    /// Hash a plaintext password with a fresh salt.
    pub fn create(user_id: i64, password: &str) -> Result<Self> {
        let hasher = PasswordHasherKind::Argon2;
        let salt = hasher.generate_b64_salt();
        let hash = hasher.hash(password, &salt)?;
        Ok(PasswordCredentials {
            user_id,
            hasher,
            salt,
            hash,
        })
    }

    pub fn verify(&self, password: &str) -> Result<bool> {
        self.hasher.verify(password, &self.hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_long_and_unique() {
        let a = AuthTokenValue::generate();
        let b = AuthTokenValue::generate();
        assert_eq!(a.0.len(), 64);
        assert_ne!(a, b);
    }

    #[test]
    fn password_verification() {
        let credentials = PasswordCredentials::create(1, "opensesame").unwrap();
        assert!(credentials.verify("opensesame").unwrap());
        assert!(!credentials.verify("wrong").unwrap());
    }

    #[test]
    fn hasher_kind_round_trip() {
        let kind: PasswordHasherKind = "argon2".parse().unwrap();
        assert_eq!(kind, PasswordHasherKind::Argon2);
        assert_eq!(kind.as_str(), "argon2");
        assert!("md5".parse::<PasswordHasherKind>().is_err());
    }
}
