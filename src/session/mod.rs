//! Admin login gate.
//!
//! The whole session is one persisted flag: `admin_logged_in` set to the
//! literal `"true"`. Credentials are fixed values from the config, so this
//! is a convenience gate for the admin flows rather than access control.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::errors::Result;
use crate::utils::persistence::{load_json, save_json};

pub const LOGGED_IN_KEY: &str = "admin_logged_in";
const LOGGED_IN_VALUE: &str = "true";

pub const DEFAULT_USERNAME: &str = "admin";
pub const DEFAULT_PASSWORD: &str = "admin123";

/// String key/value storage that survives between runs.
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Store backed by a JSON object on disk, rewritten atomically on every change.
#[derive(Debug)]
pub struct JsonSessionStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl JsonSessionStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let values = load_json(&path)?.unwrap_or_default();
        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for JsonSessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        save_json(&self.values, &self.path)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.values.remove(key).is_some() {
            save_json(&self.values, &self.path)?;
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemorySessionStore {
    values: BTreeMap<String, String>,
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.values.remove(key);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            username: DEFAULT_USERNAME.into(),
            password: DEFAULT_PASSWORD.into(),
        }
    }
}

pub struct AdminSession {
    store: Box<dyn SessionStore>,
    credentials: Credentials,
}

impl AdminSession {
    pub fn new(store: Box<dyn SessionStore>, credentials: Credentials) -> Self {
        Self { store, credentials }
    }

    pub fn in_memory() -> Self {
        Self::new(Box::<MemorySessionStore>::default(), Credentials::default())
    }

    /// Sets the flag when both values match; a mismatch leaves the store untouched.
    pub fn login(&mut self, username: &str, password: &str) -> Result<bool> {
        if username != self.credentials.username || password != self.credentials.password {
            tracing::warn!(username, "admin login rejected");
            return Ok(false);
        }
        self.store.set(LOGGED_IN_KEY, LOGGED_IN_VALUE)?;
        tracing::info!(username, "admin logged in");
        Ok(true)
    }

    pub fn logout(&mut self) -> Result<()> {
        self.store.remove(LOGGED_IN_KEY)?;
        tracing::info!("admin logged out");
        Ok(())
    }

    pub fn is_logged_in(&self) -> bool {
        self.store.get(LOGGED_IN_KEY).as_deref() == Some(LOGGED_IN_VALUE)
    }

    pub fn username(&self) -> &str {
        &self.credentials.username
    }

    /// Replaces the accepted credentials; an existing login stays valid.
    pub fn set_credentials(&mut self, credentials: Credentials) {
        self.credentials = credentials;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn correct_credentials_set_the_flag() {
        let mut session = AdminSession::in_memory();
        assert!(session.login("admin", "admin123").unwrap());
        assert!(session.is_logged_in());
    }

    #[test]
    fn wrong_password_leaves_flag_unset() {
        let mut session = AdminSession::in_memory();
        assert!(!session.login("admin", "wrong").unwrap());
        assert!(!session.is_logged_in());
    }

    #[test]
    fn only_the_literal_true_counts() {
        let mut store = MemorySessionStore::default();
        store.set(LOGGED_IN_KEY, "yes").unwrap();
        let session = AdminSession::new(Box::new(store), Credentials::default());
        assert!(!session.is_logged_in());
    }

    #[test]
    fn flag_persists_across_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");

        let store = JsonSessionStore::open(&path).unwrap();
        let mut session = AdminSession::new(Box::new(store), Credentials::default());
        session.login("admin", "admin123").unwrap();

        let reopened = JsonSessionStore::open(&path).unwrap();
        assert_eq!(reopened.get(LOGGED_IN_KEY).as_deref(), Some("true"));

        let mut session = AdminSession::new(Box::new(reopened), Credentials::default());
        session.logout().unwrap();
        let reopened = JsonSessionStore::open(&path).unwrap();
        assert_eq!(reopened.get(LOGGED_IN_KEY), None);
    }
}
