//! The persistence provider: a synchronous string key/value store.
//!
//! The engine keeps one JSON blob per key and always writes a key in full. [`FileStorage`] keeps
//! each key in its own file; [`MemoryStorage`] keeps them in memory and is what tests inject.

use crate::{fs, Result};
use anyhow::bail;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// The key that holds the settings of every category.
pub const SETTINGS_KEY: &str = "fuel_settings";

/// The key that holds the refuel history of every category.
pub const HISTORY_KEY: &str = "fuel_history";

/// A string-keyed, string-valued store.
pub trait Storage {
    /// Returns the value stored under `key`, or `None` if nothing is stored.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the value stored under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Keeps each key in `<root>/<key>.json`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// The directory must exist; see `Config::create`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        fs::read_optional(self.path(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        fs::write_all(self.path(key), value)
    }
}

/// An in-memory store. Writes can be made to fail to exercise the error paths of callers.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    data: BTreeMap<String, String>,
    fail_writes: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `entries`.
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            data: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            fail_writes: false,
        }
    }

    /// When `fail` is true every subsequent `set` returns an error and stores nothing.
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.data.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if self.fail_writes {
            bail!("Storage is not writable, unable to store '{key}'");
        }
        self.data.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
