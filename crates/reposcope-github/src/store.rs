//! Injected key-value storage for browser-style local state.
//!
//! The analysis cache and the recent-repos list both persist through this
//! interface, so the fetch layer never touches a concrete storage location
//! directly and tests can substitute an in-memory store.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use reposcope_core::{Result, ScopeError};

/// Minimal string key-value storage.
pub trait KeyValueStore: Send + Sync {
    /// Read a value; `None` when the key is absent or unreadable.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value.
    ///
    /// # Errors
    ///
    /// Returns [`ScopeError::Io`] when the backing storage rejects the
    /// write. Callers treat failures as a degraded cache, not a fatal
    /// condition.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a key; removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

/// One file per key under a directory.
///
/// # Examples
///
/// ```
/// use reposcope_github::{FileStore, KeyValueStore};
///
/// let dir = tempfile::tempdir().unwrap();
/// let store = FileStore::new(dir.path().into());
/// store.set("analysis:owner/repo@main", "{}").unwrap();
/// assert_eq!(store.get("analysis:owner/repo@main").as_deref(), Some("{}"));
/// ```
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `dir`; the directory is created on first
    /// write.
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Create a store in the platform cache directory.
    ///
    /// # Errors
    ///
    /// Returns [`ScopeError::Config`] when no cache directory can be
    /// determined for the platform.
    pub fn default_location() -> Result<Self> {
        let dirs = directories::ProjectDirs::from("", "", "reposcope").ok_or_else(|| {
            ScopeError::Config("could not determine a platform cache directory".into())
        })?;
        Ok(Self::new(dirs.cache_dir().to_path_buf()))
    }

    fn path_for(&self, key: &str) -> PathBuf {
        // Keys contain '/', '@', and ':'; flatten to a safe file name.
        let sanitized: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                    c
                } else {
                    '-'
                }
            })
            .collect();
        self.dir.join(format!("{sanitized}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.path_for(key)).ok()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// In-memory store for tests and ephemeral runs.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        if let Ok(mut entries) = self.entries.lock() {
            entries.remove(key);
        }
        Ok(())
    }
}
