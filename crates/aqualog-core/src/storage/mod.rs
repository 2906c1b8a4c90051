//! Persistence layer.
//!
//! The host persistence mechanism is abstracted as a key-value capability
//! storing complete JSON snapshots ([`KvStore`]). Two logical keys exist:
//! one for the user profile and one for the intake ledger. [`FileStore`]
//! backs the capability with one JSON file per key under the data
//! directory; [`MemoryStore`] is the in-memory test double.

mod ledger_store;
mod profile;

pub use ledger_store::LedgerStore;
pub use profile::{ProfileStore, ProfileUpdate, UserProfile};

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::error::StorageError;

/// Storage key for the user profile snapshot.
pub const PROFILE_KEY: &str = "user_profile";
/// Storage key for the intake ledger snapshot.
pub const LEDGER_KEY: &str = "intake_history";
/// Storage key the CLI notifier keeps its installed schedule under.
pub const REMINDERS_KEY: &str = "scheduled_reminders";

/// Returns `~/.config/aqualog[-dev]/` based on AQUALOG_ENV.
///
/// Set AQUALOG_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if the config directory cannot be created.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("AQUALOG_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("aqualog-dev")
    } else {
        base_dir.join("aqualog")
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| StorageError::DataDirUnavailable(e.to_string()))?;
    Ok(dir)
}

/// Key-value persistence capability.
///
/// Values are complete serialized snapshots; writes replace the whole
/// record, so no partial-write recovery is ever needed.
pub trait KvStore: Send + Sync {
    /// Fetch the stored value for a key, if present.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the stored value for a key.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<T: KvStore + ?Sized> KvStore for &T {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

/// File-backed store: one JSON file per key under the data directory.
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open the store at the default data directory.
    pub fn open() -> Result<Self, StorageError> {
        Ok(Self { dir: data_dir()? })
    }

    /// Open the store at an explicit directory.
    pub fn at(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::ReadFailed {
                key: key.to_string(),
                message: e.to_string(),
            }),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        std::fs::write(self.path_for(key), value).map_err(|e| StorageError::WriteFailed {
            key: key.to_string(),
            message: e.to_string(),
        })
    }
}

/// In-memory store for tests, with a switch that makes writes fail.
#[derive(Debug, Default)]
pub struct MemoryStore {
    map: Mutex<HashMap<String, String>>,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a key, bypassing the failure switch.
    pub fn seed(&self, key: &str, value: &str) {
        if let Ok(mut map) = self.map.lock() {
            map.insert(key.to_string(), value.to_string());
        }
    }

    /// Make subsequent writes fail (or succeed again).
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let map = self.map.lock().map_err(|e| StorageError::ReadFailed {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(map.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::WriteFailed {
                key: key.to_string(),
                message: "writes disabled".into(),
            });
        }
        let mut map = self.map.lock().map_err(|e| StorageError::WriteFailed {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        map.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
