//! Persistence adapter
//!
//! Saves the serialized store under a fixed key and rehydrates it at session
//! start. Failures never escape this layer: callers get a boolean and the
//! in-memory store stays authoritative for the session.

use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use sl_core::error::{PersistenceError, PersistenceResult};
use tracing::{debug, warn};

use crate::store::EntityStore;

/// Durable key-value slot for the snapshot blob.
pub trait SnapshotBackend: Send + Sync {
    /// Store the snapshot, replacing any previous one.
    fn save(&self, snapshot: &str) -> PersistenceResult<()>;

    /// Load the previously stored snapshot, `None` if there is none.
    fn load(&self) -> PersistenceResult<Option<String>>;

    /// Drop the stored snapshot, if any.
    fn clear(&self) -> PersistenceResult<()>;

    /// Backend name for logging.
    fn name(&self) -> &str;
}

/// File-backed snapshot slot: one JSON file named after the storage key,
/// under a root directory.
pub struct FileBackend {
    root: PathBuf,
    key: String,
}

impl FileBackend {
    pub fn new(root: impl AsRef<Path>, key: impl Into<String>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            key: key.into(),
        }
    }

    /// Resolve the storage key to a file path. Keys must not escape the root.
    fn resolve_path(&self) -> PersistenceResult<PathBuf> {
        if self.key.is_empty()
            || self.key.contains("..")
            || self.key.contains('/')
            || self.key.contains('\\')
        {
            return Err(PersistenceError::InvalidKey(self.key.clone()));
        }
        Ok(self.root.join(format!("{}.json", self.key)))
    }
}

impl SnapshotBackend for FileBackend {
    fn save(&self, snapshot: &str) -> PersistenceResult<()> {
        let path = self.resolve_path()?;
        std::fs::create_dir_all(&self.root)?;
        std::fs::write(&path, snapshot)?;
        debug!(path = ?path, bytes = snapshot.len(), "snapshot stored");
        Ok(())
    }

    fn load(&self) -> PersistenceResult<Option<String>> {
        let path = self.resolve_path()?;
        match std::fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn clear(&self) -> PersistenceResult<()> {
        let path = self.resolve_path()?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn name(&self) -> &str {
        "file"
    }
}

/// In-memory snapshot slot. Used by tests and as a degraded fallback when no
/// durable location is available.
#[derive(Default)]
pub struct MemoryBackend {
    slot: RwLock<Option<String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotBackend for MemoryBackend {
    fn save(&self, snapshot: &str) -> PersistenceResult<()> {
        *self.slot.write() = Some(snapshot.to_string());
        Ok(())
    }

    fn load(&self) -> PersistenceResult<Option<String>> {
        Ok(self.slot.read().clone())
    }

    fn clear(&self) -> PersistenceResult<()> {
        *self.slot.write() = None;
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

/// Serialize and store the whole store. Returns whether the save landed;
/// failures are logged and swallowed.
pub fn save_store(backend: &dyn SnapshotBackend, store: &EntityStore) -> bool {
    let snapshot = match serde_json::to_string(store) {
        Ok(s) => s,
        Err(e) => {
            warn!(backend = backend.name(), error = %e, "snapshot serialization failed");
            return false;
        }
    };
    match backend.save(&snapshot) {
        Ok(()) => true,
        Err(e) => {
            warn!(backend = backend.name(), error = %e, "snapshot save failed");
            false
        }
    }
}

/// Load and deserialize a previously stored snapshot into the live store,
/// replacing its tables in place. Returns `false` (store untouched) when no
/// snapshot exists or the stored blob does not decode as a store.
pub fn hydrate_store(backend: &dyn SnapshotBackend, store: &mut EntityStore) -> bool {
    let raw = match backend.load() {
        Ok(Some(raw)) => raw,
        Ok(None) => return false,
        Err(e) => {
            warn!(backend = backend.name(), error = %e, "snapshot load failed");
            return false;
        }
    };
    match serde_json::from_str::<EntityStore>(&raw) {
        Ok(snapshot) => {
            store.replace_with(snapshot);
            debug!(backend = backend.name(), "store rehydrated from snapshot");
            true
        }
        Err(e) => {
            warn!(backend = backend.name(), error = %e, "stored snapshot is malformed, ignoring");
            false
        }
    }
}

/// Remove the stored snapshot. Failures are logged and swallowed.
pub fn clear_snapshot(backend: &dyn SnapshotBackend) {
    if let Err(e) = backend.clear() {
        warn!(backend = backend.name(), error = %e, "snapshot clear failed");
    }
}
