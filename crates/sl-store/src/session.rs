//! Session bootstrap
//!
//! Startup sequence for one tracking session: rehydrate the store from the
//! backend if a snapshot exists (otherwise keep the seed data), flush once
//! immediately, then start the autosave ticker.

use std::sync::Arc;

use sl_core::config::StoreConfig;
use tracing::info;

use crate::autosave::{Autosave, AutosaveHandle};
use crate::persistence::{save_store, SnapshotBackend};
use crate::store::{shared, EntityStore, SharedStore};

/// A running tracking session: the shared store handle, the backend, and
/// the autosave ticker. Dropping the session stops the ticker after a final
/// flush.
pub struct Session {
    store: SharedStore,
    backend: Arc<dyn SnapshotBackend>,
    autosave: Option<AutosaveHandle>,
}

impl Session {
    /// Start a session. `seed` supplies the initial tables used when the
    /// backend holds no (valid) snapshot yet.
    pub fn start(config: &StoreConfig, backend: Arc<dyn SnapshotBackend>, seed: EntityStore) -> Self {
        let mut store = seed;
        let rehydrated = crate::persistence::hydrate_store(backend.as_ref(), &mut store);
        info!(
            backend = backend.name(),
            rehydrated, "tracking session starting"
        );

        let store = shared(store);
        save_store(backend.as_ref(), &store.read());

        let autosave = config.autosave_enabled().then(|| {
            Autosave::start(store.clone(), backend.clone(), config.autosave_interval())
        });

        Self {
            store,
            backend,
            autosave,
        }
    }

    pub fn store(&self) -> SharedStore {
        self.store.clone()
    }

    pub fn backend(&self) -> Arc<dyn SnapshotBackend> {
        self.backend.clone()
    }

    /// Stop the autosave ticker and flush one last time.
    pub fn shutdown(&mut self) {
        if let Some(mut autosave) = self.autosave.take() {
            autosave.stop();
        } else {
            save_store(self.backend.as_ref(), &self.store.read());
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.shutdown();
    }
}
