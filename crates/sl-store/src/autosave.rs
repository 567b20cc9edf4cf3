//! Autosave ticker
//!
//! An owned background thread that serializes the shared store to the
//! backend on a fixed cadence. The caller holds the stop handle; stopping
//! (or dropping) the handle performs one final flush, which stands in for
//! the unload/visibility-change flush of the original session lifecycle.

use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use tracing::debug;

use crate::persistence::{save_store, SnapshotBackend};
use crate::store::SharedStore;

pub struct Autosave;

impl Autosave {
    /// Spawn the ticker. Each tick takes a read lock just long enough to
    /// serialize, so a tick can never observe a torn write.
    pub fn start(
        store: SharedStore,
        backend: Arc<dyn SnapshotBackend>,
        interval: Duration,
    ) -> AutosaveHandle {
        let (tx, rx) = mpsc::channel::<()>();
        let thread = std::thread::spawn(move || {
            debug!(interval_ms = interval.as_millis() as u64, "autosave started");
            loop {
                match rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => {
                        let snapshot = store.read().clone();
                        save_store(backend.as_ref(), &snapshot);
                    }
                    // Stop requested or handle dropped: flush once and exit.
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                        let snapshot = store.read().clone();
                        save_store(backend.as_ref(), &snapshot);
                        debug!("autosave stopped");
                        break;
                    }
                }
            }
        });

        AutosaveHandle {
            stop: tx,
            thread: Some(thread),
        }
    }
}

/// Stop handle for the autosave ticker. Owned by whoever started the
/// session; there is no global sentinel.
pub struct AutosaveHandle {
    stop: Sender<()>,
    thread: Option<JoinHandle<()>>,
}

impl AutosaveHandle {
    /// Stop the ticker, flush once, and wait for the thread to exit.
    /// Calling stop twice is a no-op.
    pub fn stop(&mut self) {
        if let Some(thread) = self.thread.take() {
            // Ignore send errors: the thread may already be gone.
            let _ = self.stop.send(());
            let _ = thread.join();
        }
    }

    pub fn is_running(&self) -> bool {
        self.thread.is_some()
    }
}

impl Drop for AutosaveHandle {
    fn drop(&mut self) {
        self.stop();
    }
}
