//! Configuration types
//!
//! The core has exactly two knobs: where snapshots go and how often the
//! autosave ticker fires.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Fixed storage key the session snapshot lives under by default.
pub const DEFAULT_STORAGE_KEY: &str = "siteline:db";

/// Default autosave cadence in milliseconds.
pub const DEFAULT_AUTOSAVE_INTERVAL_MS: u64 = 1000;

/// Store and persistence configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Key the serialized snapshot is stored under.
    pub storage_key: String,
    /// Autosave ticker interval in milliseconds. Zero disables the ticker.
    pub autosave_interval_ms: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            autosave_interval_ms: DEFAULT_AUTOSAVE_INTERVAL_MS,
        }
    }
}

impl StoreConfig {
    pub fn autosave_interval(&self) -> Duration {
        Duration::from_millis(self.autosave_interval_ms)
    }

    pub fn autosave_enabled(&self) -> bool {
        self.autosave_interval_ms > 0
    }
}
