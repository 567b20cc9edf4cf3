//! The catalog service
//!
//! Owns the shared store handle and the snapshot backend. Every mutating
//! method in the `projects` and `quality_gates` modules goes through this
//! type and ends with a best-effort flush.

use std::sync::Arc;

use sl_models::{MilestoneDefinition, ProjectMilestone, ProjectQualityGate};
use sl_store::{save_store, SharedStore, SnapshotBackend};

pub struct Catalog {
    store: SharedStore,
    backend: Arc<dyn SnapshotBackend>,
}

impl Catalog {
    pub fn new(store: SharedStore, backend: Arc<dyn SnapshotBackend>) -> Self {
        Self { store, backend }
    }

    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    /// Persist the current store. Failures are logged inside `save_store`
    /// and otherwise ignored; the in-memory store stays authoritative.
    pub(crate) fn flush(&self) {
        let snapshot = self.store.read().clone();
        save_store(self.backend.as_ref(), &snapshot);
    }

    /// Raw milestone definition table.
    pub fn all_milestones(&self) -> Vec<MilestoneDefinition> {
        let mut rows = self.store.read().milestones.clone();
        rows.sort_by_key(|m| m.execution_number);
        rows
    }

    /// Raw project-milestone link table.
    pub fn all_project_milestones(&self) -> Vec<ProjectMilestone> {
        self.store.read().project_milestones.clone()
    }

    /// Raw project-quality-gate link table.
    pub fn all_project_quality_gates(&self) -> Vec<ProjectQualityGate> {
        self.store.read().project_quality_gates.clone()
    }
}
