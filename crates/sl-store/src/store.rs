//! The entity store
//!
//! Flat tables only. Joins and derived fields live in `sl-engine`; this
//! module knows nothing about views.

use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use sl_models::{
    Department, Label, MilestoneDefinition, Project, ProjectMilestone, ProjectQualityGate,
    QualityGateDefinition, QualityGateMilestone, User,
};

/// The whole dataset of one tracking session.
///
/// Serializes to a single JSON object keyed by table name, which is exactly
/// the snapshot format the persistence adapter stores.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityStore {
    pub departments: Vec<Department>,
    pub labels: Vec<Label>,
    pub users: Vec<User>,
    pub projects: Vec<Project>,
    pub milestones: Vec<MilestoneDefinition>,
    pub project_milestones: Vec<ProjectMilestone>,
    pub project_quality_gates: Vec<ProjectQualityGate>,
    pub quality_gates: Vec<QualityGateDefinition>,
    pub quality_gate_milestones: Vec<QualityGateMilestone>,
}

impl EntityStore {
    /// Replace every table with the contents of `snapshot`, keeping `self`'s
    /// identity so existing handles observe the rehydrated data.
    pub fn replace_with(&mut self, snapshot: EntityStore) {
        let EntityStore {
            departments,
            labels,
            users,
            projects,
            milestones,
            project_milestones,
            project_quality_gates,
            quality_gates,
            quality_gate_milestones,
        } = snapshot;

        self.departments = departments;
        self.labels = labels;
        self.users = users;
        self.projects = projects;
        self.milestones = milestones;
        self.project_milestones = project_milestones;
        self.project_quality_gates = project_quality_gates;
        self.quality_gates = quality_gates;
        self.quality_gate_milestones = quality_gate_milestones;
    }

    pub fn is_empty(&self) -> bool {
        self == &EntityStore::default()
    }
}

/// Shared handle to the live store.
///
/// All reads and writes happen on the single event-dispatch path; the lock
/// exists so the autosave ticker thread can serialize a consistent snapshot
/// concurrently with it.
pub type SharedStore = Arc<RwLock<EntityStore>>;

/// Wrap a store into a shared handle.
pub fn shared(store: EntityStore) -> SharedStore {
    Arc::new(RwLock::new(store))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sl_models::Project;

    #[test]
    fn test_replace_with_swaps_every_table() {
        let mut live = EntityStore::default();
        live.projects.push(Project::new("Old", ""));

        let mut snapshot = EntityStore::default();
        snapshot.projects.push(Project::new("New", ""));
        snapshot.departments.push(sl_models::Department::new("Civil", ""));

        live.replace_with(snapshot.clone());
        assert_eq!(live, snapshot);
        assert_eq!(live.projects[0].name, "New");
    }

    #[test]
    fn test_default_store_is_empty() {
        assert!(EntityStore::default().is_empty());

        let mut store = EntityStore::default();
        store.users.push(sl_models::User::new(
            "Ada",
            "ada@example.com",
            sl_models::Role::Admin,
            "dept_1",
        ));
        assert!(!store.is_empty());
    }
}
