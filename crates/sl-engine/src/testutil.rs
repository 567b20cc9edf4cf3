//! Shared test fixtures for the engine crate.

use std::sync::Arc;

use sl_models::{
    Department, Label, MilestoneDefinition, Project, ProjectMilestone, ProjectQualityGate,
    QualityGateDefinition, QualityGateMilestone, Role, User,
};
use sl_store::{shared, EntityStore, MemoryBackend};

use crate::catalog::Catalog;

fn dept(id: &str, name: &str) -> Department {
    let mut d = Department::new(name, "");
    d.id = id.to_string();
    d
}

fn label(id: &str, name: &str, department_id: &str) -> Label {
    let mut l = Label::new(name, "", "#1f77b4", department_id);
    l.id = id.to_string();
    l
}

fn milestone(id: &str, number: u32, department_id: &str, label_id: &str) -> MilestoneDefinition {
    let mut m = MilestoneDefinition::new(number, format!("Milestone {}", number), department_id, label_id);
    m.id = id.to_string();
    m
}

fn pm_link(id: &str, project_id: &str, milestone_id: &str, responsible: &str) -> ProjectMilestone {
    let mut pm = ProjectMilestone::link(project_id, milestone_id, responsible);
    pm.id = id.to_string();
    pm
}

fn qgm_link(gate_id: &str, milestone_id: &str) -> QualityGateMilestone {
    QualityGateMilestone::link(gate_id, milestone_id)
}

/// One project with five milestones across two departments and two gates:
/// `qg_1` depends on `ms_1..ms_3` (dept_a), `qg_2` on `ms_4..ms_5` (dept_b).
pub(crate) fn fixture_store() -> EntityStore {
    let mut store = EntityStore::default();

    store.departments.push(dept("dept_a", "Civil"));
    store.departments.push(dept("dept_b", "Electrical"));

    store.labels.push(label("label_a", "Groundworks", "dept_a"));
    store.labels.push(label("label_b", "Power", "dept_b"));

    let mut user = User::new("Ada", "ada@example.com", Role::ProjectManager, "dept_a");
    user.id = "user_1".to_string();
    store.users.push(user);

    store.milestones.push(milestone("ms_1", 1, "dept_a", "label_a"));
    store.milestones.push(milestone("ms_2", 2, "dept_a", "label_a"));
    store.milestones.push(milestone("ms_3", 3, "dept_a", "label_a"));
    store.milestones.push(milestone("ms_4", 4, "dept_b", "label_b"));
    store.milestones.push(milestone("ms_5", 5, "dept_b", "label_b"));

    let mut project = Project::new("Harbor extension", "Phase 1");
    project.id = "proj_1".to_string();
    project.milestone_count = 5;
    store.projects.push(project);

    for (i, ms) in ["ms_1", "ms_2", "ms_3", "ms_4", "ms_5"].iter().enumerate() {
        store
            .project_milestones
            .push(pm_link(&format!("pm_{}", i + 1), "proj_1", ms, "user_1"));
    }

    let mut qg1 = QualityGateDefinition::new("Groundworks sign-off", "");
    qg1.id = "qg_1".to_string();
    let mut qg2 = QualityGateDefinition::new("Power sign-off", "");
    qg2.id = "qg_2".to_string();
    store.quality_gates.push(qg1);
    store.quality_gates.push(qg2);

    for ms in ["ms_1", "ms_2", "ms_3"] {
        store.quality_gate_milestones.push(qgm_link("qg_1", ms));
    }
    for ms in ["ms_4", "ms_5"] {
        store.quality_gate_milestones.push(qgm_link("qg_2", ms));
    }

    store
        .project_quality_gates
        .push(ProjectQualityGate::link("proj_1", "qg_1"));

    store
}

pub(crate) fn new_catalog(store: EntityStore) -> Catalog {
    Catalog::new(shared(store), Arc::new(MemoryBackend::new()))
}

pub(crate) fn new_catalog_with_backend(store: EntityStore) -> (Catalog, Arc<MemoryBackend>) {
    let backend = Arc::new(MemoryBackend::new());
    let catalog = Catalog::new(shared(store), backend.clone());
    (catalog, backend)
}
