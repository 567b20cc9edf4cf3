//! Enriched view objects
//!
//! Built on demand from the flat tables, never stored. Enrichment silently
//! drops rows whose foreign keys no longer resolve; the store tolerates
//! partial referential integrity.

use serde::Serialize;
use sl_core::types::RiskLevel;
use sl_models::{
    Label, MilestoneDefinition, Project, ProjectMilestone, QualityGateDefinition,
    QualityGateStatus, User,
};
use sl_store::EntityStore;

/// A milestone definition with its label resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MilestoneView {
    #[serde(flatten)]
    pub definition: MilestoneDefinition,
    pub label: Option<Label>,
}

/// One project-milestone row decorated with its definition and the user
/// responsible for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectMilestoneView {
    #[serde(flatten)]
    pub link: ProjectMilestone,
    pub definition: MilestoneView,
    pub responsible_person: Option<User>,
}

/// A quality gate with its linked milestones and derived per-project state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualityGateView {
    #[serde(flatten)]
    pub definition: QualityGateDefinition,
    pub milestones: Vec<MilestoneView>,
    pub status: QualityGateStatus,
    pub risklevel: Option<RiskLevel>,
}

/// Project list entry: sorted milestone definitions plus the computed risk.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectSummary {
    #[serde(flatten)]
    pub project: Project,
    pub milestones: Vec<MilestoneView>,
    pub risk: RiskLevel,
}

/// Full single-project view consumed by the timeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub project: Project,
    pub milestones: Vec<ProjectMilestoneView>,
    pub quality_gates: Vec<QualityGateView>,
}

pub(crate) fn milestone_view(store: &EntityStore, definition: &MilestoneDefinition) -> MilestoneView {
    MilestoneView {
        definition: definition.clone(),
        label: sl_core::traits::find_by_id(&store.labels, &definition.label_id).cloned(),
    }
}

/// Milestone definitions attached to a project, orphans dropped, sorted
/// ascending by execution number.
pub(crate) fn attached_milestone_views(store: &EntityStore, project_id: &str) -> Vec<MilestoneView> {
    let mut views: Vec<MilestoneView> = store
        .project_milestones
        .iter()
        .filter(|pm| pm.project_id == project_id)
        .filter_map(|pm| sl_core::traits::find_by_id(&store.milestones, &pm.milestone_id))
        .map(|def| milestone_view(store, def))
        .collect();
    views.sort_by_key(|v| v.definition.execution_number);
    views
}

/// Full project-milestone rows for a project, orphans dropped, sorted
/// ascending by execution number.
pub(crate) fn project_milestone_views(
    store: &EntityStore,
    project_id: &str,
) -> Vec<ProjectMilestoneView> {
    let mut views: Vec<ProjectMilestoneView> = store
        .project_milestones
        .iter()
        .filter(|pm| pm.project_id == project_id)
        .filter_map(|pm| {
            let definition = sl_core::traits::find_by_id(&store.milestones, &pm.milestone_id)?;
            Some(ProjectMilestoneView {
                link: pm.clone(),
                definition: milestone_view(store, definition),
                responsible_person: sl_core::traits::find_by_id(
                    &store.users,
                    &pm.responsible_person_id,
                )
                .cloned(),
            })
        })
        .collect();
    views.sort_by_key(|v| v.definition.definition.execution_number);
    views
}

/// Milestones a quality gate depends on, sorted ascending by execution number.
pub(crate) fn gate_milestone_views(store: &EntityStore, gate_id: &str) -> Vec<MilestoneView> {
    let mut views: Vec<MilestoneView> = store
        .quality_gate_milestones
        .iter()
        .filter(|qgm| qgm.quality_gate_id == gate_id)
        .filter_map(|qgm| sl_core::traits::find_by_id(&store.milestones, &qgm.milestone_id))
        .map(|def| milestone_view(store, def))
        .collect();
    views.sort_by_key(|v| v.definition.execution_number);
    views
}

/// Project risk: the worst risk level across the project's quality-gate
/// rows; a row without a level counts as low, no rows at all means low.
pub(crate) fn project_risk(store: &EntityStore, project_id: &str) -> RiskLevel {
    store
        .project_quality_gates
        .iter()
        .filter(|pqg| pqg.project_id == project_id)
        .map(|pqg| pqg.risklevel.unwrap_or(RiskLevel::Low))
        .max()
        .unwrap_or(RiskLevel::Low)
}

pub(crate) fn project_summary(store: &EntityStore, project: &Project) -> ProjectSummary {
    ProjectSummary {
        project: project.clone(),
        milestones: attached_milestone_views(store, &project.id),
        risk: project_risk(store, &project.id),
    }
}
