//! Project operations
//!
//! Reads build enriched project views; writes keep the project and
//! project-milestone tables consistent and flush the snapshot.

use chrono::Utc;
use sl_core::traits::{find_by_id, remove_by_id, Timestamped};
use sl_core::types::{fresh_id, Id};
use sl_models::{Project, ProjectMilestone, QualityGateStatus};
use sl_store::EntityStore;
use tracing::{debug, warn};
use validator::Validate;

use crate::catalog::Catalog;
use crate::dto::ProjectDto;
use crate::views::{
    self, project_milestone_views, project_summary, ProjectDetail, ProjectSummary,
    QualityGateView,
};

impl Catalog {
    /// All projects with their sorted milestone definitions and computed risk.
    pub fn get_all_projects(&self) -> Vec<ProjectSummary> {
        let store = self.store().read();
        store
            .projects
            .iter()
            .map(|project| project_summary(&store, project))
            .collect()
    }

    /// One project enriched with its milestone rows and the quality gates
    /// referencing at least one of them. `None` when the id is unknown.
    pub fn get_project_by_id(&self, project_id: &str) -> Option<ProjectDetail> {
        let store = self.store().read();
        let project = find_by_id(&store.projects, project_id)?.clone();

        let milestones = project_milestone_views(&store, project_id);

        // Gates touching any of this project's milestones, in first-seen order.
        let milestone_ids: Vec<&str> = milestones.iter().map(|m| m.link.milestone_id.as_str()).collect();
        let mut gate_ids: Vec<&str> = Vec::new();
        for qgm in &store.quality_gate_milestones {
            if milestone_ids.iter().any(|id| *id == qgm.milestone_id)
                && !gate_ids.contains(&qgm.quality_gate_id.as_str())
            {
                gate_ids.push(&qgm.quality_gate_id);
            }
        }

        let quality_gates = gate_ids
            .into_iter()
            .filter_map(|gate_id| {
                let definition = find_by_id(&store.quality_gates, gate_id)?;
                let gate_milestones = views::gate_milestone_views(&store, gate_id);

                let project_gate = store
                    .project_quality_gates
                    .iter()
                    .find(|pqg| pqg.project_id == project_id && pqg.quality_gate_id == gate_id);

                let completed = milestones
                    .iter()
                    .filter(|pm| {
                        pm.link.is_completed()
                            && gate_milestones
                                .iter()
                                .any(|gm| gm.definition.id == pm.link.milestone_id)
                    })
                    .count();

                let status = match project_gate {
                    Some(pqg) if pqg.is_completed() => QualityGateStatus::Done,
                    _ if completed > 0 => QualityGateStatus::InProgress,
                    _ => QualityGateStatus::Pending,
                };

                Some(QualityGateView {
                    definition: definition.clone(),
                    milestones: gate_milestones,
                    status,
                    risklevel: project_gate.and_then(|pqg| pqg.risklevel),
                })
            })
            .collect();

        Some(ProjectDetail {
            project,
            milestones,
            quality_gates,
        })
    }

    /// Insert a project, replacing any existing row with the same id.
    /// Returns `None` only when the payload fails validation.
    pub fn add_project(&self, dto: ProjectDto) -> Option<ProjectSummary> {
        if let Err(errors) = dto.validate() {
            warn!(%errors, "rejected invalid project payload");
            return None;
        }

        let now = Utc::now();
        let ProjectDto {
            id,
            name,
            description,
            milestone_count,
            closed_at,
            milestones,
        } = dto;
        let id = id.unwrap_or_else(|| fresh_id("proj"));

        let summary = {
            let mut store = self.store().write();

            // Idempotent add: same id replaces rather than duplicating.
            remove_by_id(&mut store.projects, &id);

            let milestone_count = milestones
                .as_ref()
                .map(|list| list.len() as u32)
                .or(milestone_count)
                .unwrap_or(0);

            let project = Project {
                id: id.clone(),
                created_at: now,
                updated_at: now,
                name,
                description,
                milestone_count,
                closed_at,
            };
            store.projects.push(project);

            if let Some(milestone_ids) = milestones {
                replace_milestone_links(&mut store, &id, &milestone_ids);
            }

            let project = find_by_id(&store.projects, &id).cloned()?;
            project_summary(&store, &project)
        };

        debug!(project_id = %id, "project added");
        self.flush();
        Some(summary)
    }

    /// Merge the payload over an existing project. `None` when the id is
    /// missing, unknown, or the payload is invalid.
    pub fn edit_project(&self, dto: ProjectDto) -> Option<ProjectSummary> {
        if let Err(errors) = dto.validate() {
            warn!(%errors, "rejected invalid project payload");
            return None;
        }
        let id = dto.id.clone()?;

        let now = Utc::now();
        let summary = {
            let mut store = self.store().write();
            let idx = store.projects.iter().position(|p| p.id == id)?;

            let project = &mut store.projects[idx];
            project.name = dto.name;
            project.description = dto.description;
            project.closed_at = dto.closed_at;
            if let Some(count) = dto.milestone_count {
                project.milestone_count = count;
            }
            project.touch(now);

            if let Some(milestone_ids) = dto.milestones {
                store.projects[idx].milestone_count = milestone_ids.len() as u32;
                replace_milestone_links(&mut store, &id, &milestone_ids);
            }

            let project = store.projects[idx].clone();
            project_summary(&store, &project)
        };

        debug!(project_id = %id, "project edited");
        self.flush();
        Some(summary)
    }

    /// Delete a project and cascade to its link rows. Returns whether a row
    /// was actually removed.
    pub fn delete_project(&self, project_id: &str) -> bool {
        let removed = {
            let mut store = self.store().write();
            let removed = remove_by_id(&mut store.projects, project_id);
            if removed {
                store.project_milestones.retain(|pm| pm.project_id != project_id);
                store
                    .project_quality_gates
                    .retain(|pqg| pqg.project_id != project_id);
            }
            removed
        };

        if removed {
            debug!(%project_id, "project deleted");
        }
        self.flush();
        removed
    }

    /// Bulk completion set for one department's slice of one project:
    /// every in-scope milestone in `completed_ids` is marked done, every
    /// in-scope milestone not in the list is marked undone. Rows outside the
    /// project or department are untouched. Returns the number of rows that
    /// changed.
    pub fn set_project_department_milestones_completion(
        &self,
        project_id: &str,
        department_id: &str,
        completed_ids: &[Id],
    ) -> usize {
        let now = Utc::now();
        let changed = {
            let mut store = self.store().write();

            let department_of: std::collections::HashMap<Id, Id> = store
                .milestones
                .iter()
                .map(|m| (m.id.clone(), m.department_id.clone()))
                .collect();

            let mut changed = 0;
            for pm in store
                .project_milestones
                .iter_mut()
                .filter(|pm| pm.project_id == project_id)
            {
                // Orphaned definitions are out of scope, like everywhere else.
                match department_of.get(&pm.milestone_id) {
                    Some(dept) if dept == department_id => {}
                    _ => continue,
                }

                let want = completed_ids.iter().any(|id| id == &pm.milestone_id);
                match (want, pm.is_completed()) {
                    (true, false) => {
                        pm.completed_at = Some(now);
                        pm.touch(now);
                        changed += 1;
                    }
                    (false, true) => {
                        pm.completed_at = None;
                        pm.touch(now);
                        changed += 1;
                    }
                    _ => {}
                }
            }
            changed
        };

        debug!(%project_id, %department_id, changed, "bulk milestone completion applied");
        self.flush();
        changed
    }
}

/// Replace a project's milestone links wholesale. Ids that do not resolve to
/// a milestone definition are dropped; duplicates keep only the first
/// occurrence so the (project, milestone) pair stays unique.
fn replace_milestone_links(store: &mut EntityStore, project_id: &str, milestone_ids: &[Id]) {
    store.project_milestones.retain(|pm| pm.project_id != project_id);

    let fallback_responsible = store
        .users
        .first()
        .map(|u| u.id.clone())
        .unwrap_or_default();

    let mut linked: Vec<Id> = Vec::with_capacity(milestone_ids.len());
    for milestone_id in milestone_ids {
        if linked.contains(milestone_id) {
            continue;
        }
        if find_by_id(&store.milestones, milestone_id).is_none() {
            continue;
        }
        linked.push(milestone_id.clone());
    }

    for milestone_id in linked {
        store.project_milestones.push(ProjectMilestone::link(
            project_id,
            milestone_id,
            fallback_responsible.clone(),
        ));
    }
}
