//! Quality gate operations
//!
//! Same write semantics as the project operations: idempotent add by id,
//! merge on edit, cascade on delete, flush after every mutation. The
//! project-free gate views always report `Pending`; per-project status is
//! derived in `get_project_by_id`.

use chrono::Utc;
use sl_core::traits::{find_by_id, remove_by_id, Timestamped};
use sl_core::types::{fresh_id, Id};
use sl_models::{ProjectQualityGate, QualityGateDefinition, QualityGateMilestone, QualityGateStatus};
use sl_store::EntityStore;
use tracing::{debug, warn};
use validator::Validate;

use crate::catalog::Catalog;
use crate::dto::QualityGateDto;
use crate::views::{gate_milestone_views, QualityGateView};

impl Catalog {
    /// All quality gates with their sorted linked milestones.
    pub fn get_all_quality_gates(&self) -> Vec<QualityGateView> {
        let store = self.store().read();
        store
            .quality_gates
            .iter()
            .map(|gate| gate_view(&store, gate))
            .collect()
    }

    /// One quality gate with its linked milestones. `None` when unknown.
    pub fn get_quality_gate_by_id(&self, gate_id: &str) -> Option<QualityGateView> {
        let store = self.store().read();
        find_by_id(&store.quality_gates, gate_id).map(|gate| gate_view(&store, gate))
    }

    /// Insert a gate, replacing any existing row with the same id.
    pub fn add_quality_gate(&self, dto: QualityGateDto) -> Option<QualityGateView> {
        if let Err(errors) = dto.validate() {
            warn!(%errors, "rejected invalid quality gate payload");
            return None;
        }

        let now = Utc::now();
        let QualityGateDto {
            id,
            name,
            description,
            hyperlink,
            milestones,
        } = dto;
        let id = id.unwrap_or_else(|| fresh_id("qg"));

        let view = {
            let mut store = self.store().write();
            remove_by_id(&mut store.quality_gates, &id);

            let gate = QualityGateDefinition {
                id: id.clone(),
                created_at: now,
                updated_at: now,
                name,
                description,
                hyperlink,
            };
            store.quality_gates.push(gate);

            if let Some(milestone_ids) = milestones {
                replace_gate_links(&mut store, &id, &milestone_ids);
            }

            let gate = find_by_id(&store.quality_gates, &id).cloned()?;
            gate_view(&store, &gate)
        };

        debug!(gate_id = %id, "quality gate added");
        self.flush();
        Some(view)
    }

    /// Merge the payload over an existing gate. `None` when the id is
    /// missing, unknown, or the payload is invalid.
    pub fn edit_quality_gate(&self, dto: QualityGateDto) -> Option<QualityGateView> {
        if let Err(errors) = dto.validate() {
            warn!(%errors, "rejected invalid quality gate payload");
            return None;
        }
        let id = dto.id.clone()?;

        let now = Utc::now();
        let view = {
            let mut store = self.store().write();
            let idx = store.quality_gates.iter().position(|g| g.id == id)?;

            let gate = &mut store.quality_gates[idx];
            gate.name = dto.name;
            gate.description = dto.description;
            gate.hyperlink = dto.hyperlink;
            gate.touch(now);

            if let Some(milestone_ids) = dto.milestones {
                replace_gate_links(&mut store, &id, &milestone_ids);
            }

            let gate = store.quality_gates[idx].clone();
            gate_view(&store, &gate)
        };

        debug!(gate_id = %id, "quality gate edited");
        self.flush();
        Some(view)
    }

    /// Delete a gate and cascade to its milestone links and per-project
    /// completion rows. Returns whether a row was actually removed.
    pub fn delete_quality_gate(&self, gate_id: &str) -> bool {
        let removed = {
            let mut store = self.store().write();
            let removed = remove_by_id(&mut store.quality_gates, gate_id);
            if removed {
                store
                    .quality_gate_milestones
                    .retain(|qgm| qgm.quality_gate_id != gate_id);
                store
                    .project_quality_gates
                    .retain(|pqg| pqg.quality_gate_id != gate_id);
            }
            removed
        };

        if removed {
            debug!(%gate_id, "quality gate deleted");
        }
        self.flush();
        removed
    }

    /// Upsert the per-project completion row for a gate. The row is created
    /// on the first completion; unchecking a gate that has no row is a no-op
    /// returning `None`. Completing a gate clears its risk level.
    pub fn set_project_quality_gate_completion(
        &self,
        project_id: &str,
        gate_id: &str,
        completed: bool,
    ) -> Option<ProjectQualityGate> {
        let now = Utc::now();
        let row = {
            let mut store = self.store().write();
            let idx = store
                .project_quality_gates
                .iter()
                .position(|pqg| pqg.project_id == project_id && pqg.quality_gate_id == gate_id);

            let idx = match idx {
                Some(idx) => idx,
                None if !completed => return None,
                None => {
                    store
                        .project_quality_gates
                        .push(ProjectQualityGate::link(project_id, gate_id));
                    store.project_quality_gates.len() - 1
                }
            };

            let pqg = &mut store.project_quality_gates[idx];
            pqg.completed_at = completed.then_some(now);
            if completed {
                pqg.risklevel = None;
            }
            pqg.touch(now);
            pqg.clone()
        };

        debug!(%project_id, %gate_id, completed, "quality gate completion set");
        self.flush();
        Some(row)
    }
}

fn gate_view(store: &EntityStore, gate: &QualityGateDefinition) -> QualityGateView {
    QualityGateView {
        definition: gate.clone(),
        milestones: gate_milestone_views(store, &gate.id),
        status: QualityGateStatus::Pending,
        risklevel: None,
    }
}

/// Replace a gate's milestone links wholesale, dropping unknown and
/// duplicate milestone ids.
fn replace_gate_links(store: &mut EntityStore, gate_id: &str, milestone_ids: &[Id]) {
    store
        .quality_gate_milestones
        .retain(|qgm| qgm.quality_gate_id != gate_id);

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
        store
            .quality_gate_milestones
            .push(QualityGateMilestone::link(gate_id, milestone_id));
    }
}
