//! Timeline editing session
//!
//! Holds the working copy of checkbox state for one department's slice of
//! one project. Toggles are validated against the interleaved sequence and
//! accumulate locally; nothing touches the store until [`TimelineSession::save`]
//! commits the whole snapshot through the engine.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sl_core::types::Id;
use sl_engine::{Catalog, ProjectMilestoneView, QualityGateView};
use sl_models::QualityGateStatus;
use tracing::{debug, warn};

use crate::schedule::GateSchedule;
use crate::sequence::{InterleavedSequence, SequenceItem};

/// Result of a toggle request. Rejections carry the reason that was logged;
/// they are an expected condition, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    Applied,
    Rejected(String),
}

impl ToggleOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }

    pub fn rejection(&self) -> Option<&str> {
        match self {
            Self::Applied => None,
            Self::Rejected(reason) => Some(reason),
        }
    }
}

pub struct TimelineSession {
    project_id: Id,
    department_id: Id,
    schedule: GateSchedule,
    sequence: InterleavedSequence,
    milestone_checked: HashMap<Id, bool>,
    gate_checked: HashMap<Id, bool>,
    /// Last-seen link-row update stamps, used to tell a real backing-store
    /// change from a re-render with identical data.
    last_seen: HashMap<Id, DateTime<Utc>>,
    gates_seeded: bool,
}

impl TimelineSession {
    pub fn new(
        project_id: impl Into<Id>,
        department_id: impl Into<Id>,
        schedule: GateSchedule,
    ) -> Self {
        Self {
            project_id: project_id.into(),
            department_id: department_id.into(),
            schedule,
            sequence: InterleavedSequence::default(),
            milestone_checked: HashMap::new(),
            gate_checked: HashMap::new(),
            last_seen: HashMap::new(),
            gates_seeded: false,
        }
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn sequence(&self) -> &InterleavedSequence {
        &self.sequence
    }

    /// Re-seed the working copy from enriched milestone rows, but only when
    /// the backing data actually changed (a row's `updated_at` moved, or the
    /// row set itself changed). Identical re-deliveries preserve in-flight
    /// local edits. Returns whether a re-seed happened.
    pub fn sync_milestones(&mut self, milestones: &[ProjectMilestoneView]) -> bool {
        let scoped: Vec<&ProjectMilestoneView> = milestones
            .iter()
            .filter(|m| m.definition.definition.department_id == self.department_id)
            .collect();

        let next_seen: HashMap<Id, DateTime<Utc>> = scoped
            .iter()
            .map(|m| (m.link.milestone_id.clone(), m.link.updated_at))
            .collect();

        let changed = next_seen.len() != self.last_seen.len()
            || next_seen
                .iter()
                .any(|(id, stamp)| self.last_seen.get(id) != Some(stamp));
        if !changed {
            return false;
        }

        self.milestone_checked = scoped
            .iter()
            .map(|m| (m.link.milestone_id.clone(), m.link.is_completed()))
            .collect();

        let pairs: Vec<(Id, u32)> = scoped
            .iter()
            .map(|m| {
                (
                    m.link.milestone_id.clone(),
                    m.definition.definition.execution_number,
                )
            })
            .collect();
        self.sequence = InterleavedSequence::build(&pairs, &self.schedule);
        self.last_seen = next_seen;

        debug!(project_id = %self.project_id, rows = scoped.len(), "timeline re-seeded");
        true
    }

    /// Seed gate checkbox state from per-project gate views. Applied once
    /// per project: later calls are ignored until [`Self::switch_project`].
    pub fn seed_gates(&mut self, gates: &[QualityGateView]) -> bool {
        if self.gates_seeded {
            return false;
        }
        for slot in self.schedule.slots() {
            let done = gates
                .iter()
                .find(|g| g.definition.id == slot.gate_id)
                .map(|g| g.status == QualityGateStatus::Done)
                .unwrap_or(false);
            self.gate_checked.insert(slot.gate_id.clone(), done);
        }
        self.gates_seeded = true;
        true
    }

    /// Point the session at another project, dropping all working state and
    /// re-arming the gate seeding guard. A no-op when the id is unchanged.
    pub fn switch_project(&mut self, project_id: impl Into<Id>) {
        let project_id = project_id.into();
        if project_id == self.project_id {
            return;
        }
        self.project_id = project_id;
        self.sequence = InterleavedSequence::default();
        self.milestone_checked.clear();
        self.gate_checked.clear();
        self.last_seen.clear();
        self.gates_seeded = false;
    }

    /// Request one checkbox transition. Checking requires the immediate
    /// predecessor in the interleaved sequence to be checked; unchecking
    /// requires the immediate successor to be unchecked. A rejected toggle
    /// changes nothing.
    pub fn toggle(&mut self, item: &SequenceItem, desired: bool) -> ToggleOutcome {
        let Some(position) = self.sequence.position(item) else {
            return self.reject(format!(
                "{} is not part of the editing scope",
                item.describe()
            ));
        };

        if self.is_checked(item) == desired {
            return ToggleOutcome::Applied;
        }

        if desired {
            if let Some(previous) = self.sequence.predecessor(position) {
                if !self.is_checked(previous) {
                    return self.reject(format!(
                        "cannot check {}: {} is not checked yet",
                        item.describe(),
                        previous.describe()
                    ));
                }
            }
        } else if let Some(next) = self.sequence.successor(position) {
            if self.is_checked(next) {
                return self.reject(format!(
                    "cannot uncheck {}: {} is still checked",
                    item.describe(),
                    next.describe()
                ));
            }
        }

        self.set_checked(item, desired);
        ToggleOutcome::Applied
    }

    pub fn toggle_milestone(&mut self, milestone_id: &str, desired: bool) -> ToggleOutcome {
        self.toggle(&SequenceItem::Milestone(milestone_id.to_string()), desired)
    }

    pub fn toggle_gate(&mut self, gate_id: &str, desired: bool) -> ToggleOutcome {
        self.toggle(&SequenceItem::Gate(gate_id.to_string()), desired)
    }

    pub fn is_milestone_checked(&self, milestone_id: &str) -> bool {
        self.milestone_checked.get(milestone_id).copied().unwrap_or(false)
    }

    pub fn is_gate_checked(&self, gate_id: &str) -> bool {
        self.gate_checked.get(gate_id).copied().unwrap_or(false)
    }

    /// Checked milestone ids in sequence order.
    pub fn checked_milestone_ids(&self) -> Vec<Id> {
        self.sequence
            .items()
            .iter()
            .filter_map(|item| match item {
                SequenceItem::Milestone(id) if self.is_milestone_checked(id) => Some(id.clone()),
                _ => None,
            })
            .collect()
    }

    /// Commit the whole working copy through the engine: one bulk milestone
    /// completion call for the department slice, one gate completion upsert
    /// per scheduled gate. This is the only path from local edits to the
    /// store.
    pub fn save(&self, catalog: &Catalog) {
        debug!(project_id = %self.project_id, department_id = %self.department_id, "saving timeline");
        catalog.set_project_department_milestones_completion(
            &self.project_id,
            &self.department_id,
            &self.checked_milestone_ids(),
        );
        for slot in self.schedule.slots() {
            catalog.set_project_quality_gate_completion(
                &self.project_id,
                &slot.gate_id,
                self.is_gate_checked(&slot.gate_id),
            );
        }
    }

    fn is_checked(&self, item: &SequenceItem) -> bool {
        match item {
            SequenceItem::Milestone(id) => self.is_milestone_checked(id),
            SequenceItem::Gate(id) => self.is_gate_checked(id),
        }
    }

    fn set_checked(&mut self, item: &SequenceItem, checked: bool) {
        match item {
            SequenceItem::Milestone(id) => {
                self.milestone_checked.insert(id.clone(), checked);
            }
            SequenceItem::Gate(id) => {
                self.gate_checked.insert(id.clone(), checked);
            }
        }
    }

    fn reject(&self, reason: String) -> ToggleOutcome {
        warn!(project_id = %self.project_id, %reason, "toggle rejected");
        ToggleOutcome::Rejected(reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sl_engine::MilestoneView;
    use sl_models::{MilestoneDefinition, ProjectMilestone};

    fn milestone_row(
        milestone_id: &str,
        number: u32,
        department_id: &str,
        completed: bool,
    ) -> ProjectMilestoneView {
        let mut definition =
            MilestoneDefinition::new(number, format!("M{}", number), department_id, "label_a");
        definition.id = milestone_id.to_string();

        let mut link = ProjectMilestone::link("proj_1", milestone_id, "user_1");
        if completed {
            link.completed_at = Some(Utc::now());
        }

        ProjectMilestoneView {
            link,
            definition: MilestoneView {
                definition,
                label: None,
            },
            responsible_person: None,
        }
    }

    fn five_milestones() -> Vec<ProjectMilestoneView> {
        (1..=5)
            .map(|n| milestone_row(&format!("ms_{}", n), n, "dept_a", false))
            .collect()
    }

    fn session_with_gate(threshold: u32) -> TimelineSession {
        let schedule = GateSchedule::from_thresholds([("qg_1".to_string(), threshold)]);
        let mut session = TimelineSession::new("proj_1", "dept_a", schedule);
        session.sync_milestones(&five_milestones());
        session
    }

    #[test]
    fn test_gate_requires_full_prefix() {
        let mut session = session_with_gate(5);

        for n in 1..=4 {
            assert!(session
                .toggle_milestone(&format!("ms_{}", n), true)
                .is_applied());
        }

        // M5 incomplete: the gate stays blocked.
        let outcome = session.toggle_gate("qg_1", true);
        assert!(!outcome.is_applied());
        assert!(outcome.rejection().unwrap().contains("ms_5"));
        assert!(!session.is_gate_checked("qg_1"));

        assert!(session.toggle_milestone("ms_5", true).is_applied());
        assert!(session.toggle_gate("qg_1", true).is_applied());

        // Anything the gate depends on is now pinned.
        let outcome = session.toggle_milestone("ms_3", false);
        assert!(!outcome.is_applied());
        assert!(session.is_milestone_checked("ms_3"));
    }

    #[test]
    fn test_check_requires_immediate_predecessor() {
        let mut session = session_with_gate(5);
        assert!(session.toggle_milestone("ms_1", true).is_applied());

        let outcome = session.toggle_milestone("ms_3", true);
        assert!(!outcome.is_applied());
        assert!(outcome.rejection().unwrap().contains("ms_2"));
        assert!(!session.is_milestone_checked("ms_3"));
    }

    #[test]
    fn test_uncheck_requires_clear_suffix() {
        let mut session = session_with_gate(5);
        for n in 1..=3 {
            session.toggle_milestone(&format!("ms_{}", n), true);
        }

        assert!(!session.toggle_milestone("ms_2", false).is_applied());
        // The tail item always unchecks.
        assert!(session.toggle_milestone("ms_3", false).is_applied());
        assert!(session.toggle_milestone("ms_2", false).is_applied());
    }

    #[test]
    fn test_first_item_always_checkable_and_noop_toggles() {
        let mut session = session_with_gate(5);
        assert!(session.toggle_milestone("ms_1", true).is_applied());
        // Re-asserting the current state is a no-op, not a rejection.
        assert!(session.toggle_milestone("ms_1", true).is_applied());
        assert!(session.toggle_milestone("ms_5", false).is_applied());
    }

    #[test]
    fn test_gate_ahead_of_milestones_blocks_them() {
        // Threshold 2: the gate sits between M2 and M3.
        let mut session = session_with_gate(2);
        session.toggle_milestone("ms_1", true);
        session.toggle_milestone("ms_2", true);

        let outcome = session.toggle_milestone("ms_3", true);
        assert!(!outcome.is_applied());
        assert!(outcome.rejection().unwrap().contains("qg_1"));

        assert!(session.toggle_gate("qg_1", true).is_applied());
        assert!(session.toggle_milestone("ms_3", true).is_applied());
    }

    #[test]
    fn test_out_of_scope_item_rejected() {
        let mut session = session_with_gate(5);
        let outcome = session.toggle_milestone("ms_other_dept", true);
        assert!(!outcome.is_applied());
        assert!(outcome.rejection().unwrap().contains("editing scope"));
    }

    #[test]
    fn test_sync_preserves_local_edits_on_identical_rerender() {
        let rows = five_milestones();
        let schedule = GateSchedule::from_thresholds([("qg_1".to_string(), 5)]);
        let mut session = TimelineSession::new("proj_1", "dept_a", schedule);

        assert!(session.sync_milestones(&rows));
        session.toggle_milestone("ms_1", true);

        // Same rows, same stamps: the in-flight edit survives.
        assert!(!session.sync_milestones(&rows));
        assert!(session.is_milestone_checked("ms_1"));

        // A backing-store change re-seeds and clobbers the working copy.
        let mut changed = five_milestones();
        changed[0].link.completed_at = Some(Utc::now());
        changed[0].link.updated_at = Utc::now();
        assert!(session.sync_milestones(&changed));
        assert!(session.is_milestone_checked("ms_1"));
        assert!(!session.is_milestone_checked("ms_2"));
    }

    #[test]
    fn test_sync_ignores_other_departments() {
        let mut rows = five_milestones();
        rows.push(milestone_row("ms_elec", 6, "dept_b", true));

        let mut session = session_with_gate(5);
        session.sync_milestones(&rows);
        assert!(session
            .sequence()
            .position(&SequenceItem::Milestone("ms_elec".to_string()))
            .is_none());
    }

    #[test]
    fn test_gate_seeding_guard() {
        let mut session = session_with_gate(5);

        let done_gate = || {
            let mut gate = sl_models::QualityGateDefinition::new("Sign-off", "");
            gate.id = "qg_1".to_string();
            vec![QualityGateView {
                definition: gate,
                milestones: vec![],
                status: QualityGateStatus::Done,
                risklevel: None,
            }]
        };

        assert!(session.seed_gates(&done_gate()));
        assert!(session.is_gate_checked("qg_1"));

        // Local edit survives repeated seeding for the same project.
        session.toggle_gate("qg_1", false);
        assert!(!session.seed_gates(&done_gate()));
        assert!(!session.is_gate_checked("qg_1"));

        // Switching projects re-arms the guard.
        session.switch_project("proj_2");
        assert!(session.seed_gates(&done_gate()));
        assert!(session.is_gate_checked("qg_1"));
    }

    mod end_to_end {
        use super::*;
        use std::sync::Arc;

        use sl_engine::{Catalog, ProjectDto, QualityGateDto};
        use sl_models::{Department, Label, Role, User};
        use sl_store::{shared, EntityStore, MemoryBackend};

        fn build_catalog() -> Catalog {
            let mut store = EntityStore::default();

            let mut dept = Department::new("Civil", "");
            dept.id = "dept_a".to_string();
            store.departments.push(dept);

            let mut label = Label::new("Groundworks", "", "#1f77b4", "dept_a");
            label.id = "label_a".to_string();
            store.labels.push(label);

            let mut user = User::new("Ada", "ada@example.com", Role::ProjectManager, "dept_a");
            user.id = "user_1".to_string();
            store.users.push(user);

            for n in 1..=5 {
                let mut def = MilestoneDefinition::new(
                    n,
                    format!("M{}", n),
                    "dept_a",
                    "label_a",
                );
                def.id = format!("ms_{}", n);
                store.milestones.push(def);
            }

            let catalog = Catalog::new(shared(store), Arc::new(MemoryBackend::new()));
            catalog.add_project(
                ProjectDto::named("Harbor extension")
                    .with_id("proj_1")
                    .with_milestones((1..=5).map(|n| format!("ms_{}", n)).collect()),
            );
            catalog.add_quality_gate(
                QualityGateDto::named("Final sign-off")
                    .with_id("qg_1")
                    .with_milestones((1..=5).map(|n| format!("ms_{}", n)).collect()),
            );
            catalog
        }

        #[test]
        fn test_toggle_save_reload_cycle() {
            let catalog = build_catalog();

            let schedule = {
                let store = catalog.store().read();
                GateSchedule::derive(
                    &store.quality_gates,
                    &store.quality_gate_milestones,
                    &store.milestones,
                )
            };
            assert_eq!(schedule.threshold_of("qg_1"), Some(5));

            let detail = catalog.get_project_by_id("proj_1").unwrap();
            let mut session = TimelineSession::new("proj_1", "dept_a", schedule);
            session.sync_milestones(&detail.milestones);
            session.seed_gates(&detail.quality_gates);

            for n in 1..=4 {
                assert!(session
                    .toggle_milestone(&format!("ms_{}", n), true)
                    .is_applied());
            }
            assert!(!session.toggle_gate("qg_1", true).is_applied());
            assert!(session.toggle_milestone("ms_5", true).is_applied());
            assert!(session.toggle_gate("qg_1", true).is_applied());
            assert!(!session.toggle_milestone("ms_3", false).is_applied());

            session.save(&catalog);

            // The store now reflects the committed snapshot.
            let detail = catalog.get_project_by_id("proj_1").unwrap();
            assert!(detail.milestones.iter().all(|pm| pm.link.is_completed()));
            let gate = &detail.quality_gates[0];
            assert_eq!(gate.status, sl_models::QualityGateStatus::Done);

            // A fresh session seeded from the store sees the same state.
            let schedule = GateSchedule::from_thresholds([("qg_1".to_string(), 5)]);
            let mut fresh = TimelineSession::new("proj_1", "dept_a", schedule);
            fresh.sync_milestones(&detail.milestones);
            fresh.seed_gates(&detail.quality_gates);
            assert!(fresh.is_milestone_checked("ms_5"));
            assert!(fresh.is_gate_checked("qg_1"));

            // Rejected toggles never reached the store: uncheck still blocked
            // after reload, and the rows stay completed.
            assert!(!fresh.toggle_milestone("ms_3", false).is_applied());
        }

        #[test]
        fn test_save_is_all_or_nothing_snapshot() {
            let catalog = build_catalog();
            let detail = catalog.get_project_by_id("proj_1").unwrap();

            let schedule = GateSchedule::from_thresholds([("qg_1".to_string(), 5)]);
            let mut session = TimelineSession::new("proj_1", "dept_a", schedule);
            session.sync_milestones(&detail.milestones);

            session.toggle_milestone("ms_1", true);
            session.toggle_milestone("ms_2", true);
            session.save(&catalog);

            // Toggles after save stay local until the next save.
            session.toggle_milestone("ms_2", false);
            let detail = catalog.get_project_by_id("proj_1").unwrap();
            let ms2 = detail
                .milestones
                .iter()
                .find(|pm| pm.link.milestone_id == "ms_2")
                .unwrap();
            assert!(ms2.link.is_completed());

            session.save(&catalog);
            let detail = catalog.get_project_by_id("proj_1").unwrap();
            let ms2 = detail
                .milestones
                .iter()
                .find(|pm| pm.link.milestone_id == "ms_2")
                .unwrap();
            assert!(!ms2.link.is_completed());
        }
    }
}
