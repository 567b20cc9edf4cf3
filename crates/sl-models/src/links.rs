//! Join entities
//!
//! Flat link rows tying projects, milestones, and quality gates together.
//! Enrichment tolerates partial referential integrity: a link whose parent
//! was deleted is silently dropped on read, so none of these rows enforce
//! foreign keys themselves.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sl_core::traits::{Identifiable, Timestamped};
use sl_core::types::{fresh_id, Id, RiskLevel};

/// One milestone slot of one project. At most one row exists per
/// (project, milestone) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectMilestone {
    pub id: Id,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub project_id: Id,
    pub milestone_id: Id,
    /// Set when the milestone is done for this project; `None` = not done.
    pub completed_at: Option<DateTime<Utc>>,
    pub responsible_person_id: Id,
    pub risklevel: Option<RiskLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_disabled: Option<bool>,
}

impl ProjectMilestone {
    /// Create a fresh, uncompleted link row.
    pub fn link(
        project_id: impl Into<Id>,
        milestone_id: impl Into<Id>,
        responsible_person_id: impl Into<Id>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: fresh_id("pm"),
            created_at: now,
            updated_at: now,
            project_id: project_id.into(),
            milestone_id: milestone_id.into(),
            completed_at: None,
            responsible_person_id: responsible_person_id.into(),
            risklevel: None,
            is_disabled: None,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }
}

impl Identifiable for ProjectMilestone {
    fn id(&self) -> &Id {
        &self.id
    }
}

impl Timestamped for ProjectMilestone {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}

/// Declares that a quality gate depends on a milestone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityGateMilestone {
    pub id: Id,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub quality_gate_id: Id,
    pub milestone_id: Id,
    pub is_disabled: bool,
    pub risklevel: Option<RiskLevel>,
}

impl QualityGateMilestone {
    pub fn link(quality_gate_id: impl Into<Id>, milestone_id: impl Into<Id>) -> Self {
        let now = Utc::now();
        Self {
            id: fresh_id("qgm"),
            created_at: now,
            updated_at: now,
            quality_gate_id: quality_gate_id.into(),
            milestone_id: milestone_id.into(),
            is_disabled: false,
            risklevel: None,
        }
    }
}

impl Identifiable for QualityGateMilestone {
    fn id(&self) -> &Id {
        &self.id
    }
}

impl Timestamped for QualityGateMilestone {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}

/// Per-project completion record for a quality gate, separate from milestone
/// completion. Created lazily on the first completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectQualityGate {
    pub id: Id,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub project_id: Id,
    pub quality_gate_id: Id,
    pub completed_at: Option<DateTime<Utc>>,
    pub risklevel: Option<RiskLevel>,
}

impl ProjectQualityGate {
    pub fn link(project_id: impl Into<Id>, quality_gate_id: impl Into<Id>) -> Self {
        let now = Utc::now();
        Self {
            id: fresh_id("pqg"),
            created_at: now,
            updated_at: now,
            project_id: project_id.into(),
            quality_gate_id: quality_gate_id.into(),
            completed_at: None,
            risklevel: None,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }
}

impl Identifiable for ProjectQualityGate {
    fn id(&self) -> &Id {
        &self.id
    }
}

impl Timestamped for ProjectQualityGate {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}
