//! Quality gate entity and derived status

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sl_core::traits::{Identifiable, Timestamped};
use sl_core::types::{fresh_id, Id};
use validator::Validate;

/// Derived completion status of a quality gate for one project.
///
/// Never stored: recomputed on every read from the project's milestone
/// completion and its `ProjectQualityGate` row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum QualityGateStatus {
    #[default]
    Pending,
    InProgress,
    Done,
}

impl QualityGateStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Done => "done",
        }
    }
}

/// A quality checkpoint gating progression through the milestone sequence.
///
/// Which milestones a gate depends on is recorded separately in
/// `QualityGateMilestone` link rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct QualityGateDefinition {
    pub id: Id,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hyperlink: Option<String>,
}

impl QualityGateDefinition {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: fresh_id("qg"),
            created_at: now,
            updated_at: now,
            name: name.into(),
            description: description.into(),
            hyperlink: None,
        }
    }
}

impl Identifiable for QualityGateDefinition {
    fn id(&self) -> &Id {
        &self.id
    }
}

impl Timestamped for QualityGateDefinition {
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
