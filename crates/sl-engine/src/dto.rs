//! Write DTOs
//!
//! Incoming shapes for the add/edit operations. A DTO may carry an inline
//! milestone id list; when present the engine replaces the corresponding
//! link rows wholesale.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use sl_core::types::Id;
use validator::Validate;

/// Payload for `add_project` / `edit_project`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ProjectDto {
    /// Target id. Absent on add means a fresh id; required for edit.
    pub id: Option<Id>,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Explicit count, used only when no inline milestone list is given.
    pub milestone_count: Option<u32>,
    pub closed_at: Option<DateTime<Utc>>,
    /// Inline milestone definition ids to link to the project.
    pub milestones: Option<Vec<Id>>,
}

impl ProjectDto {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<Id>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_milestones(mut self, milestones: Vec<Id>) -> Self {
        self.milestones = Some(milestones);
        self
    }
}

/// Payload for `add_quality_gate` / `edit_quality_gate`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct QualityGateDto {
    pub id: Option<Id>,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub hyperlink: Option<String>,
    /// Inline milestone definition ids the gate depends on.
    pub milestones: Option<Vec<Id>>,
}

impl QualityGateDto {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<Id>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_milestones(mut self, milestones: Vec<Id>) -> Self {
        self.milestones = Some(milestones);
        self
    }
}
