//! Milestone definition entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sl_core::traits::{Identifiable, Timestamped};
use sl_core::types::{fresh_id, Id};
use validator::Validate;

/// A milestone definition shared by all projects.
///
/// `execution_number` is the globally unique, monotonic ordering key. Every
/// sequencing rule in the completion state machine is expressed against it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct MilestoneDefinition {
    pub id: Id,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Global ordering key, starting at 1.
    pub execution_number: u32,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub description: String,
    pub department_id: Id,
    pub label_id: Id,
    /// Index of the quality gate this milestone sits behind. 0 = none.
    pub previous_quality_gate: u32,
    pub recurring: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hyperlink: Option<String>,
}

impl MilestoneDefinition {
    pub fn new(
        execution_number: u32,
        name: impl Into<String>,
        department_id: impl Into<Id>,
        label_id: impl Into<Id>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: fresh_id("ms"),
            created_at: now,
            updated_at: now,
            execution_number,
            name: name.into(),
            description: String::new(),
            department_id: department_id.into(),
            label_id: label_id.into(),
            previous_quality_gate: 0,
            recurring: false,
            hyperlink: None,
        }
    }
}

impl Identifiable for MilestoneDefinition {
    fn id(&self) -> &Id {
        &self.id
    }
}

impl Timestamped for MilestoneDefinition {
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
