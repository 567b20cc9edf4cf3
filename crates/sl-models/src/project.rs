//! Project entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sl_core::traits::{Identifiable, Timestamped};
use sl_core::types::{fresh_id, Id};
use validator::Validate;

/// A construction project tracked against the shared milestone sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Project {
    pub id: Id,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub description: String,
    /// Count of milestones linked to this project.
    pub milestone_count: u32,
    /// Set when the project is closed; `None` means active.
    pub closed_at: Option<DateTime<Utc>>,
}

impl Project {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: fresh_id("proj"),
            created_at: now,
            updated_at: now,
            name: name.into(),
            description: description.into(),
            milestone_count: 0,
            closed_at: None,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed_at.is_some()
    }
}

impl Identifiable for Project {
    fn id(&self) -> &Id {
        &self.id
    }
}

impl Timestamped for Project {
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
