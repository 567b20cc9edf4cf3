//! Department entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sl_core::traits::{Identifiable, Timestamped};
use sl_core::types::{fresh_id, Id};

/// A department owning milestones, labels, and users.
///
/// Departments are immutable reference data: they are seeded once and never
/// edited through the write surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Department {
    pub id: Id,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub name: String,
    pub description: String,
}

impl Department {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: fresh_id("dept"),
            created_at: now,
            updated_at: now,
            name: name.into(),
            description: description.into(),
        }
    }
}

impl Identifiable for Department {
    fn id(&self) -> &Id {
        &self.id
    }
}

impl Timestamped for Department {
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
