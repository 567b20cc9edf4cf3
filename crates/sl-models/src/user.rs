//! User entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sl_core::traits::{Identifiable, Timestamped};
use sl_core::types::{fresh_id, Id};
use validator::Validate;

/// User role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    ProjectManager,
    Executive,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::ProjectManager => "project_manager",
            Self::Executive => "executive",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(Self::Admin),
            "project_manager" => Some(Self::ProjectManager),
            "executive" => Some(Self::Executive),
            _ => None,
        }
    }
}

/// A user who can be responsible for project milestones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct User {
    pub id: Id,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub role: Role,
    pub department_id: Id,
}

impl User {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        role: Role,
        department_id: impl Into<Id>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: fresh_id("user"),
            created_at: now,
            updated_at: now,
            name: name.into(),
            email: email.into(),
            role,
            department_id: department_id.into(),
        }
    }
}

impl Identifiable for User {
    fn id(&self) -> &Id {
        &self.id
    }
}

impl Timestamped for User {
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
