//! Label entity

use serde::{Deserialize, Serialize};
use sl_core::traits::Identifiable;
use sl_core::types::{fresh_id, Id};

/// A label grouping milestones into visual tracks within a department.
///
/// This is the rich label variant: it carries a display color and owns a
/// description. Labels have no timestamps; like departments they are
/// reference data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub id: Id,
    pub name: String,
    pub description: String,
    pub color: String,
    pub department_id: Id,
}

impl Label {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        color: impl Into<String>,
        department_id: impl Into<Id>,
    ) -> Self {
        Self {
            id: fresh_id("label"),
            name: name.into(),
            description: description.into(),
            color: color.into(),
            department_id: department_id.into(),
        }
    }
}

impl Identifiable for Label {
    fn id(&self) -> &Id {
        &self.id
    }
}
