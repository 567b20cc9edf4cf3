//! Common value types used throughout Siteline

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

/// Primary key type. Ids are opaque strings with a short kind prefix
/// (`proj_…`, `pm_…`, `pqg_…`) so a raw snapshot stays readable.
pub type Id = String;

/// Generate a fresh id for the given kind prefix.
pub fn fresh_id(prefix: &str) -> Id {
    format!("{}_{}", prefix, Uuid::new_v4().simple())
}

/// Risk level attached to quality-gate links, serialized as the integers
/// 1–3 used by the stored tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum RiskLevel {
    #[default]
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_u8(&self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
        }
    }

    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::Low),
            2 => Some(Self::Medium),
            3 => Some(Self::High),
            _ => None,
        }
    }
}

impl Serialize for RiskLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.as_u8())
    }
}

impl<'de> Deserialize<'de> for RiskLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = u8::deserialize(deserializer)?;
        Self::from_u8(value)
            .ok_or_else(|| serde::de::Error::custom(format!("risk level out of range: {}", value)))
    }
}
