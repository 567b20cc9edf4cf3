//! # sl-models
//!
//! Entity types for Siteline's flat relational-style tables.
//!
//! Every type here is a plain stored row. Nested view objects (project with
//! its milestones, gate with its status) are never stored; they are built on
//! demand by `sl-engine`.

pub mod department;
pub mod label;
pub mod links;
pub mod milestone;
pub mod project;
pub mod quality_gate;
pub mod user;

pub use department::Department;
pub use label::Label;
pub use links::{ProjectMilestone, ProjectQualityGate, QualityGateMilestone};
pub use milestone::MilestoneDefinition;
pub use project::Project;
pub use quality_gate::{QualityGateDefinition, QualityGateStatus};
pub use user::{Role, User};
