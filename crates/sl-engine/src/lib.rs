//! # sl-engine
//!
//! The join/derivation engine: translates the flat tables of the entity
//! store into the nested view objects the UI and the completion state
//! machine consume, and performs the writes that keep the join tables
//! consistent.
//!
//! Reads have no side effects and recompute status/risk on every call.
//! Writes finish with a best-effort snapshot flush.

pub mod catalog;
pub mod dto;
pub mod projects;
pub mod quality_gates;
pub mod views;

#[cfg(test)]
pub(crate) mod testutil;

pub use catalog::Catalog;
pub use dto::{ProjectDto, QualityGateDto};
pub use views::{
    MilestoneView, ProjectDetail, ProjectMilestoneView, ProjectSummary, QualityGateView,
};
