//! # sl-core
//!
//! Core types, traits, and utilities for Siteline.
//!
//! This crate provides the foundational building blocks used across all other crates:
//! - Common error types
//! - Core traits (Identifiable, Timestamped)
//! - Shared value types (ids, risk levels)
//! - Configuration types

pub mod config;
pub mod error;
pub mod traits;
pub mod types;

pub use config::*;
pub use error::*;
pub use traits::*;
pub use types::*;
