//! Core traits shared by all stored entities

use chrono::{DateTime, Utc};

use crate::types::Id;

/// Trait for rows that carry a primary key.
pub trait Identifiable {
    fn id(&self) -> &Id;
}

/// Trait for rows with `created_at` / `updated_at` columns.
pub trait Timestamped {
    fn created_at(&self) -> DateTime<Utc>;
    fn updated_at(&self) -> DateTime<Utc>;

    /// Bump `updated_at` after an in-place edit.
    fn touch(&mut self, now: DateTime<Utc>);
}

/// Find a row by primary key in a flat table slice.
pub fn find_by_id<'a, T: Identifiable>(rows: &'a [T], id: &str) -> Option<&'a T> {
    rows.iter().find(|row| row.id() == id)
}

/// Remove every row matching the given id. Returns whether anything was removed.
pub fn remove_by_id<T: Identifiable>(rows: &mut Vec<T>, id: &str) -> bool {
    let before = rows.len();
    rows.retain(|row| row.id() != id);
    rows.len() != before
}
