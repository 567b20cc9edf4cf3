//! # sl-store
//!
//! The in-memory entity store and its persistence adapter.
//!
//! The store is a plain struct of flat tables; the whole struct is the
//! snapshot unit. Persistence is a synchronous key-value write behind the
//! [`SnapshotBackend`] trait, flushed after every mutation by the engine,
//! on a fixed autosave cadence by [`Autosave`], and once on session teardown.

pub mod autosave;
pub mod persistence;
pub mod session;
pub mod store;

pub use autosave::{Autosave, AutosaveHandle};
pub use persistence::{
    clear_snapshot, hydrate_store, save_store, FileBackend, MemoryBackend, SnapshotBackend,
};
pub use session::Session;
pub use store::{shared, EntityStore, SharedStore};
