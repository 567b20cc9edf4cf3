//! # sl-timeline
//!
//! The sequential completion state machine.
//!
//! Milestones and quality gates form one interleaved sequence ordered by
//! execution number and gate threshold. A toggle is legal only if it keeps
//! the checked set a prefix of that sequence: checking an item requires its
//! immediate predecessor to be checked, unchecking requires its immediate
//! successor to be unchecked. Illegal toggles are rejected, logged, and
//! leave state untouched.
//!
//! Edits accumulate in a [`TimelineSession`] working copy and are committed
//! all at once through the engine's bulk completion setters.

pub mod schedule;
pub mod sequence;
pub mod session;

pub use schedule::{GateSchedule, GateSlot};
pub use sequence::{InterleavedSequence, SequenceItem};
pub use session::{TimelineSession, ToggleOutcome};
