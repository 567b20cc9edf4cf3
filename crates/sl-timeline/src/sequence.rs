//! The interleaved sequence
//!
//! Merges a scope's milestones (ascending execution number) with the gate
//! schedule: a gate with threshold T sits immediately after the last
//! milestone with execution number ≤ T, and after every gate earlier in the
//! schedule. This single total order is what the toggle rules walk.

use sl_core::types::Id;

use crate::schedule::GateSchedule;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SequenceItem {
    Milestone(Id),
    Gate(Id),
}

impl SequenceItem {
    pub fn describe(&self) -> String {
        match self {
            Self::Milestone(id) => format!("milestone {}", id),
            Self::Gate(id) => format!("quality gate {}", id),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterleavedSequence {
    items: Vec<SequenceItem>,
}

impl InterleavedSequence {
    /// Build the total order from (milestone id, execution number) pairs and
    /// the gate schedule.
    pub fn build(milestones: &[(Id, u32)], schedule: &GateSchedule) -> Self {
        let mut sorted: Vec<(Id, u32)> = milestones.to_vec();
        sorted.sort_by_key(|(_, number)| *number);

        let mut items = Vec::with_capacity(sorted.len() + schedule.len());
        let mut next = 0;
        for slot in schedule.slots() {
            while next < sorted.len() && sorted[next].1 <= slot.threshold {
                items.push(SequenceItem::Milestone(sorted[next].0.clone()));
                next += 1;
            }
            items.push(SequenceItem::Gate(slot.gate_id.clone()));
        }
        while next < sorted.len() {
            items.push(SequenceItem::Milestone(sorted[next].0.clone()));
            next += 1;
        }

        Self { items }
    }

    pub fn items(&self) -> &[SequenceItem] {
        &self.items
    }

    pub fn position(&self, item: &SequenceItem) -> Option<usize> {
        self.items.iter().position(|i| i == item)
    }

    pub fn predecessor(&self, position: usize) -> Option<&SequenceItem> {
        position.checked_sub(1).and_then(|p| self.items.get(p))
    }

    pub fn successor(&self, position: usize) -> Option<&SequenceItem> {
        self.items.get(position + 1)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
