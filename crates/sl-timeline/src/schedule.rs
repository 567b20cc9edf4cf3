//! Gate schedule
//!
//! Maps each quality gate to the highest execution number it depends on
//! (its threshold). A threshold of 0 means the gate depends on nothing and
//! sits before every milestone.

use sl_core::types::Id;
use sl_models::{MilestoneDefinition, QualityGateDefinition, QualityGateMilestone};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateSlot {
    pub gate_id: Id,
    pub threshold: u32,
}

/// Ordered list of gate slots. Slot order is gate order: a gate must come
/// after every gate before it in this list, regardless of thresholds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GateSchedule {
    slots: Vec<GateSlot>,
}

impl GateSchedule {
    /// Build from an explicit (gate id, threshold) table, keeping the given
    /// order as gate order.
    pub fn from_thresholds(pairs: impl IntoIterator<Item = (Id, u32)>) -> Self {
        Self {
            slots: pairs
                .into_iter()
                .map(|(gate_id, threshold)| GateSlot { gate_id, threshold })
                .collect(),
        }
    }

    /// Derive the schedule from the gates' milestone links: a gate's
    /// threshold is the highest execution number among its linked
    /// milestones (disabled links and orphaned milestone ids ignored; no
    /// usable links means threshold 0). Gates are ordered by threshold,
    /// ties broken by id for determinism.
    pub fn derive(
        gates: &[QualityGateDefinition],
        links: &[QualityGateMilestone],
        milestones: &[MilestoneDefinition],
    ) -> Self {
        let mut slots: Vec<GateSlot> = gates
            .iter()
            .map(|gate| {
                let threshold = links
                    .iter()
                    .filter(|qgm| qgm.quality_gate_id == gate.id && !qgm.is_disabled)
                    .filter_map(|qgm| {
                        sl_core::traits::find_by_id(milestones, &qgm.milestone_id)
                            .map(|m| m.execution_number)
                    })
                    .max()
                    .unwrap_or(0);
                GateSlot {
                    gate_id: gate.id.clone(),
                    threshold,
                }
            })
            .collect();
        slots.sort_by(|a, b| {
            a.threshold
                .cmp(&b.threshold)
                .then_with(|| a.gate_id.cmp(&b.gate_id))
        });
        Self { slots }
    }

    pub fn slots(&self) -> &[GateSlot] {
        &self.slots
    }

    pub fn threshold_of(&self, gate_id: &str) -> Option<u32> {
        self.slots
            .iter()
            .find(|slot| slot.gate_id == gate_id)
            .map(|slot| slot.threshold)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
