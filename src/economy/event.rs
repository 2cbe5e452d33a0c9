//! Change events.
//!
//! The engine never notifies anyone while it mutates. Each successful
//! operation appends an `EconomyEvent` to a pending queue, and observers
//! (a UI binding, an autosave timer) drain that queue after dispatching.

use serde::{Deserialize, Serialize};

use crate::spells::SpellId;

/// Something that changed in the economy.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum EconomyEvent {
    /// External income was credited.
    ManaAdded { amount: f64 },

    /// Concentration crossed one or more multiples of 100.
    ConcentrationPayout { ticks: u32, mana: f64 },

    /// A spell was bought into the pool.
    SpellPurchased { spell: SpellId, cost: f64 },

    /// The chain grew by one slot.
    SlotPurchased { slots: usize, cost: f64 },

    /// Entropy went up by one.
    EntropyIncreased { entropy: u32, cost: f64 },

    /// The spell cost decayed toward its floor.
    SpellCostDecayed { spell_cost: f64 },

    /// A spell changed location. `None` means the pool.
    SpellMoved {
        spell: SpellId,
        from: Option<usize>,
        to: Option<usize>,
        displaced: Option<SpellId>,
    },

    /// A drop target was registered.
    DropzoneAdded { index: usize },

    /// The state was written to storage.
    Saved,

    /// The state was replaced from storage.
    Loaded,
}

impl EconomyEvent {
    /// Whether this event changed the mana balance.
    #[must_use]
    pub fn touches_mana(&self) -> bool {
        matches!(
            self,
            EconomyEvent::ManaAdded { .. }
                | EconomyEvent::ConcentrationPayout { .. }
                | EconomyEvent::SpellPurchased { .. }
                | EconomyEvent::SlotPurchased { .. }
                | EconomyEvent::EntropyIncreased { .. }
                | EconomyEvent::Loaded
        )
    }

    /// Whether this event changed chain layout or pool contents.
    #[must_use]
    pub fn touches_spells(&self) -> bool {
        matches!(
            self,
            EconomyEvent::SpellPurchased { .. }
                | EconomyEvent::SlotPurchased { .. }
                | EconomyEvent::SpellMoved { .. }
                | EconomyEvent::Loaded
        )
    }
}
