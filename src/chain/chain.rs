//! The spell chain.
//!
//! A `Chain` is an ordered, sparse row of slots. Each slot owns at most one
//! spell. The chain grows one empty slot at a time and never shrinks.
//!
//! ## Invoke
//!
//! `invoke` folds the occupied slots left to right starting from zero, so
//! the order of spells matters:
//!
//! ```
//! use spell_chain::chain::Chain;
//!
//! let chain = Chain::empty_chain();
//! assert_eq!(chain.len(), 0);
//! assert_eq!(chain.invoke(), 0.0);
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::spells::{Effect, Spell, SpellId};

/// Slot storage. Chains rarely exceed a handful of slots since each one
/// costs ten times the last.
pub type Slots = SmallVec<[Option<Spell>; 4]>;

/// Ordered sequence of optional spells.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Chain {
    spells: Slots,
}

impl Chain {
    /// A chain with no slots.
    #[must_use]
    pub fn empty_chain() -> Self {
        Self::default()
    }

    /// A chain with `count` empty slots.
    #[must_use]
    pub fn with_slots(count: usize) -> Self {
        let mut chain = Self::empty_chain();
        for _ in 0..count {
            chain.append_slot();
        }
        chain
    }

    /// Number of slots, occupied or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.spells.len()
    }

    /// Whether the chain has no slots at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spells.is_empty()
    }

    /// All slots in order.
    #[must_use]
    pub fn spells(&self) -> &[Option<Spell>] {
        &self.spells
    }

    /// The spell at `slot`. Out-of-range reads are simply empty.
    #[must_use]
    pub fn get(&self, slot: usize) -> Option<&Spell> {
        self.spells.get(slot).and_then(Option::as_ref)
    }

    /// Occupied slots in order.
    pub fn occupied(&self) -> impl Iterator<Item = &Spell> {
        self.spells.iter().flatten()
    }

    /// Number of occupied slots.
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.occupied().count()
    }

    /// Index of the slot holding `id`.
    #[must_use]
    pub fn position_of(&self, id: SpellId) -> Option<usize> {
        self.spells
            .iter()
            .position(|s| s.as_ref().is_some_and(|spell| spell.id == id))
    }

    /// Append one empty slot.
    pub fn append_slot(&mut self) {
        self.spells.push(None);
    }

    /// Total yield of one pass through the chain.
    #[must_use]
    pub fn invoke(&self) -> f64 {
        let mut previous: Option<Effect> = None;
        let mut total = 0.0;
        for spell in self.occupied() {
            total = spell.effect.apply(total, previous);
            previous = Some(spell.effect);
        }
        total
    }

    /// Put `spell` into `slot`, returning whatever was there.
    ///
    /// The incoming spell's `slot` is set to `slot`; the displaced spell
    /// keeps its stale slot for the caller to fix. Caller guarantees
    /// `slot < len()`.
    pub(crate) fn put(&mut self, slot: usize, mut spell: Spell) -> Option<Spell> {
        spell.set_slot(Some(slot));
        self.spells[slot].replace(spell)
    }

    /// Take the spell out of `slot`, leaving it empty. The returned spell
    /// is marked unslotted.
    pub(crate) fn take(&mut self, slot: usize) -> Option<Spell> {
        let mut spell = self.spells.get_mut(slot)?.take()?;
        spell.set_slot(None);
        Some(spell)
    }

    /// Swap the contents of two slots, keeping every `slot` field in sync.
    /// Caller guarantees both indices are in range.
    pub(crate) fn swap(&mut self, a: usize, b: usize) {
        self.spells.swap(a, b);
        for index in [a, b] {
            if let Some(spell) = self.spells[index].as_mut() {
                spell.set_slot(Some(index));
            }
        }
    }
}
