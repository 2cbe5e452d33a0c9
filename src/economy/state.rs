//! Economy state: the root aggregate.
//!
//! ## EconomyState
//!
//! Everything the player has accumulated:
//! - Mana, entropy, concentration
//! - The four costs (spell, minimal spell, entropy, slot)
//! - The chain and the pool of unplaced spells
//! - Registered dropzones
//!
//! Fields are readable through getters; only the engine writes them.

use serde::{Deserialize, Serialize};

use crate::chain::Chain;
use crate::spells::{Spell, SpellId};

/// Opaque drop-target handle registered by the UI.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dropzone(pub String);

impl Dropzone {
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }
}

/// Progression state.
#[derive(Clone, Debug, PartialEq)]
pub struct EconomyState {
    pub(crate) mana: f64,
    pub(crate) entropy: u32,
    /// Always in `[0, 100)` between operations.
    pub(crate) concentration: f64,

    pub(crate) spell_cost: f64,
    pub(crate) minimal_spell_cost: f64,
    pub(crate) entropy_cost: f64,
    pub(crate) slot_cost: f64,

    pub(crate) chain: Chain,
    /// Unplaced spells in acquisition order.
    pub(crate) pool: Vec<Spell>,
    pub(crate) dropzones: Vec<Dropzone>,
}

impl EconomyState {
    #[must_use]
    pub fn mana(&self) -> f64 {
        self.mana
    }

    #[must_use]
    pub fn entropy(&self) -> u32 {
        self.entropy
    }

    #[must_use]
    pub fn concentration(&self) -> f64 {
        self.concentration
    }

    #[must_use]
    pub fn spell_cost(&self) -> f64 {
        self.spell_cost
    }

    #[must_use]
    pub fn minimal_spell_cost(&self) -> f64 {
        self.minimal_spell_cost
    }

    #[must_use]
    pub fn entropy_cost(&self) -> f64 {
        self.entropy_cost
    }

    #[must_use]
    pub fn slot_cost(&self) -> f64 {
        self.slot_cost
    }

    #[must_use]
    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    /// Spells not placed in the chain.
    #[must_use]
    pub fn pool(&self) -> &[Spell] {
        &self.pool
    }

    #[must_use]
    pub fn dropzones(&self) -> &[Dropzone] {
        &self.dropzones
    }

    /// Every owned spell: the pool first, then the chain in slot order.
    pub fn spells(&self) -> impl Iterator<Item = &Spell> {
        self.pool.iter().chain(self.chain.occupied())
    }

    /// Number of owned spells.
    #[must_use]
    pub fn spell_count(&self) -> usize {
        self.pool.len() + self.chain.occupied_count()
    }

    /// Look up an owned spell wherever it lives.
    #[must_use]
    pub fn find_spell(&self, id: SpellId) -> Option<&Spell> {
        self.spells().find(|spell| spell.id == id)
    }

    /// Position of a pooled spell.
    pub(crate) fn pool_index(&self, id: SpellId) -> Option<usize> {
        self.pool.iter().position(|spell| spell.id == id)
    }

    /// Check the pool/chain partition.
    ///
    /// Every pooled spell is unslotted, every chained spell records its own
    /// index, and no id appears twice.
    pub fn check_partition(&self) -> Result<(), String> {
        let mut seen = rustc_hash::FxHashSet::default();

        for spell in &self.pool {
            if let Some(slot) = spell.slot() {
                return Err(format!("{} is pooled but records slot {slot}", spell.id));
            }
            if !seen.insert(spell.id) {
                return Err(format!("{} is owned twice", spell.id));
            }
        }

        for (index, entry) in self.chain.spells().iter().enumerate() {
            let Some(spell) = entry else { continue };
            if spell.slot() != Some(index) {
                return Err(format!(
                    "{} sits in slot {index} but records {:?}",
                    spell.id,
                    spell.slot()
                ));
            }
            if !seen.insert(spell.id) {
                return Err(format!("{} is owned twice", spell.id));
            }
        }

        Ok(())
    }
}
