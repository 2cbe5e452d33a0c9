//! The save record.
//!
//! `SaveFile` is the flat snapshot written to storage:
//!
//! ```json
//! { "version": 1, "spells": [...], "chain": { "spells": [null, {...}] },
//!   "mana": 0, "entropy": 1, "slotCost": 100, "spellCost": 10,
//!   "entropyCost": 100, "minimalSpellCost": 10, "rng": {...} }
//! ```
//!
//! `spells` lists every owned spell; each chain entry repeats the spell of
//! the same id. Decoding only checks the shape. `validate` checks that the
//! record describes a state the engine could have reached before it is
//! allowed to replace anything.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::chain::Chain;
use crate::core::{EconomyConfig, GameRng, GameRngState, SaveError};
use crate::economy::EconomyState;
use crate::spells::{Spell, SpellId};

/// Storage key the economy is saved under.
pub const SAVE_KEY: &str = "saveFile";

/// Newest record version this build reads and the one it writes.
pub const SAVE_VERSION: u32 = 1;

fn default_version() -> u32 {
    SAVE_VERSION
}

/// Byte encoding of a `SaveFile`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SaveCodec {
    /// JSON text; what `Economy::save` writes.
    #[default]
    Json,
    /// Compact bincode snapshot.
    Binary,
}

/// Result of a load that didn't fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Nothing was stored; the state is unchanged.
    NoSave,
    /// The state was replaced from storage.
    Loaded,
}

/// Flat snapshot of the economy.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveFile {
    /// Absent in records written before versioning; read as version 1.
    #[serde(default = "default_version")]
    pub version: u32,
    pub spells: Vec<Spell>,
    pub chain: Chain,
    pub mana: f64,
    pub entropy: u32,
    pub slot_cost: f64,
    pub spell_cost: f64,
    pub entropy_cost: f64,
    pub minimal_spell_cost: f64,
    /// RNG position so a loaded game keeps rolling the same spells.
    #[serde(default)]
    pub rng: Option<GameRngState>,
}

impl SaveFile {
    /// Snapshot a state.
    #[must_use]
    pub fn capture(state: &EconomyState, rng: &GameRng) -> Self {
        Self {
            version: SAVE_VERSION,
            spells: state.spells().cloned().collect(),
            chain: state.chain().clone(),
            mana: state.mana(),
            entropy: state.entropy(),
            slot_cost: state.slot_cost(),
            spell_cost: state.spell_cost(),
            entropy_cost: state.entropy_cost(),
            minimal_spell_cost: state.minimal_spell_cost(),
            rng: Some(rng.state()),
        }
    }

    /// Encode to bytes.
    pub fn encode(&self, codec: SaveCodec) -> Result<Vec<u8>, SaveError> {
        match codec {
            SaveCodec::Json => serde_json::to_vec(self).map_err(encode_error),
            SaveCodec::Binary => bincode::serialize(self).map_err(encode_error),
        }
    }

    /// Decode from bytes and check the version.
    ///
    /// Only the shape is checked here; call `validate` before trusting the
    /// contents.
    pub fn decode(bytes: &[u8], codec: SaveCodec) -> Result<Self, SaveError> {
        let save: Self = match codec {
            SaveCodec::Json => serde_json::from_slice(bytes).map_err(decode_error)?,
            SaveCodec::Binary => bincode::deserialize(bytes).map_err(decode_error)?,
        };

        if save.version > SAVE_VERSION {
            return Err(SaveError::UnsupportedVersion {
                found: save.version,
                supported: SAVE_VERSION,
            });
        }
        Ok(save)
    }

    /// Check that the record describes a reachable state.
    ///
    /// - Every amount is finite and non-negative, entropy is at least 1
    /// - The spell cost floor matches entropy and the spell cost respects it
    /// - Spell ids are unique
    /// - Every effect is the one its element and rarity roll, or belongs to
    ///   a configured starter spell
    /// - Chain entries match their spell in `spells` and record their own
    ///   index; every slotted spell is in the chain exactly once
    pub fn validate(&self, config: &EconomyConfig) -> Result<(), SaveError> {
        let amounts = [
            ("mana", self.mana),
            ("slotCost", self.slot_cost),
            ("spellCost", self.spell_cost),
            ("entropyCost", self.entropy_cost),
            ("minimalSpellCost", self.minimal_spell_cost),
        ];
        for (field, value) in amounts {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(format!("{field} is {value}")));
            }
        }

        if self.entropy == 0 {
            return Err(invalid("entropy is 0".to_string()));
        }

        let floor = config.minimal_spell_cost_for(self.entropy);
        if !approx_eq(self.minimal_spell_cost, floor) {
            return Err(invalid(format!(
                "minimalSpellCost {} does not match entropy {} (expected {floor})",
                self.minimal_spell_cost, self.entropy
            )));
        }
        if self.spell_cost < self.minimal_spell_cost {
            return Err(invalid(format!(
                "spellCost {} is below minimalSpellCost {}",
                self.spell_cost, self.minimal_spell_cost
            )));
        }

        let mut by_id: FxHashMap<SpellId, &Spell> = FxHashMap::default();
        for spell in &self.spells {
            if by_id.insert(spell.id, spell).is_some() {
                return Err(invalid(format!("{} appears twice in spells", spell.id)));
            }
            if !spell.effect.is_finite() {
                return Err(invalid(format!("{} has a non-finite effect", spell.id)));
            }
            if !effect_is_known(spell, config) {
                return Err(invalid(format!(
                    "{} has effect {} which no {} {} spell can have",
                    spell.id, spell.effect, spell.rarity, spell.element
                )));
            }
        }

        let mut chained: FxHashSet<SpellId> = FxHashSet::default();
        for (index, entry) in self.chain.spells().iter().enumerate() {
            let Some(spell) = entry else { continue };
            if spell.slot() != Some(index) {
                return Err(invalid(format!(
                    "{} sits in chain slot {index} but records {:?}",
                    spell.id,
                    spell.slot()
                )));
            }
            match by_id.get(&spell.id) {
                Some(&listed) if listed == spell => {}
                Some(_) => {
                    return Err(invalid(format!("chain slot {index} disagrees with {}", spell.id)));
                }
                None => {
                    return Err(invalid(format!("chain slot {index} holds unlisted {}", spell.id)));
                }
            }
            if !chained.insert(spell.id) {
                return Err(invalid(format!("{} is in more than one slot", spell.id)));
            }
        }

        for spell in &self.spells {
            if spell.slot().is_some() && !chained.contains(&spell.id) {
                return Err(invalid(format!(
                    "{} records slot {:?} but is not in the chain",
                    spell.id,
                    spell.slot()
                )));
            }
        }

        Ok(())
    }
}

/// Whether `spell` could have been rolled or handed out at the start.
fn effect_is_known(spell: &Spell, config: &EconomyConfig) -> bool {
    spell.effect == spell.element.effect_for(spell.rarity)
        || config.starter_spells.iter().any(|starter| {
            starter.name == spell.name
                && starter.rarity == spell.rarity
                && starter.element == spell.element
                && starter.effect == spell.effect
        })
}

fn encode_error(err: impl std::fmt::Display) -> SaveError {
    SaveError::Encode(err.to_string())
}

fn decode_error(err: impl std::fmt::Display) -> SaveError {
    SaveError::Decode(err.to_string())
}

fn invalid(reason: String) -> SaveError {
    SaveError::Invalid(reason)
}

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * b.abs().max(1.0)
}
