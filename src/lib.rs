//! # spell-chain
//!
//! Progression economy engine for an idle spell-chaining game.
//!
//! The player gathers mana by concentrating (passively over time, or by
//! clicking), spends it on new spells, extra chain slots and entropy, and
//! arranges spells in a chain whose order decides how much mana each
//! concentration payout is worth.
//!
//! ## Design Principles
//!
//! 1. **Single writer**: `Economy` owns the state. Every change goes
//!    through one of its `&mut self` operations; everyone else reads.
//!
//! 2. **Silent purchases**: Buying without enough mana is a no-op, not an
//!    error. Callers check `can_afford_*` if they want to grey out buttons.
//!
//! 3. **Ownership as invariant**: A spell value lives in the pool or in one
//!    chain slot. Moving it moves the value, so it can't be duplicated.
//!
//! 4. **Mutate, then notify**: Operations queue `EconomyEvent`s; observers
//!    drain them afterwards.
//!
//! ## Modules
//!
//! - `core`: RNG, configuration, error types
//! - `spells`: Spell model, rarity table, elements, effects, factory
//! - `chain`: Slot sequence and its `invoke` yield
//! - `economy`: State, engine operations, change events
//! - `save`: Save record, codecs, storage backends

pub mod chain;
pub mod core;
pub mod economy;
pub mod save;
pub mod spells;

// Re-export commonly used types
pub use crate::core::{
    ConfigError, EconomyConfig, GameRng, GameRngState, MoveError, SaveError, StarterSpell,
    StorageError,
};

pub use crate::spells::{Effect, Rarity, Spell, SpellElement, SpellFactory, SpellId};

pub use crate::chain::Chain;

pub use crate::economy::{Dropzone, Economy, EconomyEvent, EconomyState};

pub use crate::save::{
    FileStorage, LoadOutcome, MemoryStorage, SaveCodec, SaveFile, SaveStorage, SAVE_KEY,
    SAVE_VERSION,
};
