//! Spell model: identity, rarity, element, effect and generation.
//!
//! ## Key Types
//!
//! - `Spell`: A spell owned by the player, pooled or slotted
//! - `SpellId`: Stable identity used to address a spell in operations
//! - `Rarity`: Ordered tier table (weight and power per tier)
//! - `SpellElement`: Fixed enumeration choosing the effect kind
//! - `Effect`: How a spell transforms the chain's running yield
//! - `SpellFactory`: Rolls new spells

pub mod effect;
pub mod element;
pub mod factory;
pub mod rarity;
pub mod spell;

pub use effect::Effect;
pub use element::SpellElement;
pub use factory::SpellFactory;
pub use rarity::Rarity;
pub use spell::{Spell, SpellId};
