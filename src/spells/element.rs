//! Spell elements.

use serde::{Deserialize, Serialize};

use super::effect::Effect;
use super::rarity::Rarity;

/// Categorical tag deciding which kind of effect a spell has.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpellElement {
    /// Flat additions.
    Fire,
    /// Multipliers.
    Water,
    /// Invokers that repeat their predecessor.
    Air,
}

impl SpellElement {
    pub const ALL: [SpellElement; 3] = [SpellElement::Fire, SpellElement::Water, SpellElement::Air];

    /// Base effect of a spell of this element at the given rarity.
    #[must_use]
    pub fn effect_for(self, rarity: Rarity) -> Effect {
        let power = rarity.power();
        match self {
            SpellElement::Fire => Effect::Addition(2.0 * power),
            SpellElement::Water => Effect::Multiply(1.0 + power / 2.0),
            SpellElement::Air => Effect::Invoke {
                repeats: 1 + u32::from(rarity.tier()) / 2,
            },
        }
    }
}

impl std::fmt::Display for SpellElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SpellElement::Fire => "Fire",
            SpellElement::Water => "Water",
            SpellElement::Air => "Air",
        };
        f.write_str(name)
    }
}
