//! Spells - the units the player buys and arranges.
//!
//! A `Spell` is owned by exactly one place at a time: the pool or one chain
//! slot. Moving it transfers the value, so it can never be duplicated. Its
//! `slot` field mirrors where it lives and is only changed by the engine.

use serde::{Deserialize, Serialize};

use super::effect::Effect;
use super::element::SpellElement;
use super::rarity::Rarity;

/// Stable identity of a spell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SpellId(pub u32);

impl SpellId {
    /// Create a new spell ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// The ID following this one, or `None` once the id space is used up.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(raw) => Some(Self(raw)),
            None => None,
        }
    }
}

impl std::fmt::Display for SpellId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Spell({})", self.0)
    }
}

/// A spell owned by the player.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Spell {
    pub id: SpellId,
    pub name: String,
    pub rarity: Rarity,
    pub element: SpellElement,
    pub effect: Effect,
    /// Chain index this spell occupies, `None` while pooled.
    #[serde(default)]
    slot: Option<usize>,
}

impl Spell {
    /// Create an unslotted spell.
    #[must_use]
    pub fn new(
        id: SpellId,
        name: impl Into<String>,
        rarity: Rarity,
        element: SpellElement,
        effect: Effect,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            rarity,
            element,
            effect,
            slot: None,
        }
    }

    /// Chain index, or `None` if the spell is in the pool.
    #[must_use]
    pub fn slot(&self) -> Option<usize> {
        self.slot
    }

    /// Whether the spell currently sits in the chain.
    #[must_use]
    pub fn is_slotted(&self) -> bool {
        self.slot.is_some()
    }

    pub(crate) fn set_slot(&mut self, slot: Option<usize>) {
        self.slot = slot;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spell_id() {
        let id = SpellId::new(42);
        assert_eq!(id.raw(), 42);
        assert_eq!(id.next(), Some(SpellId(43)));
        assert_eq!(SpellId::new(u32::MAX).next(), None);
        assert_eq!(format!("{}", id), "Spell(42)");
    }

    #[test]
    fn test_new_spell_is_unslotted() {
        let spell = Spell::new(
            SpellId::new(1),
            "Small adder",
            Rarity::Common,
            SpellElement::Fire,
            Effect::Addition(2.0),
        );

        assert_eq!(spell.slot(), None);
        assert!(!spell.is_slotted());
        assert_eq!(spell.name, "Small adder");
    }

    #[test]
    fn test_missing_slot_deserializes_as_pooled() {
        let json = r#"{"id":3,"name":"Doubler","rarity":"Uncommon","element":"Water",
            "effect":{"Multiply":2.0}}"#;
        let spell: Spell = serde_json::from_str(json).unwrap();

        assert_eq!(spell.id, SpellId(3));
        assert_eq!(spell.slot(), None);
        assert_eq!(spell.effect, Effect::Multiply(2.0));
    }
}
