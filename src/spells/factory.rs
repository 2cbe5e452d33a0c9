//! Spell generation.

use crate::core::GameRng;

use super::element::SpellElement;
use super::rarity::Rarity;
use super::spell::{Spell, SpellId};

/// Rolls new spells.
///
/// Pure construction: the factory never touches mana or costs, buying is
/// the engine's job.
#[derive(Clone, Copy, Debug, Default)]
pub struct SpellFactory;

impl SpellFactory {
    /// Roll a fresh, unslotted spell no rarer than `maximum_rarity`.
    ///
    /// Rarity is weighted by the tier table among the allowed tiers; the
    /// element is uniform.
    pub fn generate_spell(rng: &mut GameRng, maximum_rarity: Rarity, id: SpellId) -> Spell {
        let allowed = maximum_rarity.up_to();
        let weights: Vec<f32> = allowed.iter().map(|r| r.weight()).collect();
        let rarity = rng
            .choose_weighted(&weights)
            .map_or(Rarity::Common, |i| allowed[i]);
        let element = rng
            .choose(&SpellElement::ALL)
            .copied()
            .unwrap_or(SpellElement::Fire);

        Spell::new(
            id,
            format!("{rarity} {element} spell"),
            rarity,
            element,
            element.effect_for(rarity),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_spell_is_unslotted() {
        let mut rng = GameRng::new(42);
        let spell = SpellFactory::generate_spell(&mut rng, Rarity::Legendary, SpellId::new(9));

        assert_eq!(spell.id, SpellId::new(9));
        assert_eq!(spell.slot(), None);
        assert_eq!(spell.effect, spell.element.effect_for(spell.rarity));
        assert_eq!(spell.name, format!("{} {} spell", spell.rarity, spell.element));
    }

    #[test]
    fn test_rarity_respects_maximum() {
        let mut rng = GameRng::new(7);
        for i in 0..200 {
            let spell = SpellFactory::generate_spell(&mut rng, Rarity::Uncommon, SpellId::new(i));
            assert!(spell.rarity <= Rarity::Uncommon);
        }

        for i in 0..50 {
            let spell = SpellFactory::generate_spell(&mut rng, Rarity::Common, SpellId::new(i));
            assert_eq!(spell.rarity, Rarity::Common);
        }
    }

    #[test]
    fn test_all_elements_show_up() {
        let mut rng = GameRng::new(3);
        let elements: Vec<_> = (0..300)
            .map(|i| {
                SpellFactory::generate_spell(&mut rng, Rarity::Common, SpellId::new(i)).element
            })
            .collect();

        for element in SpellElement::ALL {
            assert!(elements.contains(&element));
        }
    }

    #[test]
    fn test_same_seed_same_spell() {
        let mut a = GameRng::new(11);
        let mut b = GameRng::new(11);

        let spell_a = SpellFactory::generate_spell(&mut a, Rarity::Epic, SpellId::new(1));
        let spell_b = SpellFactory::generate_spell(&mut b, Rarity::Epic, SpellId::new(1));

        assert_eq!(spell_a, spell_b);
    }
}
