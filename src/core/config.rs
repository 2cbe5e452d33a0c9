//! Economy configuration.
//!
//! Every tunable number of the progression curve lives in `EconomyConfig`:
//! starting costs, growth factors, decay rate, concentration rates and the
//! starter spells. The defaults reproduce the stock game; balancing runs
//! override individual fields with the `with_*` builders or from JSON.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use crate::spells::{Effect, Rarity, SpellElement};

/// Growth factor applied to the spell cost on each purchase.
pub const SPELL_COST_INCREASE: f64 = 1.6;
/// Growth factor applied to the slot cost on each purchase.
pub const SLOT_COST_INCREASE: f64 = 10.0;
/// Growth factor applied to the entropy cost on each purchase.
pub const ENTROPY_COST_INCREASE: f64 = 1.5;
/// Spell cost floor per point of entropy.
pub const MINIMAL_SPELL_COST_PER_ENTROPY: f64 = 10.0;
/// Fraction of the spell cost shed per unit of elapsed time.
pub const SPELL_COST_DECAY: f64 = 0.15;
/// Concentration gained per unit of elapsed time.
pub const CONCENTRATION_RATE: f64 = 20.0;
/// Concentration gained per click.
pub const MANUAL_CONCENTRATION: f64 = 7.0;

/// A spell the player starts with.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StarterSpell {
    pub name: String,
    pub rarity: Rarity,
    pub element: SpellElement,
    pub effect: Effect,
}

impl StarterSpell {
    /// Create a starter spell definition.
    pub fn new(
        name: impl Into<String>,
        rarity: Rarity,
        element: SpellElement,
        effect: Effect,
    ) -> Self {
        Self {
            name: name.into(),
            rarity,
            element,
            effect,
        }
    }
}

/// Complete economy configuration.
///
/// ## Example
///
/// ```
/// use spell_chain::core::EconomyConfig;
///
/// let config = EconomyConfig::default()
///     .with_initial_mana(500.0)
///     .with_seed(7);
///
/// assert_eq!(config.initial_mana, 500.0);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyConfig {
    pub initial_mana: f64,
    pub initial_entropy: u32,
    pub initial_spell_cost: f64,
    pub initial_entropy_cost: f64,
    pub initial_slot_cost: f64,

    /// Empty slots the chain starts with.
    pub initial_slots: usize,

    pub spell_cost_increase: f64,
    pub slot_cost_increase: f64,
    pub entropy_cost_increase: f64,
    pub minimal_spell_cost_per_entropy: f64,
    pub spell_cost_decay: f64,
    pub concentration_rate: f64,
    pub manual_concentration: f64,

    pub starter_spells: Vec<StarterSpell>,

    /// RNG seed. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            initial_mana: 0.0,
            initial_entropy: 1,
            initial_spell_cost: 10.0,
            initial_entropy_cost: 100.0,
            initial_slot_cost: 100.0,
            initial_slots: 1,
            spell_cost_increase: SPELL_COST_INCREASE,
            slot_cost_increase: SLOT_COST_INCREASE,
            entropy_cost_increase: ENTROPY_COST_INCREASE,
            minimal_spell_cost_per_entropy: MINIMAL_SPELL_COST_PER_ENTROPY,
            spell_cost_decay: SPELL_COST_DECAY,
            concentration_rate: CONCENTRATION_RATE,
            manual_concentration: MANUAL_CONCENTRATION,
            starter_spells: default_starter_spells(),
            seed: None,
        }
    }
}

fn default_starter_spells() -> Vec<StarterSpell> {
    vec![
        StarterSpell::new("Small adder", Rarity::Common, SpellElement::Fire, Effect::Addition(2.0)),
        StarterSpell::new("Doubler", Rarity::Uncommon, SpellElement::Water, Effect::Multiply(2.0)),
        StarterSpell::new("Tripler", Rarity::Rare, SpellElement::Water, Effect::Multiply(3.0)),
        StarterSpell::new("Invoker", Rarity::Common, SpellElement::Air, Effect::invoke()),
    ]
}

impl EconomyConfig {
    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Spell cost floor at the given entropy.
    #[must_use]
    pub fn minimal_spell_cost_for(&self, entropy: u32) -> f64 {
        f64::from(entropy) * self.minimal_spell_cost_per_entropy
    }

    /// Check that the numbers describe a playable economy.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let amounts = [
            ("initial_mana", self.initial_mana),
            ("initial_spell_cost", self.initial_spell_cost),
            ("initial_entropy_cost", self.initial_entropy_cost),
            ("initial_slot_cost", self.initial_slot_cost),
            ("minimal_spell_cost_per_entropy", self.minimal_spell_cost_per_entropy),
            ("spell_cost_decay", self.spell_cost_decay),
            ("concentration_rate", self.concentration_rate),
            ("manual_concentration", self.manual_concentration),
        ];
        for (field, value) in amounts {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::NegativeOrNonFinite { field, value });
            }
        }

        let growth = [
            ("spell_cost_increase", self.spell_cost_increase),
            ("slot_cost_increase", self.slot_cost_increase),
            ("entropy_cost_increase", self.entropy_cost_increase),
        ];
        for (field, value) in growth {
            if !value.is_finite() || value < 1.0 {
                return Err(ConfigError::ShrinkingGrowth { field, value });
            }
        }

        if self.initial_entropy == 0 {
            return Err(ConfigError::ZeroEntropy);
        }

        for starter in &self.starter_spells {
            if !starter.effect.is_finite() {
                return Err(ConfigError::StarterSpell(
                    starter.name.clone(),
                    "effect magnitude is not finite".to_string(),
                ));
            }
        }

        Ok(())
    }

    #[must_use]
    pub fn with_initial_mana(mut self, mana: f64) -> Self {
        self.initial_mana = mana;
        self
    }

    #[must_use]
    pub fn with_initial_entropy(mut self, entropy: u32) -> Self {
        self.initial_entropy = entropy;
        self
    }

    #[must_use]
    pub fn with_initial_spell_cost(mut self, cost: f64) -> Self {
        self.initial_spell_cost = cost;
        self
    }

    #[must_use]
    pub fn with_initial_entropy_cost(mut self, cost: f64) -> Self {
        self.initial_entropy_cost = cost;
        self
    }

    #[must_use]
    pub fn with_initial_slot_cost(mut self, cost: f64) -> Self {
        self.initial_slot_cost = cost;
        self
    }

    #[must_use]
    pub fn with_initial_slots(mut self, slots: usize) -> Self {
        self.initial_slots = slots;
        self
    }

    /// Replace the starter pool.
    #[must_use]
    pub fn with_starter_spells(mut self, spells: impl IntoIterator<Item = StarterSpell>) -> Self {
        self.starter_spells = spells.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
