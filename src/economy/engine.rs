//! The economy engine: every operation that may change progression state.
//!
//! All operations take `&mut self`, run to completion and either commit in
//! full or leave the state untouched. Purchases the player can't afford are
//! silent no-ops that return `false`; nothing here panics under normal use.
//!
//! ## Example
//!
//! ```
//! use spell_chain::core::EconomyConfig;
//! use spell_chain::economy::Economy;
//!
//! let mut economy = Economy::new(EconomyConfig::default().with_seed(1)).unwrap();
//!
//! economy.add_mana(1000.0);
//! assert!(economy.increase_entropy());
//!
//! assert_eq!(economy.state().mana(), 900.0);
//! assert_eq!(economy.state().entropy(), 2);
//! assert_eq!(economy.state().minimal_spell_cost(), 20.0);
//! ```

use log::{debug, info, warn};

use super::event::EconomyEvent;
use super::state::{Dropzone, EconomyState};
use crate::chain::Chain;
use crate::core::{ConfigError, EconomyConfig, GameRng, MoveError, SaveError};
use crate::save::{LoadOutcome, SaveCodec, SaveFile, SaveStorage, SAVE_KEY};
use crate::spells::{Rarity, Spell, SpellFactory, SpellId};

/// Concentration needed for one payout tick.
pub const CONCENTRATION_PER_PAYOUT: f64 = 100.0;

/// The progression engine: state plus the rules that mutate it.
#[derive(Clone, Debug)]
pub struct Economy {
    state: EconomyState,
    config: EconomyConfig,
    rng: GameRng,
    /// `None` once every id has been handed out.
    next_spell_id: Option<SpellId>,
    events: Vec<EconomyEvent>,
}

impl Default for Economy {
    fn default() -> Self {
        Self::build(EconomyConfig::default())
    }
}

impl Economy {
    /// Create an economy in its starting state.
    pub fn new(config: EconomyConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: EconomyConfig) -> Self {
        let minimal_spell_cost = config.minimal_spell_cost_for(config.initial_entropy);

        let pool: Vec<Spell> = config
            .starter_spells
            .iter()
            .zip(0u32..)
            .map(|(starter, raw)| {
                Spell::new(
                    SpellId::new(raw),
                    starter.name.clone(),
                    starter.rarity,
                    starter.element,
                    starter.effect,
                )
            })
            .collect();
        let next_spell_id = u32::try_from(pool.len()).ok().map(SpellId::new);

        let state = EconomyState {
            mana: config.initial_mana,
            entropy: config.initial_entropy,
            concentration: 0.0,
            spell_cost: config.initial_spell_cost.max(minimal_spell_cost),
            minimal_spell_cost,
            entropy_cost: config.initial_entropy_cost,
            slot_cost: config.initial_slot_cost,
            chain: Chain::with_slots(config.initial_slots),
            pool,
            dropzones: Vec::new(),
        };

        let base_rng = config.seed.map_or_else(GameRng::from_entropy, GameRng::new);

        Self {
            state,
            rng: base_rng.for_context("spell-factory"),
            config,
            next_spell_id,
            events: Vec::new(),
        }
    }

    // === Reads ===

    #[must_use]
    pub fn state(&self) -> &EconomyState {
        &self.state
    }

    #[must_use]
    pub fn config(&self) -> &EconomyConfig {
        &self.config
    }

    #[must_use]
    pub fn rng(&self) -> &GameRng {
        &self.rng
    }

    /// Highest rarity a newly bought spell can roll.
    #[must_use]
    pub fn maximum_rarity(&self) -> Rarity {
        Rarity::maximum_for_entropy(self.state.entropy)
    }

    #[must_use]
    pub fn can_afford_spell(&self) -> bool {
        self.state.mana >= self.state.spell_cost
    }

    #[must_use]
    pub fn can_afford_slot(&self) -> bool {
        self.state.mana >= self.state.slot_cost
    }

    #[must_use]
    pub fn can_afford_entropy(&self) -> bool {
        self.state.mana >= self.state.entropy_cost
    }

    /// Take every event queued since the last drain.
    pub fn drain_events(&mut self) -> Vec<EconomyEvent> {
        std::mem::take(&mut self.events)
    }

    /// Events queued since the last drain.
    #[must_use]
    pub fn pending_events(&self) -> &[EconomyEvent] {
        &self.events
    }

    // === Income ===

    /// Credit mana from an outside source.
    ///
    /// Amounts that would leave the balance non-finite are ignored.
    pub fn add_mana(&mut self, mana: f64) {
        if !(self.state.mana + mana).is_finite() {
            debug!("Ignoring add_mana of {mana}");
            return;
        }
        self.state.mana += mana;
        self.events.push(EconomyEvent::ManaAdded { amount: mana });
    }

    /// Passive concentration over `delta` units of time.
    ///
    /// Negative deltas are ignored, as are deltas too large to turn into a
    /// finite amount of concentration.
    pub fn concentrate(&mut self, delta: f64) {
        let amount = self.config.concentration_rate * delta;
        if !amount.is_finite() || amount < 0.0 {
            debug!("Ignoring concentrate with delta {delta}");
            return;
        }
        self.accumulate_concentration(amount);
    }

    /// One click of active concentration.
    pub fn manually_concentrate(&mut self) {
        self.accumulate_concentration(self.config.manual_concentration);
    }

    fn accumulate_concentration(&mut self, amount: f64) {
        self.state.concentration += amount;

        let ticks = (self.state.concentration / CONCENTRATION_PER_PAYOUT).floor();
        if ticks < 1.0 {
            return;
        }

        let payout = self.state.chain.invoke() * ticks;
        self.state.concentration %= CONCENTRATION_PER_PAYOUT;
        if !(self.state.mana + payout).is_finite() {
            warn!("Dropping payout of {payout} mana: balance would overflow");
            return;
        }
        self.state.mana += payout;

        debug!("Concentration paid {ticks} tick(s) for {payout} mana");
        self.events.push(EconomyEvent::ConcentrationPayout {
            ticks: ticks as u32,
            mana: payout,
        });
    }

    // === Purchases ===

    /// Buy a freshly rolled spell into the pool.
    ///
    /// Returns `false` and changes nothing if mana is short.
    pub fn buy_new_spell(&mut self) -> bool {
        if !self.can_afford_spell() {
            debug!(
                "Cannot afford spell: mana {} < cost {}",
                self.state.mana, self.state.spell_cost
            );
            return false;
        }
        let Some(id) = self.next_spell_id else {
            warn!("Cannot buy spell: every spell id is in use");
            return false;
        };

        let cost = self.state.spell_cost;
        self.state.mana -= cost;
        self.state.spell_cost *= self.config.spell_cost_increase;
        self.next_spell_id = id.next();

        let maximum_rarity = self.maximum_rarity();
        let spell = SpellFactory::generate_spell(&mut self.rng, maximum_rarity, id);
        debug!("Bought {} ({}, {})", spell.id, spell.rarity, spell.effect);
        self.state.pool.push(spell);

        self.events.push(EconomyEvent::SpellPurchased { spell: id, cost });
        true
    }

    /// Buy one more empty chain slot.
    ///
    /// Returns `false` and changes nothing if mana is short.
    pub fn buy_new_slot(&mut self) -> bool {
        if !self.can_afford_slot() {
            debug!(
                "Cannot afford slot: mana {} < cost {}",
                self.state.mana, self.state.slot_cost
            );
            return false;
        }

        let cost = self.state.slot_cost;
        self.state.mana -= cost;
        self.state.slot_cost *= self.config.slot_cost_increase;
        self.state.chain.append_slot();

        self.events.push(EconomyEvent::SlotPurchased {
            slots: self.state.chain.len(),
            cost,
        });
        true
    }

    /// Raise entropy by one, lifting the rarity ceiling and the spell cost
    /// floor.
    ///
    /// Returns `false` and changes nothing if mana is short.
    pub fn increase_entropy(&mut self) -> bool {
        if !self.can_afford_entropy() {
            debug!(
                "Cannot afford entropy: mana {} < cost {}",
                self.state.mana, self.state.entropy_cost
            );
            return false;
        }

        let cost = self.state.entropy_cost;
        self.state.mana -= cost;
        self.state.entropy_cost *= self.config.entropy_cost_increase;
        self.state.entropy += 1;
        self.state.minimal_spell_cost = self.config.minimal_spell_cost_for(self.state.entropy);
        self.state.spell_cost = self.state.spell_cost.max(self.state.minimal_spell_cost);

        self.events.push(EconomyEvent::EntropyIncreased {
            entropy: self.state.entropy,
            cost,
        });
        true
    }

    /// Let the spell cost relax toward its floor over `delta` units of time.
    ///
    /// Never goes below the floor. Negative or non-finite deltas are ignored.
    pub fn adjust_spell_cost(&mut self, delta: f64) {
        if !delta.is_finite() || delta < 0.0 {
            debug!("Ignoring adjust_spell_cost with delta {delta}");
            return;
        }
        if self.state.spell_cost <= self.state.minimal_spell_cost {
            return;
        }

        let decay = self.state.spell_cost * self.config.spell_cost_decay * delta;
        let spell_cost = (self.state.spell_cost - decay).max(self.state.minimal_spell_cost);
        if spell_cost == self.state.spell_cost {
            return;
        }

        self.state.spell_cost = spell_cost;
        self.events.push(EconomyEvent::SpellCostDecayed { spell_cost });
    }

    // === Chain layout ===

    /// Register a drop target.
    pub fn add_dropzone(&mut self, dropzone: Dropzone) {
        self.state.dropzones.push(dropzone);
        self.events.push(EconomyEvent::DropzoneAdded {
            index: self.state.dropzones.len() - 1,
        });
    }

    /// Place `spell` into chain index `slot`, swapping with the occupant.
    ///
    /// - From the pool: the spell leaves the pool; any occupant of `slot`
    ///   goes to the back of the pool.
    /// - From another slot: the two slots trade contents.
    /// - Onto its own slot: nothing changes.
    ///
    /// Fails without touching state if `slot` is past the end of the chain
    /// or the spell isn't owned.
    pub fn move_spell(&mut self, spell: SpellId, slot: usize) -> Result<(), MoveError> {
        let len = self.state.chain.len();
        if slot >= len {
            return Err(MoveError::SlotOutOfRange { slot, len });
        }

        let displaced = self.state.chain.get(slot).map(|s| s.id).filter(|&id| id != spell);

        if let Some(from) = self.state.chain.position_of(spell) {
            if from != slot {
                self.state.chain.swap(from, slot);
            }
            self.events.push(EconomyEvent::SpellMoved {
                spell,
                from: Some(from),
                to: Some(slot),
                displaced,
            });
            return Ok(());
        }

        let index = self
            .state
            .pool_index(spell)
            .ok_or(MoveError::UnknownSpell(spell))?;
        let incoming = self.state.pool.remove(index);
        if let Some(mut outgoing) = self.state.chain.put(slot, incoming) {
            outgoing.set_slot(None);
            self.state.pool.push(outgoing);
        }

        self.events.push(EconomyEvent::SpellMoved {
            spell,
            from: None,
            to: Some(slot),
            displaced,
        });
        Ok(())
    }

    /// Take a slotted spell out of the chain and put it back in the pool.
    pub fn return_spell_to_pool(&mut self, spell: SpellId) -> Result<(), MoveError> {
        let Some(from) = self.state.chain.position_of(spell) else {
            return Err(if self.state.pool_index(spell).is_some() {
                MoveError::NotSlotted(spell)
            } else {
                MoveError::UnknownSpell(spell)
            });
        };

        if let Some(returned) = self.state.chain.take(from) {
            self.state.pool.push(returned);
        }

        self.events.push(EconomyEvent::SpellMoved {
            spell,
            from: Some(from),
            to: None,
            displaced: None,
        });
        Ok(())
    }

    // === Persistence ===

    /// Write the current state under `SAVE_KEY`, replacing any earlier save.
    pub fn save(&mut self, storage: &mut dyn SaveStorage) -> Result<(), SaveError> {
        let bytes = SaveFile::capture(&self.state, &self.rng).encode(SaveCodec::Json)?;
        storage.write(SAVE_KEY, &bytes)?;

        info!(
            "Saved economy: {} mana, entropy {}, {} spells",
            self.state.mana,
            self.state.entropy,
            self.state.spell_count()
        );
        self.events.push(EconomyEvent::Saved);
        Ok(())
    }

    /// Replace the state from the save under `SAVE_KEY`.
    ///
    /// With no save present the state is left as is. A save that can't be
    /// decoded or fails validation is rejected and the state is also left
    /// as is.
    pub fn load(&mut self, storage: &dyn SaveStorage) -> Result<LoadOutcome, SaveError> {
        let Some(bytes) = storage.read(SAVE_KEY)? else {
            info!("No save found under [{SAVE_KEY}], keeping current state");
            return Ok(LoadOutcome::NoSave);
        };

        let result =
            SaveFile::decode(&bytes, SaveCodec::Json).and_then(|save| self.apply_save(save));
        match result {
            Ok(()) => Ok(LoadOutcome::Loaded),
            Err(err) => {
                warn!("Rejected save under [{SAVE_KEY}]: {err}");
                Err(err)
            }
        }
    }

    /// Validate a decoded save and replace the state with it.
    ///
    /// Mana, entropy, the four costs, the chain and the spells are replaced.
    /// Concentration and dropzones belong to the running session and are
    /// kept.
    pub fn apply_save(&mut self, save: SaveFile) -> Result<(), SaveError> {
        save.validate(&self.config)?;

        let next_spell_id = save
            .spells
            .iter()
            .map(|spell| spell.id)
            .max()
            .map_or(Some(SpellId::new(0)), SpellId::next);

        let SaveFile {
            spells,
            chain,
            mana,
            entropy,
            slot_cost,
            spell_cost,
            entropy_cost,
            minimal_spell_cost,
            rng,
            ..
        } = save;

        self.state.pool = spells.into_iter().filter(|spell| !spell.is_slotted()).collect();
        self.state.chain = chain;
        self.state.mana = mana;
        self.state.entropy = entropy;
        self.state.slot_cost = slot_cost;
        self.state.spell_cost = spell_cost;
        self.state.entropy_cost = entropy_cost;
        self.state.minimal_spell_cost = minimal_spell_cost;
        self.next_spell_id = next_spell_id;
        if let Some(rng) = rng {
            self.rng = GameRng::from_state(&rng);
        }

        info!(
            "Loaded economy: {} mana, entropy {}, {} spells",
            self.state.mana,
            self.state.entropy,
            self.state.spell_count()
        );
        self.events.push(EconomyEvent::Loaded);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spells::Effect;

    fn economy() -> Economy {
        Economy::new(EconomyConfig::default().with_seed(42)).unwrap()
    }

    fn pooled_id(economy: &Economy, name: &str) -> SpellId {
        economy
            .state()
            .pool()
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.id)
            .unwrap()
    }

    #[test]
    fn test_initial_state() {
        let economy = economy();
        let state = economy.state();

        assert_eq!(state.mana(), 0.0);
        assert_eq!(state.entropy(), 1);
        assert_eq!(state.concentration(), 0.0);
        assert_eq!(state.spell_cost(), 10.0);
        assert_eq!(state.minimal_spell_cost(), 10.0);
        assert_eq!(state.entropy_cost(), 100.0);
        assert_eq!(state.slot_cost(), 100.0);
        assert_eq!(state.chain().len(), 1);
        assert_eq!(state.pool().len(), 4);
        assert!(state.check_partition().is_ok());
    }

    #[test]
    fn test_new_rejects_bad_config() {
        let config = EconomyConfig::default().with_initial_entropy(0);
        assert!(Economy::new(config).is_err());
    }

    #[test]
    fn test_spell_cost_starts_at_floor() {
        let config = EconomyConfig::default()
            .with_initial_entropy(3)
            .with_initial_spell_cost(5.0);
        let economy = Economy::new(config).unwrap();

        assert_eq!(economy.state().minimal_spell_cost(), 30.0);
        assert_eq!(economy.state().spell_cost(), 30.0);
    }

    #[test]
    fn test_add_mana() {
        let mut economy = economy();
        economy.add_mana(12.5);

        assert_eq!(economy.state().mana(), 12.5);
        assert_eq!(economy.drain_events(), vec![EconomyEvent::ManaAdded { amount: 12.5 }]);
        assert!(economy.pending_events().is_empty());
    }

    #[test]
    fn test_buy_new_spell() {
        let mut economy = economy();
        economy.add_mana(25.0);

        assert!(economy.buy_new_spell());

        assert_eq!(economy.state().mana(), 15.0);
        assert_eq!(economy.state().spell_cost(), 10.0 * 1.6);
        assert_eq!(economy.state().pool().len(), 5);
        let bought = economy.state().pool().last().unwrap();
        assert_eq!(bought.id, SpellId::new(4));
        assert_eq!(bought.rarity, Rarity::Common);
        assert_eq!(bought.slot(), None);
    }

    #[test]
    fn test_buy_new_spell_unaffordable() {
        let mut economy = economy();
        economy.add_mana(9.0);
        economy.drain_events();
        let before = economy.state().clone();

        assert!(!economy.buy_new_spell());

        assert_eq!(economy.state(), &before);
        assert!(economy.pending_events().is_empty());
    }

    #[test]
    fn test_buy_new_slot() {
        let mut economy = economy();
        economy.add_mana(150.0);

        assert!(economy.buy_new_slot());
        assert!(!economy.buy_new_slot());

        assert_eq!(economy.state().mana(), 50.0);
        assert_eq!(economy.state().slot_cost(), 1000.0);
        assert_eq!(economy.state().chain().len(), 2);
    }

    #[test]
    fn test_increase_entropy_scenario() {
        let mut economy = economy();
        economy.add_mana(1000.0);

        assert!(economy.increase_entropy());

        let state = economy.state();
        assert_eq!(state.mana(), 900.0);
        assert_eq!(state.entropy_cost(), 150.0);
        assert_eq!(state.entropy(), 2);
        assert_eq!(state.minimal_spell_cost(), 20.0);
        assert_eq!(state.spell_cost(), 20.0);
        assert_eq!(economy.maximum_rarity(), Rarity::Uncommon);
    }

    #[test]
    fn test_increase_entropy_keeps_higher_spell_cost() {
        let mut economy = economy();
        economy.add_mana(10_000.0);
        for _ in 0..5 {
            economy.buy_new_spell();
        }
        let spell_cost = economy.state().spell_cost();
        assert!(spell_cost > 20.0);

        economy.increase_entropy();

        assert_eq!(economy.state().spell_cost(), spell_cost);
    }

    #[test]
    fn test_adjust_spell_cost_decays_to_floor() {
        let mut economy = economy();
        economy.add_mana(100.0);
        economy.buy_new_spell();
        assert_eq!(economy.state().spell_cost(), 16.0);

        economy.adjust_spell_cost(0.1);
        assert!((economy.state().spell_cost() - 16.0 * (1.0 - 0.015)).abs() < 1e-9);

        economy.adjust_spell_cost(100.0);
        assert_eq!(economy.state().spell_cost(), 10.0);

        economy.drain_events();
        economy.adjust_spell_cost(1.0);
        assert_eq!(economy.state().spell_cost(), 10.0);
        assert!(economy.pending_events().is_empty());
    }

    #[test]
    fn test_adjust_spell_cost_ignores_negative_delta() {
        let mut economy = economy();
        economy.add_mana(100.0);
        economy.buy_new_spell();

        economy.adjust_spell_cost(-5.0);
        economy.adjust_spell_cost(f64::NAN);

        assert_eq!(economy.state().spell_cost(), 16.0);
    }

    #[test]
    fn test_manual_concentration_with_empty_chain() {
        let mut economy = economy();

        for _ in 0..15 {
            economy.manually_concentrate();
        }

        assert_eq!(economy.state().mana(), 0.0);
        assert_eq!(economy.state().concentration(), 5.0);
    }

    #[test]
    fn test_concentrate_pays_out() {
        let mut economy = economy();
        let adder = pooled_id(&economy, "Small adder");
        economy.move_spell(adder, 0).unwrap();
        economy.drain_events();

        economy.concentrate(5.0);

        assert_eq!(economy.state().mana(), 2.0);
        assert_eq!(economy.state().concentration(), 0.0);
        assert_eq!(
            economy.drain_events(),
            vec![EconomyEvent::ConcentrationPayout { ticks: 1, mana: 2.0 }]
        );
    }

    #[test]
    fn test_concentrate_multiple_ticks() {
        let mut economy = economy();
        let adder = pooled_id(&economy, "Small adder");
        economy.move_spell(adder, 0).unwrap();

        economy.concentrate(12.5);

        // 250 concentration: two ticks, 50 left
        assert_eq!(economy.state().mana(), 4.0);
        assert_eq!(economy.state().concentration(), 50.0);
    }

    #[test]
    fn test_concentrate_ignores_negative_delta() {
        let mut economy = economy();
        economy.concentrate(-1.0);
        assert_eq!(economy.state().concentration(), 0.0);
    }

    #[test]
    fn test_concentrate_ignores_overflowing_delta() {
        let mut economy = economy();
        let adder = pooled_id(&economy, "Small adder");
        economy.move_spell(adder, 0).unwrap();

        economy.concentrate(1e308);
        economy.concentrate(f64::INFINITY);

        assert_eq!(economy.state().concentration(), 0.0);
        assert_eq!(economy.state().mana(), 0.0);
    }

    #[test]
    fn test_concentrate_with_huge_finite_delta() {
        let mut economy = economy();

        economy.concentrate(1e306);

        let concentration = economy.state().concentration();
        assert!((0.0..CONCENTRATION_PER_PAYOUT).contains(&concentration));
        assert_eq!(economy.state().mana(), 0.0);
    }

    #[test]
    fn test_payout_that_would_overflow_mana_is_dropped() {
        let mut economy = economy();
        let adder = pooled_id(&economy, "Small adder");
        economy.move_spell(adder, 0).unwrap();
        economy.add_mana(f64::MAX);
        economy.drain_events();

        economy.concentrate(1e306);

        assert_eq!(economy.state().mana(), f64::MAX);
        assert!((0.0..CONCENTRATION_PER_PAYOUT).contains(&economy.state().concentration()));
        assert!(economy.pending_events().is_empty());
    }

    #[test]
    fn test_add_mana_ignores_non_finite() {
        let mut economy = economy();
        economy.add_mana(10.0);
        economy.add_mana(f64::INFINITY);
        economy.add_mana(f64::NAN);

        assert_eq!(economy.state().mana(), 10.0);
    }

    #[test]
    fn test_spell_ids_run_out_without_reuse() {
        let mut economy = economy();
        let mut save = SaveFile::capture(economy.state(), economy.rng());
        save.spells[3].id = SpellId::new(u32::MAX - 1);
        economy.apply_save(save).unwrap();
        economy.add_mana(1_000.0);

        assert!(economy.buy_new_spell());
        assert_eq!(economy.state().pool().last().unwrap().id, SpellId::new(u32::MAX));

        let before = economy.state().clone();
        assert!(!economy.buy_new_spell());
        assert_eq!(economy.state(), &before);
        assert!(economy.state().check_partition().is_ok());
    }

    #[test]
    fn test_move_from_pool_into_empty_slot() {
        let mut economy = economy();
        let doubler = pooled_id(&economy, "Doubler");

        economy.move_spell(doubler, 0).unwrap();

        let state = economy.state();
        assert_eq!(state.chain().get(0).unwrap().id, doubler);
        assert_eq!(state.chain().get(0).unwrap().slot(), Some(0));
        assert_eq!(state.pool().len(), 3);
        assert!(state.check_partition().is_ok());
    }

    #[test]
    fn test_move_from_pool_displaces_occupant() {
        let mut economy = economy();
        let adder = pooled_id(&economy, "Small adder");
        let tripler = pooled_id(&economy, "Tripler");
        economy.move_spell(adder, 0).unwrap();
        economy.drain_events();

        economy.move_spell(tripler, 0).unwrap();

        let state = economy.state();
        assert_eq!(state.chain().get(0).unwrap().id, tripler);
        let returned = state.pool().last().unwrap();
        assert_eq!(returned.id, adder);
        assert_eq!(returned.slot(), None);
        assert!(state.check_partition().is_ok());
        assert_eq!(
            economy.drain_events(),
            vec![EconomyEvent::SpellMoved {
                spell: tripler,
                from: None,
                to: Some(0),
                displaced: Some(adder),
            }]
        );
    }

    #[test]
    fn test_move_within_chain_swaps() {
        let config = EconomyConfig::default().with_seed(1).with_initial_slots(3);
        let mut economy = Economy::new(config).unwrap();
        let adder = pooled_id(&economy, "Small adder");
        let doubler = pooled_id(&economy, "Doubler");
        economy.move_spell(adder, 0).unwrap();
        economy.move_spell(doubler, 2).unwrap();
        assert_eq!(economy.state().chain().invoke(), 4.0);

        economy.move_spell(doubler, 0).unwrap();

        let chain = economy.state().chain();
        assert_eq!(chain.get(0).unwrap().id, doubler);
        assert_eq!(chain.get(2).unwrap().id, adder);
        assert_eq!(chain.get(2).unwrap().slot(), Some(2));
        assert_eq!(chain.invoke(), 2.0);
        assert!(economy.state().check_partition().is_ok());
    }

    #[test]
    fn test_move_within_chain_to_empty_slot() {
        let config = EconomyConfig::default().with_seed(1).with_initial_slots(2);
        let mut economy = Economy::new(config).unwrap();
        let adder = pooled_id(&economy, "Small adder");
        economy.move_spell(adder, 0).unwrap();

        economy.move_spell(adder, 1).unwrap();

        let chain = economy.state().chain();
        assert!(chain.get(0).is_none());
        assert_eq!(chain.get(1).unwrap().slot(), Some(1));
    }

    #[test]
    fn test_move_onto_own_slot_is_noop() {
        let mut economy = economy();
        let adder = pooled_id(&economy, "Small adder");
        economy.move_spell(adder, 0).unwrap();
        let before = economy.state().clone();

        economy.move_spell(adder, 0).unwrap();

        assert_eq!(economy.state(), &before);
    }

    #[test]
    fn test_move_out_of_range_is_rejected() {
        let mut economy = economy();
        let adder = pooled_id(&economy, "Small adder");
        let before = economy.state().clone();

        let result = economy.move_spell(adder, 1);

        assert_eq!(result, Err(MoveError::SlotOutOfRange { slot: 1, len: 1 }));
        assert_eq!(economy.state(), &before);
    }

    #[test]
    fn test_move_unknown_spell_is_rejected() {
        let mut economy = economy();
        let before = economy.state().clone();

        let result = economy.move_spell(SpellId::new(99), 0);

        assert_eq!(result, Err(MoveError::UnknownSpell(SpellId::new(99))));
        assert_eq!(economy.state(), &before);
    }

    #[test]
    fn test_return_spell_to_pool() {
        let mut economy = economy();
        let invoker = pooled_id(&economy, "Invoker");

        assert_eq!(economy.return_spell_to_pool(invoker), Err(MoveError::NotSlotted(invoker)));
        assert_eq!(
            economy.return_spell_to_pool(SpellId::new(77)),
            Err(MoveError::UnknownSpell(SpellId::new(77)))
        );

        economy.move_spell(invoker, 0).unwrap();
        economy.return_spell_to_pool(invoker).unwrap();

        let state = economy.state();
        assert!(state.chain().get(0).is_none());
        assert_eq!(state.pool().last().unwrap().id, invoker);
        assert_eq!(state.pool().last().unwrap().slot(), None);
    }

    #[test]
    fn test_add_dropzone() {
        let mut economy = economy();
        economy.add_dropzone(Dropzone::new("slot-0"));
        economy.add_dropzone(Dropzone::new("slot-1"));

        assert_eq!(economy.state().dropzones().len(), 2);
        assert_eq!(economy.state().dropzones()[1], Dropzone::new("slot-1"));
        assert_eq!(
            economy.drain_events().last(),
            Some(&EconomyEvent::DropzoneAdded { index: 1 })
        );
    }

    #[test]
    fn test_starter_effects() {
        let economy = economy();
        let effects: Vec<_> = economy.state().pool().iter().map(|s| s.effect).collect();

        assert_eq!(
            effects,
            vec![
                Effect::Addition(2.0),
                Effect::Multiply(2.0),
                Effect::Multiply(3.0),
                Effect::invoke(),
            ]
        );
    }
}
