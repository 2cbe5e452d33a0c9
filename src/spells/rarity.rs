//! Rarity tiers.
//!
//! The tiers form a fixed, ordered table. Each tier carries a roll weight
//! (how often the factory picks it when it is allowed) and a power that
//! scales the magnitude of the spell's effect.

use serde::{Deserialize, Serialize};

/// Ordered rarity tier of a spell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    /// Every tier, lowest first.
    pub const ALL: [Rarity; 5] = [
        Rarity::Common,
        Rarity::Uncommon,
        Rarity::Rare,
        Rarity::Epic,
        Rarity::Legendary,
    ];

    /// Ordinal tier, 0 for `Common`.
    #[must_use]
    pub const fn tier(self) -> u8 {
        self as u8
    }

    /// Look up a tier by ordinal.
    #[must_use]
    pub fn from_tier(tier: u8) -> Option<Self> {
        Self::ALL.get(usize::from(tier)).copied()
    }

    /// Relative roll weight.
    #[must_use]
    pub const fn weight(self) -> f32 {
        match self {
            Rarity::Common => 60.0,
            Rarity::Uncommon => 25.0,
            Rarity::Rare => 10.0,
            Rarity::Epic => 4.0,
            Rarity::Legendary => 1.0,
        }
    }

    /// Effect magnitude multiplier.
    #[must_use]
    pub const fn power(self) -> f64 {
        match self {
            Rarity::Common => 1.0,
            Rarity::Uncommon => 2.0,
            Rarity::Rare => 4.0,
            Rarity::Epic => 6.0,
            Rarity::Legendary => 10.0,
        }
    }

    /// Highest tier that can be rolled at the given entropy.
    ///
    /// Entropy 1 only allows `Common`; each further point unlocks the next
    /// tier until `Legendary`.
    #[must_use]
    pub fn maximum_for_entropy(entropy: u32) -> Self {
        let tier = entropy.saturating_sub(1).min(u32::from(Rarity::Legendary.tier()));
        Self::ALL[tier as usize]
    }

    /// The tiers a roll capped at `self` may produce, lowest first.
    #[must_use]
    pub fn up_to(self) -> &'static [Rarity] {
        &Self::ALL[..=usize::from(self.tier())]
    }
}

impl std::fmt::Display for Rarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Rarity::Common => "Common",
            Rarity::Uncommon => "Uncommon",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
            Rarity::Legendary => "Legendary",
        };
        f.write_str(name)
    }
}
