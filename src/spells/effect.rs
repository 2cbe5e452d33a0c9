//! Spell effects.
//!
//! An effect describes how one chain slot transforms the running yield when
//! the chain is invoked. Effects are applied in slot order, so `Addition`
//! before `Multiply` yields more than the reverse.

use serde::{Deserialize, Serialize};

/// What a spell does to the chain's running yield.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Effect {
    /// Add a flat amount.
    Addition(f64),

    /// Multiply the running yield.
    Multiply(f64),

    /// Re-apply the nearest preceding spell's effect `repeats` more times.
    /// Does nothing at the head of the chain.
    Invoke { repeats: u32 },
}

impl Effect {
    /// Invoke with a single repeat.
    pub const fn invoke() -> Self {
        Self::Invoke { repeats: 1 }
    }

    /// Apply this effect to a running yield.
    ///
    /// `previous` is the effect of the nearest preceding occupied slot;
    /// only `Invoke` looks at it. An `Invoke` that repeats another `Invoke`
    /// does nothing.
    #[must_use]
    pub fn apply(self, current: f64, previous: Option<Effect>) -> f64 {
        match self {
            Effect::Addition(amount) => current + amount,
            Effect::Multiply(factor) => current * factor,
            Effect::Invoke { repeats } => match previous {
                Some(Effect::Addition(amount)) => current + amount * f64::from(repeats),
                Some(Effect::Multiply(factor)) => current * repeated_factor(factor, repeats),
                _ => current,
            },
        }
    }

    /// Whether every magnitude is a finite number.
    #[must_use]
    pub fn is_finite(self) -> bool {
        match self {
            Effect::Addition(n) | Effect::Multiply(n) => n.is_finite(),
            Effect::Invoke { .. } => true,
        }
    }
}

/// `factor` raised to `repeats`.
fn repeated_factor(factor: f64, repeats: u32) -> f64 {
    match i32::try_from(repeats) {
        Ok(n) => factor.powi(n),
        Err(_) => factor.powf(f64::from(repeats)),
    }
}

impl std::fmt::Display for Effect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Effect::Addition(n) => write!(f, "+{n}"),
            Effect::Multiply(n) => write!(f, "x{n}"),
            Effect::Invoke { repeats } => write!(f, "invoke x{repeats}"),
        }
    }
}
