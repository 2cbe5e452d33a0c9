//! Core building blocks: RNG, configuration, errors.

pub mod config;
pub mod error;
pub mod rng;

pub use config::{EconomyConfig, StarterSpell};
pub use error::{ConfigError, MoveError, SaveError, StorageError};
pub use rng::{GameRng, GameRngState};
