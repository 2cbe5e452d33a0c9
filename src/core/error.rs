//! Error types.
//!
//! Insufficient mana is deliberately absent: purchases that can't be afforded
//! are no-ops, not errors.

use thiserror::Error;

use crate::spells::SpellId;

/// Why a `move_spell` request was refused.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("slot {slot} is out of range for a chain of {len} slots")]
    SlotOutOfRange { slot: usize, len: usize },

    #[error("{0} is neither in the pool nor in the chain")]
    UnknownSpell(SpellId),

    #[error("{0} is not slotted in the chain")]
    NotSlotted(SpellId),
}

/// Failure of the key-value byte store behind a save.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage io error for key [{key}]: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid storage key [{0}]")]
    InvalidKey(String),
}

/// Failure while saving or loading.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("could not encode save file: {0}")]
    Encode(String),

    #[error("could not decode save file: {0}")]
    Decode(String),

    #[error("save file version {found} is newer than supported version {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("save file failed validation: {0}")]
    Invalid(String),
}

/// Rejected economy configuration.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be finite and non-negative, got {value}")]
    NegativeOrNonFinite { field: &'static str, value: f64 },

    #[error("{field} must be at least 1.0 so costs never shrink on purchase, got {value}")]
    ShrinkingGrowth { field: &'static str, value: f64 },

    #[error("initial entropy must be at least 1")]
    ZeroEntropy,

    #[error("starter spell [{0}] is invalid: {1}")]
    StarterSpell(String, String),

    #[error("could not parse config: {0}")]
    Parse(String),
}
