//! Economy engine: progression state and the operations that change it.
//!
//! - `EconomyState`: Mana, entropy, concentration, costs, chain and pool
//! - `Economy`: The engine owning the state, its config and RNG
//! - `EconomyEvent`: Change notifications drained after each operation

pub mod engine;
pub mod event;
pub mod state;

pub use engine::{Economy, CONCENTRATION_PER_PAYOUT};
pub use event::EconomyEvent;
pub use state::{Dropzone, EconomyState};
