//! Chain model: the ordered row of spell slots and its `invoke` yield.

#[allow(clippy::module_inception)]
mod chain;

pub use chain::{Chain, Slots};
