//! Item upgrades: shard-and-gold gated stat scaling of owned gear.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
