//! Item system: types, equipment, inventory, tables and loot generation.

pub mod data;
pub mod equipment;
pub mod generation;
pub mod inventory;
pub mod types;

pub use data::*;
pub use equipment::*;
pub use generation::*;
pub use inventory::*;
pub use types::*;
