//! Dungeon runs: floors of battles ending in a boss that unlocks the next
//! dungeon.

mod data;
mod progression;

#[allow(unused_imports)]
pub use data::*;
#[allow(unused_imports)]
pub use progression::*;
