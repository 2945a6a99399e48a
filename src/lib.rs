//! Dungeon Quest - idle dungeon-crawling RPG engine
//!
//! Exposes the game logic to the binaries, the simulator and tests. Nothing
//! here renders; callers drive a [`core::GameLoop`] and read snapshots.

pub mod character;
pub mod combat;
pub mod core;
pub mod dungeons;
pub mod enhancement;
pub mod error;
pub mod items;
pub mod quests;
pub mod simulator;
pub mod utils;
