//! Core session, tick orchestration, run loop and command surface.

#![allow(unused_imports)]

pub mod balance;
pub mod combat_math;
pub mod commands;
pub mod constants;
pub mod game_loop;
pub mod game_state;
pub mod snapshot;
pub mod tick;

pub use balance::*;
pub use commands::*;
pub use constants::*;
pub use game_loop::*;
pub use game_state::*;
pub use snapshot::*;
pub use tick::*;
