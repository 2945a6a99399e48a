//! Enemies, combat effects and turn resolution.

#![allow(unused_imports)]

pub mod data;
pub mod effects;
pub mod logic;
pub mod types;

pub use data::*;
pub use effects::*;
pub use logic::*;
pub use types::*;
