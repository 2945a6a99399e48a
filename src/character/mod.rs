//! Hero model: base and derived stats, skills, upgrades and persistence.

#![allow(unused_imports)]

pub mod attributes;
pub mod derived_stats;
pub mod hero;
pub mod save;
pub mod skills;
pub mod upgrades;

pub use attributes::*;
pub use derived_stats::*;
pub use hero::*;
pub use save::*;
pub use skills::*;
pub use upgrades::*;
