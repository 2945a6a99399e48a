//! Game balance simulator for Monte Carlo analysis.
//!
//! Plays many seeded sessions through the real [`GameLoop`] with a simple
//! automated player, then aggregates:
//! - Time to clear a target dungeon
//! - Deaths and kills per run
//! - Loot and quest throughput
//!
//! [`GameLoop`]: crate::core::GameLoop

mod config;
mod report;
mod runner;

pub use config::SimConfig;
pub use report::{RunStats, SimReport};
pub use runner::{run_simulation, simulate_single_run};
