//! Simulation configuration.

use crate::character::HeroClass;
use crate::core::balance::BalanceOverrides;

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of simulation runs to perform
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Maximum ticks per run before timeout
    pub max_ticks_per_run: u64,

    /// A run succeeds when this dungeon's boss falls
    pub target_dungeon: String,

    pub class: HeroClass,

    /// Let the simulated player equip gear, sell junk, buy stat upgrades,
    /// claim quests and move on to newly unlocked dungeons
    pub auto_manage: bool,

    /// Combat tunables to test instead of the defaults
    pub balance: BalanceOverrides,

    /// Log verbosity (0 = silent, 1 = summary, 2 = detailed)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 200,
            seed: None,
            max_ticks_per_run: 100_000,
            target_dungeon: "Crypt of Bones".to_string(),
            class: HeroClass::Warrior,
            auto_manage: true,
            balance: BalanceOverrides::default(),
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Quick config for checking the first dungeon
    pub fn first_dungeon_test() -> Self {
        Self {
            num_runs: 50,
            max_ticks_per_run: 20_000,
            target_dungeon: "Cave of Slimes".to_string(),
            ..Default::default()
        }
    }

    /// Long config for the whole dungeon ladder
    pub fn full_progression_test() -> Self {
        Self {
            num_runs: 20,
            max_ticks_per_run: 1_000_000,
            target_dungeon: "Abyss".to_string(),
            ..Default::default()
        }
    }
}
