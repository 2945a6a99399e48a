use crate::core::constants::*;
use crate::items::{Item, StatKey};
use serde::{Deserialize, Serialize};

/// Price of taking an item to its next upgrade level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeCost {
    pub gold: u64,
    pub shards: u32,
}

/// What an upgrade changed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UpgradeOutcome {
    pub new_level: u32,
    pub cost: UpgradeCost,
    pub sell_value: u64,
}

/// Stat budget an item's cost scales with: `max(1, round(atk + def + hp/5))`.
pub fn stat_sum(item: &Item) -> f64 {
    let sum = item.stats.get(StatKey::Attack)
        + item.stats.get(StatKey::Defense)
        + item.stats.get(StatKey::MaxHp) / 5.0;
    sum.round().max(1.0)
}

/// Cost to upgrade from `item.upgrade_level` to the next level.
pub fn upgrade_cost(item: &Item) -> UpgradeCost {
    let level = item.upgrade_level;
    let gold = (stat_sum(item) * UPGRADE_BASE_COST * UPGRADE_COST_GROWTH.powi(level as i32))
        .floor() as u64;
    UpgradeCost {
        gold: gold.max(UPGRADE_MIN_COST),
        shards: level + 1,
    }
}

/// Stat multiplier at an upgrade level.
pub fn stat_multiplier(level: u32) -> f64 {
    1.0 + UPGRADE_STAT_STEP * level as f64
}

/// Sell value multiplier at an upgrade level.
pub fn sell_multiplier(level: u32) -> f64 {
    1.0 + UPGRADE_SELL_STEP * level as f64
}

pub fn is_max_level(item: &Item) -> bool {
    item.upgrade_level >= MAX_UPGRADE_LEVEL
}
