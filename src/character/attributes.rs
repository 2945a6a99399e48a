use crate::core::constants::*;
use serde::{Deserialize, Serialize};

/// Crafting materials owned by the hero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Materials {
    #[serde(default)]
    pub shard: u32,
}

/// Persistent hero stats, changed only by leveling, upgrades, rewards and
/// damage. Gear and passives are layered on top in [`super::DerivedStats`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseStats {
    pub level: u32,
    pub experience: u64,
    pub xp_to_next_level: u64,
    pub gold: u64,
    pub str: f64,
    pub dex: f64,
    pub int: f64,
    pub lux: f64,
    pub attack: f64,
    pub defense: f64,
    pub max_hp: u32,
    pub current_hp: u32,
    pub materials: Materials,
}

impl Default for BaseStats {
    fn default() -> Self {
        Self::new()
    }
}

impl BaseStats {
    /// Level 1 starting stats.
    pub fn new() -> Self {
        Self {
            level: 1,
            experience: 0,
            xp_to_next_level: BASE_XP_TO_NEXT_LEVEL,
            gold: 0,
            str: 0.0,
            dex: 0.0,
            int: 0.0,
            lux: 0.0,
            attack: BASE_HERO_ATTACK,
            defense: BASE_HERO_DEFENSE,
            max_hp: BASE_HERO_HP,
            current_hp: BASE_HERO_HP,
            materials: Materials::default(),
        }
    }

    /// Apply one level's worth of fixed bonuses.
    pub fn apply_level_up(&mut self) {
        self.level += 1;
        self.max_hp += LEVEL_UP_MAX_HP;
        self.attack += LEVEL_UP_ATTACK;
        self.defense += LEVEL_UP_DEFENSE;
        self.xp_to_next_level =
            ((self.xp_to_next_level as f64 * XP_GROWTH_FACTOR).floor() as u64).max(1);
    }
}
