use super::attributes::BaseStats;
use crate::core::combat_math::sanitize;
use crate::core::constants::*;
use crate::items::{Equipment, StatKey, StatMap};
use serde::{Deserialize, Serialize};

/// Combat stats recomputed from base stats, gear and applied passives.
/// Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedStats {
    pub attack: f64,
    pub defense: f64,
    pub max_hp: u32,
    pub str: f64,
    pub dex: f64,
    pub int: f64,
    pub lux: f64,
    pub attack_speed: f64,
    pub crit_chance: f64,
    pub crit_multiplier: f64,
}

impl DerivedStats {
    /// Derived stats with no gear and no passives.
    pub fn from_base(base: &BaseStats) -> Self {
        Self::calculate(base, &Equipment::new(), &StatMap::new())
    }

    /// Base stats plus every equipped item's stat map plus passive bonuses.
    /// Missing or malformed values count as zero.
    pub fn calculate(base: &BaseStats, equipment: &Equipment, passives: &StatMap) -> Self {
        let mut bonus = StatMap::new();
        for item in equipment.iter_equipped() {
            for (key, value) in item.stats.iter() {
                if value.is_finite() {
                    bonus.add(key, value);
                }
            }
        }
        for (key, value) in passives.iter() {
            if value.is_finite() {
                bonus.add(key, value);
            }
        }

        let str = sanitize(base.str) + bonus.get(StatKey::Str);
        let dex = sanitize(base.dex) + bonus.get(StatKey::Dex);
        let int = sanitize(base.int) + bonus.get(StatKey::Int);
        let lux = sanitize(base.lux) + bonus.get(StatKey::Lux);

        let attack = (sanitize(base.attack) + bonus.get(StatKey::Attack)).max(0.0);
        let defense = (sanitize(base.defense) + bonus.get(StatKey::Defense)).max(0.0);
        let max_hp = (base.max_hp as f64 + bonus.get(StatKey::MaxHp)).round().max(1.0) as u32;

        // Attack speed = base + gear, then +2% per DEX
        let attack_speed = (BASE_ATTACK_SPEED
            + bonus.get(StatKey::AttackSpeed)
            + dex * ATTACK_SPEED_PER_DEX)
            .max(MIN_ATTACK_SPEED);

        // Crit chance = 5% + gear + 1% per LUX, capped at 95%
        let crit_chance = (BASE_CRIT_CHANCE
            + bonus.get(StatKey::CritChance)
            + lux * CRIT_CHANCE_PER_LUX)
            .clamp(0.0, MAX_CRIT_CHANCE);

        // Crit multiplier = 1.5 + gear + 0.05 per STR, at least 1.0
        let crit_multiplier = (BASE_CRIT_MULTIPLIER
            + bonus.get(StatKey::CritMultiplier)
            + str * CRIT_MULTIPLIER_PER_STR)
            .max(MIN_CRIT_MULTIPLIER);

        Self {
            attack,
            defense,
            max_hp,
            str,
            dex,
            int,
            lux,
            attack_speed,
            crit_chance,
            crit_multiplier,
        }
    }
}
