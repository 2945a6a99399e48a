//! Random loot generation.

use super::data::{get_equipment_template, get_unique_item, EquipmentTemplate, LOOT_ITEM_TYPES};
use super::types::{Item, Rarity, StatKey, StatMap};
use crate::core::constants::*;
use crate::dungeons::DungeonDef;
use rand::Rng;

/// Ordinary drops never roll above Uncommon.
const MOB_RARITY_WEIGHTS: [(Rarity, f64); 2] = [(Rarity::Common, 0.85), (Rarity::Uncommon, 0.15)];

const BOSS_RARITY_WEIGHTS: [(Rarity, f64); 5] = [
    (Rarity::Common, 0.60),
    (Rarity::Uncommon, 0.25),
    (Rarity::Rare, 0.10),
    (Rarity::Epic, 0.04),
    (Rarity::Legendary, 0.01),
];

/// Roll for loot after a kill. Returns `None` on a no-drop roll.
///
/// Bosses whose dungeon names a unique drop first get a 50% shot at that
/// unique; a miss falls through to the ordinary roll with the boss no-drop
/// chance.
pub fn generate_loot(
    hero_level: u32,
    is_boss: bool,
    dungeon: Option<&DungeonDef>,
    rng: &mut impl Rng,
) -> Option<Item> {
    if is_boss {
        let unique = dungeon
            .and_then(|d| d.boss_item_drop)
            .and_then(|id| {
                let def = get_unique_item(id);
                if def.is_none() {
                    log::warn!("Dungeon boss drop {} is not a known unique item", id);
                }
                def
            });
        if let Some(def) = unique {
            if rng.gen::<f64>() < UNIQUE_DROP_CHANCE {
                return Some(def.instantiate());
            }
        }
    }

    let no_drop_chance = if is_boss {
        BOSS_NO_DROP_CHANCE
    } else {
        NO_DROP_CHANCE
    };
    if rng.gen::<f64>() < no_drop_chance {
        return None;
    }

    let item_type = LOOT_ITEM_TYPES[rng.gen_range(0..LOOT_ITEM_TYPES.len())];
    let template = get_equipment_template(item_type)?;
    let rarity = roll_rarity(is_boss, rng);
    Some(roll_item(template, hero_level, rarity, rng))
}

/// Weighted rarity draw by sequential subtraction.
pub fn roll_rarity(is_boss: bool, rng: &mut impl Rng) -> Rarity {
    let weights: &[(Rarity, f64)] = if is_boss {
        &BOSS_RARITY_WEIGHTS
    } else {
        &MOB_RARITY_WEIGHTS
    };
    pick_weighted(weights, rng.gen::<f64>())
}

fn pick_weighted(weights: &[(Rarity, f64)], roll: f64) -> Rarity {
    let mut remaining = roll;
    for (rarity, weight) in weights {
        if remaining < *weight {
            return *rarity;
        }
        remaining -= weight;
    }
    weights
        .last()
        .map(|(rarity, _)| *rarity)
        .unwrap_or(Rarity::Common)
}

/// Build an item of `rarity` from a template for a hero of `hero_level`.
pub fn roll_item(
    template: &EquipmentTemplate,
    hero_level: u32,
    rarity: Rarity,
    rng: &mut impl Rng,
) -> Item {
    let variance = rng.gen_range(LOOT_VARIANCE_MIN..LOOT_VARIANCE_MAX);
    let level_value = hero_level as f64 * LOOT_VALUE_PER_LEVEL;

    let mut stats = StatMap::new();
    for &(key, base) in template.base_stats {
        let raw = base + level_value * rarity.multiplier() * variance;
        stats.set(key, finalize_stat(key, raw));
    }

    let prefix = template.name_prefixes[rng.gen_range(0..template.name_prefixes.len())];
    let slot = template.slots[rng.gen_range(0..template.slots.len())];
    let sell_value = (hero_level as f64 * rarity.multiplier() * SELL_VALUE_PER_LEVEL).round() as u64;

    Item::equipment(
        format!("{} [Lv.{}]", prefix, hero_level),
        template.item_type,
        slot,
        rarity,
        stats,
        sell_value,
    )
}

fn finalize_stat(key: StatKey, raw: f64) -> f64 {
    if let Some(scale) = key.primary_scale() {
        return (raw * scale).round().max(0.0);
    }
    if key.is_fractional() {
        return (raw * FRACTIONAL_STAT_SCALE * 100.0).round() / 100.0;
    }
    raw.round()
}
