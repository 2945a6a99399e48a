use super::types::*;
use crate::items::{Item, StatKey};

/// Raise an item one upgrade level, rescaling stats from the stored
/// original stats. Payment is the caller's job; this only checks the cap.
/// Returns the new level, or `None` when already at max.
pub fn apply_upgrade(item: &mut Item) -> Option<u32> {
    if is_max_level(item) {
        return None;
    }
    let new_level = item.upgrade_level + 1;

    // Items from older saves may lack base stats
    if item.base_stats.is_empty() && !item.stats.is_empty() {
        item.base_stats = item.stats.clone();
    }
    if item.base_sell_value == 0 {
        item.base_sell_value = item.sell_value;
    }

    let multiplier = stat_multiplier(new_level);
    let base = item.base_stats.clone();
    for (key, value) in base.iter() {
        item.stats.set(key, scale_stat(key, value, multiplier));
    }
    item.sell_value = (item.base_sell_value as f64 * sell_multiplier(new_level)).round() as u64;
    item.upgrade_level = new_level;
    Some(new_level)
}

fn scale_stat(key: StatKey, value: f64, multiplier: f64) -> f64 {
    let scaled = value * multiplier;
    if key.is_fractional() {
        (scaled * 1000.0).round() / 1000.0
    } else {
        scaled.round()
    }
}
