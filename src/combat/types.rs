use rand::Rng;
use serde::Serialize;

use super::data::{get_enemy_template, BossMechanic};
use super::effects::Effects;
use crate::core::combat_math::sanitize;
use crate::core::constants::*;

#[derive(Debug, Clone, Serialize)]
pub struct Enemy {
    /// Key into the enemy table.
    pub base_type: String,
    pub name: String,
    pub level: u32,
    pub is_boss: bool,
    pub max_hp: u32,
    pub current_hp: u32,
    pub attack: f64,
    pub defense: f64,
    pub gold_drop: (u64, u64),
    pub xp_drop: u64,
    #[serde(skip)]
    pub mechanics: Vec<BossMechanic>,
    #[serde(skip)]
    pub effects: Effects,
}

/// Stat multiplier for an enemy level: +12% per level above 1.
pub fn level_multiplier(level: u32) -> f64 {
    1.0 + level.saturating_sub(1) as f64 * ENEMY_LEVEL_SCALING
}

impl Enemy {
    /// Build an enemy of `base_type` at `level`. Unknown types log a
    /// warning and produce a harmless 1 HP placeholder.
    pub fn spawn(base_type: &str, level: u32, is_boss: bool) -> Self {
        let level = level.max(1);
        let name = if is_boss {
            format!("BOSS: {} (Lv {})", base_type, level)
        } else {
            format!("{} (Lv {})", base_type, level)
        };

        let Some(template) = get_enemy_template(base_type) else {
            log::warn!("No enemy template for {}, spawning placeholder", base_type);
            return Self {
                base_type: base_type.to_string(),
                name,
                level,
                is_boss,
                max_hp: 1,
                current_hp: 1,
                attack: 1.0,
                defense: 0.0,
                gold_drop: (0, 0),
                xp_drop: 0,
                mechanics: Vec::new(),
                effects: Effects::new(),
            };
        };

        let boss_mult = if is_boss { BOSS_STAT_MULTIPLIER } else { 1.0 };
        let mult = level_multiplier(level) * boss_mult;
        let max_hp = (sanitize(template.base_hp) * mult).floor().max(1.0) as u32;
        let scale = |value: u64| (value as f64 * mult).floor() as u64;

        Self {
            base_type: base_type.to_string(),
            name,
            level,
            is_boss,
            max_hp,
            current_hp: max_hp,
            attack: (sanitize(template.base_attack) * mult).floor(),
            defense: (sanitize(template.base_defense) * mult).floor(),
            gold_drop: (scale(template.gold_drop.0), scale(template.gold_drop.1)),
            xp_drop: scale(template.xp_drop),
            mechanics: if is_boss {
                template.mechanics.to_vec()
            } else {
                Vec::new()
            },
            effects: Effects::new(),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.current_hp > 0
    }

    /// Defense including active modifiers, never negative.
    pub fn effective_defense(&self) -> f64 {
        (self.defense + self.effects.defense_add()).max(0.0)
    }

    /// Attack including active multipliers.
    pub fn effective_attack(&self) -> f64 {
        (self.attack * self.effects.attack_multiplier()).floor().max(0.0)
    }

    /// Take raw hero damage. The enemy's own effective defense is subtracted
    /// here, less any bypassed share; at least 1 damage lands.
    pub fn take_damage(&mut self, raw_damage: u32, bypass_fraction: f64) -> u32 {
        let mitigation = self.effective_defense() * (1.0 - sanitize(bypass_fraction).min(1.0));
        let damage = (raw_damage as f64 - mitigation).floor().max(1.0) as u32;
        self.current_hp = self.current_hp.saturating_sub(damage);
        damage
    }

    /// Heal up to max HP. Returns the amount restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let healed = amount.min(self.max_hp - self.current_hp);
        self.current_hp += healed;
        healed
    }

    /// Roll XP for the kill.
    pub fn roll_xp(&self) -> u64 {
        self.xp_drop
    }

    /// Roll gold for the kill. Enemies without a range drop
    /// `[max_hp / 20, max_hp / 10]`.
    pub fn roll_gold(&self, rng: &mut impl Rng) -> u64 {
        let (mut min, mut max) = self.gold_drop;
        if max == 0 {
            min = self.max_hp as u64 / 20;
            max = self.max_hp as u64 / 10;
        }
        if min >= max {
            return max;
        }
        rng.gen_range(min..=max)
    }

    pub fn tick_turn(&mut self) {
        self.effects.tick();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::effects::Effect;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_level_one_slime() {
        let slime = Enemy::spawn("Slime", 1, false);
        assert_eq!(slime.name, "Slime (Lv 1)");
        assert_eq!(slime.max_hp, 10);
        assert_eq!(slime.current_hp, 10);
        assert_eq!(slime.attack, 6.0);
        assert_eq!(slime.defense, 1.0);
        assert!(slime.mechanics.is_empty());
    }

    #[test]
    fn test_level_and_boss_scaling() {
        let king = Enemy::spawn("Slime King", 10, true);
        assert_eq!(king.name, "BOSS: Slime King (Lv 10)");
        // 120 × 2.08 × 1.4
        assert_eq!(king.max_hp, 349);
        assert_eq!(king.attack, 26.0);
        assert_eq!(king.defense, 11.0);
        assert_eq!(king.xp_drop, 436);
        assert_eq!(king.mechanics.len(), 1);
    }

    #[test]
    fn test_unknown_type_placeholder() {
        let ghost = Enemy::spawn("Goblin", 3, false);
        assert_eq!(ghost.max_hp, 1);
        assert_eq!(ghost.attack, 1.0);
        assert_eq!(ghost.defense, 0.0);
        assert_eq!(ghost.xp_drop, 0);
    }

    #[test]
    fn test_take_damage_subtracts_own_defense_once() {
        let mut enemy = Enemy::spawn("Skeleton", 1, false);
        assert_eq!(enemy.defense, 3.0);
        assert_eq!(enemy.take_damage(20, 0.0), 17);
        assert_eq!(enemy.current_hp, 23);
    }

    #[test]
    fn test_take_damage_floor_and_modifiers() {
        let mut enemy = Enemy::spawn("Skeleton", 1, false);
        assert_eq!(enemy.take_damage(1, 0.0), 1);
        enemy.effects.add(Effect::defense_add(-2.0, 2));
        assert_eq!(enemy.take_damage(10, 0.0), 9);
        enemy.effects.add(Effect::defense_add(-5.0, 2));
        // defense cannot go below zero
        assert_eq!(enemy.take_damage(10, 0.0), 10);
    }

    #[test]
    fn test_take_damage_bypass() {
        let mut enemy = Enemy::spawn("Lava Golem", 1, false);
        assert_eq!(enemy.defense, 6.0);
        // 6 × (1 - 0.5) = 3
        assert_eq!(enemy.take_damage(10, 0.5), 7);
    }

    #[test]
    fn test_heal_capped() {
        let mut enemy = Enemy::spawn("Slime", 1, false);
        enemy.take_damage(6, 0.0);
        assert_eq!(enemy.heal(100), 5);
        assert_eq!(enemy.current_hp, enemy.max_hp);
    }

    #[test]
    fn test_gold_roll_in_range() {
        let enemy = Enemy::spawn("Slime", 1, false);
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        for _ in 0..500 {
            let gold = enemy.roll_gold(&mut rng);
            assert!((3..=6).contains(&gold));
        }
    }

    #[test]
    fn test_gold_fallback_range() {
        let mut enemy = Enemy::spawn("Slime", 1, false);
        enemy.gold_drop = (0, 0);
        enemy.max_hp = 200;
        let mut rng = ChaCha8Rng::seed_from_u64(22);
        for _ in 0..200 {
            let gold = enemy.roll_gold(&mut rng);
            assert!((10..=20).contains(&gold));
        }
    }

    #[test]
    fn test_effective_attack() {
        let mut enemy = Enemy::spawn("Ice Wolf", 1, false);
        enemy.effects.add(Effect::attack_multiplier(0.85, 2));
        assert_eq!(enemy.effective_attack(), 11.0);
    }
}
