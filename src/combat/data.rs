//! Enemy templates, keyed by base type name.

use crate::core::constants::*;

/// Probabilistic boss behavior, rolled once per enemy turn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BossMechanic {
    /// Restore a random share of max HP within `[min_pct, max_pct]`.
    Heal { chance: f64, min_pct: f64, max_pct: f64 },
    /// Adds pump the boss's attack for a few turns.
    Summon {
        chance: f64,
        attack_mult: f64,
        turns: u32,
    },
    /// The boss braces, gaining defense for a few turns.
    AntiCrit {
        chance: f64,
        defense_add: f64,
        turns: u32,
    },
}

impl BossMechanic {
    pub fn name(&self) -> &'static str {
        match self {
            BossMechanic::Heal { .. } => "Heal",
            BossMechanic::Summon { .. } => "Summon",
            BossMechanic::AntiCrit { .. } => "Anti-Crit",
        }
    }

    pub fn chance(&self) -> f64 {
        match self {
            BossMechanic::Heal { chance, .. }
            | BossMechanic::Summon { chance, .. }
            | BossMechanic::AntiCrit { chance, .. } => *chance,
        }
    }

    pub const fn heal(chance: f64) -> Self {
        BossMechanic::Heal {
            chance,
            min_pct: BOSS_HEAL_MIN_PCT,
            max_pct: BOSS_HEAL_MAX_PCT,
        }
    }

    pub const fn summon(chance: f64) -> Self {
        BossMechanic::Summon {
            chance,
            attack_mult: BOSS_SUMMON_ATTACK_MULT,
            turns: BOSS_SUMMON_DURATION,
        }
    }

    pub const fn anti_crit(chance: f64) -> Self {
        BossMechanic::AntiCrit {
            chance,
            defense_add: BOSS_ANTI_CRIT_DEFENSE,
            turns: BOSS_ANTI_CRIT_DURATION,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct EnemyTemplate {
    pub name: &'static str,
    pub base_hp: f64,
    pub base_attack: f64,
    pub base_defense: f64,
    pub gold_drop: (u64, u64),
    pub xp_drop: u64,
    pub mechanics: &'static [BossMechanic],
}

const fn mob(
    name: &'static str,
    base_hp: f64,
    base_attack: f64,
    base_defense: f64,
    gold_drop: (u64, u64),
    xp_drop: u64,
) -> EnemyTemplate {
    EnemyTemplate {
        name,
        base_hp,
        base_attack,
        base_defense,
        gold_drop,
        xp_drop,
        mechanics: &[],
    }
}

const ENEMY_TEMPLATES: [EnemyTemplate; 20] = [
    // Cave of Slimes
    mob("Slime", 10.0, 6.0, 1.0, (3, 6), 12),
    mob("Poison Slime", 14.0, 8.0, 1.0, (4, 7), 15),
    mob("Slimeling", 8.0, 5.0, 0.0, (2, 5), 9),
    EnemyTemplate {
        name: "Slime King",
        base_hp: 120.0,
        base_attack: 9.0,
        base_defense: 4.0,
        gold_drop: (80, 120),
        xp_drop: 150,
        mechanics: &[BossMechanic::heal(0.2)],
    },
    // Crypt of Bones
    mob("Skeleton", 40.0, 9.0, 3.0, (6, 10), 18),
    mob("Zombie", 55.0, 8.0, 2.0, (6, 11), 20),
    mob("Bone Archer", 32.0, 11.0, 1.0, (7, 12), 19),
    EnemyTemplate {
        name: "Bone Warden",
        base_hp: 150.0,
        base_attack: 12.0,
        base_defense: 6.0,
        gold_drop: (150, 220),
        xp_drop: 260,
        mechanics: &[BossMechanic::summon(0.25), BossMechanic::anti_crit(0.2)],
    },
    // Inferno Keep
    mob("Fire Imp", 45.0, 12.0, 3.0, (10, 16), 26),
    mob("Lava Golem", 70.0, 10.0, 6.0, (12, 18), 30),
    mob("Smoke Hound", 50.0, 13.0, 2.0, (10, 17), 27),
    EnemyTemplate {
        name: "Flame Tyrant",
        base_hp: 180.0,
        base_attack: 14.0,
        base_defense: 8.0,
        gold_drop: (260, 360),
        xp_drop: 420,
        mechanics: &[BossMechanic::heal(0.15), BossMechanic::summon(0.25)],
    },
    // Frost Hollow
    mob("Ice Wolf", 55.0, 14.0, 4.0, (15, 22), 34),
    mob("Frost Golem", 85.0, 12.0, 8.0, (16, 25), 38),
    mob("Snow Wisp", 45.0, 16.0, 3.0, (14, 22), 33),
    EnemyTemplate {
        name: "Glacier Lord",
        base_hp: 210.0,
        base_attack: 16.0,
        base_defense: 10.0,
        gold_drop: (400, 540),
        xp_drop: 640,
        mechanics: &[BossMechanic::anti_crit(0.3), BossMechanic::heal(0.15)],
    },
    // Abyss
    mob("Voidling", 60.0, 16.0, 5.0, (20, 30), 44),
    mob("Abyssal Horror", 95.0, 15.0, 9.0, (22, 34), 50),
    mob("Chaos Wisp", 50.0, 19.0, 4.0, (20, 31), 43),
    EnemyTemplate {
        name: "Void Emperor",
        base_hp: 250.0,
        base_attack: 18.0,
        base_defense: 12.0,
        gold_drop: (600, 800),
        xp_drop: 1000,
        mechanics: &[
            BossMechanic::heal(0.15),
            BossMechanic::summon(0.2),
            BossMechanic::anti_crit(0.2),
        ],
    },
];

pub fn get_enemy_template(name: &str) -> Option<&'static EnemyTemplate> {
    ENEMY_TEMPLATES.iter().find(|template| template.name == name)
}

pub fn all_enemy_templates() -> &'static [EnemyTemplate] {
    &ENEMY_TEMPLATES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        let slime = get_enemy_template("Slime").unwrap();
        assert_eq!(slime.base_hp, 10.0);
        assert!(slime.mechanics.is_empty());
        assert!(get_enemy_template("Goblin").is_none());
    }

    #[test]
    fn test_templates_are_sane() {
        for template in all_enemy_templates() {
            assert!(template.base_hp > 0.0, "{}", template.name);
            assert!(template.gold_drop.0 <= template.gold_drop.1, "{}", template.name);
            for mechanic in template.mechanics {
                assert!((0.0..=1.0).contains(&mechanic.chance()));
            }
        }
    }

    #[test]
    fn test_mechanic_defaults() {
        match BossMechanic::heal(0.2) {
            BossMechanic::Heal { min_pct, max_pct, .. } => {
                assert_eq!(min_pct, 0.06);
                assert!((max_pct - 0.12).abs() < 1e-9);
            }
            other => panic!("unexpected mechanic {:?}", other),
        }
        assert_eq!(
            BossMechanic::summon(0.1),
            BossMechanic::Summon {
                chance: 0.1,
                attack_mult: 1.12,
                turns: 3
            }
        );
    }
}
