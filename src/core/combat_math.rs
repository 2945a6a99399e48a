//! Shared combat math functions.
//!
//! These pure functions calculate combat outcomes without side effects.
//! The combat resolver and the balance simulator both go through them.

use super::balance::CombatBalance;
use super::constants::{MAX_CRIT_CHANCE, MIN_CRIT_MULTIPLIER};
use rand::Rng;

/// Result of a single hero attack calculation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackResult {
    /// Damage before the defender's own mitigation.
    pub damage: u32,
    /// Whether this attack was a critical hit.
    pub is_crit: bool,
}

/// Shared damage formula for attacks that are mitigated by the caller.
///
/// # Arguments
/// * `attacker_attack` - Effective attack of the attacker
/// * `defender_defense` - Effective defense of the defender
/// * `bypass_fraction` - Share of effective defense to ignore (0.0 - 1.0)
/// * `balance` - Runtime tunables (defense effectiveness, variance)
///
/// # Returns
/// Damage after defense and variance, never below 1
pub fn calculate_damage(
    attacker_attack: f64,
    defender_defense: f64,
    bypass_fraction: f64,
    balance: &CombatBalance,
    rng: &mut impl Rng,
) -> u32 {
    let attack = sanitize(attacker_attack);
    let defense = sanitize(defender_defense);
    let bypass = sanitize(bypass_fraction);

    let effective_defense_base = defense * balance.defense_effectiveness;
    let bypassed = effective_defense_base * bypass;
    let effective_defense = (effective_defense_base - bypassed).max(0.0);
    let raw = attack - effective_defense;

    let variance = 1.0 + rng.gen_range(-1.0..=1.0) * balance.damage_variance;
    (raw * variance).floor().max(1.0) as u32
}

/// Roll for a critical hit. Chance is capped at 95%.
pub fn roll_crit(crit_chance: f64, rng: &mut impl Rng) -> bool {
    let chance = sanitize(crit_chance).min(MAX_CRIT_CHANCE);
    rng.gen::<f64>() < chance
}

/// Number of attacks this turn: the whole part of attack speed, plus one
/// more with probability equal to the fractional part.
pub fn attack_count(attack_speed: f64, rng: &mut impl Rng) -> u32 {
    let speed = sanitize(attack_speed);
    let whole = speed.floor();
    let fraction = speed - whole;
    let extra = if fraction > 0.0 && rng.gen::<f64>() < fraction {
        1
    } else {
        0
    };
    whole as u32 + extra
}

/// Base damage of a hero hit before crits: `floor(attack × mult × effects)`.
pub fn hero_base_damage(attack: f64, attack_effects_mult: f64, balance: &CombatBalance) -> u32 {
    (sanitize(attack) * balance.hero_attack_mult * sanitize(attack_effects_mult)).floor() as u32
}

/// Calculate one ordinary hero hit with crit roll.
pub fn calculate_hero_attack(
    attack: f64,
    attack_effects_mult: f64,
    crit_chance: f64,
    crit_multiplier: f64,
    balance: &CombatBalance,
    rng: &mut impl Rng,
) -> AttackResult {
    let mut damage = hero_base_damage(attack, attack_effects_mult, balance);
    let is_crit = roll_crit(crit_chance, rng);
    if is_crit {
        let mult = sanitize(crit_multiplier).max(MIN_CRIT_MULTIPLIER);
        damage = (damage as f64 * mult).floor() as u32;
    }
    AttackResult { damage, is_crit }
}

/// Non-finite and negative stats count as zero.
pub fn sanitize(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_damage_never_below_one() {
        let balance = CombatBalance::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..1000 {
            assert!(calculate_damage(1.0, 10_000.0, 0.0, &balance, &mut rng) >= 1);
            assert!(calculate_damage(0.0, 0.0, 0.0, &balance, &mut rng) >= 1);
        }
    }

    #[test]
    fn test_damage_within_variance_band() {
        let balance = CombatBalance::default();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        // 100 attack vs 20 defense: 100 - 10 = 90 raw, ±12%
        for _ in 0..1000 {
            let dmg = calculate_damage(100.0, 20.0, 0.0, &balance, &mut rng);
            assert!((79..=100).contains(&dmg), "damage {} out of band", dmg);
        }
    }

    #[test]
    fn test_bypass_reduces_effective_defense() {
        let balance = CombatBalance {
            damage_variance: 0.0,
            ..Default::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let normal = calculate_damage(50.0, 40.0, 0.0, &balance, &mut rng);
        let bypassed = calculate_damage(50.0, 40.0, 0.35, &balance, &mut rng);
        assert_eq!(normal, 30);
        assert_eq!(bypassed, 37);
    }

    #[test]
    fn test_malformed_stats_coerced() {
        let balance = CombatBalance {
            damage_variance: 0.0,
            ..Default::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert_eq!(calculate_damage(f64::NAN, 5.0, 0.0, &balance, &mut rng), 1);
        assert_eq!(calculate_damage(12.0, f64::NAN, 0.0, &balance, &mut rng), 12);
    }

    #[test]
    fn test_attack_count_whole_speed() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for _ in 0..100 {
            assert_eq!(attack_count(1.0, &mut rng), 1);
            assert_eq!(attack_count(2.0, &mut rng), 2);
        }
    }

    #[test]
    fn test_attack_count_fractional_distribution() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let trials = 10_000;
        let doubles = (0..trials)
            .filter(|_| attack_count(1.3, &mut rng) == 2)
            .count();
        let rate = doubles as f64 / trials as f64;
        assert!((rate - 0.3).abs() < 0.03, "extra attack rate {}", rate);
    }

    #[test]
    fn test_crit_chance_capped() {
        let mut rng = ChaCha8Rng::seed_from_u64(13);
        let trials = 10_000;
        let crits = (0..trials).filter(|_| roll_crit(5.0, &mut rng)).count();
        let rate = crits as f64 / trials as f64;
        assert!(rate < 0.97 && rate > 0.93, "crit rate {}", rate);
    }

    #[test]
    fn test_hero_attack_crit_multiplier_floor() {
        let balance = CombatBalance::default();
        let mut rng = ChaCha8Rng::seed_from_u64(17);
        for _ in 0..200 {
            let result = calculate_hero_attack(10.0, 1.0, 0.95, 0.5, &balance, &mut rng);
            // crit multiplier below 1.0 is raised to 1.0
            assert_eq!(result.damage, 30);
        }
    }

    #[test]
    fn test_hero_base_damage_floors() {
        let balance = CombatBalance::default();
        assert_eq!(hero_base_damage(10.0, 1.0, &balance), 30);
        assert_eq!(hero_base_damage(10.0, 1.4, &balance), 42);
        assert_eq!(hero_base_damage(3.5, 1.0, &balance), 10);
    }
}
