use super::data::BossMechanic;
use super::effects::Effect;
use super::types::Enemy;
use crate::character::{Hero, SkillEffect, SkillKind};
use crate::core::balance::CombatBalance;
use crate::core::combat_math::{
    attack_count, calculate_damage, calculate_hero_attack, hero_base_damage,
};
use rand::Rng;

#[derive(Debug, Clone, PartialEq)]
pub enum CombatEvent {
    /// Hero activated a skill. `damage` is set for damage skills.
    SkillUsed {
        skill: String,
        damage: Option<u32>,
    },
    HeroAttack {
        damage: u32,
        was_crit: bool,
    },
    BossMechanicTriggered {
        mechanic: &'static str,
        /// HP healed, attack multiplier or defense added.
        value: f64,
    },
    EnemyAttack {
        damage: u32,
    },
}

/// Outcome of one turn. `finished` means one side is dead; check liveness
/// to see which.
#[derive(Debug, Clone, Default)]
pub struct TurnResult {
    pub finished: bool,
    pub events: Vec<CombatEvent>,
}

/// Resolve one turn: the hero acts, then the enemy if it survived.
///
/// `requested_skill` is used when ready; otherwise the first ready buff
/// (boss fights) or damage skill (everything else) is picked, falling back
/// to ordinary attacks.
pub fn resolve_turn<R: Rng>(
    hero: &mut Hero,
    enemy: &mut Enemy,
    is_boss_fight: bool,
    requested_skill: Option<&str>,
    balance: &CombatBalance,
    rng: &mut R,
) -> TurnResult {
    let mut events = Vec::new();

    hero_action(hero, enemy, is_boss_fight, requested_skill, balance, rng, &mut events);

    if !enemy.is_alive() {
        hero.tick_turn();
        enemy.tick_turn();
        return TurnResult {
            finished: true,
            events,
        };
    }

    enemy_action(hero, enemy, is_boss_fight, balance, rng, &mut events);

    if !hero.is_alive() {
        return TurnResult {
            finished: true,
            events,
        };
    }

    hero.tick_turn();
    enemy.tick_turn();
    TurnResult {
        finished: false,
        events,
    }
}

fn select_skill(hero: &Hero, is_boss_fight: bool, requested_skill: Option<&str>) -> Option<String> {
    if let Some(id) = requested_skill {
        if hero.skills.get_active(id).is_some_and(|s| s.is_ready()) {
            return Some(id.to_string());
        }
    }
    let kind = if is_boss_fight {
        SkillKind::Buff
    } else {
        SkillKind::Damage
    };
    hero.skills.first_ready(kind).map(|s| s.id.clone())
}

fn hero_action<R: Rng>(
    hero: &mut Hero,
    enemy: &mut Enemy,
    is_boss_fight: bool,
    requested_skill: Option<&str>,
    balance: &CombatBalance,
    rng: &mut R,
    events: &mut Vec<CombatEvent>,
) {
    let used = select_skill(hero, is_boss_fight, requested_skill)
        .and_then(|id| hero.skills.use_skill(&id));

    if let Some((name, effect)) = used {
        match effect {
            SkillEffect::Damage { multiplier, debuff } => {
                let base = hero_base_damage(
                    hero.derived.attack,
                    hero.attack_effects_multiplier(),
                    balance,
                );
                let raw = (base as f64 * multiplier.max(0.0)).floor() as u32;
                let dealt = enemy.take_damage(raw, balance.bypass_for(is_boss_fight));
                if let Some(debuff) = debuff {
                    enemy.effects.add(debuff);
                }
                log::debug!("{} hits {} for {}", name, enemy.name, dealt);
                events.push(CombatEvent::SkillUsed {
                    skill: name,
                    damage: Some(dealt),
                });
                return;
            }
            SkillEffect::Buff(buff) => {
                hero.effects.add(buff);
                events.push(CombatEvent::SkillUsed {
                    skill: name,
                    damage: None,
                });
            }
            SkillEffect::Debuff(debuff) => {
                enemy.effects.add(debuff);
                events.push(CombatEvent::SkillUsed {
                    skill: name,
                    damage: None,
                });
            }
        }
    }

    let attacks = attack_count(hero.derived.attack_speed, rng);
    for _ in 0..attacks {
        let attack = calculate_hero_attack(
            hero.derived.attack,
            hero.attack_effects_multiplier(),
            hero.derived.crit_chance,
            hero.derived.crit_multiplier,
            balance,
            rng,
        );
        let dealt = enemy.take_damage(attack.damage, 0.0);
        events.push(CombatEvent::HeroAttack {
            damage: dealt,
            was_crit: attack.is_crit,
        });
        if !enemy.is_alive() {
            break;
        }
    }
}

fn enemy_action<R: Rng>(
    hero: &mut Hero,
    enemy: &mut Enemy,
    is_boss_fight: bool,
    balance: &CombatBalance,
    rng: &mut R,
    events: &mut Vec<CombatEvent>,
) {
    if is_boss_fight {
        apply_boss_mechanics(enemy, rng, events);
    }

    let damage = calculate_damage(
        enemy.effective_attack(),
        hero.effective_defense(),
        balance.bypass_for(is_boss_fight),
        balance,
        rng,
    );
    let taken = hero.take_damage(damage);
    log::debug!("{} hits {} for {}", enemy.name, hero.name, taken);
    events.push(CombatEvent::EnemyAttack { damage: taken });
}

/// Each mechanic rolls independently; several can fire in one turn.
fn apply_boss_mechanics<R: Rng>(enemy: &mut Enemy, rng: &mut R, events: &mut Vec<CombatEvent>) {
    let mechanics = enemy.mechanics.clone();
    for mechanic in mechanics {
        if rng.gen::<f64>() >= mechanic.chance() {
            continue;
        }
        let value = match mechanic {
            BossMechanic::Heal {
                min_pct, max_pct, ..
            } => {
                let pct = if max_pct > min_pct {
                    rng.gen_range(min_pct..=max_pct)
                } else {
                    min_pct
                };
                let amount = (enemy.max_hp as f64 * pct).floor().max(1.0) as u32;
                enemy.heal(amount) as f64
            }
            BossMechanic::Summon {
                attack_mult, turns, ..
            } => {
                enemy.effects.add(Effect::attack_multiplier(attack_mult, turns));
                attack_mult
            }
            BossMechanic::AntiCrit {
                defense_add, turns, ..
            } => {
                enemy.effects.add(Effect::defense_add(defense_add, turns));
                defense_add
            }
        };
        events.push(CombatEvent::BossMechanicTriggered {
            mechanic: mechanic.name(),
            value,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::HeroClass;
    use crate::combat::effects::EffectKind;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn no_variance() -> CombatBalance {
        CombatBalance {
            damage_variance: 0.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_damage_skill_replaces_attacks() {
        let mut hero = Hero::new("Aria", HeroClass::Warrior);
        let mut enemy = Enemy::spawn("Abyssal Horror", 1, false);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let result = resolve_turn(&mut hero, &mut enemy, false, None, &no_variance(), &mut rng);

        // slash: floor(10 × 3) × 1.8 = 54, minus 9 defense
        assert_eq!(
            result.events[0],
            CombatEvent::SkillUsed {
                skill: "Slash".to_string(),
                damage: Some(45),
            }
        );
        assert!(!result
            .events
            .iter()
            .any(|e| matches!(e, CombatEvent::HeroAttack { .. })));
        assert_eq!(enemy.current_hp, 95 - 45);
        // cooldown was set to 2 and ticked once
        assert_eq!(hero.skills.get_active("slash").unwrap().remaining_cooldown, 1);
    }

    #[test]
    fn test_enemy_acts_after_damage_skill() {
        let mut hero = Hero::new("Aria", HeroClass::Warrior);
        let mut enemy = Enemy::spawn("Abyssal Horror", 1, false);
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let result = resolve_turn(&mut hero, &mut enemy, false, None, &no_variance(), &mut rng);
        assert!(!result.finished);
        // 15 attack - 5 × 0.5 defense
        assert!(result
            .events
            .contains(&CombatEvent::EnemyAttack { damage: 12 }));
        assert_eq!(hero.current_hp(), 88);
    }

    #[test]
    fn test_hero_damage_not_reduced_twice() {
        // damage to the hero is mitigated once by the damage formula and
        // applied raw by the hero
        let mut hero = Hero::new("Aria", HeroClass::Mage);
        hero.skills.actives.clear();
        let mut enemy = Enemy::spawn("Frost Golem", 1, false);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let result = resolve_turn(&mut hero, &mut enemy, false, None, &no_variance(), &mut rng);
        assert!(result
            .events
            .contains(&CombatEvent::EnemyAttack { damage: 9 }));
    }

    #[test]
    fn test_requested_skill_takes_priority() {
        let mut hero = Hero::new("Aria", HeroClass::Mage);
        let mut enemy = Enemy::spawn("Abyssal Horror", 1, false);
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let result = resolve_turn(
            &mut hero,
            &mut enemy,
            false,
            Some("frost_nova"),
            &no_variance(),
            &mut rng,
        );
        assert!(matches!(
            &result.events[0],
            CombatEvent::SkillUsed { skill, .. } if skill == "Frost Nova"
        ));
        // debuff applied then ticked once
        let debuff = enemy.effects.iter().next().unwrap();
        assert_eq!(debuff.kind, EffectKind::AttackMultiplier(0.85));
        assert_eq!(debuff.turns, 1);
    }

    #[test]
    fn test_requested_skill_on_cooldown_falls_back() {
        let mut hero = Hero::new("Aria", HeroClass::Mage);
        hero.skills.use_skill("meteor");
        let mut enemy = Enemy::spawn("Abyssal Horror", 1, false);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let result = resolve_turn(
            &mut hero,
            &mut enemy,
            false,
            Some("meteor"),
            &no_variance(),
            &mut rng,
        );
        assert!(matches!(
            &result.events[0],
            CombatEvent::SkillUsed { skill, .. } if skill == "Fireball"
        ));
    }

    #[test]
    fn test_boss_fight_uses_buff_then_attacks() {
        let mut hero = Hero::new("Aria", HeroClass::Warrior);
        let mut enemy = Enemy::spawn("Slime King", 1, true);
        enemy.mechanics.clear();
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let result = resolve_turn(&mut hero, &mut enemy, true, None, &no_variance(), &mut rng);
        assert_eq!(
            result.events[0],
            CombatEvent::SkillUsed {
                skill: "Rage".to_string(),
                damage: None,
            }
        );
        assert!(result
            .events
            .iter()
            .any(|e| matches!(e, CombatEvent::HeroAttack { .. })));
        assert!((hero.attack_effects_multiplier() - 1.4).abs() < 1e-9);
    }

    #[test]
    fn test_ordinary_attacks_without_skills() {
        let mut hero = Hero::new("Aria", HeroClass::Warrior);
        hero.skills.actives.clear();
        hero.base.dex = 50.0; // attack speed 2.0
        hero.calculate_stats();
        let mut enemy = Enemy::spawn("Abyssal Horror", 10, false);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let result = resolve_turn(&mut hero, &mut enemy, false, None, &no_variance(), &mut rng);
        let attacks = result
            .events
            .iter()
            .filter(|e| matches!(e, CombatEvent::HeroAttack { .. }))
            .count();
        assert_eq!(attacks, 2);
    }

    #[test]
    fn test_attack_loop_stops_when_enemy_dies() {
        let mut hero = Hero::new("Aria", HeroClass::Warrior);
        hero.skills.actives.clear();
        hero.base.dex = 150.0; // attack speed 4.0
        hero.calculate_stats();
        let mut enemy = Enemy::spawn("Slimeling", 1, false);
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let result = resolve_turn(&mut hero, &mut enemy, false, None, &no_variance(), &mut rng);
        assert!(result.finished);
        assert!(!enemy.is_alive());
        assert_eq!(result.events.len(), 1);
        assert_eq!(hero.current_hp(), 100);
    }

    #[test]
    fn test_hero_death_finishes_turn() {
        let mut hero = Hero::new("Aria", HeroClass::Warrior);
        hero.base.current_hp = 1;
        let mut enemy = Enemy::spawn("Void Emperor", 50, false);
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let result = resolve_turn(&mut hero, &mut enemy, false, None, &no_variance(), &mut rng);
        assert!(result.finished);
        assert!(!hero.is_alive());
        assert!(enemy.is_alive());
    }

    #[test]
    fn test_boss_mechanics_fire_independently() {
        let mut hero = Hero::new("Aria", HeroClass::Warrior);
        hero.base.max_hp = 100_000;
        hero.calculate_stats();
        hero.heal_full();
        let mut enemy = Enemy::spawn("Void Emperor", 50, true);
        enemy.mechanics = vec![
            BossMechanic::Heal {
                chance: 1.0,
                min_pct: 0.06,
                max_pct: 0.12,
            },
            BossMechanic::summon(1.0),
            BossMechanic::anti_crit(1.0),
        ];
        let mut rng = ChaCha8Rng::seed_from_u64(10);
        let result = resolve_turn(&mut hero, &mut enemy, true, None, &no_variance(), &mut rng);
        let fired: Vec<_> = result
            .events
            .iter()
            .filter_map(|e| match e {
                CombatEvent::BossMechanicTriggered { mechanic, .. } => Some(*mechanic),
                _ => None,
            })
            .collect();
        assert_eq!(fired, vec!["Heal", "Summon", "Anti-Crit"]);
        assert!((enemy.effects.attack_multiplier() - 1.12).abs() < 1e-9);
        assert_eq!(enemy.effects.defense_add(), 3.0);
    }

    #[test]
    fn test_level_one_hero_beats_slime_quickly() {
        for seed in 0..200 {
            let mut hero = Hero::new("Aria", HeroClass::Warrior);
            let mut enemy = Enemy::spawn("Slime", 1, false);
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let balance = CombatBalance::default();
            let mut turns = 0;
            loop {
                turns += 1;
                let result = resolve_turn(&mut hero, &mut enemy, false, None, &balance, &mut rng);
                if result.finished {
                    break;
                }
            }
            assert!(!enemy.is_alive());
            assert!(turns <= 3, "seed {} took {} turns", seed, turns);
        }
    }
}
