//! Per-tick orchestration.
//!
//! [`game_tick`] advances the session by one turn: it spawns an enemy when
//! none is live, otherwise resolves a combat turn and reacts to whichever
//! side fell. Everything that happened is returned as [`TickEvent`]s so the
//! caller can log or render it without the core knowing about either.

use std::fmt;

use crate::combat::{resolve_turn, CombatEvent};
use crate::core::constants::{BOSS_SHARD_REWARD, SHARDS_PER_DROP, SHARD_DROP_CHANCE};
use crate::core::game_state::GameSession;
use crate::dungeons::FloorAdvance;
use crate::items::{generate_loot, Item, Rarity};
use crate::quests::ProgressEvent;
use rand::Rng;

/// A single event produced by a tick or a command.
#[derive(Debug, Clone, PartialEq)]
pub enum TickEvent {
    // ── Combat ──────────────────────────────────────────────────
    /// Hero landed an ordinary attack.
    HeroAttack { damage: u32, was_crit: bool },

    /// Hero activated a skill. `damage` is set for damage skills.
    SkillUsed { skill: String, damage: Option<u32> },

    EnemyAttack { enemy_name: String, damage: u32 },

    /// A boss mechanic fired at the start of the enemy's action.
    BossMechanicTriggered {
        enemy_name: String,
        mechanic: &'static str,
        value: f64,
    },

    EnemySpawned {
        enemy_name: String,
        level: u32,
        is_boss: bool,
    },

    EnemyDefeated {
        enemy_name: String,
        xp_gained: u64,
        gold_gained: u64,
    },

    /// Hero fell. The run is over and progress on the floor is lost.
    HeroDied { enemy_name: String },

    // ── Rewards ─────────────────────────────────────────────────
    ItemLooted { item_name: String, rarity: Rarity },

    /// Loot or a relic was dropped because the inventory was full.
    LootDiscarded { item_name: String },

    ShardsFound { amount: u32 },

    LevelUp {
        new_level: u32,
        passives_unlocked: Vec<String>,
    },

    // ── Dungeon ─────────────────────────────────────────────────
    FloorCleared { floor: u32 },

    /// All floors are done; the next spawn is the boss.
    BossPhaseEntered { dungeon: String },

    DungeonCleared { dungeon: String },

    DungeonUnlocked { dungeon: String },

    RelicAwarded { relic: String },

    // ── Quests ──────────────────────────────────────────────────
    QuestCompleted { id: String, name: String },

    // ── Run ─────────────────────────────────────────────────────
    RunStopped { reason: String },
}

impl fmt::Display for TickEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TickEvent::HeroAttack { damage, was_crit } => {
                if *was_crit {
                    write!(f, "CRITICAL! You hit for {} damage", damage)
                } else {
                    write!(f, "You hit for {} damage", damage)
                }
            }
            TickEvent::SkillUsed {
                skill,
                damage: Some(damage),
            } => write!(f, "You use {} for {} damage", skill, damage),
            TickEvent::SkillUsed {
                skill,
                damage: None,
            } => write!(f, "You use {}", skill),
            TickEvent::EnemyAttack { enemy_name, damage } => {
                write!(f, "{} hits you for {} damage", enemy_name, damage)
            }
            TickEvent::BossMechanicTriggered {
                enemy_name,
                mechanic,
                value,
            } => write!(f, "{} uses {} ({:.2})", enemy_name, mechanic, value),
            TickEvent::EnemySpawned { enemy_name, .. } => write!(f, "{} appears", enemy_name),
            TickEvent::EnemyDefeated {
                enemy_name,
                xp_gained,
                gold_gained,
            } => write!(
                f,
                "{} defeated! +{} XP, +{} gold",
                enemy_name, xp_gained, gold_gained
            ),
            TickEvent::HeroDied { enemy_name } => {
                write!(f, "You were defeated by {}. Resting...", enemy_name)
            }
            TickEvent::ItemLooted { item_name, rarity } => {
                write!(f, "Loot: {} {}", rarity.name(), item_name)
            }
            TickEvent::LootDiscarded { item_name } => {
                write!(f, "Inventory full! {} was left behind", item_name)
            }
            TickEvent::ShardsFound { amount } => write!(f, "Found {} shard(s)", amount),
            TickEvent::LevelUp { new_level, .. } => write!(f, "Level up! Now level {}", new_level),
            TickEvent::FloorCleared { floor } => write!(f, "Floor {} cleared", floor),
            TickEvent::BossPhaseEntered { dungeon } => {
                write!(f, "All floors of {} cleared. The boss approaches!", dungeon)
            }
            TickEvent::DungeonCleared { dungeon } => write!(f, "{} cleared!", dungeon),
            TickEvent::DungeonUnlocked { dungeon } => write!(f, "New dungeon unlocked: {}", dungeon),
            TickEvent::RelicAwarded { relic } => write!(f, "Relic obtained: {}", relic),
            TickEvent::QuestCompleted { name, .. } => write!(f, "Quest completed: {}", name),
            TickEvent::RunStopped { reason } => write!(f, "Run stopped: {}", reason),
        }
    }
}

/// Result of processing a single tick.
#[derive(Debug, Clone, Default)]
pub struct TickResult {
    /// Events in chronological order.
    pub events: Vec<TickEvent>,
    /// Set when the hero died this tick. The run loop stops on it.
    pub hero_died: bool,
}

/// Processes one tick.
///
/// With no live enemy the hero is fully healed and the next enemy spawned;
/// no combat happens that tick. Otherwise one turn is resolved. A kill pays
/// out rewards, advances the dungeon and spawns the next enemy straight
/// away. A death heals the hero, drops the enemy and resets the run.
pub fn game_tick<R: Rng>(session: &mut GameSession, rng: &mut R) -> TickResult {
    let mut result = TickResult::default();

    let Some(enemy) = session.enemy.as_mut() else {
        session.hero.heal_full();
        spawn_next(session, rng, &mut result);
        return result;
    };

    let is_boss_fight = enemy.is_boss;
    let requested = session.pending_skill.take();
    let turn = resolve_turn(
        &mut session.hero,
        enemy,
        is_boss_fight,
        requested.as_deref(),
        &session.balance,
        rng,
    );
    let enemy_name = enemy.name.clone();
    let enemy_alive = enemy.is_alive();

    for event in turn.events {
        result.events.push(match event {
            CombatEvent::SkillUsed { skill, damage } => TickEvent::SkillUsed { skill, damage },
            CombatEvent::HeroAttack { damage, was_crit } => {
                TickEvent::HeroAttack { damage, was_crit }
            }
            CombatEvent::BossMechanicTriggered { mechanic, value } => {
                TickEvent::BossMechanicTriggered {
                    enemy_name: enemy_name.clone(),
                    mechanic,
                    value,
                }
            }
            CombatEvent::EnemyAttack { damage } => TickEvent::EnemyAttack {
                enemy_name: enemy_name.clone(),
                damage,
            },
        });
    }

    if !turn.finished {
        return result;
    }

    if !enemy_alive {
        on_enemy_defeated(session, rng, &mut result);
    } else if !session.hero.is_alive() {
        on_hero_died(session, enemy_name, &mut result);
    }

    result
}

fn spawn_next<R: Rng>(session: &mut GameSession, rng: &mut R, result: &mut TickResult) {
    let enemy = session.dungeon.spawn_enemy(session.hero.base.level, rng);
    log::debug!("Spawned {}", enemy.name);
    result.events.push(TickEvent::EnemySpawned {
        enemy_name: enemy.name.clone(),
        level: enemy.level,
        is_boss: enemy.is_boss,
    });
    session.enemy = Some(enemy);
}

fn on_enemy_defeated<R: Rng>(session: &mut GameSession, rng: &mut R, result: &mut TickResult) {
    let Some(enemy) = session.enemy.take() else {
        return;
    };
    session.end_fight();

    // ── XP and gold ─────────────────────────────────────────────
    let xp_gained = enemy.roll_xp();
    let gold_gained = enemy.roll_gold(rng);
    let level_up = session.hero.gain_xp(xp_gained);
    session.hero.base.gold += gold_gained;
    session.counters.total_enemies_killed += 1;
    session.counters.total_gold_earned += gold_gained;
    result.events.push(TickEvent::EnemyDefeated {
        enemy_name: enemy.name.clone(),
        xp_gained,
        gold_gained,
    });
    if level_up.leveled_up() {
        result.events.push(TickEvent::LevelUp {
            new_level: level_up.new_level,
            passives_unlocked: level_up.passives_unlocked,
        });
    }

    // ── Loot ────────────────────────────────────────────────────
    let dungeon = session.dungeon.current();
    if let Some(item) = generate_loot(session.hero.base.level, enemy.is_boss, Some(dungeon), rng) {
        store_item(session, item, result);
    }

    let shards = if enemy.is_boss {
        BOSS_SHARD_REWARD
    } else if rng.gen::<f64>() < SHARD_DROP_CHANCE {
        SHARDS_PER_DROP
    } else {
        0
    };
    if shards > 0 {
        session.hero.base.materials.shard += shards;
        result.events.push(TickEvent::ShardsFound { amount: shards });
    }

    // ── Dungeon progression ─────────────────────────────────────
    if enemy.is_boss {
        let clear = session.dungeon.on_boss_defeated();
        result.events.push(TickEvent::DungeonCleared {
            dungeon: clear.dungeon.to_string(),
        });
        if let Some(next) = clear.newly_unlocked {
            result.events.push(TickEvent::DungeonUnlocked {
                dungeon: next.to_string(),
            });
        }
        if let Some(relic) = clear.relic {
            match session.hero.add_item(Item::relic(relic)) {
                Ok(()) => result.events.push(TickEvent::RelicAwarded {
                    relic: relic.to_string(),
                }),
                Err(item) => result.events.push(TickEvent::LootDiscarded {
                    item_name: item.name,
                }),
            }
        }
        let events = session.publish(ProgressEvent::DungeonClear(clear.dungeon));
        result.events.extend(events);
    } else {
        match session.dungeon.on_enemy_defeated() {
            FloorAdvance::Continue => {}
            FloorAdvance::FloorCleared { floor } => {
                result.events.push(TickEvent::FloorCleared { floor });
            }
            FloorAdvance::BossPhaseEntered => {
                result.events.push(TickEvent::BossPhaseEntered {
                    dungeon: dungeon.id.to_string(),
                });
            }
        }
        let events = session.sync_quests();
        result.events.extend(events);
    }

    spawn_next(session, rng, result);
}

/// Put a looted item into the inventory, counting rare finds.
fn store_item(session: &mut GameSession, item: Item, result: &mut TickResult) {
    let rarity = item.rarity;
    match session.hero.add_item(item) {
        Ok(()) => {
            if let Some(stored) = session.hero.inventory.as_slice().last() {
                result.events.push(TickEvent::ItemLooted {
                    item_name: stored.name.clone(),
                    rarity,
                });
            }
            if rarity.is_rare_or_better() {
                session.counters.rare_items_collected += 1;
            }
        }
        Err(item) => {
            log::debug!("Inventory full, discarding {}", item.name);
            result.events.push(TickEvent::LootDiscarded {
                item_name: item.name,
            });
        }
    }
}

fn on_hero_died(session: &mut GameSession, enemy_name: String, result: &mut TickResult) {
    log::info!("{} was defeated by {}", session.hero.name, enemy_name);
    session.leave_combat();
    session.hero.heal_full();
    session.dungeon.on_hero_death();
    result.hero_died = true;
    result.events.push(TickEvent::HeroDied { enemy_name });
}

impl GameSession {
    /// Advance the session by one tick.
    pub fn tick<R: Rng>(&mut self, rng: &mut R) -> TickResult {
        game_tick(self, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::HeroClass;
    use crate::combat::{Effect, Enemy};
    use crate::core::constants::MAX_INVENTORY_SIZE;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    fn session() -> GameSession {
        GameSession::new("Tester", HeroClass::Warrior)
    }

    #[test]
    fn test_first_tick_heals_and_spawns() {
        let mut session = session();
        session.hero.base.current_hp = 10;
        let result = game_tick(&mut session, &mut test_rng());

        assert_eq!(session.hero.current_hp(), session.hero.max_hp());
        let enemy = session.enemy.as_ref().unwrap();
        assert!(!enemy.is_boss);
        assert!(matches!(
            result.events.as_slice(),
            [TickEvent::EnemySpawned { .. }]
        ));
        assert!(session.dungeon.battles_remaining >= 3);
    }

    #[test]
    fn test_kill_pays_out_and_respawns() {
        let mut session = session();
        let mut rng = test_rng();
        session.enemy = Some(Enemy::spawn("Slime", 1, false));
        session.dungeon.battles_remaining = 3;
        session.dungeon.total_battles = 3;

        let mut ticks = 0;
        while session.counters.total_enemies_killed == 0 {
            game_tick(&mut session, &mut rng);
            ticks += 1;
            assert!(ticks <= 3, "slime survived too long");
        }

        assert!(session.hero.base.gold > 0);
        assert_eq!(session.dungeon.battles_remaining, 2);
        assert_eq!(
            session.counters.total_gold_earned,
            session.hero.base.gold
        );
        assert!(session.enemy.is_some(), "next enemy spawns immediately");
        assert_eq!(session.quests.get("slay_10_mobs").unwrap().progress, 1);
    }

    #[test]
    fn test_floor_clear_event() {
        let mut session = session();
        let mut rng = test_rng();
        session.enemy = Some(Enemy::spawn("Slime", 1, false));
        session.dungeon.battles_remaining = 1;
        session.dungeon.total_battles = 1;

        let mut events = Vec::new();
        while session.counters.total_enemies_killed == 0 {
            events.extend(game_tick(&mut session, &mut rng).events);
        }
        assert!(events.contains(&TickEvent::FloorCleared { floor: 1 }));
        assert_eq!(session.dungeon.floor, 2);
    }

    #[test]
    fn test_hero_death_resets_run() {
        let mut session = session();
        let mut rng = test_rng();
        session.dungeon.floor = 4;
        session.dungeon.battles_remaining = 2;
        session.enemy = Some(Enemy::spawn("Void Emperor", 60, true));

        let mut died = false;
        for _ in 0..50 {
            let result = game_tick(&mut session, &mut rng);
            if result.hero_died {
                died = true;
                assert!(matches!(
                    result.events.last(),
                    Some(TickEvent::HeroDied { .. })
                ));
                break;
            }
        }

        assert!(died);
        assert!(session.enemy.is_none());
        assert_eq!(session.hero.current_hp(), session.hero.max_hp());
        assert_eq!(session.dungeon.floor, 1);
        assert_eq!(session.dungeon.battles_remaining, 0);
    }

    #[test]
    fn test_boss_kill_awards_relic_and_unlock() {
        let mut session = session();
        let mut rng = test_rng();
        session.hero.base.attack = 5_000.0;
        session.hero.calculate_stats();
        session.dungeon.boss_phase = true;
        session.enemy = Some(Enemy::spawn("Slime King", 10, true));

        let result = game_tick(&mut session, &mut rng);

        assert!(result.events.contains(&TickEvent::DungeonCleared {
            dungeon: "Cave of Slimes".to_string()
        }));
        assert!(result.events.contains(&TickEvent::DungeonUnlocked {
            dungeon: "Crypt of Bones".to_string()
        }));
        assert!(result.events.contains(&TickEvent::RelicAwarded {
            relic: "Corroded Core".to_string()
        }));
        assert!(session.dungeon.is_unlocked("Crypt of Bones"));
        assert!(session
            .hero
            .inventory
            .iter()
            .any(|i| i.name == "Corroded Core"));
        assert_eq!(session.hero.base.materials.shard, BOSS_SHARD_REWARD);
        assert!(!session.dungeon.boss_phase);
    }

    #[test]
    fn test_full_inventory_discards_loot() {
        let mut session = session();
        let mut rng = test_rng();
        for i in 0..MAX_INVENTORY_SIZE {
            session.hero.add_item(Item::relic(format!("Junk {}", i))).unwrap();
        }
        session.hero.base.attack = 5_000.0;
        session.hero.calculate_stats();
        session.dungeon.boss_phase = true;
        session.enemy = Some(Enemy::spawn("Slime King", 10, true));

        let result = game_tick(&mut session, &mut rng);

        assert_eq!(session.hero.inventory.len(), MAX_INVENTORY_SIZE);
        assert!(result.events.contains(&TickEvent::LootDiscarded {
            item_name: "Corroded Core".to_string()
        }));
    }

    #[test]
    fn test_cooldowns_and_buffs_carry_into_next_fight() {
        let mut session = session();
        let mut rng = test_rng();
        session.enemy = Some(Enemy::spawn("Slimeling", 1, false));
        session.dungeon.battles_remaining = 3;
        session.dungeon.total_battles = 3;
        session.hero.effects.add(Effect::attack_multiplier(1.4, 3));

        let result = game_tick(&mut session, &mut rng);

        assert!(result
            .events
            .iter()
            .any(|e| matches!(e, TickEvent::SkillUsed { skill, .. } if skill == "Slash")));
        assert_eq!(session.counters.total_enemies_killed, 1);
        // cooldown 2, one turn ticked
        let slash = session.hero.skills.get_active("slash").unwrap();
        assert_eq!(slash.remaining_cooldown, 1);
        let effects: Vec<_> = session.hero.effects.iter().collect();
        assert_eq!(effects.len(), 1);
        assert_eq!(effects[0].turns, 2);
        assert!(session.enemy.is_some());
    }

    #[test]
    fn test_requested_skill_is_consumed() {
        let mut session = session();
        let mut rng = test_rng();
        session.enemy = Some(Enemy::spawn("Slime", 1, false));
        session.pending_skill = Some("rage".to_string());

        let result = game_tick(&mut session, &mut rng);

        assert!(session.pending_skill.is_none());
        assert!(result.events.contains(&TickEvent::SkillUsed {
            skill: "Rage".to_string(),
            damage: None,
        }));
    }

    #[test]
    fn test_event_messages() {
        let event = TickEvent::EnemyDefeated {
            enemy_name: "Slime (Lv 1)".to_string(),
            xp_gained: 5,
            gold_gained: 3,
        };
        assert_eq!(event.to_string(), "Slime (Lv 1) defeated! +5 XP, +3 gold");
        assert_eq!(
            TickEvent::HeroAttack {
                damage: 30,
                was_crit: true
            }
            .to_string(),
            "CRITICAL! You hit for 30 damage"
        );
    }
}
