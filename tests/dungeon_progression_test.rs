//! Dungeon runs through the session tick: floors, boss phase, unlocks and
//! relics.

use dungeon_quest::character::HeroClass;
use dungeon_quest::core::{GameSession, TickEvent};
use dungeon_quest::dungeons::RunPhase;
use dungeon_quest::items::{get_shop_item, ItemType};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn test_rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(42)
}

/// Spawn the boss and leave it on 1 HP so the next hero action kills it.
fn session_facing_weak_boss(rng: &mut ChaCha8Rng) -> GameSession {
    let mut session = GameSession::new("Slayer", HeroClass::Warrior);
    session.dungeon.boss_phase = true;
    session.tick(rng);
    let boss = session.enemy.as_mut().expect("boss spawned");
    assert!(boss.is_boss);
    boss.current_hp = 1;
    session
}

#[test]
fn test_boss_defeat_unlocks_next_dungeon_and_awards_relic() {
    let mut rng = test_rng();
    let mut session = session_facing_weak_boss(&mut rng);
    assert!(!session.dungeon.is_unlocked("Crypt of Bones"));

    let result = session.tick(&mut rng);

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
        .any(|item| item.item_type == ItemType::Relic && item.name == "Corroded Core"));
    assert_eq!(session.hero.base.materials.shard, 3);

    // The run loops back to floor 1 of the same dungeon
    assert_eq!(session.dungeon.current().id, "Cave of Slimes");
    assert_eq!(session.dungeon.floor, 1);
    assert!(!session.dungeon.boss_phase);
    assert!(session.enemy.as_ref().is_some_and(|e| !e.is_boss));
}

#[test]
fn test_second_clear_does_not_unlock_again() {
    let mut rng = test_rng();
    let mut session = session_facing_weak_boss(&mut rng);
    session.tick(&mut rng);

    session.dungeon.boss_phase = true;
    session.end_fight();
    session.tick(&mut rng);
    if let Some(boss) = session.enemy.as_mut() {
        boss.current_hp = 1;
    }
    let result = session.tick(&mut rng);

    assert!(result
        .events
        .iter()
        .any(|e| matches!(e, TickEvent::DungeonCleared { .. })));
    assert!(!result
        .events
        .iter()
        .any(|e| matches!(e, TickEvent::DungeonUnlocked { .. })));
    assert!(result.events.contains(&TickEvent::RelicAwarded {
        relic: "Corroded Core".to_string()
    }));
}

#[test]
fn test_relic_discarded_when_inventory_full() {
    let mut rng = test_rng();
    let mut session = session_facing_weak_boss(&mut rng);
    let potion = get_shop_item("health_potion").unwrap();
    while session.hero.add_item(potion.instantiate()).is_ok() {}

    let result = session.tick(&mut rng);

    assert!(result.events.contains(&TickEvent::LootDiscarded {
        item_name: "Corroded Core".to_string()
    }));
    assert!(session.dungeon.is_unlocked("Crypt of Bones"));
    assert!(!session
        .hero
        .inventory
        .iter()
        .any(|item| item.item_type == ItemType::Relic));
}

#[test]
fn test_last_floor_enters_boss_phase() {
    let mut rng = test_rng();
    let mut session = GameSession::new("Climber", HeroClass::Mage);
    session.tick(&mut rng);
    session.dungeon.floor = 10;
    session.dungeon.battles_remaining = 1;
    if let Some(enemy) = session.enemy.as_mut() {
        enemy.current_hp = 1;
    }

    let result = session.tick(&mut rng);

    assert!(result.events.contains(&TickEvent::BossPhaseEntered {
        dungeon: "Cave of Slimes".to_string()
    }));
    assert_eq!(session.dungeon.phase(), RunPhase::BossPhase);
    assert_eq!(session.dungeon.progress_percent(), 100);
    assert!(session.is_boss_fight());
}

#[test]
fn test_death_resets_floor_progress() {
    let mut rng = test_rng();
    let mut session = GameSession::new("Unlucky", HeroClass::Warrior);
    session.tick(&mut rng);
    session.dungeon.floor = 6;
    session.hero.base.current_hp = 1;
    let enemy = session.enemy.as_mut().expect("enemy spawned");
    enemy.max_hp = 100_000;
    enemy.current_hp = 100_000;
    enemy.attack = 10_000.0;

    let result = session.tick(&mut rng);

    assert!(result.hero_died);
    assert_eq!(session.dungeon.floor, 1);
    assert!(session.enemy.is_none());
    assert_eq!(session.hero.current_hp(), session.hero.max_hp());
}

#[test]
fn test_locked_dungeon_cannot_be_entered() {
    let mut session = GameSession::new("Eager", HeroClass::Warrior);
    assert!(session.change_dungeon("Abyss").is_err());
    assert!(session.change_dungeon("Atlantis").is_err());
    assert_eq!(session.dungeon.current().id, "Cave of Slimes");
}
