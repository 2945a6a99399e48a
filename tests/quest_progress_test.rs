//! Quest tracking: completion, chaining, monotonicity and claiming.

use dungeon_quest::character::{HeroClass, UpgradeKey};
use dungeon_quest::core::{GameSession, TickEvent};
use dungeon_quest::error::ActionError;
use dungeon_quest::quests::{ProgressEvent, QuestLog};

#[test]
fn test_completion_is_monotonic() {
    let mut log = QuestLog::new();
    log.on_progress(ProgressEvent::EnemiesDefeated(4));
    assert_eq!(log.get("slay_10_mobs").unwrap().progress, 4);

    let completed = log.on_progress(ProgressEvent::EnemiesDefeated(12));
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].id, "slay_10_mobs");
    let snapshot = log.get("slay_10_mobs").unwrap().clone();
    assert!(snapshot.completed);

    for total in [3, 40, 500] {
        let again = log.on_progress(ProgressEvent::EnemiesDefeated(total));
        assert!(again.iter().all(|q| q.id != "slay_10_mobs"));
        assert_eq!(log.get("slay_10_mobs").unwrap(), &snapshot);
    }
}

#[test]
fn test_completion_activates_follow_up() {
    let mut log = QuestLog::new();
    assert!(!log.is_active("earn_1k_gold"));
    log.on_progress(ProgressEvent::EnemiesDefeated(10));
    assert!(log.is_active("earn_1k_gold"));
}

#[test]
fn test_unrelated_events_are_ignored() {
    let mut log = QuestLog::new();
    let before = log.clone();
    log.on_progress(ProgressEvent::DungeonClear("Abyss"));
    log.on_progress(ProgressEvent::ItemsSold(3));
    assert_eq!(log, before);
}

#[test]
fn test_discrete_upgrade_quest() {
    let mut session = GameSession::new("Trainee", HeroClass::Warrior);
    session.hero.base.gold = 10_000;
    for _ in 0..4 {
        let outcome = session.purchase_upgrade("attack").unwrap();
        assert!(outcome.events.is_empty());
    }
    assert_eq!(session.quests.get("upgrade_attack_1").unwrap().progress, 4);

    let outcome = session.purchase_upgrade("attack").unwrap();
    assert!(outcome
        .events
        .iter()
        .any(|e| matches!(e, TickEvent::QuestCompleted { id, .. } if id == "upgrade_attack_1")));
    assert_eq!(session.hero.upgrades.level(UpgradeKey::Attack), 5);
    assert!(session.quests.is_active("upgrade_defense_1"));
}

#[test]
fn test_claim_pays_reward_once() {
    let mut session = GameSession::new("Claimer", HeroClass::Mage);
    assert_eq!(
        session.claim_quest("slay_10_mobs"),
        Err(ActionError::QuestNotCompleted("slay_10_mobs".to_string()))
    );

    session.counters.total_enemies_killed = 10;
    session.sync_quests();
    session.claim_quest("slay_10_mobs").unwrap();
    assert_eq!(session.hero.base.gold, 500);
    assert_eq!(session.counters.total_gold_earned, 0);

    assert_eq!(
        session.claim_quest("slay_10_mobs"),
        Err(ActionError::QuestNotFound("slay_10_mobs".to_string()))
    );
    assert_eq!(session.hero.base.gold, 500);
}

#[test]
fn test_level_quest_completes_from_claimed_xp() {
    let mut session = GameSession::new("Climber", HeroClass::Warrior);
    session.hero.gain_xp(10_000);
    let events = session.sync_quests();
    assert!(events
        .iter()
        .any(|e| matches!(e, TickEvent::QuestCompleted { id, .. } if id == "reach_level_5")));
}
