use crate::character::{Hero, HeroClass, QuestState, SavedHero, SerializedState};
use crate::combat::Enemy;
use crate::core::balance::{BalanceOverrides, CombatBalance};
use crate::core::tick::TickEvent;
use crate::dungeons::DungeonProgress;
use crate::quests::{ProgressEvent, QuestLog};
use serde::{Deserialize, Serialize};

/// Running totals quests measure against. Persisted with the quest log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionCounters {
    pub total_gold_earned: u64,
    pub total_enemies_killed: u64,
    pub rare_items_collected: u64,
    pub items_sold: u64,
}

/// The whole mutable game: hero, live enemy, dungeon run and quests. Owned
/// by whoever drives the game and passed into every operation.
#[derive(Debug, Clone)]
pub struct GameSession {
    pub hero: Hero,
    /// At most one enemy is live at a time. `None` between fights.
    pub enemy: Option<Enemy>,
    pub dungeon: DungeonProgress,
    pub quests: QuestLog,
    pub counters: SessionCounters,
    pub balance: CombatBalance,
    /// Skill id to use on the next turn, if still ready then.
    pub pending_skill: Option<String>,
}

impl GameSession {
    pub fn new(name: impl Into<String>, class: HeroClass) -> Self {
        Self {
            hero: Hero::new(name, class),
            enemy: None,
            dungeon: DungeonProgress::new(),
            quests: QuestLog::new(),
            counters: SessionCounters::default(),
            balance: CombatBalance::default(),
            pending_skill: None,
        }
    }

    /// Rebuild a session from a save. Items past inventory capacity are
    /// dropped with a warning.
    pub fn from_saved(state: SerializedState) -> Self {
        let SerializedState {
            hero,
            upgrades,
            mut inventory,
            equipment,
            quest_state,
            current_dungeon,
            unlocked_dungeons,
            ..
        } = state;

        let overflow = inventory.truncate_to_capacity();
        if !overflow.is_empty() {
            log::warn!("Dropped {} items over inventory capacity", overflow.len());
        }

        let hero = Hero::from_parts(
            hero.name,
            hero.class,
            hero.base,
            inventory,
            equipment,
            upgrades,
        );

        Self {
            hero,
            enemy: None,
            dungeon: DungeonProgress::restore(&current_dungeon, &unlocked_dungeons),
            quests: QuestLog::restore(&quest_state.active_quests),
            counters: SessionCounters {
                total_gold_earned: quest_state.total_gold_earned,
                total_enemies_killed: quest_state.total_enemies_killed,
                rare_items_collected: quest_state.rare_items_collected,
                items_sold: quest_state.items_sold,
            },
            balance: CombatBalance::default(),
            pending_skill: None,
        }
    }

    /// Persistable view of the session.
    pub fn to_saved(&self) -> SerializedState {
        SerializedState {
            hero: SavedHero {
                name: self.hero.name.clone(),
                class: self.hero.class,
                base: self.hero.base.clone(),
            },
            upgrades: self.hero.upgrades.clone(),
            inventory: self.hero.inventory.clone(),
            equipment: self.hero.equipment.clone(),
            quest_state: QuestState {
                active_quests: self.quests.to_saved(),
                total_gold_earned: self.counters.total_gold_earned,
                total_enemies_killed: self.counters.total_enemies_killed,
                rare_items_collected: self.counters.rare_items_collected,
                items_sold: self.counters.items_sold,
            },
            current_dungeon: self.dungeon.current().id.to_string(),
            unlocked_dungeons: self.dungeon.unlocked_ids(),
            saved_at: 0,
        }
    }

    pub fn apply_balance_overrides(&mut self, overrides: &BalanceOverrides) {
        self.balance.apply_overrides(overrides);
    }

    pub fn is_boss_fight(&self) -> bool {
        self.enemy.as_ref().is_some_and(|e| e.is_boss)
    }

    /// Drop the live enemy and any queued skill. Cooldowns and hero effects
    /// keep running into the next fight.
    pub fn end_fight(&mut self) {
        self.enemy = None;
        self.pending_skill = None;
    }

    /// End the fight and reset the hero's cooldowns and effects. Used when
    /// the run is interrupted rather than won.
    pub fn leave_combat(&mut self) {
        self.end_fight();
        self.hero.clear_combat_state();
    }

    /// Feed a discrete quest event, then bring cumulative quests up to date.
    pub fn publish(&mut self, event: ProgressEvent) -> Vec<TickEvent> {
        let mut events = completion_events(self.quests.on_progress(event));
        events.extend(self.sync_quests());
        events
    }

    /// Publish every running total. Repeats while completions keep
    /// activating follow-ups, so a newly active quest sees current totals.
    pub fn sync_quests(&mut self) -> Vec<TickEvent> {
        let mut events = Vec::new();
        loop {
            let totals = [
                ProgressEvent::EnemiesDefeated(self.counters.total_enemies_killed),
                ProgressEvent::TotalGoldEarned(self.counters.total_gold_earned),
                ProgressEvent::HeroLevel(self.hero.base.level),
                ProgressEvent::RareItemsCollected(self.counters.rare_items_collected),
                ProgressEvent::ItemsSold(self.counters.items_sold),
            ];
            let before = events.len();
            for event in totals {
                events.extend(completion_events(self.quests.on_progress(event)));
            }
            if events.len() == before {
                return events;
            }
        }
    }
}

fn completion_events(completed: Vec<&'static crate::quests::QuestTemplate>) -> Vec<TickEvent> {
    completed
        .into_iter()
        .map(|quest| TickEvent::QuestCompleted {
            id: quest.id.to_string(),
            name: quest.name.to_string(),
        })
        .collect()
}
