//! Quest goals, progress events and the active quest log.

use serde::{Deserialize, Serialize};

use super::data::{get_quest, INITIAL_QUESTS};
use crate::character::UpgradeKey;
use crate::error::{ActionError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GoalType {
    EnemiesDefeated,
    TotalGoldEarned,
    HeroLevel,
    DungeonClear,
    UpgradeStat,
    RareItemsCollected,
    ItemsSold,
}

impl GoalType {
    pub const ALL: [GoalType; 7] = [
        GoalType::EnemiesDefeated,
        GoalType::TotalGoldEarned,
        GoalType::HeroLevel,
        GoalType::DungeonClear,
        GoalType::UpgradeStat,
        GoalType::RareItemsCollected,
        GoalType::ItemsSold,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            GoalType::EnemiesDefeated => "Enemies Defeated",
            GoalType::TotalGoldEarned => "Total Gold Earned",
            GoalType::HeroLevel => "Hero Level",
            GoalType::DungeonClear => "Dungeon Clear",
            GoalType::UpgradeStat => "Upgrade Stat",
            GoalType::RareItemsCollected => "Rare Items Collected",
            GoalType::ItemsSold => "Items Sold",
        }
    }

    /// Cumulative goals take the running total as their progress; the others
    /// count matching events.
    pub fn is_cumulative(&self) -> bool {
        !matches!(self, GoalType::DungeonClear | GoalType::UpgradeStat)
    }
}

/// Sub-target a discrete goal has to match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalTarget {
    Stat(UpgradeKey),
    Dungeon(&'static str),
}

/// Something that happened which quests may care about. Cumulative
/// variants carry the authoritative running total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressEvent<'a> {
    EnemiesDefeated(u64),
    TotalGoldEarned(u64),
    HeroLevel(u32),
    DungeonClear(&'a str),
    UpgradeStat(UpgradeKey),
    RareItemsCollected(u64),
    ItemsSold(u64),
}

impl ProgressEvent<'_> {
    pub fn goal_type(&self) -> GoalType {
        match self {
            ProgressEvent::EnemiesDefeated(_) => GoalType::EnemiesDefeated,
            ProgressEvent::TotalGoldEarned(_) => GoalType::TotalGoldEarned,
            ProgressEvent::HeroLevel(_) => GoalType::HeroLevel,
            ProgressEvent::DungeonClear(_) => GoalType::DungeonClear,
            ProgressEvent::UpgradeStat(_) => GoalType::UpgradeStat,
            ProgressEvent::RareItemsCollected(_) => GoalType::RareItemsCollected,
            ProgressEvent::ItemsSold(_) => GoalType::ItemsSold,
        }
    }

    fn running_total(&self) -> Option<u64> {
        match *self {
            ProgressEvent::EnemiesDefeated(n)
            | ProgressEvent::TotalGoldEarned(n)
            | ProgressEvent::RareItemsCollected(n)
            | ProgressEvent::ItemsSold(n) => Some(n),
            ProgressEvent::HeroLevel(level) => Some(level as u64),
            ProgressEvent::DungeonClear(_) | ProgressEvent::UpgradeStat(_) => None,
        }
    }

    fn matches(&self, target: Option<GoalTarget>) -> bool {
        match (self, target) {
            (ProgressEvent::DungeonClear(id), Some(GoalTarget::Dungeon(goal))) => *id == goal,
            (ProgressEvent::UpgradeStat(key), Some(GoalTarget::Stat(goal))) => *key == goal,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuestTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub goal: GoalType,
    pub target: Option<GoalTarget>,
    pub goal_amount: u64,
    pub reward_gold: u64,
    pub reward_xp: u64,
    /// Quest activated when this one completes.
    pub unlocks: Option<&'static str>,
}

/// An active quest and its progress.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestInstance {
    pub template: &'static QuestTemplate,
    pub progress: u64,
    pub completed: bool,
}

impl QuestInstance {
    pub fn new(template: &'static QuestTemplate) -> Self {
        Self {
            template,
            progress: 0,
            completed: false,
        }
    }

    pub fn id(&self) -> &'static str {
        self.template.id
    }

    /// Apply one event. Returns true when this event completed the quest.
    fn apply(&mut self, event: &ProgressEvent) -> bool {
        if self.completed || event.goal_type() != self.template.goal {
            return false;
        }
        match event.running_total() {
            Some(total) => self.progress = total,
            None if event.matches(self.template.target) => self.progress += 1,
            None => return false,
        }
        if self.progress >= self.template.goal_amount {
            self.completed = true;
            return true;
        }
        false
    }
}

/// Persisted form of a [`QuestInstance`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedQuest {
    pub id: String,
    #[serde(default)]
    pub progress: u64,
    #[serde(default)]
    pub completed: bool,
}

/// Gold and XP paid out by a claimed quest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestReward {
    pub gold: u64,
    pub xp: u64,
}

/// Active quests, in activation order.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestLog {
    active: Vec<QuestInstance>,
}

impl Default for QuestLog {
    fn default() -> Self {
        Self::new()
    }
}

impl QuestLog {
    /// A new game's quest log.
    pub fn new() -> Self {
        let mut log = Self { active: Vec::new() };
        for id in INITIAL_QUESTS {
            log.activate(id);
        }
        log
    }

    pub fn empty() -> Self {
        Self { active: Vec::new() }
    }

    /// Rebuild from saved instances. Unknown and duplicate ids are dropped.
    pub fn restore(saved: &[SavedQuest]) -> Self {
        let mut log = Self::empty();
        for quest in saved {
            let Some(template) = get_quest(&quest.id) else {
                log::warn!("Dropping unknown saved quest {}", quest.id);
                continue;
            };
            if log.is_active(template.id) {
                continue;
            }
            log.active.push(QuestInstance {
                template,
                progress: quest.progress,
                completed: quest.completed || quest.progress >= template.goal_amount,
            });
        }
        log
    }

    pub fn to_saved(&self) -> Vec<SavedQuest> {
        self.active
            .iter()
            .map(|q| SavedQuest {
                id: q.id().to_string(),
                progress: q.progress,
                completed: q.completed,
            })
            .collect()
    }

    pub fn active(&self) -> &[QuestInstance] {
        &self.active
    }

    pub fn get(&self, id: &str) -> Option<&QuestInstance> {
        self.active.iter().find(|q| q.id() == id)
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Add a fresh instance of `id` unless it is already active.
    pub fn activate(&mut self, id: &str) -> bool {
        let Some(template) = get_quest(id) else {
            log::warn!("Cannot activate unknown quest {}", id);
            return false;
        };
        if self.is_active(template.id) {
            return false;
        }
        self.active.push(QuestInstance::new(template));
        true
    }

    /// Feed one event to every matching open quest. Returns the quests it
    /// completed; their follow-up quests are activated afterwards.
    pub fn on_progress(&mut self, event: ProgressEvent) -> Vec<&'static QuestTemplate> {
        let completed: Vec<&'static QuestTemplate> = self
            .active
            .iter_mut()
            .filter_map(|quest| quest.apply(&event).then_some(quest.template))
            .collect();

        for template in &completed {
            log::info!("Quest completed: {}", template.name);
            if let Some(next) = template.unlocks {
                self.activate(next);
            }
        }
        completed
    }

    /// Remove a completed quest and return its reward.
    pub fn claim(&mut self, id: &str) -> Result<QuestReward> {
        let index = self
            .active
            .iter()
            .position(|q| q.id() == id)
            .ok_or_else(|| ActionError::QuestNotFound(id.to_string()))?;
        if !self.active[index].completed {
            return Err(ActionError::QuestNotCompleted(id.to_string()));
        }
        let quest = self.active.remove(index);
        Ok(QuestReward {
            gold: quest.template.reward_gold,
            xp: quest.template.reward_xp,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_quests() {
        let log = QuestLog::new();
        let ids: Vec<_> = log.active().iter().map(|q| q.id()).collect();
        assert_eq!(ids, vec!["slay_10_mobs", "reach_level_5", "upgrade_attack_1"]);
        assert!(log.active().iter().all(|q| q.progress == 0 && !q.completed));
    }

    #[test]
    fn test_cumulative_progress_overwrites() {
        let mut log = QuestLog::new();
        log.on_progress(ProgressEvent::EnemiesDefeated(4));
        log.on_progress(ProgressEvent::EnemiesDefeated(7));
        assert_eq!(log.get("slay_10_mobs").unwrap().progress, 7);
    }

    #[test]
    fn test_completion_activates_follow_up() {
        let mut log = QuestLog::new();
        let completed = log.on_progress(ProgressEvent::EnemiesDefeated(10));
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].id, "slay_10_mobs");
        assert!(log.get("slay_10_mobs").unwrap().completed);
        let follow_up = log.get("earn_1k_gold").unwrap();
        assert_eq!(follow_up.progress, 0);
        assert!(!follow_up.completed);
    }

    #[test]
    fn test_completed_quest_is_frozen() {
        let mut log = QuestLog::new();
        log.on_progress(ProgressEvent::EnemiesDefeated(12));
        let completed = log.on_progress(ProgressEvent::EnemiesDefeated(30));
        assert!(completed.is_empty());
        let quest = log.get("slay_10_mobs").unwrap();
        assert_eq!(quest.progress, 12);
        assert!(quest.completed);
    }

    #[test]
    fn test_discrete_goal_needs_matching_target() {
        let mut log = QuestLog::new();
        log.on_progress(ProgressEvent::UpgradeStat(UpgradeKey::Defense));
        assert_eq!(log.get("upgrade_attack_1").unwrap().progress, 0);
        for _ in 0..4 {
            log.on_progress(ProgressEvent::UpgradeStat(UpgradeKey::Attack));
        }
        assert_eq!(log.get("upgrade_attack_1").unwrap().progress, 4);
        let completed = log.on_progress(ProgressEvent::UpgradeStat(UpgradeKey::Attack));
        assert_eq!(completed[0].id, "upgrade_attack_1");
    }

    #[test]
    fn test_dungeon_clear_matches_dungeon_id() {
        let mut log = QuestLog::empty();
        log.activate("clear_cave_of_slimes");
        log.on_progress(ProgressEvent::DungeonClear("Crypt of Bones"));
        assert!(!log.get("clear_cave_of_slimes").unwrap().completed);
        log.on_progress(ProgressEvent::DungeonClear("Cave of Slimes"));
        assert!(log.get("clear_cave_of_slimes").unwrap().completed);
        assert!(log.is_active("slay_50_mobs"));
    }

    #[test]
    fn test_activate_is_idempotent() {
        let mut log = QuestLog::new();
        assert!(!log.activate("slay_10_mobs"));
        assert!(!log.activate("no_such_quest"));
        assert_eq!(log.active().len(), 3);
    }

    #[test]
    fn test_claim() {
        let mut log = QuestLog::new();
        assert_eq!(
            log.claim("slay_10_mobs"),
            Err(ActionError::QuestNotCompleted("slay_10_mobs".to_string()))
        );
        log.on_progress(ProgressEvent::EnemiesDefeated(10));
        assert_eq!(
            log.claim("slay_10_mobs"),
            Ok(QuestReward { gold: 500, xp: 100 })
        );
        assert!(!log.is_active("slay_10_mobs"));
        assert_eq!(
            log.claim("slay_10_mobs"),
            Err(ActionError::QuestNotFound("slay_10_mobs".to_string()))
        );
    }

    #[test]
    fn test_saved_round_trip() {
        let mut log = QuestLog::new();
        log.on_progress(ProgressEvent::EnemiesDefeated(10));
        log.on_progress(ProgressEvent::HeroLevel(3));
        let saved = log.to_saved();
        let json = serde_json::to_string(&saved).unwrap();
        let parsed: Vec<SavedQuest> = serde_json::from_str(&json).unwrap();
        assert_eq!(QuestLog::restore(&parsed), log);
    }

    #[test]
    fn test_restore_drops_unknown_and_duplicates() {
        let saved = vec![
            SavedQuest {
                id: "slay_10_mobs".to_string(),
                progress: 3,
                completed: false,
            },
            SavedQuest {
                id: "ancient_quest".to_string(),
                progress: 1,
                completed: false,
            },
            SavedQuest {
                id: "slay_10_mobs".to_string(),
                progress: 9,
                completed: false,
            },
        ];
        let log = QuestLog::restore(&saved);
        assert_eq!(log.active().len(), 1);
        assert_eq!(log.get("slay_10_mobs").unwrap().progress, 3);
    }
}
