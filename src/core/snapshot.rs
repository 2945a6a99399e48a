//! Read-only views of a session for whatever renders it.

use serde::Serialize;

use crate::core::game_state::GameSession;
use crate::dungeons::RunPhase;
use crate::items::{Item, Rarity};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeroSnapshot {
    pub name: String,
    pub class: &'static str,
    pub level: u32,
    pub experience: u64,
    pub xp_to_next_level: u64,
    pub gold: u64,
    pub shards: u32,
    pub current_hp: u32,
    pub max_hp: u32,
    pub attack: f64,
    pub defense: f64,
    pub attack_speed: f64,
    pub crit_chance: f64,
    pub crit_multiplier: f64,
    /// `(skill name, turns until ready)`.
    pub skills: Vec<(String, u32)>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnemySnapshot {
    pub name: String,
    pub level: u32,
    pub is_boss: bool,
    pub current_hp: u32,
    pub max_hp: u32,
    pub attack: f64,
    pub defense: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressSnapshot {
    pub dungeon: String,
    pub floor: u32,
    pub floors: u32,
    pub battles_remaining: u32,
    pub total_battles: u32,
    pub boss_phase: bool,
    pub phase: RunPhase,
    pub percent: u32,
    pub unlocked_dungeons: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestSnapshot {
    pub id: String,
    pub name: String,
    pub description: String,
    pub progress: u64,
    pub goal_amount: u64,
    pub completed: bool,
    pub reward_gold: u64,
    pub reward_xp: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemSnapshot {
    pub name: String,
    pub item_type: &'static str,
    pub rarity: Rarity,
    pub upgrade_level: u32,
    pub sell_value: u64,
}

impl From<&Item> for ItemSnapshot {
    fn from(item: &Item) -> Self {
        Self {
            name: item.name.clone(),
            item_type: item.item_type.name(),
            rarity: item.rarity,
            upgrade_level: item.upgrade_level,
            sell_value: item.sell_value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventorySnapshot {
    pub items: Vec<ItemSnapshot>,
    pub capacity: usize,
    /// `(slot key, item)` for every filled slot.
    pub equipped: Vec<(&'static str, ItemSnapshot)>,
}

/// Everything a renderer needs after a state change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub hero: HeroSnapshot,
    pub enemy: Option<EnemySnapshot>,
    pub progress: ProgressSnapshot,
    pub quests: Vec<QuestSnapshot>,
    pub inventory: InventorySnapshot,
}

impl GameSession {
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            hero: self.hero_snapshot(),
            enemy: self.enemy_snapshot(),
            progress: self.progress_snapshot(),
            quests: self.quest_snapshots(),
            inventory: self.inventory_snapshot(),
        }
    }

    pub fn hero_snapshot(&self) -> HeroSnapshot {
        let hero = &self.hero;
        HeroSnapshot {
            name: hero.name.clone(),
            class: hero.class.name(),
            level: hero.base.level,
            experience: hero.base.experience,
            xp_to_next_level: hero.base.xp_to_next_level,
            gold: hero.base.gold,
            shards: hero.base.materials.shard,
            current_hp: hero.current_hp(),
            max_hp: hero.max_hp(),
            attack: hero.derived.attack,
            defense: hero.effective_defense(),
            attack_speed: hero.derived.attack_speed,
            crit_chance: hero.derived.crit_chance,
            crit_multiplier: hero.derived.crit_multiplier,
            skills: hero
                .skills
                .actives
                .iter()
                .map(|s| (s.name.clone(), s.remaining_cooldown))
                .collect(),
        }
    }

    pub fn enemy_snapshot(&self) -> Option<EnemySnapshot> {
        self.enemy.as_ref().map(|enemy| EnemySnapshot {
            name: enemy.name.clone(),
            level: enemy.level,
            is_boss: enemy.is_boss,
            current_hp: enemy.current_hp,
            max_hp: enemy.max_hp,
            attack: enemy.effective_attack(),
            defense: enemy.effective_defense(),
        })
    }

    pub fn progress_snapshot(&self) -> ProgressSnapshot {
        let dungeon = &self.dungeon;
        ProgressSnapshot {
            dungeon: dungeon.current().id.to_string(),
            floor: dungeon.floor,
            floors: dungeon.current().floors,
            battles_remaining: dungeon.battles_remaining,
            total_battles: dungeon.total_battles,
            boss_phase: dungeon.boss_phase,
            phase: dungeon.phase(),
            percent: dungeon.progress_percent(),
            unlocked_dungeons: dungeon.unlocked_ids(),
        }
    }

    pub fn quest_snapshots(&self) -> Vec<QuestSnapshot> {
        self.quests
            .active()
            .iter()
            .map(|quest| QuestSnapshot {
                id: quest.id().to_string(),
                name: quest.template.name.to_string(),
                description: quest.template.description.to_string(),
                progress: quest.progress.min(quest.template.goal_amount),
                goal_amount: quest.template.goal_amount,
                completed: quest.completed,
                reward_gold: quest.template.reward_gold,
                reward_xp: quest.template.reward_xp,
            })
            .collect()
    }

    pub fn inventory_snapshot(&self) -> InventorySnapshot {
        InventorySnapshot {
            items: self.hero.inventory.iter().map(ItemSnapshot::from).collect(),
            capacity: crate::core::constants::MAX_INVENTORY_SIZE,
            equipped: self
                .hero
                .equipment
                .iter_slots()
                .map(|(slot, item)| (slot.key(), ItemSnapshot::from(item)))
                .collect(),
        }
    }
}
