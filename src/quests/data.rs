//! Quest definitions and the quests a new game starts with.

use super::types::{GoalTarget, GoalType, QuestTemplate};
use crate::character::UpgradeKey;

/// Active in a new game.
pub const INITIAL_QUESTS: [&str; 3] = ["slay_10_mobs", "reach_level_5", "upgrade_attack_1"];

const fn quest(
    id: &'static str,
    name: &'static str,
    description: &'static str,
    goal: GoalType,
    goal_amount: u64,
    reward: (u64, u64),
    unlocks: Option<&'static str>,
) -> QuestTemplate {
    QuestTemplate {
        id,
        name,
        description,
        goal,
        target: None,
        goal_amount,
        reward_gold: reward.0,
        reward_xp: reward.1,
        unlocks,
    }
}

const fn clear(
    id: &'static str,
    name: &'static str,
    dungeon: &'static str,
    reward: (u64, u64),
    unlocks: Option<&'static str>,
) -> QuestTemplate {
    QuestTemplate {
        id,
        name,
        description: "Defeat the dungeon's final boss.",
        goal: GoalType::DungeonClear,
        target: Some(GoalTarget::Dungeon(dungeon)),
        goal_amount: 1,
        reward_gold: reward.0,
        reward_xp: reward.1,
        unlocks,
    }
}

const fn upgrade(
    id: &'static str,
    name: &'static str,
    description: &'static str,
    stat: UpgradeKey,
    times: u64,
    reward: (u64, u64),
    unlocks: Option<&'static str>,
) -> QuestTemplate {
    QuestTemplate {
        id,
        name,
        description,
        goal: GoalType::UpgradeStat,
        target: Some(GoalTarget::Stat(stat)),
        goal_amount: times,
        reward_gold: reward.0,
        reward_xp: reward.1,
        unlocks,
    }
}

static QUESTS: [QuestTemplate; 22] = [
    // Novice
    quest(
        "slay_10_mobs",
        "Basic Cleanup",
        "Defeat 10 enemies of any kind.",
        GoalType::EnemiesDefeated,
        10,
        (500, 100),
        Some("earn_1k_gold"),
    ),
    quest(
        "earn_1k_gold",
        "Jingling Purse",
        "Earn 1,000 gold in total.",
        GoalType::TotalGoldEarned,
        1_000,
        (1_000, 200),
        Some("reach_level_5"),
    ),
    quest(
        "reach_level_5",
        "A Grand Beginning",
        "Reach hero level 5.",
        GoalType::HeroLevel,
        5,
        (2_000, 500),
        Some("clear_cave_of_slimes"),
    ),
    clear(
        "clear_cave_of_slimes",
        "Boss Hunter: Cave of Slimes",
        "Cave of Slimes",
        (3_500, 1_000),
        Some("slay_50_mobs"),
    ),
    // Seasoned
    quest(
        "slay_50_mobs",
        "Small Destroyer",
        "Defeat 50 enemies in total.",
        GoalType::EnemiesDefeated,
        50,
        (2_500, 800),
        Some("earn_10k_gold"),
    ),
    quest(
        "earn_10k_gold",
        "Small Merchant",
        "Earn 10,000 gold in total.",
        GoalType::TotalGoldEarned,
        10_000,
        (3_000, 1_200),
        Some("reach_level_10"),
    ),
    quest(
        "reach_level_10",
        "True Hero",
        "Reach hero level 10.",
        GoalType::HeroLevel,
        10,
        (4_000, 2_000),
        Some("clear_crypt_of_bones"),
    ),
    clear(
        "clear_crypt_of_bones",
        "Darkness Below",
        "Crypt of Bones",
        (5_000, 2_500),
        Some("upgrade_attack_10"),
    ),
    // Self improvement
    upgrade(
        "upgrade_attack_10",
        "First Strength",
        "Upgrade attack 10 times.",
        UpgradeKey::Attack,
        10,
        (3_000, 1_500),
        Some("upgrade_defense_10"),
    ),
    upgrade(
        "upgrade_defense_10",
        "Sturdy Shield",
        "Upgrade defense 10 times.",
        UpgradeKey::Defense,
        10,
        (3_000, 1_500),
        Some("reach_level_15"),
    ),
    quest(
        "reach_level_15",
        "Hardened Fighter",
        "Reach hero level 15.",
        GoalType::HeroLevel,
        15,
        (6_000, 3_000),
        Some("clear_inferno_keep"),
    ),
    clear(
        "clear_inferno_keep",
        "Trial by Fire",
        "Inferno Keep",
        (8_000, 4_000),
        Some("collect_rare_gear"),
    ),
    // Treasure hunter
    quest(
        "collect_rare_gear",
        "Rare Hunt",
        "Collect 5 items of Rare rarity or better.",
        GoalType::RareItemsCollected,
        5,
        (8_000, 3_500),
        Some("sell_20_items"),
    ),
    quest(
        "sell_20_items",
        "Seasoned Trader",
        "Sell 20 items.",
        GoalType::ItemsSold,
        20,
        (6_000, 2_500),
        Some("reach_level_20"),
    ),
    quest(
        "reach_level_20",
        "Veteran",
        "Reach hero level 20.",
        GoalType::HeroLevel,
        20,
        (10_000, 6_000),
        Some("clear_frost_hollow"),
    ),
    clear(
        "clear_frost_hollow",
        "Eternal Frost",
        "Frost Hollow",
        (12_000, 8_000),
        Some("slay_200_mobs"),
    ),
    // Legend
    quest(
        "slay_200_mobs",
        "Legendary Hunter",
        "Defeat 200 enemies in total.",
        GoalType::EnemiesDefeated,
        200,
        (15_000, 10_000),
        Some("earn_100k_gold"),
    ),
    quest(
        "earn_100k_gold",
        "Tycoon",
        "Earn 100,000 gold in total.",
        GoalType::TotalGoldEarned,
        100_000,
        (20_000, 12_000),
        Some("reach_level_30"),
    ),
    quest(
        "reach_level_30",
        "Master of Combat",
        "Reach hero level 30.",
        GoalType::HeroLevel,
        30,
        (25_000, 20_000),
        Some("clear_abyss"),
    ),
    clear(
        "clear_abyss",
        "A Legend Is Written",
        "Abyss",
        (50_000, 50_000),
        None,
    ),
    // Standalone
    upgrade(
        "upgrade_attack_1",
        "Growing Strength",
        "Upgrade attack 5 times.",
        UpgradeKey::Attack,
        5,
        (100, 50),
        Some("upgrade_defense_1"),
    ),
    upgrade(
        "upgrade_defense_1",
        "Wall of Steel",
        "Upgrade defense 3 times.",
        UpgradeKey::Defense,
        3,
        (50, 30),
        None,
    ),
];

pub fn all_quests() -> &'static [QuestTemplate] {
    &QUESTS
}

pub fn get_quest(id: &str) -> Option<&'static QuestTemplate> {
    QUESTS.iter().find(|q| q.id == id)
}
