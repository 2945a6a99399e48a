// Tick and timing
pub const TICK_INTERVAL_MS: u64 = 1000;

// Hero defaults
pub const DEFAULT_HERO_NAME: &str = "Hero";
pub const BASE_HERO_HP: u32 = 100;
pub const BASE_HERO_ATTACK: f64 = 10.0;
pub const BASE_HERO_DEFENSE: f64 = 5.0;
pub const BASE_ATTACK_SPEED: f64 = 1.0;
pub const BASE_CRIT_CHANCE: f64 = 0.05;
pub const BASE_CRIT_MULTIPLIER: f64 = 1.5;
pub const MAX_INVENTORY_SIZE: usize = 20;

// Attribute conversion
pub const ATTACK_SPEED_PER_DEX: f64 = 0.02;
pub const MIN_ATTACK_SPEED: f64 = 0.1;
pub const CRIT_CHANCE_PER_LUX: f64 = 0.01;
pub const MAX_CRIT_CHANCE: f64 = 0.95;
pub const CRIT_MULTIPLIER_PER_STR: f64 = 0.05;
pub const MIN_CRIT_MULTIPLIER: f64 = 1.0;

// XP and leveling
pub const BASE_XP_TO_NEXT_LEVEL: u64 = 100;
pub const XP_GROWTH_FACTOR: f64 = 1.2;
pub const LEVEL_UP_MAX_HP: u32 = 10;
pub const LEVEL_UP_ATTACK: f64 = 2.0;
pub const LEVEL_UP_DEFENSE: f64 = 1.0;

// Enemy scaling
pub const ENEMY_LEVEL_SCALING: f64 = 0.12;
pub const BOSS_STAT_MULTIPLIER: f64 = 1.4;
/// Hero levels per extra enemy level when spawning.
pub const HERO_LEVELS_PER_ENEMY_LEVEL: u32 = 5;

// Boss mechanic defaults
pub const BOSS_HEAL_MIN_PCT: f64 = 0.06;
pub const BOSS_HEAL_MAX_PCT: f64 = 0.12;
pub const BOSS_SUMMON_ATTACK_MULT: f64 = 1.12;
pub const BOSS_SUMMON_DURATION: u32 = 3;
pub const BOSS_ANTI_CRIT_DEFENSE: f64 = 3.0;
pub const BOSS_ANTI_CRIT_DURATION: u32 = 3;

// Loot
pub const UNIQUE_DROP_CHANCE: f64 = 0.5;
pub const NO_DROP_CHANCE: f64 = 0.7;
pub const BOSS_NO_DROP_CHANCE: f64 = 0.35;
pub const LOOT_VALUE_PER_LEVEL: f64 = 5.0;
pub const LOOT_VARIANCE_MIN: f64 = 0.9;
pub const LOOT_VARIANCE_MAX: f64 = 1.1;
pub const PRIMARY_STAT_SCALE: f64 = 0.12;
pub const LUCK_STAT_SCALE: f64 = 0.08;
pub const FRACTIONAL_STAT_SCALE: f64 = 0.01;
pub const SELL_VALUE_PER_LEVEL: f64 = 20.0;

// Shards
pub const SHARD_DROP_CHANCE: f64 = 0.25;
pub const SHARDS_PER_DROP: u32 = 1;
pub const BOSS_SHARD_REWARD: u32 = 3;

// Item upgrade
pub const MAX_UPGRADE_LEVEL: u32 = 5;
pub const UPGRADE_STAT_STEP: f64 = 0.20;
pub const UPGRADE_SELL_STEP: f64 = 0.25;
pub const UPGRADE_BASE_COST: f64 = 20.0;
pub const UPGRADE_COST_GROWTH: f64 = 1.6;
pub const UPGRADE_MIN_COST: u64 = 10;

// Persistence
pub const SAVE_KEY: &str = "idle_rpg_save_data";
pub const SAVE_VERSION: u32 = 1;
