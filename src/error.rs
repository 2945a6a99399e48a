//! Error types for player commands and persistence.

use thiserror::Error;

use crate::items::EquipmentSlot;

/// Why a player command was rejected. State is untouched when one of these
/// is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ActionError {
    #[error("Not enough gold: need {needed}, have {available}")]
    InsufficientGold { needed: u64, available: u64 },

    #[error("Not enough shards: need {needed}, have {available}")]
    InsufficientMaterials { needed: u32, available: u32 },

    #[error("Inventory is full")]
    InventoryFull,

    #[error("No item at inventory index {0}")]
    InvalidItemIndex(usize),

    #[error("{0} cannot be equipped")]
    NotEquippable(String),

    #[error("{0} is not a consumable")]
    NotConsumable(String),

    #[error("Nothing equipped in {}", .0.name())]
    SlotEmpty(EquipmentSlot),

    #[error("Unknown equipment slot: {0}")]
    InvalidSlot(String),

    #[error("{skill} is on cooldown for {turns} more turn(s)")]
    SkillOnCooldown { skill: String, turns: u32 },

    #[error("Unknown skill: {0}")]
    UnknownSkill(String),

    #[error("Unknown dungeon: {0}")]
    UnknownDungeon(String),

    #[error("{0} is still locked")]
    DungeonLocked(String),

    #[error("{0} is already at maximum upgrade level")]
    MaxUpgradeLevel(String),

    #[error("{0} cannot be upgraded")]
    NotUpgradeable(String),

    #[error("HP is already full")]
    HpFull,

    #[error("Unknown shop item: {0}")]
    UnknownShopItem(String),

    #[error("Unknown permanent upgrade: {0}")]
    UnknownUpgrade(String),

    #[error("Quest not found: {0}")]
    QuestNotFound(String),

    #[error("Quest {0} is not completed yet")]
    QuestNotCompleted(String),

    #[error("No run is active")]
    RunNotActive,
}

/// Result type for player commands.
pub type Result<T> = std::result::Result<T, ActionError>;

/// Errors that can occur while saving or loading a session.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Save checksum mismatch")]
    ChecksumMismatch,

    #[error("Unsupported save version: {0}")]
    UnsupportedVersion(u32),
}
