use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EquipmentSlot {
    MainHand,
    OffHand,
    Chest,
    Legs,
    Head,
    Amulet,
    Ring1,
    Ring2,
}

impl EquipmentSlot {
    pub const ALL: [EquipmentSlot; 8] = [
        EquipmentSlot::MainHand,
        EquipmentSlot::OffHand,
        EquipmentSlot::Chest,
        EquipmentSlot::Legs,
        EquipmentSlot::Head,
        EquipmentSlot::Amulet,
        EquipmentSlot::Ring1,
        EquipmentSlot::Ring2,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            EquipmentSlot::MainHand => "Main Hand",
            EquipmentSlot::OffHand => "Off Hand",
            EquipmentSlot::Chest => "Chest",
            EquipmentSlot::Legs => "Legs",
            EquipmentSlot::Head => "Head",
            EquipmentSlot::Amulet => "Amulet",
            EquipmentSlot::Ring1 => "Ring 1",
            EquipmentSlot::Ring2 => "Ring 2",
        }
    }

    /// Key used by the command surface and in saves.
    pub fn key(&self) -> &'static str {
        match self {
            EquipmentSlot::MainHand => "mainHand",
            EquipmentSlot::OffHand => "offHand",
            EquipmentSlot::Chest => "chest",
            EquipmentSlot::Legs => "legs",
            EquipmentSlot::Head => "head",
            EquipmentSlot::Amulet => "amulet",
            EquipmentSlot::Ring1 => "ring1",
            EquipmentSlot::Ring2 => "ring2",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|slot| slot.key() == key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemType {
    Weapon,
    Shield,
    Armor,
    Head,
    Accessory,
    Consumable,
    Relic,
    Unique,
}

impl ItemType {
    pub fn name(&self) -> &'static str {
        match self {
            ItemType::Weapon => "Weapon",
            ItemType::Shield => "Shield",
            ItemType::Armor => "Armor",
            ItemType::Head => "Head",
            ItemType::Accessory => "Accessory",
            ItemType::Consumable => "Consumable",
            ItemType::Relic => "Relic",
            ItemType::Unique => "Unique",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rarity {
    Common = 0,
    Uncommon = 1,
    Rare = 2,
    Epic = 3,
    Legendary = 4,
    Unique = 5,
}

impl Rarity {
    /// Returns the display name for this rarity tier.
    pub fn name(&self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Uncommon => "Uncommon",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
            Rarity::Legendary => "Legendary",
            Rarity::Unique => "Unique",
        }
    }

    /// Stat multiplier applied to rolled item stats.
    pub fn multiplier(&self) -> f64 {
        match self {
            Rarity::Common => 1.0,
            Rarity::Uncommon => 1.2,
            Rarity::Rare => 1.5,
            Rarity::Epic => 2.0,
            Rarity::Legendary => 3.0,
            Rarity::Unique => 2.5,
        }
    }

    /// Counts towards "collect rare gear" quests.
    pub fn is_rare_or_better(&self) -> bool {
        *self >= Rarity::Rare
    }
}

/// Every stat an item, passive or upgrade can touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StatKey {
    #[serde(rename = "attack")]
    Attack,
    #[serde(rename = "defense")]
    Defense,
    #[serde(rename = "maxHP")]
    MaxHp,
    #[serde(rename = "str")]
    Str,
    #[serde(rename = "dex")]
    Dex,
    #[serde(rename = "int")]
    Int,
    #[serde(rename = "lux")]
    Lux,
    #[serde(rename = "critChance")]
    CritChance,
    #[serde(rename = "critMultiplier")]
    CritMultiplier,
    #[serde(rename = "attackSpeed")]
    AttackSpeed,
}

impl StatKey {
    pub const ALL: [StatKey; 10] = [
        StatKey::Attack,
        StatKey::Defense,
        StatKey::MaxHp,
        StatKey::Str,
        StatKey::Dex,
        StatKey::Int,
        StatKey::Lux,
        StatKey::CritChance,
        StatKey::CritMultiplier,
        StatKey::AttackSpeed,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            StatKey::Attack => "Attack",
            StatKey::Defense => "Defense",
            StatKey::MaxHp => "Max HP",
            StatKey::Str => "Strength",
            StatKey::Dex => "Dexterity",
            StatKey::Int => "Intelligence",
            StatKey::Lux => "Luck",
            StatKey::CritChance => "Crit Chance",
            StatKey::CritMultiplier => "Crit Multiplier",
            StatKey::AttackSpeed => "Attack Speed",
        }
    }

    /// Chance, speed and multiplier stats keep decimals; everything else is
    /// a whole number.
    pub fn is_fractional(&self) -> bool {
        matches!(
            self,
            StatKey::CritChance | StatKey::CritMultiplier | StatKey::AttackSpeed
        )
    }

    /// Primary attributes roll much smaller than flat stats.
    pub fn primary_scale(&self) -> Option<f64> {
        use crate::core::constants::{LUCK_STAT_SCALE, PRIMARY_STAT_SCALE};
        match self {
            StatKey::Str | StatKey::Dex | StatKey::Int => Some(PRIMARY_STAT_SCALE),
            StatKey::Lux => Some(LUCK_STAT_SCALE),
            _ => None,
        }
    }
}

/// Stat bonus map. Missing keys read as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatMap(BTreeMap<StatKey, f64>);

impl StatMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs(pairs: &[(StatKey, f64)]) -> Self {
        Self(pairs.iter().copied().collect())
    }

    pub fn get(&self, key: StatKey) -> f64 {
        self.0
            .get(&key)
            .copied()
            .filter(|v| v.is_finite())
            .unwrap_or(0.0)
    }

    pub fn set(&mut self, key: StatKey, value: f64) {
        self.0.insert(key, value);
    }

    pub fn add(&mut self, key: StatKey, value: f64) {
        let current = self.get(key);
        self.0.insert(key, current + value);
    }

    pub fn iter(&self) -> impl Iterator<Item = (StatKey, f64)> + '_ {
        self.0.iter().map(|(k, v)| (*k, *v))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// What a consumable does when used.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ConsumableEffect {
    HealHp(u32),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: Uuid,
    pub name: String,
    pub item_type: ItemType,
    /// Equippable items name exactly one slot.
    pub slot: Option<EquipmentSlot>,
    pub rarity: Rarity,
    #[serde(default)]
    pub stats: StatMap,
    /// Stats as generated, before any upgrade scaling.
    #[serde(default)]
    pub base_stats: StatMap,
    #[serde(default)]
    pub sell_value: u64,
    #[serde(default)]
    pub base_sell_value: u64,
    #[serde(default)]
    pub upgrade_level: u32,
    #[serde(default)]
    pub consumable: Option<ConsumableEffect>,
}

impl Item {
    /// An equippable item with freshly generated stats.
    pub fn equipment(
        name: impl Into<String>,
        item_type: ItemType,
        slot: EquipmentSlot,
        rarity: Rarity,
        stats: StatMap,
        sell_value: u64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            item_type,
            slot: Some(slot),
            rarity,
            base_stats: stats.clone(),
            stats,
            sell_value,
            base_sell_value: sell_value,
            upgrade_level: 0,
            consumable: None,
        }
    }

    pub fn consumable(name: impl Into<String>, effect: ConsumableEffect, sell_value: u64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            item_type: ItemType::Consumable,
            slot: None,
            rarity: Rarity::Common,
            stats: StatMap::new(),
            base_stats: StatMap::new(),
            sell_value,
            base_sell_value: sell_value,
            upgrade_level: 0,
            consumable: Some(effect),
        }
    }

    /// A dungeon relic: legendary trophy with no stats and no slot.
    pub fn relic(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            item_type: ItemType::Relic,
            slot: None,
            rarity: Rarity::Legendary,
            stats: StatMap::new(),
            base_stats: StatMap::new(),
            sell_value: 0,
            base_sell_value: 0,
            upgrade_level: 0,
            consumable: None,
        }
    }

    pub fn is_equippable(&self) -> bool {
        self.slot.is_some()
    }

    pub fn is_consumable(&self) -> bool {
        self.consumable.is_some()
    }
}
