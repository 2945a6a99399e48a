//! Permanent stat upgrades bought with gold.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpgradeKey {
    Hp,
    Attack,
    Defense,
    Str,
    Dex,
    Int,
    Lux,
}

impl UpgradeKey {
    pub const ALL: [UpgradeKey; 7] = [
        UpgradeKey::Hp,
        UpgradeKey::Attack,
        UpgradeKey::Defense,
        UpgradeKey::Str,
        UpgradeKey::Dex,
        UpgradeKey::Int,
        UpgradeKey::Lux,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            UpgradeKey::Hp => "hp",
            UpgradeKey::Attack => "attack",
            UpgradeKey::Defense => "defense",
            UpgradeKey::Str => "str",
            UpgradeKey::Dex => "dex",
            UpgradeKey::Int => "int",
            UpgradeKey::Lux => "lux",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.key() == key)
    }

    pub fn def(&self) -> &'static UpgradeDef {
        match self {
            UpgradeKey::Hp => &UPGRADE_DEFS[0],
            UpgradeKey::Attack => &UPGRADE_DEFS[1],
            UpgradeKey::Defense => &UPGRADE_DEFS[2],
            UpgradeKey::Str => &UPGRADE_DEFS[3],
            UpgradeKey::Dex => &UPGRADE_DEFS[4],
            UpgradeKey::Int => &UPGRADE_DEFS[5],
            UpgradeKey::Lux => &UPGRADE_DEFS[6],
        }
    }
}

/// Cost curve and per-purchase value of one permanent upgrade.
#[derive(Debug, Clone, Copy)]
pub struct UpgradeDef {
    pub name: &'static str,
    pub base_cost: f64,
    pub cost_scaling: f64,
    pub value: f64,
}

impl UpgradeDef {
    /// Gold cost of buying the next level when `level` are already owned.
    pub fn cost(&self, level: u32) -> u64 {
        (self.base_cost * self.cost_scaling.powi(level as i32)).floor() as u64
    }
}

const UPGRADE_DEFS: [UpgradeDef; 7] = [
    UpgradeDef {
        name: "Vitality",
        base_cost: 100.0,
        cost_scaling: 1.5,
        value: 10.0,
    },
    UpgradeDef {
        name: "Might",
        base_cost: 150.0,
        cost_scaling: 1.6,
        value: 5.0,
    },
    UpgradeDef {
        name: "Toughness",
        base_cost: 120.0,
        cost_scaling: 1.4,
        value: 3.0,
    },
    UpgradeDef {
        name: "Strength",
        base_cost: 200.0,
        cost_scaling: 1.5,
        value: 1.0,
    },
    UpgradeDef {
        name: "Dexterity",
        base_cost: 180.0,
        cost_scaling: 1.45,
        value: 1.0,
    },
    UpgradeDef {
        name: "Intelligence",
        base_cost: 160.0,
        cost_scaling: 1.4,
        value: 1.0,
    },
    UpgradeDef {
        name: "Luck",
        base_cost: 220.0,
        cost_scaling: 1.6,
        value: 1.0,
    },
];

/// How many times each permanent upgrade has been bought.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UpgradeLevels(BTreeMap<UpgradeKey, u32>);

impl UpgradeLevels {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(&self, key: UpgradeKey) -> u32 {
        self.0.get(&key).copied().unwrap_or(0)
    }

    pub fn increment(&mut self, key: UpgradeKey) {
        *self.0.entry(key).or_insert(0) += 1;
    }

    pub fn next_cost(&self, key: UpgradeKey) -> u64 {
        key.def().cost(self.level(key))
    }

    pub fn iter(&self) -> impl Iterator<Item = (UpgradeKey, u32)> + '_ {
        self.0.iter().map(|(k, v)| (*k, *v))
    }
}
