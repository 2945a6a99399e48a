//! Static item tables: equipment templates, boss uniques and shop stock.

use super::types::{ConsumableEffect, EquipmentSlot, Item, ItemType, Rarity, StatKey, StatMap};

/// Template a random equipment drop is rolled from.
#[derive(Debug, Clone, Copy)]
pub struct EquipmentTemplate {
    pub item_type: ItemType,
    pub slots: &'static [EquipmentSlot],
    pub base_stats: &'static [(StatKey, f64)],
    pub name_prefixes: &'static [&'static str],
}

/// Item types random loot can produce. Consumables are bought, not dropped.
pub const LOOT_ITEM_TYPES: [ItemType; 5] = [
    ItemType::Weapon,
    ItemType::Shield,
    ItemType::Armor,
    ItemType::Head,
    ItemType::Accessory,
];

const EQUIPMENT_TEMPLATES: [EquipmentTemplate; 5] = [
    EquipmentTemplate {
        item_type: ItemType::Weapon,
        slots: &[EquipmentSlot::MainHand],
        base_stats: &[
            (StatKey::Attack, 1.0),
            (StatKey::CritChance, 0.01),
            (StatKey::Str, 0.0),
            (StatKey::Dex, 0.0),
            (StatKey::CritMultiplier, 0.0),
            (StatKey::AttackSpeed, 0.0),
        ],
        name_prefixes: &["Sword", "Axe", "Mace", "Wand", "Bow"],
    },
    EquipmentTemplate {
        item_type: ItemType::Shield,
        slots: &[EquipmentSlot::OffHand],
        base_stats: &[(StatKey::Defense, 2.0), (StatKey::MaxHp, 0.0)],
        name_prefixes: &["Wooden Shield", "Iron Shield", "Buckler"],
    },
    EquipmentTemplate {
        item_type: ItemType::Armor,
        slots: &[EquipmentSlot::Chest, EquipmentSlot::Legs],
        base_stats: &[(StatKey::Defense, 1.0), (StatKey::MaxHp, 5.0)],
        name_prefixes: &["Plate", "Leather", "Cloth"],
    },
    EquipmentTemplate {
        item_type: ItemType::Head,
        slots: &[EquipmentSlot::Head],
        base_stats: &[(StatKey::Defense, 0.5), (StatKey::MaxHp, 2.0)],
        name_prefixes: &["Cap", "Crown", "Helm"],
    },
    EquipmentTemplate {
        item_type: ItemType::Accessory,
        slots: &[
            EquipmentSlot::Ring1,
            EquipmentSlot::Ring2,
            EquipmentSlot::Amulet,
        ],
        base_stats: &[
            (StatKey::Attack, 0.5),
            (StatKey::MaxHp, 2.0),
            (StatKey::Defense, 0.5),
            (StatKey::Lux, 0.0),
            (StatKey::Str, 0.0),
            (StatKey::Dex, 0.0),
        ],
        name_prefixes: &["Ring", "Pendant", "Talisman"],
    },
];

pub fn get_equipment_template(item_type: ItemType) -> Option<&'static EquipmentTemplate> {
    EQUIPMENT_TEMPLATES
        .iter()
        .find(|template| template.item_type == item_type)
}

/// Hand-made item a boss can drop instead of random loot.
#[derive(Debug, Clone, Copy)]
pub struct UniqueItemDef {
    pub id: &'static str,
    pub name: &'static str,
    pub slot: EquipmentSlot,
    pub stats: &'static [(StatKey, f64)],
    pub sell_value: u64,
}

impl UniqueItemDef {
    /// A fresh instance tagged with the Unique rarity.
    pub fn instantiate(&self) -> Item {
        Item::equipment(
            self.name,
            ItemType::Unique,
            self.slot,
            Rarity::Unique,
            StatMap::from_pairs(self.stats),
            self.sell_value,
        )
    }
}

const UNIQUE_ITEMS: [UniqueItemDef; 2] = [
    UniqueItemDef {
        id: "goblin_crown",
        name: "Goblin Crown",
        slot: EquipmentSlot::Head,
        stats: &[
            (StatKey::Attack, 5.0),
            (StatKey::Defense, 5.0),
            (StatKey::MaxHp, 20.0),
        ],
        sell_value: 50,
    },
    UniqueItemDef {
        id: "beast_hide_armor",
        name: "Beast Hide Armor",
        slot: EquipmentSlot::Chest,
        stats: &[(StatKey::Defense, 15.0), (StatKey::MaxHp, 50.0)],
        sell_value: 120,
    },
];

pub fn get_unique_item(id: &str) -> Option<&'static UniqueItemDef> {
    UNIQUE_ITEMS.iter().find(|item| item.id == id)
}

/// Consumable sold in the shop.
#[derive(Debug, Clone, Copy)]
pub struct ShopItem {
    pub id: &'static str,
    pub name: &'static str,
    pub price: u64,
    pub sell_value: u64,
    pub effect: ConsumableEffect,
}

impl ShopItem {
    pub fn instantiate(&self) -> Item {
        Item::consumable(self.name, self.effect, self.sell_value)
    }
}

pub const SHOP_ITEMS: [ShopItem; 2] = [
    ShopItem {
        id: "health_potion",
        name: "Health Potion",
        price: 100,
        sell_value: 20,
        effect: ConsumableEffect::HealHp(50),
    },
    ShopItem {
        id: "greater_health_potion",
        name: "Greater Health Potion",
        price: 500,
        sell_value: 100,
        effect: ConsumableEffect::HealHp(200),
    },
];

pub fn get_shop_item(id: &str) -> Option<&'static ShopItem> {
    SHOP_ITEMS.iter().find(|item| item.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_loot_type_has_a_template() {
        for item_type in LOOT_ITEM_TYPES {
            let template = get_equipment_template(item_type).unwrap();
            assert!(!template.slots.is_empty());
            assert!(!template.name_prefixes.is_empty());
        }
        assert!(get_equipment_template(ItemType::Consumable).is_none());
    }

    #[test]
    fn test_armor_fits_chest_or_legs() {
        let armor = get_equipment_template(ItemType::Armor).unwrap();
        assert_eq!(armor.slots, &[EquipmentSlot::Chest, EquipmentSlot::Legs]);
    }

    #[test]
    fn test_unique_items_instantiate_as_unique() {
        let crown = get_unique_item("goblin_crown").unwrap().instantiate();
        assert_eq!(crown.rarity, Rarity::Unique);
        assert_eq!(crown.slot, Some(EquipmentSlot::Head));
        assert_eq!(crown.stats.get(StatKey::MaxHp), 20.0);
        assert!(get_unique_item("missing").is_none());
    }

    #[test]
    fn test_shop_lookup() {
        let potion = get_shop_item("health_potion").unwrap();
        assert_eq!(potion.price, 100);
        let item = potion.instantiate();
        assert_eq!(item.consumable, Some(ConsumableEffect::HealHp(50)));
        assert_eq!(item.sell_value, 20);
    }
}
