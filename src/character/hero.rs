use super::attributes::BaseStats;
use super::derived_stats::DerivedStats;
use super::skills::{HeroClass, Skills};
use super::upgrades::{UpgradeKey, UpgradeLevels};
use crate::combat::effects::Effects;
use crate::enhancement::{apply_upgrade, is_max_level, upgrade_cost, UpgradeOutcome};
use crate::error::{ActionError, Result};
use crate::items::{ConsumableEffect, Equipment, EquipmentSlot, Inventory, Item};

/// What changed when XP was granted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LevelUpResult {
    pub levels_gained: u32,
    pub new_level: u32,
    pub passives_unlocked: Vec<String>,
}

impl LevelUpResult {
    pub fn leveled_up(&self) -> bool {
        self.levels_gained > 0
    }
}

#[derive(Debug, Clone)]
pub struct Hero {
    pub name: String,
    pub class: HeroClass,
    pub base: BaseStats,
    /// Recomputed by [`Hero::calculate_stats`]; never edit directly.
    pub derived: DerivedStats,
    pub inventory: Inventory,
    pub equipment: Equipment,
    pub upgrades: UpgradeLevels,
    pub skills: Skills,
    pub effects: Effects,
}

impl Hero {
    pub fn new(name: impl Into<String>, class: HeroClass) -> Self {
        Self::from_parts(
            name,
            class,
            BaseStats::new(),
            Inventory::new(),
            Equipment::new(),
            UpgradeLevels::new(),
        )
    }

    /// Rebuild a hero from persisted parts. Skills come from the class and
    /// transient effects start empty.
    pub fn from_parts(
        name: impl Into<String>,
        class: HeroClass,
        base: BaseStats,
        inventory: Inventory,
        equipment: Equipment,
        upgrades: UpgradeLevels,
    ) -> Self {
        let derived = DerivedStats::from_base(&base);
        let mut hero = Self {
            name: name.into(),
            class,
            base,
            derived,
            inventory,
            equipment,
            upgrades,
            skills: Skills::for_class(class),
            effects: Effects::new(),
        };
        hero.calculate_stats();
        hero
    }

    /// Recompute derived stats from base, gear and passives, then clamp
    /// current HP to the new max. Returns newly applied passives.
    pub fn calculate_stats(&mut self) -> Vec<String> {
        let unlocked = self.skills.apply_unlocked_passives(self.base.level);
        self.derived = DerivedStats::calculate(
            &self.base,
            &self.equipment,
            &self.skills.passive_bonuses(),
        );
        self.base.current_hp = self.base.current_hp.min(self.derived.max_hp);
        unlocked
    }

    pub fn max_hp(&self) -> u32 {
        self.derived.max_hp
    }

    pub fn current_hp(&self) -> u32 {
        self.base.current_hp
    }

    pub fn is_alive(&self) -> bool {
        self.base.current_hp > 0
    }

    /// Grant XP, applying every level-up it pays for.
    pub fn gain_xp(&mut self, amount: u64) -> LevelUpResult {
        self.base.experience += amount;
        let mut levels_gained = 0;
        while self.base.experience >= self.base.xp_to_next_level {
            self.base.experience -= self.base.xp_to_next_level;
            self.base.apply_level_up();
            self.base.current_hp = self.base.max_hp;
            levels_gained += 1;
        }

        let mut passives_unlocked = Vec::new();
        if levels_gained > 0 {
            passives_unlocked = self.calculate_stats();
            self.base.current_hp = self.derived.max_hp;
            log::info!("{} reached level {}", self.name, self.base.level);
        }
        LevelUpResult {
            levels_gained,
            new_level: self.base.level,
            passives_unlocked,
        }
    }

    /// Apply already-mitigated damage. At least 1 damage always lands.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let damage = amount.max(1);
        self.base.current_hp = self.base.current_hp.saturating_sub(damage);
        damage
    }

    /// Heal up to max HP. Returns the amount actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let missing = self.derived.max_hp.saturating_sub(self.base.current_hp);
        let healed = amount.min(missing);
        self.base.current_hp += healed;
        healed
    }

    pub fn heal_full(&mut self) {
        self.base.current_hp = self.derived.max_hp;
    }

    /// Attack multiplier from active effects.
    pub fn attack_effects_multiplier(&self) -> f64 {
        self.effects.attack_multiplier()
    }

    /// Defense the enemy's attack is measured against.
    pub fn effective_defense(&self) -> f64 {
        (self.derived.defense + self.effects.defense_add()).max(0.0)
    }

    /// End-of-turn bookkeeping: cooldowns and effect durations.
    pub fn tick_turn(&mut self) {
        self.skills.tick_cooldowns();
        self.effects.tick();
    }

    /// Leave combat: effects drop and cooldowns reset.
    pub fn clear_combat_state(&mut self) {
        self.effects.clear();
        self.skills.reset_cooldowns();
    }

    pub fn add_item(&mut self, item: Item) -> std::result::Result<(), Item> {
        self.inventory.add(item)
    }

    /// Equip the inventory item at `index`. A previous occupant of the slot
    /// goes back into the inventory.
    pub fn equip(&mut self, index: usize) -> Result<EquipmentSlot> {
        let item = self
            .inventory
            .get(index)
            .ok_or(ActionError::InvalidItemIndex(index))?;
        let slot = item
            .slot
            .ok_or_else(|| ActionError::NotEquippable(item.name.clone()))?;

        let item = self
            .inventory
            .remove(index)
            .ok_or(ActionError::InvalidItemIndex(index))?;
        if let Some(previous) = self.equipment.set(slot, Some(item)) {
            // The removal above freed a spot, so this cannot overflow.
            if let Err(previous) = self.inventory.add(previous) {
                log::warn!("No room to return {} to the inventory", previous.name);
            }
        }
        self.calculate_stats();
        Ok(slot)
    }

    /// Move the item in `slot` back into the inventory.
    pub fn unequip(&mut self, slot: EquipmentSlot) -> Result<()> {
        if self.equipment.get(slot).is_none() {
            return Err(ActionError::SlotEmpty(slot));
        }
        if self.inventory.is_full() {
            return Err(ActionError::InventoryFull);
        }
        if let Some(item) = self.equipment.take(slot) {
            if let Err(item) = self.inventory.add(item) {
                self.equipment.set(slot, Some(item));
                return Err(ActionError::InventoryFull);
            }
        }
        self.calculate_stats();
        Ok(())
    }

    /// Sell the inventory item at `index` for its sell value.
    pub fn sell_item(&mut self, index: usize) -> Result<(Item, u64)> {
        let item = self
            .inventory
            .remove(index)
            .ok_or(ActionError::InvalidItemIndex(index))?;
        let gold = item.sell_value;
        self.base.gold += gold;
        Ok((item, gold))
    }

    /// Use the consumable at `index`. Returns the HP restored.
    pub fn use_consumable(&mut self, index: usize) -> Result<u32> {
        let item = self
            .inventory
            .get(index)
            .ok_or(ActionError::InvalidItemIndex(index))?;
        let effect = item
            .consumable
            .ok_or_else(|| ActionError::NotConsumable(item.name.clone()))?;

        match effect {
            ConsumableEffect::HealHp(amount) => {
                if self.base.current_hp >= self.derived.max_hp {
                    return Err(ActionError::HpFull);
                }
                self.inventory.remove(index);
                Ok(self.heal(amount))
            }
        }
    }

    fn check_funds(&self, gold: u64, shards: u32) -> Result<()> {
        if self.base.gold < gold {
            return Err(ActionError::InsufficientGold {
                needed: gold,
                available: self.base.gold,
            });
        }
        if self.base.materials.shard < shards {
            return Err(ActionError::InsufficientMaterials {
                needed: shards,
                available: self.base.materials.shard,
            });
        }
        Ok(())
    }

    fn upgrade_item(item: &mut Item, gold: &mut u64, shards: &mut u32) -> Result<UpgradeOutcome> {
        if !item.is_equippable() {
            return Err(ActionError::NotUpgradeable(item.name.clone()));
        }
        if is_max_level(item) {
            return Err(ActionError::MaxUpgradeLevel(item.name.clone()));
        }
        let cost = upgrade_cost(item);
        if *gold < cost.gold {
            return Err(ActionError::InsufficientGold {
                needed: cost.gold,
                available: *gold,
            });
        }
        if *shards < cost.shards {
            return Err(ActionError::InsufficientMaterials {
                needed: cost.shards,
                available: *shards,
            });
        }
        let new_level =
            apply_upgrade(item).ok_or_else(|| ActionError::MaxUpgradeLevel(item.name.clone()))?;
        *gold -= cost.gold;
        *shards -= cost.shards;
        Ok(UpgradeOutcome {
            new_level,
            cost,
            sell_value: item.sell_value,
        })
    }

    /// Upgrade the inventory item at `index`.
    pub fn upgrade_inventory_item(&mut self, index: usize) -> Result<UpgradeOutcome> {
        let item = self
            .inventory
            .get_mut(index)
            .ok_or(ActionError::InvalidItemIndex(index))?;
        Self::upgrade_item(
            item,
            &mut self.base.gold,
            &mut self.base.materials.shard,
        )
    }

    /// Upgrade the item equipped in `slot` and recompute stats.
    pub fn upgrade_equipped_item(&mut self, slot: EquipmentSlot) -> Result<UpgradeOutcome> {
        let item = self
            .equipment
            .get_mut(slot)
            .as_mut()
            .ok_or(ActionError::SlotEmpty(slot))?;
        let outcome = Self::upgrade_item(
            item,
            &mut self.base.gold,
            &mut self.base.materials.shard,
        )?;
        self.calculate_stats();
        Ok(outcome)
    }

    /// Buy one level of a permanent upgrade. Returns the gold spent.
    pub fn purchase_upgrade(&mut self, key: UpgradeKey) -> Result<u64> {
        let cost = self.upgrades.next_cost(key);
        self.check_funds(cost, 0)?;
        self.base.gold -= cost;

        let value = key.def().value;
        match key {
            UpgradeKey::Hp => {
                let hp = value.round() as u32;
                self.base.max_hp += hp;
                self.base.current_hp += hp;
            }
            UpgradeKey::Attack => self.base.attack += value,
            UpgradeKey::Defense => self.base.defense += value,
            UpgradeKey::Str => self.base.str += value,
            UpgradeKey::Dex => self.base.dex += value,
            UpgradeKey::Int => self.base.int += value,
            UpgradeKey::Lux => self.base.lux += value,
        }
        self.upgrades.increment(key);
        self.calculate_stats();
        Ok(cost)
    }

    /// Spend gold if there is enough of it.
    pub fn spend_gold(&mut self, amount: u64) -> Result<()> {
        self.check_funds(amount, 0)?;
        self.base.gold -= amount;
        Ok(())
    }
}
