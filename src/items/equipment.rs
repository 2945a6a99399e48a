use super::types::{EquipmentSlot, Item};
use serde::{Deserialize, Serialize};

/// Hero equipment slots.
///
/// New slots need `#[serde(default)]` so older saves keep loading.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    #[serde(default)]
    pub main_hand: Option<Item>,
    #[serde(default)]
    pub off_hand: Option<Item>,
    #[serde(default)]
    pub chest: Option<Item>,
    #[serde(default)]
    pub legs: Option<Item>,
    #[serde(default)]
    pub head: Option<Item>,
    #[serde(default)]
    pub amulet: Option<Item>,
    #[serde(default)]
    pub ring1: Option<Item>,
    #[serde(default)]
    pub ring2: Option<Item>,
}

impl Equipment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: EquipmentSlot) -> &Option<Item> {
        match slot {
            EquipmentSlot::MainHand => &self.main_hand,
            EquipmentSlot::OffHand => &self.off_hand,
            EquipmentSlot::Chest => &self.chest,
            EquipmentSlot::Legs => &self.legs,
            EquipmentSlot::Head => &self.head,
            EquipmentSlot::Amulet => &self.amulet,
            EquipmentSlot::Ring1 => &self.ring1,
            EquipmentSlot::Ring2 => &self.ring2,
        }
    }

    pub fn get_mut(&mut self, slot: EquipmentSlot) -> &mut Option<Item> {
        match slot {
            EquipmentSlot::MainHand => &mut self.main_hand,
            EquipmentSlot::OffHand => &mut self.off_hand,
            EquipmentSlot::Chest => &mut self.chest,
            EquipmentSlot::Legs => &mut self.legs,
            EquipmentSlot::Head => &mut self.head,
            EquipmentSlot::Amulet => &mut self.amulet,
            EquipmentSlot::Ring1 => &mut self.ring1,
            EquipmentSlot::Ring2 => &mut self.ring2,
        }
    }

    /// Put `item` into `slot`, returning the previous occupant.
    pub fn set(&mut self, slot: EquipmentSlot, item: Option<Item>) -> Option<Item> {
        std::mem::replace(self.get_mut(slot), item)
    }

    pub fn take(&mut self, slot: EquipmentSlot) -> Option<Item> {
        self.get_mut(slot).take()
    }

    pub fn iter_equipped(&self) -> impl Iterator<Item = &Item> {
        EquipmentSlot::ALL
            .into_iter()
            .filter_map(move |slot| self.get(slot).as_ref())
    }

    pub fn iter_slots(&self) -> impl Iterator<Item = (EquipmentSlot, &Item)> {
        EquipmentSlot::ALL
            .into_iter()
            .filter_map(move |slot| self.get(slot).as_ref().map(|item| (slot, item)))
    }

    pub fn equipped_count(&self) -> usize {
        self.iter_equipped().count()
    }
}
