//! Bounded hero inventory.

use super::types::Item;
use crate::core::constants::MAX_INVENTORY_SIZE;
use serde::{Deserialize, Serialize};

/// Ordered list of owned, unequipped items. Never holds more than
/// [`MAX_INVENTORY_SIZE`] entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inventory {
    items: Vec<Item>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an item. Hands it back if the inventory is full.
    pub fn add(&mut self, item: Item) -> Result<(), Item> {
        if self.is_full() {
            return Err(item);
        }
        self.items.push(item);
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Option<Item> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Item> {
        self.items.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= MAX_INVENTORY_SIZE
    }

    pub fn free_slots(&self) -> usize {
        MAX_INVENTORY_SIZE.saturating_sub(self.items.len())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Item] {
        &self.items
    }

    /// Drops anything past the size limit. Used when restoring saves.
    pub fn truncate_to_capacity(&mut self) -> Vec<Item> {
        if self.items.len() > MAX_INVENTORY_SIZE {
            self.items.split_off(MAX_INVENTORY_SIZE)
        } else {
            Vec::new()
        }
    }
}
