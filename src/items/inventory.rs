use super::types::{Item, ItemEffect, Rarity};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Bounded list of carried items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    items: Vec<Item>,
    max_slots: usize,
}

impl Inventory {
    pub fn new(max_slots: usize) -> Self {
        Self {
            items: Vec::new(),
            max_slots,
        }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn max_slots(&self) -> usize {
        self.max_slots
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.max_slots
    }

    /// Appends an item, handing it back if there is no room.
    pub fn add(&mut self, item: Item) -> Result<(), Item> {
        if self.is_full() {
            return Err(item);
        }
        self.items.push(item);
        Ok(())
    }

    pub fn get(&self, id: Uuid) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn remove(&mut self, id: Uuid) -> Option<Item> {
        let index = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(index))
    }

    /// First consumable carrying `effect`, in inventory order.
    pub fn first_with_effect(&self, effect: ItemEffect) -> Option<&Item> {
        self.items
            .iter()
            .find(|item| item.consumable && item.effect == Some(effect))
    }

    /// Orders items strongest rarity first, then by item type.
    pub fn sort(&mut self) {
        self.items.sort_by(|a, b| {
            b.rarity
                .cmp(&a.rarity)
                .then_with(|| a.item_type.cmp(&b.item_type))
        });
    }

    /// Removes every common item and returns their total sell value.
    pub fn drain_common(&mut self) -> (usize, u64) {
        let before = self.items.len();
        let mut gold = 0;
        self.items.retain(|item| {
            if item.rarity == Rarity::Common {
                gold += item.sell_value;
                false
            } else {
                true
            }
        });
        (before - self.items.len(), gold)
    }
}
