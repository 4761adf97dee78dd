use super::types::{EquipmentSlot, Item};
use crate::character::Stat;
use serde::{Deserialize, Serialize};

/// Equipped-slot map, one item per slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    #[serde(default)]
    pub weapon: Option<Item>,
    #[serde(default)]
    pub armor: Option<Item>,
    #[serde(default)]
    pub helmet: Option<Item>,
    #[serde(default)]
    pub gloves: Option<Item>,
    #[serde(default)]
    pub boots: Option<Item>,
    #[serde(default)]
    pub amulet: Option<Item>,
    #[serde(default)]
    pub ring: Option<Item>,
}

impl Equipment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: EquipmentSlot) -> Option<&Item> {
        self.slot_ref(slot).as_ref()
    }

    /// Puts `item` in its slot and returns whatever was there before.
    /// Returns the item itself back if it has no slot.
    pub fn equip(&mut self, item: Item) -> Result<Option<Item>, Item> {
        match item.slot {
            Some(slot) => Ok(self.slot_mut(slot).replace(item)),
            None => Err(item),
        }
    }

    /// Empties a slot, returning its item.
    pub fn take(&mut self, slot: EquipmentSlot) -> Option<Item> {
        self.slot_mut(slot).take()
    }

    /// Finds the slot holding the item with this id.
    pub fn slot_of(&self, id: uuid::Uuid) -> Option<EquipmentSlot> {
        EquipmentSlot::ALL
            .into_iter()
            .find(|&slot| self.get(slot).is_some_and(|item| item.id == id))
    }

    pub fn iter_equipped(&self) -> impl Iterator<Item = &Item> {
        [
            &self.weapon,
            &self.armor,
            &self.helmet,
            &self.gloves,
            &self.boots,
            &self.amulet,
            &self.ring,
        ]
        .into_iter()
        .filter_map(|item| item.as_ref())
    }

    /// Sum of one stat's modifiers over all equipped items.
    pub fn total_modifier(&self, stat: Stat) -> i32 {
        self.iter_equipped().map(|item| item.modifier(stat)).sum()
    }

    fn slot_ref(&self, slot: EquipmentSlot) -> &Option<Item> {
        match slot {
            EquipmentSlot::Weapon => &self.weapon,
            EquipmentSlot::Armor => &self.armor,
            EquipmentSlot::Helmet => &self.helmet,
            EquipmentSlot::Gloves => &self.gloves,
            EquipmentSlot::Boots => &self.boots,
            EquipmentSlot::Amulet => &self.amulet,
            EquipmentSlot::Ring => &self.ring,
        }
    }

    fn slot_mut(&mut self, slot: EquipmentSlot) -> &mut Option<Item> {
        match slot {
            EquipmentSlot::Weapon => &mut self.weapon,
            EquipmentSlot::Armor => &mut self.armor,
            EquipmentSlot::Helmet => &mut self.helmet,
            EquipmentSlot::Gloves => &mut self.gloves,
            EquipmentSlot::Boots => &mut self.boots,
            EquipmentSlot::Amulet => &mut self.amulet,
            EquipmentSlot::Ring => &mut self.ring,
        }
    }
}
