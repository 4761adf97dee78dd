//! Persistent campaign state: the player, their gear, gold, and progress.
//!
//! A [`Campaign`] outlives individual battles. The battle controller borrows
//! it mutably for the duration of each call so HP and resource changes made
//! in combat are the same values the rest of the game sees.

use crate::character::{apply_experience, create_player, refresh_stats, Actor};
use crate::config::{ConfigError, GameConfig};
use crate::core::constants::STARTING_WEAPON;
use crate::core::Locale;
use crate::items::{Equipment, EquipmentSlot, Inventory, Item, ItemEffect, ItemGenerator, Rarity};
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Inventory and equipment operation failures. None of them change state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CampaignError {
    #[error("item {0} not found")]
    ItemNotFound(Uuid),

    #[error("item cannot be equipped")]
    NotEquippable,

    #[error("item is not a consumable")]
    NotConsumable,

    #[error("inventory is full")]
    InventoryFull,

    #[error("nothing equipped in {0:?} slot")]
    EmptySlot(EquipmentSlot),

    #[error("item would have no effect")]
    NoEffect,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    pub player: Actor,
    pub inventory: Inventory,
    pub equipment: Equipment,
    pub gold: u64,
    /// Experience toward the next level.
    pub experience: u64,
    pub level: u32,
    pub current_floor: u32,
    pub difficulty: String,
    pub enemies_defeated: u64,
    #[serde(default)]
    pub locale: Locale,
}

impl Campaign {
    /// Starts a level 1 campaign on floor 1 with starting gold and a common
    /// sword already equipped.
    pub fn new_game(
        config: &GameConfig,
        class_id: &str,
        difficulty: &str,
        locale: Locale,
        rng: &mut impl Rng,
    ) -> Result<Self, ConfigError> {
        config.difficulty(difficulty)?;
        let player = create_player(config, class_id, 1, locale)?;
        let weapon = ItemGenerator::new(config, locale).generate_item(
            STARTING_WEAPON,
            1,
            Some(Rarity::Common),
            rng,
        )?;

        let mut campaign = Self {
            player,
            inventory: Inventory::new(config.inventory.max_slots),
            equipment: Equipment::new(),
            gold: config.inventory.starting_gold,
            experience: 0,
            level: 1,
            current_floor: 1,
            difficulty: difficulty.to_string(),
            enemies_defeated: 0,
            locale,
        };
        // Validation guarantees a slot; an unvalidated table keeps it carried.
        if let Err(weapon) = campaign.equipment.equip(weapon) {
            tracing::warn!(item = %weapon.name, "starting weapon has no slot");
            let _ = campaign.inventory.add(weapon);
        }
        campaign.refresh_stats(config)?;
        campaign.player.restore_fully();

        tracing::info!(
            class = class_id,
            difficulty,
            "new campaign started"
        );
        Ok(campaign)
    }

    /// Recomputes player stats from class, level and equipped items.
    pub fn refresh_stats(&mut self, config: &GameConfig) -> Result<(), ConfigError> {
        let class = config.class(&self.player.template_id)?;
        refresh_stats(&mut self.player, class, self.level, &self.equipment);
        Ok(())
    }

    pub fn add_gold(&mut self, amount: u64) {
        self.gold = self.gold.saturating_add(amount);
    }

    /// Adds experience; each level gained fully restores HP and resource.
    /// Returns the number of levels gained.
    pub fn gain_experience(&mut self, config: &GameConfig, amount: u64) -> Result<u32, ConfigError> {
        let levelups = apply_experience(
            &config.xp_curve,
            &mut self.level,
            &mut self.experience,
            amount,
        );
        if levelups > 0 {
            self.refresh_stats(config)?;
            self.player.restore_fully();
        }
        Ok(levelups)
    }

    pub fn advance_floor(&mut self) {
        self.current_floor += 1;
    }

    /// Moves an inventory item into its slot. The previously equipped item,
    /// if any, takes its place in the inventory.
    pub fn equip(&mut self, config: &GameConfig, item_id: Uuid) -> Result<Option<Uuid>, CampaignError> {
        let item = self
            .inventory
            .get(item_id)
            .ok_or(CampaignError::ItemNotFound(item_id))?;
        if !item.is_equippable() {
            return Err(CampaignError::NotEquippable);
        }

        let item = self
            .inventory
            .remove(item_id)
            .ok_or(CampaignError::ItemNotFound(item_id))?;
        let previous = match self.equipment.equip(item) {
            Ok(previous) => previous,
            Err(item) => {
                let _ = self.inventory.add(item);
                return Err(CampaignError::NotEquippable);
            }
        };

        // The inventory just lost one item, so the swap always fits.
        let previous_id = previous.map(|old| {
            let id = old.id;
            let _ = self.inventory.add(old);
            id
        });

        self.refresh_after_gear_change(config);
        Ok(previous_id)
    }

    /// Moves the item in `slot` back to the inventory.
    pub fn unequip(&mut self, config: &GameConfig, slot: EquipmentSlot) -> Result<Uuid, CampaignError> {
        if self.equipment.get(slot).is_none() {
            return Err(CampaignError::EmptySlot(slot));
        }
        if self.inventory.is_full() {
            return Err(CampaignError::InventoryFull);
        }

        let item = self.equipment.take(slot).ok_or(CampaignError::EmptySlot(slot))?;
        let id = item.id;
        if let Err(item) = self.inventory.add(item) {
            let _ = self.equipment.equip(item);
            return Err(CampaignError::InventoryFull);
        }

        self.refresh_after_gear_change(config);
        Ok(id)
    }

    /// Sells an inventory or equipped item. Returns the gold received.
    pub fn sell(&mut self, config: &GameConfig, item_id: Uuid) -> Result<u64, CampaignError> {
        let item = if let Some(item) = self.inventory.remove(item_id) {
            item
        } else {
            let slot = self
                .equipment
                .slot_of(item_id)
                .ok_or(CampaignError::ItemNotFound(item_id))?;
            let item = self
                .equipment
                .take(slot)
                .ok_or(CampaignError::ItemNotFound(item_id))?;
            self.refresh_after_gear_change(config);
            item
        };

        self.add_gold(item.sell_value);
        tracing::debug!(item = %item.name, gold = item.sell_value, "sold item");
        Ok(item.sell_value)
    }

    pub fn sort_inventory(&mut self) {
        self.inventory.sort();
    }

    /// Sells every common item in the inventory. Returns (count, gold).
    pub fn sell_all_common(&mut self) -> (usize, u64) {
        let (count, gold) = self.inventory.drain_common();
        self.add_gold(gold);
        (count, gold)
    }

    /// Uses a consumable from the inventory. Returns the HP restored.
    ///
    /// A heal at full HP fails with [`CampaignError::NoEffect`] and keeps
    /// the item.
    pub fn use_consumable(&mut self, item_id: Uuid) -> Result<u32, CampaignError> {
        let item = self
            .inventory
            .get(item_id)
            .ok_or(CampaignError::ItemNotFound(item_id))?;
        if !item.consumable {
            return Err(CampaignError::NotConsumable);
        }

        let restored = match item.effect {
            Some(ItemEffect::HealHp) => {
                if self.player.stats.hp >= self.player.stats.max_hp {
                    return Err(CampaignError::NoEffect);
                }
                let amount = item.effect_value;
                self.player.heal(amount)
            }
            None => return Err(CampaignError::NoEffect),
        };

        self.inventory.remove(item_id);
        Ok(restored)
    }

    /// Adds looted items, handing the item back if there is no room.
    pub fn add_item(&mut self, item: Item) -> Result<(), Item> {
        self.inventory.add(item)
    }

    fn refresh_after_gear_change(&mut self, config: &GameConfig) {
        if let Err(err) = self.refresh_stats(config) {
            tracing::warn!(error = %err, "could not refresh stats after gear change");
        }
    }
}
