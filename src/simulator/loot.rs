//! Loot tracking and gear upgrades for simulated campaigns.

use crate::campaign::Campaign;
use crate::character::Stat;
use crate::config::GameConfig;
use crate::items::{Item, Rarity};
use serde::Serialize;
use std::collections::BTreeMap;
use uuid::Uuid;

/// Statistics about loot drops.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LootStats {
    pub drop_attempts: u64,
    pub total_drops: u64,
    /// Drops discarded because the inventory was full.
    pub drops_lost: u64,
    pub by_rarity: BTreeMap<Rarity, u64>,
}

impl LootStats {
    pub fn record_attempt(&mut self) {
        self.drop_attempts += 1;
    }

    pub fn record_drop(&mut self, item: &Item) {
        self.total_drops += 1;
        *self.by_rarity.entry(item.rarity).or_insert(0) += 1;
    }

    pub fn record_lost(&mut self) {
        self.drops_lost += 1;
    }

    pub fn drop_rate(&self) -> f64 {
        if self.drop_attempts == 0 {
            0.0
        } else {
            self.total_drops as f64 / self.drop_attempts as f64
        }
    }

    pub fn count(&self, rarity: Rarity) -> u64 {
        self.by_rarity.get(&rarity).copied().unwrap_or(0)
    }
}

/// Single-number value of a piece of gear, used to decide upgrades.
pub fn score_item(item: &Item) -> f64 {
    item.stat_modifiers
        .iter()
        .map(|(stat, value)| {
            let weight = match stat {
                Stat::Attack => 2.0,
                Stat::Defense => 1.5,
                Stat::CritChance => 1.2,
                Stat::Speed => 1.0,
                Stat::MaxHp => 0.3,
            };
            *value as f64 * weight
        })
        .sum()
}

/// Equips every inventory item that scores higher than what its slot holds.
/// Returns the number of items equipped.
pub fn auto_equip_upgrades(campaign: &mut Campaign, config: &GameConfig) -> u32 {
    let candidates: Vec<Uuid> = campaign
        .inventory
        .items()
        .iter()
        .filter(|item| item.is_equippable())
        .map(|item| item.id)
        .collect();

    let mut equipped = 0;
    for id in candidates {
        let Some(item) = campaign.inventory.get(id) else {
            continue;
        };
        let Some(slot) = item.slot else {
            continue;
        };
        let is_upgrade = match campaign.equipment.get(slot) {
            Some(current) => score_item(item) > score_item(current),
            None => true,
        };
        if is_upgrade && campaign.equip(config, id).is_ok() {
            equipped += 1;
        }
    }

    if equipped > 0 {
        tracing::debug!(equipped, "equipped upgrades");
    }
    equipped
}
