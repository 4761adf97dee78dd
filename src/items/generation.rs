use super::types::{Item, Rarity};
use crate::config::{AffixDef, ConfigError, GameConfig};
use crate::core::constants::{
    FLOOR_SCALING_PER_FLOOR, PREFIX_CHANCE, SELL_VALUE_FACTOR, SUFFIX_CHANCE,
};
use crate::core::rng::{pick_index, roll};
use crate::core::Locale;
use rand::Rng;
use std::collections::BTreeMap;

/// Builds item instances from the configured templates.
///
/// Random draws happen in a fixed order so a scripted RNG replays exactly:
/// rarity (only when not supplied), prefix chance, prefix pick (only on
/// success), suffix chance, suffix pick (only on success).
#[derive(Debug, Clone, Copy)]
pub struct ItemGenerator<'a> {
    config: &'a GameConfig,
    locale: Locale,
}

/// Stat multiplier from the floor an item drops on.
/// Floor 1: 1.0x, floor 6: 1.5x, floor 11: 2.0x
pub fn floor_scaling(floor: u32) -> f64 {
    1.0 + (floor.max(1) - 1) as f64 * FLOOR_SCALING_PER_FLOOR
}

/// Gold received when selling an item of this floor and rarity multiplier.
pub fn sell_value(floor: u32, stat_multiplier: f64) -> u64 {
    ((floor + 1) as f64 * stat_multiplier * SELL_VALUE_FACTOR).floor() as u64
}

impl<'a> ItemGenerator<'a> {
    pub fn new(config: &'a GameConfig, locale: Locale) -> Self {
        Self { config, locale }
    }

    /// Weighted pick over the rarity table.
    ///
    /// Falls back to common if the roll overflows the table; a validated
    /// config never overflows, so the fallback is logged as a warning.
    pub fn roll_rarity(&self, rng: &mut impl Rng) -> Rarity {
        let roll = roll(rng) * 100.0;
        let mut cumulative = 0.0;

        for entry in &self.config.rarities {
            cumulative += entry.chance;
            if roll <= cumulative {
                return entry.rarity;
            }
        }

        tracing::warn!(roll, cumulative, "rarity roll overflowed table, using common");
        Rarity::Common
    }

    /// Generates an item of `item_type` for `floor`. The rarity is rolled
    /// unless one is supplied (guaranteed drops such as the starting weapon).
    pub fn generate_item(
        &self,
        item_type: &str,
        floor: u32,
        rarity: Option<Rarity>,
        rng: &mut impl Rng,
    ) -> Result<Item, ConfigError> {
        let template = self.config.item_type(item_type)?;

        let rarity = rarity.unwrap_or_else(|| self.roll_rarity(rng));
        let rarity_def = self
            .config
            .rarity(rarity)
            .ok_or(ConfigError::MissingRarity(rarity))?;

        let prefix = roll_affix(&self.config.prefixes, PREFIX_CHANCE, rng);
        let suffix = roll_affix(&self.config.suffixes, SUFFIX_CHANCE, rng);

        let scaling = floor_scaling(floor);
        let mut stat_modifiers: BTreeMap<_, i32> = template
            .base_stats
            .iter()
            .map(|(&stat, &base)| {
                let scaled = (base as f64 * scaling * rarity_def.stat_multiplier).floor();
                (stat, scaled as i32)
            })
            .collect();

        for affix in prefix.iter().chain(suffix.iter()) {
            for (&stat, &delta) in &affix.stat_mods {
                *stat_modifiers.entry(stat).or_insert(0) += delta;
            }
        }

        let mut name = template.name.get(self.locale).to_string();
        if let Some(prefix) = prefix {
            name = format!("{} {}", prefix.name.get(self.locale), name);
        }
        if let Some(suffix) = suffix {
            name = format!("{} {}", name, suffix.name.get(self.locale));
        }

        let mut id_bytes = [0u8; 16];
        rng.fill_bytes(&mut id_bytes);

        let item = Item {
            id: uuid::Builder::from_random_bytes(id_bytes).into_uuid(),
            item_type: item_type.to_string(),
            name,
            rarity,
            slot: template.slot,
            icon: template.icon.clone(),
            stat_modifiers,
            level: floor,
            sell_value: sell_value(floor, rarity_def.stat_multiplier),
            description: template.description.get(self.locale).to_string(),
            consumable: template.consumable,
            effect: template.effect,
            effect_value: template.effect_value,
            prefix: prefix.map(|a| a.id.clone()),
            suffix: suffix.map(|a| a.id.clone()),
        };

        tracing::debug!(
            item = %item.name,
            rarity = ?item.rarity,
            floor,
            "generated item"
        );
        Ok(item)
    }

    /// Picks a uniformly random lootable item type and generates it.
    /// Returns `None` only when nothing is lootable.
    pub fn generate_loot_drop(&self, floor: u32, rng: &mut impl Rng) -> Option<Item> {
        let lootable = self.config.lootable_item_types();
        if lootable.is_empty() {
            tracing::warn!("no lootable item types configured");
            return None;
        }

        let item_type = lootable[pick_index(rng, lootable.len())];
        self.generate_item(item_type, floor, None, rng).ok()
    }
}

fn roll_affix<'c>(table: &'c [AffixDef], chance: f64, rng: &mut impl Rng) -> Option<&'c AffixDef> {
    if roll(rng) >= chance || table.is_empty() {
        return None;
    }
    Some(&table[pick_index(rng, table.len())])
}
