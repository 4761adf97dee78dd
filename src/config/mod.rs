//! Game configuration: item, rarity, affix, ability, enemy, class and
//! difficulty tables plus combat constants.
//!
//! [`GameConfig`] is the read-only provider the combat and loot code query.
//! Every constructor validates the tables, so a config that reaches the
//! battle code never needs per-call checks for misconfiguration.

mod builtin;
pub mod types;

pub use types::*;

use crate::core::constants::{RARITY_SUM_TOLERANCE, RARITY_TOTAL_PERCENT, STARTING_WEAPON};
use crate::items::Rarity;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

/// Fatal configuration problems, reported at load time.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("rarity table is empty")]
    EmptyRarityTable,

    #[error("rarity chances sum to {total}, expected 100")]
    RarityWeights { total: f64 },

    #[error("rarity table has no entry for {0:?}")]
    MissingRarity(Rarity),

    #[error("unknown item type '{0}'")]
    UnknownItemType(String),

    #[error("no lootable item types configured")]
    NoLootableItems,

    #[error("starting weapon '{0}' has no equipment slot")]
    StartingWeaponNotEquippable(String),

    #[error("unknown ability '{ability}' referenced by class '{class}'")]
    UnknownAbility { class: String, ability: String },

    #[error("unknown class '{0}'")]
    UnknownClass(String),

    #[error("unknown enemy '{0}'")]
    UnknownEnemy(String),

    #[error("unknown difficulty '{0}'")]
    UnknownDifficulty(String),

    #[error("no enemy templates configured")]
    NoEnemies,

    #[error("flee chance {0} is outside [0, 1]")]
    FleeChance(f64),

    #[error("failed to read config file")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config")]
    Json(#[from] serde_json::Error),
}

/// Complete game content. Missing sections in a JSON file fall back to the
/// built-in tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub item_types: BTreeMap<String, ItemTemplate>,
    /// Weakest to strongest; chances are accumulated in this order.
    pub rarities: Vec<RarityDef>,
    pub prefixes: Vec<AffixDef>,
    pub suffixes: Vec<AffixDef>,
    pub abilities: BTreeMap<String, AbilityDef>,
    pub enemies: BTreeMap<String, EnemyTemplate>,
    pub classes: BTreeMap<String, ClassTemplate>,
    pub difficulties: BTreeMap<String, Difficulty>,
    pub combat: CombatConstants,
    pub inventory: InventoryConfig,
    pub xp_curve: XpCurve,
}

impl Default for GameConfig {
    fn default() -> Self {
        builtin::builtin_config()
    }
}

impl GameConfig {
    /// Parses and validates a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        tracing::info!(path = %path.display(), "loaded game config");
        Ok(config)
    }

    /// Checks the invariants the combat and loot code rely on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rarities.is_empty() {
            return Err(ConfigError::EmptyRarityTable);
        }
        let total: f64 = self.rarities.iter().map(|r| r.chance).sum();
        if (total - RARITY_TOTAL_PERCENT).abs() > RARITY_SUM_TOLERANCE {
            return Err(ConfigError::RarityWeights { total });
        }
        // Rolling falls back to common on overflow, so it must exist.
        if self.rarity(Rarity::Common).is_none() {
            return Err(ConfigError::MissingRarity(Rarity::Common));
        }

        if !self.item_types.values().any(ItemTemplate::is_lootable) {
            return Err(ConfigError::NoLootableItems);
        }
        if self.item_type(STARTING_WEAPON)?.slot.is_none() {
            return Err(ConfigError::StartingWeaponNotEquippable(
                STARTING_WEAPON.to_string(),
            ));
        }

        for (class_id, class) in &self.classes {
            for ability in &class.abilities {
                if !self.abilities.contains_key(ability) {
                    return Err(ConfigError::UnknownAbility {
                        class: class_id.clone(),
                        ability: ability.clone(),
                    });
                }
            }
        }

        if self.enemies.is_empty() {
            return Err(ConfigError::NoEnemies);
        }
        if !(0.0..=1.0).contains(&self.combat.flee_chance) {
            return Err(ConfigError::FleeChance(self.combat.flee_chance));
        }
        Ok(())
    }

    pub fn item_type(&self, id: &str) -> Result<&ItemTemplate, ConfigError> {
        self.item_types
            .get(id)
            .ok_or_else(|| ConfigError::UnknownItemType(id.to_string()))
    }

    pub fn rarity(&self, rarity: Rarity) -> Option<&RarityDef> {
        self.rarities.iter().find(|r| r.rarity == rarity)
    }

    pub fn ability(&self, id: &str) -> Option<&AbilityDef> {
        self.abilities.get(id)
    }

    pub fn class(&self, id: &str) -> Result<&ClassTemplate, ConfigError> {
        self.classes
            .get(id)
            .ok_or_else(|| ConfigError::UnknownClass(id.to_string()))
    }

    pub fn enemy(&self, id: &str) -> Result<&EnemyTemplate, ConfigError> {
        self.enemies
            .get(id)
            .ok_or_else(|| ConfigError::UnknownEnemy(id.to_string()))
    }

    pub fn difficulty(&self, id: &str) -> Result<&Difficulty, ConfigError> {
        self.difficulties
            .get(id)
            .ok_or_else(|| ConfigError::UnknownDifficulty(id.to_string()))
    }

    /// Item type ids that can drop as loot, in table order.
    pub fn lootable_item_types(&self) -> Vec<&str> {
        self.item_types
            .iter()
            .filter(|(_, template)| template.is_lootable())
            .map(|(id, _)| id.as_str())
            .collect()
    }
}
