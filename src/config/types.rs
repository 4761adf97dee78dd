use crate::character::Stat;
use crate::core::constants::*;
use crate::core::LocalizedText;
use crate::items::{EquipmentSlot, ItemEffect, Rarity};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Template an item instance is generated from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemTemplate {
    pub name: LocalizedText,
    /// `None` for items that cannot be equipped.
    #[serde(default)]
    pub slot: Option<EquipmentSlot>,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub base_stats: BTreeMap<Stat, i32>,
    #[serde(default)]
    pub consumable: bool,
    #[serde(default)]
    pub effect: Option<ItemEffect>,
    #[serde(default)]
    pub effect_value: u32,
    #[serde(default)]
    pub description: LocalizedText,
}

impl ItemTemplate {
    /// Lootable items are equippable or consumable.
    pub fn is_lootable(&self) -> bool {
        self.slot.is_some() || self.consumable
    }
}

/// One row of the rarity table. `chance` is a percentage; rows are
/// accumulated in table order when rolling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RarityDef {
    pub rarity: Rarity,
    pub chance: f64,
    pub stat_multiplier: f64,
    pub name: LocalizedText,
}

/// Prefix or suffix adding flat stat deltas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffixDef {
    pub id: String,
    pub name: LocalizedText,
    #[serde(default)]
    pub stat_mods: BTreeMap<Stat, i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbilityKind {
    /// Hits the target with `damage_multiplier` applied.
    Attack,
    /// Raises the caster's guard, like defending.
    Guard,
    /// Restores `attack * damage_multiplier` HP to the caster.
    Heal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbilityDef {
    pub name: LocalizedText,
    pub cost: u32,
    #[serde(default = "default_multiplier")]
    pub damage_multiplier: f64,
    pub kind: AbilityKind,
}

impl AbilityDef {
    pub fn is_offensive(&self) -> bool {
        self.kind == AbilityKind::Attack
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseStats {
    pub hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,
    #[serde(default)]
    pub crit_chance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyTemplate {
    pub name: LocalizedText,
    pub base_stats: BaseStats,
    pub xp_reward: u64,
    pub gold_reward: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceTemplate {
    pub name: LocalizedText,
    pub max: u32,
    pub regen_per_turn: u32,
}

/// Per-level stat gains.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GrowthRates {
    pub hp: f64,
    pub attack: f64,
    pub defense: f64,
    pub speed: f64,
    pub crit_chance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassTemplate {
    pub name: LocalizedText,
    pub resource: ResourceTemplate,
    pub base_stats: BaseStats,
    #[serde(default)]
    pub growth: GrowthRates,
    pub abilities: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Difficulty {
    pub player_damage_mult: f64,
    pub enemy_damage_mult: f64,
    #[serde(default = "default_multiplier")]
    pub enemy_hp_mult: f64,
    pub xp_mult: f64,
    pub gold_mult: f64,
}

impl Default for Difficulty {
    fn default() -> Self {
        Self {
            player_damage_mult: 1.0,
            enemy_damage_mult: 1.0,
            enemy_hp_mult: 1.0,
            xp_mult: 1.0,
            gold_mult: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatConstants {
    pub base_crit_multiplier: f64,
    /// Probability in `[0, 1]` that a flee attempt succeeds.
    pub flee_chance: f64,
}

impl Default for CombatConstants {
    fn default() -> Self {
        Self {
            base_crit_multiplier: DEFAULT_CRIT_MULTIPLIER,
            flee_chance: DEFAULT_FLEE_CHANCE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryConfig {
    pub max_slots: usize,
    pub starting_gold: u64,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            max_slots: INVENTORY_MAX_SLOTS,
            starting_gold: STARTING_GOLD,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct XpCurve {
    pub base_xp: u64,
    pub increment: u64,
    pub max_level: u32,
}

impl XpCurve {
    /// Experience needed to advance from `level` to the next one.
    pub fn required_for(&self, level: u32) -> u64 {
        if level == 0 {
            return 0;
        }
        self.base_xp + (level as u64 - 1) * self.increment
    }
}

impl Default for XpCurve {
    fn default() -> Self {
        Self {
            base_xp: XP_CURVE_BASE,
            increment: XP_CURVE_INCREMENT,
            max_level: MAX_LEVEL,
        }
    }
}

fn default_multiplier() -> f64 {
    1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xp_curve_required() {
        let curve = XpCurve::default();
        assert_eq!(curve.required_for(0), 0);
        assert_eq!(curve.required_for(1), 100);
        assert_eq!(curve.required_for(3), 200);
    }

    #[test]
    fn test_item_template_lootable() {
        let mut template = ItemTemplate {
            name: LocalizedText::new("Old Map", "خريطة قديمة"),
            slot: None,
            icon: String::new(),
            base_stats: BTreeMap::new(),
            consumable: false,
            effect: None,
            effect_value: 0,
            description: LocalizedText::default(),
        };
        assert!(!template.is_lootable());
        template.consumable = true;
        assert!(template.is_lootable());
        template.consumable = false;
        template.slot = Some(EquipmentSlot::Ring);
        assert!(template.is_lootable());
    }

    #[test]
    fn test_ability_def_defaults_multiplier() {
        let json = r#"{"name":{"en":"Guard"},"cost":5,"kind":"guard"}"#;
        let ability: AbilityDef = serde_json::from_str(json).unwrap();
        assert_eq!(ability.damage_multiplier, 1.0);
        assert!(!ability.is_offensive());
    }
}
