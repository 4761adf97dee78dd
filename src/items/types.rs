use crate::character::Stat;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentSlot {
    Weapon,
    Armor,
    Helmet,
    Gloves,
    Boots,
    Amulet,
    Ring,
}

impl EquipmentSlot {
    pub const ALL: [EquipmentSlot; 7] = [
        EquipmentSlot::Weapon,
        EquipmentSlot::Armor,
        EquipmentSlot::Helmet,
        EquipmentSlot::Gloves,
        EquipmentSlot::Boots,
        EquipmentSlot::Amulet,
        EquipmentSlot::Ring,
    ];
}

/// Rarity tiers, weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    Common = 0,
    Uncommon = 1,
    Rare = 2,
    Epic = 3,
    Mythic = 4,
    Legendary = 5,
}

impl Rarity {
    pub const ALL: [Rarity; 6] = [
        Rarity::Common,
        Rarity::Uncommon,
        Rarity::Rare,
        Rarity::Epic,
        Rarity::Mythic,
        Rarity::Legendary,
    ];

    /// Returns the identifier used in configuration files.
    pub fn id(&self) -> &'static str {
        match self {
            Rarity::Common => "common",
            Rarity::Uncommon => "uncommon",
            Rarity::Rare => "rare",
            Rarity::Epic => "epic",
            Rarity::Mythic => "mythic",
            Rarity::Legendary => "legendary",
        }
    }
}

/// Effect applied when a consumable is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemEffect {
    HealHp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: Uuid,
    /// Template key in the item-type table.
    pub item_type: String,
    pub name: String,
    pub rarity: Rarity,
    pub slot: Option<EquipmentSlot>,
    pub icon: String,
    pub stat_modifiers: BTreeMap<Stat, i32>,
    /// Floor the item was generated on.
    pub level: u32,
    pub sell_value: u64,
    pub description: String,
    pub consumable: bool,
    pub effect: Option<ItemEffect>,
    pub effect_value: u32,
    #[serde(default)]
    pub prefix: Option<String>,
    #[serde(default)]
    pub suffix: Option<String>,
}

impl Item {
    pub fn is_equippable(&self) -> bool {
        self.slot.is_some()
    }

    pub fn modifier(&self, stat: Stat) -> i32 {
        self.stat_modifiers.get(&stat).copied().unwrap_or(0)
    }
}
