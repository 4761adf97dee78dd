//! Level-ups and stat recalculation.

use super::actor::{Actor, Stat};
use super::classes::stats_for_level;
use crate::config::{ClassTemplate, XpCurve};
use crate::items::Equipment;

const MODIFIED_STATS: [Stat; 5] = [
    Stat::MaxHp,
    Stat::Attack,
    Stat::Defense,
    Stat::Speed,
    Stat::CritChance,
];

/// Recomputes the player's stats from class, level and equipment.
///
/// Current HP keeps its share of max HP; a living player never drops to 0.
/// The resource is clamped to its maximum.
pub fn refresh_stats(player: &mut Actor, class: &ClassTemplate, level: u32, equipment: &Equipment) {
    let old_hp = player.stats.hp;
    let old_max = player.stats.max_hp.max(1);

    let mut stats = stats_for_level(class, level);
    for stat in MODIFIED_STATS {
        let delta = equipment.total_modifier(stat);
        if delta != 0 {
            stats.apply_modifier(stat, delta);
        }
    }
    stats.max_hp = stats.max_hp.max(1);

    let ratio = old_hp as f64 / old_max as f64;
    let mut hp = (ratio * stats.max_hp as f64).round() as u32;
    if old_hp > 0 {
        hp = hp.max(1);
    }
    stats.hp = hp.min(stats.max_hp);

    player.stats = stats;
    if let Some(resource) = player.resource.as_mut() {
        resource.current = resource.current.min(resource.max);
    }
}

/// Adds experience and processes level-ups, capped at the curve's max level.
/// Returns the number of levels gained.
pub fn apply_experience(curve: &XpCurve, level: &mut u32, experience: &mut u64, gained: u64) -> u32 {
    *experience = experience.saturating_add(gained);

    let mut levelups = 0;
    while *level < curve.max_level {
        let needed = curve.required_for(*level);
        if *experience < needed {
            break;
        }
        *experience -= needed;
        *level += 1;
        levelups += 1;
    }

    if levelups > 0 {
        tracing::info!(level = *level, levelups, "level up");
    }
    levelups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::create_player;
    use crate::config::GameConfig;
    use crate::core::Locale;
    use crate::items::{EquipmentSlot, Item, Rarity};
    use std::collections::BTreeMap;
    use uuid::Uuid;

    fn armor(max_hp: i32, defense: i32) -> Item {
        Item {
            id: Uuid::from_u128(7),
            item_type: "leather_armor".to_string(),
            name: "Leather Armor".to_string(),
            rarity: Rarity::Common,
            slot: Some(EquipmentSlot::Armor),
            icon: String::new(),
            stat_modifiers: BTreeMap::from([(Stat::MaxHp, max_hp), (Stat::Defense, defense)]),
            level: 1,
            sell_value: 10,
            description: String::new(),
            consumable: false,
            effect: None,
            effect_value: 0,
            prefix: None,
            suffix: None,
        }
    }

    #[test]
    fn test_apply_experience_no_levelup() {
        let curve = XpCurve::default();
        let (mut level, mut xp) = (1, 0);
        assert_eq!(apply_experience(&curve, &mut level, &mut xp, 50), 0);
        assert_eq!(level, 1);
        assert_eq!(xp, 50);
    }

    #[test]
    fn test_apply_experience_multiple_levelups() {
        let curve = XpCurve::default();
        let (mut level, mut xp) = (1, 0);
        // 100 for level 1, 150 for level 2, 10 left over
        assert_eq!(apply_experience(&curve, &mut level, &mut xp, 260), 2);
        assert_eq!(level, 3);
        assert_eq!(xp, 10);
    }

    #[test]
    fn test_apply_experience_capped_at_max_level() {
        let curve = XpCurve {
            base_xp: 10,
            increment: 0,
            max_level: 3,
        };
        let (mut level, mut xp) = (1, 0);
        assert_eq!(apply_experience(&curve, &mut level, &mut xp, 1_000), 2);
        assert_eq!(level, 3);
        assert_eq!(xp, 980);
    }

    #[test]
    fn test_refresh_stats_adds_equipment() {
        let config = GameConfig::default();
        let class = config.class("warrior").unwrap();
        let mut player = create_player(&config, "warrior", 1, Locale::En).unwrap();
        let mut equipment = Equipment::new();
        equipment.equip(armor(30, 4)).unwrap();

        refresh_stats(&mut player, class, 1, &equipment);
        assert_eq!(player.stats.max_hp, 150);
        assert_eq!(player.stats.defense, 16);
        // Was at full HP, stays at full HP
        assert_eq!(player.stats.hp, 150);
    }

    #[test]
    fn test_refresh_stats_keeps_hp_percentage() {
        let config = GameConfig::default();
        let class = config.class("warrior").unwrap();
        let mut player = create_player(&config, "warrior", 1, Locale::En).unwrap();
        player.stats.hp = 60; // half of 120

        let mut equipment = Equipment::new();
        equipment.equip(armor(80, 0)).unwrap();
        refresh_stats(&mut player, class, 1, &equipment);

        assert_eq!(player.stats.max_hp, 200);
        assert_eq!(player.stats.hp, 100);

        refresh_stats(&mut player, class, 1, &Equipment::new());
        assert_eq!(player.stats.max_hp, 120);
        assert_eq!(player.stats.hp, 60);
    }

    #[test]
    fn test_refresh_stats_never_kills() {
        let config = GameConfig::default();
        let class = config.class("warrior").unwrap();
        let mut player = create_player(&config, "warrior", 1, Locale::En).unwrap();
        player.stats.hp = 1;
        player.stats.max_hp = 1_000;

        refresh_stats(&mut player, class, 1, &Equipment::new());
        assert_eq!(player.stats.hp, 1);
    }
}
