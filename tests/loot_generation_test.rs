//! Integration test: Rarity Roll -> Affixes -> Stats -> Loot Drop
//!
//! Statistical checks on the rarity table and affix chances, exact stat and
//! sell-value math on hand-computed items, and replay of seeded generation.

use heroes::character::Stat;
use heroes::config::{ConfigError, GameConfig};
use heroes::core::constants::{PREFIX_CHANCE, SUFFIX_CHANCE};
use heroes::core::{Locale, ScriptedRng};
use heroes::items::{floor_scaling, sell_value, ItemGenerator, Rarity};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeMap;

// =========================================================================
// Rarity distribution
// =========================================================================

#[test]
fn test_rarity_distribution_matches_configured_weights() {
    let config = GameConfig::default();
    let generator = ItemGenerator::new(&config, Locale::En);
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    let trials = 20_000;

    let mut observed: BTreeMap<Rarity, u32> = BTreeMap::new();
    for _ in 0..trials {
        *observed.entry(generator.roll_rarity(&mut rng)).or_insert(0) += 1;
    }

    // Chi-square over the six tiers (5 degrees of freedom). 25.0 is far
    // beyond the 0.1% critical value of 20.5.
    let chi_square: f64 = config
        .rarities
        .iter()
        .map(|row| {
            let expected = trials as f64 * row.chance / 100.0;
            let seen = observed.get(&row.rarity).copied().unwrap_or(0) as f64;
            (seen - expected).powi(2) / expected
        })
        .sum();
    assert!(
        chi_square < 25.0,
        "rarity rolls diverge from weights: chi-square {chi_square:.2}, observed {observed:?}"
    );
}

#[test]
fn test_rarity_boundaries_are_inclusive() {
    let config = GameConfig::default();
    let generator = ItemGenerator::new(&config, Locale::En);

    // Cumulative table: common 50, uncommon 75, rare 90, epic 97, mythic 99
    let cases = [
        (0.0, Rarity::Common),
        (0.5, Rarity::Common),
        (0.625, Rarity::Uncommon),
        (0.875, Rarity::Rare),
        (0.96875, Rarity::Epic),
        (0.984375, Rarity::Mythic),
        (0.9921875, Rarity::Legendary),
    ];
    for (roll, expected) in cases {
        let mut rng = ScriptedRng::constant(roll);
        assert_eq!(generator.roll_rarity(&mut rng), expected, "roll {roll}");
    }
}

// =========================================================================
// Affix chances
// =========================================================================

#[test]
fn test_affix_rates_converge() {
    let config = GameConfig::default();
    let generator = ItemGenerator::new(&config, Locale::En);
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let trials = 10_000;

    let (mut prefixes, mut suffixes) = (0, 0);
    for _ in 0..trials {
        let item = generator
            .generate_item("ring", 1, Some(Rarity::Common), &mut rng)
            .unwrap();
        prefixes += item.prefix.is_some() as u32;
        suffixes += item.suffix.is_some() as u32;
    }

    let prefix_rate = prefixes as f64 / trials as f64;
    let suffix_rate = suffixes as f64 / trials as f64;
    assert!((prefix_rate - PREFIX_CHANCE).abs() < 0.03, "prefix rate {prefix_rate}");
    assert!((suffix_rate - SUFFIX_CHANCE).abs() < 0.03, "suffix rate {suffix_rate}");
}

// =========================================================================
// Stat and value math
// =========================================================================

#[test]
fn test_rare_sword_on_floor_three() {
    let config = GameConfig::default();
    let generator = ItemGenerator::new(&config, Locale::En);
    // 0.75 is above both affix chances
    let mut rng = ScriptedRng::constant(0.75);

    let item = generator
        .generate_item("sword", 3, Some(Rarity::Rare), &mut rng)
        .unwrap();

    // floor(8 * 1.2 * 1.5) = floor(14.4)
    assert_eq!(item.modifier(Stat::Attack), 14);
    // floor((3 + 1) * 1.5 * 5)
    assert_eq!(item.sell_value, 30);
    assert_eq!(item.name, "Sword");
    assert_eq!(item.level, 3);
    assert_eq!(rng.consumed(), 2);
}

#[test]
fn test_affixes_add_flat_deltas_and_compose_the_name() {
    let config = GameConfig::default();
    // prefix yes, pick "sharp"; suffix yes, pick "of_power"
    let mut rng = ScriptedRng::new(vec![0.25, 0.0, 0.25, 0.0]);

    let en = ItemGenerator::new(&config, Locale::En)
        .generate_item("sword", 1, Some(Rarity::Common), &mut rng)
        .unwrap();
    assert_eq!(en.name, "Sharp Sword of Power");
    // 8 base + 2 sharp + 3 of power
    assert_eq!(en.modifier(Stat::Attack), 13);
    assert_eq!(en.prefix.as_deref(), Some("sharp"));
    assert_eq!(en.suffix.as_deref(), Some("of_power"));
}

#[test]
fn test_floor_scaling_and_sell_value_helpers() {
    assert!((floor_scaling(1) - 1.0).abs() < 1e-9);
    assert!((floor_scaling(11) - 2.0).abs() < 1e-9);
    assert_eq!(sell_value(1, 1.0), 10);
    assert_eq!(sell_value(9, 3.0), 150);
}

#[test]
fn test_template_fields_copy_through() {
    let config = GameConfig::default();
    let mut rng = ScriptedRng::constant(0.75);
    let potion = ItemGenerator::new(&config, Locale::Ar)
        .generate_item("health_potion", 4, Some(Rarity::Common), &mut rng)
        .unwrap();

    let template = config.item_type("health_potion").unwrap();
    assert!(potion.consumable);
    assert_eq!(potion.effect, template.effect);
    assert_eq!(potion.effect_value, template.effect_value);
    assert_eq!(potion.icon, template.icon);
    assert_eq!(potion.slot, None);
    assert_eq!(potion.name, template.name.ar);
    assert_eq!(potion.description, template.description.ar);
}

// =========================================================================
// Loot drops
// =========================================================================

#[test]
fn test_loot_drops_are_always_lootable_types() {
    let config = GameConfig::default();
    let generator = ItemGenerator::new(&config, Locale::En);
    let mut rng = ChaCha8Rng::seed_from_u64(11);

    for _ in 0..2_000 {
        let item = generator.generate_loot_drop(2, &mut rng).unwrap();
        assert_ne!(item.item_type, "old_map");
        assert!(item.is_equippable() || item.consumable);
        assert_eq!(item.level, 2);
    }
}

#[test]
fn test_no_lootable_types_yields_no_drop() {
    let mut config = GameConfig::default();
    config.item_types.retain(|_, template| !template.is_lootable());
    let generator = ItemGenerator::new(&config, Locale::En);
    let mut rng = ChaCha8Rng::seed_from_u64(1);

    assert!(generator.generate_loot_drop(1, &mut rng).is_none());
}

#[test]
fn test_seeded_generation_replays_identically() {
    let config = GameConfig::default();
    let generator = ItemGenerator::new(&config, Locale::En);
    let batch = |seed| {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        (0..50)
            .filter_map(|floor| generator.generate_loot_drop(floor + 1, &mut rng))
            .collect::<Vec<_>>()
    };

    assert_eq!(batch(5), batch(5));
    assert_ne!(batch(5), batch(6));
}

// =========================================================================
// Configuration validation
// =========================================================================

#[test]
fn test_rarity_weights_must_sum_to_one_hundred() {
    let json = r#"{
        "rarities": [
            { "rarity": "common", "chance": 60.0, "stat_multiplier": 1.0,
              "name": { "en": "Common" } }
        ]
    }"#;
    assert!(matches!(
        GameConfig::from_json_str(json),
        Err(ConfigError::RarityWeights { .. })
    ));
}

#[test]
fn test_partial_json_falls_back_to_builtin_tables() {
    let json = r#"{ "combat": { "base_crit_multiplier": 2.0, "flee_chance": 0.25 } }"#;
    let config = GameConfig::from_json_str(json).unwrap();

    assert!((config.combat.base_crit_multiplier - 2.0).abs() < 1e-9);
    assert_eq!(config.rarities, GameConfig::default().rarities);
    assert!(config.item_type("sword").is_ok());
}
