//! Integration test: New Game -> Gear -> Level Curve -> Save/Load
//!
//! Exercises the campaign state that persists between battles: every class
//! starts ready to fight, gear changes keep HP proportional, the level curve
//! caps, and a campaign survives a JSON round trip.

use heroes::campaign::{Campaign, CampaignError};
use heroes::config::GameConfig;
use heroes::core::{Locale, ScriptedRng};
use heroes::items::{EquipmentSlot, Item, ItemGenerator, Rarity};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use uuid::Uuid;

fn start(config: &GameConfig, class_id: &str) -> Campaign {
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    Campaign::new_game(config, class_id, "normal", Locale::En, &mut rng).unwrap()
}

/// Affix-free item of the given type.
fn plain_item(config: &GameConfig, item_type: &str, rarity: Rarity) -> Item {
    let mut rng = ScriptedRng::constant(0.75);
    let mut item = ItemGenerator::new(config, Locale::En)
        .generate_item(item_type, 1, Some(rarity), &mut rng)
        .unwrap();
    item.id = Uuid::new_v4();
    item
}

#[test]
fn test_every_class_starts_ready_to_fight() {
    let config = GameConfig::default();

    for class_id in ["warrior", "sorceress", "rogue"] {
        let campaign = start(&config, class_id);
        let player = &campaign.player;

        assert!(player.is_player(), "{class_id}");
        assert_eq!(player.template_id, class_id);
        assert_eq!(player.stats.hp, player.stats.max_hp, "{class_id}");
        let resource = player.resource.as_ref().unwrap();
        assert_eq!(resource.current, resource.max, "{class_id}");
        assert!(!player.abilities.is_empty(), "{class_id}");
        assert!(campaign.equipment.get(EquipmentSlot::Weapon).is_some());
        assert_eq!(campaign.inventory.max_slots(), 20);
    }
}

#[test]
fn test_gear_changes_keep_hp_share() {
    let config = GameConfig::default();
    let mut campaign = start(&config, "warrior");
    campaign.player.stats.hp = 60;

    let amulet = plain_item(&config, "amulet", Rarity::Common);
    let amulet_id = amulet.id;
    campaign.add_item(amulet).unwrap();
    campaign.equip(&config, amulet_id).unwrap();

    // 120 + 15 max HP; half of 135 rounds up
    assert_eq!(campaign.player.stats.max_hp, 135);
    assert_eq!(campaign.player.stats.hp, 68);

    campaign.unequip(&config, EquipmentSlot::Amulet).unwrap();
    // round(68 / 135 * 120) = round(60.44)
    assert_eq!(campaign.player.stats.max_hp, 120);
    assert_eq!(campaign.player.stats.hp, 60);
}

#[test]
fn test_inventory_housekeeping() {
    let config = GameConfig::default();
    let mut campaign = start(&config, "rogue");
    let starting_gold = campaign.gold;

    for (item_type, rarity) in [
        ("boots", Rarity::Common),
        ("ring", Rarity::Epic),
        ("helmet", Rarity::Common),
        ("gloves", Rarity::Rare),
    ] {
        campaign.add_item(plain_item(&config, item_type, rarity)).unwrap();
    }

    campaign.sort_inventory();
    let order: Vec<&str> = campaign
        .inventory
        .items()
        .iter()
        .map(|item| item.item_type.as_str())
        .collect();
    assert_eq!(order, ["ring", "gloves", "boots", "helmet"]);

    let (sold, gold) = campaign.sell_all_common();
    assert_eq!(sold, 2);
    // Two level 1 commons at 10 gold each
    assert_eq!(gold, 20);
    assert_eq!(campaign.gold, starting_gold + 20);
    assert_eq!(campaign.inventory.len(), 2);

    let missing = Uuid::new_v4();
    assert_eq!(
        campaign.sell(&config, missing),
        Err(CampaignError::ItemNotFound(missing))
    );
}

#[test]
fn test_level_curve_caps_at_max_level() {
    let config = GameConfig::default();
    let mut campaign = start(&config, "sorceress");

    let gained = campaign.gain_experience(&config, 1_000_000).unwrap();
    assert_eq!(gained, 49);
    assert_eq!(campaign.level, 50);
    // 49 * 100 + 50 * (0 + 1 + ... + 48) spent on the way up
    assert_eq!(campaign.experience, 1_000_000 - 63_700);

    assert_eq!(campaign.gain_experience(&config, 500).unwrap(), 0);
    assert_eq!(campaign.level, 50);
}

#[test]
fn test_campaign_survives_save_and_load() {
    let config = GameConfig::default();
    let mut campaign = start(&config, "warrior");
    campaign.add_item(plain_item(&config, "health_potion", Rarity::Common)).unwrap();
    campaign.gain_experience(&config, 250).unwrap();
    campaign.advance_floor();
    campaign.player.stats.hp -= 7;

    let saved = serde_json::to_string(&campaign).unwrap();
    let loaded: Campaign = serde_json::from_str(&saved).unwrap();

    assert_eq!(loaded, campaign);
    assert_eq!(loaded.level, 3);
    assert_eq!(loaded.current_floor, 2);
}

#[test]
fn test_save_without_locale_defaults_to_english() {
    let config = GameConfig::default();
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let campaign = Campaign::new_game(&config, "rogue", "hard", Locale::Ar, &mut rng).unwrap();

    let mut value = serde_json::to_value(&campaign).unwrap();
    value.as_object_mut().unwrap().remove("locale");
    let loaded: Campaign = serde_json::from_value(value).unwrap();

    assert_eq!(loaded.locale, Locale::En);
    assert_eq!(loaded.difficulty, "hard");
}

#[test]
fn test_loaded_campaign_with_overfull_resource_is_clamped() {
    let config = GameConfig::default();
    let campaign = start(&config, "warrior");

    let mut value = serde_json::to_value(&campaign).unwrap();
    value["player"]["resource"]["current"] = serde_json::json!(1000);
    let mut loaded: Campaign = serde_json::from_value(value).unwrap();

    // Regeneration on a corrupt pool only pulls it back to max
    let mut player = loaded.player.clone();
    assert_eq!(player.regenerate_resource(), 0);
    assert_eq!(player.resource_current(), 60);

    loaded.refresh_stats(&config).unwrap();
    assert_eq!(loaded.player.resource_current(), 60);
}
