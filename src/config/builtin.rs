//! Built-in game content used when no configuration file is supplied.

use super::types::*;
use super::GameConfig;
use crate::character::Stat;
use crate::core::LocalizedText;
use crate::items::{EquipmentSlot, ItemEffect, Rarity};
use std::collections::BTreeMap;

fn text(en: &str, ar: &str) -> LocalizedText {
    LocalizedText::new(en, ar)
}

fn stats(pairs: &[(Stat, i32)]) -> BTreeMap<Stat, i32> {
    pairs.iter().copied().collect()
}

fn equipment(
    name: LocalizedText,
    slot: EquipmentSlot,
    icon: &str,
    base_stats: &[(Stat, i32)],
    description: LocalizedText,
) -> ItemTemplate {
    ItemTemplate {
        name,
        slot: Some(slot),
        icon: icon.to_string(),
        base_stats: stats(base_stats),
        consumable: false,
        effect: None,
        effect_value: 0,
        description,
    }
}

pub(super) fn builtin_config() -> GameConfig {
    GameConfig {
        item_types: item_types(),
        rarities: rarities(),
        prefixes: prefixes(),
        suffixes: suffixes(),
        abilities: abilities(),
        enemies: enemies(),
        classes: classes(),
        difficulties: difficulties(),
        combat: CombatConstants::default(),
        inventory: InventoryConfig::default(),
        xp_curve: XpCurve::default(),
    }
}

fn item_types() -> BTreeMap<String, ItemTemplate> {
    use EquipmentSlot::*;
    use Stat::*;

    let mut items = BTreeMap::new();
    items.insert(
        "sword".to_string(),
        equipment(
            text("Sword", "سيف"),
            Weapon,
            "🗡️",
            &[(Attack, 8)],
            text("A reliable steel blade.", "نصل فولاذي موثوق."),
        ),
    );
    items.insert(
        "axe".to_string(),
        equipment(
            text("Axe", "فأس"),
            Weapon,
            "🪓",
            &[(Attack, 10), (CritChance, 1)],
            text("Heavy and brutal.", "ثقيل ووحشي."),
        ),
    );
    items.insert(
        "staff".to_string(),
        equipment(
            text("Staff", "عصا"),
            Weapon,
            "🪄",
            &[(Attack, 6), (CritChance, 3)],
            text("Hums with arcane power.", "تطن بقوة سحرية."),
        ),
    );
    items.insert(
        "dagger".to_string(),
        equipment(
            text("Dagger", "خنجر"),
            Weapon,
            "🔪",
            &[(Attack, 5), (Speed, 2), (CritChance, 4)],
            text("Quick and precise.", "سريع ودقيق."),
        ),
    );
    items.insert(
        "leather_armor".to_string(),
        equipment(
            text("Leather Armor", "درع جلدي"),
            Armor,
            "🥋",
            &[(Defense, 4), (MaxHp, 10)],
            text("Light protection.", "حماية خفيفة."),
        ),
    );
    items.insert(
        "helmet".to_string(),
        equipment(
            text("Helmet", "خوذة"),
            Helmet,
            "⛑️",
            &[(Defense, 2), (MaxHp, 5)],
            text("Guards the head.", "تحمي الرأس."),
        ),
    );
    items.insert(
        "gloves".to_string(),
        equipment(
            text("Gloves", "قفازات"),
            Gloves,
            "🧤",
            &[(Attack, 1), (Defense, 1)],
            text("A firm grip.", "قبضة ثابتة."),
        ),
    );
    items.insert(
        "boots".to_string(),
        equipment(
            text("Boots", "حذاء"),
            Boots,
            "🥾",
            &[(Speed, 2), (Defense, 1)],
            text("Light on the feet.", "خفيف على القدمين."),
        ),
    );
    items.insert(
        "ring".to_string(),
        equipment(
            text("Ring", "خاتم"),
            Ring,
            "💍",
            &[(CritChance, 2), (Attack, 1)],
            text("A faint glimmer.", "بريق خافت."),
        ),
    );
    items.insert(
        "amulet".to_string(),
        equipment(
            text("Amulet", "تميمة"),
            Amulet,
            "📿",
            &[(MaxHp, 15)],
            text("Wards off harm.", "تدفع الأذى."),
        ),
    );
    items.insert(
        "health_potion".to_string(),
        ItemTemplate {
            name: text("Health Potion", "جرعة صحة"),
            slot: None,
            icon: "🧪".to_string(),
            base_stats: BTreeMap::new(),
            consumable: true,
            effect: Some(ItemEffect::HealHp),
            effect_value: 30,
            description: text("Restores 30 HP.", "تستعيد 30 نقطة صحة."),
        },
    );
    items.insert(
        "old_map".to_string(),
        ItemTemplate {
            name: text("Old Map", "خريطة قديمة"),
            slot: None,
            icon: "🗺️".to_string(),
            base_stats: BTreeMap::new(),
            consumable: false,
            effect: None,
            effect_value: 0,
            description: text("Worth nothing to anyone but you.", "لا قيمة لها إلا عندك."),
        },
    );
    items
}

fn rarities() -> Vec<RarityDef> {
    let row = |rarity, chance, stat_multiplier, name| RarityDef {
        rarity,
        chance,
        stat_multiplier,
        name,
    };
    vec![
        row(Rarity::Common, 50.0, 1.0, text("Common", "شائع")),
        row(Rarity::Uncommon, 25.0, 1.2, text("Uncommon", "غير شائع")),
        row(Rarity::Rare, 15.0, 1.5, text("Rare", "نادر")),
        row(Rarity::Epic, 7.0, 2.0, text("Epic", "ملحمي")),
        row(Rarity::Mythic, 2.0, 2.5, text("Mythic", "خرافي")),
        row(Rarity::Legendary, 1.0, 3.0, text("Legendary", "أسطوري")),
    ]
}

fn affix(id: &str, name: LocalizedText, mods: &[(Stat, i32)]) -> AffixDef {
    AffixDef {
        id: id.to_string(),
        name,
        stat_mods: stats(mods),
    }
}

fn prefixes() -> Vec<AffixDef> {
    use Stat::*;
    vec![
        affix("sharp", text("Sharp", "حاد"), &[(Attack, 2)]),
        affix("sturdy", text("Sturdy", "متين"), &[(Defense, 2)]),
        affix("swift", text("Swift", "سريع"), &[(Speed, 1)]),
        affix("vital", text("Vital", "حيوي"), &[(MaxHp, 10)]),
        affix("lucky", text("Lucky", "محظوظ"), &[(CritChance, 2)]),
    ]
}

fn suffixes() -> Vec<AffixDef> {
    use Stat::*;
    vec![
        affix("of_power", text("of Power", "القوة"), &[(Attack, 3)]),
        affix("of_the_bear", text("of the Bear", "الدب"), &[(MaxHp, 15)]),
        affix("of_the_wind", text("of the Wind", "الريح"), &[(Speed, 2)]),
        affix("of_precision", text("of Precision", "الدقة"), &[(CritChance, 3)]),
        affix("of_warding", text("of Warding", "الحماية"), &[(Defense, 3)]),
    ]
}

fn abilities() -> BTreeMap<String, AbilityDef> {
    let ability = |name, cost, damage_multiplier, kind| AbilityDef {
        name,
        cost,
        damage_multiplier,
        kind,
    };
    BTreeMap::from([
        (
            "shield_bash".to_string(),
            ability(text("Shield Bash", "ضربة الدرع"), 15, 1.5, AbilityKind::Attack),
        ),
        (
            "iron_will".to_string(),
            ability(text("Iron Will", "إرادة حديدية"), 10, 1.0, AbilityKind::Guard),
        ),
        (
            "second_wind".to_string(),
            ability(text("Second Wind", "نفس ثان"), 20, 1.2, AbilityKind::Heal),
        ),
        (
            "fireball".to_string(),
            ability(text("Fireball", "كرة نارية"), 20, 1.8, AbilityKind::Attack),
        ),
        (
            "frost_nova".to_string(),
            ability(text("Frost Nova", "نوفا الصقيع"), 12, 1.3, AbilityKind::Attack),
        ),
        (
            "healing_light".to_string(),
            ability(text("Healing Light", "نور الشفاء"), 25, 1.5, AbilityKind::Heal),
        ),
        (
            "backstab".to_string(),
            ability(text("Backstab", "طعنة غادرة"), 15, 2.0, AbilityKind::Attack),
        ),
        (
            "shadow_step".to_string(),
            ability(text("Shadow Step", "خطوة الظل"), 10, 1.0, AbilityKind::Guard),
        ),
    ])
}

fn enemies() -> BTreeMap<String, EnemyTemplate> {
    let enemy = |name, hp, attack, defense, speed, crit_chance, xp_reward, gold_reward| {
        EnemyTemplate {
            name,
            base_stats: BaseStats {
                hp,
                attack,
                defense,
                speed,
                crit_chance,
            },
            xp_reward,
            gold_reward,
        }
    };
    BTreeMap::from([
        (
            "goblin".to_string(),
            enemy(text("Goblin", "عفريت"), 40, 10, 3, 9, 5.0, 15, 8),
        ),
        (
            "skeleton".to_string(),
            enemy(text("Skeleton", "هيكل عظمي"), 50, 12, 6, 6, 5.0, 20, 10),
        ),
        (
            "wolf".to_string(),
            enemy(text("Wolf", "ذئب"), 35, 11, 2, 14, 10.0, 18, 6),
        ),
        (
            "orc".to_string(),
            enemy(text("Orc", "أورك"), 70, 14, 8, 5, 5.0, 30, 15),
        ),
        (
            "dark_mage".to_string(),
            enemy(text("Dark Mage", "ساحر مظلم"), 45, 16, 4, 10, 10.0, 28, 18),
        ),
    ])
}

fn classes() -> BTreeMap<String, ClassTemplate> {
    BTreeMap::from([
        (
            "warrior".to_string(),
            ClassTemplate {
                name: text("Taha", "طه"),
                resource: ResourceTemplate {
                    name: text("Vigor", "نشاط"),
                    max: 60,
                    regen_per_turn: 5,
                },
                base_stats: BaseStats {
                    hp: 120,
                    attack: 15,
                    defense: 12,
                    speed: 8,
                    crit_chance: 10.0,
                },
                growth: GrowthRates {
                    hp: 12.0,
                    attack: 2.0,
                    defense: 2.0,
                    speed: 0.5,
                    crit_chance: 0.5,
                },
                abilities: vec![
                    "shield_bash".to_string(),
                    "iron_will".to_string(),
                    "second_wind".to_string(),
                ],
            },
        ),
        (
            "sorceress".to_string(),
            ClassTemplate {
                name: text("Mais", "ميس"),
                resource: ResourceTemplate {
                    name: text("Mana", "مانا"),
                    max: 100,
                    regen_per_turn: 8,
                },
                base_stats: BaseStats {
                    hp: 80,
                    attack: 18,
                    defense: 6,
                    speed: 10,
                    crit_chance: 12.0,
                },
                growth: GrowthRates {
                    hp: 8.0,
                    attack: 3.0,
                    defense: 1.0,
                    speed: 0.5,
                    crit_chance: 0.75,
                },
                abilities: vec![
                    "fireball".to_string(),
                    "frost_nova".to_string(),
                    "healing_light".to_string(),
                ],
            },
        ),
        (
            "rogue".to_string(),
            ClassTemplate {
                name: text("Ibrahim", "إبراهيم"),
                resource: ResourceTemplate {
                    name: text("Energy", "طاقة"),
                    max: 80,
                    regen_per_turn: 10,
                },
                base_stats: BaseStats {
                    hp: 100,
                    attack: 20,
                    defense: 8,
                    speed: 15,
                    crit_chance: 20.0,
                },
                growth: GrowthRates {
                    hp: 10.0,
                    attack: 2.5,
                    defense: 1.0,
                    speed: 1.0,
                    crit_chance: 1.0,
                },
                abilities: vec!["backstab".to_string(), "shadow_step".to_string()],
            },
        ),
    ])
}

fn difficulties() -> BTreeMap<String, Difficulty> {
    let difficulty =
        |player_damage_mult, enemy_damage_mult, enemy_hp_mult, xp_mult, gold_mult| Difficulty {
            player_damage_mult,
            enemy_damage_mult,
            enemy_hp_mult,
            xp_mult,
            gold_mult,
        };
    BTreeMap::from([
        ("easy".to_string(), difficulty(1.2, 0.8, 1.0, 1.0, 1.0)),
        ("normal".to_string(), difficulty(1.0, 1.0, 1.2, 1.1, 1.1)),
        ("hard".to_string(), difficulty(0.9, 1.3, 1.5, 1.2, 1.2)),
    ])
}
