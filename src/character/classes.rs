//! Player creation from class templates.

use super::actor::{Actor, ActorId, ActorKind, Resource, Stats};
use crate::config::{ClassTemplate, ConfigError, GameConfig};
use crate::core::Locale;

/// Class stats before equipment at the given level.
///
/// Each stat is `base + growth * (level - 1)`, floored for integer stats.
pub fn stats_for_level(class: &ClassTemplate, level: u32) -> Stats {
    let steps = level.max(1) as f64 - 1.0;
    let base = &class.base_stats;
    let growth = &class.growth;
    let grown = |value: u32, rate: f64| (value as f64 + rate * steps).floor() as u32;

    let max_hp = grown(base.hp, growth.hp).max(1);
    Stats {
        hp: max_hp,
        max_hp,
        attack: grown(base.attack, growth.attack),
        defense: grown(base.defense, growth.defense),
        speed: grown(base.speed, growth.speed),
        crit_chance: base.crit_chance + growth.crit_chance * steps,
    }
}

/// Builds a fresh level-`level` player of `class_id` at full HP and resource.
pub fn create_player(
    config: &GameConfig,
    class_id: &str,
    level: u32,
    locale: Locale,
) -> Result<Actor, ConfigError> {
    let class = config.class(class_id)?;
    let resource = &class.resource;

    Ok(Actor {
        id: ActorId::PLAYER,
        kind: ActorKind::Player,
        name: class.name.get(locale).to_string(),
        template_id: class_id.to_string(),
        stats: stats_for_level(class, level),
        resource: Some(Resource::full(
            resource.name.clone(),
            resource.max,
            resource.regen_per_turn,
        )),
        abilities: class.abilities.clone(),
        defending_this_turn: false,
        xp_reward: 0,
        gold_reward: 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_warrior() {
        let config = GameConfig::default();
        let player = create_player(&config, "warrior", 1, Locale::En).unwrap();

        assert!(player.is_player());
        assert_eq!(player.name, "Taha");
        assert_eq!(player.stats.hp, 120);
        assert_eq!(player.stats.max_hp, 120);
        assert_eq!(player.stats.attack, 15);
        assert_eq!(player.resource_current(), 60);
        assert_eq!(
            player.abilities,
            vec!["shield_bash", "iron_will", "second_wind"]
        );
    }

    #[test]
    fn test_create_player_arabic_name() {
        let config = GameConfig::default();
        let player = create_player(&config, "sorceress", 1, Locale::Ar).unwrap();
        assert_eq!(player.name, "ميس");
    }

    #[test]
    fn test_unknown_class() {
        let config = GameConfig::default();
        assert!(matches!(
            create_player(&config, "bard", 1, Locale::En),
            Err(ConfigError::UnknownClass(_))
        ));
    }

    #[test]
    fn test_stats_grow_with_level() {
        let config = GameConfig::default();
        let rogue = config.class("rogue").unwrap();

        let level_one = stats_for_level(rogue, 1);
        let level_five = stats_for_level(rogue, 5);

        // hp 100 + 10*4, attack 20 + 2.5*4, speed 15 + 1*4
        assert_eq!(level_five.max_hp, 140);
        assert_eq!(level_five.attack, 30);
        assert_eq!(level_five.speed, 19);
        assert!((level_five.crit_chance - 24.0).abs() < 1e-9);
        assert!(level_five.defense > level_one.defense);
    }
}
