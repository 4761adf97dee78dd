//! Enemy instances built from templates and scaled to the floor.

use crate::character::{Actor, ActorId, ActorKind, Stats};
use crate::config::{ConfigError, Difficulty, GameConfig};
use crate::core::constants::{ENEMY_FLOOR_SCALING_PER_FLOOR, MAX_ENEMIES_PER_ENCOUNTER};
use crate::core::rng::pick_index;
use crate::core::Locale;
use rand::Rng;

/// Enemy stat multiplier for a floor: 1.0 on floor 1, +15% per floor after.
pub fn enemy_floor_scaling(floor: u32) -> f64 {
    1.0 + (floor.max(1) - 1) as f64 * ENEMY_FLOOR_SCALING_PER_FLOOR
}

/// Builds one enemy. HP, attack and defense scale with the floor; HP is
/// further scaled by the difficulty.
pub fn spawn_enemy(
    config: &GameConfig,
    template_id: &str,
    id: ActorId,
    floor: u32,
    difficulty: &Difficulty,
    locale: Locale,
) -> Result<Actor, ConfigError> {
    let template = config.enemy(template_id)?;
    let base = &template.base_stats;
    let scaling = enemy_floor_scaling(floor);
    let scaled = |value: u32| (value as f64 * scaling).floor() as u32;

    let max_hp = ((base.hp as f64 * scaling * difficulty.enemy_hp_mult).floor() as u32).max(1);

    Ok(Actor {
        id,
        kind: ActorKind::Enemy,
        name: template.name.get(locale).to_string(),
        template_id: template_id.to_string(),
        stats: Stats {
            hp: max_hp,
            max_hp,
            attack: scaled(base.attack),
            defense: scaled(base.defense),
            speed: base.speed,
            crit_chance: base.crit_chance,
        },
        resource: None,
        abilities: Vec::new(),
        defending_this_turn: false,
        xp_reward: template.xp_reward,
        gold_reward: template.gold_reward,
    })
}

/// Spawns 1..=3 enemies of uniformly random types. Ids start at 1.
pub fn spawn_encounter(
    config: &GameConfig,
    floor: u32,
    difficulty: &Difficulty,
    locale: Locale,
    rng: &mut impl Rng,
) -> Result<Vec<Actor>, ConfigError> {
    let template_ids: Vec<&str> = config.enemies.keys().map(String::as_str).collect();
    if template_ids.is_empty() {
        return Err(ConfigError::NoEnemies);
    }

    let count = 1 + pick_index(rng, MAX_ENEMIES_PER_ENCOUNTER);
    (1..=count as u32)
        .map(|n| {
            let template_id = template_ids[pick_index(rng, template_ids.len())];
            spawn_enemy(config, template_id, ActorId(n), floor, difficulty, locale)
        })
        .collect()
}
