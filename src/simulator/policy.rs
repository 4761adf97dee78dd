//! Auto-play policy used by simulated campaigns.

use crate::campaign::Campaign;
use crate::character::Actor;
use crate::combat::Battle;
use crate::config::{AbilityKind, GameConfig};
use crate::items::ItemEffect;

/// A player decision for one turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyAction {
    Attack(usize),
    Ability(usize),
    UseItem,
}

/// Picks the player's action:
/// 1. below `heal_threshold` of max HP, drink a potion or cast a heal
/// 2. otherwise cast the affordable attack ability with the largest multiplier
/// 3. otherwise attack the first living enemy
pub fn choose_action(
    config: &GameConfig,
    campaign: &Campaign,
    battle: &Battle,
    heal_threshold: f64,
) -> PolicyAction {
    let player = &campaign.player;
    let hp_ratio = player.stats.hp as f64 / player.stats.max_hp.max(1) as f64;

    if hp_ratio < heal_threshold {
        if campaign.inventory.first_with_effect(ItemEffect::HealHp).is_some() {
            return PolicyAction::UseItem;
        }
        if let Some(index) = best_ability(config, player, AbilityKind::Heal) {
            return PolicyAction::Ability(index);
        }
    }

    if let Some(index) = best_ability(config, player, AbilityKind::Attack) {
        return PolicyAction::Ability(index);
    }

    PolicyAction::Attack(battle.first_living_enemy().unwrap_or(0))
}

/// Index of the affordable ability of `kind` with the largest multiplier.
fn best_ability(config: &GameConfig, player: &Actor, kind: AbilityKind) -> Option<usize> {
    let available = player.resource_current();
    player
        .abilities
        .iter()
        .enumerate()
        .filter_map(|(index, id)| config.ability(id).map(|ability| (index, ability)))
        .filter(|(_, ability)| ability.kind == kind && ability.cost <= available)
        .max_by(|(_, a), (_, b)| a.damage_multiplier.total_cmp(&b.damage_multiplier))
        .map(|(index, _)| index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::{BattleState, TurnOrder};
    use crate::config::Difficulty;
    use crate::core::{Locale, ScriptedRng};

    fn setup(class: &str) -> (GameConfig, Campaign, Battle) {
        let config = GameConfig::default();
        let mut rng = ScriptedRng::constant(0.75);
        let campaign = Campaign::new_game(&config, class, "normal", Locale::En, &mut rng).unwrap();
        let enemy = crate::combat::spawn_enemy(
            &config,
            "goblin",
            crate::character::ActorId(1),
            1,
            &Difficulty::default(),
            Locale::En,
        )
        .unwrap();
        let turn_order = TurnOrder::build(&campaign.player, std::slice::from_ref(&enemy), &mut rng);
        let battle = Battle {
            id: 1,
            floor: 1,
            difficulty: Difficulty::default(),
            enemies: vec![enemy],
            turn_order,
            defeated: Vec::new(),
            state: BattleState::PlayerTurn,
        };
        (config, campaign, battle)
    }

    #[test]
    fn test_attack_when_out_of_resource() {
        let (config, mut campaign, battle) = setup("warrior");
        if let Some(resource) = campaign.player.resource.as_mut() {
            resource.current = 0;
        }
        assert_eq!(
            choose_action(&config, &campaign, &battle, 0.35),
            PolicyAction::Attack(0)
        );
    }

    #[test]
    fn test_prefers_offensive_ability_when_affordable() {
        let (config, campaign, battle) = setup("warrior");
        match choose_action(&config, &campaign, &battle, 0.35) {
            PolicyAction::Ability(index) => {
                let ability = config.ability(&campaign.player.abilities[index]).unwrap();
                assert_eq!(ability.kind, AbilityKind::Attack);
            }
            other => panic!("expected an ability, got {other:?}"),
        }
    }

    #[test]
    fn test_low_hp_uses_potion_first() {
        let (config, mut campaign, battle) = setup("warrior");
        let mut rng = ScriptedRng::constant(0.75);
        let mut potion = crate::items::ItemGenerator::new(&config, Locale::En)
            .generate_item("health_potion", 1, None, &mut rng)
            .unwrap();
        potion.id = uuid::Uuid::new_v4();
        campaign.add_item(potion).unwrap();
        campaign.player.stats.hp = 10;

        assert_eq!(
            choose_action(&config, &campaign, &battle, 0.35),
            PolicyAction::UseItem
        );
    }
}
