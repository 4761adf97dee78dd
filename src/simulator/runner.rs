//! Main simulation runner driving the real battle controller.
//!
//! Every run is a fresh campaign played floor by floor with instant pacing.
//! Statistics are collected by an observer attached to the controller, so
//! the simulator never duplicates combat rules.

use super::config::SimConfig;
use super::loot::{auto_equip_upgrades, LootStats};
use super::policy::{choose_action, PolicyAction};
use super::report::SimReport;
use crate::campaign::Campaign;
use crate::character::{Actor, ActorId, ActorKind};
use crate::combat::{
    spawn_encounter, ActionKind, BattleController, BattleObserver, BattleState, CombatError,
    Pacing,
};
use crate::config::{ConfigError, Difficulty, GameConfig};
use crate::core::Locale;
use crate::items::Item;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Combat(#[from] CombatError),
}

/// Outcome of one simulated campaign.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunStats {
    pub floors_cleared: u32,
    pub final_level: u32,
    pub final_gold: u64,
    pub battles_fought: u32,
    pub battles_won: u32,
    pub total_rounds: u64,
    pub enemies_defeated: u64,
    pub player_crits: u64,
    pub upgrades_equipped: u32,
    pub died_on_floor: Option<u32>,
    pub timed_out: bool,
    pub reached_target: bool,
    pub loot: LootStats,
}

/// Run the full simulation and return a report.
pub fn run_simulation(game: Arc<GameConfig>, config: &SimConfig) -> Result<SimReport, SimError> {
    game.class(&config.class)?;
    let difficulty = game.difficulty(&config.difficulty)?.clone();

    let mut all_runs = Vec::with_capacity(config.num_runs as usize);
    for run_idx in 0..config.num_runs {
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(run_idx as u64)),
            None => ChaCha8Rng::from_entropy(),
        };

        let run = simulate_single_run(&game, config, &difficulty, &mut rng)?;
        if config.verbosity >= 2 {
            tracing::info!(
                run = run_idx + 1,
                of = config.num_runs,
                floors = run.floors_cleared,
                level = run.final_level,
                kills = run.enemies_defeated,
                died_on = ?run.died_on_floor,
                "run finished"
            );
        }
        all_runs.push(run);
    }

    Ok(SimReport::from_runs(all_runs, config.max_floor))
}

/// Collects per-run statistics from controller notifications.
#[derive(Debug, Default)]
struct SimObserver {
    loot: LootStats,
    player_crits: u64,
    last_round: u32,
}

impl BattleObserver for SimObserver {
    fn on_battle_started(&mut self, _battle_id: u64, _order: &[ActorId]) {
        self.last_round = 0;
    }

    fn on_turn_start(&mut self, _actor: &Actor, round: u32) {
        self.last_round = round;
    }

    fn on_action_resolved(
        &mut self,
        _action: &ActionKind,
        attacker: &Actor,
        _defender: &Actor,
        _damage: u32,
        is_critical: bool,
    ) {
        if is_critical && attacker.is_player() {
            self.player_crits += 1;
        }
    }

    fn on_actor_defeated(&mut self, actor: &Actor) {
        if actor.kind == ActorKind::Enemy {
            self.loot.record_attempt();
        }
    }

    fn on_loot(&mut self, item: &Item) {
        self.loot.record_drop(item);
    }

    fn on_warning(&mut self, warning: &CombatError) {
        if *warning == CombatError::InventoryFull {
            self.loot.record_lost();
        }
    }
}

/// Simulate one campaign until death, timeout or the target floor is cleared.
fn simulate_single_run(
    game: &Arc<GameConfig>,
    config: &SimConfig,
    difficulty: &Difficulty,
    rng: &mut ChaCha8Rng,
) -> Result<RunStats, SimError> {
    let mut campaign =
        Campaign::new_game(game, &config.class, &config.difficulty, Locale::En, rng)?;
    let mut controller =
        BattleController::new(Arc::clone(game), Pacing::instant(), SimObserver::default());
    let mut stats = RunStats::default();

    while campaign.current_floor <= config.max_floor {
        let enemies = spawn_encounter(
            game,
            campaign.current_floor,
            difficulty,
            campaign.locale,
            rng,
        )?;
        controller.start(&mut campaign, enemies, rng)?;
        fight(&mut controller, &mut campaign, config, rng);

        stats.battles_fought += 1;
        stats.total_rounds += controller.observer().last_round as u64;

        match controller.state() {
            BattleState::Victory => {
                stats.battles_won += 1;
                stats.floors_cleared = campaign.current_floor;
                if config.auto_equip {
                    stats.upgrades_equipped += auto_equip_upgrades(&mut campaign, game);
                }
                if campaign.inventory.is_full() {
                    campaign.sell_all_common();
                }
                campaign.advance_floor();
            }
            BattleState::Defeat => {
                stats.died_on_floor = Some(campaign.current_floor);
                break;
            }
            _ => {
                stats.timed_out = true;
                break;
            }
        }
    }

    let observer = controller.observer();
    stats.loot = observer.loot.clone();
    stats.player_crits = observer.player_crits;
    stats.final_level = campaign.level;
    stats.final_gold = campaign.gold;
    stats.enemies_defeated = campaign.enemies_defeated;
    stats.reached_target = stats.floors_cleared >= config.max_floor;
    Ok(stats)
}

/// Plays the current battle until it ends or runs out of rounds. With
/// instant pacing every enemy turn resolves inside the player's call.
fn fight(
    controller: &mut BattleController<SimObserver>,
    campaign: &mut Campaign,
    config: &SimConfig,
    rng: &mut impl Rng,
) {
    while controller.state() == BattleState::PlayerTurn {
        let Some(battle) = controller.battle() else {
            break;
        };
        if battle.round() > config.max_rounds_per_battle {
            tracing::debug!(round = battle.round(), "battle exceeded round limit");
            break;
        }
        let fallback_target = battle.first_living_enemy().unwrap_or(0);
        let action = choose_action(controller.config(), campaign, battle, config.heal_threshold);

        let result = match action {
            PolicyAction::Attack(target) => controller.attack(campaign, target, rng),
            PolicyAction::Ability(index) => controller.use_ability(campaign, index, rng),
            PolicyAction::UseItem => controller.use_item(campaign, rng),
        };

        if let Err(err) = result {
            tracing::debug!(error = %err, ?action, "policy action rejected, attacking");
            if let Err(err) = controller.attack(campaign, fallback_target, rng) {
                tracing::warn!(error = %err, "simulated player could not act");
                break;
            }
        }
    }
}
