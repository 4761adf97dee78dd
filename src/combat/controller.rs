//! Battle lifecycle: start, turns, death handling and rewards.
//!
//! The controller never sleeps. Follow-up work (advancing the turn, an
//! enemy's action, resolving a death) becomes a [`ScheduledStep`] with a
//! delay taken from [`Pacing`]. Zero-delay steps run before the call
//! returns; others wait in [`BattleController::pending`] until the caller
//! hands them back through [`BattleController::resume`]. Every step carries
//! the id of the battle that scheduled it, so a step that outlives its
//! battle is rejected instead of acting on the next one.

use super::battle::{Battle, BattleState};
use super::error::CombatError;
use super::events::{ActionKind, BattleObserver, BattleOutcome, Rewards};
use super::resolver::{AbilityOutcome, Resolver};
use super::scheduler::{Advance, TurnOrder};
use crate::campaign::{Campaign, CampaignError};
use crate::character::{Actor, ActorId, ActorKind};
use crate::config::{Difficulty, GameConfig};
use crate::core::constants::{ACTION_DELAY_MS, DEATH_DELAY_MS, ENEMY_TURN_DELAY_MS};
use crate::items::{ItemEffect, ItemGenerator};
use rand::Rng;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

/// Presentation delays between combat steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    /// After a player action, before the turn advances.
    pub action_delay: Duration,
    /// Between an enemy's turn starting and its attack.
    pub enemy_delay: Duration,
    /// Between an enemy's death and its removal.
    pub death_delay: Duration,
}

impl Pacing {
    /// No delays; every step resolves inside the triggering call.
    pub fn instant() -> Self {
        Self {
            action_delay: Duration::ZERO,
            enemy_delay: Duration::ZERO,
            death_delay: Duration::ZERO,
        }
    }

    pub fn interactive() -> Self {
        Self {
            action_delay: Duration::from_millis(ACTION_DELAY_MS),
            enemy_delay: Duration::from_millis(ENEMY_TURN_DELAY_MS),
            death_delay: Duration::from_millis(DEATH_DELAY_MS),
        }
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self::instant()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    AdvanceTurn,
    EnemyAction(ActorId),
    ResolveDeath(ActorId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledStep {
    pub battle_id: u64,
    pub delay: Duration,
    pub kind: StepKind,
}

pub struct BattleController<O: BattleObserver> {
    config: Arc<GameConfig>,
    pacing: Pacing,
    observer: O,
    battle: Option<Battle>,
    pending: Option<ScheduledStep>,
    next_battle_id: u64,
    last_outcome: Option<BattleOutcome>,
}

impl<O: BattleObserver> BattleController<O> {
    pub fn new(config: Arc<GameConfig>, pacing: Pacing, observer: O) -> Self {
        Self {
            config,
            pacing,
            observer,
            battle: None,
            pending: None,
            next_battle_id: 1,
            last_outcome: None,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    pub fn battle(&self) -> Option<&Battle> {
        self.battle.as_ref()
    }

    /// Current state; after a battle ends this is its terminal state until
    /// the next one starts.
    pub fn state(&self) -> BattleState {
        match (&self.battle, self.last_outcome) {
            (Some(battle), _) => battle.state,
            (None, Some(outcome)) => outcome.into(),
            (None, None) => BattleState::NotStarted,
        }
    }

    /// Step waiting for its delay to elapse, if any.
    pub fn pending(&self) -> Option<ScheduledStep> {
        self.pending
    }

    /// Starts a battle against `enemies` on the campaign's current floor.
    ///
    /// A battle already in progress is abandoned; its scheduled steps
    /// become stale. Enemies that are already dead are left out, and a
    /// dead player loses the battle before any turn is taken.
    pub fn start(
        &mut self,
        campaign: &mut Campaign,
        enemies: Vec<Actor>,
        rng: &mut impl Rng,
    ) -> Result<(), CombatError> {
        let mut seen = HashSet::new();
        for enemy in &enemies {
            if enemy.id == ActorId::PLAYER || enemy.is_player() || !seen.insert(enemy.id) {
                return Err(CombatError::InvalidEnemyId(enemy.id));
            }
        }
        let (enemies, dead): (Vec<Actor>, Vec<Actor>) =
            enemies.into_iter().partition(Actor::is_alive);
        for enemy in &dead {
            tracing::warn!(enemy = %enemy.id, "skipping enemy spawned without HP");
        }
        if enemies.is_empty() {
            return Err(CombatError::EmptyEncounter);
        }
        if let Some(old) = self.battle.take() {
            tracing::warn!(battle = old.id, "replacing unfinished battle");
        }

        let difficulty = match self.config.difficulty(&campaign.difficulty) {
            Ok(difficulty) => difficulty.clone(),
            Err(err) => {
                tracing::warn!(error = %err, "using default difficulty");
                Difficulty::default()
            }
        };

        let id = self.next_battle_id;
        self.next_battle_id += 1;
        self.pending = None;
        self.last_outcome = None;
        campaign.player.defending_this_turn = false;

        let turn_order = TurnOrder::build(&campaign.player, &enemies, rng);
        let order: Vec<ActorId> = turn_order.entries().iter().map(|entry| entry.actor).collect();

        tracing::info!(
            battle = id,
            floor = campaign.current_floor,
            enemies = enemies.len(),
            "battle started"
        );
        self.battle = Some(Battle {
            id,
            floor: campaign.current_floor,
            difficulty,
            enemies,
            turn_order,
            defeated: Vec::new(),
            state: BattleState::NotStarted,
        });
        self.observer.on_battle_started(id, &order);

        if !campaign.player.is_alive() {
            self.finish(campaign, BattleOutcome::Defeat);
            return Ok(());
        }
        self.begin_turn(campaign);
        self.drain(campaign, rng);
        Ok(())
    }

    /// Attacks the living enemy at `target_index` in the enemy list.
    pub fn attack(
        &mut self,
        campaign: &mut Campaign,
        target_index: usize,
        rng: &mut impl Rng,
    ) -> Result<(), CombatError> {
        self.require_player_turn()?;
        let config = Arc::clone(&self.config);
        let battle = self.battle.as_mut().ok_or(CombatError::NoActiveBattle)?;

        let target = battle
            .enemies
            .get_mut(target_index)
            .filter(|enemy| enemy.is_alive())
            .ok_or(CombatError::InvalidTarget)?;

        let resolver = Resolver::new(&config.combat, &battle.difficulty);
        let result = resolver.apply_attack(&campaign.player, target, 1.0, rng);
        self.observer.on_action_resolved(
            &ActionKind::Attack,
            &campaign.player,
            target,
            result.damage,
            result.is_critical,
        );

        let killed = result.defender_died.then_some(target.id);
        self.finish_player_action(campaign, killed, rng);
        Ok(())
    }

    /// Uses the player's ability at `index`. Attack abilities hit the first
    /// living enemy.
    pub fn use_ability(
        &mut self,
        campaign: &mut Campaign,
        index: usize,
        rng: &mut impl Rng,
    ) -> Result<(), CombatError> {
        self.require_player_turn()?;
        let config = Arc::clone(&self.config);
        let battle = self.battle.as_mut().ok_or(CombatError::NoActiveBattle)?;

        let ability_id = campaign
            .player
            .abilities
            .get(index)
            .cloned()
            .ok_or_else(|| CombatError::UnknownAbility(format!("#{index}")))?;
        let ability = config
            .ability(&ability_id)
            .ok_or_else(|| CombatError::UnknownAbility(ability_id.clone()))?;

        let target_index = battle.first_living_enemy();
        let target = match target_index {
            Some(i) => battle.enemies.get_mut(i),
            None => None,
        };

        let resolver = Resolver::new(&config.combat, &battle.difficulty);
        let outcome = resolver.apply_ability(&mut campaign.player, ability, target, rng)?;

        let mut killed = None;
        match outcome {
            AbilityOutcome::Hit(result) => {
                if let Some(target) = target_index.and_then(|i| battle.enemies.get(i)) {
                    self.observer.on_action_resolved(
                        &ActionKind::Ability(ability_id.clone()),
                        &campaign.player,
                        target,
                        result.damage,
                        result.is_critical,
                    );
                    killed = result.defender_died.then_some(target.id);
                }
            }
            AbilityOutcome::Guarded => self.observer.on_defend(&campaign.player),
            AbilityOutcome::Healed(amount) => self.observer.on_heal(&campaign.player, amount),
        }

        tracing::debug!(ability = %ability_id, "ability used");
        self.finish_player_action(campaign, killed, rng);
        Ok(())
    }

    /// Raises the player's guard for the next incoming hit.
    pub fn defend(&mut self, campaign: &mut Campaign, rng: &mut impl Rng) -> Result<(), CombatError> {
        self.require_player_turn()?;
        let config = Arc::clone(&self.config);
        let battle = self.battle.as_ref().ok_or(CombatError::NoActiveBattle)?;

        Resolver::new(&config.combat, &battle.difficulty).apply_defend(&mut campaign.player);
        self.observer.on_defend(&campaign.player);

        self.finish_player_action(campaign, None, rng);
        Ok(())
    }

    /// Drinks the first healing consumable in the inventory. The turn is
    /// only spent if the item had an effect.
    pub fn use_item(&mut self, campaign: &mut Campaign, rng: &mut impl Rng) -> Result<(), CombatError> {
        self.require_player_turn()?;

        let item_id = campaign
            .inventory
            .first_with_effect(ItemEffect::HealHp)
            .map(|item| item.id)
            .ok_or(CombatError::NoUsableItem)?;

        let healed = campaign.use_consumable(item_id).map_err(|err| match err {
            CampaignError::NoEffect => CombatError::ItemHadNoEffect,
            _ => CombatError::NoUsableItem,
        })?;
        self.observer.on_heal(&campaign.player, healed);

        self.finish_player_action(campaign, None, rng);
        Ok(())
    }

    /// Tries to escape. Success ends the battle with no rewards and no
    /// penalty; failure spends the turn.
    pub fn flee(&mut self, campaign: &mut Campaign, rng: &mut impl Rng) -> Result<(), CombatError> {
        self.require_player_turn()?;
        let config = Arc::clone(&self.config);
        let battle = self.battle.as_ref().ok_or(CombatError::NoActiveBattle)?;

        if Resolver::new(&config.combat, &battle.difficulty).attempt_flee(rng) {
            self.finish(campaign, BattleOutcome::Fled);
            return Ok(());
        }

        self.observer.on_flee_failed();
        self.finish_player_action(campaign, None, rng);
        Ok(())
    }

    /// Runs a step previously returned by [`pending`](Self::pending) once
    /// its delay has elapsed.
    pub fn resume(
        &mut self,
        campaign: &mut Campaign,
        step: ScheduledStep,
        rng: &mut impl Rng,
    ) -> Result<(), CombatError> {
        let current = self.battle.as_ref().map(|battle| battle.id);
        if current != Some(step.battle_id) || self.pending != Some(step) {
            tracing::warn!(step = step.battle_id, ?current, "ignoring stale step");
            return Err(CombatError::StaleStep {
                step: step.battle_id,
                current,
            });
        }

        self.pending = None;
        self.run_step(campaign, step, rng);
        self.drain(campaign, rng);
        Ok(())
    }

    fn require_player_turn(&self) -> Result<(), CombatError> {
        let battle = self.battle.as_ref().ok_or(CombatError::NoActiveBattle)?;
        if battle.state != BattleState::PlayerTurn || self.pending.is_some() {
            return Err(CombatError::NotYourTurn(ActorId::PLAYER));
        }
        Ok(())
    }

    fn schedule(&mut self, kind: StepKind, delay: Duration) {
        if let Some(battle) = &self.battle {
            self.pending = Some(ScheduledStep {
                battle_id: battle.id,
                delay,
                kind,
            });
        }
    }

    /// Runs zero-delay steps until input is needed, a delayed step is
    /// waiting, or the battle is over.
    fn drain(&mut self, campaign: &mut Campaign, rng: &mut impl Rng) {
        while let Some(step) = self.pending {
            if !step.delay.is_zero() {
                break;
            }
            self.pending = None;
            self.run_step(campaign, step, rng);
        }
    }

    fn run_step(&mut self, campaign: &mut Campaign, step: ScheduledStep, rng: &mut impl Rng) {
        match step.kind {
            StepKind::AdvanceTurn => self.advance_turn(campaign),
            StepKind::EnemyAction(id) => self.enemy_action(campaign, id, rng),
            StepKind::ResolveDeath(id) => self.resolve_enemy_death(campaign, id, rng),
        }
    }

    fn finish_player_action(
        &mut self,
        campaign: &mut Campaign,
        killed: Option<ActorId>,
        rng: &mut impl Rng,
    ) {
        self.observer.on_input_enabled(false);
        match killed {
            Some(id) => {
                if let Some(enemy) = self.battle.as_ref().and_then(|b| b.enemy(id)) {
                    self.observer.on_actor_defeated(enemy);
                }
                self.schedule(StepKind::ResolveDeath(id), self.pacing.death_delay);
            }
            None => self.schedule(StepKind::AdvanceTurn, self.pacing.action_delay),
        }
        self.drain(campaign, rng);
    }

    fn advance_turn(&mut self, campaign: &mut Campaign) {
        let Some(battle) = self.battle.as_mut() else {
            return;
        };
        let player_alive = campaign.player.is_alive();
        let enemies = &battle.enemies;
        let advance = battle.turn_order.advance(|id| {
            if id == ActorId::PLAYER {
                player_alive
            } else {
                enemies.iter().any(|enemy| enemy.id == id && enemy.is_alive())
            }
        });

        match advance {
            Advance::Finished(outcome) => self.finish(campaign, outcome),
            Advance::Next(_) => self.begin_turn(campaign),
        }
    }

    fn begin_turn(&mut self, campaign: &mut Campaign) {
        let config = Arc::clone(&self.config);
        let Some(battle) = self.battle.as_mut() else {
            return;
        };
        let Some(entry) = battle.turn_order.current() else {
            let outcome = battle
                .turn_order
                .terminal_outcome()
                .unwrap_or(BattleOutcome::Defeat);
            self.finish(campaign, outcome);
            return;
        };
        let round = battle.round();

        match entry.kind {
            ActorKind::Player => {
                battle.state = BattleState::PlayerTurn;
                let regenerated = Resolver::new(&config.combat, &battle.difficulty)
                    .regenerate_resource(&mut campaign.player);
                tracing::debug!(round, regenerated, "player turn");
                self.observer.on_turn_start(&campaign.player, round);
                self.observer.on_input_enabled(true);
            }
            ActorKind::Enemy => {
                battle.state = BattleState::EnemyTurn(entry.actor);
                if let Some(enemy) = battle.enemy(entry.actor) {
                    tracing::debug!(round, enemy = %enemy.name, "enemy turn");
                    self.observer.on_turn_start(enemy, round);
                }
                self.observer.on_input_enabled(false);
                self.schedule(StepKind::EnemyAction(entry.actor), self.pacing.enemy_delay);
            }
        }
    }

    /// Enemies only ever use a plain attack on the player.
    fn enemy_action(&mut self, campaign: &mut Campaign, id: ActorId, rng: &mut impl Rng) {
        let config = Arc::clone(&self.config);
        let Some(battle) = self.battle.as_mut() else {
            return;
        };
        if battle.state != BattleState::EnemyTurn(id) {
            tracing::warn!(enemy = %id, "enemy action out of turn");
            return;
        }
        let Some(enemy) = battle.enemy(id).filter(|enemy| enemy.is_alive()) else {
            self.schedule(StepKind::AdvanceTurn, Duration::ZERO);
            return;
        };

        let resolver = Resolver::new(&config.combat, &battle.difficulty);
        let result = resolver.apply_attack(enemy, &mut campaign.player, 1.0, rng);
        self.observer.on_action_resolved(
            &ActionKind::Attack,
            enemy,
            &campaign.player,
            result.damage,
            result.is_critical,
        );

        if result.defender_died {
            self.observer.on_actor_defeated(&campaign.player);
            self.finish(campaign, BattleOutcome::Defeat);
            return;
        }
        self.schedule(StepKind::AdvanceTurn, self.pacing.action_delay);
    }

    /// Removes a dead enemy, drops its loot, and ends the battle if it was
    /// the last one.
    fn resolve_enemy_death(&mut self, campaign: &mut Campaign, id: ActorId, rng: &mut impl Rng) {
        let config = Arc::clone(&self.config);
        let Some(battle) = self.battle.as_mut() else {
            return;
        };
        let floor = battle.floor;
        if battle.remove_enemy(id).is_none() {
            tracing::warn!(enemy = %id, "dead enemy already removed");
        }
        campaign.enemies_defeated += 1;
        let no_enemies_left = battle.enemies.is_empty();

        if let Some(item) = ItemGenerator::new(&config, campaign.locale).generate_loot_drop(floor, rng) {
            self.observer.on_loot(&item);
            if let Err(item) = campaign.add_item(item) {
                tracing::warn!(item = %item.name, "inventory full, loot lost");
                self.observer.on_warning(&CombatError::InventoryFull);
            }
        }

        if no_enemies_left {
            self.finish(campaign, BattleOutcome::Victory);
        } else {
            self.advance_turn(campaign);
        }
    }

    fn finish(&mut self, campaign: &mut Campaign, outcome: BattleOutcome) {
        let Some(mut battle) = self.battle.take() else {
            return;
        };
        battle.state = outcome.into();
        self.pending = None;
        self.last_outcome = Some(outcome);
        campaign.player.defending_this_turn = false;

        let rewards = (outcome == BattleOutcome::Victory).then(|| {
            let (xp, gold) = battle.base_rewards();
            let xp = (xp as f64 * battle.difficulty.xp_mult).floor() as u64;
            let gold = (gold as f64 * battle.difficulty.gold_mult).floor() as u64;
            campaign.add_gold(gold);
            let levels_gained = campaign
                .gain_experience(&self.config, xp)
                .unwrap_or_else(|err| {
                    tracing::warn!(error = %err, "could not apply level-ups");
                    0
                });
            Rewards {
                xp,
                gold,
                levels_gained,
            }
        });

        tracing::info!(
            battle = battle.id,
            ?outcome,
            rounds = battle.round(),
            "battle ended"
        );
        self.observer.on_input_enabled(false);
        self.observer.on_battle_ended(outcome, rewards.as_ref());
    }
}
