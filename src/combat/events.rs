//! Notifications the battle controller sends to the presentation layer.

use super::error::CombatError;
use crate::character::{Actor, ActorId};
use crate::items::{Item, Rarity};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BattleOutcome {
    Victory,
    Defeat,
    Fled,
}

/// Experience and gold granted for a victory, after difficulty multipliers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rewards {
    pub xp: u64,
    pub gold: u64,
    pub levels_gained: u32,
}

/// What produced an [`BattleEvent::ActionResolved`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Attack,
    Ability(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum BattleEvent {
    BattleStarted {
        battle_id: u64,
        order: Vec<ActorId>,
    },
    TurnStarted {
        actor: ActorId,
        name: String,
        round: u32,
    },
    InputEnabled {
        enabled: bool,
    },
    ActionResolved {
        action: ActionKind,
        attacker: ActorId,
        defender: ActorId,
        damage: u32,
        is_critical: bool,
    },
    Defended {
        actor: ActorId,
    },
    Healed {
        actor: ActorId,
        amount: u32,
    },
    FleeFailed,
    ActorDefeated {
        actor: ActorId,
        name: String,
    },
    LootDropped {
        name: String,
        rarity: Rarity,
    },
    Warning {
        message: String,
    },
    BattleEnded {
        outcome: BattleOutcome,
        rewards: Option<Rewards>,
    },
}

/// Receives battle notifications. Every hook defaults to a no-op so an
/// adapter only implements what it renders.
pub trait BattleObserver {
    fn on_battle_started(&mut self, _battle_id: u64, _order: &[ActorId]) {}

    fn on_turn_start(&mut self, _actor: &Actor, _round: u32) {}

    fn on_input_enabled(&mut self, _enabled: bool) {}

    fn on_action_resolved(
        &mut self,
        _action: &ActionKind,
        _attacker: &Actor,
        _defender: &Actor,
        _damage: u32,
        _is_critical: bool,
    ) {
    }

    fn on_defend(&mut self, _actor: &Actor) {}

    fn on_heal(&mut self, _actor: &Actor, _amount: u32) {}

    fn on_flee_failed(&mut self) {}

    fn on_actor_defeated(&mut self, _actor: &Actor) {}

    fn on_loot(&mut self, _item: &Item) {}

    /// Non-fatal problems such as a lost drop on a full inventory.
    fn on_warning(&mut self, _warning: &CombatError) {}

    fn on_battle_ended(&mut self, _outcome: BattleOutcome, _rewards: Option<&Rewards>) {}
}

impl BattleObserver for () {}

/// Observer that records every notification as a [`BattleEvent`].
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    pub events: Vec<BattleEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drains recorded events.
    pub fn take(&mut self) -> Vec<BattleEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn outcome(&self) -> Option<BattleOutcome> {
        self.events.iter().rev().find_map(|event| match event {
            BattleEvent::BattleEnded { outcome, .. } => Some(*outcome),
            _ => None,
        })
    }
}

impl BattleObserver for EventLog {
    fn on_battle_started(&mut self, battle_id: u64, order: &[ActorId]) {
        self.events.push(BattleEvent::BattleStarted {
            battle_id,
            order: order.to_vec(),
        });
    }

    fn on_turn_start(&mut self, actor: &Actor, round: u32) {
        self.events.push(BattleEvent::TurnStarted {
            actor: actor.id,
            name: actor.name.clone(),
            round,
        });
    }

    fn on_input_enabled(&mut self, enabled: bool) {
        self.events.push(BattleEvent::InputEnabled { enabled });
    }

    fn on_action_resolved(
        &mut self,
        action: &ActionKind,
        attacker: &Actor,
        defender: &Actor,
        damage: u32,
        is_critical: bool,
    ) {
        self.events.push(BattleEvent::ActionResolved {
            action: action.clone(),
            attacker: attacker.id,
            defender: defender.id,
            damage,
            is_critical,
        });
    }

    fn on_defend(&mut self, actor: &Actor) {
        self.events.push(BattleEvent::Defended { actor: actor.id });
    }

    fn on_heal(&mut self, actor: &Actor, amount: u32) {
        self.events.push(BattleEvent::Healed {
            actor: actor.id,
            amount,
        });
    }

    fn on_flee_failed(&mut self) {
        self.events.push(BattleEvent::FleeFailed);
    }

    fn on_actor_defeated(&mut self, actor: &Actor) {
        self.events.push(BattleEvent::ActorDefeated {
            actor: actor.id,
            name: actor.name.clone(),
        });
    }

    fn on_loot(&mut self, item: &Item) {
        self.events.push(BattleEvent::LootDropped {
            name: item.name.clone(),
            rarity: item.rarity,
        });
    }

    fn on_warning(&mut self, warning: &CombatError) {
        self.events.push(BattleEvent::Warning {
            message: warning.to_string(),
        });
    }

    fn on_battle_ended(&mut self, outcome: BattleOutcome, rewards: Option<&Rewards>) {
        self.events.push(BattleEvent::BattleEnded {
            outcome,
            rewards: rewards.cloned(),
        });
    }
}
