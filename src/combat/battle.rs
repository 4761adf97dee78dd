use super::events::BattleOutcome;
use super::scheduler::TurnOrder;
use crate::character::{Actor, ActorId};
use crate::config::Difficulty;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BattleState {
    NotStarted,
    PlayerTurn,
    EnemyTurn(ActorId),
    Victory,
    Defeat,
    Fled,
}

impl BattleState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Victory | Self::Defeat | Self::Fled)
    }
}

impl From<BattleOutcome> for BattleState {
    fn from(outcome: BattleOutcome) -> Self {
        match outcome {
            BattleOutcome::Victory => Self::Victory,
            BattleOutcome::Defeat => Self::Defeat,
            BattleOutcome::Fled => Self::Fled,
        }
    }
}

/// One encounter. The player is not stored here: it lives in the campaign
/// and is lent to the controller for each call.
#[derive(Debug, Clone)]
pub struct Battle {
    pub id: u64,
    pub floor: u32,
    pub difficulty: Difficulty,
    pub enemies: Vec<Actor>,
    pub turn_order: TurnOrder,
    /// Enemies killed so far, in order of death.
    pub defeated: Vec<Actor>,
    pub state: BattleState,
}

impl Battle {
    pub fn round(&self) -> u32 {
        self.turn_order.round()
    }

    pub fn enemy(&self, id: ActorId) -> Option<&Actor> {
        self.enemies.iter().find(|enemy| enemy.id == id)
    }

    pub fn first_living_enemy(&self) -> Option<usize> {
        self.enemies.iter().position(Actor::is_alive)
    }

    /// Moves an enemy from the field to the defeated list.
    pub fn remove_enemy(&mut self, id: ActorId) -> Option<&Actor> {
        let index = self.enemies.iter().position(|enemy| enemy.id == id)?;
        let enemy = self.enemies.remove(index);
        self.defeated.push(enemy);
        self.defeated.last()
    }

    /// Summed xp and gold of defeated enemies, before difficulty scaling.
    pub fn base_rewards(&self) -> (u64, u64) {
        self.defeated.iter().fold((0, 0), |(xp, gold), enemy| {
            (xp + enemy.xp_reward, gold + enemy.gold_reward)
        })
    }
}
