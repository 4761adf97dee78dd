use crate::character::ActorId;
use thiserror::Error;

/// Recoverable combat failures. Every variant leaves the battle unchanged
/// and does not consume the acting turn.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CombatError {
    #[error("it is not {0}'s turn")]
    NotYourTurn(ActorId),

    #[error("no battle in progress")]
    NoActiveBattle,

    #[error("not enough resource: need {needed}, have {available}")]
    InsufficientResource { needed: u32, available: u32 },

    #[error("inventory is full")]
    InventoryFull,

    #[error("an encounter needs at least one living enemy")]
    EmptyEncounter,

    #[error("enemy id {0} is reserved or used twice")]
    InvalidEnemyId(ActorId),

    #[error("target is dead or does not exist")]
    InvalidTarget,

    #[error("unknown ability '{0}'")]
    UnknownAbility(String),

    #[error("no usable item in inventory")]
    NoUsableItem,

    #[error("item would have no effect")]
    ItemHadNoEffect,

    #[error("scheduled step belongs to battle {step}, current battle is {current:?}")]
    StaleStep { step: u64, current: Option<u64> },
}
