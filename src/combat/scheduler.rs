//! Speed-ordered turn sequencing.

use super::events::BattleOutcome;
use crate::character::{Actor, ActorId, ActorKind};
use crate::core::rng::shuffle;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnEntry {
    pub actor: ActorId,
    pub kind: ActorKind,
    pub speed: u32,
}

/// Result of [`TurnOrder::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    Next(TurnEntry),
    Finished(BattleOutcome),
}

/// Turn sequence for one battle. Built once, then only pruned as actors die.
#[derive(Debug, Clone)]
pub struct TurnOrder {
    entries: Vec<TurnEntry>,
    index: usize,
    round: u32,
    finished: Option<BattleOutcome>,
}

impl TurnOrder {
    /// Orders the player and enemies by speed, fastest first.
    ///
    /// The sort is stable; each run of equal speeds is then shuffled once
    /// so ties are not decided by list position.
    pub fn build(player: &Actor, enemies: &[Actor], rng: &mut impl Rng) -> Self {
        let mut entries: Vec<TurnEntry> = std::iter::once(player)
            .chain(enemies.iter())
            .map(|actor| TurnEntry {
                actor: actor.id,
                kind: actor.kind,
                speed: actor.stats.speed,
            })
            .collect();
        entries.sort_by(|a, b| b.speed.cmp(&a.speed));

        let mut start = 0;
        while start < entries.len() {
            let speed = entries[start].speed;
            let end = entries[start..]
                .iter()
                .position(|entry| entry.speed != speed)
                .map_or(entries.len(), |offset| start + offset);
            if end - start > 1 {
                shuffle(rng, &mut entries[start..end]);
            }
            start = end;
        }

        Self {
            entries,
            index: 0,
            round: 1,
            finished: None,
        }
    }

    /// The actor whose turn it is, or `None` when nobody is left.
    pub fn current(&self) -> Option<TurnEntry> {
        self.entries.get(self.index).copied()
    }

    pub fn entries(&self) -> &[TurnEntry] {
        &self.entries
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn finished(&self) -> Option<BattleOutcome> {
        self.finished
    }

    /// Win/loss check over the current entries. A missing player means
    /// defeat even if enemies are also gone.
    pub fn terminal_outcome(&self) -> Option<BattleOutcome> {
        let has = |kind| self.entries.iter().any(|entry| entry.kind == kind);
        if !has(ActorKind::Player) {
            Some(BattleOutcome::Defeat)
        } else if !has(ActorKind::Enemy) {
            Some(BattleOutcome::Victory)
        } else {
            None
        }
    }

    /// Drops dead actors and moves to the next living one, starting a new
    /// round on wraparound.
    ///
    /// Once one side is gone the order is frozen: this and every later call
    /// return the same [`Advance::Finished`] without touching index or round.
    pub fn advance(&mut self, is_alive: impl Fn(ActorId) -> bool) -> Advance {
        if let Some(outcome) = self.finished {
            return Advance::Finished(outcome);
        }

        let current_alive = self
            .entries
            .get(self.index)
            .is_some_and(|entry| is_alive(entry.actor));
        let removed_before = self.entries[..self.index.min(self.entries.len())]
            .iter()
            .filter(|entry| !is_alive(entry.actor))
            .count();
        self.entries.retain(|entry| is_alive(entry.actor));

        if let Some(outcome) = self.terminal_outcome() {
            self.finished = Some(outcome);
            return Advance::Finished(outcome);
        }

        let mut next = self.index - removed_before;
        if current_alive {
            next += 1;
        }
        if next >= self.entries.len() {
            next = 0;
            self.round += 1;
        }
        self.index = next;

        Advance::Next(self.entries[next])
    }
}
