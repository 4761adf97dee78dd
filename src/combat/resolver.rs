//! Damage, critical hits, defending, abilities and fleeing.
//!
//! Random draws per attack are always taken in the same order: the
//! critical check first, then the damage variance.

use super::error::CombatError;
use crate::character::Actor;
use crate::config::{AbilityDef, AbilityKind, CombatConstants, Difficulty};
use crate::core::constants::{
    DAMAGE_VARIANCE_MIN, DAMAGE_VARIANCE_SPAN, DEFEND_DAMAGE_FACTOR, DEFENSE_FACTOR,
    MIN_BASE_DAMAGE,
};
use crate::core::rng::roll;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackResult {
    pub damage: u32,
    pub is_critical: bool,
    pub defender_died: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbilityOutcome {
    Hit(AttackResult),
    Guarded,
    Healed(u32),
}

/// Applies combat formulas under one difficulty setting.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    constants: &'a CombatConstants,
    difficulty: &'a Difficulty,
}

impl<'a> Resolver<'a> {
    pub fn new(constants: &'a CombatConstants, difficulty: &'a Difficulty) -> Self {
        Self {
            constants,
            difficulty,
        }
    }

    /// True with probability `crit_chance / 100`.
    pub fn roll_critical(&self, actor: &Actor, rng: &mut impl Rng) -> bool {
        roll(rng) < actor.stats.crit_chance / 100.0
    }

    /// Damage of one hit. Consumes the defender's guard if raised.
    pub fn compute_damage(
        &self,
        attacker: &Actor,
        defender: &mut Actor,
        multiplier: f64,
        is_critical: bool,
        rng: &mut impl Rng,
    ) -> u32 {
        let raw = attacker.stats.attack as f64 - defender.stats.defense as f64 * DEFENSE_FACTOR;
        let mut damage = raw.max(MIN_BASE_DAMAGE) * multiplier;

        // Crits land on whole points before the remaining multipliers.
        if is_critical {
            damage = (damage * self.constants.base_crit_multiplier).floor();
        }

        damage *= if attacker.is_player() {
            self.difficulty.player_damage_mult
        } else {
            self.difficulty.enemy_damage_mult
        };

        if defender.defending_this_turn {
            damage *= DEFEND_DAMAGE_FACTOR;
            defender.defending_this_turn = false;
        }

        let variance = DAMAGE_VARIANCE_MIN + roll(rng) * DAMAGE_VARIANCE_SPAN;
        (damage * variance).floor().max(0.0) as u32
    }

    /// Rolls a critical, computes damage and applies it to the defender.
    pub fn apply_attack(
        &self,
        attacker: &Actor,
        defender: &mut Actor,
        multiplier: f64,
        rng: &mut impl Rng,
    ) -> AttackResult {
        let is_critical = self.roll_critical(attacker, rng);
        let damage = self.compute_damage(attacker, defender, multiplier, is_critical, rng);
        defender.take_damage(damage);

        tracing::debug!(
            attacker = %attacker.name,
            defender = %defender.name,
            damage,
            is_critical,
            hp = defender.stats.hp,
            "attack resolved"
        );

        AttackResult {
            damage,
            is_critical,
            defender_died: !defender.is_alive(),
        }
    }

    /// Spends the ability's cost and applies its effect.
    ///
    /// Fails without touching any state when the caster cannot pay or an
    /// attack ability has no living target.
    pub fn apply_ability(
        &self,
        caster: &mut Actor,
        ability: &AbilityDef,
        target: Option<&mut Actor>,
        rng: &mut impl Rng,
    ) -> Result<AbilityOutcome, CombatError> {
        let available = caster.resource_current();
        if available < ability.cost {
            return Err(CombatError::InsufficientResource {
                needed: ability.cost,
                available,
            });
        }

        match ability.kind {
            AbilityKind::Attack => {
                let target = match target {
                    Some(target) if target.is_alive() => target,
                    _ => return Err(CombatError::InvalidTarget),
                };
                caster.spend_resource(ability.cost);
                Ok(AbilityOutcome::Hit(self.apply_attack(
                    caster,
                    target,
                    ability.damage_multiplier,
                    rng,
                )))
            }
            AbilityKind::Guard => {
                caster.spend_resource(ability.cost);
                self.apply_defend(caster);
                Ok(AbilityOutcome::Guarded)
            }
            AbilityKind::Heal => {
                caster.spend_resource(ability.cost);
                let amount = (caster.stats.attack as f64 * ability.damage_multiplier).floor() as u32;
                Ok(AbilityOutcome::Healed(caster.heal(amount)))
            }
        }
    }

    /// Raises the actor's guard; the next incoming hit is halved.
    pub fn apply_defend(&self, actor: &mut Actor) {
        actor.defending_this_turn = true;
    }

    pub fn attempt_flee(&self, rng: &mut impl Rng) -> bool {
        roll(rng) < self.constants.flee_chance
    }

    pub fn regenerate_resource(&self, actor: &mut Actor) -> u32 {
        actor.regenerate_resource()
    }
}
