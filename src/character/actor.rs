//! Combatants: the player and the enemies they fight.

use crate::core::LocalizedText;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Battle-unique actor identifier. The player is always [`ActorId::PLAYER`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ActorId(pub u32);

impl ActorId {
    pub const PLAYER: ActorId = ActorId(0);
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActorKind {
    Player,
    Enemy,
}

/// Stats that items and level growth can modify.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stat {
    MaxHp,
    Attack,
    Defense,
    Speed,
    CritChance,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub hp: u32,
    pub max_hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,
    /// Percent chance (0-100) to land a critical hit.
    pub crit_chance: f64,
}

impl Stats {
    /// Adds a signed delta to a stat, saturating at zero.
    pub fn apply_modifier(&mut self, stat: Stat, delta: i32) {
        match stat {
            Stat::MaxHp => {
                self.max_hp = self.max_hp.saturating_add_signed(delta);
                self.hp = self.hp.min(self.max_hp);
            }
            Stat::Attack => self.attack = self.attack.saturating_add_signed(delta),
            Stat::Defense => self.defense = self.defense.saturating_add_signed(delta),
            Stat::Speed => self.speed = self.speed.saturating_add_signed(delta),
            Stat::CritChance => self.crit_chance = (self.crit_chance + delta as f64).max(0.0),
        }
    }
}

/// Class resource pool (Mana, Energy, Vigor) that gates abilities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub name: LocalizedText,
    pub current: u32,
    pub max: u32,
    pub regen_per_turn: u32,
}

impl Resource {
    pub fn full(name: LocalizedText, max: u32, regen_per_turn: u32) -> Self {
        Self {
            name,
            current: max,
            max,
            regen_per_turn,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub id: ActorId,
    pub kind: ActorKind,
    pub name: String,
    /// Class id for the player, enemy template id for enemies.
    pub template_id: String,
    pub stats: Stats,
    pub resource: Option<Resource>,
    pub abilities: Vec<String>,
    #[serde(default)]
    pub defending_this_turn: bool,
    #[serde(default)]
    pub xp_reward: u64,
    #[serde(default)]
    pub gold_reward: u64,
}

impl Actor {
    pub fn is_alive(&self) -> bool {
        self.stats.hp > 0
    }

    pub fn is_player(&self) -> bool {
        self.kind == ActorKind::Player
    }

    /// Subtracts damage, clamping at zero. Returns the HP actually lost.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.stats.hp);
        self.stats.hp -= lost;
        lost
    }

    /// Restores HP up to max. Returns the HP actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let missing = self.stats.max_hp.saturating_sub(self.stats.hp);
        let healed = amount.min(missing);
        self.stats.hp += healed;
        healed
    }

    pub fn resource_current(&self) -> u32 {
        self.resource.as_ref().map_or(0, |r| r.current)
    }

    /// Applies one turn of resource regeneration. Returns the amount gained.
    pub fn regenerate_resource(&mut self) -> u32 {
        match self.resource.as_mut() {
            Some(resource) => {
                let before = resource.current.min(resource.max);
                resource.current = resource
                    .max
                    .min(before.saturating_add(resource.regen_per_turn));
                resource.current - before
            }
            None => 0,
        }
    }

    /// Deducts `cost` if affordable. Returns false (and changes nothing) otherwise.
    pub fn spend_resource(&mut self, cost: u32) -> bool {
        if cost == 0 {
            return true;
        }
        match self.resource.as_mut() {
            Some(resource) if resource.current >= cost => {
                resource.current -= cost;
                true
            }
            _ => false,
        }
    }

    /// Refills HP and resource to their maximums.
    pub fn restore_fully(&mut self) {
        self.stats.hp = self.stats.max_hp;
        if let Some(resource) = self.resource.as_mut() {
            resource.current = resource.max;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_actor(hp: u32, max_hp: u32) -> Actor {
        Actor {
            id: ActorId::PLAYER,
            kind: ActorKind::Player,
            name: "Taha".to_string(),
            template_id: "warrior".to_string(),
            stats: Stats {
                hp,
                max_hp,
                attack: 15,
                defense: 12,
                speed: 8,
                crit_chance: 10.0,
            },
            resource: Some(Resource {
                name: LocalizedText::new("Vigor", "نشاط"),
                current: 3,
                max: 60,
                regen_per_turn: 5,
            }),
            abilities: vec![],
            defending_this_turn: false,
            xp_reward: 0,
            gold_reward: 0,
        }
    }

    #[test]
    fn test_take_damage_clamps_at_zero() {
        let mut actor = make_actor(10, 100);
        assert_eq!(actor.take_damage(15), 10);
        assert_eq!(actor.stats.hp, 0);
        assert!(!actor.is_alive());
    }

    #[test]
    fn test_heal_clamps_at_max() {
        let mut actor = make_actor(90, 100);
        assert_eq!(actor.heal(25), 10);
        assert_eq!(actor.stats.hp, 100);
    }

    #[test]
    fn test_regenerate_resource_caps_at_max() {
        let mut actor = make_actor(100, 100);
        assert_eq!(actor.regenerate_resource(), 5);
        assert_eq!(actor.resource_current(), 8);

        actor.resource.as_mut().unwrap().current = 58;
        assert_eq!(actor.regenerate_resource(), 2);
        assert_eq!(actor.resource_current(), 60);
    }

    #[test]
    fn test_regenerate_resource_pulls_overfull_pool_back_to_max() {
        let mut actor = make_actor(100, 100);
        actor.resource.as_mut().unwrap().current = 1000;
        assert_eq!(actor.regenerate_resource(), 0);
        assert_eq!(actor.resource_current(), 60);
    }

    #[test]
    fn test_spend_resource_insufficient_leaves_pool() {
        let mut actor = make_actor(100, 100);
        assert!(!actor.spend_resource(10));
        assert_eq!(actor.resource_current(), 3);
        assert!(actor.spend_resource(3));
        assert_eq!(actor.resource_current(), 0);
    }

    #[test]
    fn test_apply_modifier_max_hp_clamps_hp() {
        let mut actor = make_actor(100, 100);
        actor.stats.apply_modifier(Stat::MaxHp, -20);
        assert_eq!(actor.stats.max_hp, 80);
        assert_eq!(actor.stats.hp, 80);
        actor.stats.apply_modifier(Stat::Speed, -50);
        assert_eq!(actor.stats.speed, 0);
    }
}
