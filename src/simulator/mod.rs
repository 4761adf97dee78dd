//! Game balance simulator for Monte Carlo analysis.
//!
//! Plays thousands of seeded campaigns with a simple auto-play policy to
//! analyze:
//! - How far runs get before dying
//! - Battle win rates and lengths per class and difficulty
//! - Item drop rates and rarity distribution
//!
//! Every battle goes through the real [`BattleController`](crate::combat::BattleController),
//! so simulation results match actual gameplay.

mod config;
mod loot;
mod policy;
mod report;
mod runner;

pub use config::SimConfig;
pub use loot::{score_item, LootStats};
pub use policy::PolicyAction;
pub use report::SimReport;
pub use runner::{run_simulation, RunStats, SimError};
