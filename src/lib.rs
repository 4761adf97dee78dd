//! Path of Heroes - turn-based combat and loot engine
//!
//! The library holds the game rules: configuration tables, characters and
//! campaign progression, item generation, and the battle controller that
//! drives an encounter turn by turn. Presentation layers attach through
//! [`combat::BattleObserver`]; the `simulate` binary uses the same engine
//! headless for balance analysis.

pub mod build_info;
pub mod campaign;
pub mod character;
pub mod combat;
pub mod config;
pub mod core;
pub mod items;
pub mod simulator;
