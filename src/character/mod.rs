//! Combatants, player classes, and level progression.

pub mod actor;
pub mod classes;
pub mod progression;

pub use actor::*;
pub use classes::*;
pub use progression::*;
