//! Turn-based combat: ordering, resolution, and the battle state machine.

pub mod battle;
pub mod controller;
pub mod enemies;
pub mod error;
pub mod events;
pub mod resolver;
pub mod scheduler;

pub use battle::*;
pub use controller::*;
pub use enemies::*;
pub use error::*;
pub use events::*;
pub use resolver::*;
pub use scheduler::*;
