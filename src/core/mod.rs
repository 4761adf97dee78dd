//! Shared constants, locale text and random number plumbing.

pub mod constants;
pub mod locale;
pub mod rng;

pub use locale::{Locale, LocalizedText};
pub use rng::ScriptedRng;
