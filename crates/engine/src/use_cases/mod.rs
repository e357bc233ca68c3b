//! Use cases - rule operations the surrounding application calls.
//!
//! Each module owns one area: rolling pools, running an encounter, and
//! keeping a character's derived values current.

pub mod character;
pub mod encounter;
pub mod roll;

// Re-export main types
pub use character::{CharacterError, CharacterRules, HealthReport};
pub use encounter::{CombatTracker, EncounterError, EncounterState};
pub use roll::{AttackRoll, PoolRoll, RollDice, RollError};
