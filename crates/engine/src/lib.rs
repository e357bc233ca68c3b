//! Forja Engine library.
//!
//! Application layer over `forja-domain`: randomness is injected through
//! ports, rule tables are loaded from disk, and the use cases orchestrate
//! dice rolls, encounters and character upkeep.
//!
//! ## Structure
//!
//! - `use_cases/` - Rolls, encounters and character rules
//! - `infrastructure/` - Ports and their adapters (random sources, rule files)

pub mod infrastructure;
pub mod use_cases;

pub use infrastructure::ports::RandomPort;
pub use infrastructure::random::{SeededRandom, SystemRandom};
pub use infrastructure::rules_config::{ConfigError, RuleConfigLoader};
pub use use_cases::{
    AttackRoll, CharacterError, CharacterRules, CombatTracker, EncounterError, EncounterState,
    HealthReport, PoolRoll, RollDice, RollError,
};
