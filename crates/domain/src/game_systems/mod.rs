//! FORJA rules.
//!
//! Pure functions over plain data: derived attributes, pool sizing, health
//! tiers and the latency clock. Every entry point takes the [`RuleConfig`]
//! it needs explicitly.

pub mod attack;
pub mod capabilities;
pub mod condition;
pub mod config;
pub mod derived;
pub mod latency_clock;

pub use attack::{
    attack_pool, attribute_pool, resolve_exchange, skill_pool, validate_trait, AttackPool,
    ExchangeOutcome,
};
pub use capabilities::{Contribution, ContributesToDerived, CostCategory};
pub use condition::{severity_tier, FatigueLevel, WoundLevel};
pub use config::{AttackFormula, AttackFormulas, RuleConfig, TraitIds};
pub use derived::{compute_derived, latency_for, DerivedProfile, PointBreakdown, BASE_LATENCY};
pub use latency_clock::{
    action_position, advance_clock, declaration_order, initiative_order, valid_targets,
    ClockAdvance, ClockPositions,
};
