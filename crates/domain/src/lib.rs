//! FORJA domain - pure rules of the FORJA tabletop RPG.
//!
//! Holds the data model (actors, items, combatants), the derived-attribute
//! engine, d10 pool scoring and the latency-clock scheduler primitives.
//! Nothing here performs I/O or draws random numbers; dice values and
//! tie-breaks are passed in by the caller.

pub mod entities;
pub mod error;
pub mod events;
pub mod game_systems;
pub mod ids;
pub mod value_objects;

pub use entities::{
    ActionType, Activation, ActorProfile, Armor, Artifact, AttackType, CombatStats, Combatant,
    DeclaredAction, Gift, Item, ItemKind, Pool, RoundPhase, Side, Skill, SkillType, Species,
    SupernaturalEffect, Trait, TraitType, Weapon, WeaponType,
};

pub use error::DomainError;
pub use events::{CombatEvent, DomainEvent};

pub use game_systems::{
    action_position, advance_clock, attack_pool, attribute_pool, compute_derived,
    declaration_order, initiative_order, resolve_exchange, skill_pool, valid_targets,
    validate_trait, AttackPool, ClockAdvance, ClockPositions, DerivedProfile, ExchangeOutcome,
    FatigueLevel, PointBreakdown, RuleConfig, WoundLevel,
};

pub use ids::{ActorId, CombatantId, EncounterId, ItemId};

pub use value_objects::{
    compute_damage, effective_pool_size, resolve_pool, Attribute, Attributes, DamageFormula,
    DamageParams, DamageTrack, DieFace, ModifierSet, PoolOutcome, ScoringMode, DIE_FACES,
};
