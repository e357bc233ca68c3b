//! Domain entities - Core business objects with identity

mod actor;
mod combatant;
mod item;

pub use actor::{ActorProfile, Pool, Species, MAX_BUILD, MIN_BUILD};
pub use combatant::{
    ActionType, CombatStats, Combatant, DeclaredAction, RoundPhase, Side, DEFAULT_LATENCY,
};
pub use item::{
    Activation, Armor, Artifact, AttackType, Gift, Item, ItemKind, Skill, SkillType,
    SupernaturalEffect, Trait, TraitType, Weapon, WeaponType,
};
