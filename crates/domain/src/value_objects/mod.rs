//! Value objects - Immutable objects defined by their attributes

mod attributes;
mod damage;
mod dice_pool;

pub use attributes::{Attribute, Attributes, MAX_ATTRIBUTE};
pub use damage::{compute_damage, DamageExpr, DamageFormula, DamageParams, DamageTrack};
pub use dice_pool::{
    effective_pool_size, resolve_pool, DieFace, ModifierSet, PoolOutcome, ScoringMode, DIE_FACES,
};
