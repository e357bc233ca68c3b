//! Dice roll errors.

use forja_domain::{Attribute, DomainError};

/// Errors that can occur while sizing or rolling a pool.
#[derive(Debug, thiserror::Error)]
pub enum RollError {
    #[error("Attribute {0} is 0 and cannot be rolled")]
    NoAttribute(Attribute),

    #[error("Skill not found: {0}")]
    SkillNotFound(String),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),
}
