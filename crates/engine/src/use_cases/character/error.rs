//! Character rules errors.

use forja_domain::{DomainError, ItemId};

/// Errors that can occur during character rule operations.
#[derive(Debug, thiserror::Error)]
pub enum CharacterError {
    #[error("Item cannot be equipped or is missing: {0}")]
    NotEquippable(ItemId),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),
}
