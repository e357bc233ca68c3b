//! Encounter operation errors.

use forja_domain::{ActionType, CombatantId, DomainError};

/// Errors that can occur while running an encounter.
#[derive(Debug, thiserror::Error)]
pub enum EncounterError {
    #[error("Combatant not found: {0}")]
    CombatantNotFound(CombatantId),

    #[error("Combatant already in encounter: {0}")]
    DuplicateCombatant(CombatantId),

    #[error("Combatant {0} has already declared this round")]
    AlreadyDeclared(CombatantId),

    #[error("{target} is not a valid {action_type} target for {actor}")]
    InvalidTarget {
        actor: CombatantId,
        target: CombatantId,
        action_type: ActionType,
    },

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),
}
