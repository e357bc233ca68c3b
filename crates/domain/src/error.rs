//! Unified error types for the domain layer
//!
//! The rule functions themselves never fail: missing table entries and fields
//! resolve to documented defaults. `DomainError` covers the edges where input
//! is parsed or explicitly validated.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failed (e.g., invalid field values)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Rule violation (forbidden species, incompatible traits, illegal target)
    #[error("Constraint violation: {0}")]
    Constraint(String),

    /// Parse error (for value objects)
    #[error("Parse error: {0}")]
    Parse(String),

    /// State transition not allowed
    #[error("Invalid state transition: {0}")]
    InvalidStateTransition(String),
}

impl DomainError {
    /// Creates a validation error for out-of-range or missing values.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a constraint violation error
    pub fn constraint(msg: impl Into<String>) -> Self {
        Self::Constraint(msg.into())
    }

    /// Creates a parse error for string-to-type conversion failures.
    ///
    /// Use this in `FromStr` implementations when the input string
    /// doesn't match any known variant or format:
    /// - Unknown attribute codes or species
    /// - Malformed damage formulas
    ///
    /// # Example
    /// ```ignore
    /// impl FromStr for Side {
    ///     type Err = DomainError;
    ///     fn from_str(s: &str) -> Result<Self, Self::Err> {
    ///         match s {
    ///             "players" => Ok(Self::Players),
    ///             _ => Err(DomainError::parse(format!("Unknown side: {}", s))),
    ///         }
    ///     }
    /// }
    /// ```
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create an invalid state transition error
    pub fn invalid_state_transition(msg: impl Into<String>) -> Self {
        Self::InvalidStateTransition(msg.into())
    }
}
