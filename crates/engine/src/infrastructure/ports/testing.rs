//! Testability ports for injecting randomness.

use uuid::Uuid;

// =============================================================================
// Testability Ports
// =============================================================================

/// Source of every random value the engine uses: dice, declaration
/// tie-breaks and generated ids.
#[cfg_attr(test, mockall::automock)]
pub trait RandomPort: Send + Sync {
    /// Uniform integer in `min..=max`.
    fn gen_range(&self, min: i32, max: i32) -> i32;
    fn gen_uuid(&self) -> Uuid;
}
