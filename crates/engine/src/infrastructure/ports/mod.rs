//! Port traits for infrastructure boundaries.
//!
//! The engine has no storage or network; the only port is randomness, so
//! dice and tie-breaks can be replaced by seeded or scripted sources in
//! tests.

mod testing;

// =============================================================================
// Testing Ports
// =============================================================================
pub use testing::RandomPort;

#[cfg(test)]
pub use testing::MockRandomPort;
