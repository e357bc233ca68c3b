//! Infrastructure implementations.
//!
//! Contains port trait implementations and the rule-table loader.

pub mod ports;
pub mod random;
pub mod rules_config;
