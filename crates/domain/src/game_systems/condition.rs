//! Wound and fatigue severity tiers.
//!
//! Both tracks use the same seven-tier ladder keyed by `current / max`.
//! Thresholds are inclusive lower bounds, compared in basis points so the
//! boundaries are exact.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lower bound of tiers 2..=6 in basis points (0.17, 0.34, 0.51, 0.67, 0.84).
const TIER_THRESHOLDS_BP: [u64; 5] = [1700, 3400, 5100, 6700, 8400];

/// Tier index 0..=6 for a current/max pair.
///
/// 0 means untouched (also used when `max` is 0); any positive ratio below
/// 0.17 is tier 1.
pub fn severity_tier(current: u32, max: u32) -> usize {
    if max == 0 || current == 0 {
        return 0;
    }
    let scaled = u64::from(current) * 10_000;
    let max = u64::from(max);
    let passed = TIER_THRESHOLDS_BP
        .iter()
        .take_while(|&&threshold| scaled >= threshold * max)
        .count();
    passed + 1
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WoundLevel {
    #[default]
    Unharmed,
    Bruised,
    Injured,
    Wounded,
    BadlyWounded,
    Critical,
    Incapacitated,
}

impl WoundLevel {
    pub const ORDERED: [WoundLevel; 7] = [
        WoundLevel::Unharmed,
        WoundLevel::Bruised,
        WoundLevel::Injured,
        WoundLevel::Wounded,
        WoundLevel::BadlyWounded,
        WoundLevel::Critical,
        WoundLevel::Incapacitated,
    ];

    pub fn classify(current: u32, max: u32) -> Self {
        Self::ORDERED[severity_tier(current, max)]
    }

    pub fn tier(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for WoundLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            WoundLevel::Unharmed => "Unharmed",
            WoundLevel::Bruised => "Bruised",
            WoundLevel::Injured => "Injured",
            WoundLevel::Wounded => "Wounded",
            WoundLevel::BadlyWounded => "Badly wounded",
            WoundLevel::Critical => "Critical",
            WoundLevel::Incapacitated => "Incapacitated",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FatigueLevel {
    #[default]
    Rested,
    Weakened,
    Tired,
    Faint,
    Exhausted,
    Spent,
    Unconscious,
}

impl FatigueLevel {
    pub const ORDERED: [FatigueLevel; 7] = [
        FatigueLevel::Rested,
        FatigueLevel::Weakened,
        FatigueLevel::Tired,
        FatigueLevel::Faint,
        FatigueLevel::Exhausted,
        FatigueLevel::Spent,
        FatigueLevel::Unconscious,
    ];

    pub fn classify(current: u32, max: u32) -> Self {
        Self::ORDERED[severity_tier(current, max)]
    }

    pub fn tier(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for FatigueLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FatigueLevel::Rested => "Rested",
            FatigueLevel::Weakened => "Weakened",
            FatigueLevel::Tired => "Tired",
            FatigueLevel::Faint => "Faint",
            FatigueLevel::Exhausted => "Exhausted",
            FatigueLevel::Spent => "Spent",
            FatigueLevel::Unconscious => "Unconscious",
        };
        f.write_str(label)
    }
}
