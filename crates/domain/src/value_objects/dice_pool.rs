//! d10 dice-pool resolution.
//!
//! A pool of d10 is rolled and each die is scored into fites (successes).
//! Trait modifiers change the scoring; exactly one scoring mode applies per
//! roll, chosen with a fixed precedence: titanic, specialist, inept, standard.
//!
//! Dice values are always supplied by the caller so the scoring is pure.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of faces on a pool die.
pub const DIE_FACES: u8 = 10;

/// Clamp a requested pool size to the one-die minimum.
pub fn effective_pool_size(requested: i32) -> u32 {
    requested.max(1) as u32
}

/// How the dice of a single roll are scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringMode {
    /// 6-9 = 1, 10 = 2, a 1 marks the roll but does not subtract
    #[default]
    Standard,
    /// 6+ = 1 (10 does not double), every 1 subtracts one fite
    Inept,
    /// 6-8 = 1, 9-10 = 2, 1s are ignored
    Specialist,
    /// 4-9 = 1, 10 = 2, 1s are ignored
    Titanic,
}

impl ScoringMode {
    /// Fite contribution of a single die. May be negative (inept 1s).
    pub fn score_die(&self, value: u8) -> i32 {
        match self {
            ScoringMode::Titanic => match value {
                v if v >= 10 => 2,
                v if v >= 4 => 1,
                _ => 0,
            },
            ScoringMode::Specialist => match value {
                v if v >= 9 => 2,
                v if v >= 6 => 1,
                _ => 0,
            },
            ScoringMode::Inept => match value {
                v if v >= 6 => 1,
                1 => -1,
                _ => 0,
            },
            ScoringMode::Standard => match value {
                v if v >= 10 => 2,
                v if v >= 6 => 1,
                _ => 0,
            },
        }
    }

    /// Whether a 1 in the pool is noticed at all.
    fn counts_ones(&self) -> bool {
        matches!(self, ScoringMode::Standard | ScoringMode::Inept)
    }

    /// Specialist and titanic rolls can never fumble.
    pub fn can_fumble(&self) -> bool {
        self.counts_ones()
    }
}

impl fmt::Display for ScoringMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoringMode::Standard => write!(f, "standard"),
            ScoringMode::Inept => write!(f, "inept"),
            ScoringMode::Specialist => write!(f, "specialist"),
            ScoringMode::Titanic => write!(f, "titanic"),
        }
    }
}

/// Trait flags as a caller may collect them from an actor.
///
/// Several flags can be set at once; [`ModifierSet::scoring_mode`] collapses
/// them to the single mode that applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ModifierSet {
    pub titanic: bool,
    pub specialist: bool,
    pub inept: bool,
}

impl ModifierSet {
    pub fn none() -> Self {
        Self::default()
    }

    /// Resolve the flags with precedence titanic > specialist > inept > standard.
    pub fn scoring_mode(&self) -> ScoringMode {
        if self.titanic {
            ScoringMode::Titanic
        } else if self.specialist {
            ScoringMode::Specialist
        } else if self.inept {
            ScoringMode::Inept
        } else {
            ScoringMode::Standard
        }
    }
}

impl From<ModifierSet> for ScoringMode {
    fn from(modifiers: ModifierSet) -> Self {
        modifiers.scoring_mode()
    }
}

/// Scored result of a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolOutcome {
    /// Net successes, never negative
    pub fites: u32,
    /// At least one counted 1 was rolled
    pub has_ones: bool,
    /// Fumble: ones rolled, zero fites, and the mode can fumble
    pub is_pifia: bool,
}

impl PoolOutcome {
    pub fn is_success(&self) -> bool {
        self.fites > 0
    }
}

/// Score a pool of d10 results.
pub fn resolve_pool(dice: &[u8], modifiers: impl Into<ScoringMode>) -> PoolOutcome {
    let mode = modifiers.into();
    let mut running: i32 = 0;
    let mut has_ones = false;

    for &die in dice {
        running += mode.score_die(die);
        if die == 1 && mode.counts_ones() {
            has_ones = true;
        }
    }

    let fites = running.max(0) as u32;
    PoolOutcome {
        fites,
        has_ones,
        is_pifia: has_ones && fites == 0 && mode.can_fumble(),
    }
}

/// Display class of a single die face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DieFace {
    Fumble,
    Critical,
    Success,
    Neutral,
}

impl DieFace {
    pub fn classify(value: u8) -> Self {
        match value {
            1 => DieFace::Fumble,
            v if v >= DIE_FACES => DieFace::Critical,
            v if v >= 6 => DieFace::Success,
            _ => DieFace::Neutral,
        }
    }
}
