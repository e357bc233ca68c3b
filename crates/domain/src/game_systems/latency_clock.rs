//! Latency clock - declaration order, clock positions and advancement.
//!
//! Combatants declare from slowest to fastest, then act as the shared clock
//! counts down to their position. All functions here return new values; the
//! only source of non-determinism, the final declaration tie-break, is
//! supplied by the caller.

use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

use crate::entities::{ActionType, Combatant, Side};
use crate::CombatantId;

/// Clock position of a declared action: `max(1, latency + modifier)`.
pub fn action_position(latency: u32, latency_modifier: i32) -> i32 {
    i32::try_from(latency)
        .unwrap_or(i32::MAX)
        .saturating_add(latency_modifier)
        .max(1)
}

/// Order in which undeclared combatants must commit to an action.
///
/// Highest latency first, antagonists before players, lower AGI before
/// higher, then by the value `tie_break` yields for each combatant. The
/// sort is stable, so a constant tie-break keeps the input order.
pub fn declaration_order<F>(combatants: &[Combatant], mut tie_break: F) -> Vec<CombatantId>
where
    F: FnMut() -> u32,
{
    let mut pending: Vec<(&Combatant, u32)> = combatants
        .iter()
        .filter(|c| !c.has_declared() && !c.defeated)
        .map(|c| (c, tie_break()))
        .collect();

    pending.sort_by_key(|(c, roll)| {
        let side_rank = match c.side {
            Side::Antagonists => 0u8,
            Side::Players => 1,
        };
        (Reverse(c.latency()), side_rank, c.agility(), *roll)
    });

    pending.into_iter().map(|(c, _)| c.id).collect()
}

/// Combatant positions on the clock, kept in declaration (insertion) order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClockPositions(Vec<(CombatantId, i32)>);

impl ClockPositions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a position; a new id is appended, a known id keeps its slot.
    pub fn insert(&mut self, id: CombatantId, position: i32) {
        match self.0.iter_mut().find(|(existing, _)| *existing == id) {
            Some(entry) => entry.1 = position,
            None => self.0.push((id, position)),
        }
    }

    pub fn get(&self, id: CombatantId) -> Option<i32> {
        self.0
            .iter()
            .find(|(existing, _)| *existing == id)
            .map(|(_, position)| *position)
    }

    pub fn iter(&self) -> impl Iterator<Item = (CombatantId, i32)> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Smallest strictly positive position, if any.
    pub fn next_step(&self) -> Option<i32> {
        self.0
            .iter()
            .map(|(_, position)| *position)
            .filter(|position| *position > 0)
            .min()
    }
}

impl FromIterator<(CombatantId, i32)> for ClockPositions {
    fn from_iter<T: IntoIterator<Item = (CombatantId, i32)>>(iter: T) -> Self {
        let mut positions = ClockPositions::new();
        for (id, position) in iter {
            positions.insert(id, position);
        }
        positions
    }
}

/// Result of one clock advance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClockAdvance {
    pub positions: ClockPositions,
    /// Combatants now at position 0, in position-map order
    pub resolving: Vec<CombatantId>,
    /// Time units that passed (0 when nothing was pending)
    pub elapsed: i32,
}

/// Advance the clock to the next pending action.
///
/// The minimum positive position is subtracted from every entry; entries at
/// or below 0 may go negative. Entries that land exactly on 0 resolve now.
pub fn advance_clock(positions: &ClockPositions) -> ClockAdvance {
    let Some(step) = positions.next_step() else {
        return ClockAdvance {
            positions: positions.clone(),
            resolving: Vec::new(),
            elapsed: 0,
        };
    };

    let advanced: ClockPositions = positions
        .iter()
        .map(|(id, position)| (id, position - step))
        .collect();
    let resolving = advanced
        .iter()
        .filter(|(_, position)| *position == 0)
        .map(|(id, _)| id)
        .collect();

    ClockAdvance {
        positions: advanced,
        resolving,
        elapsed: step,
    }
}

/// Combatants an actor on `side` may target with `action_type`.
///
/// Attacks target the opposing side; every other action targets the
/// actor's own side, the actor included. Defeated combatants are skipped.
pub fn valid_targets(combatants: &[Combatant], side: Side, action_type: ActionType) -> Vec<CombatantId> {
    let wanted = match action_type {
        ActionType::Attack => side.opposing(),
        _ => side,
    };
    combatants
        .iter()
        .filter(|c| c.side == wanted && !c.defeated)
        .map(|c| c.id)
        .collect()
}

/// Display order: lowest latency first, then higher AGI, then id.
///
/// Combatants without linked stats sort last.
pub fn initiative_order(combatants: &[Combatant]) -> Vec<CombatantId> {
    let mut ordered: Vec<&Combatant> = combatants.iter().collect();
    ordered.sort_by_key(|c| {
        let latency = c.stats.map(|s| s.latency).unwrap_or(u32::MAX);
        (latency, Reverse(c.agility()), c.id)
    });
    ordered.into_iter().map(|c| c.id).collect()
}
