//! Combat-related domain events
//!
//! Returned by encounter operations so callers can react to what happened
//! (log it, persist it, push it to a table view).

use serde::{Deserialize, Serialize};

use crate::entities::{ActionType, Side};
use crate::value_objects::DamageTrack;
use crate::CombatantId;

/// Something that happened inside an encounter round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum CombatEvent {
    CombatantJoined {
        combatant_id: CombatantId,
        side: Side,
    },
    ActionDeclared {
        combatant_id: CombatantId,
        action_type: ActionType,
        position: i32,
        target_id: Option<CombatantId>,
    },
    ClockAdvanced {
        elapsed: i32,
        resolving: Vec<CombatantId>,
    },
    AttackResolved {
        attacker_id: CombatantId,
        defender_id: CombatantId,
        attack_fites: u32,
        defense_fites: u32,
        is_hit: bool,
        damage: u32,
        damage_track: DamageTrack,
    },
    ActionCompleted {
        combatant_id: CombatantId,
    },
    ReactionUsed {
        combatant_id: CombatantId,
        reactions_used: u32,
        /// More reactions recorded than the combatant is allowed
        over_budget: bool,
    },
    DefeatedToggled {
        combatant_id: CombatantId,
        defeated: bool,
    },
    RoundReset {
        round: u32,
    },
}

impl CombatEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::CombatantJoined { .. } => "combatant_joined",
            Self::ActionDeclared { .. } => "action_declared",
            Self::ClockAdvanced { .. } => "clock_advanced",
            Self::AttackResolved { .. } => "attack_resolved",
            Self::ActionCompleted { .. } => "action_completed",
            Self::ReactionUsed { .. } => "reaction_used",
            Self::DefeatedToggled { .. } => "defeated_toggled",
            Self::RoundReset { .. } => "round_reset",
        }
    }
}
