//! Domain Events
//!
//! Coarse-grained events representing significant state changes in the domain.
//! They are plain data; the engine returns them from its operations and never
//! dispatches them itself.

pub mod combat_events;

pub use combat_events::*;

use serde::{Deserialize, Serialize};

use crate::{ActorId, EncounterId};

/// Domain event for significant state changes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DomainEvent {
    Combat {
        encounter_id: EncounterId,
        event: CombatEvent,
    },
    ActorDamaged {
        actor_id: ActorId,
        wounds_added: u32,
        fatigue_added: u32,
    },
    ActorHealed {
        actor_id: ActorId,
        wounds_removed: u32,
        fatigue_removed: u32,
    },
}

impl DomainEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::Combat { event, .. } => event.event_type(),
            Self::ActorDamaged { .. } => "actor_damaged",
            Self::ActorHealed { .. } => "actor_healed",
        }
    }

    pub fn encounter_id(&self) -> Option<EncounterId> {
        match self {
            Self::Combat { encounter_id, .. } => Some(*encounter_id),
            Self::ActorDamaged { .. } | Self::ActorHealed { .. } => None,
        }
    }
}
