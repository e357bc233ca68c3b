//! Combatant - an actor's per-encounter combat state.
//!
//! Round state (declared action, clock position, reactions used) is a
//! first-class part of the struct with an explicit reset at round end.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::game_systems::DerivedProfile;
use crate::value_objects::Attribute;
use crate::{ActorId, CombatantId, DomainError};

use super::actor::ActorProfile;

/// Latency assumed for a combatant without linked actor stats.
pub const DEFAULT_LATENCY: u32 = 10;

/// Which faction a combatant fights for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    #[default]
    Players,
    Antagonists,
}

impl Side {
    pub fn opposing(&self) -> Side {
        match self {
            Side::Players => Side::Antagonists,
            Side::Antagonists => Side::Players,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Players => write!(f, "players"),
            Side::Antagonists => write!(f, "antagonists"),
        }
    }
}

impl FromStr for Side {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "players" => Ok(Self::Players),
            "antagonists" => Ok(Self::Antagonists),
            _ => Err(DomainError::parse(format!("Unknown side: {}", s))),
        }
    }
}

/// Kind of action declared for a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    Attack,
    DefendSelf,
    DefendAlly,
    Movement,
    Other,
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionType::Attack => write!(f, "attack"),
            ActionType::DefendSelf => write!(f, "defend_self"),
            ActionType::DefendAlly => write!(f, "defend_ally"),
            ActionType::Movement => write!(f, "movement"),
            ActionType::Other => write!(f, "other"),
        }
    }
}

impl FromStr for ActionType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "attack" => Ok(Self::Attack),
            "defend_self" => Ok(Self::DefendSelf),
            "defend_ally" => Ok(Self::DefendAlly),
            "movement" => Ok(Self::Movement),
            "other" => Ok(Self::Other),
            _ => Err(DomainError::parse(format!("Unknown action type: {}", s))),
        }
    }
}

/// An action committed to during declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeclaredAction {
    pub action_type: ActionType,
    #[serde(default)]
    pub latency_modifier: i32,
    #[serde(default)]
    pub target_id: Option<CombatantId>,
    #[serde(default)]
    pub description: Option<String>,
}

impl DeclaredAction {
    pub fn new(action_type: ActionType, latency_modifier: i32) -> Self {
        Self {
            action_type,
            latency_modifier,
            target_id: None,
            description: None,
        }
    }

    pub fn targeting(mut self, target_id: CombatantId) -> Self {
        self.target_id = Some(target_id);
        self
    }

    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Where a combatant is within the current round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundPhase {
    #[default]
    Undeclared,
    Declared,
    Resolving,
    Resolved,
}

impl fmt::Display for RoundPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundPhase::Undeclared => write!(f, "Undeclared"),
            RoundPhase::Declared => write!(f, "Declared"),
            RoundPhase::Resolving => write!(f, "Resolving"),
            RoundPhase::Resolved => write!(f, "Resolved"),
        }
    }
}

/// Snapshot of the actor statistics the scheduler and damage helper read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombatStats {
    pub actor_id: ActorId,
    pub latency: u32,
    pub agility: u8,
    pub reaction: u32,
    pub defense: i32,
    pub protection: i32,
    pub damage_reduction: i32,
}

impl CombatStats {
    pub fn from_profile(profile: &ActorProfile, derived: &DerivedProfile) -> Self {
        Self {
            actor_id: profile.id,
            latency: derived.latency,
            agility: profile.attributes.get(Attribute::Agility),
            reaction: derived.reaction,
            defense: derived.defense,
            protection: derived.protection,
            damage_reduction: derived.damage_reduction,
        }
    }
}

/// A participant in an encounter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Combatant {
    pub id: CombatantId,
    pub name: String,
    pub side: Side,
    /// None when no actor is linked; reads fall back to defaults
    pub stats: Option<CombatStats>,
    pub defeated: bool,
    phase: RoundPhase,
    declared_action: Option<DeclaredAction>,
    position: Option<i32>,
    reactions_used: u32,
}

impl Combatant {
    pub fn new(id: CombatantId, name: impl Into<String>, side: Side) -> Self {
        Self {
            id,
            name: name.into(),
            side,
            stats: None,
            defeated: false,
            phase: RoundPhase::Undeclared,
            declared_action: None,
            position: None,
            reactions_used: 0,
        }
    }

    pub fn with_stats(mut self, stats: CombatStats) -> Self {
        self.stats = Some(stats);
        self
    }

    // ──────────────────────────────────────────────────────────────────────────
    // Read accessors
    // ──────────────────────────────────────────────────────────────────────────

    pub fn latency(&self) -> u32 {
        self.stats.map(|s| s.latency).unwrap_or(DEFAULT_LATENCY)
    }

    pub fn agility(&self) -> u8 {
        self.stats.map(|s| s.agility).unwrap_or(0)
    }

    pub fn max_reactions(&self) -> u32 {
        self.stats.map(|s| s.reaction).unwrap_or(1)
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn declared_action(&self) -> Option<&DeclaredAction> {
        self.declared_action.as_ref()
    }

    pub fn has_declared(&self) -> bool {
        self.declared_action.is_some()
    }

    /// Remaining time units before the declared action resolves.
    pub fn position(&self) -> Option<i32> {
        self.position
    }

    pub fn reactions_used(&self) -> u32 {
        self.reactions_used
    }

    /// Reactions left this round; 0 once the budget is exceeded.
    pub fn reactions_remaining(&self) -> u32 {
        self.max_reactions().saturating_sub(self.reactions_used)
    }

    pub fn is_over_reaction_budget(&self) -> bool {
        self.reactions_used > self.max_reactions()
    }

    // ──────────────────────────────────────────────────────────────────────────
    // Round transitions
    // ──────────────────────────────────────────────────────────────────────────

    /// Undeclared -> Declared. Places the combatant on the clock at
    /// `max(1, latency + latency_modifier)` and returns that position.
    pub fn declare_action(&mut self, action: DeclaredAction) -> Result<i32, DomainError> {
        if self.phase != RoundPhase::Undeclared {
            return Err(DomainError::invalid_state_transition(format!(
                "{} -> {}",
                self.phase,
                RoundPhase::Declared
            )));
        }
        let position = crate::game_systems::action_position(self.latency(), action.latency_modifier);
        self.declared_action = Some(action);
        self.position = Some(position);
        self.phase = RoundPhase::Declared;
        Ok(position)
    }

    /// Declared -> Resolving.
    pub fn begin_resolving(&mut self) -> Result<(), DomainError> {
        self.transition(RoundPhase::Declared, RoundPhase::Resolving)
    }

    /// Resolving -> Resolved.
    pub fn finish_resolving(&mut self) -> Result<(), DomainError> {
        self.transition(RoundPhase::Resolving, RoundPhase::Resolved)
    }

    fn transition(&mut self, from: RoundPhase, to: RoundPhase) -> Result<(), DomainError> {
        if self.phase != from {
            return Err(DomainError::invalid_state_transition(format!(
                "{} -> {}",
                self.phase, to
            )));
        }
        self.phase = to;
        Ok(())
    }

    /// Move on the clock without changing phase (used by clock advance).
    pub fn set_position(&mut self, position: i32) {
        self.position = Some(position);
    }

    /// Record one reaction. The budget is not enforced here; callers check
    /// [`Combatant::reactions_remaining`] first. Returns the new count.
    pub fn use_reaction(&mut self) -> u32 {
        self.reactions_used += 1;
        self.reactions_used
    }

    /// Back to Undeclared for a new round. Clears the declared action and the
    /// reactions used; the clock position is kept.
    pub fn reset_round(&mut self) {
        self.declared_action = None;
        self.reactions_used = 0;
        self.phase = RoundPhase::Undeclared;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn stats(latency: u32, agility: u8, reaction: u32) -> CombatStats {
        CombatStats {
            actor_id: ActorId::from_uuid(Uuid::nil()),
            latency,
            agility,
            reaction,
            defense: 0,
            protection: 0,
            damage_reduction: 0,
        }
    }

    fn combatant(latency: u32) -> Combatant {
        Combatant::new(CombatantId::new(), "Bandit", Side::Antagonists)
            .with_stats(stats(latency, 2, 1))
    }

    #[test]
    fn declare_sets_position_from_latency_and_modifier() {
        let mut c = combatant(8);
        let position = c
            .declare_action(DeclaredAction::new(ActionType::Attack, 3))
            .unwrap();
        assert_eq!(position, 11);
        assert_eq!(c.position(), Some(11));
        assert_eq!(c.phase(), RoundPhase::Declared);
    }

    #[test]
    fn declare_position_never_below_one() {
        let mut c = combatant(2);
        let position = c
            .declare_action(DeclaredAction::new(ActionType::Movement, -5))
            .unwrap();
        assert_eq!(position, 1);
    }

    #[test]
    fn unlinked_combatant_uses_default_latency() {
        let mut c = Combatant::new(CombatantId::new(), "Shade", Side::Players);
        assert_eq!(c.max_reactions(), 1);
        let position = c
            .declare_action(DeclaredAction::new(ActionType::Other, 0))
            .unwrap();
        assert_eq!(position, DEFAULT_LATENCY as i32);
    }

    #[test]
    fn second_declaration_is_rejected() {
        let mut c = combatant(8);
        c.declare_action(DeclaredAction::new(ActionType::Attack, 0))
            .unwrap();
        let err = c
            .declare_action(DeclaredAction::new(ActionType::DefendSelf, 0))
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidStateTransition(_)));
    }

    #[test]
    fn phases_advance_in_order() {
        let mut c = combatant(8);
        assert!(c.begin_resolving().is_err());
        c.declare_action(DeclaredAction::new(ActionType::Attack, 0))
            .unwrap();
        assert!(c.finish_resolving().is_err());
        c.begin_resolving().unwrap();
        c.finish_resolving().unwrap();
        assert_eq!(c.phase(), RoundPhase::Resolved);
    }

    #[test]
    fn reactions_are_recorded_past_the_budget() {
        let mut c = combatant(8);
        assert_eq!(c.use_reaction(), 1);
        assert_eq!(c.reactions_remaining(), 0);
        assert!(!c.is_over_reaction_budget());

        assert_eq!(c.use_reaction(), 2);
        assert_eq!(c.reactions_used(), 2);
        assert!(c.is_over_reaction_budget());
    }

    #[test]
    fn reset_clears_round_state_but_keeps_position() {
        let mut c = combatant(8);
        c.declare_action(DeclaredAction::new(ActionType::Attack, 0))
            .unwrap();
        c.use_reaction();
        c.reset_round();

        assert_eq!(c.phase(), RoundPhase::Undeclared);
        assert!(c.declared_action().is_none());
        assert_eq!(c.reactions_used(), 0);
        assert_eq!(c.position(), Some(8));
    }

    #[test]
    fn side_round_trips_through_strings() {
        assert_eq!("antagonists".parse::<Side>(), Ok(Side::Antagonists));
        assert_eq!(Side::Players.opposing(), Side::Antagonists);
        assert_eq!(ActionType::DefendAlly.to_string(), "defend_ally");
    }
}
