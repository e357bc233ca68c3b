//! Encounter use cases - the per-round combat tracker.
//!
//! Drives every combatant through Undeclared -> Declared -> Resolving ->
//! Resolved and back, using the latency clock from the domain. All state is
//! plain data in [`EncounterState`]; the tracker only adds the random source
//! for declaration tie-breaks and generated ids.

mod error;

pub use error::EncounterError;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use forja_domain::{
    advance_clock, declaration_order, initiative_order, resolve_exchange, valid_targets,
    ActionType, ActorProfile, ClockAdvance, ClockPositions, CombatEvent, CombatStats, Combatant,
    CombatantId, DeclaredAction, DerivedProfile, DomainError, DomainEvent, EncounterId, RoundPhase,
    Side,
};

use crate::infrastructure::ports::RandomPort;
use crate::use_cases::roll::{AttackRoll, PoolRoll};

/// Caller-owned encounter data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncounterState {
    pub id: EncounterId,
    /// Starts at 1 and increments on every round reset
    pub round: u32,
    /// In insertion order
    pub combatants: Vec<Combatant>,
}

impl EncounterState {
    pub fn new(id: EncounterId) -> Self {
        Self {
            id,
            round: 1,
            combatants: Vec::new(),
        }
    }
}

/// Combat tracker for one encounter.
pub struct CombatTracker {
    state: EncounterState,
    random: Arc<dyn RandomPort>,
}

impl CombatTracker {
    /// Start a new, empty encounter.
    pub fn new(random: Arc<dyn RandomPort>) -> Self {
        let id = EncounterId::from_uuid(random.gen_uuid());
        tracing::info!(encounter_id = %id, "Encounter started");
        Self {
            state: EncounterState::new(id),
            random,
        }
    }

    /// Resume an encounter from saved state.
    pub fn from_state(state: EncounterState, random: Arc<dyn RandomPort>) -> Self {
        Self { state, random }
    }

    pub fn state(&self) -> &EncounterState {
        &self.state
    }

    pub fn into_state(self) -> EncounterState {
        self.state
    }

    pub fn id(&self) -> EncounterId {
        self.state.id
    }

    pub fn round(&self) -> u32 {
        self.state.round
    }

    pub fn combatant(&self, id: CombatantId) -> Option<&Combatant> {
        self.state.combatants.iter().find(|c| c.id == id)
    }

    // =========================================================================
    // Roster
    // =========================================================================

    pub fn add_combatant(&mut self, combatant: Combatant) -> Result<CombatEvent, EncounterError> {
        if self.combatant(combatant.id).is_some() {
            return Err(EncounterError::DuplicateCombatant(combatant.id));
        }
        tracing::debug!(
            combatant_id = %combatant.id,
            name = %combatant.name,
            side = %combatant.side,
            "Combatant joined"
        );
        let event = CombatEvent::CombatantJoined {
            combatant_id: combatant.id,
            side: combatant.side,
        };
        self.state.combatants.push(combatant);
        Ok(event)
    }

    /// Add an actor with stats taken from its derived profile.
    pub fn add_actor(
        &mut self,
        profile: &ActorProfile,
        derived: &DerivedProfile,
        side: Side,
    ) -> Result<CombatantId, EncounterError> {
        let id = CombatantId::from_uuid(self.random.gen_uuid());
        let combatant = Combatant::new(id, profile.name.clone(), side)
            .with_stats(CombatStats::from_profile(profile, derived));
        self.add_combatant(combatant)?;
        Ok(id)
    }

    pub fn remove_combatant(&mut self, id: CombatantId) -> Result<Combatant, EncounterError> {
        let index = self.index_of(id)?;
        tracing::debug!(combatant_id = %id, "Combatant removed");
        Ok(self.state.combatants.remove(index))
    }

    /// Flip the defeated flag. Defeated combatants neither declare nor can
    /// be targeted.
    pub fn toggle_defeated(&mut self, id: CombatantId) -> Result<CombatEvent, EncounterError> {
        let combatant = self.combatant_mut(id)?;
        combatant.defeated = !combatant.defeated;
        Ok(CombatEvent::DefeatedToggled {
            combatant_id: id,
            defeated: combatant.defeated,
        })
    }

    // =========================================================================
    // Declaration
    // =========================================================================

    /// Who still has to declare, slowest first.
    pub fn declaration_order(&self) -> Vec<CombatantId> {
        declaration_order(&self.state.combatants, || {
            u32::try_from(self.random.gen_range(0, i32::MAX)).unwrap_or(0)
        })
    }

    /// Combatants `actor` may target with `action_type`.
    pub fn valid_targets(
        &self,
        actor: CombatantId,
        action_type: ActionType,
    ) -> Result<Vec<CombatantId>, EncounterError> {
        let side = self.find(actor)?.side;
        Ok(valid_targets(&self.state.combatants, side, action_type))
    }

    /// Commit `id` to an action and place it on the clock.
    pub fn declare(
        &mut self,
        id: CombatantId,
        action: DeclaredAction,
    ) -> Result<CombatEvent, EncounterError> {
        let actor = self.find(id)?;
        if actor.has_declared() {
            return Err(EncounterError::AlreadyDeclared(id));
        }
        if let Some(target) = action.target_id {
            let allowed = valid_targets(&self.state.combatants, actor.side, action.action_type);
            if !allowed.contains(&target) {
                return Err(EncounterError::InvalidTarget {
                    actor: id,
                    target,
                    action_type: action.action_type,
                });
            }
        }

        let action_type = action.action_type;
        let target_id = action.target_id;
        let position = self.combatant_mut(id)?.declare_action(action)?;
        tracing::debug!(combatant_id = %id, %action_type, position, "Action declared");

        Ok(CombatEvent::ActionDeclared {
            combatant_id: id,
            action_type,
            position,
            target_id,
        })
    }

    // =========================================================================
    // Clock
    // =========================================================================

    /// Clock positions of declared actions that have not started resolving.
    pub fn clock_positions(&self) -> ClockPositions {
        self.state
            .combatants
            .iter()
            .filter(|c| c.phase() == RoundPhase::Declared)
            .filter_map(|c| c.position().map(|position| (c.id, position)))
            .collect()
    }

    /// Advance the clock to the next pending action and mark the combatants
    /// that reach it as resolving.
    pub fn advance(&mut self) -> Result<ClockAdvance, EncounterError> {
        let advance = advance_clock(&self.clock_positions());

        for (id, position) in advance.positions.iter() {
            self.combatant_mut(id)?.set_position(position);
        }
        for id in &advance.resolving {
            self.combatant_mut(*id)?.begin_resolving()?;
        }

        if !advance.resolving.is_empty() {
            tracing::info!(
                encounter_id = %self.state.id,
                elapsed = advance.elapsed,
                resolving = advance.resolving.len(),
                "Clock advanced"
            );
        }
        Ok(advance)
    }

    /// Tag a combat event with this encounter's id.
    pub fn domain_event(&self, event: CombatEvent) -> DomainEvent {
        DomainEvent::Combat {
            encounter_id: self.state.id,
            event,
        }
    }

    /// Event for the last clock advance, for callers that log events.
    pub fn clock_event(advance: &ClockAdvance) -> CombatEvent {
        CombatEvent::ClockAdvanced {
            elapsed: advance.elapsed,
            resolving: advance.resolving.clone(),
        }
    }

    // =========================================================================
    // Resolution
    // =========================================================================

    /// Resolve a resolving attacker's attack against `defender`.
    ///
    /// The defender must be the declared target when one was named. Damage
    /// uses the defender's protection and damage reduction. The attacker ends
    /// `Resolved`; applying the damage to the defender's actor is up to the
    /// caller.
    pub fn resolve_attack(
        &mut self,
        attacker: CombatantId,
        defender: CombatantId,
        attack: &AttackRoll,
        defense: &PoolRoll,
    ) -> Result<CombatEvent, EncounterError> {
        let attacker_state = self.find(attacker)?;
        let declared = attacker_state
            .declared_action()
            .filter(|action| action.action_type == ActionType::Attack)
            .ok_or_else(|| {
                DomainError::validation(format!(
                    "Combatant {} has not declared an attack",
                    attacker
                ))
            })?;
        let off_target = declared.target_id.is_some_and(|target| target != defender);
        let allowed = valid_targets(&self.state.combatants, attacker_state.side, ActionType::Attack);
        if off_target || !allowed.contains(&defender) {
            return Err(EncounterError::InvalidTarget {
                actor: attacker,
                target: defender,
                action_type: ActionType::Attack,
            });
        }

        let defender_stats = self.find(defender)?.stats;
        let outcome = resolve_exchange(
            &attack.roll.outcome(),
            &defense.outcome(),
            attack.base_damage,
            defender_stats.as_ref(),
        );
        self.combatant_mut(attacker)?.finish_resolving()?;

        tracing::info!(
            attacker = %attacker,
            defender = %defender,
            attack_fites = attack.roll.fites,
            defense_fites = defense.fites,
            is_hit = outcome.is_hit,
            damage = outcome.damage,
            "Attack resolved"
        );

        Ok(CombatEvent::AttackResolved {
            attacker_id: attacker,
            defender_id: defender,
            attack_fites: attack.roll.fites,
            defense_fites: defense.fites,
            is_hit: outcome.is_hit,
            damage: outcome.damage,
            damage_track: attack.damage_track,
        })
    }

    /// Finish a resolving non-attack action.
    pub fn complete(&mut self, id: CombatantId) -> Result<CombatEvent, EncounterError> {
        self.combatant_mut(id)?.finish_resolving()?;
        tracing::debug!(combatant_id = %id, "Action completed");
        Ok(CombatEvent::ActionCompleted { combatant_id: id })
    }

    /// Record a reaction. Going over the budget is logged, not rejected;
    /// callers check [`Combatant::reactions_remaining`] first.
    pub fn use_reaction(&mut self, id: CombatantId) -> Result<CombatEvent, EncounterError> {
        let combatant = self.combatant_mut(id)?;
        let reactions_used = combatant.use_reaction();
        let over_budget = combatant.is_over_reaction_budget();
        if over_budget {
            tracing::warn!(
                combatant_id = %id,
                reactions_used,
                max_reactions = combatant.max_reactions(),
                "Reaction used past budget"
            );
        }
        Ok(CombatEvent::ReactionUsed {
            combatant_id: id,
            reactions_used,
            over_budget,
        })
    }

    /// Start the next round: every combatant back to undeclared.
    pub fn reset_round(&mut self) -> CombatEvent {
        for combatant in &mut self.state.combatants {
            combatant.reset_round();
        }
        self.state.round += 1;
        tracing::info!(encounter_id = %self.state.id, round = self.state.round, "Round started");
        CombatEvent::RoundReset {
            round: self.state.round,
        }
    }

    /// Display order: fastest first.
    pub fn initiative_order(&self) -> Vec<CombatantId> {
        initiative_order(&self.state.combatants)
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn index_of(&self, id: CombatantId) -> Result<usize, EncounterError> {
        self.state
            .combatants
            .iter()
            .position(|c| c.id == id)
            .ok_or(EncounterError::CombatantNotFound(id))
    }

    fn find(&self, id: CombatantId) -> Result<&Combatant, EncounterError> {
        self.combatant(id)
            .ok_or(EncounterError::CombatantNotFound(id))
    }

    fn combatant_mut(&mut self, id: CombatantId) -> Result<&mut Combatant, EncounterError> {
        self.state
            .combatants
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(EncounterError::CombatantNotFound(id))
    }
}
