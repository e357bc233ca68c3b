//! Character rules use cases.
//!
//! Keeps an actor's cached health maxima in step with its derived profile
//! and applies damage, healing, equipment and trait changes.

mod error;

pub use error::CharacterError;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use forja_domain::{
    compute_derived, validate_trait, ActorProfile, CombatStats, DamageTrack, DerivedProfile,
    DomainEvent, FatigueLevel, Item, ItemId, RuleConfig, Trait, WoundLevel,
};

// =============================================================================
// Result Types
// =============================================================================

/// Health after damage or healing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    pub wounds: u32,
    pub fatigue: u32,
    pub wound_level: WoundLevel,
    pub fatigue_level: FatigueLevel,
    pub event: DomainEvent,
}

// =============================================================================
// Use Cases
// =============================================================================

/// Character rule operations bound to one rule configuration.
pub struct CharacterRules {
    config: Arc<RuleConfig>,
}

impl CharacterRules {
    pub fn new(config: Arc<RuleConfig>) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RuleConfig {
        &self.config
    }

    /// Derived values for the actor as it is now.
    pub fn derive(&self, profile: &ActorProfile) -> DerivedProfile {
        compute_derived(profile, &self.config)
    }

    /// Recompute derived values and copy the health maxima into the
    /// profile's cached pools.
    pub fn refresh(&self, profile: &mut ActorProfile) -> DerivedProfile {
        let derived = self.derive(profile);
        profile.wounds.max = derived.max_wounds;
        profile.fatigue.max = derived.max_fatigue;
        derived
    }

    /// Stats a combatant needs from this actor.
    pub fn combat_stats(&self, profile: &ActorProfile) -> CombatStats {
        CombatStats::from_profile(profile, &self.derive(profile))
    }

    /// Apply damage to the track(s) a weapon or effect names.
    pub fn apply_damage(
        &self,
        profile: &mut ActorProfile,
        amount: u32,
        track: DamageTrack,
    ) -> HealthReport {
        self.refresh(profile);
        let (wounds_added, fatigue_added) = profile.apply_damage(amount, track);
        let derived = self.derive(profile);

        tracing::info!(
            actor = %profile.name,
            amount,
            wounds_added,
            fatigue_added,
            wound_level = %derived.wound_level,
            fatigue_level = %derived.fatigue_level,
            "Damage applied"
        );

        self.report(
            profile,
            &derived,
            DomainEvent::ActorDamaged {
                actor_id: profile.id,
                wounds_added,
                fatigue_added,
            },
        )
    }

    pub fn heal(&self, profile: &mut ActorProfile, wounds: u32, fatigue: u32) -> HealthReport {
        let (wounds_removed, fatigue_removed) = profile.heal(wounds, fatigue);
        let derived = self.refresh(profile);
        tracing::debug!(actor = %profile.name, wounds_removed, fatigue_removed, "Healed");

        self.report(
            profile,
            &derived,
            DomainEvent::ActorHealed {
                actor_id: profile.id,
                wounds_removed,
                fatigue_removed,
            },
        )
    }

    /// Equip or unequip an armor or weapon and return the new derived values.
    pub fn set_equipped(
        &self,
        profile: &mut ActorProfile,
        item_id: ItemId,
        equipped: bool,
    ) -> Result<DerivedProfile, CharacterError> {
        if !profile.set_equipped(item_id, equipped) {
            return Err(CharacterError::NotEquippable(item_id));
        }
        Ok(self.refresh(profile))
    }

    /// Add a trait after checking species and incompatibility rules.
    pub fn add_trait(
        &self,
        profile: &mut ActorProfile,
        name: impl Into<String>,
        candidate: Trait,
    ) -> Result<DerivedProfile, CharacterError> {
        validate_trait(&candidate, profile)?;
        profile.items.push(Item::trait_item(name, candidate));
        Ok(self.refresh(profile))
    }

    fn report(
        &self,
        profile: &ActorProfile,
        derived: &DerivedProfile,
        event: DomainEvent,
    ) -> HealthReport {
        HealthReport {
            wounds: profile.wounds.value,
            fatigue: profile.fatigue.value,
            wound_level: derived.wound_level,
            fatigue_level: derived.fatigue_level,
            event,
        }
    }
}

#[cfg(test)]
mod tests {
    use forja_domain::{Armor, Attribute, DomainError, Skill, Species};

    use super::*;

    fn rules() -> CharacterRules {
        CharacterRules::new(Arc::new(RuleConfig::default()))
    }

    #[test]
    fn refresh_syncs_cached_maxima() {
        let mut profile = ActorProfile::new("Ogre").with_size(5).with_constitution(4);
        let derived = rules().refresh(&mut profile);
        assert_eq!(profile.wounds.max, 50);
        assert_eq!(profile.fatigue.max, 40);
        assert_eq!(derived.max_wounds, 50);
    }

    #[test]
    fn damage_reports_new_level() {
        let mut profile = ActorProfile::new("Aina").with_size(2);
        let report = rules().apply_damage(&mut profile, 7, DamageTrack::Wounds);

        assert_eq!(report.wounds, 7);
        assert_eq!(report.wound_level, WoundLevel::Wounded);
        assert_eq!(report.fatigue_level, FatigueLevel::Rested);
        assert_eq!(
            report.event,
            DomainEvent::ActorDamaged {
                actor_id: profile.id,
                wounds_added: 7,
                fatigue_added: 0
            }
        );
    }

    #[test]
    fn damage_saturates_at_derived_maximum() {
        // Cached max is larger than the derived one until refreshed.
        let mut profile = ActorProfile::new("Aina").with_size(1);
        let report = rules().apply_damage(&mut profile, 25, DamageTrack::FatigueAndWounds);
        assert_eq!(report.wounds, 10);
        assert_eq!(report.wound_level, WoundLevel::Incapacitated);
        assert_eq!(report.fatigue, 25);
    }

    #[test]
    fn healing_lowers_level() {
        let mut profile = ActorProfile::new("Aina");
        let rules = rules();
        rules.apply_damage(&mut profile, 20, DamageTrack::Fatigue);
        let report = rules.heal(&mut profile, 0, 18);
        assert_eq!(report.fatigue, 2);
        assert_eq!(report.fatigue_level, FatigueLevel::Weakened);
    }

    #[test]
    fn equipping_armor_changes_latency_and_protection() {
        let armor = Item::armor("Cota", Armor {
            protection: 3,
            latency_mod: 2,
            equipped: false,
        });
        let armor_id = armor.id;
        let mut profile = ActorProfile::new("Aina").with_item(armor);
        let rules = rules();
        let before = rules.derive(&profile);

        let after = rules.set_equipped(&mut profile, armor_id, true).unwrap();
        assert_eq!(after.latency, before.latency + 2);
        assert_eq!(after.protection, 3);
    }

    #[test]
    fn skills_cannot_be_equipped() {
        let skill = Item::skill("Arc", Skill::new("armes-distancia", Attribute::Dexterity, 1));
        let skill_id = skill.id;
        let mut profile = ActorProfile::new("Aina").with_item(skill);
        assert!(matches!(
            rules().set_equipped(&mut profile, skill_id, true),
            Err(CharacterError::NotEquippable(_))
        ));
    }

    #[test]
    fn forbidden_trait_is_not_added() {
        let mut profile = ActorProfile::new("Rusc").with_species(Species::Construct);
        let candidate = Trait {
            forbidden_species: vec![Species::Construct],
            ..Trait::flat("empatia", 5)
        };
        let err = rules()
            .add_trait(&mut profile, "Empatia", candidate)
            .unwrap_err();
        assert!(matches!(
            err,
            CharacterError::Domain(DomainError::Constraint(_))
        ));
        assert!(profile.traits().next().is_none());
    }

    #[test]
    fn quick_reflexes_raise_reaction() {
        let mut profile = ActorProfile::new("Aina");
        let derived = rules()
            .add_trait(&mut profile, "Reflexos", Trait::flat("reflexos-rapids", 10))
            .unwrap();
        assert_eq!(derived.reaction, 2);
        assert_eq!(rules().combat_stats(&profile).reaction, 2);
    }
}
