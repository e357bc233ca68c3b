//! Pool sizing, attack exchanges and trait legality.

use serde::{Deserialize, Serialize};

use crate::entities::{ActorProfile, AttackType, CombatStats, Skill, Trait};
use crate::value_objects::{compute_damage, Attribute, DamageParams, PoolOutcome};
use crate::DomainError;

use super::config::RuleConfig;

/// Dice for an attribute roll: the rating itself.
pub fn attribute_pool(profile: &ActorProfile, attribute: Attribute) -> u32 {
    u32::from(profile.attributes.get(attribute))
}

/// Dice for a skill roll: related attribute plus skill level.
pub fn skill_pool(profile: &ActorProfile, skill: &Skill) -> u32 {
    attribute_pool(profile, skill.related_attribute) + u32::from(skill.level)
}

/// Sized attack pool with the parts it was built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttackPool {
    pub dice: u32,
    pub attribute: Attribute,
    pub attribute_value: u8,
    pub skill_id: String,
    pub skill_value: u8,
}

/// Size an attack pool from the configured formula for the attack type.
///
/// The skill part is the level of the first owned skill with the formula's
/// skill id, or 0.
pub fn attack_pool(
    profile: &ActorProfile,
    attack_type: AttackType,
    thrown: bool,
    config: &RuleConfig,
) -> AttackPool {
    let formula = config.attack_formulas.formula_for(attack_type, thrown);
    let attribute_value = profile.attributes.get(formula.attribute);
    let skill_value = profile.skill_level(&formula.skill);

    AttackPool {
        dice: u32::from(attribute_value) + u32::from(skill_value),
        attribute: formula.attribute,
        attribute_value,
        skill_id: formula.skill.clone(),
        skill_value,
    }
}

/// Result of an attack roll against a defense roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeOutcome {
    pub is_hit: bool,
    pub damage: u32,
}

/// Resolve an attack: it hits when the attack has more fites than the defense.
pub fn resolve_exchange(
    attack: &PoolOutcome,
    defense: &PoolOutcome,
    base_damage: i32,
    defender: Option<&CombatStats>,
) -> ExchangeOutcome {
    let is_hit = attack.fites > defense.fites;
    let damage = compute_damage(&DamageParams {
        base_damage,
        attack_successes: attack.fites,
        defense_successes: defense.fites,
        protection: defender.map(|d| d.protection).unwrap_or(0),
        damage_reduction: defender.map(|d| d.damage_reduction).unwrap_or(0),
        is_hit,
    });
    ExchangeOutcome { is_hit, damage }
}

/// Check whether `candidate` may be taken by `profile`.
///
/// Advisory only; derived computation accepts any item list.
pub fn validate_trait(candidate: &Trait, profile: &ActorProfile) -> Result<(), DomainError> {
    if candidate.forbidden_species.contains(&profile.species) {
        return Err(DomainError::constraint(format!(
            "Trait '{}' is forbidden for species {}",
            candidate.trait_id, profile.species
        )));
    }

    let clash = profile.traits().find(|owned| {
        candidate.incompatible_with.contains(&owned.trait_id)
            || owned.incompatible_with.contains(&candidate.trait_id)
    });
    if let Some(owned) = clash {
        return Err(DomainError::constraint(format!(
            "Trait '{}' is incompatible with '{}'",
            candidate.trait_id, owned.trait_id
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Item, Species};
    use crate::ActorId;

    fn archer() -> ActorProfile {
        ActorProfile::new("Aina")
            .with_attribute(Attribute::Dexterity, 3)
            .with_attribute(Attribute::Agility, 2)
            .with_item(Item::skill(
                "Arc",
                Skill::new("armes-distancia", Attribute::Dexterity, 2),
            ))
    }

    fn outcome(fites: u32) -> PoolOutcome {
        PoolOutcome {
            fites,
            has_ones: false,
            is_pifia: false,
        }
    }

    #[test]
    fn skill_pool_adds_related_attribute() {
        let profile = archer();
        let skill = Skill::new("armes-distancia", Attribute::Dexterity, 2);
        assert_eq!(skill_pool(&profile, &skill), 5);
        assert_eq!(attribute_pool(&profile, Attribute::Agility), 2);
    }

    #[test]
    fn ranged_attack_uses_dexterity_and_thrown_uses_agility() {
        let config = RuleConfig::default();
        let profile = archer();

        let shot = attack_pool(&profile, AttackType::Ranged, false, &config);
        assert_eq!(shot.dice, 5);
        assert_eq!(shot.attribute, Attribute::Dexterity);

        let thrown = attack_pool(&profile, AttackType::Ranged, true, &config);
        assert_eq!(thrown.dice, 4);
        assert_eq!(thrown.attribute, Attribute::Agility);
        assert_eq!(thrown.skill_value, 2);
    }

    #[test]
    fn attack_without_skill_uses_attribute_only() {
        let pool = attack_pool(&archer(), AttackType::Brawl, false, &RuleConfig::default());
        assert_eq!(pool.skill_id, "barallar-se");
        assert_eq!(pool.skill_value, 0);
        assert_eq!(pool.dice, 1);
    }

    #[test]
    fn exchange_hits_only_on_more_fites() {
        let tie = resolve_exchange(&outcome(2), &outcome(2), 5, None);
        assert!(!tie.is_hit);
        assert_eq!(tie.damage, 0);

        let defender = CombatStats {
            actor_id: ActorId::new(),
            latency: 10,
            agility: 1,
            reaction: 1,
            defense: 1,
            protection: 2,
            damage_reduction: 1,
        };
        let hit = resolve_exchange(&outcome(4), &outcome(1), 3, Some(&defender));
        assert!(hit.is_hit);
        assert_eq!(hit.damage, 3);
    }

    #[test]
    fn forbidden_species_is_rejected() {
        let profile = ActorProfile::new("Rusc").with_species(Species::Construct);
        let candidate = Trait {
            forbidden_species: vec![Species::Construct],
            ..Trait::flat("empatia", 5)
        };
        assert!(matches!(
            validate_trait(&candidate, &profile),
            Err(DomainError::Constraint(_))
        ));
    }

    #[test]
    fn incompatibility_is_checked_both_ways() {
        let owned = Trait {
            incompatible_with: vec!["lent".to_string()],
            ..Trait::flat("reflexos-rapids", 10)
        };
        let profile = ActorProfile::new("Aina").with_item(Item::trait_item("Reflexos", owned));

        assert!(validate_trait(&Trait::flat("lent", -10), &profile).is_err());

        let declares_clash = Trait {
            incompatible_with: vec!["reflexos-rapids".to_string()],
            ..Trait::flat("maldestre", -5)
        };
        assert!(validate_trait(&declares_clash, &profile).is_err());
        assert!(validate_trait(&Trait::flat("ambidextre", 10), &profile).is_ok());
    }
}
