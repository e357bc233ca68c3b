//! Derived-attribute engine.
//!
//! [`compute_derived`] turns an [`ActorProfile`] and its items into the
//! combat-usable values. It is a pure function of its inputs; nothing it
//! returns is written back into the profile.

use serde::{Deserialize, Serialize};

use crate::entities::ActorProfile;
use crate::value_objects::Attribute;

use super::capabilities::{Contribution, ContributesToDerived, CostCategory};
use super::condition::{FatigueLevel, WoundLevel};
use super::config::RuleConfig;

/// Base latency before size, agility and armor.
pub const BASE_LATENCY: i32 = 10;

/// Points spent per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointBreakdown {
    pub attributes: i32,
    pub species: i32,
    pub size: i32,
    pub constitution: i32,
    pub skills: i32,
    pub traits: i32,
    pub artifacts: i32,
    pub effects: i32,
}

impl PointBreakdown {
    pub fn total(&self) -> i32 {
        [
            self.attributes,
            self.species,
            self.size,
            self.constitution,
            self.skills,
            self.traits,
            self.artifacts,
            self.effects,
        ]
        .into_iter()
        .fold(0, i32::saturating_add)
    }

    fn book(&mut self, category: CostCategory, cost: i32) {
        let slot = match category {
            CostCategory::Skills => &mut self.skills,
            CostCategory::Traits => &mut self.traits,
            CostCategory::Artifacts => &mut self.artifacts,
            CostCategory::Effects => &mut self.effects,
        };
        *slot = slot.saturating_add(cost);
    }
}

/// Read-only view computed from an actor profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedProfile {
    pub max_wounds: u32,
    pub max_fatigue: u32,
    pub defense: i32,
    pub latency: u32,
    pub damage_reduction: i32,
    pub reaction: u32,
    pub protection: i32,
    pub spent_points: i32,
    pub available_points: i32,
    pub point_breakdown: PointBreakdown,
    pub wound_level: WoundLevel,
    pub fatigue_level: FatigueLevel,
}

/// Running sums of item contributions.
#[derive(Debug, Default)]
struct ContributionTotals {
    armor_latency: i32,
    protection: i32,
    reaction: i32,
    breakdown: PointBreakdown,
}

impl ContributionTotals {
    fn fold(mut self, contribution: Contribution) -> Self {
        match contribution {
            Contribution::ArmorLatency(value) => {
                self.armor_latency = self.armor_latency.saturating_add(value)
            }
            Contribution::Protection(value) => {
                self.protection = self.protection.saturating_add(value)
            }
            Contribution::Reaction(value) => self.reaction = self.reaction.saturating_add(value),
            Contribution::PointCost(category, cost) => self.breakdown.book(category, cost),
        }
        self
    }
}

/// `max(1, 10 + size - 2*AGI + armor_latency)`
pub fn latency_for(size: u8, agility: u8, armor_latency: i32) -> u32 {
    let raw = (BASE_LATENCY + i32::from(size) - 2 * i32::from(agility))
        .saturating_add(armor_latency);
    raw.max(1) as u32
}

/// Compute every derived value of an actor.
pub fn compute_derived(profile: &ActorProfile, config: &RuleConfig) -> DerivedProfile {
    let attributes = &profile.attributes;
    let size = profile.size();
    let constitution = profile.constitution();

    let totals = profile
        .items
        .iter()
        .flat_map(|item| item.contributions(config))
        .fold(ContributionTotals::default(), ContributionTotals::fold);

    let mut breakdown = totals.breakdown;
    breakdown.attributes = attributes
        .iter()
        .map(|(_, rating)| config.attribute_cost(rating))
        .fold(0, i32::saturating_add);
    breakdown.species = config.species_cost(profile.species);
    breakdown.size = config.size_cost(size);
    breakdown.constitution = config.constitution_cost(constitution);

    let max_wounds = u32::from(size) * 10;
    let max_fatigue = u32::from(constitution) * 10;
    let agility = attributes.get(Attribute::Agility);
    let spent_points = breakdown.total();

    DerivedProfile {
        max_wounds,
        max_fatigue,
        defense: i32::from(agility) + config.size_defense_modifier(size),
        latency: latency_for(size, agility, totals.armor_latency),
        damage_reduction: i32::from(attributes.get(Attribute::Strength)),
        reaction: totals.reaction.saturating_add(1).max(0) as u32,
        protection: totals.protection,
        spent_points,
        available_points: profile.total_points.saturating_sub(spent_points),
        point_breakdown: breakdown,
        wound_level: WoundLevel::classify(profile.wounds.value, max_wounds),
        fatigue_level: FatigueLevel::classify(profile.fatigue.value, max_fatigue),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Armor, Artifact, Item, Skill, Species, SupernaturalEffect, Trait};
    use crate::value_objects::Attributes;

    fn config() -> RuleConfig {
        RuleConfig::default()
    }

    #[test]
    fn latency_uses_size_agility_and_equipped_armor() {
        let profile = ActorProfile::new("Aina")
            .with_size(3)
            .with_attribute(Attribute::Agility, 2)
            .with_item(Item::armor("Cota", Armor::equipped(2, 1)))
            .with_item(Item::armor("Spare", Armor { latency_mod: 5, ..Armor::default() }));

        let derived = compute_derived(&profile, &config());
        assert_eq!(derived.latency, 10);
        assert_eq!(derived.protection, 2);
    }

    #[test]
    fn latency_never_below_one() {
        assert_eq!(latency_for(1, 5, -3), 1);
    }

    #[test]
    fn extreme_item_values_saturate() {
        let profile = ActorProfile::new("Colos")
            .with_item(Item::armor("Muralla", Armor::equipped(i32::MAX, i32::MAX)))
            .with_item(Item::armor("Escut", Armor::equipped(i32::MAX, 1)))
            .with_item(Item::artifact(
                "Corona",
                Artifact {
                    cost: i32::MAX,
                    protection: 0,
                },
            ))
            .with_item(Item::artifact(
                "Ceptre",
                Artifact {
                    cost: i32::MAX,
                    protection: 0,
                },
            ));

        let derived = compute_derived(&profile, &config());
        assert_eq!(derived.latency, i32::MAX as u32);
        assert_eq!(derived.protection, i32::MAX);
        assert_eq!(derived.point_breakdown.artifacts, i32::MAX);
        assert_eq!(derived.spent_points, i32::MAX);
        assert_eq!(derived.available_points, 100 - i32::MAX);
    }

    #[test]
    fn health_maxima_follow_size_and_constitution() {
        let profile = ActorProfile::new("Aina").with_size(4).with_constitution(2);
        let derived = compute_derived(&profile, &config());
        assert_eq!(derived.max_wounds, 40);
        assert_eq!(derived.max_fatigue, 20);
    }

    #[test]
    fn defense_adds_size_modifier() {
        let profile = ActorProfile::new("Aina")
            .with_size(1)
            .with_attribute(Attribute::Agility, 3);
        assert_eq!(compute_derived(&profile, &config()).defense, 5);

        let large = ActorProfile::new("Ogre")
            .with_size(5)
            .with_attribute(Attribute::Agility, 1);
        assert_eq!(compute_derived(&large, &config()).defense, -1);
    }

    #[test]
    fn reaction_counts_traits_and_floors_at_zero() {
        let quick = ActorProfile::new("Aina")
            .with_item(Item::trait_item("Reflexos", Trait::flat("reflexos-rapids", 10)));
        assert_eq!(compute_derived(&quick, &config()).reaction, 2);

        let slow = ActorProfile::new("Tortuga")
            .with_item(Item::trait_item("Lent", Trait::flat("lent", -10)))
            .with_item(Item::trait_item("Lent", Trait::flat("lent", -10)));
        assert_eq!(compute_derived(&slow, &config()).reaction, 0);
    }

    #[test]
    fn protection_sums_armor_natural_armor_and_artifacts() {
        let profile = ActorProfile::new("Aina")
            .with_item(Item::armor("Cota", Armor::equipped(2, 1)))
            .with_item(Item::trait_item(
                "Closca",
                Trait::parametric("armadura-natural", 0.0, 5.0, 3),
            ))
            .with_item(Item::artifact(
                "Amulet",
                Artifact {
                    cost: 5,
                    protection: 1,
                },
            ));
        assert_eq!(compute_derived(&profile, &config()).protection, 6);
    }

    #[test]
    fn damage_reduction_is_strength() {
        let profile = ActorProfile::new("Aina").with_attribute(Attribute::Strength, 4);
        assert_eq!(compute_derived(&profile, &config()).damage_reduction, 4);
    }

    #[test]
    fn point_breakdown_books_every_category() {
        let profile = ActorProfile::new("Aina")
            .with_species(Species::Arthropod)
            .with_size(4)
            .with_constitution(2)
            .with_attributes(Attributes::from_array([2, 3, 1, 1, 0, 1]))
            .with_item(Item::skill(
                "Arc",
                Skill::new("armes-distancia", Attribute::Dexterity, 3),
            ))
            .with_item(Item::trait_item(
                "Closca",
                Trait::parametric("armadura-natural", 2.0, 2.5, 3),
            ))
            .with_item(Item::artifact(
                "Amulet",
                Artifact {
                    cost: 7,
                    protection: 0,
                },
            ))
            .with_item(Item::supernatural_effect(
                "Flama",
                SupernaturalEffect {
                    cost: 12,
                    ..SupernaturalEffect::default()
                },
            ));

        let derived = compute_derived(&profile, &config());
        let breakdown = derived.point_breakdown;
        // 10 + 20 + 0 + 0 - 5 + 0
        assert_eq!(breakdown.attributes, 25);
        assert_eq!(breakdown.species, 5);
        assert_eq!(breakdown.size, 10);
        assert_eq!(breakdown.constitution, -10);
        assert_eq!(breakdown.skills, 6);
        assert_eq!(breakdown.traits, 10);
        assert_eq!(breakdown.artifacts, 7);
        assert_eq!(breakdown.effects, 12);
        assert_eq!(derived.spent_points, 65);
        assert_eq!(derived.available_points, 35);
    }

    #[test]
    fn condition_levels_use_derived_maxima() {
        let mut profile = ActorProfile::new("Aina").with_size(2);
        // Cached max is stale on purpose; the derived max (20) is used.
        profile.wounds.value = 10;
        profile.wounds.max = 100;
        let derived = compute_derived(&profile, &config());
        assert_eq!(derived.wound_level, WoundLevel::Wounded);
        assert_eq!(derived.fatigue_level, FatigueLevel::Rested);
    }

    #[test]
    fn missing_tables_default_to_zero() {
        let empty = RuleConfig {
            attribute_costs: Default::default(),
            species_costs: Default::default(),
            size_costs: Default::default(),
            constitution_costs: Default::default(),
            size_defense_modifiers: Default::default(),
            skill_cost_table: Vec::new(),
            ..RuleConfig::default()
        };
        let profile = ActorProfile::new("Aina").with_item(Item::skill(
            "Arc",
            Skill::new("armes-distancia", Attribute::Dexterity, 3),
        ));
        let derived = compute_derived(&profile, &empty);
        assert_eq!(derived.spent_points, 0);
        assert_eq!(derived.available_points, 100);
    }

    #[test]
    fn compute_is_pure() {
        let profile = ActorProfile::new("Aina").with_attribute(Attribute::Agility, 3);
        let before = profile.clone();
        let first = compute_derived(&profile, &config());
        let second = compute_derived(&profile, &config());
        assert_eq!(first, second);
        assert_eq!(profile, before);
    }
}
