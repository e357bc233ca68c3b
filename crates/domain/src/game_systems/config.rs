//! Rule configuration - cost tables and formula mappings.
//!
//! A `RuleConfig` is passed explicitly into every rule function. Lookups that
//! miss a table entry read as 0.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::entities::{AttackType, Species};
use crate::value_objects::Attribute;

/// Pool formula for one attack type: an attribute plus a skill id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttackFormula {
    pub attribute: Attribute,
    pub skill: String,
}

impl AttackFormula {
    pub fn new(attribute: Attribute, skill: impl Into<String>) -> Self {
        Self {
            attribute,
            skill: skill.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AttackFormulas {
    pub melee: AttackFormula,
    pub ranged: AttackFormula,
    pub ranged_thrown: AttackFormula,
    pub brawl: AttackFormula,
    pub martial: AttackFormula,
    pub natural: AttackFormula,
}

impl AttackFormulas {
    /// Formula for an attack. Thrown only matters for ranged attacks.
    pub fn formula_for(&self, attack_type: AttackType, thrown: bool) -> &AttackFormula {
        match attack_type {
            AttackType::Ranged if thrown => &self.ranged_thrown,
            AttackType::Ranged => &self.ranged,
            AttackType::Melee => &self.melee,
            AttackType::Brawl => &self.brawl,
            AttackType::Martial => &self.martial,
            AttackType::Natural => &self.natural,
        }
    }
}

impl Default for AttackFormulas {
    fn default() -> Self {
        Self {
            melee: AttackFormula::new(Attribute::Dexterity, "armes-cos-a-cos"),
            ranged: AttackFormula::new(Attribute::Dexterity, "armes-distancia"),
            ranged_thrown: AttackFormula::new(Attribute::Agility, "armes-distancia"),
            brawl: AttackFormula::new(Attribute::Strength, "barallar-se"),
            martial: AttackFormula::new(Attribute::Dexterity, "arts-marcials"),
            natural: AttackFormula::new(Attribute::Strength, "barallar-se"),
        }
    }
}

/// Content ids of the traits that change derived statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TraitIds {
    pub quick_reflexes: String,
    pub slow: String,
    pub natural_armor: String,
}

impl Default for TraitIds {
    fn default() -> Self {
        Self {
            quick_reflexes: "reflexos-rapids".to_string(),
            slow: "lent".to_string(),
            natural_armor: "armadura-natural".to_string(),
        }
    }
}

/// Every table the rules read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RuleConfig {
    /// Cost of one attribute by rating
    pub attribute_costs: BTreeMap<u8, i32>,
    pub species_costs: BTreeMap<Species, i32>,
    pub size_costs: BTreeMap<u8, i32>,
    pub constitution_costs: BTreeMap<u8, i32>,
    pub size_defense_modifiers: BTreeMap<u8, i32>,
    /// Cumulative skill cost indexed by level
    pub skill_cost_table: Vec<i32>,
    pub attack_formulas: AttackFormulas,
    pub trait_ids: TraitIds,
}

impl RuleConfig {
    pub fn attribute_cost(&self, rating: u8) -> i32 {
        self.attribute_costs.get(&rating).copied().unwrap_or(0)
    }

    pub fn species_cost(&self, species: Species) -> i32 {
        self.species_costs.get(&species).copied().unwrap_or(0)
    }

    pub fn size_cost(&self, size: u8) -> i32 {
        self.size_costs.get(&size).copied().unwrap_or(0)
    }

    pub fn constitution_cost(&self, constitution: u8) -> i32 {
        self.constitution_costs
            .get(&constitution)
            .copied()
            .unwrap_or(0)
    }

    pub fn size_defense_modifier(&self, size: u8) -> i32 {
        self.size_defense_modifiers
            .get(&size)
            .copied()
            .unwrap_or(0)
    }

    pub fn skill_cost(&self, level: u8) -> i32 {
        self.skill_cost_table
            .get(usize::from(level))
            .copied()
            .unwrap_or(0)
    }
}

impl Default for RuleConfig {
    fn default() -> Self {
        let build_costs: BTreeMap<u8, i32> =
            [(1, -20), (2, -10), (3, 0), (4, 10), (5, 20)].into_iter().collect();

        Self {
            attribute_costs: [(0, -5), (1, 0), (2, 10), (3, 20), (4, 30), (5, 50)]
                .into_iter()
                .collect(),
            species_costs: [
                (Species::Humanoid, 0),
                (Species::Animal, -15),
                (Species::Arthropod, 5),
                (Species::Construct, 10),
                (Species::Plant, 10),
                (Species::Incorporeal, 15),
                (Species::Mechanoid, 20),
                (Species::Cephalopod, 25),
            ]
            .into_iter()
            .collect(),
            size_costs: build_costs.clone(),
            constitution_costs: build_costs,
            size_defense_modifiers: [(1, 2), (2, 1), (3, 0), (4, -1), (5, -2)]
                .into_iter()
                .collect(),
            skill_cost_table: vec![0, 1, 3, 6, 10, 15, 21, 28, 36, 45, 55],
            attack_formulas: AttackFormulas::default(),
            trait_ids: TraitIds::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_carry_published_tables() {
        let config = RuleConfig::default();
        assert_eq!(config.attribute_cost(0), -5);
        assert_eq!(config.attribute_cost(5), 50);
        assert_eq!(config.species_cost(Species::Cephalopod), 25);
        assert_eq!(config.size_cost(1), -20);
        assert_eq!(config.constitution_cost(4), 10);
        assert_eq!(config.size_defense_modifier(5), -2);
        assert_eq!(config.skill_cost(10), 55);
    }

    #[test]
    fn missing_entries_read_as_zero() {
        let config = RuleConfig::default();
        assert_eq!(config.attribute_cost(9), 0);
        assert_eq!(config.skill_cost(11), 0);
        assert_eq!(config.size_defense_modifier(0), 0);
    }

    #[test]
    fn thrown_only_changes_ranged_formula() {
        let formulas = AttackFormulas::default();
        assert_eq!(
            formulas.formula_for(AttackType::Ranged, true).attribute,
            Attribute::Agility
        );
        assert_eq!(
            formulas.formula_for(AttackType::Melee, true).skill,
            "armes-cos-a-cos"
        );
    }

    #[test]
    fn partial_json_keeps_default_tables() {
        let config: RuleConfig =
            serde_json::from_str(r#"{ "skillCostTable": [0, 2, 4] }"#).unwrap();
        assert_eq!(config.skill_cost(2), 4);
        assert_eq!(config.attribute_cost(5), 50);
        assert_eq!(config.trait_ids.slow, "lent");
    }

    #[test]
    fn json_tables_use_string_keys() {
        let json = serde_json::to_value(RuleConfig::default()).unwrap();
        assert_eq!(json["sizeDefenseModifiers"]["1"], 2);
        assert_eq!(json["speciesCosts"]["animal"], -15);
        assert_eq!(json["attackFormulas"]["rangedThrown"]["attribute"], "AGI");
    }
}
