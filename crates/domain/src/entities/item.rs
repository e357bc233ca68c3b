//! Items owned by an actor.
//!
//! An item is one of six variants, each with its own fields. Variants that
//! affect derived statistics declare so through
//! [`crate::game_systems::capabilities::ContributesToDerived`]; nothing in the
//! derived engine inspects item identifiers directly.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::value_objects::{Attribute, Attributes, DamageFormula, DamageTrack};
use crate::{DomainError, ItemId};

use super::actor::Species;

/// An owned item: identity plus variant-specific data.
///
/// # Simple Data Struct
///
/// Any combination of field values is valid; the derived engine defaults
/// whatever it does not understand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    #[serde(flatten)]
    pub kind: ItemKind,
}

impl Item {
    pub fn new(name: impl Into<String>, kind: ItemKind) -> Self {
        Self {
            id: ItemId::new(),
            name: name.into(),
            kind,
        }
    }

    pub fn skill(name: impl Into<String>, skill: Skill) -> Self {
        Self::new(name, ItemKind::Skill(skill))
    }

    pub fn trait_item(name: impl Into<String>, data: Trait) -> Self {
        Self::new(name, ItemKind::Trait(data))
    }

    pub fn weapon(name: impl Into<String>, weapon: Weapon) -> Self {
        Self::new(name, ItemKind::Weapon(weapon))
    }

    pub fn armor(name: impl Into<String>, armor: Armor) -> Self {
        Self::new(name, ItemKind::Armor(armor))
    }

    pub fn artifact(name: impl Into<String>, artifact: Artifact) -> Self {
        Self::new(name, ItemKind::Artifact(artifact))
    }

    pub fn supernatural_effect(name: impl Into<String>, effect: SupernaturalEffect) -> Self {
        Self::new(name, ItemKind::SupernaturalEffect(effect))
    }

    pub fn as_skill(&self) -> Option<&Skill> {
        match &self.kind {
            ItemKind::Skill(skill) => Some(skill),
            _ => None,
        }
    }

    pub fn as_trait(&self) -> Option<&Trait> {
        match &self.kind {
            ItemKind::Trait(data) => Some(data),
            _ => None,
        }
    }

    pub fn as_weapon(&self) -> Option<&Weapon> {
        match &self.kind {
            ItemKind::Weapon(weapon) => Some(weapon),
            _ => None,
        }
    }
}

/// Variant-specific item data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "system", rename_all = "camelCase")]
pub enum ItemKind {
    Skill(Skill),
    Trait(Trait),
    Weapon(Weapon),
    Armor(Armor),
    Artifact(Artifact),
    SupernaturalEffect(SupernaturalEffect),
}

impl ItemKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            ItemKind::Skill(_) => "skill",
            ItemKind::Trait(_) => "trait",
            ItemKind::Weapon(_) => "weapon",
            ItemKind::Armor(_) => "armor",
            ItemKind::Artifact(_) => "artifact",
            ItemKind::SupernaturalEffect(_) => "supernaturalEffect",
        }
    }
}

// ──────────────────────────────────────────────────────────────────────────
// Skill
// ──────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillType {
    #[default]
    Basic,
    Restricted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Skill {
    /// Stable content identifier (e.g. "armes-distancia")
    pub skill_id: String,
    pub skill_type: SkillType,
    pub related_attribute: Attribute,
    pub level: u8,
    pub max_level: u8,
}

impl Default for Skill {
    fn default() -> Self {
        Self {
            skill_id: String::new(),
            skill_type: SkillType::Basic,
            related_attribute: Attribute::Strength,
            level: 0,
            max_level: 5,
        }
    }
}

impl Skill {
    pub fn new(skill_id: impl Into<String>, related_attribute: Attribute, level: u8) -> Self {
        Self {
            skill_id: skill_id.into(),
            related_attribute,
            level,
            ..Self::default()
        }
    }
}

// ──────────────────────────────────────────────────────────────────────────
// Trait
// ──────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraitType {
    #[default]
    Positive,
    Negative,
}

/// A character trait (advantage or disadvantage).
///
/// Cost is either flat, parametric (base + factor per level) or a chosen
/// variant cost; see [`Trait::computed_cost`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Trait {
    pub trait_id: String,
    pub trait_type: TraitType,
    pub category: String,
    pub cost: i32,
    pub is_parametric: bool,
    pub base_cost: f64,
    pub factor_cost: f64,
    pub max_level: u32,
    pub level: u32,
    pub variant_cost: i32,
    pub is_variable: bool,
    pub incompatible_with: Vec<String>,
    pub forbidden_species: Vec<Species>,
}

impl Default for Trait {
    fn default() -> Self {
        Self {
            trait_id: String::new(),
            trait_type: TraitType::Positive,
            category: "general".to_string(),
            cost: 0,
            is_parametric: false,
            base_cost: 0.0,
            factor_cost: 0.0,
            max_level: 0,
            level: 0,
            variant_cost: 0,
            is_variable: false,
            incompatible_with: Vec::new(),
            forbidden_species: Vec::new(),
        }
    }
}

impl Trait {
    /// A flat-cost trait.
    pub fn flat(trait_id: impl Into<String>, cost: i32) -> Self {
        Self {
            trait_id: trait_id.into(),
            cost,
            ..Self::default()
        }
    }

    /// A trait bought in levels.
    pub fn parametric(
        trait_id: impl Into<String>,
        base_cost: f64,
        factor_cost: f64,
        level: u32,
    ) -> Self {
        Self {
            trait_id: trait_id.into(),
            is_parametric: true,
            base_cost,
            factor_cost,
            level,
            ..Self::default()
        }
    }

    /// Effective point cost of the trait.
    ///
    /// Parametric traits with a level cost `round(base + factor * level)`
    /// (halves round up); variable traits with a chosen variant cost that
    /// variant; everything else the flat cost.
    pub fn computed_cost(&self) -> i32 {
        if self.is_parametric && self.level > 0 {
            let raw = self.base_cost + self.factor_cost * f64::from(self.level);
            (raw + 0.5).floor() as i32
        } else if self.is_variable && self.variant_cost != 0 {
            self.variant_cost
        } else {
            self.cost
        }
    }
}

// ──────────────────────────────────────────────────────────────────────────
// Weapon
// ──────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeaponType {
    Natural,
    #[default]
    Melee,
    Ranged,
}

/// How an attack is rolled; selects the attack formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttackType {
    #[default]
    Melee,
    Ranged,
    Natural,
    Brawl,
    Martial,
}

impl fmt::Display for AttackType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttackType::Melee => write!(f, "melee"),
            AttackType::Ranged => write!(f, "ranged"),
            AttackType::Natural => write!(f, "natural"),
            AttackType::Brawl => write!(f, "brawl"),
            AttackType::Martial => write!(f, "martial"),
        }
    }
}

impl FromStr for AttackType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "melee" => Ok(Self::Melee),
            "ranged" => Ok(Self::Ranged),
            "natural" => Ok(Self::Natural),
            "brawl" => Ok(Self::Brawl),
            "martial" => Ok(Self::Martial),
            _ => Err(DomainError::parse(format!("Unknown attack type: {}", s))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Weapon {
    pub weapon_type: WeaponType,
    pub attack_type: AttackType,
    /// Thrown ranged weapons roll with AGI instead of DES
    pub thrown: bool,
    pub latency_mod: i32,
    pub damage: DamageFormula,
    pub damage_track: DamageTrack,
    pub quantity: u32,
    pub equipped: bool,
}

impl Default for Weapon {
    fn default() -> Self {
        Self {
            weapon_type: WeaponType::Melee,
            attack_type: AttackType::Melee,
            thrown: false,
            latency_mod: 0,
            damage: DamageFormula::default(),
            damage_track: DamageTrack::Wounds,
            quantity: 1,
            equipped: false,
        }
    }
}

impl Weapon {
    pub fn new(attack_type: AttackType, damage: impl Into<String>) -> Self {
        Self {
            weapon_type: match attack_type {
                AttackType::Ranged => WeaponType::Ranged,
                AttackType::Natural => WeaponType::Natural,
                _ => WeaponType::Melee,
            },
            attack_type,
            damage: DamageFormula::new(damage),
            ..Self::default()
        }
    }

    /// Base damage of this weapon for the wielder's attributes.
    pub fn base_damage(&self, attributes: &Attributes) -> i32 {
        self.damage.evaluate(attributes)
    }
}

// ──────────────────────────────────────────────────────────────────────────
// Armor, artifacts and supernatural effects
// ──────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Armor {
    pub protection: i32,
    pub latency_mod: i32,
    pub equipped: bool,
}

impl Armor {
    pub fn equipped(protection: i32, latency_mod: i32) -> Self {
        Self {
            protection,
            latency_mod,
            equipped: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Artifact {
    pub cost: i32,
    pub protection: i32,
}

/// Supernatural gift required to wield an effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gift {
    Channeler,
    #[default]
    Magus,
    Psychic,
    Qi,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activation {
    Trivial,
    #[default]
    Normal,
    Complex,
    Ritual,
    Permanent,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SupernaturalEffect {
    pub cost: i32,
    pub required_gift: Gift,
    pub activation: Activation,
    pub difficulty: u32,
    /// Equilibrium spent per activation
    pub equilibrium_cost: u32,
    pub latency_mod: i32,
    pub damage_value: i32,
    pub damage_track: DamageTrack,
    pub healing_value: i32,
    pub protection: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_trait_costs_its_cost() {
        assert_eq!(Trait::flat("ambidextre", 10).computed_cost(), 10);
    }

    #[test]
    fn parametric_trait_rounds_half_up() {
        let t = Trait::parametric("armadura-natural", 2.0, 2.5, 3);
        assert_eq!(t.computed_cost(), 10); // 9.5
        let negative = Trait::parametric("deute", -1.0, -0.75, 2);
        assert_eq!(negative.computed_cost(), -2); // -2.5
    }

    #[test]
    fn parametric_without_level_falls_back_to_flat() {
        let t = Trait {
            cost: 7,
            ..Trait::parametric("armadura-natural", 5.0, 5.0, 0)
        };
        assert_eq!(t.computed_cost(), 7);
    }

    #[test]
    fn variable_trait_uses_variant_cost_when_set() {
        let chosen = Trait {
            is_variable: true,
            variant_cost: -15,
            ..Trait::flat("enemic", -5)
        };
        assert_eq!(chosen.computed_cost(), -15);

        let unchosen = Trait {
            is_variable: true,
            ..Trait::flat("enemic", -5)
        };
        assert_eq!(unchosen.computed_cost(), -5);
    }

    #[test]
    fn item_serializes_with_type_tag() {
        let item = Item::armor("Cuirassa", Armor::equipped(3, 1));
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["type"], "armor");
        assert_eq!(json["system"]["protection"], 3);

        let back: Item = serde_json::from_value(json).unwrap();
        assert_eq!(back, item);
    }

    #[test]
    fn weapon_base_damage_uses_wielder_attributes() {
        let weapon = Weapon::new(AttackType::Melee, "FOR+2");
        let attrs = Attributes::uniform(1).with(Attribute::Strength, 4);
        assert_eq!(weapon.base_damage(&attrs), 6);
    }
}
