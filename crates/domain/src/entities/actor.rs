//! Actor profile - the raw point-buy choices and owned items of a character.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::value_objects::{Attribute, Attributes, DamageTrack};
use crate::{ActorId, DomainError};

use super::item::{Item, ItemKind, Skill, Trait};

/// Species of an actor; each carries a point cost in the rule config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Species {
    #[default]
    Humanoid,
    Animal,
    Arthropod,
    Construct,
    Plant,
    Incorporeal,
    Mechanoid,
    Cephalopod,
}

impl Species {
    pub const ALL: [Species; 8] = [
        Species::Humanoid,
        Species::Animal,
        Species::Arthropod,
        Species::Construct,
        Species::Plant,
        Species::Incorporeal,
        Species::Mechanoid,
        Species::Cephalopod,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Species::Humanoid => "humanoid",
            Species::Animal => "animal",
            Species::Arthropod => "arthropod",
            Species::Construct => "construct",
            Species::Plant => "plant",
            Species::Incorporeal => "incorporeal",
            Species::Mechanoid => "mechanoid",
            Species::Cephalopod => "cephalopod",
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Species {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Species::ALL
            .iter()
            .copied()
            .find(|species| species.as_str() == s)
            .ok_or_else(|| DomainError::parse(format!("Unknown species: {}", s)))
    }
}

/// A current/maximum pair (wounds, fatigue, equilibrium).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Pool {
    pub value: u32,
    pub max: u32,
}

impl Pool {
    pub fn new(value: u32, max: u32) -> Self {
        Self { value, max }
    }

    /// Add to the pool, saturating at `max`. Returns the amount actually added.
    pub fn fill(&mut self, amount: u32) -> u32 {
        let before = self.value;
        self.value = self.value.saturating_add(amount).min(self.max.max(before));
        self.value - before
    }

    /// Remove from the pool, stopping at 0. Returns the amount actually removed.
    pub fn drain(&mut self, amount: u32) -> u32 {
        let before = self.value;
        self.value = self.value.saturating_sub(amount);
        before - self.value
    }
}

/// Lowest and highest value for size and constitution.
pub const MIN_BUILD: u8 = 1;
pub const MAX_BUILD: u8 = 5;

fn default_build() -> u8 {
    3
}

/// An actor's base sheet.
///
/// Derived values (defense, latency, protection, point balance, health tiers)
/// are never stored here as source of truth; they come from
/// [`crate::game_systems::compute_derived`]. The `max` of the wound and fatigue
/// pools is a cached copy refreshed by callers from the derived profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorProfile {
    pub id: ActorId,
    pub name: String,
    #[serde(default)]
    pub species: Species,
    #[serde(default = "default_build")]
    size: u8,
    #[serde(default = "default_build")]
    constitution: u8,
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(default)]
    pub wounds: Pool,
    #[serde(default)]
    pub fatigue: Pool,
    pub total_points: i32,
    #[serde(default)]
    pub equilibrium: Pool,
    #[serde(default)]
    pub items: Vec<Item>,
}

impl ActorProfile {
    /// A medium humanoid with every attribute at 1 and 100 points to spend.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ActorId::new(),
            name: name.into(),
            species: Species::Humanoid,
            size: 3,
            constitution: 3,
            attributes: Attributes::default(),
            wounds: Pool::new(0, 30),
            fatigue: Pool::new(0, 30),
            total_points: 100,
            equilibrium: Pool::default(),
            items: Vec::new(),
        }
    }

    // ──────────────────────────────────────────────────────────────────────────
    // Build accessors (size and constitution are kept in 1..=5)
    // ──────────────────────────────────────────────────────────────────────────

    /// Size rating; out-of-range stored values read as the nearest bound.
    pub fn size(&self) -> u8 {
        self.size.clamp(MIN_BUILD, MAX_BUILD)
    }

    /// Constitution rating; out-of-range stored values read as the nearest bound.
    pub fn constitution(&self) -> u8 {
        self.constitution.clamp(MIN_BUILD, MAX_BUILD)
    }

    pub fn set_size(&mut self, size: u8) {
        self.size = size.clamp(MIN_BUILD, MAX_BUILD);
    }

    pub fn set_constitution(&mut self, constitution: u8) {
        self.constitution = constitution.clamp(MIN_BUILD, MAX_BUILD);
    }

    // ──────────────────────────────────────────────────────────────────────────
    // Builder-style methods
    // ──────────────────────────────────────────────────────────────────────────

    pub fn with_species(mut self, species: Species) -> Self {
        self.species = species;
        self
    }

    pub fn with_size(mut self, size: u8) -> Self {
        self.set_size(size);
        self
    }

    pub fn with_constitution(mut self, constitution: u8) -> Self {
        self.set_constitution(constitution);
        self
    }

    pub fn with_attribute(mut self, attribute: Attribute, rating: u8) -> Self {
        self.attributes.set(attribute, rating);
        self
    }

    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn with_total_points(mut self, total_points: i32) -> Self {
        self.total_points = total_points;
        self
    }

    pub fn with_item(mut self, item: Item) -> Self {
        self.items.push(item);
        self
    }

    // ──────────────────────────────────────────────────────────────────────────
    // Item queries
    // ──────────────────────────────────────────────────────────────────────────

    pub fn skills(&self) -> impl Iterator<Item = &Skill> {
        self.items.iter().filter_map(Item::as_skill)
    }

    pub fn traits(&self) -> impl Iterator<Item = &Trait> {
        self.items.iter().filter_map(Item::as_trait)
    }

    /// Level of the first owned skill with this content id, 0 when absent.
    pub fn skill_level(&self, skill_id: &str) -> u8 {
        self.skills()
            .find(|skill| skill.skill_id == skill_id)
            .map(|skill| skill.level)
            .unwrap_or(0)
    }

    pub fn has_trait(&self, trait_id: &str) -> bool {
        self.traits().any(|t| t.trait_id == trait_id)
    }

    /// Set the equipped flag of an armor or weapon. Returns false when the
    /// item is missing or cannot be equipped.
    pub fn set_equipped(&mut self, item_id: crate::ItemId, equipped: bool) -> bool {
        match self.items.iter_mut().find(|item| item.id == item_id) {
            Some(Item {
                kind: ItemKind::Armor(armor),
                ..
            }) => {
                armor.equipped = equipped;
                true
            }
            Some(Item {
                kind: ItemKind::Weapon(weapon),
                ..
            }) => {
                weapon.equipped = equipped;
                true
            }
            _ => false,
        }
    }

    // ──────────────────────────────────────────────────────────────────────────
    // Health
    // ──────────────────────────────────────────────────────────────────────────

    /// Apply damage to the named track(s). `FatigueOrWounds` is treated as
    /// wounds; callers that let the player choose pass the concrete track.
    ///
    /// Returns `(wounds_added, fatigue_added)` after saturation.
    pub fn apply_damage(&mut self, amount: u32, track: DamageTrack) -> (u32, u32) {
        match track {
            DamageTrack::Wounds | DamageTrack::FatigueOrWounds => {
                (self.wounds.fill(amount), 0)
            }
            DamageTrack::Fatigue => (0, self.fatigue.fill(amount)),
            DamageTrack::FatigueAndWounds => {
                (self.wounds.fill(amount), self.fatigue.fill(amount))
            }
        }
    }

    /// Recover wounds and fatigue. Returns `(wounds_removed, fatigue_removed)`.
    pub fn heal(&mut self, wounds: u32, fatigue: u32) -> (u32, u32) {
        (self.wounds.drain(wounds), self.fatigue.drain(fatigue))
    }

    /// Spend equilibrium. Fails without spending when the pool is short.
    pub fn spend_equilibrium(&mut self, amount: u32) -> Result<(), DomainError> {
        if self.equilibrium.value < amount {
            return Err(DomainError::constraint(format!(
                "Not enough equilibrium: {} needed, {} available",
                amount, self.equilibrium.value
            )));
        }
        self.equilibrium.drain(amount);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Armor;

    #[test]
    fn build_values_clamp_into_range() {
        let actor = ActorProfile::new("Aina").with_size(9).with_constitution(0);
        assert_eq!(actor.size(), 5);
        assert_eq!(actor.constitution(), 1);
    }

    #[test]
    fn skill_level_defaults_to_zero() {
        let actor = ActorProfile::new("Aina").with_item(Item::skill(
            "Arc",
            Skill::new("armes-distancia", Attribute::Dexterity, 3),
        ));
        assert_eq!(actor.skill_level("armes-distancia"), 3);
        assert_eq!(actor.skill_level("barallar-se"), 0);
    }

    #[test]
    fn damage_saturates_at_max() {
        let mut actor = ActorProfile::new("Aina");
        actor.wounds = Pool::new(25, 30);
        assert_eq!(actor.apply_damage(10, DamageTrack::Wounds), (5, 0));
        assert_eq!(actor.wounds.value, 30);
    }

    #[test]
    fn fatigue_and_wounds_fill_both_tracks() {
        let mut actor = ActorProfile::new("Aina");
        assert_eq!(actor.apply_damage(4, DamageTrack::FatigueAndWounds), (4, 4));
        assert_eq!(actor.heal(1, 10), (1, 4));
        assert_eq!(actor.wounds.value, 3);
        assert_eq!(actor.fatigue.value, 0);
    }

    #[test]
    fn equilibrium_spend_requires_enough() {
        let mut actor = ActorProfile::new("Aina");
        actor.equilibrium = Pool::new(3, 5);
        assert!(actor.spend_equilibrium(4).is_err());
        assert_eq!(actor.equilibrium.value, 3);
        assert!(actor.spend_equilibrium(3).is_ok());
        assert_eq!(actor.equilibrium.value, 0);
    }

    #[test]
    fn equip_toggles_armor_only_for_equippable_items() {
        let armor = Item::armor("Gambeson", Armor::default());
        let armor_id = armor.id;
        let skill = Item::skill("Arc", Skill::default());
        let skill_id = skill.id;
        let mut actor = ActorProfile::new("Aina").with_item(armor).with_item(skill);

        assert!(actor.set_equipped(armor_id, true));
        assert!(!actor.set_equipped(skill_id, true));
    }

    #[test]
    fn species_parses_lowercase_names() {
        assert_eq!("cephalopod".parse::<Species>(), Ok(Species::Cephalopod));
        assert!("dragon".parse::<Species>().is_err());
    }
}
