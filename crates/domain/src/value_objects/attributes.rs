//! The six primary attributes and their 0-5 ratings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::DomainError;

/// Highest rating an attribute can hold.
pub const MAX_ATTRIBUTE: u8 = 5;

/// One of the six primary attributes.
///
/// Serialized with the short codes used on character sheets (`FOR`, `DES`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Attribute {
    #[serde(rename = "FOR")]
    Strength,
    #[serde(rename = "DES")]
    Dexterity,
    #[serde(rename = "AGI")]
    Agility,
    #[serde(rename = "PER")]
    Perception,
    #[serde(rename = "INT")]
    Intellect,
    #[serde(rename = "APL")]
    Poise,
}

impl Attribute {
    pub const ALL: [Attribute; 6] = [
        Attribute::Strength,
        Attribute::Dexterity,
        Attribute::Agility,
        Attribute::Perception,
        Attribute::Intellect,
        Attribute::Poise,
    ];

    /// Sheet code for this attribute.
    pub fn code(&self) -> &'static str {
        match self {
            Attribute::Strength => "FOR",
            Attribute::Dexterity => "DES",
            Attribute::Agility => "AGI",
            Attribute::Perception => "PER",
            Attribute::Intellect => "INT",
            Attribute::Poise => "APL",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Attribute {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "FOR" => Ok(Self::Strength),
            "DES" => Ok(Self::Dexterity),
            "AGI" => Ok(Self::Agility),
            "PER" => Ok(Self::Perception),
            "INT" => Ok(Self::Intellect),
            "APL" => Ok(Self::Poise),
            other => Err(DomainError::parse(format!("Unknown attribute: {}", other))),
        }
    }
}

/// Attribute ratings of an actor.
///
/// Setters clamp ratings to `0..=MAX_ATTRIBUTE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attributes {
    #[serde(rename = "FOR", default = "default_rating")]
    strength: u8,
    #[serde(rename = "DES", default = "default_rating")]
    dexterity: u8,
    #[serde(rename = "AGI", default = "default_rating")]
    agility: u8,
    #[serde(rename = "PER", default = "default_rating")]
    perception: u8,
    #[serde(rename = "INT", default = "default_rating")]
    intellect: u8,
    #[serde(rename = "APL", default = "default_rating")]
    poise: u8,
}

fn default_rating() -> u8 {
    1
}

impl Default for Attributes {
    /// Fresh sheets start every attribute at 1.
    fn default() -> Self {
        Self::uniform(1)
    }
}

impl Attributes {
    /// All six attributes at the same rating.
    pub fn uniform(rating: u8) -> Self {
        let rating = rating.min(MAX_ATTRIBUTE);
        Self {
            strength: rating,
            dexterity: rating,
            agility: rating,
            perception: rating,
            intellect: rating,
            poise: rating,
        }
    }

    /// Build from ratings in sheet order: FOR, DES, AGI, PER, INT, APL.
    pub fn from_array(ratings: [u8; 6]) -> Self {
        let mut attributes = Self::uniform(0);
        for (attribute, rating) in Attribute::ALL.iter().zip(ratings) {
            attributes.set(*attribute, rating);
        }
        attributes
    }

    pub fn get(&self, attribute: Attribute) -> u8 {
        match attribute {
            Attribute::Strength => self.strength,
            Attribute::Dexterity => self.dexterity,
            Attribute::Agility => self.agility,
            Attribute::Perception => self.perception,
            Attribute::Intellect => self.intellect,
            Attribute::Poise => self.poise,
        }
    }

    pub fn set(&mut self, attribute: Attribute, rating: u8) {
        let rating = rating.min(MAX_ATTRIBUTE);
        match attribute {
            Attribute::Strength => self.strength = rating,
            Attribute::Dexterity => self.dexterity = rating,
            Attribute::Agility => self.agility = rating,
            Attribute::Perception => self.perception = rating,
            Attribute::Intellect => self.intellect = rating,
            Attribute::Poise => self.poise = rating,
        }
    }

    /// Builder-style setter.
    pub fn with(mut self, attribute: Attribute, rating: u8) -> Self {
        self.set(attribute, rating);
        self
    }

    /// Iterate `(attribute, rating)` pairs in sheet order.
    pub fn iter(&self) -> impl Iterator<Item = (Attribute, u8)> + '_ {
        Attribute::ALL.iter().map(move |a| (*a, self.get(*a)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratings_clamp_to_five() {
        let attrs = Attributes::uniform(1).with(Attribute::Agility, 9);
        assert_eq!(attrs.get(Attribute::Agility), 5);
    }

    #[test]
    fn from_array_follows_sheet_order() {
        let attrs = Attributes::from_array([1, 2, 3, 4, 5, 0]);
        assert_eq!(attrs.get(Attribute::Strength), 1);
        assert_eq!(attrs.get(Attribute::Agility), 3);
        assert_eq!(attrs.get(Attribute::Poise), 0);
    }

    #[test]
    fn parse_codes_case_insensitive() {
        assert_eq!("agi".parse::<Attribute>(), Ok(Attribute::Agility));
        assert_eq!("APL".parse::<Attribute>(), Ok(Attribute::Poise));
        assert!("STR".parse::<Attribute>().is_err());
    }

    #[test]
    fn deserializes_missing_ratings_as_one() {
        let attrs: Attributes = serde_json::from_str(r#"{"FOR": 3, "AGI": 0}"#).unwrap();
        assert_eq!(attrs.get(Attribute::Strength), 3);
        assert_eq!(attrs.get(Attribute::Agility), 0);
        assert_eq!(attrs.get(Attribute::Perception), 1);
    }
}
