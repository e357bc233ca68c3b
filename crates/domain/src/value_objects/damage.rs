//! Damage formulas and hit damage.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::attributes::{Attribute, Attributes};
use crate::DomainError;

/// Inputs of a single hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DamageParams {
    /// Weapon or effect base damage
    pub base_damage: i32,
    /// Attacker's fites
    pub attack_successes: u32,
    /// Defender's fites
    pub defense_successes: u32,
    /// Defender's total protection
    pub protection: i32,
    /// Defender's damage reduction
    pub damage_reduction: i32,
    pub is_hit: bool,
}

/// Damage dealt by an attack: 0 on a miss, otherwise at least 1.
///
/// `base + max(0, attack - defense) - protection - damage_reduction`
pub fn compute_damage(params: &DamageParams) -> u32 {
    if !params.is_hit {
        return 0;
    }
    let excess = i64::from(params.attack_successes) - i64::from(params.defense_successes);
    let raw = i64::from(params.base_damage) + excess.max(0)
        - i64::from(params.protection)
        - i64::from(params.damage_reduction);
    raw.clamp(1, i64::from(u32::MAX)) as u32
}

/// Which health track a source of damage fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageTrack {
    #[default]
    Wounds,
    Fatigue,
    /// Caller chooses one of the two tracks
    FatigueOrWounds,
    /// Both tracks take the full amount
    FatigueAndWounds,
}

/// A weapon damage expression such as `FOR+2`, `DES-1` or `5`.
///
/// Stored as the raw text; anything that is neither `<ATTR>(+|-)<n>` nor a
/// bare integer evaluates to 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DamageFormula(String);

/// Structured form of a damage formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageExpr {
    Attribute { attribute: Attribute, modifier: i32 },
    Flat(i32),
}

impl DamageFormula {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse into a structured expression, if the text is well formed.
    pub fn expr(&self) -> Option<DamageExpr> {
        self.0.parse::<DamageExpr>().ok()
    }

    /// Evaluate against an actor's attributes.
    ///
    /// Attribute formulas floor at 0; flat values are taken as written.
    pub fn evaluate(&self, attributes: &Attributes) -> i32 {
        match self.expr() {
            Some(DamageExpr::Attribute {
                attribute,
                modifier,
            }) => i32::from(attributes.get(attribute))
                .saturating_add(modifier)
                .max(0),
            Some(DamageExpr::Flat(value)) => value,
            None => 0,
        }
    }
}

impl Default for DamageFormula {
    fn default() -> Self {
        Self::new("FOR+1")
    }
}

impl fmt::Display for DamageFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Accepts `<CODE>(+|-)<n>` or a bare integer. Surrounding whitespace is
/// ignored and attribute codes are case-insensitive (`for+2` is `FOR+2`).
/// Dice notation such as `2d6` is not a damage formula and is rejected
/// whole, so it evaluates to 0 rather than to its leading number.
impl FromStr for DamageExpr {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(value) = s.parse::<i32>() {
            return Ok(DamageExpr::Flat(value));
        }

        let sign_pos = s
            .find(&['+', '-'][..])
            .ok_or_else(|| DomainError::parse(format!("Invalid damage formula: '{}'", s)))?;
        let (code, rest) = s.split_at(sign_pos);
        let attribute: Attribute = code.parse()?;
        let amount: i32 = rest[1..].parse().map_err(|_| {
            DomainError::parse(format!("Invalid damage modifier: '{}'", rest))
        })?;
        if rest[1..].starts_with(&['+', '-'][..]) {
            return Err(DomainError::parse(format!(
                "Invalid damage modifier: '{}'",
                rest
            )));
        }
        let modifier = if rest.starts_with('-') { -amount } else { amount };

        Ok(DamageExpr::Attribute {
            attribute,
            modifier,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(base: i32, attack: u32, defense: u32, protection: i32, reduction: i32) -> DamageParams {
        DamageParams {
            base_damage: base,
            attack_successes: attack,
            defense_successes: defense,
            protection,
            damage_reduction: reduction,
            is_hit: true,
        }
    }

    #[test]
    fn miss_deals_nothing() {
        let params = DamageParams {
            is_hit: false,
            ..hit(10, 5, 0, 0, 0)
        };
        assert_eq!(compute_damage(&params), 0);
    }

    #[test]
    fn excess_fites_add_to_base() {
        assert_eq!(compute_damage(&hit(4, 3, 1, 1, 1)), 4);
    }

    #[test]
    fn defense_surplus_never_subtracts() {
        assert_eq!(compute_damage(&hit(4, 1, 3, 0, 0)), 4);
    }

    #[test]
    fn hit_always_deals_at_least_one() {
        assert_eq!(compute_damage(&hit(1, 0, 0, 6, 5)), 1);
        assert_eq!(compute_damage(&hit(-3, 0, 0, 0, 0)), 1);
    }

    #[test]
    fn formula_adds_attribute() {
        let attrs = Attributes::uniform(1).with(Attribute::Strength, 3);
        assert_eq!(DamageFormula::new("FOR+2").evaluate(&attrs), 5);
        assert_eq!(DamageFormula::new("FOR-1").evaluate(&attrs), 2);
    }

    #[test]
    fn huge_modifiers_saturate() {
        let attrs = Attributes::uniform(3);
        assert_eq!(
            DamageFormula::new("FOR+2147483647").evaluate(&attrs),
            i32::MAX
        );
        assert_eq!(DamageFormula::new("FOR-2147483647").evaluate(&attrs), 0);
    }

    #[test]
    fn formula_floors_attribute_result_at_zero() {
        let attrs = Attributes::uniform(1);
        assert_eq!(DamageFormula::new("DES-4").evaluate(&attrs), 0);
    }

    #[test]
    fn flat_and_garbage_formulas() {
        let attrs = Attributes::default();
        assert_eq!(DamageFormula::new("5").evaluate(&attrs), 5);
        assert_eq!(DamageFormula::new("2d6").evaluate(&attrs), 0);
        assert_eq!(DamageFormula::new("STR+1").evaluate(&attrs), 0);
        assert_eq!(DamageFormula::new("FOR+-1").evaluate(&attrs), 0);
    }

    #[test]
    fn expr_parses_structured_form() {
        assert_eq!(
            "AGI+3".parse::<DamageExpr>(),
            Ok(DamageExpr::Attribute {
                attribute: Attribute::Agility,
                modifier: 3
            })
        );
        assert_eq!("-2".parse::<DamageExpr>(), Ok(DamageExpr::Flat(-2)));
    }

    #[test]
    fn codes_are_case_insensitive_and_trimmed() {
        assert_eq!(
            " for+2 ".parse::<DamageExpr>(),
            Ok(DamageExpr::Attribute {
                attribute: Attribute::Strength,
                modifier: 2
            })
        );
        assert!("2d6".parse::<DamageExpr>().is_err());
    }
}
