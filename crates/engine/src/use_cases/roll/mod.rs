//! Dice roll use cases.
//!
//! Sizes a pool from an actor, draws d10s from the injected [`RandomPort`]
//! and scores them with the domain pool rules.

mod error;

pub use error::RollError;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use forja_domain::{
    attack_pool, attribute_pool, effective_pool_size, resolve_pool, skill_pool, ActorProfile,
    Attribute, AttackPool, DamageTrack, DieFace, PoolOutcome, RuleConfig, ScoringMode, Weapon,
    DIE_FACES,
};

use crate::infrastructure::ports::RandomPort;

// =============================================================================
// Result Types
// =============================================================================

/// A rolled and scored pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolRoll {
    /// Dice actually rolled (after the one-die minimum)
    pub pool_size: u32,
    pub dice: Vec<u8>,
    pub faces: Vec<DieFace>,
    pub mode: ScoringMode,
    pub fites: u32,
    pub has_ones: bool,
    pub is_pifia: bool,
    /// Human-readable summary, e.g. `3d10 [1, 6, 10] standard = 3 fites`
    pub breakdown: String,
}

impl PoolRoll {
    pub fn outcome(&self) -> PoolOutcome {
        PoolOutcome {
            fites: self.fites,
            has_ones: self.has_ones,
            is_pifia: self.is_pifia,
        }
    }
}

/// An attack roll with the pool it came from and the weapon's base damage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttackRoll {
    pub pool: AttackPool,
    pub roll: PoolRoll,
    pub base_damage: i32,
    pub damage_track: DamageTrack,
}

// =============================================================================
// Use Cases
// =============================================================================

/// Rolls d10 pools for actors.
pub struct RollDice {
    random: Arc<dyn RandomPort>,
    config: Arc<RuleConfig>,
}

impl RollDice {
    pub fn new(random: Arc<dyn RandomPort>, config: Arc<RuleConfig>) -> Self {
        Self { random, config }
    }

    /// Roll `requested` dice (at least one) and score them.
    pub fn roll_pool(&self, requested: i32, mode: impl Into<ScoringMode>) -> PoolRoll {
        let mode = mode.into();
        let pool_size = effective_pool_size(requested);
        let dice: Vec<u8> = (0..pool_size).map(|_| self.roll_die()).collect();
        let outcome = resolve_pool(&dice, mode);

        tracing::debug!(
            pool_size,
            ?dice,
            %mode,
            fites = outcome.fites,
            is_pifia = outcome.is_pifia,
            "Rolled pool"
        );

        let breakdown = format!(
            "{}d{} {:?} {} = {} fites{}",
            pool_size,
            DIE_FACES,
            dice,
            mode,
            outcome.fites,
            if outcome.is_pifia { " (pifia)" } else { "" }
        );

        PoolRoll {
            pool_size,
            faces: dice.iter().map(|&die| DieFace::classify(die)).collect(),
            dice,
            mode,
            fites: outcome.fites,
            has_ones: outcome.has_ones,
            is_pifia: outcome.is_pifia,
            breakdown,
        }
    }

    /// Roll an attribute. An attribute at 0 cannot be rolled.
    pub fn roll_attribute(
        &self,
        profile: &ActorProfile,
        attribute: Attribute,
        mode: impl Into<ScoringMode>,
    ) -> Result<PoolRoll, RollError> {
        let dice = attribute_pool(profile, attribute);
        if dice == 0 {
            return Err(RollError::NoAttribute(attribute));
        }
        Ok(self.roll_pool(pool_request(dice), mode))
    }

    /// Roll an attribute named by its sheet code (`FOR`, `DES`, ...).
    pub fn roll_attribute_code(
        &self,
        profile: &ActorProfile,
        code: &str,
        mode: impl Into<ScoringMode>,
    ) -> Result<PoolRoll, RollError> {
        let attribute: Attribute = code.parse()?;
        self.roll_attribute(profile, attribute, mode)
    }

    /// Roll an owned skill: related attribute plus skill level.
    pub fn roll_skill(
        &self,
        profile: &ActorProfile,
        skill_id: &str,
        mode: impl Into<ScoringMode>,
    ) -> Result<PoolRoll, RollError> {
        let skill = profile
            .skills()
            .find(|skill| skill.skill_id == skill_id)
            .ok_or_else(|| RollError::SkillNotFound(skill_id.to_string()))?;
        Ok(self.roll_pool(pool_request(skill_pool(profile, skill)), mode))
    }

    /// Roll an attack with a weapon, sized by the configured attack formula.
    pub fn roll_attack(
        &self,
        profile: &ActorProfile,
        weapon: &Weapon,
        mode: impl Into<ScoringMode>,
    ) -> AttackRoll {
        let pool = attack_pool(profile, weapon.attack_type, weapon.thrown, &self.config);
        let roll = self.roll_pool(pool_request(pool.dice), mode);
        let base_damage = weapon.base_damage(&profile.attributes);

        tracing::debug!(
            actor = %profile.name,
            attack_type = %weapon.attack_type,
            dice = pool.dice,
            fites = roll.fites,
            base_damage,
            "Rolled attack"
        );

        AttackRoll {
            pool,
            roll,
            base_damage,
            damage_track: weapon.damage_track,
        }
    }

    fn roll_die(&self) -> u8 {
        let value = self.random.gen_range(1, i32::from(DIE_FACES));
        value.clamp(1, i32::from(DIE_FACES)) as u8
    }
}

fn pool_request(dice: u32) -> i32 {
    i32::try_from(dice).unwrap_or(i32::MAX)
}
