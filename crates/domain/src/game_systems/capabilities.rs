//! Item capabilities - what each item variant contributes to derived values.
//!
//! Every item variant declares its contributions as a typed list. The
//! derived engine folds over those contributions; it never looks at an item
//! kind or trait id on its own.

use serde::{Deserialize, Serialize};

use crate::entities::{Armor, Artifact, Item, ItemKind, Skill, SupernaturalEffect, Trait, Weapon};

use super::config::RuleConfig;

/// Point-breakdown category an item cost is booked under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostCategory {
    Skills,
    Traits,
    Artifacts,
    Effects,
}

/// One effect of an item on the derived profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum Contribution {
    /// Added to latency (equipped armor)
    ArmorLatency(i32),
    Protection(i32),
    /// Added to the reaction count (may be negative)
    Reaction(i32),
    PointCost(CostCategory, i32),
}

/// Implemented by every item variant that can feed derived values.
pub trait ContributesToDerived {
    fn contributions(&self, config: &RuleConfig) -> Vec<Contribution>;
}

impl ContributesToDerived for Skill {
    fn contributions(&self, config: &RuleConfig) -> Vec<Contribution> {
        vec![Contribution::PointCost(
            CostCategory::Skills,
            config.skill_cost(self.level),
        )]
    }
}

impl ContributesToDerived for Trait {
    fn contributions(&self, config: &RuleConfig) -> Vec<Contribution> {
        let mut out = vec![Contribution::PointCost(
            CostCategory::Traits,
            self.computed_cost(),
        )];
        let ids = &config.trait_ids;
        if self.trait_id == ids.quick_reflexes {
            out.push(Contribution::Reaction(1));
        } else if self.trait_id == ids.slow {
            out.push(Contribution::Reaction(-1));
        } else if self.trait_id == ids.natural_armor {
            let level = i32::try_from(self.level).unwrap_or(i32::MAX);
            out.push(Contribution::Protection(level));
        }
        out
    }
}

impl ContributesToDerived for Armor {
    fn contributions(&self, _config: &RuleConfig) -> Vec<Contribution> {
        if !self.equipped {
            return Vec::new();
        }
        vec![
            Contribution::Protection(self.protection),
            Contribution::ArmorLatency(self.latency_mod),
        ]
    }
}

impl ContributesToDerived for Artifact {
    fn contributions(&self, _config: &RuleConfig) -> Vec<Contribution> {
        vec![
            Contribution::PointCost(CostCategory::Artifacts, self.cost),
            Contribution::Protection(self.protection),
        ]
    }
}

impl ContributesToDerived for SupernaturalEffect {
    fn contributions(&self, _config: &RuleConfig) -> Vec<Contribution> {
        vec![Contribution::PointCost(CostCategory::Effects, self.cost)]
    }
}

impl ContributesToDerived for Weapon {
    fn contributions(&self, _config: &RuleConfig) -> Vec<Contribution> {
        Vec::new()
    }
}

impl ContributesToDerived for ItemKind {
    fn contributions(&self, config: &RuleConfig) -> Vec<Contribution> {
        match self {
            ItemKind::Skill(skill) => skill.contributions(config),
            ItemKind::Trait(data) => data.contributions(config),
            ItemKind::Weapon(weapon) => weapon.contributions(config),
            ItemKind::Armor(armor) => armor.contributions(config),
            ItemKind::Artifact(artifact) => artifact.contributions(config),
            ItemKind::SupernaturalEffect(effect) => effect.contributions(config),
        }
    }
}

impl ContributesToDerived for Item {
    fn contributions(&self, config: &RuleConfig) -> Vec<Contribution> {
        self.kind.contributions(config)
    }
}
