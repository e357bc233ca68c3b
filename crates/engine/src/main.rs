//! Forja Engine - skirmish demo.
//!
//! Builds two actors, runs one encounter round on the latency clock and logs
//! every step. Set `FORJA_SEED` for a reproducible run and
//! `FORJA_RULES_PATH` to load custom rule tables.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use forja_domain::{
    ActionType, ActorProfile, Armor, AttackType, Attribute, CombatEvent, DeclaredAction,
    DomainEvent, Item, ModifierSet, Side, Skill, Weapon,
};
use forja_engine::{
    CharacterRules, CombatTracker, RandomPort, RollDice, RuleConfigLoader, SeededRandom,
    SystemRandom,
};

fn main() -> anyhow::Result<()> {
    // Load environment from repo root so the binary works from `crates/engine`.
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "forja_engine=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Forja Engine demo");

    let config = Arc::new(RuleConfigLoader::load().context("loading rule tables")?);
    let random: Arc<dyn RandomPort> = match std::env::var("FORJA_SEED") {
        Ok(raw) => {
            let seed: u64 = raw
                .trim()
                .parse()
                .with_context(|| format!("FORJA_SEED must be an unsigned integer, got '{}'", raw))?;
            tracing::info!(seed, "Using seeded dice");
            Arc::new(SeededRandom::new(seed))
        }
        Err(_) => Arc::new(SystemRandom::new()),
    };

    let rules = CharacterRules::new(config.clone());
    let dice = RollDice::new(random.clone(), config);

    let mut hero = ActorProfile::new("Aina")
        .with_attribute(Attribute::Dexterity, 3)
        .with_attribute(Attribute::Agility, 3)
        .with_item(Item::skill(
            "Armes cos a cos",
            Skill::new("armes-cos-a-cos", Attribute::Dexterity, 2),
        ))
        .with_item(Item::armor("Gambeso", Armor::equipped(1, 1)));
    let mut bandit = ActorProfile::new("Bandoler")
        .with_attribute(Attribute::Strength, 3)
        .with_attribute(Attribute::Agility, 2)
        .with_item(Item::skill(
            "Barallar-se",
            Skill::new("barallar-se", Attribute::Strength, 1),
        ));

    let sword = Weapon::new(AttackType::Melee, "FOR+2");
    let club = Weapon::new(AttackType::Brawl, "FOR+1");

    let hero_derived = rules.refresh(&mut hero);
    let bandit_derived = rules.refresh(&mut bandit);

    let mut tracker = CombatTracker::new(random);
    let hero_id = tracker.add_actor(&hero, &hero_derived, Side::Players)?;
    let bandit_id = tracker.add_actor(&bandit, &bandit_derived, Side::Antagonists)?;
    let mut events: Vec<DomainEvent> = Vec::new();

    for id in tracker.declaration_order() {
        let action = if id == hero_id {
            DeclaredAction::new(ActionType::Attack, 0).targeting(bandit_id)
        } else {
            DeclaredAction::new(ActionType::Attack, 1).targeting(hero_id)
        };
        let declared = tracker.declare(id, action)?;
        events.push(tracker.domain_event(declared));
    }

    loop {
        let advance = tracker.advance()?;
        if advance.resolving.is_empty() {
            break;
        }
        events.push(tracker.domain_event(CombatTracker::clock_event(&advance)));
        for attacker_id in advance.resolving {
            let (attacker, weapon, defender_id) = if attacker_id == hero_id {
                (&hero, &sword, bandit_id)
            } else {
                (&bandit, &club, hero_id)
            };
            let attack = dice.roll_attack(attacker, weapon, ModifierSet::none());
            let defense = dice.roll_pool(
                if defender_id == hero_id {
                    hero_derived.defense
                } else {
                    bandit_derived.defense
                },
                ModifierSet::none(),
            );
            tracing::info!(attack = %attack.roll.breakdown, defense = %defense.breakdown, "Exchange");

            let event = tracker.resolve_attack(attacker_id, defender_id, &attack, &defense)?;
            let damage = match event {
                CombatEvent::AttackResolved { damage, .. } => damage,
                _ => 0,
            };
            events.push(tracker.domain_event(event));
            if damage > 0 {
                let defender = if defender_id == hero_id {
                    &mut hero
                } else {
                    &mut bandit
                };
                let report = rules.apply_damage(defender, damage, attack.damage_track);
                tracing::info!(
                    defender = %defender.name,
                    wounds = report.wounds,
                    level = %report.wound_level,
                    "Health updated"
                );
                events.push(report.event);
            }
        }
    }

    let reset = tracker.reset_round();
    events.push(tracker.domain_event(reset));
    let summary = serde_json::to_string_pretty(&serde_json::json!({
        "encounter": tracker.state(),
        "events": events,
    }))
    .context("serializing encounter")?;
    println!("{}", summary);

    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
