//! Acquired player traits and their leveled effect catalog.
//!
//! The catalog is immutable reference data built once at process start and
//! shared by every running career; engine code only ever reads from it.
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::OnceLock;

/// Maximum level any trait can be raised to.
pub const MAX_TRAIT_LEVEL: u8 = 3;

/// The lever a trait pulls inside the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraitKind {
    /// Added to the diminishing-returns gain chance during practice.
    TrainingBonus,
    /// Subtracted from the daily injury trigger chance.
    InjuryGuard,
    /// Added to the win probability before the final draw.
    ClutchWin,
    /// Flat morale recovered on good days.
    MoraleRecovery,
}

/// One rung of a trait's level ladder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraitLevel {
    pub level: u8,
    pub desc: String,
    pub effect: f32,
}

/// Definition of a single acquirable trait.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraitDef {
    pub id: String,
    pub name: String,
    pub kind: TraitKind,
    pub levels: Vec<TraitLevel>,
}

impl TraitDef {
    fn new(id: &str, name: String, kind: TraitKind, effects: [f32; 3], descs: [&str; 3]) -> Self {
        let levels = effects
            .iter()
            .zip(descs.iter())
            .enumerate()
            .map(|(idx, (effect, desc))| TraitLevel {
                level: u8::try_from(idx).unwrap_or(0) + 1,
                desc: (*desc).to_string(),
                effect: *effect,
            })
            .collect();
        Self {
            id: id.to_string(),
            name,
            kind,
            levels,
        }
    }

    /// Effect value at a level, using the highest defined rung at or below it.
    #[must_use]
    pub fn effect_at(&self, level: u8) -> f32 {
        self.levels
            .iter()
            .filter(|rung| rung.level <= level)
            .map(|rung| rung.effect)
            .fold(0.0, f32::max)
    }
}

/// Immutable trait lookup keyed by id.
#[derive(Debug, Clone, Default)]
pub struct TraitCatalog {
    traits: HashMap<String, TraitDef>,
}

impl TraitCatalog {
    /// Process-wide shared catalog.
    #[must_use]
    pub fn global() -> &'static Self {
        static CATALOG: OnceLock<TraitCatalog> = OnceLock::new();
        CATALOG.get_or_init(Self::default_catalog)
    }

    /// The built-in trait set.
    #[must_use]
    pub fn default_catalog() -> Self {
        let defs = vec![
            TraitDef::new(
                "gym_rat",
                "Gym Rat".to_string(),
                TraitKind::TrainingBonus,
                [0.03, 0.06, 0.10],
                [
                    "First one in the gym.",
                    "Last one out of the gym.",
                    "Lives in the gym.",
                ],
            ),
            TraitDef::new(
                "iron_frame",
                "Iron Frame".to_string(),
                TraitKind::InjuryGuard,
                [0.02, 0.04, 0.06],
                [
                    "Shrugs off hard contact.",
                    "Rarely misses a practice.",
                    "Body built for the long season.",
                ],
            ),
            TraitDef::new(
                "clutch_gene",
                "Clutch Gene".to_string(),
                TraitKind::ClutchWin,
                [0.02, 0.04, 0.06],
                [
                    "Wants the last shot.",
                    "Calm when the clock runs down.",
                    "Fourth quarters belong to them.",
                ],
            ),
            TraitDef::new(
                "locker_room_glue",
                "Locker Room Glue".to_string(),
                TraitKind::MoraleRecovery,
                [1.0, 2.0, 3.0],
                [
                    "Keeps the bench loose.",
                    "Teammates play harder around them.",
                    "The whole roster rallies behind them.",
                ],
            ),
        ];
        let traits = defs.into_iter().map(|def| (def.id.clone(), def)).collect();
        Self { traits }
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&TraitDef> {
        self.traits.get(id)
    }

    /// Effect contribution of a trait at a level toward one engine lever.
    /// Unknown ids and mismatched kinds contribute nothing.
    #[must_use]
    pub fn effect_of(&self, id: &str, level: u8, kind: TraitKind) -> f32 {
        self.traits
            .get(id)
            .filter(|def| def.kind == kind)
            .map_or(0.0, |def| def.effect_at(level))
    }
}
