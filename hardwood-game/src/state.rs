//! The player aggregate: identity, calendar, stats, traits, career log.
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::data::ChoiceEffects;
use crate::roles::{self, GameMode, Position};
use crate::schedule::{self, ScheduleError, SeasonSchedule};
use crate::stats::{StatKey, Stats};
use crate::traits::{MAX_TRAIT_LEVEL, TraitCatalog, TraitKind};

/// Starting age for a new High School career.
pub const STARTING_AGE: u32 = 15;
/// Meta points needed per point of starting skill boost.
const META_BOOST_DIVISOR: i64 = 100;
/// Cap on the starting boost applied to each primary skill.
const META_BOOST_CAP: i64 = 15;

/// Coarse engine phase persisted alongside the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    #[default]
    Menu,
    Playing,
    GameOver,
}

/// The mutable subject of the simulation. Owned exclusively by one career
/// session; collaborators only ever receive clones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub position: Position,
    pub age: u32,
    pub mode: GameMode,
    /// Index into the current mode's role ladder.
    pub role_tier: usize,
    pub current_season_in_mode: u32,
    pub current_day_in_season: u32,
    #[serde(default)]
    pub total_days_played: u32,
    #[serde(default)]
    pub total_weeks_played: u32,
    pub stats: Stats,
    /// Carried-forward meta currency; unbounded, never clamped.
    #[serde(default)]
    pub skill_points: i64,
    /// Owned traits and their levels.
    #[serde(default)]
    pub traits: BTreeMap<String, u8>,
    /// Append-only narrative history; never reordered or truncated in a run.
    pub career_log: Vec<String>,
    #[serde(default)]
    pub career_over: bool,
    #[serde(default)]
    pub retirement_reason: Option<String>,
    pub schedule: SeasonSchedule,
    /// Ids of scheduled events that already fired.
    #[serde(default)]
    pub fired_events: BTreeSet<String>,
    /// Title of the most recent contextual event, for the anti-repeat rule.
    #[serde(default)]
    pub last_contextual_title: Option<String>,
}

impl Default for Player {
    fn default() -> Self {
        // Deterministic internal seed; real careers regenerate the schedule
        // through their own session RNG.
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        let schedule = schedule::generate_schedule(GameMode::HighSchool, &mut rng)
            .unwrap_or_default();
        Self {
            name: String::from("Prospect"),
            position: Position::default(),
            age: STARTING_AGE,
            mode: GameMode::HighSchool,
            role_tier: 0,
            current_season_in_mode: 1,
            current_day_in_season: 1,
            total_days_played: 0,
            total_weeks_played: 0,
            stats: Stats::default(),
            skill_points: 0,
            traits: BTreeMap::new(),
            career_log: vec![String::from("A new career begins.")],
            career_over: false,
            retirement_reason: None,
            schedule,
            fired_events: BTreeSet::new(),
            last_contextual_title: None,
        }
    }
}

impl Player {
    /// Build a fresh player, applying the meta-currency starting boost and
    /// generating the first season schedule from the caller's random source.
    ///
    /// # Errors
    ///
    /// Returns a [`ScheduleError`] if the opening schedule cannot be built.
    pub fn new<R: rand::Rng>(
        name: &str,
        position: Position,
        meta_points: i64,
        rng: &mut R,
    ) -> Result<Self, ScheduleError> {
        let schedule = schedule::generate_schedule(GameMode::HighSchool, rng)?;
        let mut player = Self {
            name: name.to_string(),
            position,
            schedule,
            skill_points: meta_points,
            ..Self::default()
        };
        let boost = (meta_points / META_BOOST_DIVISOR).clamp(0, META_BOOST_CAP);
        if boost > 0 {
            #[allow(clippy::cast_possible_truncation)]
            let boost = boost as i32;
            player.stats.shooting += boost;
            player.stats.athleticism += boost;
            player.stats.basketball_iq += boost;
            player.stats.clamp();
            player
                .career_log
                .push(format!("Legacy training pays off: +{boost} to every skill."));
        }
        Ok(player)
    }

    /// Fixture player for a mode (useful for tests).
    #[must_use]
    pub fn sample(mode: GameMode) -> Self {
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let schedule = schedule::generate_schedule(mode, &mut rng).unwrap_or_default();
        let age = match mode {
            GameMode::HighSchool => STARTING_AGE,
            GameMode::College => 19,
            GameMode::Professional => 23,
        };
        Self {
            mode,
            age,
            schedule,
            ..Self::default()
        }
    }

    /// Display name of the current role.
    #[must_use]
    pub fn role_name(&self) -> &'static str {
        roles::role_name(self.mode, self.role_tier)
    }

    /// Append a line to the career log.
    pub fn log(&mut self, entry: impl Into<String>) {
        self.career_log.push(entry.into());
    }

    /// Current value of an addressable stat slot.
    #[must_use]
    pub fn stat(&self, key: StatKey) -> i64 {
        match key {
            StatKey::Shooting => i64::from(self.stats.shooting),
            StatKey::Athleticism => i64::from(self.stats.athleticism),
            StatKey::BasketballIq => i64::from(self.stats.basketball_iq),
            StatKey::Charisma => i64::from(self.stats.charisma),
            StatKey::Professionalism => i64::from(self.stats.professionalism),
            StatKey::Energy => i64::from(self.stats.energy),
            StatKey::Morale => i64::from(self.stats.morale),
            StatKey::SkillPoints => self.skill_points,
        }
    }

    /// Apply a delta to one stat slot, clamping bounded stats. Skill points
    /// are the one unbounded slot.
    pub fn adjust_stat(&mut self, key: StatKey, delta: i64) {
        if key == StatKey::SkillPoints {
            self.skill_points += delta;
            return;
        }
        #[allow(clippy::cast_possible_truncation)]
        let delta = delta.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
        match key {
            StatKey::Shooting => self.stats.shooting += delta,
            StatKey::Athleticism => self.stats.athleticism += delta,
            StatKey::BasketballIq => self.stats.basketball_iq += delta,
            StatKey::Charisma => self.stats.charisma += delta,
            StatKey::Professionalism => self.stats.professionalism += delta,
            StatKey::Energy => self.stats.energy += delta,
            StatKey::Morale => self.stats.morale += delta,
            StatKey::SkillPoints => unreachable!("handled above"),
        }
        self.stats.clamp();
    }

    /// Apply a declarative effect descriptor. Stat deltas clamp through the
    /// stat model; trait grants level up an owned trait to its cap.
    pub fn apply_effects(&mut self, effects: &ChoiceEffects) {
        self.stats.shooting += effects.shooting;
        self.stats.athleticism += effects.athleticism;
        self.stats.basketball_iq += effects.basketball_iq;
        self.stats.charisma += effects.charisma;
        self.stats.professionalism += effects.professionalism;
        self.stats.energy += effects.energy;
        self.stats.morale += effects.morale;
        self.skill_points += effects.skill_points;
        self.stats.clamp();

        if let Some(trait_id) = &effects.grant_trait {
            self.grant_trait(trait_id);
        }
        if let Some(line) = &effects.log {
            self.career_log.push(line.clone());
        }
    }

    /// Grant a trait at level 1, or raise an owned trait by one level.
    pub fn grant_trait(&mut self, trait_id: &str) {
        let level = self.traits.entry(trait_id.to_string()).or_insert(0);
        if *level < MAX_TRAIT_LEVEL {
            *level += 1;
        }
        let name = TraitCatalog::global()
            .get(trait_id)
            .map_or(trait_id, |def| def.name.as_str());
        let level = *self.traits.get(trait_id).unwrap_or(&1);
        self.career_log
            .push(format!("Trait gained: {name} (level {level})."));
    }

    /// Summed effect of owned traits toward one engine lever.
    #[must_use]
    pub fn trait_effect(&self, kind: TraitKind) -> f32 {
        let catalog = TraitCatalog::global();
        self.traits
            .iter()
            .map(|(id, level)| catalog.effect_of(id, *level, kind))
            .sum()
    }
}

/// Durable snapshot handed to the persistence collaborator. The current
/// event is deliberately absent; it is regenerated from the player on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveData {
    pub seed: u64,
    pub player: Player,
    pub phase: GamePhase,
    /// Cumulative meta currency across runs.
    pub meta_points: i64,
    /// Meta currency captured when this run started.
    pub meta_points_at_run_start: i64,
}

/// Expand a user seed into ChaCha key material.
#[must_use]
pub fn seed_bytes(seed: u64) -> [u8; 32] {
    let mut bytes = [0u8; 32];
    let mut word = seed ^ 0x9E37_79B9_7F4A_7C15;
    for chunk in bytes.chunks_mut(8) {
        word = word.wrapping_mul(0xBF58_476D_1CE4_E5B9).rotate_left(31);
        chunk.copy_from_slice(&word.to_le_bytes());
    }
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ChoiceEffects;

    #[test]
    fn new_player_applies_meta_boost() {
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        let base = Stats::default();
        let player = Player::new("Jordan Reyes", Position::ShootingGuard, 500, &mut rng).unwrap();
        assert_eq!(player.stats.shooting, base.shooting + 5);
        assert_eq!(player.stats.athleticism, base.athleticism + 5);
        assert_eq!(player.skill_points, 500);
        assert_eq!(player.age, STARTING_AGE);
    }

    #[test]
    fn meta_boost_is_capped() {
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        let base = Stats::default();
        let player = Player::new("Cap Case", Position::Center, 1_000_000, &mut rng).unwrap();
        assert_eq!(player.stats.shooting, base.shooting + 15);
    }

    #[test]
    fn apply_effects_clamps_bounded_stats() {
        let mut player = Player::default();
        player.apply_effects(&ChoiceEffects {
            shooting: 500,
            energy: -500,
            skill_points: 10,
            log: Some(String::from("Breakthrough session.")),
            ..ChoiceEffects::default()
        });
        assert_eq!(player.stats.shooting, 99);
        assert_eq!(player.stats.energy, 0);
        assert_eq!(player.skill_points, 10);
        assert!(player.career_log.iter().any(|l| l == "Breakthrough session."));
    }

    #[test]
    fn trait_grants_level_up_to_cap() {
        let mut player = Player::default();
        for _ in 0..5 {
            player.grant_trait("gym_rat");
        }
        assert_eq!(player.traits.get("gym_rat"), Some(&MAX_TRAIT_LEVEL));
        assert!(player.trait_effect(TraitKind::TrainingBonus) > 0.05);
    }

    #[test]
    fn adjust_stat_leaves_skill_points_unclamped() {
        let mut player = Player::default();
        player.adjust_stat(StatKey::SkillPoints, 1_000_000);
        assert_eq!(player.skill_points, 1_000_000);
        player.adjust_stat(StatKey::Morale, 1_000);
        assert_eq!(player.stats.morale, 100);
    }

    #[test]
    fn seed_bytes_spread_entropy() {
        let a = seed_bytes(1);
        let b = seed_bytes(2);
        assert_ne!(a, b);
        assert_ne!(&a[0..8], &a[8..16]);
    }
}
