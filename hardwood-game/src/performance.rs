//! Game-performance generation: minutes, box score, and the win draw.
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::roles;
use crate::state::Player;
use crate::traits::TraitKind;

/// Realistic single-game ceilings.
pub const POINTS_CEILING: i32 = 70;
pub const REBOUNDS_CEILING: i32 = 30;
pub const ASSISTS_CEILING: i32 = 25;

const POINTS_PER_MINUTE: f32 = 0.55;
const REBOUNDS_PER_MINUTE: f32 = 0.22;
const ASSISTS_PER_MINUTE: f32 = 0.16;
/// Skill stats are normalized against this before scaling production.
const SKILL_DENOMINATOR: f32 = 75.0;

const PLAYED_HARD_MINUTES_MULT: f32 = 1.10;
const SKILL_POINT_MINUTES_SCALE: f32 = 0.05;
const SKILL_POINT_MINUTES_CAP: f32 = 3.0;

const WIN_BASE: f32 = 0.45;
const WIN_IQ_SCALE: f32 = 0.001;
const WIN_PRO_SCALE: f32 = 0.0005;
const WIN_IMPACT_SCALE: f32 = 0.004;
const WIN_HOT_HAND_BONUS: f32 = 0.05;
const WIN_EXHAUSTION_PENALTY: f32 = 0.15;
const WIN_FLOOR: f32 = 0.05;
const WIN_CAP: f32 = 0.95;

/// Immutable box score for one resolved game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct GameStatLine {
    pub minutes: i32,
    pub points: i32,
    pub rebounds: i32,
    pub assists: i32,
}

/// A resolved game: the player's line plus the team outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSummary {
    pub stat_line: GameStatLine,
    pub team_won: bool,
}

/// Simulate one game for the player.
///
/// Deterministic given a fixed random source; the draws happen in a fixed
/// order (minutes jitter, then points, rebounds, assists jitters, then the
/// win draw) so seeded tests can assert exact outputs.
pub fn simulate_game<R: Rng>(player: &Player, played_hard: bool, rng: &mut R) -> GameSummary {
    let mode = player.mode;
    let stats = &player.stats;
    let energy_factor = stats.energy_factor();

    let base = roles::base_minutes(mode, player.role_tier);
    let attr_bonus =
        ((stats.skill_average() - mode.baseline_skill()) / 4.0).min(mode.attribute_minutes_cap());
    #[allow(clippy::cast_precision_loss)]
    let sp_bonus =
        (player.skill_points.max(0) as f32 * SKILL_POINT_MINUTES_SCALE).min(SKILL_POINT_MINUTES_CAP);
    let mut minutes = base + attr_bonus + sp_bonus;
    if played_hard {
        minutes *= PLAYED_HARD_MINUTES_MULT;
    }
    minutes *= energy_factor;
    minutes *= rng.gen_range(0.9..=1.1);
    let minutes = minutes.clamp(0.0, mode.minutes_cap());
    #[allow(clippy::cast_possible_truncation)]
    let minutes_i = minutes.round() as i32;

    let mut stat_line = GameStatLine {
        minutes: minutes_i,
        ..GameStatLine::default()
    };

    if minutes_i > 0 {
        let role_mult = roles::role_multiplier(player.role_tier);
        let position = player.position;

        #[allow(clippy::cast_precision_loss)]
        let skill = |value: i32| value as f32 / SKILL_DENOMINATOR;
        let produce = |rate: f32, positional: f32, skill_value: i32, rng: &mut R| {
            let raw = minutes
                * rate
                * positional
                * skill(skill_value)
                * role_mult
                * energy_factor
                * rng.gen_range(0.7..=1.3);
            #[allow(clippy::cast_possible_truncation)]
            let rounded = raw.round() as i32;
            rounded.max(0)
        };

        stat_line.points = produce(
            POINTS_PER_MINUTE,
            position.scoring_factor(),
            stats.shooting,
            rng,
        )
        .min(POINTS_CEILING);
        stat_line.rebounds = produce(
            REBOUNDS_PER_MINUTE,
            position.rebound_factor(),
            stats.athleticism,
            rng,
        )
        .min(REBOUNDS_CEILING);
        stat_line.assists = produce(
            ASSISTS_PER_MINUTE,
            position.assist_factor(),
            stats.basketball_iq,
            rng,
        )
        .min(ASSISTS_CEILING);
    }

    let team_won = roll_win(player, &stat_line, played_hard, rng);

    log::debug!(
        "game sim | {} {:?} tier {} | {}m {}p {}r {}a | won {}",
        mode.as_str(),
        player.position,
        player.role_tier,
        stat_line.minutes,
        stat_line.points,
        stat_line.rebounds,
        stat_line.assists,
        team_won
    );

    GameSummary {
        stat_line,
        team_won,
    }
}

/// Composite contribution of the box score toward the win roll.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn game_impact_score(line: &GameStatLine) -> f32 {
    (line.points as f32 + line.rebounds as f32 * 1.2 + line.assists as f32 * 1.5) / 4.0
}

#[allow(clippy::cast_precision_loss)]
fn roll_win<R: Rng>(
    player: &Player,
    line: &GameStatLine,
    played_hard: bool,
    rng: &mut R,
) -> bool {
    let stats = &player.stats;
    let mut probability = WIN_BASE
        + stats.basketball_iq as f32 * WIN_IQ_SCALE
        + stats.professionalism as f32 * WIN_PRO_SCALE
        + game_impact_score(line) * WIN_IMPACT_SCALE
        + player.trait_effect(TraitKind::ClutchWin);
    if played_hard && line.points > 15 {
        probability += WIN_HOT_HAND_BONUS;
    }
    if stats.energy < 20 {
        probability -= WIN_EXHAUSTION_PENALTY;
    }
    let probability = probability.clamp(WIN_FLOOR, WIN_CAP);
    rng.gen_range(0.0..1.0) < probability
}
