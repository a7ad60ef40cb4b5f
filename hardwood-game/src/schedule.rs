//! Season schedule generation and game-result bookkeeping.
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::performance::GameSummary;
use crate::roles::GameMode;

/// Days between regular-season games. Also the calendar cadence the turn
/// engine uses to treat a day as a mandatory game day.
pub const GAME_DAY_INTERVAL: u32 = 7;

/// Postseason slot offsets past the last regular day. The gaps widen as the
/// rounds get bigger: 3 days to the first playoff game, then 4, then 5.
const PLAYOFF_OFFSETS: [u32; 2] = [3, 7];
const CHAMPIONSHIP_OFFSET: u32 = 12;
/// Total days the postseason adds to a season.
pub const POSTSEASON_SPAN: u32 = CHAMPIONSHIP_OFFSET;

/// Fixed pool of rival programs opponents are drawn from.
pub const RIVAL_TEAMS: [&str; 8] = [
    "Eastside Falcons",
    "Northgate Kings",
    "Harbor City Storm",
    "Lakeview Rockets",
    "Summit Ridge Bears",
    "Central Valley Hawks",
    "Ironwood Wolves",
    "Southport Sharks",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SlotType {
    #[default]
    Training,
    Game,
    Playoff,
    Championship,
}

impl SlotType {
    #[must_use]
    pub const fn is_game(self) -> bool {
        matches!(self, Self::Game | Self::Playoff | Self::Championship)
    }

    #[must_use]
    pub const fn is_postseason(self) -> bool {
        matches!(self, Self::Playoff | Self::Championship)
    }
}

/// One day of the season. `result` is attached once the day's game resolves;
/// nothing else on a slot mutates after generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSlot {
    pub position: u32,
    pub slot_type: SlotType,
    #[serde(default)]
    pub opponent: Option<String>,
    #[serde(default)]
    pub result: Option<GameSummary>,
}

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("season length must be positive for {mode}")]
    EmptySeason { mode: GameMode },
    #[error("opponent pool is empty")]
    NoOpponents,
}

/// Ordered slots for one season plus derived standings counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SeasonSchedule {
    pub slots: Vec<ScheduleSlot>,
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub losses: u32,
    #[serde(default)]
    pub playoff_eliminated: bool,
}

impl SeasonSchedule {
    /// Total span in days, regular season plus postseason.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn span(&self) -> u32 {
        self.slots.len() as u32
    }

    /// Slot for a 1-based day position.
    #[must_use]
    pub fn slot_at(&self, position: u32) -> Option<&ScheduleSlot> {
        if position == 0 {
            return None;
        }
        self.slots.get(position as usize - 1)
    }

    /// Attach a resolved game to the day's slot and update standings.
    /// Returns true when this result freshly eliminates the player from the
    /// postseason.
    pub fn record_result(&mut self, position: u32, summary: GameSummary) -> bool {
        if position == 0 {
            return false;
        }
        let Some(slot) = self.slots.get_mut(position as usize - 1) else {
            return false;
        };
        if !slot.slot_type.is_game() || slot.result.is_some() {
            return false;
        }
        let won = summary.team_won;
        let postseason = slot.slot_type.is_postseason();
        slot.result = Some(summary);
        if won {
            self.wins += 1;
        } else {
            self.losses += 1;
        }
        if postseason && !won && !self.playoff_eliminated {
            self.playoff_eliminated = true;
            return true;
        }
        false
    }
}

/// Generate a fresh schedule for one season of the given mode.
///
/// Regular-season games land every [`GAME_DAY_INTERVAL`] days, never
/// back-to-back; every other regular day is training. Playoff and
/// championship slots are appended after the last regular day with widening
/// gaps. Opponent ordering is shuffled from the rival pool, reproducible
/// under a fixed random source.
///
/// # Errors
///
/// Returns [`ScheduleError`] when the mode yields no season days or the
/// opponent pool is empty.
pub fn generate_schedule<R: Rng>(
    mode: GameMode,
    rng: &mut R,
) -> Result<SeasonSchedule, ScheduleError> {
    generate_schedule_from_parts(mode, mode.season_length(), &RIVAL_TEAMS, rng)
}

fn generate_schedule_from_parts<R: Rng>(
    mode: GameMode,
    regular_len: u32,
    opponent_pool: &[&str],
    rng: &mut R,
) -> Result<SeasonSchedule, ScheduleError> {
    if regular_len == 0 {
        return Err(ScheduleError::EmptySeason { mode });
    }
    if opponent_pool.is_empty() {
        return Err(ScheduleError::NoOpponents);
    }

    let mut opponents: Vec<&str> = opponent_pool.to_vec();
    opponents.shuffle(rng);
    let mut next_opponent = 0usize;
    let mut draw_opponent = || {
        let name = opponents[next_opponent % opponents.len()];
        next_opponent += 1;
        name.to_string()
    };

    let span = regular_len + POSTSEASON_SPAN;
    let mut slots = Vec::with_capacity(span as usize);
    for position in 1..=span {
        let slot_type = if position <= regular_len {
            if position % GAME_DAY_INTERVAL == 0 {
                SlotType::Game
            } else {
                SlotType::Training
            }
        } else {
            let offset = position - regular_len;
            if PLAYOFF_OFFSETS.contains(&offset) {
                SlotType::Playoff
            } else if offset == CHAMPIONSHIP_OFFSET {
                SlotType::Championship
            } else {
                SlotType::Training
            }
        };
        let opponent = if slot_type.is_game() {
            Some(draw_opponent())
        } else {
            None
        };
        slots.push(ScheduleSlot {
            position,
            slot_type,
            opponent,
            result: None,
        });
    }

    Ok(SeasonSchedule {
        slots,
        wins: 0,
        losses: 0,
        playoff_eliminated: false,
    })
}
