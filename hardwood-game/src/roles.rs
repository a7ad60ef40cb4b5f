//! Game modes, role ladders, and the per-tier tuning tables.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Career tier. Strictly ordered; a player only ever moves forward.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    #[default]
    HighSchool,
    College,
    Professional,
}

impl GameMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HighSchool => "high_school",
            Self::College => "college",
            Self::Professional => "professional",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::HighSchool => "High School",
            Self::College => "College",
            Self::Professional => "Professional",
        }
    }

    /// The mode that graduation moves into, if any.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::HighSchool => Some(Self::College),
            Self::College => Some(Self::Professional),
            Self::Professional => None,
        }
    }

    /// Regular-season length in days. Multiples of the game-day interval so
    /// game slots land on the calendar-mandated cadence.
    #[must_use]
    pub const fn season_length(self) -> u32 {
        match self {
            Self::HighSchool => 42,
            Self::College => 49,
            Self::Professional => 56,
        }
    }

    /// Hard cap on simulated minutes for one game.
    #[must_use]
    pub const fn minutes_cap(self) -> f32 {
        match self {
            Self::HighSchool => 32.0,
            Self::College => 40.0,
            Self::Professional => 48.0,
        }
    }

    /// Baseline skill average the mode expects; the attribute minutes bonus
    /// is measured against this.
    #[must_use]
    pub const fn baseline_skill(self) -> f32 {
        match self {
            Self::HighSchool => 40.0,
            Self::College => 55.0,
            Self::Professional => 70.0,
        }
    }

    /// Cap on the attribute-derived minutes bonus.
    #[must_use]
    pub const fn attribute_minutes_cap(self) -> f32 {
        match self {
            Self::HighSchool => 6.0,
            Self::College => 8.0,
            Self::Professional => 10.0,
        }
    }

    /// Ordered role ladder for the mode, lowest tier first.
    #[must_use]
    pub const fn roles(self) -> &'static [&'static str; TIER_COUNT] {
        match self {
            Self::HighSchool => &HIGH_SCHOOL_ROLES,
            Self::College => &COLLEGE_ROLES,
            Self::Professional => &PRO_ROLES,
        }
    }

    /// Promotion thresholds, highest tier first. Index 0 promotes to the top
    /// tier, index 3 to tier one above the floor.
    #[must_use]
    pub const fn promotion_thresholds(self) -> [i32; TIER_COUNT - 1] {
        match self {
            Self::HighSchool => [200, 170, 140, 110],
            Self::College => [260, 230, 200, 170],
            Self::Professional => [320, 290, 260, 230],
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for GameMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "high_school" => Ok(Self::HighSchool),
            "college" => Ok(Self::College),
            "professional" => Ok(Self::Professional),
            _ => Err(()),
        }
    }
}

/// Number of tiers in every mode's ladder.
pub const TIER_COUNT: usize = 5;

pub const HIGH_SCHOOL_ROLES: [&str; TIER_COUNT] = [
    "Bench Warmer",
    "Rotation Player",
    "Sixth Man",
    "Starter",
    "Team Captain",
];

pub const COLLEGE_ROLES: [&str; TIER_COUNT] = [
    "Walk-On",
    "Rotation Player",
    "Sixth Man",
    "Starter",
    "Conference Star",
];

pub const PRO_ROLES: [&str; TIER_COUNT] = [
    "End of Bench",
    "Rotation Player",
    "Sixth Man",
    "Starter",
    "All-Star",
];

/// Minutes an unmapped (mode, tier) combination falls back to.
pub const DEFAULT_BASE_MINUTES: f32 = 12.0;

const HIGH_SCHOOL_MINUTES: [f32; TIER_COUNT] = [8.0, 14.0, 20.0, 26.0, 30.0];
const COLLEGE_MINUTES: [f32; TIER_COUNT] = [8.0, 16.0, 22.0, 28.0, 34.0];
const PRO_MINUTES: [f32; TIER_COUNT] = [10.0, 16.0, 22.0, 30.0, 36.0];

/// Production multiplier by tier: bench roles produce well under a starter,
/// the top tier gets the star bump.
const ROLE_MULTIPLIERS: [f32; TIER_COUNT] = [0.65, 0.8, 1.0, 1.15, 1.4];

/// Base minutes for a role tier, falling back to the shared default when the
/// tier index is out of the ladder.
#[must_use]
pub fn base_minutes(mode: GameMode, tier: usize) -> f32 {
    let table = match mode {
        GameMode::HighSchool => &HIGH_SCHOOL_MINUTES,
        GameMode::College => &COLLEGE_MINUTES,
        GameMode::Professional => &PRO_MINUTES,
    };
    table.get(tier).copied().unwrap_or(DEFAULT_BASE_MINUTES)
}

/// Production multiplier for a role tier.
#[must_use]
pub fn role_multiplier(tier: usize) -> f32 {
    ROLE_MULTIPLIERS.get(tier).copied().unwrap_or(1.0)
}

/// Display name for a tier in a mode's ladder.
#[must_use]
pub fn role_name(mode: GameMode, tier: usize) -> &'static str {
    mode.roles().get(tier).copied().unwrap_or("Roster Player")
}

/// On-court position; skews the box score toward realistic shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    #[default]
    PointGuard,
    ShootingGuard,
    SmallForward,
    PowerForward,
    Center,
}

impl Position {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::PointGuard => "Point Guard",
            Self::ShootingGuard => "Shooting Guard",
            Self::SmallForward => "Small Forward",
            Self::PowerForward => "Power Forward",
            Self::Center => "Center",
        }
    }

    #[must_use]
    pub const fn scoring_factor(self) -> f32 {
        match self {
            Self::PointGuard => 1.05,
            Self::ShootingGuard => 1.15,
            Self::SmallForward => 1.0,
            Self::PowerForward => 0.9,
            Self::Center => 0.85,
        }
    }

    #[must_use]
    pub const fn rebound_factor(self) -> f32 {
        match self {
            Self::PointGuard => 0.6,
            Self::ShootingGuard => 0.7,
            Self::SmallForward => 1.0,
            Self::PowerForward => 1.3,
            Self::Center => 1.5,
        }
    }

    #[must_use]
    pub const fn assist_factor(self) -> f32 {
        match self {
            Self::PointGuard => 1.6,
            Self::ShootingGuard => 1.2,
            Self::SmallForward => 1.0,
            Self::PowerForward => 0.7,
            Self::Center => 0.5,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
