//! Narrative event catalog data: events, choices, and effect descriptors.
//!
//! Choices carry declarative effect descriptors interpreted by the engine
//! rather than action closures, so catalog content stays pure data and the
//! snapshot-in / snapshot-out contract cannot be broken by event content.
use serde::{Deserialize, Serialize};

use crate::roles::GameMode;
use crate::state::Player;
use crate::stats::StatKey;

/// Catalog filter tag. Used only when selecting events, never for engine
/// branching once an event is in play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    Daily,
    GameDay,
    Injury,
    Agent,
    #[default]
    Contextual,
    Scheduled,
}

/// Gate that disables a choice unless the player can pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatCost {
    pub stat: StatKey,
    pub amount: i32,
}

/// Declarative outcome of picking a choice. All deltas are integers and are
/// applied through the clamping stat model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ChoiceEffects {
    #[serde(default)]
    pub shooting: i32,
    #[serde(default)]
    pub athleticism: i32,
    #[serde(default)]
    pub basketball_iq: i32,
    #[serde(default)]
    pub charisma: i32,
    #[serde(default)]
    pub professionalism: i32,
    #[serde(default)]
    pub energy: i32,
    #[serde(default)]
    pub morale: i32,
    #[serde(default)]
    pub skill_points: i64,
    /// Run the diminishing-returns growth roll on this stat.
    #[serde(default)]
    pub train: Option<StatKey>,
    /// Grant the trait, or raise its level if already owned.
    #[serde(default)]
    pub grant_trait: Option<String>,
    /// Outcome line appended to the career log.
    #[serde(default)]
    pub log: Option<String>,
    /// Id of an event shown immediately, before the calendar advances.
    #[serde(default)]
    pub follow_up: Option<String>,
    /// Resolve the scheduled game for the current day.
    #[serde(default)]
    pub plays_game: bool,
}

/// A selectable option inside an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    pub label: String,
    #[serde(default)]
    pub cost: Option<StatCost>,
    #[serde(default)]
    pub effects: ChoiceEffects,
}

/// One-off predicate gating a scheduled event. Every populated field must
/// match the player for the event to fire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct EventCondition {
    #[serde(default)]
    pub mode: Option<GameMode>,
    #[serde(default)]
    pub min_season: Option<u32>,
    #[serde(default)]
    pub day_in_season: Option<u32>,
    #[serde(default)]
    pub min_role_tier: Option<usize>,
}

impl EventCondition {
    /// Whether every populated field matches the player's current state.
    #[must_use]
    pub fn matches(&self, player: &Player) -> bool {
        if self.mode.is_some_and(|mode| mode != player.mode) {
            return false;
        }
        if self
            .min_season
            .is_some_and(|season| player.current_season_in_mode < season)
        {
            return false;
        }
        if self
            .day_in_season
            .is_some_and(|day| player.current_day_in_season != day)
        {
            return false;
        }
        if self
            .min_role_tier
            .is_some_and(|tier| player.role_tier < tier)
        {
            return false;
        }
        true
    }
}

/// A narrative event surfaced to the player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameEvent {
    pub id: String,
    pub title: String,
    pub desc: String,
    #[serde(default = "default_weight")]
    pub weight: u32,
    #[serde(default)]
    pub category: EventCategory,
    #[serde(default)]
    pub mandatory: bool,
    /// Mode keys the event is eligible for; empty means all modes.
    #[serde(default)]
    pub modes: Vec<String>,
    /// Role names the event is eligible for; empty means all roles.
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub condition: Option<EventCondition>,
    #[serde(default)]
    pub choices: Vec<Choice>,
}

fn default_weight() -> u32 {
    5
}

/// Container for all event catalog data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct EventData {
    pub events: Vec<GameEvent>,
}

impl EventData {
    /// Create an empty catalog (useful for tests).
    #[must_use]
    pub fn empty() -> Self {
        Self { events: Vec::new() }
    }

    /// Load the catalog from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed into valid event data.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Build a catalog from pre-parsed events.
    #[must_use]
    pub fn from_events(events: Vec<GameEvent>) -> Self {
        Self { events }
    }

    /// Look up an event by id.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&GameEvent> {
        self.events.iter().find(|event| event.id == id)
    }

    /// Scheduled events carrying a condition, in catalog order.
    pub fn scheduled(&self) -> impl Iterator<Item = &GameEvent> {
        self.events.iter().filter(|event| {
            event.category == EventCategory::Scheduled && event.condition.is_some()
        })
    }
}
