//! The turn state machine: one career session, one choice at a time.
//!
//! A session owns the player, the event catalog, and the random source. Every
//! turn resolves against clones and commits only on success, so a failed
//! action can never leave the career half-mutated.
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use smallvec::SmallVec;

use crate::data::{EventCategory, EventData, GameEvent};
use crate::error::EngineError;
use crate::events;
use crate::legacy::{self, RetirementSummary};
use crate::performance::{self, GameSummary};
use crate::progression;
use crate::roles::{GameMode, Position};
use crate::schedule::{self, SlotType};
use crate::state::{GamePhase, Player, SaveData, seed_bytes};
use crate::stats::{self, StatKey};
use crate::traits::TraitKind;

/// Energy level below which the daily injury roll is live.
pub const INJURY_ENERGY_GATE: i32 = 30;
/// Base daily injury chance once the gate is open.
pub const INJURY_BASE_CHANCE: f32 = 0.10;
/// Agent meetings recur on this total-day cadence once unlocked.
pub const AGENT_MEETING_INTERVAL: u32 = 30;
/// Chance an ordinary day surfaces a contextual event instead of practice.
pub const CONTEXTUAL_EVENT_CHANCE: f32 = 0.35;
/// Chance a fully drained player walks away for good.
pub const BURNOUT_RETIRE_CHANCE: f32 = 0.20;
/// Age past which each further year adds 10% retirement chance.
pub const RETIREMENT_AGE: u32 = 38;
/// Skill points awarded for winning a championship game.
pub const CHAMPIONSHIP_SKILL_POINT_BONUS: i64 = 5;

const PRACTICE_ENERGY_COST: std::ops::RangeInclusive<i32> = 15..=24;
const PRACTICE_RECOVERY: std::ops::RangeInclusive<i32> = 5..=12;
/// Professionalism above this earns partial energy recovery after practice.
const PRACTICE_RECOVERY_GATE: i32 = 70;

const GAME_ENERGY_COST: std::ops::RangeInclusive<i32> = 12..=18;
const GAME_ENERGY_COST_HARD: std::ops::RangeInclusive<i32> = 20..=28;
/// Energy above which the player gives full effort in a game.
const PLAY_HARD_ENERGY_GATE: i32 = 60;

const MORALE_ON_WIN: i64 = 4;
const MORALE_ON_LOSS: i64 = -3;

/// Per-turn message list; most turns produce only a handful of lines.
pub type Messages = SmallVec<[String; 4]>;

/// Everything the presentation layer needs to render one resolved turn.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnOutcome {
    pub messages: Messages,
    pub next_event: Option<GameEvent>,
    pub game_over: bool,
    pub game_summary: Option<GameSummary>,
}

/// One running career. Construct with [`CareerSession::new`] or rebuild from
/// a snapshot with [`CareerSession::from_save`].
#[derive(Debug, Clone)]
pub struct CareerSession {
    player: Player,
    data: EventData,
    rng: ChaCha20Rng,
    seed: u64,
    phase: GamePhase,
    current_event: Option<GameEvent>,
    meta_points_at_run_start: i64,
}

impl CareerSession {
    /// Start a fresh career.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ScheduleGeneration`] when the opening season
    /// schedule cannot be built.
    pub fn new(
        name: &str,
        position: Position,
        seed: u64,
        meta_points: i64,
        data: EventData,
    ) -> Result<Self, EngineError> {
        let mut rng = ChaCha20Rng::from_seed(seed_bytes(seed));
        let player = Player::new(name, position, meta_points, &mut rng)?;
        let mut session = Self {
            player,
            data,
            rng,
            seed,
            phase: GamePhase::Playing,
            current_event: None,
            meta_points_at_run_start: meta_points,
        };
        session.refresh_current_event();
        Ok(session)
    }

    /// Rebuild a session from a snapshot. The random source is rehydrated
    /// from the seed mixed with elapsed days, and the current event is
    /// regenerated from the restored player rather than persisted.
    #[must_use]
    pub fn from_save(save: SaveData, data: EventData) -> Self {
        let rng = ChaCha20Rng::from_seed(seed_bytes(
            save.seed.wrapping_add(u64::from(save.player.total_days_played)),
        ));
        let mut session = Self {
            player: save.player,
            data,
            rng,
            seed: save.seed,
            phase: save.phase,
            current_event: None,
            meta_points_at_run_start: save.meta_points_at_run_start,
        };
        if session.phase == GamePhase::Playing && !session.player.career_over {
            session.refresh_current_event();
        }
        session
    }

    /// Snapshot for the persistence collaborator.
    #[must_use]
    pub fn save_data(&self) -> SaveData {
        SaveData {
            seed: self.seed,
            player: self.player.clone(),
            phase: self.phase,
            meta_points: self.player.skill_points,
            meta_points_at_run_start: self.meta_points_at_run_start,
        }
    }

    #[must_use]
    pub fn player(&self) -> &Player {
        &self.player
    }

    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    #[must_use]
    pub fn current_event(&self) -> Option<&GameEvent> {
        self.current_event.as_ref()
    }

    /// Resolve the current event with the choice at `index`.
    ///
    /// The whole turn runs against clones of the player and random source and
    /// commits only at the end; on any error the session is untouched.
    ///
    /// # Errors
    ///
    /// [`EngineError::InvalidChoice`] for a bad index or an unaffordable
    /// cost, [`EngineError::ActionFailed`] when the career is already over or
    /// no event is active, [`EngineError::ScheduleGeneration`] if a season
    /// rollover cannot build the next schedule.
    pub fn resolve_choice(&mut self, index: usize) -> Result<TurnOutcome, EngineError> {
        if self.phase == GamePhase::GameOver || self.player.career_over {
            return Err(EngineError::ActionFailed(String::from(
                "the career is over",
            )));
        }
        let event = self
            .current_event
            .clone()
            .ok_or_else(|| EngineError::ActionFailed(String::from("no active event")))?;
        let choice = event.choices.get(index).ok_or_else(|| {
            EngineError::InvalidChoice(format!(
                "choice {index} out of range for '{}'",
                event.id
            ))
        })?;
        if let Some(cost) = &choice.cost {
            if self.player.stat(cost.stat) < i64::from(cost.amount) {
                return Err(EngineError::InvalidChoice(format!(
                    "cannot pay {} {}",
                    cost.amount,
                    cost.stat.as_str()
                )));
            }
        }

        let mut player = self.player.clone();
        let mut rng = self.rng.clone();
        let mut messages = Messages::new();
        let mut game_summary = None;

        if let Some(cost) = &choice.cost {
            player.adjust_stat(cost.stat, -i64::from(cost.amount));
        }
        if let Some(key) = choice.effects.train {
            train_stat(&mut player, key, &mut rng, &mut messages);
        }
        player.apply_effects(&choice.effects);
        if let Some(line) = &choice.effects.log {
            messages.push(line.clone());
        }

        match event.category {
            EventCategory::Contextual => {
                player.last_contextual_title = Some(event.title.clone());
                player.log(format!("[event] {}", event.title));
            }
            EventCategory::Scheduled => {
                player.fired_events.insert(event.id.clone());
            }
            _ => {}
        }

        if choice.effects.plays_game {
            game_summary = self.play_scheduled_game(&mut player, &mut rng, &mut messages);
        }

        // Follow-up events interrupt the day: the calendar holds still and
        // the follow-up becomes the next prompt. The terminal check still
        // runs on every turn.
        let follow_up = choice
            .effects
            .follow_up
            .as_deref()
            .and_then(|id| self.data.find(id))
            .cloned();
        if follow_up.is_none() {
            self.advance_calendar(&mut player, &mut rng, &mut messages)?;
        }
        let next_event = if check_terminal(&mut player, &mut rng, &mut messages) {
            // Forced career end reconciles the legacy payout immediately.
            let summary =
                legacy::finalize_retirement(&mut player, self.meta_points_at_run_start);
            messages.push(format!("Legacy points earned: {}.", summary.payout));
            None
        } else if follow_up.is_some() {
            follow_up
        } else {
            self.select_event(&mut player, &mut rng, true, &mut messages)
        };

        let game_over = player.career_over;
        self.player = player;
        self.rng = rng;
        self.current_event = next_event.clone();
        if game_over {
            self.phase = GamePhase::GameOver;
        }

        Ok(TurnOutcome {
            messages,
            next_event,
            game_over,
            game_summary,
        })
    }

    /// Voluntarily end the career and bank the legacy payout.
    ///
    /// # Errors
    ///
    /// Fails with [`EngineError::ActionFailed`] when already retired.
    pub fn retire(&mut self) -> Result<RetirementSummary, EngineError> {
        if self.phase == GamePhase::GameOver {
            return Err(EngineError::ActionFailed(String::from(
                "the career is already over",
            )));
        }
        self.player.retirement_reason = Some(String::from("voluntary retirement"));
        let summary = legacy::finalize_retirement(&mut self.player, self.meta_points_at_run_start);
        self.phase = GamePhase::GameOver;
        self.current_event = None;
        Ok(summary)
    }

    /// Regenerate the current event from the player as they stand. Used at
    /// construction and load; never applies practice or mutates the player.
    fn refresh_current_event(&mut self) {
        let mut player = self.player.clone();
        let mut rng = self.rng.clone();
        let mut messages = Messages::new();
        let event = self.select_event(&mut player, &mut rng, false, &mut messages);
        self.rng = rng;
        self.current_event = event;
    }

    /// Move the calendar one day, handling season rollover, aging,
    /// progression, and schedule regeneration.
    fn advance_calendar(
        &self,
        player: &mut Player,
        rng: &mut ChaCha20Rng,
        messages: &mut Messages,
    ) -> Result<(), EngineError> {
        player.current_day_in_season += 1;
        player.total_days_played += 1;
        player.total_weeks_played = player.total_days_played / schedule::GAME_DAY_INTERVAL;

        if player.current_day_in_season > player.schedule.span() {
            player.age += 1;
            let record = format!(
                "Season complete: {}-{} ({}).",
                player.schedule.wins,
                player.schedule.losses,
                player.mode.label()
            );
            messages.push(record.clone());
            player.log(record);

            let outcome = progression::evaluate_progression(player, true);
            let graduated = outcome.graduated;
            player.mode = outcome.mode;
            player.role_tier = outcome.role_tier;
            for line in outcome.messages {
                messages.push(line.clone());
                player.log(line);
            }
            if graduated {
                player.current_season_in_mode = 1;
            } else {
                player.current_season_in_mode += 1;
            }
            player.schedule = schedule::generate_schedule(player.mode, rng)?;
            player.current_day_in_season = 1;
            messages.push(format!(
                "Season {} tips off as {}.",
                player.current_season_in_mode,
                player.role_name()
            ));
        } else {
            // Strong stretches can earn a mid-season call-up.
            let outcome = progression::evaluate_progression(player, false);
            if outcome.changes(player) {
                player.role_tier = outcome.role_tier;
                for line in outcome.messages {
                    messages.push(line.clone());
                    player.log(line);
                }
            }
        }
        Ok(())
    }

    /// Pick the next event for the player's day, in priority order:
    /// unfired scheduled events, the injury gate, the day's game slot, the
    /// recurring agent meeting, a contextual roll, and finally automated
    /// practice followed by the free-time prompt.
    fn select_event(
        &self,
        player: &mut Player,
        rng: &mut ChaCha20Rng,
        apply_practice: bool,
        messages: &mut Messages,
    ) -> Option<GameEvent> {
        for event in self.data.scheduled() {
            if !player.fired_events.contains(&event.id) && events::is_eligible(event, player) {
                return Some(event.clone());
            }
        }

        if player.stats.energy < INJURY_ENERGY_GATE {
            let chance =
                (INJURY_BASE_CHANCE - player.trait_effect(TraitKind::InjuryGuard)).max(0.0);
            if rng.gen_range(0.0..1.0) < chance {
                if let Some(event) =
                    events::pick_category_event(&self.data, EventCategory::Injury, player, rng)
                {
                    return Some(event);
                }
            }
        }

        if let Some(slot) = player.schedule.slot_at(player.current_day_in_season) {
            let benched = slot.slot_type.is_postseason() && player.schedule.playoff_eliminated;
            if slot.slot_type.is_game() && slot.result.is_none() && !benched {
                return Some(events::game_day_event(slot));
            }
        }

        if agent_meeting_due(player) {
            if let Some(event) =
                events::pick_category_event(&self.data, EventCategory::Agent, player, rng)
            {
                return Some(event);
            }
        }

        if rng.gen_range(0.0..1.0) < CONTEXTUAL_EVENT_CHANCE {
            if let Some(event) = events::pick_contextual_event(&self.data, player, rng) {
                return Some(event);
            }
        }

        if apply_practice {
            automated_practice(player, rng, messages);
        }
        Some(events::daily_choice_event())
    }

    /// Resolve today's scheduled game for the player.
    fn play_scheduled_game(
        &self,
        player: &mut Player,
        rng: &mut ChaCha20Rng,
        messages: &mut Messages,
    ) -> Option<GameSummary> {
        let position = player.current_day_in_season;
        let slot = player.schedule.slot_at(position)?;
        if !slot.slot_type.is_game() || slot.result.is_some() {
            return None;
        }
        let slot_type = slot.slot_type;
        let opponent = slot.opponent.clone().unwrap_or_default();

        let played_hard = player.stats.energy > PLAY_HARD_ENERGY_GATE;
        let summary = performance::simulate_game(player, played_hard, rng);

        let cost_range = if played_hard {
            GAME_ENERGY_COST_HARD
        } else {
            GAME_ENERGY_COST
        };
        player.adjust_stat(StatKey::Energy, -i64::from(rng.gen_range(cost_range)));

        #[allow(clippy::cast_possible_truncation)]
        let recovery = player.trait_effect(TraitKind::MoraleRecovery).round() as i64;
        let morale_delta = if summary.team_won {
            MORALE_ON_WIN
        } else {
            (MORALE_ON_LOSS + recovery).min(0)
        };
        player.adjust_stat(StatKey::Morale, morale_delta);

        let line = &summary.stat_line;
        let verdict = if summary.team_won { "W" } else { "L" };
        let box_score = format!(
            "{verdict} vs {opponent}: {} pts, {} reb, {} ast in {} min.",
            line.points, line.rebounds, line.assists, line.minutes
        );
        messages.push(box_score.clone());
        player.log(box_score);

        let newly_eliminated = player.schedule.record_result(position, summary.clone());
        if newly_eliminated {
            let note = String::from("Eliminated from the postseason.");
            messages.push(note.clone());
            player.log(note);
        }
        if slot_type == SlotType::Championship && summary.team_won {
            player.skill_points += CHAMPIONSHIP_SKILL_POINT_BONUS;
            let note = String::from("Championship won! The whole city knows your name.");
            messages.push(note.clone());
            player.log(note);
        }

        Some(summary)
    }
}

/// Whether today is an unlocked agent-meeting day. Agents only take the
/// meeting seriously once the player is a professional, or an upperclassman
/// in College.
fn agent_meeting_due(player: &Player) -> bool {
    let unlocked = match player.mode {
        GameMode::Professional => true,
        GameMode::College => player.current_season_in_mode >= 3,
        GameMode::HighSchool => false,
    };
    unlocked
        && player.total_days_played > 0
        && player.total_days_played % AGENT_MEETING_INTERVAL == 0
}

/// Run the diminishing-returns growth roll on one trainable stat.
fn train_stat(player: &mut Player, key: StatKey, rng: &mut ChaCha20Rng, messages: &mut Messages) {
    if !key.is_trainable() {
        return;
    }
    #[allow(clippy::cast_possible_truncation)]
    let current = player.stat(key) as i32;
    let bonus = player.trait_effect(TraitKind::TrainingBonus);
    let gain = stats::training_gain(current, player.stats.professionalism, bonus, rng);
    if gain > 0 {
        player.adjust_stat(key, i64::from(gain));
        messages.push(format!("Focused work pays off: {} +{gain}.", key.as_str()));
    } else {
        messages.push(String::from("The extra work doesn't click today."));
    }
}

/// The baseline practice every ordinary day runs before free time.
fn automated_practice(player: &mut Player, rng: &mut ChaCha20Rng, messages: &mut Messages) {
    const TRAINABLE: [StatKey; 3] = [
        StatKey::Shooting,
        StatKey::Athleticism,
        StatKey::BasketballIq,
    ];
    let key = TRAINABLE[rng.gen_range(0..TRAINABLE.len())];
    #[allow(clippy::cast_possible_truncation)]
    let current = player.stat(key) as i32;
    let bonus = player.trait_effect(TraitKind::TrainingBonus);
    let gain = stats::training_gain(current, player.stats.professionalism, bonus, rng);
    if gain > 0 {
        player.adjust_stat(key, i64::from(gain));
        messages.push(format!("Practice: {} +{gain}.", key.as_str()));
    } else {
        messages.push(String::from("Practice: no visible progress today."));
    }
    player.adjust_stat(StatKey::Energy, -i64::from(rng.gen_range(PRACTICE_ENERGY_COST)));
    if player.stats.professionalism > PRACTICE_RECOVERY_GATE {
        player.adjust_stat(StatKey::Energy, i64::from(rng.gen_range(PRACTICE_RECOVERY)));
    }
}

/// Roll the end-of-career checks. Returns true when the career just ended.
fn check_terminal(player: &mut Player, rng: &mut ChaCha20Rng, messages: &mut Messages) -> bool {
    if player.career_over {
        return true;
    }
    if player.stats.energy <= 0 && rng.gen_range(0.0..1.0) < BURNOUT_RETIRE_CHANCE {
        player.career_over = true;
        player.retirement_reason = Some(String::from("burnout"));
        let note = String::from("CAREER OVER: burnout forced an early retirement.");
        messages.push(note.clone());
        player.log(note);
        return true;
    }
    if player.age > RETIREMENT_AGE {
        #[allow(clippy::cast_precision_loss)]
        let chance = (player.age - RETIREMENT_AGE) as f32 * 0.10;
        if rng.gen_range(0.0..1.0) < chance {
            player.career_over = true;
            player.retirement_reason = Some(String::from("age"));
            let note = format!("CAREER OVER: retired at age {}.", player.age);
            messages.push(note.clone());
            player.log(note);
            return true;
        }
    }
    false
}
