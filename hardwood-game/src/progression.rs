//! Role progression: performance score, graduation, promotion, demotion.
use crate::roles::{self, GameMode};
use crate::state::Player;
use crate::stats::Stats;

/// Season count that triggers graduation out of a scholastic mode.
pub const GRADUATION_SEASONS: u32 = 4;
/// Age that forces the jump from College to Professional.
pub const COLLEGE_AGE_LIMIT: u32 = 22;

const DEMOTION_BASE: i32 = 70;
const DEMOTION_PER_TIER: i32 = 10;

/// Weighted composite of the stat sheet used for tier decisions.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn performance_score(stats: &Stats) -> i32 {
    (stats.shooting as f32 * 1.2
        + stats.athleticism as f32 * 1.1
        + stats.basketball_iq as f32 * 1.0
        + stats.professionalism as f32 * 0.5
        + stats.charisma as f32 * 0.2)
        .round() as i32
}

/// Result of one progression evaluation. The caller applies the new mode and
/// tier and appends the messages to the career log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressionOutcome {
    pub mode: GameMode,
    pub role_tier: usize,
    pub graduated: bool,
    pub messages: Vec<String>,
}

impl ProgressionOutcome {
    /// Whether anything actually changed relative to the player.
    #[must_use]
    pub fn changes(&self, player: &Player) -> bool {
        self.graduated || self.mode != player.mode || self.role_tier != player.role_tier
    }
}

/// Evaluate graduation and tier movement for the player.
///
/// Graduation is only checked at season end and always lands the player on
/// the lowest tier of the next mode before promotion is considered; mode
/// transitions never go backward. Promotion picks the highest threshold met
/// and may skip tiers. Demotion applies only when no promotion did, only at
/// season end, and moves exactly one tier down.
#[must_use]
pub fn evaluate_progression(player: &Player, at_season_end: bool) -> ProgressionOutcome {
    let score = performance_score(&player.stats);
    let mut mode = player.mode;
    let mut tier = player.role_tier;
    let mut graduated = false;
    let mut messages = Vec::new();

    if at_season_end {
        let ready = match mode {
            GameMode::HighSchool => player.current_season_in_mode >= GRADUATION_SEASONS,
            GameMode::College => {
                player.current_season_in_mode >= GRADUATION_SEASONS
                    || player.age >= COLLEGE_AGE_LIMIT
            }
            GameMode::Professional => false,
        };
        if ready {
            if let Some(next) = mode.next() {
                mode = next;
                tier = 0;
                graduated = true;
                messages.push(format!(
                    "Moved up to {}: starting over as {}.",
                    mode.label(),
                    roles::role_name(mode, tier)
                ));
            }
        }
    }

    let thresholds = mode.promotion_thresholds();
    let mut target = tier;
    for (idx, threshold) in thresholds.iter().enumerate() {
        if score > *threshold {
            target = roles::TIER_COUNT - 1 - idx;
            break;
        }
    }

    if target > tier {
        tier = target;
        messages.push(format!(
            "Promoted to {}! (performance score {score})",
            roles::role_name(mode, tier)
        ));
    } else if !graduated
        && at_season_end
        && tier > 0
        && score < demotion_threshold(tier)
    {
        tier -= 1;
        messages.push(format!(
            "Sent down to {} after a quiet season.",
            roles::role_name(mode, tier)
        ));
    }

    ProgressionOutcome {
        mode,
        role_tier: tier,
        graduated,
        messages,
    }
}

/// Score below which a tier is lost at season end.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
pub fn demotion_threshold(tier: usize) -> i32 {
    DEMOTION_BASE + (tier as i32) * DEMOTION_PER_TIER
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player_with_score(target: i32) -> Player {
        // Professionalism and charisma pinned low so the primary skills set
        // the score; solve roughly for equal primaries.
        let mut player = Player::sample(GameMode::HighSchool);
        player.stats.professionalism = 10;
        player.stats.charisma = 10;
        let primaries = (target - 7) / 3;
        player.stats.shooting = primaries.clamp(10, 99);
        player.stats.athleticism = primaries.clamp(10, 99);
        player.stats.basketball_iq = primaries.clamp(10, 99);
        player
    }

    #[test]
    fn score_weights_match_contract() {
        let stats = Stats {
            shooting: 50,
            athleticism: 50,
            basketball_iq: 50,
            charisma: 50,
            professionalism: 50,
            energy: 80,
            morale: 80,
        };
        assert_eq!(performance_score(&stats), 200);
    }

    #[test]
    fn promotion_can_skip_tiers() {
        let mut player = player_with_score(250);
        player.role_tier = 0;
        let outcome = evaluate_progression(&player, false);
        assert_eq!(outcome.role_tier, 4, "should jump straight to the top tier");
        assert!(!outcome.graduated);
        assert!(!outcome.messages.is_empty());
    }

    #[test]
    fn promotion_never_moves_down() {
        let mut player = player_with_score(50);
        player.role_tier = 3;
        let outcome = evaluate_progression(&player, false);
        assert_eq!(outcome.role_tier, 3, "mid-season low scores do not demote");
        assert!(outcome.messages.is_empty());
    }

    #[test]
    fn demotion_only_one_tier_at_season_end() {
        let mut player = player_with_score(50);
        player.role_tier = 4;
        player.current_season_in_mode = 2;
        let outcome = evaluate_progression(&player, true);
        assert_eq!(outcome.role_tier, 3);
        assert_eq!(outcome.mode, GameMode::HighSchool);
    }

    #[test]
    fn floor_tier_never_demotes() {
        let mut player = player_with_score(20);
        player.role_tier = 0;
        player.current_season_in_mode = 1;
        let outcome = evaluate_progression(&player, true);
        assert_eq!(outcome.role_tier, 0);
    }

    #[test]
    fn high_school_graduates_after_four_seasons() {
        let mut player = player_with_score(100);
        player.current_season_in_mode = GRADUATION_SEASONS;
        let outcome = evaluate_progression(&player, true);
        assert!(outcome.graduated);
        assert_eq!(outcome.mode, GameMode::College);
        assert_eq!(outcome.role_tier, 0);
    }

    #[test]
    fn college_graduates_by_age() {
        let mut player = Player::sample(GameMode::College);
        player.age = COLLEGE_AGE_LIMIT;
        player.current_season_in_mode = 2;
        player.stats.shooting = 40;
        player.stats.athleticism = 40;
        player.stats.basketball_iq = 40;
        let outcome = evaluate_progression(&player, true);
        assert!(outcome.graduated);
        assert_eq!(outcome.mode, GameMode::Professional);
    }

    #[test]
    fn graduate_can_promote_in_new_mode_immediately() {
        let mut player = player_with_score(280);
        player.current_season_in_mode = GRADUATION_SEASONS;
        let outcome = evaluate_progression(&player, true);
        assert!(outcome.graduated);
        assert_eq!(outcome.mode, GameMode::College);
        assert!(
            outcome.role_tier > 0,
            "a dominant score should clear College thresholds on arrival"
        );
    }

    #[test]
    fn professionals_never_graduate() {
        let mut player = Player::sample(GameMode::Professional);
        player.current_season_in_mode = 10;
        player.age = 35;
        let outcome = evaluate_progression(&player, true);
        assert!(!outcome.graduated);
        assert_eq!(outcome.mode, GameMode::Professional);
    }
}
