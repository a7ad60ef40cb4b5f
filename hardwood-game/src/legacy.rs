//! Retirement accounting: converting a finished career into meta currency
//! for the next run.
use serde::{Deserialize, Serialize};

use crate::state::Player;

/// Meta points earned per week of career played, before the flooring step.
pub const PAYOUT_PER_WEEK: f64 = 2.5;

/// Outcome of closing out a career.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetirementSummary {
    /// Points earned by this run alone.
    pub payout: i64,
    /// Carried total after adding the payout to the pre-run balance.
    pub new_total: i64,
}

/// Meta payout for a finished career: longevity pays per week, and the two
/// headline physical skills pay face value.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn career_payout(weeks_played: u32, shooting: i32, athleticism: i32) -> i64 {
    let longevity = (f64::from(weeks_played) * PAYOUT_PER_WEEK).floor() as i64;
    longevity + i64::from(shooting) + i64::from(athleticism)
}

/// Close out the player's career: compute the payout, add it to the meta
/// balance captured at run start, and store the new total on the player.
pub fn finalize_retirement(player: &mut Player, meta_at_run_start: i64) -> RetirementSummary {
    let payout = career_payout(
        player.total_weeks_played,
        player.stats.shooting,
        player.stats.athleticism,
    );
    let new_total = meta_at_run_start + payout;
    player.skill_points = new_total;
    player.career_over = true;
    player.log(format!(
        "Career complete: {} legacy points earned ({} total).",
        payout, new_total
    ));
    RetirementSummary { payout, new_total }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roles::GameMode;

    #[test]
    fn payout_formula_is_exact() {
        // floor(40 * 2.5) + 60 + 55 = 215 earned this run.
        assert_eq!(career_payout(40, 60, 55), 215);
        // Odd week counts floor: floor(41 * 2.5) = 102.
        assert_eq!(career_payout(41, 60, 55), 217);
        assert_eq!(career_payout(0, 10, 10), 20);
    }

    #[test]
    fn finalize_adds_payout_to_run_start_balance() {
        let mut player = Player::sample(GameMode::Professional);
        player.total_weeks_played = 40;
        player.stats.shooting = 60;
        player.stats.athleticism = 55;
        let summary = finalize_retirement(&mut player, 100);
        assert_eq!(summary.payout, 215);
        assert_eq!(summary.new_total, 315);
        assert_eq!(player.skill_points, 315);
        assert!(player.career_over);
        assert!(player.career_log.iter().any(|l| l.contains("315")));
    }
}
