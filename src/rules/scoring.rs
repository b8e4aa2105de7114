//! Scoring formulas.
//!
//! Pure functions of the scoring table and the session counters, so the
//! session only decides *when* to score and these decide *how much*.

use serde::{Deserialize, Serialize};

use crate::core::ScoringConfig;

/// Time bonus for a match: `cap - floor(elapsed / interval)`, floored at 0.
#[must_use]
pub fn time_bonus(scoring: &ScoringConfig, elapsed: f64) -> u64 {
    if scoring.time_bonus_interval <= 0.0 {
        return scoring.time_bonus_cap;
    }
    let lost = (elapsed.max(0.0) / scoring.time_bonus_interval).floor() as u64;
    scoring.time_bonus_cap.saturating_sub(lost)
}

/// Points for one match.
///
/// `combo` and `streak` are the counters as they stood *before* this match.
#[must_use]
pub fn match_score(scoring: &ScoringConfig, elapsed: f64, combo: u32, streak: u32) -> u64 {
    scoring.match_base
        + time_bonus(scoring, elapsed)
        + u64::from(combo) * scoring.combo_step
        + u64::from(streak) * scoring.streak_step
}

/// Whether a streak of this length earns the streak bonus.
#[must_use]
pub fn streak_bonus_due(scoring: &ScoringConfig, streak: u32) -> bool {
    streak >= scoring.streak_threshold
}

/// Breakdown of the end-of-game bonus.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalScore {
    pub time_bonus: u64,
    pub move_bonus: u64,
    pub perfect_bonus: u64,
}

impl FinalScore {
    #[must_use]
    pub fn total(&self) -> u64 {
        self.time_bonus + self.move_bonus + self.perfect_bonus
    }
}

/// End-of-game bonus.
///
/// The perfect bonus is paid only when `matched_pairs == total_pairs`.
#[must_use]
pub fn final_score(
    scoring: &ScoringConfig,
    elapsed: f64,
    moves: u32,
    matched_pairs: u32,
    total_pairs: u32,
) -> FinalScore {
    let whole_seconds = elapsed.max(0.0).floor() as u64;
    FinalScore {
        time_bonus: scoring.final_time_cap.saturating_sub(whole_seconds),
        move_bonus: scoring
            .final_move_cap
            .saturating_sub(u64::from(moves) * scoring.move_penalty),
        perfect_bonus: if matched_pairs == total_pairs {
            scoring.perfect_bonus
        } else {
            0
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_bonus() {
        let s = ScoringConfig::default();
        assert_eq!(time_bonus(&s, 0.0), 50);
        assert_eq!(time_bonus(&s, 9.9), 50);
        assert_eq!(time_bonus(&s, 10.0), 49);
        assert_eq!(time_bonus(&s, 125.0), 38);
        assert_eq!(time_bonus(&s, 499.9), 1);
        assert_eq!(time_bonus(&s, 5000.0), 0);
    }

    #[test]
    fn test_match_score() {
        let s = ScoringConfig::default();
        assert_eq!(match_score(&s, 0.0, 0, 0), 150);
        // 100 + 48 + 2*25 + 2*10
        assert_eq!(match_score(&s, 20.0, 2, 2), 218);
    }

    #[test]
    fn test_streak_threshold() {
        let s = ScoringConfig::default();
        assert!(!streak_bonus_due(&s, 2));
        assert!(streak_bonus_due(&s, 3));
        assert!(streak_bonus_due(&s, 4));
    }

    #[test]
    fn test_final_score() {
        let s = ScoringConfig::default();
        let f = final_score(&s, 61.7, 12, 8, 8);
        assert_eq!(f.time_bonus, 939);
        assert_eq!(f.move_bonus, 380);
        assert_eq!(f.perfect_bonus, 500);
        assert_eq!(f.total(), 1819);
    }

    #[test]
    fn test_final_score_floors_at_zero() {
        let s = ScoringConfig::default();
        let f = final_score(&s, 2000.0, 80, 8, 8);
        assert_eq!(f.time_bonus, 0);
        assert_eq!(f.move_bonus, 0);
        assert_eq!(f.total(), 500);
    }

    #[test]
    fn test_perfect_bonus_needs_all_pairs() {
        let s = ScoringConfig::default();
        assert_eq!(final_score(&s, 0.0, 0, 7, 8).perfect_bonus, 0);
    }
}
