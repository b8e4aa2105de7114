//! Game rules that do not need session state.
//!
//! Currently the scoring formulas. The session calls into these and
//! applies the results.

pub mod scoring;

pub use scoring::{final_score, match_score, streak_bonus_due, time_bonus, FinalScore};
