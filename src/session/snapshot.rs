//! Read-only view of a session for the renderer.
//!
//! The board is an `im::Vector`, so taking a snapshot every frame shares
//! the card storage with the session instead of copying it.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::bonus::BonusWindow;
use crate::cards::Card;
use crate::core::{CardIndex, DeckKind, Difficulty};
use crate::powerups::PowerUpState;
use crate::rules::FinalScore;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub difficulty: Difficulty,
    pub deck: DeckKind,
    pub board: Vector<Card>,
    pub face_up: Vec<CardIndex>,
    pub score: u64,
    pub moves: u32,
    pub matched_pairs: u32,
    pub total_pairs: u32,
    pub elapsed: f64,
    pub combo: u32,
    pub combo_timer: f64,
    pub streak: u32,
    pub tokens: u32,
    pub powerups: Vec<PowerUpState>,
    pub bonus: Option<BonusWindow>,
    pub previewing: bool,
    pub is_over: bool,
    pub did_win: bool,
    pub final_score: Option<FinalScore>,
}

impl SessionSnapshot {
    /// Whether any bonus window is open.
    #[must_use]
    pub fn bonus_active(&self) -> bool {
        self.bonus.is_some()
    }
}
