//! State-change notifications for the renderer.
//!
//! The session pushes one event per accepted transition. The renderer
//! drains them once per frame (`GameSession::drain_events`) to start
//! animations, particles and sounds. Rejected calls push nothing.

use serde::{Deserialize, Serialize};

use crate::core::{CardIndex, DeckKind, Difficulty, PairId};
use crate::powerups::PowerUpKind;
use crate::rules::FinalScore;
use crate::session::BonusKind;

/// What a score change was for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreReason {
    Match,
    StreakBonus,
    Final,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    GameStarted {
        difficulty: Difficulty,
        deck: DeckKind,
        total_pairs: u32,
    },
    CardFlipped {
        index: CardIndex,
    },
    CardUnflipped {
        index: CardIndex,
    },
    MatchFound {
        pair_id: PairId,
        first: CardIndex,
        second: CardIndex,
    },
    Mismatch {
        first: CardIndex,
        second: CardIndex,
    },
    ScoreChanged {
        delta: u64,
        total: u64,
        reason: ScoreReason,
    },
    ComboExpired,
    StreakBonus {
        streak: u32,
    },
    PowerUpActivated {
        kind: PowerUpKind,
        cost: u32,
    },
    BonusWindowOpened {
        kind: BonusKind,
        duration: f64,
    },
    BonusWindowClosed {
        kind: BonusKind,
    },
    PreviewEnded,
    GameWon {
        final_score: FinalScore,
    },
}
