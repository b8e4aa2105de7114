//! Why an operation was ignored.
//!
//! Every rejected call leaves the session exactly as it was. The `Err`
//! value only tells the caller what happened; ignoring it is always safe.

use crate::core::{CardIndex, Difficulty};
use crate::powerups::PowerUpKind;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("no game has been started")]
    NotStarted,

    #[error("the game is over")]
    GameOver,

    #[error("{0} is not on the board")]
    CardOutOfRange(CardIndex),

    /// Already face-up, matched, or locked by an animation.
    #[error("{0} cannot be flipped")]
    CardUnavailable(CardIndex),

    #[error("two cards are already face-up")]
    BufferFull,

    #[error("power-up {0} was already used this game")]
    PowerUpUsed(PowerUpKind),

    #[error("power-up {kind} costs {cost} tokens, balance is {balance}")]
    InsufficientTokens {
        kind: PowerUpKind,
        cost: u32,
        balance: u32,
    },

    #[error("difficulty {0} deals no pairs")]
    NoPairs(Difficulty),
}
