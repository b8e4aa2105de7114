//! # memory-match
//!
//! Match-resolution and game-state core for a memory (concentration) card game.
//!
//! Players flip cards two at a time; equal pairs score, with combo and
//! streak bonuses and three token-bought power-ups. Drawing, animation and
//! input hit-testing belong to the renderer that embeds this crate.
//!
//! ## Design Principles
//!
//! 1. **Single-threaded, frame-driven**: The renderer calls `tick(delta)` once
//!    per frame. Deferred effects are progress counters drained by `tick`,
//!    never timers or threads.
//!
//! 2. **Silent rejection**: An invalid click or power-up request leaves the
//!    session untouched. The returned `Rejection` says why, and is safe to ignore.
//!
//! 3. **Deterministic**: All randomness comes from an injected, seedable
//!    `GameRng`. Same seed plus same inputs gives the same game.
//!
//! ## Modules
//!
//! - `core`: Ids, RNG, configuration
//! - `cards`: Content catalogs, the deck provider, per-card state
//! - `powerups`: Power-up kinds, costs and the per-game inventory
//! - `rules`: Scoring formulas
//! - `schedule`: Deferred actions advanced by `tick`
//! - `events`: State-change notifications for the renderer
//! - `session`: The game session itself

pub mod core;
pub mod cards;
pub mod powerups;
pub mod rules;
pub mod schedule;
pub mod events;
pub mod error;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    CardIndex, PairId,
    GameRng, GameRngState,
    ConfigError, DeckKind, Difficulty, ScoringConfig, SessionConfig, TimingConfig,
};

pub use crate::cards::{Card, CardFace, Catalog, ContentItem, DealtCard, DeckProvider, Shape};

pub use crate::powerups::{PowerUpCosts, PowerUpInventory, PowerUpKind, PowerUpState};

pub use crate::rules::FinalScore;

pub use crate::schedule::{DeferredAction, DeferredQueue};

pub use crate::events::{ScoreReason, SessionEvent};

pub use crate::error::Rejection;

pub use crate::session::{
    BoardLayout, BonusKind, BonusWindow, ClickOutcome, GameSession, SessionBuilder, SessionSnapshot,
};
