//! Core types: ids, RNG, configuration.
//!
//! Everything else in the crate builds on these. None of them know about
//! sessions or scoring.

pub mod ids;
pub mod rng;
pub mod config;

pub use ids::{CardIndex, PairId};
pub use rng::{GameRng, GameRngState};
pub use config::{ConfigError, DeckKind, Difficulty, ScoringConfig, SessionConfig, TimingConfig};
