//! Session configuration.
//!
//! Every tunable number of the game lives here:
//! - `Difficulty` and the pairs-per-difficulty table
//! - `ScoringConfig`: match, streak and final-score constants
//! - `TimingConfig`: deferred-action delays and bonus window lengths
//! - `SessionConfig`: combines all of the above with the RNG seed
//!
//! All structs deserialize with `#[serde(default)]`, so a JSON file only
//! needs the keys it overrides.

use serde::{Deserialize, Serialize};

use crate::powerups::PowerUpCosts;

/// Errors from loading or validating a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A difficulty would deal an empty board.
    #[error("difficulty {0} is configured with zero pairs")]
    ZeroPairs(Difficulty),

    /// A timer length is zero, negative or not finite.
    #[error("duration `{name}` must be positive, got {value}")]
    NonPositiveDuration { name: &'static str, value: f64 },

    /// The JSON text could not be parsed.
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Difficulty level. Decides how many pairs are dealt.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Parse a difficulty name. Unknown names fall back to `Medium`.
    ///
    /// ```
    /// use memory_match::core::Difficulty;
    ///
    /// assert_eq!(Difficulty::from_name("easy"), Difficulty::Easy);
    /// assert_eq!(Difficulty::from_name("HARD"), Difficulty::Hard);
    /// assert_eq!(Difficulty::from_name("nightmare"), Difficulty::Medium);
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "easy" => Difficulty::Easy,
            "hard" => Difficulty::Hard,
            _ => Difficulty::Medium,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Which content catalog a deal draws from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeckKind {
    #[default]
    Shapes,
    Words,
}

impl DeckKind {
    /// Parse a deck name. Unknown names fall back to `Shapes`.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "words" => DeckKind::Words,
            _ => DeckKind::Shapes,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            DeckKind::Shapes => "shapes",
            DeckKind::Words => "words",
        }
    }
}

impl std::fmt::Display for DeckKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Scoring constants.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Points for any match.
    pub match_base: u64,

    /// Time bonus at elapsed 0. Drops by one per `time_bonus_interval` seconds.
    pub time_bonus_cap: u64,

    /// Seconds per point of time bonus lost.
    pub time_bonus_interval: f64,

    /// Points per combo level held before the match.
    pub combo_step: u64,

    /// Points per streak level held before the match.
    pub streak_step: u64,

    /// Streak length at which the streak bonus fires.
    pub streak_threshold: u32,

    /// Flat points for reaching the streak threshold.
    pub streak_bonus: u64,

    /// Final time bonus at elapsed 0, minus one per whole second.
    pub final_time_cap: u64,

    /// Final move bonus with zero moves.
    pub final_move_cap: u64,

    /// Move bonus lost per move.
    pub move_penalty: u64,

    /// Awarded when every pair is matched.
    pub perfect_bonus: u64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            match_base: 100,
            time_bonus_cap: 50,
            time_bonus_interval: 10.0,
            combo_step: 25,
            streak_step: 10,
            streak_threshold: 3,
            streak_bonus: 200,
            final_time_cap: 1000,
            final_move_cap: 500,
            move_penalty: 10,
            perfect_bonus: 500,
        }
    }
}

/// Timer lengths, all in seconds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Delay before a mismatched pair turns back face-down.
    pub mismatch_delay: f64,

    /// Combo resets after this long without a match.
    pub combo_decay: f64,

    /// Length of the window opened by a streak bonus.
    pub streak_window: f64,

    /// How long the preview power-up keeps the board revealed.
    pub preview_duration: f64,

    /// Length of the time-freeze window.
    pub time_freeze_duration: f64,

    /// Length of the match-assist window.
    pub match_assist_duration: f64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            mismatch_delay: 0.8,
            combo_decay: 3.0,
            streak_window: 5.0,
            preview_duration: 2.0,
            time_freeze_duration: 5.0,
            match_assist_duration: 10.0,
        }
    }
}

impl TimingConfig {
    fn named(&self) -> [(&'static str, f64); 6] {
        [
            ("mismatch_delay", self.mismatch_delay),
            ("combo_decay", self.combo_decay),
            ("streak_window", self.streak_window),
            ("preview_duration", self.preview_duration),
            ("time_freeze_duration", self.time_freeze_duration),
            ("match_assist_duration", self.match_assist_duration),
        ]
    }
}

/// Complete session configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Seed for dealing. Same seed and same inputs produce the same game.
    pub seed: u64,

    /// Token balance at the start of every game.
    pub starting_tokens: u32,

    pub pairs_easy: u32,
    pub pairs_medium: u32,
    pub pairs_hard: u32,

    pub scoring: ScoringConfig,
    pub timing: TimingConfig,
    pub powerup_costs: PowerUpCosts,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            starting_tokens: 5,
            pairs_easy: 8,
            pairs_medium: 12,
            pairs_hard: 18,
            scoring: ScoringConfig::default(),
            timing: TimingConfig::default(),
            powerup_costs: PowerUpCosts::default(),
        }
    }
}

impl SessionConfig {
    /// Parse a JSON config and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SessionConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every difficulty deals at least one pair and every timer is positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            if self.pairs_for(difficulty) == 0 {
                return Err(ConfigError::ZeroPairs(difficulty));
            }
        }

        for (name, value) in self.timing.named() {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositiveDuration { name, value });
            }
        }

        Ok(())
    }

    /// Number of pairs dealt for a difficulty.
    #[must_use]
    pub fn pairs_for(&self, difficulty: Difficulty) -> u32 {
        match difficulty {
            Difficulty::Easy => self.pairs_easy,
            Difficulty::Medium => self.pairs_medium,
            Difficulty::Hard => self.pairs_hard,
        }
    }

    /// Set the dealing seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the starting token balance.
    #[must_use]
    pub fn with_starting_tokens(mut self, tokens: u32) -> Self {
        self.starting_tokens = tokens;
        self
    }

    /// Override the pair count for one difficulty.
    #[must_use]
    pub fn with_pairs(mut self, difficulty: Difficulty, pairs: u32) -> Self {
        match difficulty {
            Difficulty::Easy => self.pairs_easy = pairs,
            Difficulty::Medium => self.pairs_medium = pairs,
            Difficulty::Hard => self.pairs_hard = pairs,
        }
        self
    }

    /// Replace the timing table.
    #[must_use]
    pub fn with_timing(mut self, timing: TimingConfig) -> Self {
        self.timing = timing;
        self
    }

    /// Replace the scoring table.
    #[must_use]
    pub fn with_scoring(mut self, scoring: ScoringConfig) -> Self {
        self.scoring = scoring;
        self
    }
}
