//! Power-ups: consumables bought with tokens, each usable once per game.
//!
//! | kind | default cost | effect |
//! |---|---|---|
//! | `Preview` | 3 | reveals every unmatched card for a short time |
//! | `TimeFreeze` | 4 | stops the game clock while its window is open |
//! | `MatchAssist` | 5 | opens a window in which matching pairs are hinted |
//!
//! The inventory only tracks cost and the used flag. Applying the effect
//! is the session's job.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::Rejection;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerUpKind {
    Preview,
    TimeFreeze,
    MatchAssist,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [
        PowerUpKind::Preview,
        PowerUpKind::TimeFreeze,
        PowerUpKind::MatchAssist,
    ];

    /// Parse a power-up name such as `"time_freeze"`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "preview" => Some(PowerUpKind::Preview),
            "time_freeze" => Some(PowerUpKind::TimeFreeze),
            "match_assist" => Some(PowerUpKind::MatchAssist),
            _ => None,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            PowerUpKind::Preview => "preview",
            PowerUpKind::TimeFreeze => "time_freeze",
            PowerUpKind::MatchAssist => "match_assist",
        }
    }
}

impl std::fmt::Display for PowerUpKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Token cost per power-up kind.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerUpCosts {
    pub preview: u32,
    pub time_freeze: u32,
    pub match_assist: u32,
}

impl Default for PowerUpCosts {
    fn default() -> Self {
        Self {
            preview: 3,
            time_freeze: 4,
            match_assist: 5,
        }
    }
}

impl PowerUpCosts {
    #[must_use]
    pub fn cost(&self, kind: PowerUpKind) -> u32 {
        match kind {
            PowerUpKind::Preview => self.preview,
            PowerUpKind::TimeFreeze => self.time_freeze,
            PowerUpKind::MatchAssist => self.match_assist,
        }
    }
}

/// State of one power-up. `used` only ever goes from false to true.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerUpState {
    pub kind: PowerUpKind,
    pub cost: u32,
    pub used: bool,
}

/// Per-game power-up table, keyed by kind.
#[derive(Clone, Debug, Default)]
pub struct PowerUpInventory {
    states: FxHashMap<PowerUpKind, PowerUpState>,
}

impl PowerUpInventory {
    /// Create a fresh inventory with nothing used.
    #[must_use]
    pub fn new(costs: &PowerUpCosts) -> Self {
        let states = PowerUpKind::ALL
            .iter()
            .map(|&kind| {
                (
                    kind,
                    PowerUpState {
                        kind,
                        cost: costs.cost(kind),
                        used: false,
                    },
                )
            })
            .collect();
        Self { states }
    }

    #[must_use]
    pub fn get(&self, kind: PowerUpKind) -> Option<&PowerUpState> {
        self.states.get(&kind)
    }

    #[must_use]
    pub fn is_used(&self, kind: PowerUpKind) -> bool {
        self.states.get(&kind).is_some_and(|s| s.used)
    }

    /// Check whether `kind` could be bought with `balance` right now.
    pub fn check(&self, kind: PowerUpKind, balance: u32) -> Result<u32, Rejection> {
        let state = self.states.get(&kind).ok_or(Rejection::PowerUpUsed(kind))?;
        if state.used {
            return Err(Rejection::PowerUpUsed(kind));
        }
        if balance < state.cost {
            return Err(Rejection::InsufficientTokens {
                kind,
                cost: state.cost,
                balance,
            });
        }
        Ok(state.cost)
    }

    /// Pay for and mark `kind` used. Returns the cost paid.
    ///
    /// On rejection neither the balance nor the inventory changes.
    pub fn activate(&mut self, kind: PowerUpKind, balance: &mut u32) -> Result<u32, Rejection> {
        let cost = self.check(kind, *balance)?;
        if let Some(state) = self.states.get_mut(&kind) {
            state.used = true;
        }
        *balance -= cost;
        Ok(cost)
    }

    /// All states, in `PowerUpKind::ALL` order.
    pub fn states(&self) -> Vec<PowerUpState> {
        PowerUpKind::ALL
            .iter()
            .filter_map(|kind| self.states.get(kind).cloned())
            .collect()
    }
}
