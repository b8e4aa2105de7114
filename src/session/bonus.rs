//! Bonus windows: timed flags the renderer and the clock check.

use serde::{Deserialize, Serialize};

/// What opened the current bonus window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BonusKind {
    /// Opened by reaching the streak threshold.
    Streak,
    /// Game clock stops while open.
    TimeFreeze,
    /// Renderer highlights matching pairs while open.
    MatchAssist,
}

/// An open bonus window. Counts down with `tick`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BonusWindow {
    pub kind: BonusKind,
    pub remaining: f64,
}

impl BonusWindow {
    #[must_use]
    pub fn new(kind: BonusKind, duration: f64) -> Self {
        Self {
            kind,
            remaining: duration,
        }
    }

    /// Count down by `delta`. Returns `true` once the window has expired.
    pub fn advance(&mut self, delta: f64) -> bool {
        self.remaining -= delta;
        self.remaining <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_expires() {
        let mut window = BonusWindow::new(BonusKind::Streak, 5.0);
        assert!(!window.advance(4.0));
        assert!((window.remaining - 1.0).abs() < 1e-9);
        assert!(window.advance(1.0));
    }
}
