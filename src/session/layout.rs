//! Board grid layout for the renderer.
//!
//! Picks the column count whose grid shape is closest to the viewport's
//! aspect ratio. Has no effect on play.

use serde::{Deserialize, Serialize};

/// Grid shape for the current board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardLayout {
    pub columns: usize,
    pub rows: usize,
}

impl BoardLayout {
    /// Grid for `cards` cards in a `width` x `height` viewport.
    ///
    /// A missing or degenerate viewport is treated as square.
    #[must_use]
    pub fn fit(cards: usize, width: f32, height: f32) -> Self {
        if cards == 0 {
            return Self { columns: 0, rows: 0 };
        }

        let aspect = if width > 0.0 && height > 0.0 {
            f64::from(width) / f64::from(height)
        } else {
            1.0
        };

        let mut best = Self { columns: cards, rows: 1 };
        let mut best_key = (f64::INFINITY, usize::MAX);
        for columns in 1..=cards {
            let rows = cards.div_ceil(columns);
            let shape_error = (columns as f64 / rows as f64 - aspect).abs();
            let empty = columns * rows - cards;
            let key = (shape_error, empty);
            if key.0 < best_key.0 - 1e-9 || ((key.0 - best_key.0).abs() <= 1e-9 && key.1 < best_key.1) {
                best = Self { columns, rows };
                best_key = key;
            }
        }
        best
    }

    /// Board index of the cell at (`column`, `row`), if a card sits there.
    #[must_use]
    pub fn index_at(&self, column: usize, row: usize, cards: usize) -> Option<usize> {
        if column >= self.columns || row >= self.rows {
            return None;
        }
        let index = row * self.columns + column;
        (index < cards).then_some(index)
    }
}
