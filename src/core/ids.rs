//! Identifiers for cards on the board.
//!
//! Two kinds of id exist:
//! - `PairId`: shared by exactly two cards of a deal, the only thing a match compares
//! - `CardIndex`: a card's stable position on the board for the whole session
//!
//! ```
//! use memory_match::core::{CardIndex, PairId};
//!
//! let pair = PairId::new(3);
//! assert_eq!(pair.raw(), 3);
//!
//! let slot = CardIndex::new(7);
//! assert_eq!(slot.raw(), 7);
//! ```

use serde::{Deserialize, Serialize};

/// Pair identifier. Two cards match iff their pair ids are equal.
///
/// Ids are assigned sequentially from 1 within a deal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PairId(pub u32);

impl PairId {
    /// Create a new pair ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for PairId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Pair({})", self.0)
    }
}

/// Position of a card on the board.
///
/// The board never changes size after a deal, so an index stays valid
/// for the whole session. Deferred actions refer to cards by index
/// rather than holding references.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardIndex(pub usize);

impl CardIndex {
    /// Create a new card index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Get the raw index value.
    #[must_use]
    pub const fn raw(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for CardIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_id_ordering() {
        assert!(PairId::new(1) < PairId::new(2));
        assert_eq!(PairId::new(4), PairId(4));
    }

    #[test]
    fn test_display() {
        assert_eq!(PairId::new(5).to_string(), "Pair(5)");
        assert_eq!(CardIndex::new(12).to_string(), "Card(12)");
    }

    #[test]
    fn test_serde() {
        let json = serde_json::to_string(&CardIndex::new(3)).unwrap();
        let back: CardIndex = serde_json::from_str(&json).unwrap();
        assert_eq!(back, CardIndex::new(3));
    }
}
