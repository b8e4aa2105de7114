//! Deck provider: deals shuffled pairs from a catalog.
//!
//! ## Dealing
//!
//! For `pairs_count <= C` (catalog size) the provider picks `pairs_count`
//! distinct items without replacement. For `pairs_count > C` it takes all
//! `C` items and then reuses them round-robin (`(i - 1) mod C`) for the
//! remaining pairs. Reused pairs still get their own `PairId`, so the board
//! stays playable; they just look the same as an earlier pair.
//!
//! Either way the full `2 * pairs_count` sequence is shuffled before it is
//! returned.
//!
//! ```
//! use memory_match::cards::DeckProvider;
//! use memory_match::core::{DeckKind, GameRng};
//!
//! let deck = DeckProvider::new();
//! let mut rng = GameRng::new(42);
//! let dealt = deck.deal_pairs(8, DeckKind::Shapes, &mut rng);
//! assert_eq!(dealt.len(), 16);
//! ```

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::content::{Catalog, ContentItem};
use crate::core::{DeckKind, GameRng, PairId};

/// One card as produced by a deal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealtCard {
    pub pair_id: PairId,
    pub content: ContentItem,
    pub kind: DeckKind,
}

/// Source of dealt pairs.
///
/// Holds one catalog per deck kind. The built-in catalogs are used unless
/// replaced with `with_catalog`.
#[derive(Clone, Debug)]
pub struct DeckProvider {
    catalogs: FxHashMap<DeckKind, Catalog>,
}

impl Default for DeckProvider {
    fn default() -> Self {
        let mut catalogs = FxHashMap::default();
        for kind in [DeckKind::Shapes, DeckKind::Words] {
            catalogs.insert(kind, Catalog::builtin(kind));
        }
        Self { catalogs }
    }
}

impl DeckProvider {
    /// Create a provider with the built-in catalogs.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the catalog for the catalog's deck kind.
    #[must_use]
    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalogs.insert(catalog.kind(), catalog);
        self
    }

    /// Number of distinct items available for a deck kind.
    #[must_use]
    pub fn catalog_size(&self, kind: DeckKind) -> usize {
        self.catalogs.get(&kind).map_or(0, Catalog::len)
    }

    /// Deal `pairs_count` pairs, shuffled.
    ///
    /// Returns `2 * pairs_count` cards with pair ids `1..=pairs_count`,
    /// each appearing exactly twice. Returns an empty deal when
    /// `pairs_count` is zero or the catalog is empty.
    pub fn deal_pairs(&self, pairs_count: usize, kind: DeckKind, rng: &mut GameRng) -> Vec<DealtCard> {
        let catalog = match self.catalogs.get(&kind) {
            Some(catalog) if !catalog.is_empty() => catalog,
            _ => return Vec::new(),
        };
        if pairs_count == 0 {
            return Vec::new();
        }

        // When the catalog is exhausted this is every item, in random order.
        let chosen = rng.sample_distinct(catalog.len(), pairs_count);
        if pairs_count > chosen.len() {
            tracing::debug!(
                deck = %kind,
                requested = pairs_count,
                catalog = chosen.len(),
                "catalog exhausted, reusing content for extra pairs"
            );
        }

        let mut dealt = Vec::with_capacity(pairs_count * 2);
        for i in 1..=pairs_count {
            let source = chosen[(i - 1) % chosen.len()];
            let Some(content) = catalog.get(source) else {
                continue;
            };
            let pair_id = PairId::new(i as u32);
            for _ in 0..2 {
                dealt.push(DealtCard {
                    pair_id,
                    content: content.clone(),
                    kind,
                });
            }
        }

        rng.shuffle(&mut dealt);
        dealt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::content::Shape;

    fn pair_counts(dealt: &[DealtCard]) -> FxHashMap<PairId, usize> {
        let mut counts = FxHashMap::default();
        for card in dealt {
            *counts.entry(card.pair_id).or_insert(0) += 1;
        }
        counts
    }

    #[test]
    fn test_deal_within_catalog() {
        let deck = DeckProvider::new();
        let mut rng = GameRng::new(42);
        let dealt = deck.deal_pairs(8, DeckKind::Shapes, &mut rng);

        assert_eq!(dealt.len(), 16);
        let counts = pair_counts(&dealt);
        assert_eq!(counts.len(), 8);
        assert!(counts.values().all(|&n| n == 2));

        // Distinct pairs carry distinct content.
        let unique: rustc_hash::FxHashSet<_> = dealt.iter().map(|c| &c.content).collect();
        assert_eq!(unique.len(), 8);
    }

    #[test]
    fn test_pair_ids_sequential() {
        let deck = DeckProvider::new();
        let mut rng = GameRng::new(3);
        let dealt = deck.deal_pairs(5, DeckKind::Words, &mut rng);

        let mut ids: Vec<u32> = dealt.iter().map(|c| c.pair_id.raw()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        assert!(dealt.iter().all(|c| c.kind == DeckKind::Words));
    }

    #[test]
    fn test_deal_beyond_catalog_reuses_content() {
        let catalog = Catalog::new(
            DeckKind::Shapes,
            [Shape::Circle, Shape::Square, Shape::Star].map(ContentItem::Shape),
        );
        let deck = DeckProvider::new().with_catalog(catalog);
        let mut rng = GameRng::new(11);
        let dealt = deck.deal_pairs(7, DeckKind::Shapes, &mut rng);

        assert_eq!(dealt.len(), 14);
        let counts = pair_counts(&dealt);
        assert_eq!(counts.len(), 7);
        assert!(counts.values().all(|&n| n == 2));

        // Pair 4 reuses pair 1's content, pair 5 reuses pair 2's, and so on.
        let content_of = |id: u32| {
            dealt
                .iter()
                .find(|c| c.pair_id == PairId::new(id))
                .map(|c| c.content.clone())
                .unwrap()
        };
        assert_eq!(content_of(4), content_of(1));
        assert_eq!(content_of(5), content_of(2));
        assert_eq!(content_of(7), content_of(1));
        assert_ne!(content_of(1), content_of(2));
    }

    #[test]
    fn test_zero_pairs() {
        let deck = DeckProvider::new();
        let mut rng = GameRng::new(1);
        assert!(deck.deal_pairs(0, DeckKind::Shapes, &mut rng).is_empty());
    }

    #[test]
    fn test_empty_catalog() {
        let deck = DeckProvider::new().with_catalog(Catalog::new(DeckKind::Words, Vec::<ContentItem>::new()));
        let mut rng = GameRng::new(1);
        assert_eq!(deck.catalog_size(DeckKind::Words), 0);
        assert!(deck.deal_pairs(4, DeckKind::Words, &mut rng).is_empty());
    }

    #[test]
    fn test_deal_is_deterministic() {
        let deck = DeckProvider::new();
        let a = deck.deal_pairs(12, DeckKind::Shapes, &mut GameRng::new(99));
        let b = deck.deal_pairs(12, DeckKind::Shapes, &mut GameRng::new(99));
        assert_eq!(a, b);
    }

    #[test]
    fn test_deal_is_shuffled() {
        let deck = DeckProvider::new();
        let mut rng = GameRng::new(5);
        let dealt = deck.deal_pairs(12, DeckKind::Shapes, &mut rng);

        // Unshuffled output would be 1,1,2,2,3,3,...
        let adjacent_twins = dealt
            .windows(2)
            .filter(|w| w[0].pair_id == w[1].pair_id)
            .count();
        assert!(adjacent_twins < 12);
    }
}
