//! Matchable content and the per-kind catalogs it is drawn from.
//!
//! A `ContentItem` is what the renderer draws on a card face. The core
//! never interprets it beyond equality; matching goes by `PairId`.

use serde::{Deserialize, Serialize};

use crate::core::DeckKind;

/// A shape the renderer knows how to draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    Circle,
    Square,
    Triangle,
    Diamond,
    Star,
    Heart,
    Hexagon,
    Pentagon,
    Octagon,
    Cross,
    Crescent,
    Arrow,
    Spiral,
    Lightning,
    Drop,
    Leaf,
    Flower,
    Cloud,
    Sun,
    Ring,
}

impl Shape {
    /// Every shape, in catalog order.
    pub const ALL: [Shape; 20] = [
        Shape::Circle,
        Shape::Square,
        Shape::Triangle,
        Shape::Diamond,
        Shape::Star,
        Shape::Heart,
        Shape::Hexagon,
        Shape::Pentagon,
        Shape::Octagon,
        Shape::Cross,
        Shape::Crescent,
        Shape::Arrow,
        Shape::Spiral,
        Shape::Lightning,
        Shape::Drop,
        Shape::Leaf,
        Shape::Flower,
        Shape::Cloud,
        Shape::Sun,
        Shape::Ring,
    ];
}

/// Words used by the word deck.
pub const WORDS: [&str; 24] = [
    "apple", "river", "candle", "garden", "rocket", "violin", "castle", "pepper",
    "island", "mirror", "forest", "button", "ladder", "planet", "anchor", "tunnel",
    "feather", "lantern", "compass", "harbor", "meadow", "pebble", "thunder", "window",
];

/// Opaque matchable payload.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ContentItem {
    Shape(Shape),
    Word(String),
}

impl ContentItem {
    /// The deck kind this item belongs to.
    #[must_use]
    pub fn kind(&self) -> DeckKind {
        match self {
            ContentItem::Shape(_) => DeckKind::Shapes,
            ContentItem::Word(_) => DeckKind::Words,
        }
    }
}

/// Fixed list of distinct items for one deck kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Catalog {
    kind: DeckKind,
    items: Vec<ContentItem>,
}

impl Catalog {
    /// Create a catalog from explicit items.
    ///
    /// Duplicate items are dropped, keeping the first occurrence.
    pub fn new(kind: DeckKind, items: impl IntoIterator<Item = ContentItem>) -> Self {
        let mut distinct: Vec<ContentItem> = Vec::new();
        for item in items {
            if !distinct.contains(&item) {
                distinct.push(item);
            }
        }
        Self { kind, items: distinct }
    }

    /// The built-in catalog for a deck kind.
    #[must_use]
    pub fn builtin(kind: DeckKind) -> Self {
        match kind {
            DeckKind::Shapes => Self::new(kind, Shape::ALL.iter().map(|&s| ContentItem::Shape(s))),
            DeckKind::Words => Self::new(kind, WORDS.iter().map(|w| ContentItem::Word((*w).to_string()))),
        }
    }

    #[must_use]
    pub fn kind(&self) -> DeckKind {
        self.kind
    }

    /// Number of distinct items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ContentItem> {
        self.items.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ContentItem> {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_sizes() {
        assert_eq!(Catalog::builtin(DeckKind::Shapes).len(), 20);
        assert_eq!(Catalog::builtin(DeckKind::Words).len(), 24);
    }

    #[test]
    fn test_builtin_items_match_kind() {
        for kind in [DeckKind::Shapes, DeckKind::Words] {
            let catalog = Catalog::builtin(kind);
            assert_eq!(catalog.kind(), kind);
            assert!(catalog.iter().all(|item| item.kind() == kind));
        }
    }

    #[test]
    fn test_duplicates_dropped() {
        let catalog = Catalog::new(
            DeckKind::Shapes,
            [
                ContentItem::Shape(Shape::Star),
                ContentItem::Shape(Shape::Star),
                ContentItem::Shape(Shape::Ring),
            ],
        );
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(1), Some(&ContentItem::Shape(Shape::Ring)));
    }

    #[test]
    fn test_content_serde() {
        let item = ContentItem::Word("harbor".to_string());
        let json = serde_json::to_string(&item).unwrap();
        assert_eq!(json, r#"{"type":"word","value":"harbor"}"#);
    }
}
