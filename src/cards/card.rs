//! Logical card state.
//!
//! A card moves through `FaceDown -> FaceUp -> {FaceDown, Matched}`.
//! `Matched` is absorbing: once set, `flip` and `unflip` do nothing.
//!
//! Animation progress and particles belong to the renderer's own card view.
//! The only presentation input the core accepts is the `animating` lock,
//! which makes `flip` refuse while the renderer is mid-animation.

use serde::{Deserialize, Serialize};

use super::content::ContentItem;
use super::deck::DealtCard;
use crate::core::PairId;

/// Which way a card is facing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardFace {
    #[default]
    FaceDown,
    FaceUp,
    Matched,
}

/// A card on the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub pair_id: PairId,
    pub content: ContentItem,
    face: CardFace,
    #[serde(default)]
    animating: bool,
}

impl Card {
    /// Create a face-down card.
    #[must_use]
    pub fn new(pair_id: PairId, content: ContentItem) -> Self {
        Self {
            pair_id,
            content,
            face: CardFace::FaceDown,
            animating: false,
        }
    }

    #[must_use]
    pub fn face(&self) -> CardFace {
        self.face
    }

    /// Matched cards stay visible, so they count as face-up.
    #[must_use]
    pub fn is_face_up(&self) -> bool {
        matches!(self.face, CardFace::FaceUp | CardFace::Matched)
    }

    #[must_use]
    pub fn is_matched(&self) -> bool {
        self.face == CardFace::Matched
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animating
    }

    /// Set or clear the renderer's animation lock.
    pub fn set_animating(&mut self, animating: bool) {
        self.animating = animating;
    }

    /// Whether this card and `other` form a pair.
    #[must_use]
    pub fn matches(&self, other: &Card) -> bool {
        self.pair_id == other.pair_id
    }

    /// Turn face-up.
    ///
    /// Returns `false` without changing anything if the card is already
    /// face-up, matched, or locked by an animation.
    pub fn flip(&mut self) -> bool {
        if self.face != CardFace::FaceDown || self.animating {
            return false;
        }
        self.face = CardFace::FaceUp;
        true
    }

    /// Turn face-down. Returns `false` if already face-down or matched.
    pub fn unflip(&mut self) -> bool {
        if self.face != CardFace::FaceUp {
            return false;
        }
        self.face = CardFace::FaceDown;
        true
    }

    /// Mark as matched. Returns `true` only on the first call.
    pub fn set_matched(&mut self) -> bool {
        if self.face == CardFace::Matched {
            return false;
        }
        self.face = CardFace::Matched;
        true
    }
}

impl From<DealtCard> for Card {
    fn from(dealt: DealtCard) -> Self {
        Card::new(dealt.pair_id, dealt.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::content::Shape;

    fn card() -> Card {
        Card::new(PairId::new(1), ContentItem::Shape(Shape::Star))
    }

    #[test]
    fn test_new_card_face_down() {
        let c = card();
        assert_eq!(c.face(), CardFace::FaceDown);
        assert!(!c.is_face_up());
        assert!(!c.is_matched());
    }

    #[test]
    fn test_flip_unflip() {
        let mut c = card();
        assert!(c.flip());
        assert!(c.is_face_up());

        // Second flip is a no-op
        assert!(!c.flip());
        assert!(c.is_face_up());

        assert!(c.unflip());
        assert!(!c.is_face_up());
        assert!(!c.unflip());
    }

    #[test]
    fn test_matched_is_absorbing() {
        let mut c = card();
        c.flip();
        assert!(c.set_matched());
        assert!(!c.set_matched());

        assert!(!c.unflip());
        assert!(!c.flip());
        assert!(c.is_matched());
        assert!(c.is_face_up());
    }

    #[test]
    fn test_animation_gates_flip() {
        let mut c = card();
        c.set_animating(true);
        assert!(!c.flip());
        assert_eq!(c.face(), CardFace::FaceDown);

        c.set_animating(false);
        assert!(c.flip());
    }

    #[test]
    fn test_matches_by_pair_id() {
        let a = card();
        let b = Card::new(PairId::new(1), ContentItem::Shape(Shape::Ring));
        let c = Card::new(PairId::new(2), ContentItem::Shape(Shape::Star));
        assert!(a.matches(&b));
        assert!(!a.matches(&c));
    }
}
