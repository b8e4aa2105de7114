//! Cards: content catalogs, dealing, and per-card state.
//!
//! - `ContentItem` / `Catalog`: what can appear on a card face
//! - `DeckProvider`: deals shuffled pairs from a catalog
//! - `Card`: logical flip/match state of one board slot

pub mod content;
pub mod deck;
pub mod card;

pub use content::{Catalog, ContentItem, Shape, WORDS};
pub use deck::{DealtCard, DeckProvider};
pub use card::{Card, CardFace};
