//! The game session: the only place game state changes.
//!
//! A session deals a board, takes clicks and power-up requests, resolves
//! pairs, keeps score, and advances its timers once per frame:
//!
//! ```
//! use memory_match::core::{CardIndex, DeckKind, Difficulty};
//! use memory_match::session::{ClickOutcome, SessionBuilder};
//!
//! let mut session = SessionBuilder::new().seed(42).build();
//! session.start_new_game(Difficulty::Easy, DeckKind::Shapes).unwrap();
//! assert_eq!(session.total_pairs(), 8);
//! assert_eq!(session.board().len(), 16);
//!
//! let outcome = session.on_card_clicked(CardIndex::new(0)).unwrap();
//! assert_eq!(outcome, ClickOutcome::Flipped);
//!
//! // One frame at 60 fps
//! session.tick(1.0 / 60.0);
//! ```

mod bonus;
mod game;
mod layout;
mod snapshot;

pub use bonus::{BonusKind, BonusWindow};
pub use game::{ClickOutcome, GameSession, SessionBuilder};
pub use layout::BoardLayout;
pub use snapshot::SessionSnapshot;
