//! Cards, the shared deck, and the character roster.
//!
//! - `Card`: one physical card; its `CardKind` decides what it does
//! - `Deck`: draw and discard piles over a fixed card pool
//! - `Character`: roster entries that set a player's hit points

pub mod card;
pub mod character;
pub mod deck;

pub use card::{Card, CardId, CardKind, Suit};
pub use character::Character;
pub use deck::{Deck, DeckComposition};
