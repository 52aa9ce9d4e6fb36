//! Playing cards.
//!
//! Only `kind` matters to the rules. Suit and rank are dealt at random when
//! the deck is built and are carried for display.

use serde::{Deserialize, Serialize};

/// Unique identifier for one physical card within a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
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

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// What a card does when played.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CardKind {
    /// Deal damage to an enemy.
    Attack,
    /// Held in hand; no effect is wired to it.
    Dodge,
    /// Recover a hit point.
    Peach,
    /// Moves into the equipment area for good.
    Equip,
}

impl CardKind {
    /// All kinds, in deck order.
    pub const ALL: [CardKind; 4] = [
        CardKind::Attack,
        CardKind::Dodge,
        CardKind::Peach,
        CardKind::Equip,
    ];

    /// Does playing this card send it to the discard pile?
    #[must_use]
    pub const fn discards_on_use(self) -> bool {
        !matches!(self, CardKind::Equip)
    }
}

impl std::fmt::Display for CardKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CardKind::Attack => "Attack",
            CardKind::Dodge => "Dodge",
            CardKind::Peach => "Peach",
            CardKind::Equip => "Equip",
        };
        f.write_str(name)
    }
}

/// Card suit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    Spades,
    Hearts,
    Clubs,
    Diamonds,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Clubs, Suit::Diamonds];
}

/// A single card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub kind: CardKind,
    pub suit: Suit,
    /// 1 (ace) through 13 (king).
    pub rank: u8,
}

impl Card {
    #[must_use]
    pub const fn new(id: CardId, kind: CardKind, suit: Suit, rank: u8) -> Self {
        Self { id, kind, suit, rank }
    }
}
