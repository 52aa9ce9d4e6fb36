//! The shared deck: a draw pile and a discard pile.
//!
//! Cards are never created or destroyed after `Deck::build`. Together with
//! every player's hand and equipment, the two piles always account for the
//! whole card pool.
//!
//! ```
//! use kingdoms_engine::cards::{Deck, DeckComposition};
//! use kingdoms_engine::core::GameRng;
//!
//! let mut rng = GameRng::new(42);
//! let mut deck = Deck::build(&DeckComposition::default(), &mut rng);
//! assert_eq!(deck.draw_count(), 24);
//!
//! let card = deck.draw(&mut rng).unwrap();
//! deck.discard(card);
//! assert_eq!(deck.draw_count() + deck.discard_count(), 24);
//! ```

use serde::{Deserialize, Serialize};

use super::card::{Card, CardId, CardKind, Suit};
use crate::core::GameRng;

/// How many cards of each kind the deck holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckComposition {
    pub attack: usize,
    pub dodge: usize,
    pub peach: usize,
    pub equip: usize,
}

impl Default for DeckComposition {
    fn default() -> Self {
        Self {
            attack: 8,
            dodge: 6,
            peach: 5,
            equip: 5,
        }
    }
}

impl DeckComposition {
    /// A deck made of `count` cards of a single kind.
    #[must_use]
    pub fn only(kind: CardKind, count: usize) -> Self {
        let mut deck = Self {
            attack: 0,
            dodge: 0,
            peach: 0,
            equip: 0,
        };
        *deck.count_mut(kind) = count;
        deck
    }

    /// Multiply every count by `factor`.
    #[must_use]
    pub fn scaled(self, factor: usize) -> Self {
        Self {
            attack: self.attack * factor,
            dodge: self.dodge * factor,
            peach: self.peach * factor,
            equip: self.equip * factor,
        }
    }

    /// Number of cards of `kind`.
    #[must_use]
    pub fn count(&self, kind: CardKind) -> usize {
        match kind {
            CardKind::Attack => self.attack,
            CardKind::Dodge => self.dodge,
            CardKind::Peach => self.peach,
            CardKind::Equip => self.equip,
        }
    }

    fn count_mut(&mut self, kind: CardKind) -> &mut usize {
        match kind {
            CardKind::Attack => &mut self.attack,
            CardKind::Dodge => &mut self.dodge,
            CardKind::Peach => &mut self.peach,
            CardKind::Equip => &mut self.equip,
        }
    }

    /// Size of the card pool.
    #[must_use]
    pub fn total(&self) -> usize {
        self.attack + self.dodge + self.peach + self.equip
    }
}

/// Draw and discard piles. Top of the draw pile is the end of the vec.
#[derive(Clone, Debug, Default)]
pub struct Deck {
    draw_pile: Vec<Card>,
    discard_pile: Vec<Card>,
    pool_size: usize,
    reshuffles: u32,
}

impl Deck {
    /// Build and shuffle a fresh deck. Suits and ranks are dealt at random.
    #[must_use]
    pub fn build(composition: &DeckComposition, rng: &mut GameRng) -> Self {
        let mut draw_pile = Vec::with_capacity(composition.total());
        let mut next_id = 0u32;

        for kind in CardKind::ALL {
            for _ in 0..composition.count(kind) {
                let suit = rng.choose(&Suit::ALL).copied().unwrap_or(Suit::Spades);
                let rank = rng.gen_range_u8(1..=13);
                draw_pile.push(Card::new(CardId::new(next_id), kind, suit, rank));
                next_id += 1;
            }
        }

        rng.shuffle(&mut draw_pile);

        Self {
            pool_size: draw_pile.len(),
            draw_pile,
            discard_pile: Vec::new(),
            reshuffles: 0,
        }
    }

    /// Draw the top card, reshuffling the discard pile in when the draw pile
    /// runs out.
    ///
    /// Returns `None` only when both piles are empty.
    pub fn draw(&mut self, rng: &mut GameRng) -> Option<Card> {
        if self.draw_pile.is_empty() {
            self.reshuffle(rng);
        }
        self.draw_pile.pop()
    }

    /// Move the whole discard pile into the draw pile and shuffle it.
    ///
    /// Returns the number of cards moved.
    pub fn reshuffle(&mut self, rng: &mut GameRng) -> usize {
        let moved = self.discard_pile.len();
        if moved == 0 {
            return 0;
        }

        self.draw_pile.append(&mut self.discard_pile);
        rng.shuffle(&mut self.draw_pile);
        self.reshuffles += 1;
        moved
    }

    /// Put a card on the discard pile.
    pub fn discard(&mut self, card: Card) {
        self.discard_pile.push(card);
    }

    /// Put several cards on the discard pile.
    pub fn discard_all(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.discard_pile.extend(cards);
    }

    #[must_use]
    pub fn draw_count(&self) -> usize {
        self.draw_pile.len()
    }

    #[must_use]
    pub fn discard_count(&self) -> usize {
        self.discard_pile.len()
    }

    /// Cards still in the two piles.
    #[must_use]
    pub fn in_piles(&self) -> usize {
        self.draw_pile.len() + self.discard_pile.len()
    }

    /// Size of the whole card pool, wherever the cards are now.
    #[must_use]
    pub fn pool_size(&self) -> usize {
        self.pool_size
    }

    /// How many times the discard pile has been reshuffled in.
    #[must_use]
    pub fn reshuffles(&self) -> u32 {
        self.reshuffles
    }

    /// Is a draw possible without inventing cards?
    #[must_use]
    pub fn can_draw(&self) -> bool {
        self.in_piles() > 0
    }
}
