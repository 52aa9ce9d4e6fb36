//! Structured game events.
//!
//! The engine records one `GameEvent` per observable change. Events carry
//! ids and numbers, never display text; presentation belongs to whoever
//! drains them.

use serde::{Deserialize, Serialize};

use crate::cards::{CardId, CardKind};
use crate::core::{Phase, PlayerId, Role};
use crate::rules::GameEnd;

/// Something that happened at the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// A fresh table was dealt.
    TableReset { player_count: usize, seed: u64 },

    /// A player bound a character.
    CharacterChosen { player: PlayerId, character: String },

    /// Opening hands dealt, the Lord is up.
    GameStarted { lord: PlayerId },

    /// The active player entered a phase.
    PhaseEntered { player: PlayerId, phase: Phase },

    /// Cards moved from the draw pile into a hand.
    CardsDrawn { player: PlayerId, count: usize },

    /// The discard pile was shuffled back into the draw pile.
    DeckReshuffled { cards: usize },

    /// A card left a hand through play.
    CardPlayed {
        player: PlayerId,
        card: CardId,
        kind: CardKind,
        target: Option<PlayerId>,
    },

    /// Hit points were lost.
    Damaged {
        source: PlayerId,
        target: PlayerId,
        amount: u32,
        remaining: u32,
    },

    /// Hit points were recovered.
    Healed { player: PlayerId, amount: u32 },

    /// A card moved into the equipment area.
    Equipped { player: PlayerId, card: CardId },

    /// A player died.
    Died {
        player: PlayerId,
        role: Role,
        killer: PlayerId,
    },

    /// The killer of a Rebel drew the bounty.
    RebelBounty { killer: PlayerId, drawn: usize },

    /// The Lord killed a Loyal and forfeited every card.
    FriendlyFirePenalty { lord: PlayerId, forfeited: usize },

    /// Cards left a hand for the discard pile at end of turn.
    Discarded { player: PlayerId, count: usize },

    /// Play passed to the next living player.
    TurnPassed {
        from: PlayerId,
        to: PlayerId,
        round: u32,
    },

    /// An AI decision was rejected by the rules.
    AiDecisionRejected { player: PlayerId },

    /// The game ended.
    GameOver { end: GameEnd },
}

impl GameEvent {
    /// The player this event is about, if any.
    #[must_use]
    pub fn player(&self) -> Option<PlayerId> {
        match self {
            GameEvent::CharacterChosen { player, .. }
            | GameEvent::PhaseEntered { player, .. }
            | GameEvent::CardsDrawn { player, .. }
            | GameEvent::CardPlayed { player, .. }
            | GameEvent::Healed { player, .. }
            | GameEvent::Equipped { player, .. }
            | GameEvent::Died { player, .. }
            | GameEvent::Discarded { player, .. }
            | GameEvent::AiDecisionRejected { player } => Some(*player),
            GameEvent::Damaged { target, .. } => Some(*target),
            GameEvent::RebelBounty { killer, .. } => Some(*killer),
            GameEvent::FriendlyFirePenalty { lord, .. } => Some(*lord),
            GameEvent::GameStarted { lord } => Some(*lord),
            GameEvent::TurnPassed { to, .. } => Some(*to),
            GameEvent::TableReset { .. }
            | GameEvent::DeckReshuffled { .. }
            | GameEvent::GameOver { .. } => None,
        }
    }

    /// Events worth highlighting: deaths and the end of the game.
    #[must_use]
    pub fn is_important(&self) -> bool {
        matches!(self, GameEvent::Died { .. } | GameEvent::GameOver { .. })
    }
}
