//! Engine error taxonomy.
//!
//! - `IllegalAction`: the caller asked for something the rules forbid right
//!   now. Recoverable, nothing was mutated.
//! - `ConfigError`: bad table configuration or character selection.
//!   Recoverable, nothing was mutated.
//! - `InvariantViolation`: the engine reached a state that should be
//!   impossible. The table is halted until the next `new_game`.

use thiserror::Error;

use super::phase::Phase;
use super::player::PlayerId;
use super::role::Role;
use crate::cards::{CardId, CardKind};

/// Top-level error returned by every `TurnEngine` operation.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("illegal action: {0}")]
    Illegal(#[from] IllegalAction),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("invariant violation: {0}")]
    Invariant(#[from] InvariantViolation),
}

impl EngineError {
    /// Is this a recoverable, caller-caused rejection?
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, EngineError::Invariant(_))
    }
}

/// A rule-breaking request. The engine state is unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum IllegalAction {
    #[error("the game has not started")]
    NotStarted,

    #[error("the game is already running")]
    AlreadyStarted,

    #[error("the game is over")]
    GameFinished,

    #[error("the table is halted after an internal fault")]
    Faulted,

    #[error("not your turn: {actual} is acting, not {requested}")]
    NotYourTurn { requested: PlayerId, actual: PlayerId },

    #[error("wrong phase: expected {expected}, currently {actual}")]
    WrongPhase { expected: Phase, actual: Phase },

    #[error("{0} is dead")]
    PlayerDead(PlayerId),

    #[error("{0} is controlled by the AI")]
    AiControlled(PlayerId),

    #[error("{0} is a human seat")]
    HumanControlled(PlayerId),

    #[error("no {0} card in hand")]
    CardUnavailable(CardKind),

    #[error("{0} is not in hand")]
    UnknownCard(CardId),

    #[error("{target} is not a legal target")]
    InvalidTarget { target: PlayerId },

    #[error("no legal target for an Attack")]
    NoLegalTarget,

    #[error("must discard at most {excess} cards, {requested} selected")]
    DiscardTooMany { excess: usize, requested: usize },

    #[error("no such player: {0}")]
    UnknownPlayer(PlayerId),
}

/// Rejected configuration or setup choice. The engine state is unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unsupported player count {0} (supported: 3-8)")]
    UnsupportedPlayerCount(usize),

    #[error("human seat {seat} is outside a table of {player_count}")]
    HumanSeatOutOfRange { seat: PlayerId, player_count: usize },

    #[error("seating {0:?} is not a permutation of the role table")]
    InvalidSeating(Vec<Role>),

    #[error("the deck has no cards")]
    EmptyDeck,

    #[error("starting deal needs {needed} cards but the deck holds {available}")]
    DeckTooSmall { needed: usize, available: usize },

    #[error("roster has {available} characters for {player_count} players")]
    RosterTooSmall { available: usize, player_count: usize },

    #[error("unknown character {0:?}")]
    UnknownCharacter(String),

    #[error("character {name:?} is already taken by {owner}")]
    CharacterTaken { name: String, owner: PlayerId },

    #[error("{0} has already chosen a character")]
    CharacterAlreadyChosen(PlayerId),

    #[error("{0} has not chosen a character")]
    CharacterNotChosen(PlayerId),
}

/// Should-never-happen engine state.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("draw and discard piles are both empty")]
    DeckExhausted,

    #[error("card pool holds {actual} cards, expected {expected}")]
    CardPoolMismatch { expected: usize, actual: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_conversions() {
        let err: EngineError = IllegalAction::NotStarted.into();
        assert!(matches!(err, EngineError::Illegal(IllegalAction::NotStarted)));
        assert!(err.is_recoverable());

        let err: EngineError = ConfigError::EmptyDeck.into();
        assert!(err.is_recoverable());

        let err: EngineError = InvariantViolation::DeckExhausted.into();
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_display() {
        let err = IllegalAction::NotYourTurn {
            requested: PlayerId::new(1),
            actual: PlayerId::new(3),
        };
        assert_eq!(
            err.to_string(),
            "not your turn: Player 3 is acting, not Player 1"
        );

        let err = EngineError::from(IllegalAction::CardUnavailable(CardKind::Peach));
        assert_eq!(err.to_string(), "illegal action: no Peach card in hand");
    }
}
