//! Turn phases and table status.

use serde::{Deserialize, Serialize};

use crate::rules::GameEnd;

/// Phase of the active player's turn.
///
/// Phases cycle `Draw -> Play -> Discard -> End`, then the next living
/// player starts at `Draw`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    Draw,
    Play,
    Discard,
    End,
}

impl Phase {
    /// The phase that follows this one.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Phase::Draw => Phase::Play,
            Phase::Play => Phase::Discard,
            Phase::Discard => Phase::End,
            Phase::End => Phase::Draw,
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Draw => "Draw",
            Phase::Play => "Play",
            Phase::Discard => "Discard",
            Phase::End => "End",
        };
        f.write_str(name)
    }
}

/// Where the table is in its lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TableStatus {
    /// Roles dealt, characters being chosen.
    #[default]
    Setup,
    /// Turns are being played.
    InProgress,
    /// A win condition (or stalemate) fired. Terminal until `new_game`.
    Finished(GameEnd),
    /// An invariant violation halted the table.
    Faulted,
}

impl TableStatus {
    /// Has the game reached a terminal state?
    #[must_use]
    pub fn is_over(self) -> bool {
        matches!(self, TableStatus::Finished(_) | TableStatus::Faulted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_cycle() {
        let mut phase = Phase::Draw;
        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(phase);
            phase = phase.next();
        }
        assert_eq!(seen, vec![Phase::Draw, Phase::Play, Phase::Discard, Phase::End]);
        assert_eq!(phase, Phase::Draw);
    }

    #[test]
    fn test_status_is_over() {
        assert!(!TableStatus::Setup.is_over());
        assert!(!TableStatus::InProgress.is_over());
        assert!(TableStatus::Faulted.is_over());
        assert!(TableStatus::Finished(GameEnd::Stalemate).is_over());
    }
}
