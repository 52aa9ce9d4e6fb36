//! Win conditions.
//!
//! Checked after every death:
//! 1. Lord dead, the Spy is the only survivor: Spy wins.
//! 2. Lord dead, a Rebel still alive: Rebels win.
//! 3. Lord alive, no Rebel and no Spy alive: Lord and Loyals win.
//! 4. Nobody alive can legally Attack anybody alive: stalemate.

use serde::{Deserialize, Serialize};

use crate::core::{Player, Role};

/// The winning side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// The Lord and the Loyals.
    #[serde(rename = "loyal")]
    LordLoyal,
    #[serde(rename = "rebel")]
    Rebel,
    #[serde(rename = "spy")]
    Spy,
}

impl Outcome {
    /// Did a player with `role` win?
    #[must_use]
    pub fn is_winner(self, role: Role) -> bool {
        match self {
            Outcome::LordLoyal => matches!(role, Role::Lord | Role::Loyal),
            Outcome::Rebel => role == Role::Rebel,
            Outcome::Spy => role == Role::Spy,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Outcome::LordLoyal => "Lord and Loyals win",
            Outcome::Rebel => "Rebels win",
            Outcome::Spy => "Spy wins",
        };
        f.write_str(text)
    }
}

/// How a finished game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEnd {
    Winner(Outcome),
    /// Only Loyals remain after the Lord fell; nobody can attack.
    Stalemate,
}

impl GameEnd {
    /// The winning side, if there is one.
    #[must_use]
    pub fn outcome(self) -> Option<Outcome> {
        match self {
            GameEnd::Winner(outcome) => Some(outcome),
            GameEnd::Stalemate => None,
        }
    }
}

/// Evaluate the win conditions for a roster.
///
/// Returns `None` while play should continue.
#[must_use]
pub fn evaluate(players: &[Player]) -> Option<GameEnd> {
    let alive: Vec<&Player> = players.iter().filter(|p| p.is_alive()).collect();
    let any_alive = |role: Role| alive.iter().any(|p| p.role() == role);

    let lord_alive = any_alive(Role::Lord);
    let rebel_alive = any_alive(Role::Rebel);
    let spy_alive = any_alive(Role::Spy);

    if !lord_alive {
        if alive.len() == 1 && spy_alive {
            return Some(GameEnd::Winner(Outcome::Spy));
        }
        if rebel_alive {
            return Some(GameEnd::Winner(Outcome::Rebel));
        }
    } else if !rebel_alive && !spy_alive {
        return Some(GameEnd::Winner(Outcome::LordLoyal));
    }

    let can_fight = alive.iter().any(|attacker| {
        alive.iter().any(|target| {
            target.id() != attacker.id() && attacker.role().is_legal_target(target.role())
        })
    });

    if can_fight {
        None
    } else {
        Some(GameEnd::Stalemate)
    }
}
