//! Secret roles and the targeting matrix between them.
//!
//! ## Role Table
//!
//! Every table has exactly one Lord, one Rebel and one Spy. The remaining
//! seats are Loyal. For the standard five-seat table the multiset is
//! `[Lord, Loyal, Loyal, Rebel, Spy]`.
//!
//! ## Targeting
//!
//! `Role::is_legal_target` encodes who may Attack whom. The relation is
//! deliberately asymmetric: the Spy may attack everyone, but Loyals may not
//! attack each other and nobody but the Rebel and the Spy may attack the Lord.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use super::rng::GameRng;

/// Smallest supported table.
pub const MIN_PLAYERS: usize = 3;

/// Largest supported table.
pub const MAX_PLAYERS: usize = 8;

/// A player's secret role.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Plays first, has one extra hit point. Wins with the Loyals.
    Lord,
    /// Protects the Lord.
    Loyal,
    /// Wins when the Lord falls while a Rebel still stands.
    Rebel,
    /// Wins only as the last player standing.
    Spy,
}

impl Role {
    /// All roles, in table order.
    pub const ALL: [Role; 4] = [Role::Lord, Role::Loyal, Role::Rebel, Role::Spy];

    /// Can a player with this role Attack a player with role `target`?
    ///
    /// ```
    /// use kingdoms_engine::core::Role;
    ///
    /// assert!(Role::Spy.is_legal_target(Role::Spy));
    /// assert!(Role::Rebel.is_legal_target(Role::Lord));
    /// assert!(!Role::Loyal.is_legal_target(Role::Loyal));
    /// assert!(!Role::Lord.is_legal_target(Role::Loyal));
    /// ```
    #[must_use]
    pub const fn is_legal_target(self, target: Role) -> bool {
        match self {
            Role::Lord | Role::Loyal => matches!(target, Role::Rebel | Role::Spy),
            Role::Rebel => matches!(target, Role::Lord | Role::Loyal | Role::Spy),
            Role::Spy => true,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Role::Lord => "Lord",
            Role::Loyal => "Loyal",
            Role::Rebel => "Rebel",
            Role::Spy => "Spy",
        };
        f.write_str(name)
    }
}

/// The fixed role multiset for a table of `player_count` seats.
///
/// ```
/// use kingdoms_engine::core::{role_table, Role};
///
/// let table = role_table(5).unwrap();
/// assert_eq!(table, vec![Role::Lord, Role::Loyal, Role::Loyal, Role::Rebel, Role::Spy]);
/// ```
pub fn role_table(player_count: usize) -> Result<Vec<Role>, ConfigError> {
    if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&player_count) {
        return Err(ConfigError::UnsupportedPlayerCount(player_count));
    }

    let mut roles = Vec::with_capacity(player_count);
    roles.push(Role::Lord);
    roles.extend(std::iter::repeat(Role::Loyal).take(player_count - 3));
    roles.push(Role::Rebel);
    roles.push(Role::Spy);
    Ok(roles)
}

/// Deal the role table as a uniformly random permutation.
pub fn assign_roles(player_count: usize, rng: &mut GameRng) -> Result<Vec<Role>, ConfigError> {
    let mut roles = role_table(player_count)?;
    rng.shuffle(&mut roles);
    Ok(roles)
}

/// Check that an explicit seating is a permutation of the role table.
pub fn validate_seating(roles: &[Role]) -> Result<(), ConfigError> {
    let mut expected = role_table(roles.len())?;
    let mut given = roles.to_vec();
    expected.sort();
    given.sort();

    if expected == given {
        Ok(())
    } else {
        Err(ConfigError::InvalidSeating(roles.to_vec()))
    }
}
