//! The rules of the table.
//!
//! `TurnEngine` is the single owner of table state. Every mutation goes
//! through one of its operations, which validate the caller first and
//! leave the table untouched on rejection:
//!
//! - `engine`: setup, character selection, queries, guards
//! - `turn`: phase transitions, AI turns, `advance`
//! - `combat`: card effects, damage, death, rewards
//! - `outcome`: win conditions
//! - `snapshot`: read-only views for renderers

pub mod combat;
pub mod engine;
pub mod outcome;
pub mod snapshot;
pub mod turn;

pub use combat::{CardEffect, CardPlay, DamageReport};
pub use engine::{GameRound, TurnEngine};
pub use outcome::{evaluate, GameEnd, Outcome};
pub use snapshot::{PlayerView, TableSnapshot};
pub use turn::Progress;
