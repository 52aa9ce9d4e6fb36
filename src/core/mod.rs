//! Core engine types: players, roles, phases, RNG, configuration, errors.

pub mod config;
pub mod error;
pub mod phase;
pub mod player;
pub mod rng;
pub mod role;

pub use config::EngineConfig;
pub use error::{ConfigError, EngineError, IllegalAction, InvariantViolation};
pub use phase::{Phase, TableStatus};
pub use player::{create_players, Equipment, Player, PlayerId};
pub use rng::{GameRng, GameRngState};
pub use role::{assign_roles, role_table, validate_seating, Role, MAX_PLAYERS, MIN_PLAYERS};
