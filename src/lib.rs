//! # kingdoms-engine
//!
//! Turn engine for a Three Kingdoms style hidden-role card game.
//!
//! ## Design Principles
//!
//! 1. **One Owner**: `TurnEngine` holds the whole table. Renderers read
//!    snapshots and drain events; they never mutate state.
//!
//! 2. **Validate, Then Mutate**: every operation checks turn, phase and
//!    legality first. A rejected call returns an error and changes nothing.
//!
//! 3. **Seeded Randomness**: shuffles, role deals and AI choices all come
//!    from one seeded `GameRng`, so a seed replays a whole game.
//!
//! ## Modules
//!
//! - `core`: players, roles, phases, RNG, configuration, errors
//! - `cards`: card kinds, the shared deck, the character roster
//! - `rules`: `TurnEngine`, combat, win conditions, snapshots
//! - `policy`: AI action policies
//! - `events`: structured game events and a bounded history
//! - `stats`: persisted win counts

pub mod cards;
pub mod core;
pub mod events;
pub mod policy;
pub mod rules;
pub mod stats;

pub use crate::core::{
    ConfigError, EngineConfig, EngineError, GameRng, IllegalAction, InvariantViolation, Phase,
    Player, PlayerId, Role, TableStatus,
};

pub use crate::cards::{Card, CardId, CardKind, Character, Deck, DeckComposition, Suit};

pub use crate::rules::{
    CardEffect, CardPlay, DamageReport, GameEnd, Outcome, Progress, TableSnapshot, TurnEngine,
};

pub use crate::policy::{
    ActionPolicy, Decision, DecisionContext, PassivePolicy, RandomPolicy, ScriptedPolicy,
};

pub use crate::events::{EventLog, GameEvent};

pub use crate::stats::{JsonFileStore, MemoryStore, StatsError, StatsStore, WinStats};
