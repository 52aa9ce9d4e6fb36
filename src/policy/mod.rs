//! Action policies for AI-controlled seats.
//!
//! The engine never hardcodes AI behaviour. When an AI seat is in its Play
//! phase, the engine builds a `DecisionContext` and asks its `ActionPolicy`
//! for a `Decision`, then validates and applies it exactly like a human
//! request. Rejected decisions are counted and the policy is asked again.
//!
//! - `RandomPolicy`: play a random card with some probability, else pass
//! - `ScriptedPolicy`: replay a fixed queue of decisions
//! - `PassivePolicy`: always end the turn
//!
//! Any `FnMut(&DecisionContext, &mut GameRng) -> Decision` is also a policy.

mod random;
mod scripted;

pub use random::RandomPolicy;
pub use scripted::{PassivePolicy, ScriptedPolicy};

use crate::cards::CardKind;
use crate::core::{GameRng, Player, PlayerId};

/// What an AI seat wants to do next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    /// Play the first card of `kind` in hand. `target` is only read for
    /// Attacks; `None` lets the engine pick a random enemy.
    Use {
        kind: CardKind,
        target: Option<PlayerId>,
    },
    /// Stop playing cards and move to the Discard phase.
    EndTurn,
}

/// Read-only view handed to a policy at a decision point.
#[derive(Clone, Copy, Debug)]
pub struct DecisionContext<'a> {
    /// The AI seat that must decide.
    pub actor: &'a Player,
    /// Every seat at the table, in seat order.
    pub players: &'a [Player],
    /// Living players the actor may Attack.
    pub legal_targets: &'a [PlayerId],
    /// Cards already played this turn.
    pub plays_made: u32,
}

impl DecisionContext<'_> {
    /// Kinds present in the actor's hand, deduplicated, in deck order.
    #[must_use]
    pub fn playable_kinds(&self) -> Vec<CardKind> {
        CardKind::ALL
            .into_iter()
            .filter(|kind| self.actor.find_card(*kind).is_some())
            .collect()
    }
}

/// Chooses actions for AI seats.
pub trait ActionPolicy: Send {
    /// Decide the next action for `ctx.actor`.
    fn decide(&mut self, ctx: &DecisionContext<'_>, rng: &mut GameRng) -> Decision;
}

impl<F> ActionPolicy for F
where
    F: FnMut(&DecisionContext<'_>, &mut GameRng) -> Decision + Send,
{
    fn decide(&mut self, ctx: &DecisionContext<'_>, rng: &mut GameRng) -> Decision {
        self(ctx, rng)
    }
}
