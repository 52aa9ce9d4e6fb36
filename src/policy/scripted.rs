//! Deterministic policies for tests and replays.

use std::collections::VecDeque;

use super::{ActionPolicy, Decision, DecisionContext};
use crate::core::GameRng;

/// Replays queued decisions in order, then ends every turn.
#[derive(Clone, Debug, Default)]
pub struct ScriptedPolicy {
    queue: VecDeque<Decision>,
    consumed: usize,
}

impl ScriptedPolicy {
    #[must_use]
    pub fn new(decisions: impl IntoIterator<Item = Decision>) -> Self {
        Self {
            queue: decisions.into_iter().collect(),
            consumed: 0,
        }
    }

    /// Queue another decision.
    pub fn push(&mut self, decision: Decision) {
        self.queue.push_back(decision);
    }

    /// Decisions not yet handed out.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    /// Decisions handed out so far, excluding the fallback `EndTurn`s.
    #[must_use]
    pub fn consumed(&self) -> usize {
        self.consumed
    }
}

impl ActionPolicy for ScriptedPolicy {
    fn decide(&mut self, _ctx: &DecisionContext<'_>, _rng: &mut GameRng) -> Decision {
        match self.queue.pop_front() {
            Some(decision) => {
                self.consumed += 1;
                decision
            }
            None => Decision::EndTurn,
        }
    }
}

/// Never plays a card.
#[derive(Clone, Copy, Debug, Default)]
pub struct PassivePolicy;

impl ActionPolicy for PassivePolicy {
    fn decide(&mut self, _ctx: &DecisionContext<'_>, _rng: &mut GameRng) -> Decision {
        Decision::EndTurn
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardKind;
    use crate::core::{Player, PlayerId, Role};

    #[test]
    fn test_scripted_replays_then_passes() {
        let player = Player::new(PlayerId::new(2), Role::Spy, true, 4, 1);
        let players = vec![player.clone()];
        let ctx = DecisionContext {
            actor: &player,
            players: &players,
            legal_targets: &[],
            plays_made: 0,
        };
        let mut rng = GameRng::new(0);

        let first = Decision::Use { kind: CardKind::Equip, target: None };
        let mut policy = ScriptedPolicy::new([first]);
        assert_eq!(policy.remaining(), 1);

        assert_eq!(policy.decide(&ctx, &mut rng), first);
        assert_eq!(policy.decide(&ctx, &mut rng), Decision::EndTurn);
        assert_eq!(policy.consumed(), 1);

        policy.push(Decision::EndTurn);
        assert_eq!(policy.remaining(), 1);
    }

    #[test]
    fn test_passive() {
        let player = Player::new(PlayerId::new(0), Role::Lord, true, 4, 1);
        let players = vec![player.clone()];
        let ctx = DecisionContext {
            actor: &player,
            players: &players,
            legal_targets: &[PlayerId::new(1)],
            plays_made: 0,
        };
        assert_eq!(PassivePolicy.decide(&ctx, &mut GameRng::new(0)), Decision::EndTurn);
    }
}
