//! The stock AI: play a random card, or don't.

use super::{ActionPolicy, Decision, DecisionContext};
use crate::cards::CardKind;
use crate::core::GameRng;

/// Plays a uniformly random hand card with probability `play_chance`,
/// aiming Attacks at a uniformly random legal target.
#[derive(Clone, Debug)]
pub struct RandomPolicy {
    play_chance: f64,
}

impl Default for RandomPolicy {
    fn default() -> Self {
        Self { play_chance: 0.7 }
    }
}

impl RandomPolicy {
    /// Create a policy that plays with the given probability (clamped to 0..=1).
    #[must_use]
    pub fn new(play_chance: f64) -> Self {
        Self {
            play_chance: play_chance.clamp(0.0, 1.0),
        }
    }

    #[must_use]
    pub fn play_chance(&self) -> f64 {
        self.play_chance
    }
}

impl ActionPolicy for RandomPolicy {
    fn decide(&mut self, ctx: &DecisionContext<'_>, rng: &mut GameRng) -> Decision {
        let hand = ctx.actor.hand();
        if hand.is_empty() || !rng.gen_bool(self.play_chance) {
            return Decision::EndTurn;
        }

        let Some(card) = rng.choose(hand) else {
            return Decision::EndTurn;
        };

        let target = if card.kind == CardKind::Attack {
            match rng.choose(ctx.legal_targets) {
                Some(&target) => Some(target),
                None => return Decision::EndTurn,
            }
        } else {
            None
        };

        Decision::Use { kind: card.kind, target }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, CardId, Suit};
    use crate::core::{Player, PlayerId, Role};

    fn player_with(kinds: &[CardKind]) -> Player {
        let mut player = Player::new(PlayerId::new(1), Role::Rebel, true, 4, 1);
        for (i, kind) in kinds.iter().enumerate() {
            player.take_card(Card::new(CardId::new(i as u32), *kind, Suit::Hearts, 1));
        }
        player
    }

    #[test]
    fn test_empty_hand_ends_turn() {
        let player = player_with(&[]);
        let players = vec![player.clone()];
        let ctx = DecisionContext {
            actor: &player,
            players: &players,
            legal_targets: &[PlayerId::new(0)],
            plays_made: 0,
        };

        let mut policy = RandomPolicy::new(1.0);
        assert_eq!(policy.decide(&ctx, &mut GameRng::new(1)), Decision::EndTurn);
    }

    #[test]
    fn test_never_plays_at_zero_chance() {
        let player = player_with(&[CardKind::Attack, CardKind::Peach]);
        let players = vec![player.clone()];
        let ctx = DecisionContext {
            actor: &player,
            players: &players,
            legal_targets: &[PlayerId::new(0)],
            plays_made: 0,
        };

        let mut policy = RandomPolicy::new(0.0);
        let mut rng = GameRng::new(4);
        for _ in 0..20 {
            assert_eq!(policy.decide(&ctx, &mut rng), Decision::EndTurn);
        }
    }

    #[test]
    fn test_attacks_pick_legal_target() {
        let player = player_with(&[CardKind::Attack]);
        let players = vec![player.clone()];
        let targets = [PlayerId::new(0), PlayerId::new(3)];
        let ctx = DecisionContext {
            actor: &player,
            players: &players,
            legal_targets: &targets,
            plays_made: 0,
        };

        let mut policy = RandomPolicy::new(1.0);
        let mut rng = GameRng::new(11);
        for _ in 0..20 {
            match policy.decide(&ctx, &mut rng) {
                Decision::Use { kind, target } => {
                    assert_eq!(kind, CardKind::Attack);
                    assert!(target.is_some_and(|t| targets.contains(&t)));
                }
                Decision::EndTurn => panic!("should always play at chance 1.0"),
            }
        }
    }

    #[test]
    fn test_attack_without_targets_ends_turn() {
        let player = player_with(&[CardKind::Attack]);
        let players = vec![player.clone()];
        let ctx = DecisionContext {
            actor: &player,
            players: &players,
            legal_targets: &[],
            plays_made: 0,
        };

        let mut policy = RandomPolicy::new(1.0);
        assert_eq!(policy.decide(&ctx, &mut GameRng::new(2)), Decision::EndTurn);
    }

    #[test]
    fn test_chance_is_clamped() {
        assert_eq!(RandomPolicy::new(3.0).play_chance(), 1.0);
        assert_eq!(RandomPolicy::new(-1.0).play_chance(), 0.0);
        assert_eq!(RandomPolicy::default().play_chance(), 0.7);
    }
}
