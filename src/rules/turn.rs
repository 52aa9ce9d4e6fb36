//! Turn flow: Draw → Play → Discard → End, then the next living seat.
//!
//! Human seats drive their own Play and Discard phases through
//! `use_card`, `end_turn` and `discard`. AI seats are driven by `advance`
//! (or one turn at a time by `play_ai_turn`), which consults the installed
//! `ActionPolicy`.

use std::time::Duration;

use log::{debug, warn};

use super::combat::CardPlay;
use super::engine::TurnEngine;
use super::outcome::GameEnd;
use crate::cards::{CardId, CardKind};
use crate::core::{EngineError, IllegalAction, Phase, PlayerId, TableStatus};
use crate::events::GameEvent;
use crate::policy::{Decision, DecisionContext};

/// Where `advance` stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Progress {
    /// A human seat has to act.
    AwaitingHuman { player: PlayerId, phase: Phase },
    /// An all-AI table finished one round without a result.
    RoundComplete,
    /// The game is over.
    Finished(GameEnd),
}

impl TurnEngine {
    /// Draw the per-turn cards and enter the Play phase.
    ///
    /// Returns the number of cards drawn.
    pub fn draw_phase(&mut self, player: PlayerId) -> Result<usize, EngineError> {
        self.ensure_turn(player, Phase::Draw)?;

        let drawn = self.draw_into(player, self.config.draw_per_turn)?;
        self.next_phase();
        Ok(drawn)
    }

    /// Play the first card of `kind` from a human hand.
    ///
    /// `target` is only read for Attacks; `None` picks a random legal enemy.
    pub fn use_card(
        &mut self,
        player: PlayerId,
        kind: CardKind,
        target: Option<PlayerId>,
    ) -> Result<CardPlay, EngineError> {
        self.ensure_turn(player, Phase::Play)?;
        if self.players[player.index()].is_ai() {
            return Err(IllegalAction::AiControlled(player).into());
        }

        self.play_card(player, kind, target)
    }

    /// Stop playing cards and resolve the Discard phase.
    ///
    /// Returns the phase the table is in afterwards: `Discard` while a human
    /// still holds more cards than hit points, otherwise `Draw` for the next
    /// seat.
    pub fn end_turn(&mut self, player: PlayerId) -> Result<Phase, EngineError> {
        self.ensure_turn(player, Phase::Play)?;
        if self.players[player.index()].is_ai() {
            return Err(IllegalAction::AiControlled(player).into());
        }

        self.next_phase();
        self.resolve_discard();
        Ok(self.round.phase)
    }

    /// Discard chosen cards from a human hand during the Discard phase.
    ///
    /// At most the current excess may be discarded. Once the hand fits the
    /// hit point limit the turn passes on.
    pub fn discard(&mut self, player: PlayerId, cards: &[CardId]) -> Result<Phase, EngineError> {
        self.ensure_turn(player, Phase::Discard)?;
        let seat = player.index();
        if self.players[seat].is_ai() {
            return Err(IllegalAction::AiControlled(player).into());
        }

        let excess = self.players[seat].hand_excess();
        if cards.len() > excess {
            return Err(IllegalAction::DiscardTooMany {
                excess,
                requested: cards.len(),
            }
            .into());
        }

        for (i, id) in cards.iter().enumerate() {
            let in_hand = self.players[seat].hand().iter().any(|c| c.id == *id);
            if !in_hand || cards[..i].contains(id) {
                return Err(IllegalAction::UnknownCard(*id).into());
            }
        }

        let removed: Vec<_> = cards
            .iter()
            .filter_map(|id| self.players[seat].remove_card_by_id(*id))
            .collect();
        if !removed.is_empty() {
            self.emit(GameEvent::Discarded {
                player,
                count: removed.len(),
            });
            self.deck.discard_all(removed);
        }

        self.resolve_discard();
        Ok(self.round.phase)
    }

    /// Run the table until a human has to act or the game ends.
    ///
    /// Human Draw phases are taken automatically. Once no living human seat
    /// is left, stops after each completed round.
    pub fn advance(&mut self) -> Result<Progress, EngineError> {
        self.ensure_running()?;
        let start_round = self.round.round_count;

        loop {
            if let TableStatus::Finished(end) = self.status {
                return Ok(Progress::Finished(end));
            }

            let current = self.round.current;
            let phase = self.round.phase;

            if !self.players[current.index()].is_ai() {
                if phase == Phase::Draw {
                    self.draw_phase(current)?;
                    continue;
                }
                return Ok(Progress::AwaitingHuman { player: current, phase });
            }

            if !self.human_alive() && self.round.round_count > start_round {
                return Ok(Progress::RoundComplete);
            }

            self.play_ai_turn()?;
        }
    }

    /// Play out the current AI seat's whole turn.
    pub fn play_ai_turn(&mut self) -> Result<(), EngineError> {
        self.ensure_running()?;
        let actor = self.round.current;
        if !self.players[actor.index()].is_ai() {
            return Err(IllegalAction::HumanControlled(actor).into());
        }

        if self.round.phase == Phase::Draw {
            self.draw_phase(actor)?;
        }

        if self.round.phase == Phase::Play {
            self.run_ai_plays(actor)?;
            if self.status != TableStatus::InProgress || self.round.current != actor {
                return Ok(());
            }
            self.next_phase();
        }

        self.resolve_discard();
        Ok(())
    }

    fn run_ai_plays(&mut self, actor: PlayerId) -> Result<(), EngineError> {
        let mut plays = 0;
        let mut rejections = 0;

        while plays < self.config.max_ai_plays {
            if self.config.ai_think_delay_ms > 0 {
                std::thread::sleep(Duration::from_millis(self.config.ai_think_delay_ms));
            }

            let targets = self.legal_targets(actor);
            let ctx = DecisionContext {
                actor: &self.players[actor.index()],
                players: &self.players,
                legal_targets: &targets,
                plays_made: plays,
            };
            let decision = self.policy.decide(&ctx, &mut self.rng);

            let Decision::Use { kind, target } = decision else {
                break;
            };

            match self.play_card(actor, kind, target) {
                Ok(_) => {
                    plays += 1;
                    if self.status != TableStatus::InProgress {
                        return Ok(());
                    }
                }
                Err(EngineError::Illegal(reason)) => {
                    warn!("{} AI decision {:?} rejected: {}", actor, decision, reason);
                    self.emit(GameEvent::AiDecisionRejected { player: actor });
                    rejections += 1;
                    if rejections >= self.config.max_ai_rejections {
                        break;
                    }
                }
                Err(e) => return Err(e),
            }
        }

        Ok(())
    }

    /// Trim AI hands, or wait for a human to discard, then finish the turn.
    fn resolve_discard(&mut self) {
        let player = self.round.current;
        let seat = player.index();
        let excess = self.players[seat].hand_excess();

        if excess > 0 {
            if !self.players[seat].is_ai() {
                debug!("{} must discard {} cards", player, excess);
                return;
            }

            let dropped: Vec<_> = (0..excess)
                .filter_map(|_| self.players[seat].pop_card())
                .collect();
            self.emit(GameEvent::Discarded {
                player,
                count: dropped.len(),
            });
            self.deck.discard_all(dropped);
        }

        self.finish_turn();
    }

    /// Pass the turn to the next living seat.
    pub(super) fn finish_turn(&mut self) {
        self.enter_phase(Phase::End);

        let from = self.round.current;
        let to = self.next_alive_after(from);
        if to.index() <= from.index() {
            self.round.round_count += 1;
        }
        self.round.current = to;

        debug!("turn passes {} -> {} (round {})", from, to, self.round.round_count);
        self.emit(GameEvent::TurnPassed {
            from,
            to,
            round: self.round.round_count,
        });
        self.next_phase();
    }

    fn human_alive(&self) -> bool {
        self.config
            .human_seat
            .and_then(|seat| self.player(seat))
            .is_some_and(|p| p.is_alive())
    }

    /// The next living seat after `from`, wrapping. `from` itself when
    /// nobody else is alive.
    fn next_alive_after(&self, from: PlayerId) -> PlayerId {
        let count = self.players.len();
        (1..=count)
            .map(|step| (from.index() + step) % count)
            .find(|&seat| self.players[seat].is_alive())
            .map_or(from, |seat| self.players[seat].id())
    }

    fn next_phase(&mut self) {
        self.enter_phase(self.round.phase.next());
    }

    fn enter_phase(&mut self, phase: Phase) {
        self.round.phase = phase;
        let player = self.round.current;
        debug!("{} enters {}", player, phase);
        self.emit(GameEvent::PhaseEntered { player, phase });
    }
}
