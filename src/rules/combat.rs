//! Card effects, damage, death and rewards.
//!
//! ## Death
//!
//! When hit points reach zero the player dies, in this order:
//! 1. `alive` flips to false (once; later damage is ignored).
//! 2. Their hand and equipment go to the discard pile.
//! 3. The killer is rewarded or punished: a dead Rebel pays the killer three
//!    cards, a Lord who kills a Loyal forfeits every card they hold.
//! 4. Win conditions are checked.
//! 5. If the game goes on and the dead player was the active one, the turn
//!    passes to the next living seat.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::engine::TurnEngine;
use super::outcome::evaluate;
use crate::cards::{Card, CardKind};
use crate::core::{EngineError, IllegalAction, PlayerId, Role, TableStatus};
use crate::events::GameEvent;

/// Result of applying damage to one player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageReport {
    pub target: PlayerId,
    /// Hit points actually lost.
    pub dealt: u32,
    pub remaining: u32,
    /// Did this damage kill the target?
    pub killed: bool,
}

/// What a played card did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardEffect {
    Damage(DamageReport),
    Healed(u32),
    Equipped,
    /// Played for no effect: a Dodge, or a Peach at full health.
    NoEffect,
}

/// A card that left a hand through play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardPlay {
    pub card: Card,
    pub target: Option<PlayerId>,
    pub effect: CardEffect,
}

impl TurnEngine {
    /// Validate and resolve a card from `player`'s hand.
    ///
    /// Nothing is mutated when the play is rejected.
    pub(super) fn play_card(
        &mut self,
        player: PlayerId,
        kind: CardKind,
        target: Option<PlayerId>,
    ) -> Result<CardPlay, EngineError> {
        let seat = player.index();
        let index = self.players[seat]
            .find_card(kind)
            .ok_or(IllegalAction::CardUnavailable(kind))?;

        let target = match kind {
            CardKind::Attack => Some(self.attack_target(player, target)?),
            _ => None,
        };

        let card = self.players[seat].remove_card_at(index);
        debug!("{} plays {} ({})", player, kind, card.id);
        self.emit(GameEvent::CardPlayed {
            player,
            card: card.id,
            kind,
            target,
        });

        if kind.discards_on_use() {
            self.deck.discard(card);
        } else {
            self.players[seat].equip(card);
        }

        let effect = match (kind, target) {
            (CardKind::Attack, Some(victim)) => {
                let report = self.apply_damage(player, victim, self.config.attack_damage)?;
                CardEffect::Damage(report)
            }
            (CardKind::Peach, _) if self.players[seat].is_wounded() => {
                let healed = self.players[seat].recover(self.config.peach_heal);
                self.emit(GameEvent::Healed { player, amount: healed });
                CardEffect::Healed(healed)
            }
            (CardKind::Equip, _) => {
                self.emit(GameEvent::Equipped { player, card: card.id });
                CardEffect::Equipped
            }
            _ => CardEffect::NoEffect,
        };

        Ok(CardPlay { card, target, effect })
    }

    /// Resolve who an Attack hits. `None` picks a random legal enemy.
    fn attack_target(
        &mut self,
        attacker: PlayerId,
        requested: Option<PlayerId>,
    ) -> Result<PlayerId, IllegalAction> {
        match requested {
            Some(target) => {
                let victim = self
                    .players
                    .get(target.index())
                    .ok_or(IllegalAction::UnknownPlayer(target))?;
                let legal = victim.is_alive()
                    && target != attacker
                    && self.players[attacker.index()].role().is_legal_target(victim.role());
                if legal {
                    Ok(target)
                } else {
                    Err(IllegalAction::InvalidTarget { target })
                }
            }
            None => {
                let candidates = self.legal_targets(attacker);
                self.rng
                    .choose(&candidates)
                    .copied()
                    .ok_or(IllegalAction::NoLegalTarget)
            }
        }
    }

    /// Apply `amount` damage to `target`, attributed to the active player.
    ///
    /// Damage to a dead player is ignored. Deaths resolve rewards and the
    /// win check before this returns.
    pub fn deal_damage(
        &mut self,
        target: PlayerId,
        amount: u32,
    ) -> Result<DamageReport, EngineError> {
        self.ensure_running()?;
        self.seat(target)?;

        let source = self.round.current;
        self.apply_damage(source, target, amount)
    }

    fn apply_damage(
        &mut self,
        source: PlayerId,
        target: PlayerId,
        amount: u32,
    ) -> Result<DamageReport, EngineError> {
        let seat = target.index();
        if !self.players[seat].is_alive() {
            return Ok(DamageReport {
                target,
                dealt: 0,
                remaining: 0,
                killed: false,
            });
        }

        let dealt = self.players[seat].lose_hit_points(amount);
        let remaining = self.players[seat].hit_points();
        self.emit(GameEvent::Damaged {
            source,
            target,
            amount: dealt,
            remaining,
        });

        let killed = remaining == 0;
        if killed {
            self.resolve_death(source, target)?;
        }

        Ok(DamageReport {
            target,
            dealt,
            remaining,
            killed,
        })
    }

    fn resolve_death(&mut self, killer: PlayerId, dead: PlayerId) -> Result<(), EngineError> {
        let role = self.players[dead.index()].role();
        self.players[dead.index()].mark_dead();

        info!("{} ({}) killed by {}", dead, role, killer);
        self.emit(GameEvent::Died {
            player: dead,
            role,
            killer,
        });

        let dropped = self.players[dead.index()].forfeit_all();
        self.deck.discard_all(dropped);

        let killer_alive = killer != dead && self.players[killer.index()].is_alive();
        if killer_alive {
            match (self.players[killer.index()].role(), role) {
                (_, Role::Rebel) => {
                    let drawn = self.draw_into(killer, self.config.rebel_bounty)?;
                    self.emit(GameEvent::RebelBounty { killer, drawn });
                }
                (Role::Lord, Role::Loyal) => {
                    let forfeited = self.players[killer.index()].forfeit_all();
                    info!("{} killed a Loyal and forfeits {} cards", killer, forfeited.len());
                    self.emit(GameEvent::FriendlyFirePenalty {
                        lord: killer,
                        forfeited: forfeited.len(),
                    });
                    self.deck.discard_all(forfeited);
                }
                _ => {}
            }
        }

        self.check_game_end();
        if self.status == TableStatus::InProgress && dead == self.round.current {
            self.finish_turn();
        }
        Ok(())
    }

    fn check_game_end(&mut self) {
        if let Some(end) = evaluate(&self.players) {
            info!("game over: {:?}", end);
            self.status = TableStatus::Finished(end);
            self.emit(GameEvent::GameOver { end });
        }
    }
}
