//! Player identification and per-seat state.
//!
//! ## PlayerId
//!
//! Seat index, 0-based. Turn order follows seat order.
//!
//! ## Player
//!
//! Role, character, hit points, hand and equipment for one seat. Role,
//! character and controller are fixed once set; hit points only move through
//! the engine's damage and heal paths, and `alive` flips to false exactly once.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::role::Role;
use crate::cards::{Card, CardId, CardKind, Character};

/// Seat identifier. The first seat is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all seats of a table with `player_count` players.
    ///
    /// ```
    /// use kingdoms_engine::core::PlayerId;
    ///
    /// let seats: Vec<_> = PlayerId::all(5).collect();
    /// assert_eq!(seats.len(), 5);
    /// assert_eq!(seats[4], PlayerId::new(4));
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Equipped cards. Tables rarely see more than a handful per player.
pub type Equipment = SmallVec<[Card; 4]>;

/// One seat at the table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    id: PlayerId,
    role: Role,
    character: Option<Character>,
    hit_points: u32,
    max_hit_points: u32,
    hand: Vec<Card>,
    equipment: Equipment,
    alive: bool,
    is_ai: bool,
}

impl Player {
    /// Create a living player with an empty hand.
    ///
    /// The Lord starts with `lord_bonus` extra hit points.
    #[must_use]
    pub fn new(
        id: PlayerId,
        role: Role,
        is_ai: bool,
        default_hit_points: u32,
        lord_bonus: u32,
    ) -> Self {
        let max_hit_points = if role == Role::Lord {
            default_hit_points + lord_bonus
        } else {
            default_hit_points
        };

        Self {
            id,
            role,
            character: None,
            hit_points: max_hit_points,
            max_hit_points,
            hand: Vec::new(),
            equipment: Equipment::new(),
            alive: true,
            is_ai,
        }
    }

    #[must_use]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    #[must_use]
    pub fn character(&self) -> Option<&Character> {
        self.character.as_ref()
    }

    #[must_use]
    pub fn hit_points(&self) -> u32 {
        self.hit_points
    }

    #[must_use]
    pub fn max_hit_points(&self) -> u32 {
        self.max_hit_points
    }

    #[must_use]
    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    #[must_use]
    pub fn equipment(&self) -> &[Card] {
        &self.equipment
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    #[must_use]
    pub fn is_ai(&self) -> bool {
        self.is_ai
    }

    /// Cards held in hand and equipment.
    #[must_use]
    pub fn cards_held(&self) -> usize {
        self.hand.len() + self.equipment.len()
    }

    /// Cards in hand beyond the hit point limit.
    #[must_use]
    pub fn hand_excess(&self) -> usize {
        self.hand.len().saturating_sub(self.hit_points as usize)
    }

    /// Index of the first card of `kind` in hand.
    #[must_use]
    pub fn find_card(&self, kind: CardKind) -> Option<usize> {
        self.hand.iter().position(|c| c.kind == kind)
    }

    /// Is this player missing hit points?
    #[must_use]
    pub fn is_wounded(&self) -> bool {
        self.hit_points < self.max_hit_points
    }

    // === Engine-side mutation ===

    /// Bind a character. Its hit points replace the defaults; the Lord keeps
    /// its bonus on top.
    pub(crate) fn bind_character(&mut self, character: Character, lord_bonus: u32) {
        let bonus = if self.role == Role::Lord { lord_bonus } else { 0 };
        self.max_hit_points = character.hit_points + bonus;
        self.hit_points = self.max_hit_points;
        self.character = Some(character);
    }

    pub(crate) fn take_card(&mut self, card: Card) {
        self.hand.push(card);
    }

    pub(crate) fn remove_card_at(&mut self, index: usize) -> Card {
        self.hand.remove(index)
    }

    pub(crate) fn remove_card_by_id(&mut self, id: CardId) -> Option<Card> {
        let index = self.hand.iter().position(|c| c.id == id)?;
        Some(self.hand.remove(index))
    }

    pub(crate) fn pop_card(&mut self) -> Option<Card> {
        self.hand.pop()
    }

    pub(crate) fn equip(&mut self, card: Card) {
        self.equipment.push(card);
    }

    /// Empty hand and equipment, returning everything removed.
    pub(crate) fn forfeit_all(&mut self) -> Vec<Card> {
        let mut cards: Vec<Card> = self.hand.drain(..).collect();
        cards.extend(self.equipment.drain(..));
        cards
    }

    /// Lose up to `amount` hit points, never going below zero.
    ///
    /// Returns the hit points actually lost.
    pub(crate) fn lose_hit_points(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.hit_points);
        self.hit_points -= lost;
        lost
    }

    /// Recover up to `amount` hit points, capped at the maximum.
    ///
    /// Returns the hit points actually recovered.
    pub(crate) fn recover(&mut self, amount: u32) -> u32 {
        let healed = amount.min(self.max_hit_points - self.hit_points);
        self.hit_points += healed;
        healed
    }

    pub(crate) fn mark_dead(&mut self) {
        self.alive = false;
    }
}

/// Seat `player_count` players with the given roles.
///
/// `human_seat` is the one human-controlled seat; `None` seats an all-AI
/// table.
#[must_use]
pub fn create_players(
    roles: &[Role],
    human_seat: Option<PlayerId>,
    default_hit_points: u32,
    lord_bonus: u32,
) -> Vec<Player> {
    roles
        .iter()
        .zip(PlayerId::all(roles.len()))
        .map(|(&role, id)| {
            let is_ai = human_seat != Some(id);
            Player::new(id, role, is_ai, default_hit_points, lord_bonus)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Suit;

    fn card(id: u32, kind: CardKind) -> Card {
        Card::new(CardId::new(id), kind, Suit::Spades, 1)
    }

    #[test]
    fn test_player_id_basics() {
        let p0 = PlayerId::new(0);
        assert_eq!(p0.index(), 0);
        assert_eq!(format!("{}", PlayerId::new(3)), "Player 3");
    }

    #[test]
    fn test_lord_bonus() {
        let lord = Player::new(PlayerId::new(0), Role::Lord, false, 4, 1);
        let rebel = Player::new(PlayerId::new(1), Role::Rebel, true, 4, 1);

        assert_eq!(lord.max_hit_points(), 5);
        assert_eq!(lord.hit_points(), 5);
        assert_eq!(rebel.max_hit_points(), 4);
    }

    #[test]
    fn test_bind_character_keeps_lord_bonus() {
        let mut lord = Player::new(PlayerId::new(0), Role::Lord, false, 4, 1);
        let roster = Character::roster();
        let three_hp = roster.iter().find(|c| c.hit_points == 3).unwrap().clone();

        lord.bind_character(three_hp, 1);

        assert_eq!(lord.max_hit_points(), 4);
        assert_eq!(lord.hit_points(), 4);
        assert!(lord.character().is_some());
    }

    #[test]
    fn test_create_players() {
        let roles = [Role::Lord, Role::Loyal, Role::Loyal, Role::Rebel, Role::Spy];
        let players = create_players(&roles, Some(PlayerId::new(0)), 4, 1);

        assert_eq!(players.len(), 5);
        assert_eq!(players.iter().filter(|p| !p.is_ai()).count(), 1);
        assert!(!players[0].is_ai());
        assert!(players.iter().all(|p| p.is_alive() && p.hand().is_empty()));

        let all_ai = create_players(&roles, None, 4, 1);
        assert!(all_ai.iter().all(Player::is_ai));
    }

    #[test]
    fn test_hit_points_saturate() {
        let mut p = Player::new(PlayerId::new(1), Role::Rebel, true, 4, 1);

        assert_eq!(p.lose_hit_points(3), 3);
        assert_eq!(p.lose_hit_points(5), 1);
        assert_eq!(p.hit_points(), 0);

        assert_eq!(p.recover(10), 4);
        assert_eq!(p.hit_points(), 4);
        assert_eq!(p.recover(1), 0);
    }

    #[test]
    fn test_hand_helpers() {
        let mut p = Player::new(PlayerId::new(1), Role::Loyal, true, 2, 1);
        p.take_card(card(1, CardKind::Attack));
        p.take_card(card(2, CardKind::Peach));
        p.take_card(card(3, CardKind::Equip));

        assert_eq!(p.hand_excess(), 1);
        assert_eq!(p.find_card(CardKind::Peach), Some(1));
        assert_eq!(p.find_card(CardKind::Dodge), None);

        let equip = p.remove_card_by_id(CardId::new(3)).unwrap();
        p.equip(equip);
        assert_eq!(p.cards_held(), 3);
        assert_eq!(p.hand_excess(), 0);

        let forfeited = p.forfeit_all();
        assert_eq!(forfeited.len(), 3);
        assert_eq!(p.cards_held(), 0);
    }
}
