//! Table configuration.
//!
//! `EngineConfig` carries every tunable of a table: seat count, the human
//! seat, hit point defaults, deal sizes, card effect magnitudes, deck
//! composition and AI pacing. The defaults describe the standard five-seat
//! table with a 24-card deck.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use super::player::PlayerId;
use super::role::role_table;
use crate::cards::{Character, DeckComposition};

/// Complete table configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Number of seats (3-8).
    pub player_count: usize,

    /// The human-controlled seat. `None` for an all-AI table.
    pub human_seat: Option<PlayerId>,

    /// Hit points before a character is chosen.
    pub default_hit_points: u32,

    /// Extra hit points for the Lord, on top of the character's.
    pub lord_bonus_hit_points: u32,

    /// Cards dealt to every seat by `start_game`.
    pub starting_hand_size: usize,

    /// Cards drawn in each Draw phase.
    pub draw_per_turn: usize,

    /// Damage dealt by one Attack.
    pub attack_damage: u32,

    /// Hit points restored by one Peach.
    pub peach_heal: u32,

    /// Cards drawn by whoever kills a Rebel.
    pub rebel_bounty: usize,

    /// Cards in the shared deck, by kind.
    pub deck: DeckComposition,

    /// Characters offered on the selection screen.
    pub character_offer_size: usize,

    /// Events retained by an `EventLog` built from this config.
    pub event_log_capacity: usize,

    /// Cards an AI seat may play in one Play phase.
    pub max_ai_plays: u32,

    /// Illegal AI decisions tolerated before its turn is ended.
    pub max_ai_rejections: u32,

    /// Pause before each AI decision in `advance` (milliseconds).
    pub ai_think_delay_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            player_count: 5,
            human_seat: Some(PlayerId::new(0)),
            default_hit_points: 4,
            lord_bonus_hit_points: 1,
            starting_hand_size: 4,
            draw_per_turn: 2,
            attack_damage: 1,
            peach_heal: 1,
            rebel_bounty: 3,
            deck: DeckComposition::default(),
            character_offer_size: 8,
            event_log_capacity: 50,
            max_ai_plays: 1,
            max_ai_rejections: 3,
            ai_think_delay_ms: 0,
        }
    }
}

impl EngineConfig {
    /// Set the number of seats.
    #[must_use]
    pub fn with_player_count(mut self, count: usize) -> Self {
        self.player_count = count;
        self
    }

    /// Set (or clear) the human seat.
    #[must_use]
    pub fn with_human_seat(mut self, seat: Option<PlayerId>) -> Self {
        self.human_seat = seat;
        self
    }

    /// Seat only AI players.
    #[must_use]
    pub fn all_ai(self) -> Self {
        self.with_human_seat(None)
    }

    /// Replace the deck composition.
    #[must_use]
    pub fn with_deck(mut self, deck: DeckComposition) -> Self {
        self.deck = deck;
        self
    }

    /// Set the starting hand size.
    #[must_use]
    pub fn with_starting_hand_size(mut self, size: usize) -> Self {
        self.starting_hand_size = size;
        self
    }

    /// Set how many cards an AI seat may play per turn.
    #[must_use]
    pub fn with_max_ai_plays(mut self, plays: u32) -> Self {
        self.max_ai_plays = plays;
        self
    }

    /// Set the AI thinking pause.
    #[must_use]
    pub fn with_ai_think_delay_ms(mut self, millis: u64) -> Self {
        self.ai_think_delay_ms = millis;
        self
    }

    /// Check the configuration against the rules of the table.
    pub fn validate(&self) -> Result<(), ConfigError> {
        role_table(self.player_count)?;

        if let Some(seat) = self.human_seat {
            if seat.index() >= self.player_count {
                return Err(ConfigError::HumanSeatOutOfRange {
                    seat,
                    player_count: self.player_count,
                });
            }
        }

        let available = self.deck.total();
        if available == 0 {
            return Err(ConfigError::EmptyDeck);
        }

        let needed = self.player_count * self.starting_hand_size;
        if needed > available {
            return Err(ConfigError::DeckTooSmall { needed, available });
        }

        let roster = Character::roster().len();
        if roster < self.player_count {
            return Err(ConfigError::RosterTooSmall {
                available: roster,
                player_count: self.player_count,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardKind;

    #[test]
    fn test_default_is_valid() {
        let config = EngineConfig::default();
        assert_eq!(config.player_count, 5);
        assert_eq!(config.deck.total(), 24);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = EngineConfig::default()
            .with_player_count(6)
            .all_ai()
            .with_max_ai_plays(3)
            .with_ai_think_delay_ms(250);

        assert_eq!(config.player_count, 6);
        assert_eq!(config.human_seat, None);
        assert_eq!(config.max_ai_plays, 3);
        assert_eq!(config.ai_think_delay_ms, 250);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_player_count() {
        let config = EngineConfig::default().with_player_count(2);
        assert_eq!(config.validate(), Err(ConfigError::UnsupportedPlayerCount(2)));
    }

    #[test]
    fn test_validate_human_seat() {
        let config = EngineConfig::default().with_human_seat(Some(PlayerId::new(5)));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::HumanSeatOutOfRange { .. })
        ));
    }

    #[test]
    fn test_validate_deck() {
        let empty =
            EngineConfig::default().with_deck(DeckComposition::only(CardKind::Attack, 0));
        assert_eq!(empty.validate(), Err(ConfigError::EmptyDeck));

        let small =
            EngineConfig::default().with_deck(DeckComposition::only(CardKind::Attack, 10));
        assert_eq!(
            small.validate(),
            Err(ConfigError::DeckTooSmall { needed: 20, available: 10 })
        );
    }

    #[test]
    fn test_validate_roster() {
        let config = EngineConfig::default()
            .with_player_count(8)
            .with_deck(DeckComposition::default().scaled(2));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serde_partial() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"player_count": 6, "human_seat": null}"#).unwrap();
        assert_eq!(config.player_count, 6);
        assert_eq!(config.human_seat, None);
        assert_eq!(config.starting_hand_size, 4);

        let json = serde_json::to_string(&config).unwrap();
        let back: EngineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
