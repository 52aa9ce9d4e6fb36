//! The turn engine: table setup, queries, and guards.
//!
//! `TurnEngine` owns the whole table aggregate (roster, deck, round state,
//! status) and is the only thing that mutates it. Turn flow lives in
//! `turn.rs`, card effects and deaths in `combat.rs`.
//!
//! ## Lifecycle
//!
//! ```
//! use kingdoms_engine::core::{EngineConfig, Phase, TableStatus};
//! use kingdoms_engine::rules::TurnEngine;
//!
//! let mut engine = TurnEngine::new(EngineConfig::default(), 42).unwrap();
//! assert_eq!(engine.status(), TableStatus::Setup);
//!
//! let human = engine.config().human_seat.unwrap();
//! let pick = engine.character_offer()[0].name.clone();
//! engine.select_character(human, &pick).unwrap();
//! engine.start_game().unwrap();
//!
//! assert_eq!(engine.status(), TableStatus::InProgress);
//! assert_eq!(engine.phase(), Phase::Draw);
//! assert_eq!(engine.current_player(), engine.lord().unwrap());
//! ```

use log::{error, info};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::outcome::{GameEnd, Outcome};
use super::snapshot::{PlayerView, TableSnapshot};
use crate::cards::{Card, Character, Deck};
use crate::core::{
    assign_roles, create_players, validate_seating, ConfigError, EngineConfig, EngineError, GameRng,
    GameRngState, IllegalAction, InvariantViolation, Phase, Player, PlayerId, Role, TableStatus,
};
use crate::events::{EventLog, GameEvent};
use crate::policy::{ActionPolicy, RandomPolicy};
use crate::stats::{StatsError, StatsStore};

/// Whose turn it is and how far into it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRound {
    /// The active player.
    pub current: PlayerId,
    /// The active player's phase.
    pub phase: Phase,
    /// Completed trips around the table.
    pub round_count: u32,
}

/// Turn/phase state machine for one table.
pub struct TurnEngine {
    pub(super) config: EngineConfig,
    pub(super) rng: GameRng,
    pub(super) players: Vec<Player>,
    pub(super) deck: Deck,
    pub(super) round: GameRound,
    pub(super) status: TableStatus,
    pub(super) policy: Box<dyn ActionPolicy>,
    pub(super) pending: Vec<GameEvent>,
    history: EventLog,
    outcome_reported: bool,
}

impl TurnEngine {
    /// Create an engine and deal the first table.
    ///
    /// AI seats use `RandomPolicy` until another policy is installed.
    pub fn new(config: EngineConfig, seed: u64) -> Result<Self, EngineError> {
        config.validate()?;
        let history = EventLog::new(config.event_log_capacity);

        let mut engine = Self {
            config,
            rng: GameRng::new(seed),
            players: Vec::new(),
            deck: Deck::default(),
            round: GameRound::default(),
            status: TableStatus::Setup,
            policy: Box::new(RandomPolicy::default()),
            pending: Vec::new(),
            history,
            outcome_reported: false,
        };
        engine.new_game()?;
        Ok(engine)
    }

    /// Replace the AI policy (builder pattern).
    #[must_use]
    pub fn with_policy(mut self, policy: impl ActionPolicy + 'static) -> Self {
        self.policy = Box::new(policy);
        self
    }

    /// Replace the AI policy.
    pub fn set_policy(&mut self, policy: impl ActionPolicy + 'static) {
        self.policy = Box::new(policy);
    }

    // === Setup ===

    /// Throw away the current table and deal a new one with random roles.
    ///
    /// Any game in progress is discarded without recovery.
    pub fn new_game(&mut self) -> Result<(), EngineError> {
        let roles = assign_roles(self.config.player_count, &mut self.rng)?;
        self.reset_table(roles);
        Ok(())
    }

    /// Deal a new table with an explicit seating.
    ///
    /// `roles` must be a permutation of the role table for the configured
    /// player count.
    pub fn new_game_with_roles(&mut self, roles: &[Role]) -> Result<(), EngineError> {
        if roles.len() != self.config.player_count {
            return Err(ConfigError::InvalidSeating(roles.to_vec()).into());
        }
        validate_seating(roles)?;
        self.reset_table(roles.to_vec());
        Ok(())
    }

    fn reset_table(&mut self, roles: Vec<Role>) {
        self.players = create_players(
            &roles,
            self.config.human_seat,
            self.config.default_hit_points,
            self.config.lord_bonus_hit_points,
        );
        self.deck = Deck::build(&self.config.deck, &mut self.rng);
        self.round = GameRound::default();
        self.status = TableStatus::Setup;
        self.pending.clear();
        self.history.clear();
        self.outcome_reported = false;

        info!(
            "new table: {} seats, {} cards",
            self.players.len(),
            self.deck.pool_size()
        );
        self.emit(GameEvent::TableReset {
            player_count: self.players.len(),
            seed: self.rng.seed(),
        });
    }

    /// Characters offered on the selection screen: untaken roster entries in
    /// random order, at most `character_offer_size` of them.
    pub fn character_offer(&mut self) -> Vec<Character> {
        let mut offer = self.untaken_characters();
        self.rng.shuffle(&mut offer);
        offer.truncate(self.config.character_offer_size);
        offer
    }

    /// Bind a roster character to a player.
    pub fn select_character(&mut self, player: PlayerId, name: &str) -> Result<(), EngineError> {
        self.ensure_setup()?;
        let seat = self.seat(player)?;

        if self.players[seat].character().is_some() {
            return Err(ConfigError::CharacterAlreadyChosen(player).into());
        }

        let character = Character::by_name(name)
            .ok_or_else(|| ConfigError::UnknownCharacter(name.to_string()))?;

        if let Some(owner) = self.taken_characters().get(character.name.as_str()) {
            return Err(ConfigError::CharacterTaken {
                name: character.name,
                owner: *owner,
            }
            .into());
        }

        self.bind_character(seat, character);
        Ok(())
    }

    /// Bind a random untaken character to a player and return it.
    ///
    /// Backs the "random pick" button of the selection screen; works for
    /// any seat, human or AI.
    pub fn random_character(&mut self, player: PlayerId) -> Result<Character, EngineError> {
        self.ensure_setup()?;
        let seat = self.seat(player)?;

        if self.players[seat].character().is_some() {
            return Err(ConfigError::CharacterAlreadyChosen(player).into());
        }

        let available = self.untaken_characters();
        let character = self
            .rng
            .choose(&available)
            .cloned()
            .ok_or(ConfigError::RosterTooSmall {
                available: Character::roster().len(),
                player_count: self.players.len(),
            })?;

        self.bind_character(seat, character.clone());
        Ok(character)
    }

    /// Give every AI seat without a character a random untaken one.
    pub fn auto_assign_characters(&mut self) -> Result<(), EngineError> {
        self.ensure_setup()?;

        for seat in 0..self.players.len() {
            let player = &self.players[seat];
            if !player.is_ai() || player.character().is_some() {
                continue;
            }
            let id = player.id();
            self.random_character(id)?;
        }

        Ok(())
    }

    fn bind_character(&mut self, seat: usize, character: Character) {
        let name = character.name.clone();
        let player = &mut self.players[seat];
        player.bind_character(character, self.config.lord_bonus_hit_points);
        let id = player.id();

        self.emit(GameEvent::CharacterChosen {
            player: id,
            character: name,
        });
    }

    fn taken_characters(&self) -> FxHashMap<&str, PlayerId> {
        self.players
            .iter()
            .filter_map(|p| p.character().map(|c| (c.name.as_str(), p.id())))
            .collect()
    }

    fn untaken_characters(&self) -> Vec<Character> {
        let taken = self.taken_characters();
        Character::roster()
            .into_iter()
            .filter(|c| !taken.contains_key(c.name.as_str()))
            .collect()
    }

    /// Deal opening hands and hand the first turn to the Lord.
    ///
    /// AI seats without a character get one automatically; the human seat
    /// must already have chosen.
    pub fn start_game(&mut self) -> Result<(), EngineError> {
        self.ensure_setup()?;

        if let Some(human) = self.players.iter().find(|p| !p.is_ai() && p.character().is_none()) {
            return Err(ConfigError::CharacterNotChosen(human.id()).into());
        }

        self.auto_assign_characters()?;

        for seat in PlayerId::all(self.players.len()) {
            self.draw_into(seat, self.config.starting_hand_size)?;
        }

        let lord = self.lord().ok_or(ConfigError::InvalidSeating(
            self.players.iter().map(Player::role).collect(),
        ))?;

        self.round = GameRound {
            current: lord,
            phase: Phase::Draw,
            round_count: 0,
        };
        self.status = TableStatus::InProgress;

        info!("game started, {} opens", lord);
        self.emit(GameEvent::GameStarted { lord });
        self.emit(GameEvent::PhaseEntered {
            player: lord,
            phase: Phase::Draw,
        });
        Ok(())
    }

    /// Draw one card for `player`.
    pub fn deal_card(&mut self, player: PlayerId) -> Result<Card, EngineError> {
        match self.status {
            TableStatus::Setup | TableStatus::InProgress => {}
            TableStatus::Finished(_) => return Err(IllegalAction::GameFinished.into()),
            TableStatus::Faulted => return Err(IllegalAction::Faulted.into()),
        }
        let seat = self.seat(player)?;

        self.draw_into(player, 1)?;
        self.players[seat]
            .hand()
            .last()
            .copied()
            .ok_or_else(|| InvariantViolation::DeckExhausted.into())
    }

    /// Move `count` cards from the draw pile to a hand.
    ///
    /// Halts the table if both piles run dry.
    pub(super) fn draw_into(
        &mut self,
        player: PlayerId,
        count: usize,
    ) -> Result<usize, EngineError> {
        let seat = player.index();

        for drawn in 0..count {
            if !self.deck.can_draw() {
                if drawn > 0 {
                    self.emit(GameEvent::CardsDrawn { player, count: drawn });
                }
                return Err(self.fault(InvariantViolation::DeckExhausted));
            }

            if self.deck.draw_count() == 0 {
                let moved = self.deck.reshuffle(&mut self.rng);
                self.emit(GameEvent::DeckReshuffled { cards: moved });
            }

            if let Some(card) = self.deck.draw(&mut self.rng) {
                self.players[seat].take_card(card);
            }
        }

        if count > 0 {
            self.emit(GameEvent::CardsDrawn { player, count });
        }
        Ok(count)
    }

    pub(super) fn fault(&mut self, violation: InvariantViolation) -> EngineError {
        error!("table halted: {}", violation);
        self.status = TableStatus::Faulted;
        violation.into()
    }

    // === Queries ===

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id.index())
    }

    /// The Lord's seat.
    #[must_use]
    pub fn lord(&self) -> Option<PlayerId> {
        self.players.iter().find(|p| p.role() == Role::Lord).map(Player::id)
    }

    #[must_use]
    pub fn round(&self) -> GameRound {
        self.round
    }

    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.round.current
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.round.phase
    }

    #[must_use]
    pub fn round_count(&self) -> u32 {
        self.round.round_count
    }

    #[must_use]
    pub fn status(&self) -> TableStatus {
        self.status
    }

    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// How the game ended, once it has.
    #[must_use]
    pub fn game_end(&self) -> Option<GameEnd> {
        match self.status {
            TableStatus::Finished(end) => Some(end),
            _ => None,
        }
    }

    /// Living players `attacker` may legally Attack.
    #[must_use]
    pub fn legal_targets(&self, attacker: PlayerId) -> Vec<PlayerId> {
        let Some(actor) = self.player(attacker) else {
            return Vec::new();
        };

        self.players
            .iter()
            .filter(|p| {
                p.is_alive() && p.id() != attacker && actor.role().is_legal_target(p.role())
            })
            .map(Player::id)
            .collect()
    }

    /// Check that no card has been created or lost.
    pub fn audit_card_pool(&self) -> Result<(), InvariantViolation> {
        let held: usize = self.players.iter().map(Player::cards_held).sum();
        let actual = self.deck.in_piles() + held;
        let expected = self.deck.pool_size();

        if actual == expected {
            Ok(())
        } else {
            Err(InvariantViolation::CardPoolMismatch { expected, actual })
        }
    }

    /// Read-only view for renderers.
    #[must_use]
    pub fn snapshot(&self) -> TableSnapshot {
        TableSnapshot {
            players: self.players.iter().map(PlayerView::from).collect(),
            current_player: self.round.current,
            phase: self.round.phase,
            round_count: self.round.round_count,
            draw_pile_count: self.deck.draw_count(),
            discard_pile_count: self.deck.discard_count(),
            status: self.status,
        }
    }

    /// RNG position, for reproducing a table.
    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.rng.state()
    }

    // === Events ===

    /// Events emitted since the last drain, oldest first.
    #[must_use]
    pub fn pending_events(&self) -> &[GameEvent] {
        &self.pending
    }

    /// Take the events emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending)
    }

    /// The most recent events of this table, drained or not.
    #[must_use]
    pub fn history(&self) -> &EventLog {
        &self.history
    }

    pub(super) fn emit(&mut self, event: GameEvent) {
        self.history.push(event.clone());
        self.pending.push(event);
    }

    // === Statistics ===

    /// Add this game's winner to the persisted win counts.
    ///
    /// Counts each finished game once; later calls, unfinished games and
    /// stalemates return `Ok(None)` without touching the store.
    pub fn report_outcome(
        &mut self,
        store: &mut dyn StatsStore,
    ) -> Result<Option<Outcome>, StatsError> {
        if self.outcome_reported {
            return Ok(None);
        }
        let Some(outcome) = self.game_end().and_then(GameEnd::outcome) else {
            return Ok(None);
        };

        let mut stats = store.load()?;
        stats.record(outcome);
        store.save(&stats)?;

        self.outcome_reported = true;
        info!("recorded result: {}", outcome);
        Ok(Some(outcome))
    }

    // === Guards ===

    pub(super) fn seat(&self, player: PlayerId) -> Result<usize, IllegalAction> {
        if player.index() < self.players.len() {
            Ok(player.index())
        } else {
            Err(IllegalAction::UnknownPlayer(player))
        }
    }

    fn ensure_setup(&self) -> Result<(), IllegalAction> {
        match self.status {
            TableStatus::Setup => Ok(()),
            TableStatus::InProgress => Err(IllegalAction::AlreadyStarted),
            TableStatus::Finished(_) => Err(IllegalAction::GameFinished),
            TableStatus::Faulted => Err(IllegalAction::Faulted),
        }
    }

    pub(super) fn ensure_running(&self) -> Result<(), IllegalAction> {
        match self.status {
            TableStatus::InProgress => Ok(()),
            TableStatus::Setup => Err(IllegalAction::NotStarted),
            TableStatus::Finished(_) => Err(IllegalAction::GameFinished),
            TableStatus::Faulted => Err(IllegalAction::Faulted),
        }
    }

    /// Reject anything but `player` acting in `phase`.
    pub(super) fn ensure_turn(&self, player: PlayerId, phase: Phase) -> Result<(), IllegalAction> {
        self.ensure_running()?;
        self.seat(player)?;

        if player != self.round.current {
            return Err(IllegalAction::NotYourTurn {
                requested: player,
                actual: self.round.current,
            });
        }
        if !self.players[player.index()].is_alive() {
            return Err(IllegalAction::PlayerDead(player));
        }
        if self.round.phase != phase {
            return Err(IllegalAction::WrongPhase {
                expected: phase,
                actual: self.round.phase,
            });
        }
        Ok(())
    }
}

impl std::fmt::Debug for TurnEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TurnEngine")
            .field("status", &self.status)
            .field("round", &self.round)
            .field("players", &self.players.len())
            .field("draw_pile", &self.deck.draw_count())
            .field("discard_pile", &self.deck.discard_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{MemoryStore, WinStats};

    fn engine() -> TurnEngine {
        TurnEngine::new(EngineConfig::default(), 42).unwrap()
    }

    fn seated(roles: &[Role]) -> TurnEngine {
        let mut engine = engine();
        engine.new_game_with_roles(roles).unwrap();
        engine
    }

    const STANDARD: [Role; 5] = [Role::Lord, Role::Loyal, Role::Loyal, Role::Rebel, Role::Spy];

    #[test]
    fn test_new_engine_is_in_setup() {
        let engine = engine();
        assert_eq!(engine.status(), TableStatus::Setup);
        assert_eq!(engine.players().len(), 5);
        assert_eq!(engine.deck().draw_count(), 24);
        assert!(engine.audit_card_pool().is_ok());
        assert!(matches!(
            engine.pending_events(),
            [GameEvent::TableReset { player_count: 5, .. }]
        ));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = EngineConfig::default().with_player_count(12);
        assert!(matches!(
            TurnEngine::new(config, 1),
            Err(EngineError::Config(ConfigError::UnsupportedPlayerCount(12)))
        ));
    }

    #[test]
    fn test_new_game_with_roles() {
        let engine = seated(&[Role::Spy, Role::Lord, Role::Loyal, Role::Rebel, Role::Loyal]);
        assert_eq!(engine.lord(), Some(PlayerId::new(1)));
        assert_eq!(engine.player(PlayerId::new(1)).unwrap().max_hit_points(), 5);
    }

    #[test]
    fn test_new_game_with_bad_roles() {
        let mut engine = engine();
        let err = engine
            .new_game_with_roles(&[Role::Lord, Role::Lord, Role::Loyal, Role::Rebel, Role::Spy])
            .unwrap_err();
        assert!(matches!(err, EngineError::Config(ConfigError::InvalidSeating(_))));

        let err = engine.new_game_with_roles(&[Role::Lord, Role::Rebel, Role::Spy]).unwrap_err();
        assert!(matches!(err, EngineError::Config(ConfigError::InvalidSeating(_))));
    }

    #[test]
    fn test_character_offer() {
        let mut engine = engine();
        let offer = engine.character_offer();
        assert_eq!(offer.len(), 8);

        engine.select_character(PlayerId::new(0), &offer[0].name).unwrap();
        let offer = engine.character_offer();
        assert!(offer.iter().all(|c| c.name != engine.players()[0].character().unwrap().name));
    }

    #[test]
    fn test_select_character_errors() {
        let mut engine = engine();

        let err = engine.select_character(PlayerId::new(0), "Lu Bu").unwrap_err();
        assert_eq!(err, EngineError::Config(ConfigError::UnknownCharacter("Lu Bu".into())));

        engine.select_character(PlayerId::new(0), "Cao Cao").unwrap();

        let err = engine.select_character(PlayerId::new(0), "Liu Bei").unwrap_err();
        assert_eq!(
            err,
            EngineError::Config(ConfigError::CharacterAlreadyChosen(PlayerId::new(0)))
        );

        let err = engine.select_character(PlayerId::new(1), "Cao Cao").unwrap_err();
        assert_eq!(
            err,
            EngineError::Config(ConfigError::CharacterTaken {
                name: "Cao Cao".into(),
                owner: PlayerId::new(0),
            })
        );

        let err = engine.select_character(PlayerId::new(9), "Liu Bei").unwrap_err();
        assert_eq!(
            err,
            EngineError::Illegal(IllegalAction::UnknownPlayer(PlayerId::new(9)))
        );
    }

    #[test]
    fn test_character_sets_hit_points_with_lord_bonus() {
        let mut engine = seated(&STANDARD);
        engine.select_character(PlayerId::new(0), "Guo Jia").unwrap();
        engine.select_character(PlayerId::new(1), "Sima Yi").unwrap();

        let lord = engine.player(PlayerId::new(0)).unwrap();
        assert_eq!(lord.max_hit_points(), 4);
        assert_eq!(lord.hit_points(), 4);

        let loyal = engine.player(PlayerId::new(1)).unwrap();
        assert_eq!(loyal.max_hit_points(), 3);
    }

    #[test]
    fn test_auto_assign_skips_human() {
        let mut engine = engine();
        engine.auto_assign_characters().unwrap();

        assert!(engine.players()[0].character().is_none());
        assert!(engine.players()[1..].iter().all(|p| p.character().is_some()));

        let mut names: Vec<_> = engine.players()[1..]
            .iter()
            .map(|p| p.character().unwrap().name.clone())
            .collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 4);
    }

    #[test]
    fn test_random_character_for_human() {
        let mut engine = engine();
        let human = PlayerId::new(0);
        engine.auto_assign_characters().unwrap();

        let picked = engine.random_character(human).unwrap();
        assert_eq!(engine.player(human).unwrap().character(), Some(&picked));
        let owners = engine
            .players()
            .iter()
            .filter(|p| p.character().map(|c| &c.name) == Some(&picked.name))
            .count();
        assert_eq!(owners, 1);

        assert_eq!(
            engine.random_character(human),
            Err(EngineError::Config(ConfigError::CharacterAlreadyChosen(human)))
        );
        assert!(engine.start_game().is_ok());
        assert_eq!(
            engine.random_character(human),
            Err(EngineError::Illegal(IllegalAction::AlreadyStarted))
        );
    }

    #[test]
    fn test_start_requires_human_character() {
        let mut engine = engine();
        assert_eq!(
            engine.start_game(),
            Err(EngineError::Config(ConfigError::CharacterNotChosen(PlayerId::new(0))))
        );
        assert_eq!(engine.status(), TableStatus::Setup);
    }

    #[test]
    fn test_start_game() {
        let mut engine = seated(&[Role::Rebel, Role::Loyal, Role::Lord, Role::Spy, Role::Loyal]);
        engine.select_character(PlayerId::new(0), "Zhao Yun").unwrap();
        engine.start_game().unwrap();

        assert_eq!(engine.status(), TableStatus::InProgress);
        assert_eq!(engine.current_player(), PlayerId::new(2));
        assert_eq!(engine.phase(), Phase::Draw);
        assert_eq!(engine.round_count(), 0);
        assert!(engine.players().iter().all(|p| p.hand().len() == 4));
        assert_eq!(engine.deck().draw_count(), 4);
        assert!(engine.audit_card_pool().is_ok());

        assert_eq!(
            engine.start_game(),
            Err(EngineError::Illegal(IllegalAction::AlreadyStarted))
        );
        assert_eq!(
            engine.select_character(PlayerId::new(1), "Liu Bei"),
            Err(EngineError::Illegal(IllegalAction::AlreadyStarted))
        );
    }

    #[test]
    fn test_deal_card() {
        let mut engine = engine();
        let card = engine.deal_card(PlayerId::new(3)).unwrap();
        assert_eq!(engine.players()[3].hand(), &[card]);
        assert_eq!(engine.deck().draw_count(), 23);
    }

    #[test]
    fn test_deck_exhaustion_faults_table() {
        let config = EngineConfig::default()
            .with_deck(crate::cards::DeckComposition::only(crate::cards::CardKind::Dodge, 20));
        let mut engine = TurnEngine::new(config, 3).unwrap();
        engine.select_character(PlayerId::new(0), "Ma Chao").unwrap();
        engine.start_game().unwrap();

        let err = engine.deal_card(PlayerId::new(0)).unwrap_err();
        assert_eq!(err, EngineError::Invariant(InvariantViolation::DeckExhausted));
        assert!(!err.is_recoverable());
        assert_eq!(engine.status(), TableStatus::Faulted);
        assert_eq!(
            engine.deal_card(PlayerId::new(0)),
            Err(EngineError::Illegal(IllegalAction::Faulted))
        );

        engine.new_game().unwrap();
        assert_eq!(engine.status(), TableStatus::Setup);
    }

    #[test]
    fn test_empty_draw_pile_reshuffles_discards() {
        use crate::cards::{CardKind, DeckComposition};

        let config = EngineConfig::default().with_deck(DeckComposition::only(CardKind::Dodge, 22));
        let mut engine = TurnEngine::new(config, 3).unwrap();
        engine.new_game_with_roles(&STANDARD).unwrap();
        let lord = PlayerId::new(0);
        engine.select_character(lord, "Ma Chao").unwrap();
        engine.start_game().unwrap();
        engine.draw_phase(lord).unwrap();
        engine.use_card(lord, CardKind::Dodge, None).unwrap();
        engine.use_card(lord, CardKind::Dodge, None).unwrap();
        assert_eq!(engine.deck().draw_count(), 0);
        engine.drain_events();

        engine.deal_card(PlayerId::new(1)).unwrap();
        assert_eq!(engine.status(), TableStatus::InProgress);
        assert_eq!(engine.deck().discard_count(), 0);
        assert_eq!(engine.deck().draw_count(), 1);
        assert!(engine
            .drain_events()
            .iter()
            .any(|e| matches!(e, GameEvent::DeckReshuffled { cards: 2 })));
        assert!(engine.audit_card_pool().is_ok());
    }

    #[test]
    fn test_legal_targets_follow_matrix() {
        let engine = seated(&STANDARD);
        assert_eq!(
            engine.legal_targets(PlayerId::new(0)),
            vec![PlayerId::new(3), PlayerId::new(4)]
        );
        assert_eq!(
            engine.legal_targets(PlayerId::new(3)),
            vec![PlayerId::new(0), PlayerId::new(1), PlayerId::new(2), PlayerId::new(4)]
        );
        assert_eq!(engine.legal_targets(PlayerId::new(4)).len(), 4);
        assert!(engine.legal_targets(PlayerId::new(7)).is_empty());
    }

    #[test]
    fn test_snapshot() {
        let engine = seated(&STANDARD);
        let snapshot = engine.snapshot();

        assert_eq!(snapshot.players.len(), 5);
        assert_eq!(snapshot.alive_count(), 5);
        assert_eq!(snapshot.cards_accounted(), 24);
        assert_eq!(snapshot.status, TableStatus::Setup);

        let json = serde_json::to_string(&snapshot).unwrap();
        let back: TableSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }

    #[test]
    fn test_drain_events() {
        let mut engine = engine();
        assert!(!engine.drain_events().is_empty());
        assert!(engine.pending_events().is_empty());
        assert!(!engine.history().is_empty());
    }

    #[test]
    fn test_history_is_bounded() {
        let mut config = EngineConfig::default().all_ai();
        config.event_log_capacity = 10;
        let mut engine = TurnEngine::new(config, 42).unwrap();
        engine.start_game().unwrap();

        assert_eq!(engine.history().len(), 10);
        assert!(engine.history().total_recorded() > 10);
        assert_eq!(engine.history().last(), engine.pending_events().last());

        engine.new_game().unwrap();
        assert_eq!(engine.history().len(), 1);
    }

    #[test]
    fn test_report_outcome_requires_finish() {
        let mut engine = engine();
        let mut store = MemoryStore::default();
        assert_eq!(engine.report_outcome(&mut store).unwrap(), None);
        assert_eq!(store.load().unwrap(), WinStats::default());
    }
}
