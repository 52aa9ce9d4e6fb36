//! Read-only table snapshot for renderers.

use serde::{Deserialize, Serialize};

use crate::core::{Phase, Player, PlayerId, Role, TableStatus};

/// What a renderer needs to paint one seat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub id: PlayerId,
    pub role: Role,
    pub character: Option<String>,
    pub hit_points: u32,
    pub max_hit_points: u32,
    pub hand_size: usize,
    pub equipment_size: usize,
    pub alive: bool,
    pub is_ai: bool,
}

impl From<&Player> for PlayerView {
    fn from(player: &Player) -> Self {
        Self {
            id: player.id(),
            role: player.role(),
            character: player.character().map(|c| c.name.clone()),
            hit_points: player.hit_points(),
            max_hit_points: player.max_hit_points(),
            hand_size: player.hand().len(),
            equipment_size: player.equipment().len(),
            alive: player.is_alive(),
            is_ai: player.is_ai(),
        }
    }
}

/// The whole table after an engine call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSnapshot {
    pub players: Vec<PlayerView>,
    pub current_player: PlayerId,
    pub phase: Phase,
    pub round_count: u32,
    pub draw_pile_count: usize,
    pub discard_pile_count: usize,
    pub status: TableStatus,
}

impl TableSnapshot {
    /// Living seats.
    #[must_use]
    pub fn alive_count(&self) -> usize {
        self.players.iter().filter(|p| p.alive).count()
    }

    /// Cards accounted for across piles, hands and equipment.
    #[must_use]
    pub fn cards_accounted(&self) -> usize {
        self.draw_pile_count
            + self.discard_pile_count
            + self
                .players
                .iter()
                .map(|p| p.hand_size + p.equipment_size)
                .sum::<usize>()
    }
}
