//! Error types surfaced by world generation, placement and journal handling.

use thiserror::Error;

use crate::types::Pos;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("world width must be positive, got {width}")]
    NonPositiveWidth { width: i32 },
    #[error("height {height} leaves no grid rows after reserving {hud_rows} HUD rows")]
    NoGridRows { height: i32, hud_rows: i32 },
    #[error("leaf range {min}..={max} is empty or starts at zero")]
    InvalidLeafRange { min: u32, max: u32 },
    #[error("decoration rate {rate} is outside 0.0..=1.0")]
    InvalidDecorationRate { rate: f64 },
}

/// Soft failures recorded while placing the player, treasure and enemies.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("need at least two rooms to separate player and treasure, found {rooms}")]
    NotEnoughRooms { rooms: usize },
    #[error("no room pair satisfied any player/treasure distance threshold")]
    NoPlayerTreasurePair,
    #[error("player and treasure share the only walkable tile at {pos:?}")]
    SharedPlayerTreasureTile { pos: Pos },
    #[error("no valid position for enemy {enemy_index} after placing {placed}")]
    NoEnemyPosition { enemy_index: usize, placed: usize },
}

#[derive(Debug, Error)]
pub enum JournalError {
    #[error("malformed journal: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported journal format version {found}, expected {expected}")]
    UnsupportedVersion { found: u16, expected: u16 },
}
