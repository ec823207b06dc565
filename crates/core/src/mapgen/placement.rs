//! Distance-constrained placement of the player, treasure and enemies.

use log::{debug, warn};

use crate::config::WorldConfig;
use crate::error::PlacementError;
use crate::rng::RandomStream;
use crate::types::Pos;

use super::grid::Grid;
use super::model::Room;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Placement {
    pub player: Pos,
    pub treasure: Pos,
    pub enemies: Vec<Pos>,
    pub player_room: Option<usize>,
    pub treasure_room: Option<usize>,
    pub issues: Vec<PlacementError>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct PairPlacement {
    player_room: usize,
    treasure_room: usize,
    threshold: u32,
}

pub struct EntityPlacer<'a> {
    grid: &'a Grid,
    rooms: &'a [Room],
    config: &'a WorldConfig,
}

impl<'a> EntityPlacer<'a> {
    pub fn new(grid: &'a Grid, rooms: &'a [Room], config: &'a WorldConfig) -> Self {
        Self { grid, rooms, config }
    }

    /// Never fails outright. Problems are logged and returned in `issues`, and a
    /// failed pair falls back to the first walkable tile and the tile farthest
    /// from it.
    pub fn place(&self, rng: &mut RandomStream) -> Placement {
        let mut issues = Vec::new();
        let (player, treasure, player_room, treasure_room) =
            match self.place_player_and_treasure(rng) {
                Ok(pair) => {
                    debug!(
                        "player room {} and treasure room {} accepted at distance {}",
                        pair.player_room, pair.treasure_room, pair.threshold
                    );
                    (
                        self.rooms[pair.player_room].center(),
                        self.rooms[pair.treasure_room].center(),
                        Some(pair.player_room),
                        Some(pair.treasure_room),
                    )
                }
                Err(error) => {
                    warn!("{error}; falling back to extreme walkable tiles");
                    issues.push(error);
                    let player = self.grid.first_walkable().unwrap_or(Pos { y: 0, x: 0 });
                    let treasure = self.grid.farthest_walkable_from(player).unwrap_or(player);
                    if treasure == player {
                        warn!("player and treasure share the only tile at {player:?}");
                        issues.push(PlacementError::SharedPlayerTreasureTile { pos: player });
                    }
                    (player, treasure, None, None)
                }
            };

        let excluded_rooms: Vec<usize> = player_room.into_iter().chain(treasure_room).collect();
        let (enemies, enemy_issue) = self.place_enemies(rng, player, treasure, &excluded_rooms);
        if let Some(error) = enemy_issue {
            warn!("{error}");
            issues.push(error);
        }

        Placement { player, treasure, enemies, player_room, treasure_room, issues }
    }

    fn place_player_and_treasure(
        &self,
        rng: &mut RandomStream,
    ) -> Result<PairPlacement, PlacementError> {
        let room_count = self.rooms.len();
        if room_count < 2 {
            return Err(PlacementError::NotEnoughRooms { rooms: room_count });
        }
        let mut threshold = self.config.initial_pair_distance;
        while threshold > 0 {
            for _ in 0..self.config.pair_attempts {
                let player_room = rng.uniform_index(room_count);
                let mut treasure_room = rng.uniform_index(room_count);
                while treasure_room == player_room {
                    treasure_room = rng.uniform_index(room_count);
                }
                let (first, second) = (&self.rooms[player_room], &self.rooms[treasure_room]);
                if self.grid.is_walkable(first.center())
                    && self.grid.is_walkable(second.center())
                    && first.center_distance(second) >= threshold
                {
                    return Ok(PairPlacement { player_room, treasure_room, threshold });
                }
            }
            threshold = threshold.saturating_sub(self.config.pair_distance_step.max(1));
        }
        Err(PlacementError::NoPlayerTreasurePair)
    }

    fn place_enemies(
        &self,
        rng: &mut RandomStream,
        player: Pos,
        treasure: Pos,
        excluded_rooms: &[usize],
    ) -> (Vec<Pos>, Option<PlacementError>) {
        let mut enemies = Vec::with_capacity(self.config.enemy_count);
        let mut used_rooms = Vec::new();
        for enemy_index in 0..self.config.enemy_count {
            let found = if self.rooms.is_empty() {
                None
            } else {
                self.find_enemy_slot(rng, player, treasure, excluded_rooms, &used_rooms, &enemies)
            };
            let Some((room_index, pos)) = found else {
                let placed = enemies.len();
                return (enemies, Some(PlacementError::NoEnemyPosition { enemy_index, placed }));
            };
            used_rooms.push(room_index);
            enemies.push(pos);
        }
        (enemies, None)
    }

    fn find_enemy_slot(
        &self,
        rng: &mut RandomStream,
        player: Pos,
        treasure: Pos,
        excluded_rooms: &[usize],
        used_rooms: &[usize],
        enemies: &[Pos],
    ) -> Option<(usize, Pos)> {
        for _ in 0..self.config.enemy_room_attempts {
            let room_index = rng.uniform_index(self.rooms.len());
            if excluded_rooms.contains(&room_index) || used_rooms.contains(&room_index) {
                continue;
            }
            if let Some(pos) = self.sample_room_point(rng, room_index, player, treasure, enemies) {
                return Some((room_index, pos));
            }
        }
        None
    }

    fn sample_room_point(
        &self,
        rng: &mut RandomStream,
        room_index: usize,
        player: Pos,
        treasure: Pos,
        enemies: &[Pos],
    ) -> Option<Pos> {
        let room = self.rooms[room_index];
        if room.width < 3 || room.height < 3 {
            return None;
        }
        for _ in 0..self.config.enemy_point_attempts {
            let x = rng.uniform_range(room.x + 1, room.x + room.width - 1);
            let y = rng.uniform_range(room.y + 1, room.y + room.height - 1);
            let pos = Pos { y, x };
            let valid = self.grid.is_walkable(pos)
                && pos.manhattan(player) >= self.config.min_enemy_distance
                && pos != player
                && pos != treasure
                && !enemies.contains(&pos);
            if valid {
                return Some(pos);
            }
        }
        None
    }
}
