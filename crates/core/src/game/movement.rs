//! Player step resolution: collision, trail, win and capture.

use super::*;
use crate::types::Direction;

impl World {
    /// Moves the player one tile. Walls, empty space and the grid edge block the
    /// step. Landing on the treasure wins; landing on an enemy loses.
    pub fn move_player(&mut self, direction: Direction) -> Status {
        if self.status != Status::Play {
            return self.status;
        }
        let target = self.player.step(direction);
        if !self.grid.is_walkable(target) {
            return self.status;
        }

        self.grid.set(self.player, TileKind::Trail);
        self.grid.set(target, TileKind::Player);
        self.player = target;
        self.moves += 1;

        if self.enemy_at(target).is_some() {
            self.finish(Status::Lose);
        } else if target == self.treasure {
            self.finish(Status::Win);
        }
        self.status
    }
}
