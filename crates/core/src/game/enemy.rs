//! Enemy turns: greedy pursuit with a random-walk fallback.

use super::*;
use crate::config::EnemyBehavior;
use crate::mapgen::neighbors4;

impl World {
    /// Advances every enemy once, in creation order, then checks for capture.
    pub fn tick_enemies(&mut self) -> Status {
        if self.status != Status::Play {
            return self.status;
        }
        self.tick += 1;
        let ids: Vec<EnemyId> = self.enemies.keys().collect();
        for id in ids {
            self.take_enemy_turn(id);
        }
        if self.is_player_captured() {
            self.finish(Status::Lose);
        }
        self.status
    }

    pub fn is_player_captured(&self) -> bool {
        self.enemies.values().any(|enemy| enemy.pos == self.player)
    }

    fn take_enemy_turn(&mut self, id: EnemyId) {
        let enemy = self.enemies[id];
        if enemy.cooldown > 0 {
            self.enemies[id].cooldown -= 1;
            return;
        }
        let behavior = self.config.enemy_behavior;
        let next = match behavior {
            EnemyBehavior::Pursue => {
                self.pursuit_step(id, enemy.pos).or_else(|| self.wander_step(id, enemy.pos))
            }
            EnemyBehavior::Wander => self.wander_step(id, enemy.pos),
        };
        if let Some(next) = next {
            self.relocate_enemy(id, next);
            self.enemies[id].cooldown = self.config.enemy_cooldown_ticks;
        }
    }

    /// Walkable neighbours, in `+x, +y, -x, -y` order, not held by another enemy.
    fn open_neighbors(&self, id: EnemyId, pos: Pos) -> Vec<Pos> {
        neighbors4(pos)
            .into_iter()
            .filter(|&neighbor| self.grid.is_walkable(neighbor))
            .filter(|&neighbor| self.enemy_at(neighbor).is_none_or(|other| other == id))
            .collect()
    }

    fn pursuit_step(&self, id: EnemyId, pos: Pos) -> Option<Pos> {
        let mut best = pos;
        let mut best_distance = pos.manhattan(self.player);
        for neighbor in self.open_neighbors(id, pos) {
            let distance = neighbor.manhattan(self.player);
            if distance < best_distance {
                best = neighbor;
                best_distance = distance;
            }
        }
        (best != pos).then_some(best)
    }

    fn wander_step(&mut self, id: EnemyId, pos: Pos) -> Option<Pos> {
        let options = self.open_neighbors(id, pos);
        if options.is_empty() {
            return None;
        }
        Some(options[self.rng.uniform_index(options.len())])
    }

    fn relocate_enemy(&mut self, id: EnemyId, next: Pos) {
        let previous = self.enemies[id].pos;
        let uncovered =
            if previous == self.treasure { TileKind::Treasure } else { TileKind::Trail };
        self.grid.set(previous, uncovered);
        self.grid.set(next, TileKind::Enemy);
        self.enemies[id].pos = next;
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{chase_fixture, world_from_rows};
    use super::*;

    fn wandering() -> WorldConfig {
        WorldConfig { enemy_behavior: EnemyBehavior::Wander, ..WorldConfig::default() }
    }

    #[test]
    fn pursuer_takes_the_first_strictly_closer_step() {
        let mut world = chase_fixture(&WorldConfig::default());
        assert_eq!(world.tick_enemies(), Status::Play);
        assert_eq!(world.enemy_positions(), vec![Pos { y: 3, x: 7 }]);
        assert_eq!(world.grid().get(Pos { y: 2, x: 7 }), TileKind::Trail);
        assert_eq!(world.grid().get(Pos { y: 3, x: 7 }), TileKind::Enemy);
    }

    #[test]
    fn pursuer_corners_a_still_player() {
        let mut world = chase_fixture(&WorldConfig::default());
        for _ in 0..7 {
            assert_eq!(world.tick_enemies(), Status::Play);
        }
        assert_eq!(world.tick_enemies(), Status::Lose);
        assert!(world.is_player_captured());
        assert_eq!(world.tick(), 8);

        assert_eq!(world.tick_enemies(), Status::Lose);
        assert_eq!(world.tick(), 8);
    }

    #[test]
    fn cooldown_skips_turns_between_moves() {
        let config = WorldConfig { enemy_cooldown_ticks: 2, ..WorldConfig::default() };
        let mut world = chase_fixture(&config);
        let start = world.enemy_positions();

        world.tick_enemies();
        let first_step = world.enemy_positions();
        assert_ne!(first_step, start);
        world.tick_enemies();
        world.tick_enemies();
        assert_eq!(world.enemy_positions(), first_step);
        world.tick_enemies();
        assert_ne!(world.enemy_positions(), first_step);
    }

    #[test]
    fn enemy_with_no_closer_step_wanders_away() {
        let mut world =
            world_from_rows(&["######", "#@#E.#", "######", "#$####"], &WorldConfig::default());
        world.tick_enemies();
        assert_eq!(world.enemy_positions(), vec![Pos { y: 2, x: 4 }]);
    }

    #[test]
    fn boxed_in_enemy_stays_put() {
        let mut world =
            world_from_rows(&["#####", "#@#E#", "#####", "#$###"], &WorldConfig::default());
        world.tick_enemies();
        assert_eq!(world.enemy_positions(), vec![Pos { y: 2, x: 3 }]);
        assert_eq!(world.grid().get(Pos { y: 2, x: 3 }), TileKind::Enemy);
    }

    #[test]
    fn enemies_never_share_a_tile() {
        let config = wandering();
        let mut world = world_from_rows(
            &["########", "#@#....#", "###EE..#", "#$#....#", "########"],
            &config,
        );
        for _ in 0..50 {
            world.tick_enemies();
            let positions = world.enemy_positions();
            assert_ne!(positions[0], positions[1]);
            for pos in positions {
                assert_eq!(world.grid().get(pos), TileKind::Enemy);
            }
        }
    }

    #[test]
    fn leaving_the_treasure_restores_its_marker() {
        let config = wandering();
        let mut world = world_from_rows(&["####", "#@##", "####", "#$.#", "####"], &config);
        let treasure = world.treasure();
        world.enemies.insert(Enemy { pos: treasure, cooldown: 0 });
        world.grid.set(treasure, TileKind::Enemy);

        world.tick_enemies();
        assert_eq!(world.enemy_positions(), vec![Pos { y: 1, x: 2 }]);
        assert_eq!(world.grid().get(world.treasure()), TileKind::Treasure);
    }
}
