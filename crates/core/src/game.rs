//! Live dungeon state: the generated grid plus player, treasure and enemies.

mod enemy;
mod hash;
mod movement;
#[cfg(test)]
mod test_support;

use log::{debug, info};
use slotmap::SlotMap;

use crate::config::WorldConfig;
use crate::error::{ConfigError, PlacementError};
use crate::mapgen::{self, EntityPlacer, Grid, Layout, PartitionTree};
use crate::rng::RandomStream;
use crate::types::{Enemy, EnemyId, Pos, Status, TileKind};

#[derive(Clone, Debug)]
pub struct World {
    seed: u64,
    config: WorldConfig,
    grid: Grid,
    layout: Layout,
    player: Pos,
    treasure: Pos,
    enemies: SlotMap<EnemyId, Enemy>,
    rng: RandomStream,
    status: Status,
    tick: u64,
    moves: u64,
    issues: Vec<PlacementError>,
}

/// Generates a world with default tuning for the given dimensions.
pub fn generate(seed: u64, width: i32, height: i32) -> Result<World, ConfigError> {
    World::generate(seed, &WorldConfig::with_dimensions(width, height))
}

impl World {
    /// Draw order: leaf count, partition splits, rooms, decoration, placement.
    pub fn generate(seed: u64, config: &WorldConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = RandomStream::from_seed(seed);

        let leaf_span = (config.max_leaves - config.min_leaves + 1) as i32;
        let target_leaves = (rng.uniform_below(leaf_span) as u32 + config.min_leaves) as usize;
        let layout =
            PartitionTree::build(config.width, config.grid_height(), target_leaves, &mut rng)
                .layout();

        let grid = mapgen::synthesize(
            config.width as usize,
            config.grid_height() as usize,
            &layout,
            config.decoration_rate,
            &mut rng,
        );
        let placement = EntityPlacer::new(&grid, &layout.rooms, config).place(&mut rng);

        debug!(
            "seed {seed}: {} leaves (target {target_leaves}), {} rooms, {} enemies, {} draws",
            layout.leaf_count,
            layout.rooms.len(),
            placement.enemies.len(),
            rng.draws()
        );

        let mut world = Self::from_grid(
            seed,
            config,
            grid,
            placement.player,
            placement.treasure,
            &placement.enemies,
        );
        world.layout = layout;
        world.rng = rng;
        world.issues = placement.issues;
        Ok(world)
    }

    /// Assembles a world in `Play` from a prepared grid, stamping the entity
    /// markers. Later random draws come from a stream seeded with `seed`.
    pub fn from_grid(
        seed: u64,
        config: &WorldConfig,
        mut grid: Grid,
        player: Pos,
        treasure: Pos,
        enemy_positions: &[Pos],
    ) -> Self {
        grid.set(treasure, TileKind::Treasure);
        grid.set(player, TileKind::Player);
        let mut enemies = SlotMap::with_key();
        for &pos in enemy_positions {
            grid.set(pos, TileKind::Enemy);
            enemies.insert(Enemy { pos, cooldown: 0 });
        }
        Self {
            seed,
            config: config.clone(),
            grid,
            layout: Layout::default(),
            player,
            treasure,
            enemies,
            rng: RandomStream::from_seed(seed),
            status: Status::Play,
            tick: 0,
            moves: 0,
            issues: Vec::new(),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn player(&self) -> Pos {
        self.player
    }

    pub fn treasure(&self) -> Pos {
        self.treasure
    }

    /// Enemies in creation order.
    pub fn enemies(&self) -> impl Iterator<Item = (EnemyId, &Enemy)> {
        self.enemies.iter()
    }

    pub fn enemy_positions(&self) -> Vec<Pos> {
        self.enemies.values().map(|enemy| enemy.pos).collect()
    }

    pub fn enemy_at(&self, pos: Pos) -> Option<EnemyId> {
        self.enemies.iter().find(|(_, enemy)| enemy.pos == pos).map(|(id, _)| id)
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Enemy ticks taken so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Successful player steps so far.
    pub fn moves(&self) -> u64 {
        self.moves
    }

    pub fn issues(&self) -> &[PlacementError] {
        &self.issues
    }

    fn finish(&mut self, status: Status) {
        if self.status != status {
            info!(
                "seed {}: {status:?} after {} moves and {} ticks",
                self.seed, self.moves, self.tick
            );
        }
        self.status = status;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_helper_matches_default_config_generation() {
        let from_helper = generate(42, 60, 43).expect("default dimensions are valid");
        let from_config =
            World::generate(42, &WorldConfig::default()).expect("default config is valid");
        assert_eq!(from_helper.grid(), from_config.grid());
        assert_eq!(from_helper.player(), from_config.player());
        assert_eq!(from_helper.enemy_positions(), from_config.enemy_positions());
    }

    #[test]
    fn generated_grid_reserves_hud_rows() {
        let world = generate(7, 60, 43).expect("default dimensions are valid");
        assert_eq!((world.grid().width(), world.grid().height()), (60, 40));
        assert_eq!(world.status(), Status::Play);
    }

    #[test]
    fn invalid_dimensions_are_rejected_before_generation() {
        assert!(matches!(generate(1, 60, 2), Err(ConfigError::NoGridRows { .. })));
        assert!(matches!(generate(1, -4, 43), Err(ConfigError::NonPositiveWidth { width: -4 })));
    }

    #[test]
    fn markers_sit_on_their_entities() {
        let world = generate(99, 60, 43).expect("default dimensions are valid");
        assert_eq!(world.grid().get(world.player()), TileKind::Player);
        assert_eq!(world.grid().get(world.treasure()), TileKind::Treasure);
        for pos in world.enemy_positions() {
            assert_eq!(world.grid().get(pos), TileKind::Enemy);
        }
    }
}
