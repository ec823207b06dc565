//! Shared fixtures for the `game` submodule tests.

use super::*;

/// Builds a world from glyph rows (top row first). `@`, `$` and `E` mark the
/// player, treasure and enemies; their cells become floor underneath.
pub(super) fn world_from_rows(rows: &[&str], config: &WorldConfig) -> World {
    let mut grid = Grid::from_glyph_rows(rows).expect("fixture rows should parse");
    let mut player = None;
    let mut treasure = None;
    let mut enemies = Vec::new();
    for pos in grid.positions() {
        match grid.get(pos) {
            TileKind::Player => player = Some(pos),
            TileKind::Treasure => treasure = Some(pos),
            TileKind::Enemy => enemies.push(pos),
            _ => continue,
        }
        grid.set(pos, TileKind::Floor);
    }
    let player = player.expect("fixture needs a player");
    let treasure = treasure.expect("fixture needs a treasure");
    World::from_grid(0, config, grid, player, treasure, &enemies)
}

pub(super) fn corridor_fixture() -> World {
    world_from_rows(
        &[
            "##########",
            "#@......$#",
            "##########",
        ],
        &WorldConfig::default(),
    )
}

pub(super) fn chase_fixture(config: &WorldConfig) -> World {
    world_from_rows(
        &[
            "#########",
            "#@......#",
            "#.#####.#",
            "#......E#",
            "#########",
            "#$#######",
        ],
        config,
    )
}
