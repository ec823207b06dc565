//! Rasterizes rooms and corridors onto a blank grid.

use crate::rng::RandomStream;
use crate::types::{Pos, TileKind};

use super::grid::{Grid, neighbors4};
use super::model::{Layout, Room};

/// Blank grid with an optional rune scatter. A non-positive rate draws nothing.
pub fn blank_grid(
    width: usize,
    height: usize,
    decoration_rate: f64,
    rng: &mut RandomStream,
) -> Grid {
    let mut grid = Grid::filled(width, height, TileKind::Nothing);
    if decoration_rate > 0.0 {
        for pos in grid.positions() {
            if rng.uniform_unit() < decoration_rate {
                grid.set(pos, TileKind::Decoration);
            }
        }
    }
    grid
}

/// Stamps rooms first, then corridors in generation order.
pub fn stamp_layout(grid: &mut Grid, layout: &Layout) {
    for room in layout.rooms.iter().chain(&layout.corridors) {
        stamp_room(grid, room);
    }
}

pub fn stamp_room(grid: &mut Grid, room: &Room) {
    if room.width <= 0 || room.height <= 0 {
        return;
    }
    if room.is_corridor() {
        stamp_corridor(grid, room);
        return;
    }
    let right = room.x + room.width - 1;
    let top = room.y + room.height - 1;
    for x in room.x..=right {
        for y in room.y..=top {
            let on_border = x == room.x || x == right || y == room.y || y == top;
            let tile = if on_border { TileKind::Wall } else { TileKind::Floor };
            write_tile(grid, Pos { y, x }, tile);
        }
    }
}

fn stamp_corridor(grid: &mut Grid, strip: &Room) {
    for x in strip.x..strip.x + strip.width {
        for y in strip.y..strip.y + strip.height {
            let pos = Pos { y, x };
            if !grid.contains(pos) {
                continue;
            }
            grid.set(pos, TileKind::Floor);
            for neighbor in neighbors4(pos) {
                if grid.contains(neighbor) && !grid.is_floor(neighbor) {
                    grid.set(neighbor, TileKind::Wall);
                }
            }
        }
    }
}

/// Wall writes never cover floor; everything else overwrites.
fn write_tile(grid: &mut Grid, pos: Pos, tile: TileKind) {
    if !grid.contains(pos) {
        return;
    }
    if tile == TileKind::Wall && grid.is_floor(pos) {
        return;
    }
    grid.set(pos, tile);
}
