//! In-place grid cleanup passes. Each pass scans columns left to right and
//! reports whether it changed any tile.

use crate::types::{Pos, TileKind};

use super::grid::{Grid, neighbors4};

const ISOLATED_BLOCK_MAX: usize = 12;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CleanupSummary {
    pub isolated_walls: bool,
    pub single_tile_rooms: bool,
    pub enclosed_floors: bool,
    pub dead_ends: bool,
    pub one_tile_rooms: bool,
}

/// Runs every pass once in order; dead-end pruning repeats to its own fixpoint.
pub fn run_cleanup(grid: &mut Grid) -> CleanupSummary {
    CleanupSummary {
        isolated_walls: prune_isolated_walls(grid),
        single_tile_rooms: open_single_tile_rooms(grid),
        enclosed_floors: fill_enclosed_floors(grid),
        dead_ends: prune_dead_ends(grid),
        one_tile_rooms: eliminate_one_tile_rooms(grid),
    }
}

fn wall_neighbors(grid: &Grid, pos: Pos) -> usize {
    neighbors4(pos).into_iter().filter(|&neighbor| grid.is_wall(neighbor)).count()
}

fn interior_positions(grid: &Grid) -> impl Iterator<Item = Pos> + use<> {
    let (width, height) = (grid.width() as i32, grid.height() as i32);
    (1..width - 1).flat_map(move |x| (1..height - 1).map(move |y| Pos { y, x }))
}

/// Small wall blocks touching neither floor nor empty space become runes.
pub fn prune_isolated_walls(grid: &mut Grid) -> bool {
    let mut visited = vec![false; grid.width() * grid.height()];
    let width = grid.width();
    let index = move |pos: Pos| (pos.y as usize) * width + (pos.x as usize);
    let mut isolated = Vec::new();

    for start in grid.positions() {
        if visited[index(start)] || !grid.is_wall(start) {
            continue;
        }
        let mut block = Vec::new();
        let mut stack = vec![start];
        visited[index(start)] = true;
        while let Some(pos) = stack.pop() {
            block.push(pos);
            for neighbor in neighbors4(pos) {
                if grid.is_wall(neighbor) && !visited[index(neighbor)] {
                    visited[index(neighbor)] = true;
                    stack.push(neighbor);
                }
            }
        }
        let touches_open = block.iter().any(|&pos| {
            neighbors4(pos).into_iter().any(|neighbor| {
                matches!(grid.try_get(neighbor), Some(TileKind::Floor | TileKind::Nothing))
            })
        });
        if block.len() <= ISOLATED_BLOCK_MAX && !touches_open {
            isolated.extend(block);
        }
    }

    for &pos in &isolated {
        grid.set(pos, TileKind::Decoration);
    }
    !isolated.is_empty()
}

/// Opens a wall cell boxed in by walls unless a floor sits on its rising diagonal.
pub fn open_single_tile_rooms(grid: &mut Grid) -> bool {
    let mut changed = false;
    for pos in interior_positions(grid) {
        let removable = grid.is_wall(pos)
            && wall_neighbors(grid, pos) == 4
            && !grid.is_floor(Pos { y: pos.y + 1, x: pos.x + 1 })
            && !grid.is_floor(Pos { y: pos.y - 1, x: pos.x - 1 });
        if removable {
            grid.set(pos, TileKind::Floor);
            changed = true;
        }
    }
    changed
}

pub fn fill_enclosed_floors(grid: &mut Grid) -> bool {
    let mut changed = false;
    for pos in grid.positions() {
        if grid.is_floor(pos) && wall_neighbors(grid, pos) == 4 {
            grid.set(pos, TileKind::Wall);
            changed = true;
        }
    }
    changed
}

/// Repeats full sweeps until no floor with exactly three wall neighbours remains.
pub fn prune_dead_ends(grid: &mut Grid) -> bool {
    let mut changed = false;
    loop {
        let mut swept = false;
        for pos in grid.positions() {
            if grid.is_floor(pos) && wall_neighbors(grid, pos) == 3 {
                grid.set(pos, TileKind::Wall);
                swept = true;
            }
        }
        if !swept {
            return changed;
        }
        changed = true;
    }
}

pub fn eliminate_one_tile_rooms(grid: &mut Grid) -> bool {
    let mut changed = false;
    for pos in interior_positions(grid) {
        if grid.is_floor(pos) && wall_neighbors(grid, pos) == 4 {
            grid.set(pos, TileKind::Wall);
            changed = true;
        }
    }
    changed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&str]) -> Grid {
        Grid::from_glyph_rows(rows).expect("fixture parses")
    }

    #[test]
    fn enclosed_wall_block_turns_into_runes() {
        let mut map = grid(&["\"\"\"\"", "\"##\"", "\"\"\"\""]);
        assert!(prune_isolated_walls(&mut map));
        assert_eq!(map.count(TileKind::Wall), 0);
        assert!(!prune_isolated_walls(&mut map));
    }

    #[test]
    fn wall_block_next_to_floor_or_void_survives() {
        let mut by_floor = grid(&["\"\"\"\"", "\"##.", "\"\"\"\""]);
        assert!(!prune_isolated_walls(&mut by_floor));
        let mut by_void = grid(&["\"\"\"\"", "\"## ", "\"\"\"\""]);
        assert!(!prune_isolated_walls(&mut by_void));
    }

    #[test]
    fn large_wall_block_is_never_isolated() {
        let mut map = grid(&[
            "\"\"\"\"\"\"\"\"",
            "\"######\"",
            "\"######\"",
            "\"######\"",
            "\"\"\"\"\"\"\"\"",
        ]);
        assert!(!prune_isolated_walls(&mut map));
        assert_eq!(map.count(TileKind::Wall), 18);
    }

    #[test]
    fn solid_wall_interior_opens_then_fills_back() {
        let mut map = grid(&["#####", "#####", "#####", "#####"]);
        let before = map.clone();
        assert!(open_single_tile_rooms(&mut map));
        assert_eq!(map.get(Pos { y: 1, x: 1 }), TileKind::Floor);
        assert_eq!(map.get(Pos { y: 2, x: 1 }), TileKind::Wall);
        assert!(fill_enclosed_floors(&mut map));
        assert_eq!(map, before);
    }

    #[test]
    fn dead_end_corridor_collapses_back_to_the_room() {
        let mut map = grid(&[
            "#######",
            "#..####",
            "#.....#",
            "#..####",
            "#######",
        ]);
        assert!(prune_dead_ends(&mut map));
        assert_eq!(map.to_string(), "#######\n#..####\n#..####\n#..####\n#######\n");
        assert!(!prune_dead_ends(&mut map));
    }

    #[test]
    fn lone_floor_cell_is_walled_in() {
        let mut map = grid(&["###", "#.#", "###"]);
        assert!(eliminate_one_tile_rooms(&mut map));
        assert_eq!(map.count(TileKind::Floor), 0);
    }

    #[test]
    fn edge_cells_never_count_out_of_bounds_as_wall() {
        let mut map = grid(&[".##", "###"]);
        assert!(!fill_enclosed_floors(&mut map));
        assert!(!prune_dead_ends(&mut map));
        assert_eq!(map.get(Pos { y: 1, x: 0 }), TileKind::Floor);
    }

    #[test]
    fn full_cleanup_reports_each_pass() {
        let mut map = grid(&[
            "#######",
            "#..####",
            "#.....#",
            "#..####",
            "#######",
        ]);
        let summary = run_cleanup(&mut map);
        assert!(summary.dead_ends);
        assert!(!summary.isolated_walls);
        assert_eq!(map.count(TileKind::Floor), 6);
    }
}
