//! Owned tile grid with bounds-checked access and x-major traversal.

use std::fmt;

use crate::types::{Pos, TileKind};

/// Orthogonal neighbours in `+x, +y, -x, -y` order.
pub fn neighbors4(pos: Pos) -> [Pos; 4] {
    [
        Pos { y: pos.y, x: pos.x + 1 },
        Pos { y: pos.y + 1, x: pos.x },
        Pos { y: pos.y, x: pos.x - 1 },
        Pos { y: pos.y - 1, x: pos.x },
    ]
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Grid {
    width: usize,
    height: usize,
    tiles: Vec<TileKind>,
}

impl Grid {
    pub fn filled(width: usize, height: usize, tile: TileKind) -> Self {
        Self { width, height, tiles: vec![tile; width * height] }
    }

    /// Parses glyph rows listed top row first. Returns `None` on ragged rows or
    /// unknown glyphs.
    pub fn from_glyph_rows(rows: &[&str]) -> Option<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.chars().count());
        let mut grid = Self::filled(width, height, TileKind::Nothing);
        for (row_index, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                return None;
            }
            let y = (height - 1 - row_index) as i32;
            for (x, glyph) in row.chars().enumerate() {
                let tile = TileKind::ALL.into_iter().find(|tile| tile.glyph() == glyph)?;
                grid.set(Pos { y, x: x as i32 }, tile);
            }
        }
        Some(grid)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn contains(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    fn index(&self, pos: Pos) -> usize {
        assert!(
            self.contains(pos),
            "grid access out of bounds at ({}, {}) on a {}x{} grid",
            pos.x,
            pos.y,
            self.width,
            self.height
        );
        (pos.y as usize) * self.width + (pos.x as usize)
    }

    /// Panics when `pos` lies outside the grid.
    pub fn get(&self, pos: Pos) -> TileKind {
        self.tiles[self.index(pos)]
    }

    /// Panics when `pos` lies outside the grid.
    pub fn set(&mut self, pos: Pos, tile: TileKind) {
        let index = self.index(pos);
        self.tiles[index] = tile;
    }

    pub fn try_get(&self, pos: Pos) -> Option<TileKind> {
        self.contains(pos).then(|| self.tiles[(pos.y as usize) * self.width + (pos.x as usize)])
    }

    pub fn is_wall(&self, pos: Pos) -> bool {
        self.try_get(pos) == Some(TileKind::Wall)
    }

    pub fn is_floor(&self, pos: Pos) -> bool {
        self.try_get(pos) == Some(TileKind::Floor)
    }

    pub fn is_walkable(&self, pos: Pos) -> bool {
        self.try_get(pos).is_some_and(TileKind::is_walkable)
    }

    /// Every position, column by column from `x = 0`, bottom to top.
    pub fn positions(&self) -> impl Iterator<Item = Pos> + use<> {
        let (width, height) = (self.width as i32, self.height as i32);
        (0..width).flat_map(move |x| (0..height).map(move |y| Pos { y, x }))
    }

    pub fn count(&self, tile: TileKind) -> usize {
        self.tiles.iter().filter(|&&candidate| candidate == tile).count()
    }

    pub fn tiles(&self) -> &[TileKind] {
        &self.tiles
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(8 + self.tiles.len());
        bytes.extend((self.width as u32).to_le_bytes());
        bytes.extend((self.height as u32).to_le_bytes());
        bytes.extend(self.tiles.iter().map(|tile| tile.code()));
        bytes
    }

    /// Walkable tile farthest from `origin` by Manhattan distance; ties keep the
    /// first found in x-major order.
    pub fn farthest_walkable_from(&self, origin: Pos) -> Option<Pos> {
        let mut best: Option<(u32, Pos)> = None;
        for pos in self.positions().filter(|&pos| self.is_walkable(pos)) {
            let distance = origin.manhattan(pos);
            if best.is_none_or(|(best_distance, _)| distance > best_distance) {
                best = Some((distance, pos));
            }
        }
        best.map(|(_, pos)| pos)
    }

    pub fn first_walkable(&self) -> Option<Pos> {
        self.positions().find(|&pos| self.is_walkable(pos))
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in (0..self.height).rev() {
            let row: String = self.tiles[y * self.width..(y + 1) * self.width]
                .iter()
                .map(|tile| tile.glyph())
                .collect();
            writeln!(f, "{row}")?;
        }
        Ok(())
    }
}
