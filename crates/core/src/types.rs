use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    pub struct EnemyId;
}

/// Grid coordinate. `y` grows upward, row 0 is the bottom of the map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub fn step(self, direction: Direction) -> Pos {
        let (dx, dy) = direction.delta();
        Pos { y: self.y + dy, x: self.x + dx }
    }

    pub fn manhattan(self, other: Pos) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TileKind {
    Wall,
    Floor,
    Nothing,
    Player,
    Treasure,
    Enemy,
    Trail,
    Decoration,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileInfo {
    pub glyph: char,
    pub description: &'static str,
    pub walkable: bool,
}

const TILE_CATALOG: [TileInfo; 8] = [
    TileInfo { glyph: '#', description: "wall", walkable: false },
    TileInfo { glyph: '.', description: "floor", walkable: true },
    TileInfo { glyph: ' ', description: "nothing", walkable: false },
    TileInfo { glyph: '@', description: "player", walkable: true },
    TileInfo { glyph: '$', description: "treasure", walkable: true },
    TileInfo { glyph: 'E', description: "enemy", walkable: true },
    TileInfo { glyph: ',', description: "trail", walkable: true },
    TileInfo { glyph: '"', description: "rune", walkable: true },
];

impl TileKind {
    pub const ALL: [TileKind; 8] = [
        TileKind::Wall,
        TileKind::Floor,
        TileKind::Nothing,
        TileKind::Player,
        TileKind::Treasure,
        TileKind::Enemy,
        TileKind::Trail,
        TileKind::Decoration,
    ];

    pub fn info(self) -> &'static TileInfo {
        &TILE_CATALOG[self as usize]
    }

    pub fn is_walkable(self) -> bool {
        self.info().walkable
    }

    pub fn glyph(self) -> char {
        self.info().glyph
    }

    pub fn code(self) -> u8 {
        self as u8
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, 1),
            Direction::East => (1, 0),
            Direction::South => (0, -1),
            Direction::West => (-1, 0),
        }
    }

    /// Maps the W/A/S/D movement keys, case-insensitively.
    pub fn from_key(key: char) -> Option<Direction> {
        match key.to_ascii_uppercase() {
            'W' => Some(Direction::North),
            'D' => Some(Direction::East),
            'S' => Some(Direction::South),
            'A' => Some(Direction::West),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Start,
    SeedEntry,
    Play,
    Win,
    Lose,
}

impl Status {
    pub fn is_terminal(self) -> bool {
        matches!(self, Status::Win | Status::Lose)
    }

    pub fn code(self) -> u8 {
        match self {
            Status::Start => 0,
            Status::SeedEntry => 1,
            Status::Play => 2,
            Status::Win => 3,
            Status::Lose => 4,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Enemy {
    pub pos: Pos,
    pub cooldown: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_rows_line_up_with_tile_variants() {
        let descriptions: Vec<&str> =
            TileKind::ALL.iter().map(|tile| tile.info().description).collect();
        assert_eq!(
            descriptions,
            vec!["wall", "floor", "nothing", "player", "treasure", "enemy", "trail", "rune"]
        );
    }

    #[test]
    fn only_wall_and_nothing_block_movement() {
        let blocked: Vec<TileKind> =
            TileKind::ALL.into_iter().filter(|tile| !tile.is_walkable()).collect();
        assert_eq!(blocked, vec![TileKind::Wall, TileKind::Nothing]);
    }

    #[test]
    fn north_points_up_the_y_axis() {
        let origin = Pos { y: 4, x: 4 };
        assert_eq!(origin.step(Direction::North), Pos { y: 5, x: 4 });
        assert_eq!(origin.step(Direction::South), Pos { y: 3, x: 4 });
        assert_eq!(origin.step(Direction::East), Pos { y: 4, x: 5 });
        assert_eq!(origin.step(Direction::West), Pos { y: 4, x: 3 });
    }

    #[test]
    fn movement_keys_ignore_case() {
        assert_eq!(Direction::from_key('w'), Some(Direction::North));
        assert_eq!(Direction::from_key('A'), Some(Direction::West));
        assert_eq!(Direction::from_key('x'), None);
    }
}
