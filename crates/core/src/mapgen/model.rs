//! Rectangles produced by partitioning: regions, rooms and corridor segments.

use crate::types::Pos;

/// Area owned by one partition node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Region {
    pub fn contains_room(&self, room: &Room) -> bool {
        room.x >= self.x
            && room.y >= self.y
            && room.x + room.width <= self.x + self.width
            && room.y + room.height <= self.y + self.height
    }
}

/// A carved room or corridor segment. Corridors have a width or height of one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Room {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Room {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    pub fn center(&self) -> Pos {
        Pos { y: self.y + self.height / 2, x: self.x + self.width / 2 }
    }

    pub fn is_corridor(&self) -> bool {
        self.width == 1 || self.height == 1
    }

    pub fn contains(&self, pos: Pos) -> bool {
        pos.x >= self.x
            && pos.y >= self.y
            && pos.x < self.x + self.width
            && pos.y < self.y + self.height
    }

    pub fn intersects(&self, other: &Room) -> bool {
        self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }

    /// True when the rooms share an edge without overlapping.
    pub fn is_adjacent(&self, other: &Room) -> bool {
        let touches_x = self.x + self.width == other.x || other.x + other.width == self.x;
        let touches_y = self.y + self.height == other.y || other.y + other.height == self.y;
        let overlaps_x = self.x < other.x + other.width && other.x < self.x + self.width;
        let overlaps_y = self.y < other.y + other.height && other.y < self.y + self.height;
        (touches_x && overlaps_y) || (touches_y && overlaps_x)
    }

    pub fn center_distance(&self, other: &Room) -> u32 {
        self.center().manhattan(other.center())
    }
}

/// Output of partitioning, in generation order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Layout {
    pub rooms: Vec<Room>,
    pub corridors: Vec<Room>,
    pub leaf_count: usize,
}
