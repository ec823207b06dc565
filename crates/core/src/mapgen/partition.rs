//! Breadth-first binary space partitioning, room carving and corridor planning.

use std::collections::VecDeque;

use crate::rng::RandomStream;

use super::model::{Layout, Region, Room};

pub const ROOM_SPLIT_MIN: i32 = 6;
pub const ROOM_SIZE_MIN: i32 = 4;

const ROOM_SKIP_THRESHOLD: f64 = 0.8;

/// Horizontal splits cut the x extent, placing children side by side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SplitAxis {
    Horizontal,
    Vertical,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PartitionNode {
    pub region: Region,
    pub split: Option<SplitAxis>,
    pub room: Option<Room>,
    children: Option<Box<(PartitionNode, PartitionNode)>>,
}

impl PartitionNode {
    pub fn children(&self) -> Option<(&PartitionNode, &PartitionNode)> {
        self.children.as_deref().map(|(left, right)| (left, right))
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    pub fn leaf_count(&self) -> usize {
        match self.children() {
            Some((left, right)) => left.leaf_count() + right.leaf_count(),
            None => 1,
        }
    }

    /// Carved rooms beneath this node, left subtree first.
    pub fn rooms(&self) -> Vec<Room> {
        let mut rooms = Vec::new();
        self.collect_rooms(&mut rooms);
        rooms
    }

    fn collect_rooms(&self, rooms: &mut Vec<Room>) {
        if let Some(room) = self.room {
            rooms.push(room);
        }
        if let Some((left, right)) = self.children() {
            left.collect_rooms(rooms);
            right.collect_rooms(rooms);
        }
    }
}

// Nodes are grown breadth-first in a flat list, then folded into the owned tree.
struct DraftNode {
    region: Region,
    split: Option<SplitAxis>,
    children: Option<(usize, usize)>,
}

pub struct PartitionTree {
    root: PartitionNode,
}

impl PartitionTree {
    /// Splits, carves rooms, then plans corridors. Draw order: splits, rooms.
    pub fn build(width: i32, height: i32, target_leaves: usize, rng: &mut RandomStream) -> Self {
        let root = Region { x: 0, y: 0, width, height };
        let mut drafts = vec![DraftNode { region: root, split: None, children: None }];
        let mut queue = VecDeque::from([0_usize]);
        let mut remaining_splits = target_leaves.saturating_sub(1);

        while remaining_splits > 0 {
            let Some(index) = queue.pop_front() else {
                break;
            };
            let Some((axis, left, right)) = split_region(drafts[index].region, rng) else {
                continue;
            };
            let left_index = drafts.len();
            drafts.push(DraftNode { region: left, split: None, children: None });
            drafts.push(DraftNode { region: right, split: None, children: None });
            drafts[index].split = Some(axis);
            drafts[index].children = Some((left_index, left_index + 1));
            queue.push_back(left_index);
            queue.push_back(left_index + 1);
            remaining_splits -= 1;
        }

        let mut root = assemble(&drafts, 0);
        carve_rooms(&mut root, rng);
        Self { root }
    }

    pub fn root(&self) -> &PartitionNode {
        &self.root
    }

    pub fn layout(&self) -> Layout {
        let mut corridors = Vec::new();
        sibling_corridors(&self.root, &mut corridors);
        all_pairs_corridors(&self.root, &mut corridors);
        Layout { rooms: self.root.rooms(), corridors, leaf_count: self.root.leaf_count() }
    }
}

fn split_region(region: Region, rng: &mut RandomStream) -> Option<(SplitAxis, Region, Region)> {
    let splittable = ROOM_SPLIT_MIN * 2;
    if region.width < splittable && region.height < splittable {
        return None;
    }
    let mut axis =
        if rng.uniform_unit() < 0.5 { SplitAxis::Horizontal } else { SplitAxis::Vertical };
    let mut length = axis_length(region, axis);
    if length < splittable {
        axis = match axis {
            SplitAxis::Horizontal => SplitAxis::Vertical,
            SplitAxis::Vertical => SplitAxis::Horizontal,
        };
        length = axis_length(region, axis);
    }
    let split = rng.uniform_below(length - splittable + 1) + ROOM_SPLIT_MIN;
    let Region { x, y, width, height } = region;
    let children = match axis {
        SplitAxis::Horizontal => (
            Region { x, y, width: split, height },
            Region { x: x + split - 1, y, width: width - split, height },
        ),
        SplitAxis::Vertical => (
            Region { x, y, width, height: split },
            Region { x, y: y + split - 1, width, height: height - split },
        ),
    };
    Some((axis, children.0, children.1))
}

fn axis_length(region: Region, axis: SplitAxis) -> i32 {
    match axis {
        SplitAxis::Horizontal => region.width,
        SplitAxis::Vertical => region.height,
    }
}

fn assemble(drafts: &[DraftNode], index: usize) -> PartitionNode {
    let draft = &drafts[index];
    let children = draft
        .children
        .map(|(left, right)| Box::new((assemble(drafts, left), assemble(drafts, right))));
    PartitionNode { region: draft.region, split: draft.split, room: None, children }
}

fn carve_rooms(node: &mut PartitionNode, rng: &mut RandomStream) {
    match node.children.as_deref_mut() {
        Some((left, right)) => {
            carve_rooms(left, rng);
            carve_rooms(right, rng);
        }
        None => node.room = carve_room(node.region, rng),
    }
}

fn carve_room(region: Region, rng: &mut RandomStream) -> Option<Room> {
    if region.width < ROOM_SIZE_MIN || region.height < ROOM_SIZE_MIN {
        return None;
    }
    if rng.uniform_unit() > ROOM_SKIP_THRESHOLD {
        return None;
    }
    let min_width = ROOM_SIZE_MIN.max(region.width / 2 + 2);
    let min_height = ROOM_SIZE_MIN.max(region.height / 2 + 2);
    let width = rng.uniform_below(region.width - min_width + 1) + min_width;
    let height = rng.uniform_below(region.height - min_height + 1) + min_height;
    let mut x = region.x;
    let mut y = region.y;
    if region.width > width {
        x += rng.uniform_below(region.width - width);
    }
    if region.height > height {
        y += rng.uniform_below(region.height - height);
    }
    Some(Room::new(x, y, width, height))
}

fn sibling_corridors(node: &PartitionNode, corridors: &mut Vec<Room>) {
    let Some((left, right)) = node.children() else {
        return;
    };
    let region = node.region;
    match node.split {
        Some(SplitAxis::Horizontal) => {
            let start = left.region.x + left.region.width / 2 - 1;
            let end = right.region.x + right.region.width / 2 + 1;
            let height = 2.min(start.abs_diff(end) as i32 + 1);
            corridors.push(Room::new(start, region.y + region.height / 2 - 1, 3, height));
        }
        Some(SplitAxis::Vertical) => {
            let start = left.region.y + left.region.height / 2 - 1;
            let end = right.region.y + right.region.height / 2 + 1;
            let width = 2.min(start.abs_diff(end) as i32 + 1);
            corridors.push(Room::new(region.x + region.width / 2 - 1, start, width, 3));
        }
        None => {}
    }
    sibling_corridors(left, corridors);
    sibling_corridors(right, corridors);
}

fn all_pairs_corridors(node: &PartitionNode, corridors: &mut Vec<Room>) {
    let Some((left, right)) = node.children() else {
        return;
    };
    let rooms = node.rooms();
    for (index, first) in rooms.iter().enumerate() {
        for second in &rooms[index + 1..] {
            connect_centers(first, second, corridors);
        }
    }
    all_pairs_corridors(left, corridors);
    all_pairs_corridors(right, corridors);
}

/// Straight strip when the centers share a row or column, otherwise an L along
/// the first center's row then the second center's column.
pub fn connect_centers(first: &Room, second: &Room, corridors: &mut Vec<Room>) {
    let from = first.center();
    let to = second.center();
    let min_x = from.x.min(to.x);
    let max_x = from.x.max(to.x);
    let min_y = from.y.min(to.y);
    let max_y = from.y.max(to.y);
    if from.x == to.x || from.y == to.y {
        corridors.push(Room::new(min_x, min_y, max_x - min_x + 1, max_y - min_y + 1));
    } else {
        corridors.push(Room::new(min_x, from.y, max_x - min_x + 1, 1));
        corridors.push(Room::new(to.x, min_y, 1, max_y - min_y + 1));
    }
}
