//! Dungeon synthesis split into partitioning, rasterizing, cleanup and placement.

pub mod cleanup;
pub mod grid;
pub mod model;
pub mod partition;
pub mod placement;
pub mod synthesis;

use log::debug;

use crate::rng::RandomStream;

pub use cleanup::{CleanupSummary, run_cleanup};
pub use grid::{Grid, neighbors4};
pub use model::{Layout, Region, Room};
pub use partition::{PartitionNode, PartitionTree, SplitAxis};
pub use placement::{EntityPlacer, Placement};

/// Rasterizes `layout` onto a fresh grid and runs every cleanup pass.
pub fn synthesize(
    width: usize,
    height: usize,
    layout: &Layout,
    decoration_rate: f64,
    rng: &mut RandomStream,
) -> Grid {
    let mut grid = synthesis::blank_grid(width, height, decoration_rate, rng);
    synthesis::stamp_layout(&mut grid, layout);
    let summary = run_cleanup(&mut grid);
    debug!(
        "synthesized {width}x{height} grid from {} rooms and {} corridors: {summary:?}",
        layout.rooms.len(),
        layout.corridors.len()
    );
    grid
}
