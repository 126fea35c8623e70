//! Tilemap rasterization
//!
//! Turns a finished layout into wall/empty tiles, runs marching squares over
//! them to pick wall pieces, and flood fills the floor from the spawn room.

mod flood;
mod grid;
mod marching;

pub use flood::{flood_fill, FloorMask};
pub use grid::{TileGrid, TileState};
pub use marching::{CodeGrid, Corners, WallPlacement};

use serde::Serialize;

use crate::generator::Dungeon;

/// Everything a renderer needs to draw a dungeon
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tilemap {
    pub tiles: TileGrid,
    pub codes: CodeGrid,
    pub floor: FloorMask,
}

impl Tilemap {
    /// Rasterize `dungeon` and flood the floor from its spawn room
    pub fn build(dungeon: &Dungeon) -> Self {
        let (rooms, doors) = dungeon.rooms_and_doors();
        let tiles = TileGrid::rasterize(dungeon.bounds(), &rooms, &doors);
        let codes = CodeGrid::march(&tiles);

        let seed = floor_seed(dungeon).unwrap_or_else(|| {
            log::warn!("dungeon has no spawn point inside its bounds");
            (usize::MAX, usize::MAX)
        });
        let floor = flood_fill(&codes, seed);

        log::info!(
            "tilemap {}x{}: {} walls, {} floor cells",
            tiles.width(),
            tiles.height(),
            tiles.wall_count(),
            floor.len()
        );
        Self {
            tiles,
            codes,
            floor,
        }
    }
}

/// Code-grid cell at the centre of the spawn room
pub fn floor_seed(dungeon: &Dungeon) -> Option<(usize, usize)> {
    let (x, y) = dungeon.spawn_point()?;
    let bounds = dungeon.bounds();
    let gx = usize::try_from(x - bounds.x).ok()?;
    let gy = usize::try_from(y - bounds.y).ok()?;
    Some((gx, gy))
}
