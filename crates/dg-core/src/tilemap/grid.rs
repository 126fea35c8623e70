//! Wall/empty tile grid rasterized from room and door rectangles

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::dungeon::Rect;

/// State of a single tile
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
pub enum TileState {
    #[default]
    Empty,
    Wall,
}

impl TileState {
    /// ASCII symbol used by the grid's `Display`
    pub const fn symbol(&self) -> char {
        match self {
            TileState::Empty => '.',
            TileState::Wall => '#',
        }
    }

    pub const fn is_wall(&self) -> bool {
        matches!(self, TileState::Wall)
    }
}

/// Tiles covering the dungeon bounds.
///
/// Indexed `[x][y]` relative to the bounds origin, with y growing upwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileGrid {
    origin: (i32, i32),
    width: usize,
    height: usize,
    cells: Vec<Vec<TileState>>,
}

impl TileGrid {
    /// An all-empty grid covering `bounds`
    pub fn new(bounds: Rect) -> Self {
        let width = bounds.width.max(0) as usize;
        let height = bounds.height.max(0) as usize;
        Self {
            origin: (bounds.x, bounds.y),
            width,
            height,
            cells: vec![vec![TileState::Empty; height]; width],
        }
    }

    /// Mark the outline of every room as wall, then clear the outline of
    /// every door.
    ///
    /// Doors always win over walls. Tiles outside `bounds` are skipped.
    pub fn rasterize(bounds: Rect, rooms: &[Rect], doors: &[Rect]) -> Self {
        let mut grid = Self::new(bounds);
        let mut skipped = 0usize;

        for room in rooms {
            for (x, y) in room.border_positions() {
                if !grid.set_world(x, y, TileState::Wall) {
                    skipped += 1;
                }
            }
        }
        for door in doors {
            for (x, y) in door.border_positions() {
                if !grid.set_world(x, y, TileState::Empty) {
                    skipped += 1;
                }
            }
        }

        if skipped > 0 {
            log::warn!("{} tiles fell outside the bounds {}", skipped, bounds);
        }
        grid
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// World coordinates of tile `(0, 0)`
    pub fn origin(&self) -> (i32, i32) {
        self.origin
    }

    /// Tile at grid position `(x, y)`, `None` outside the grid
    pub fn get(&self, x: usize, y: usize) -> Option<TileState> {
        self.cells.get(x).and_then(|column| column.get(y)).copied()
    }

    /// True for wall tiles; positions outside the grid are not walls
    pub fn is_wall(&self, x: usize, y: usize) -> bool {
        self.get(x, y).is_some_and(|tile| tile.is_wall())
    }

    pub fn set(&mut self, x: usize, y: usize, state: TileState) -> bool {
        match self.cells.get_mut(x).and_then(|column| column.get_mut(y)) {
            Some(tile) => {
                *tile = state;
                true
            }
            None => false,
        }
    }

    /// Set a tile by world coordinates
    fn set_world(&mut self, x: i32, y: i32, state: TileState) -> bool {
        let gx = x - self.origin.0;
        let gy = y - self.origin.1;
        if gx < 0 || gy < 0 {
            return false;
        }
        self.set(gx as usize, gy as usize, state)
    }

    pub fn wall_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|tile| tile.is_wall())
            .count()
    }
}

impl core::fmt::Display for TileGrid {
    /// One line per row, top row first
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for y in (0..self.height).rev() {
            for x in 0..self.width {
                write!(f, "{}", self.cells[x][y].symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
