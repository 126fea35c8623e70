//! Marching squares over the tile grid
//!
//! Each code cell covers a 2x2 block of tiles. Its code says which corners of
//! the block are walls and selects the wall piece drawn there.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use super::TileGrid;

bitflags! {
    /// Wall corners of a 2x2 tile block
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Corners: u8 {
        const BOTTOM_RIGHT = 0x01;
        const TOP_RIGHT = 0x02;
        const TOP_LEFT = 0x04;
        const BOTTOM_LEFT = 0x08;
    }
}

impl Corners {
    /// Marching squares code, 0 to 15
    pub const fn code(self) -> u8 {
        self.bits()
    }

    /// Only two opposite corners are walls (codes 5 and 10). Rasterized
    /// rooms never produce these.
    pub fn is_diagonal(self) -> bool {
        self == Corners::TOP_RIGHT | Corners::BOTTOM_LEFT
            || self == Corners::BOTTOM_RIGHT | Corners::TOP_LEFT
    }

    /// Corners of the block whose bottom-left tile is `(x, y)`
    pub fn sample(tiles: &TileGrid, x: usize, y: usize) -> Self {
        let mut corners = Corners::empty();
        corners.set(Corners::BOTTOM_RIGHT, tiles.is_wall(x + 1, y));
        corners.set(Corners::TOP_RIGHT, tiles.is_wall(x + 1, y + 1));
        corners.set(Corners::TOP_LEFT, tiles.is_wall(x, y + 1));
        corners.set(Corners::BOTTOM_LEFT, tiles.is_wall(x, y));
        corners
    }
}

// Manual serde impl for Corners
impl Serialize for Corners {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.bits().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Corners {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bits = u8::deserialize(deserializer)?;
        Ok(Corners::from_bits_truncate(bits))
    }
}

/// A wall piece to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WallPlacement {
    /// Tile position relative to the bounds origin
    pub x: usize,
    pub y: usize,
    pub code: u8,
}

/// Marching squares codes, one per 2x2 tile block.
///
/// A `W x H` tile grid gives `(W - 1) x (H - 1)` codes, indexed `[x][y]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeGrid {
    width: usize,
    height: usize,
    cells: Vec<Vec<Corners>>,
    /// Cells with a diagonal code
    anomalies: Vec<(usize, usize)>,
}

impl CodeGrid {
    pub fn march(tiles: &TileGrid) -> Self {
        let width = tiles.width().saturating_sub(1);
        let height = tiles.height().saturating_sub(1);
        let mut anomalies = Vec::new();

        let cells: Vec<Vec<Corners>> = (0..width)
            .map(|x| {
                (0..height)
                    .map(|y| {
                        let corners = Corners::sample(tiles, x, y);
                        if corners.is_diagonal() {
                            log::warn!(
                                "unexpected diagonal code {} at ({}, {})",
                                corners.code(),
                                x,
                                y
                            );
                            anomalies.push((x, y));
                        }
                        corners
                    })
                    .collect()
            })
            .collect();

        Self {
            width,
            height,
            cells,
            anomalies,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Corners> {
        self.cells.get(x).and_then(|column| column.get(y)).copied()
    }

    /// Code at `(x, y)`, `None` outside the grid
    pub fn code(&self, x: usize, y: usize) -> Option<u8> {
        self.get(x, y).map(Corners::code)
    }

    pub fn anomalies(&self) -> &[(usize, usize)] {
        &self.anomalies
    }

    /// Every non-zero cell as a wall piece.
    ///
    /// A piece for cell `(x, y)` is drawn at tile `(x + 1, y + 1)`, the
    /// top-right tile of its block.
    pub fn wall_placements(&self) -> impl Iterator<Item = WallPlacement> + '_ {
        self.cells.iter().enumerate().flat_map(|(x, column)| {
            column
                .iter()
                .enumerate()
                .filter(|(_, corners)| !corners.is_empty())
                .map(move |(y, corners)| WallPlacement {
                    x: x + 1,
                    y: y + 1,
                    code: corners.code(),
                })
        })
    }
}

impl core::fmt::Display for CodeGrid {
    /// One hex digit per cell, top row first
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for y in (0..self.height).rev() {
            for x in 0..self.width {
                write!(f, "{:x}", self.cells[x][y].code())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::Rect;
    use crate::tilemap::TileState;

    #[test]
    fn test_corner_bits() {
        assert_eq!(Corners::all().code(), 15);
        assert_eq!((Corners::TOP_LEFT | Corners::BOTTOM_LEFT).code(), 12);
        assert!(Corners::from_bits_truncate(5).is_diagonal());
        assert!(Corners::from_bits_truncate(10).is_diagonal());
        assert!(!Corners::from_bits_truncate(3).is_diagonal());
    }

    #[test]
    fn test_room_codes() {
        let tiles = TileGrid::rasterize(Rect::new(0, 0, 5, 5), &[Rect::new(0, 0, 5, 5)], &[]);
        let codes = CodeGrid::march(&tiles);
        assert_eq!((codes.width(), codes.height()), (4, 4));
        // Bottom-left corner block is three walls, open to the top right
        assert_eq!(codes.code(0, 0), Some(13));
        // Along the bottom wall
        assert_eq!(codes.code(1, 0), Some(9));
        // Along the left wall
        assert_eq!(codes.code(0, 1), Some(12));
        // Interior
        assert_eq!(codes.code(1, 1), Some(0));
        assert_eq!(codes.code(3, 3), Some(7));
        assert!(codes.anomalies().is_empty());
        assert_eq!(codes.to_string(), "e667\nc003\nc003\nd99b\n");
    }

    #[test]
    fn test_diagonal_is_reported() {
        let mut tiles = TileGrid::new(Rect::new(0, 0, 2, 2));
        tiles.set(0, 0, TileState::Wall);
        tiles.set(1, 1, TileState::Wall);
        let codes = CodeGrid::march(&tiles);
        assert_eq!(codes.code(0, 0), Some(10));
        assert_eq!(codes.anomalies(), &[(0, 0)]);
    }

    #[test]
    fn test_wall_placements_skip_empty() {
        let tiles = TileGrid::rasterize(Rect::new(0, 0, 5, 5), &[Rect::new(0, 0, 5, 5)], &[]);
        let codes = CodeGrid::march(&tiles);
        let placements: Vec<_> = codes.wall_placements().collect();
        assert_eq!(placements.len(), 12);
        assert!(placements.contains(&WallPlacement { x: 1, y: 1, code: 13 }));
        assert!(placements.iter().all(|p| p.code != 0));
    }

    #[test]
    fn test_tiny_grid_has_no_codes() {
        let codes = CodeGrid::march(&TileGrid::new(Rect::new(0, 0, 1, 1)));
        assert_eq!(codes.width(), 0);
        assert_eq!(codes.wall_placements().count(), 0);
        assert_eq!(codes.to_string(), "");
    }
}
