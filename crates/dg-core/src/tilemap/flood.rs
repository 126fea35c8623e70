//! Flood fill of the floor area over marching-squares codes

use serde::{Deserialize, Serialize};

use super::CodeGrid;

/// Code cells reachable from a seed through zero-code cells
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloorMask {
    width: usize,
    height: usize,
    cells: Vec<Vec<bool>>,
    count: usize,
}

impl FloorMask {
    fn empty(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![vec![false; height]; width],
            count: 0,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        self.cells
            .get(x)
            .and_then(|column| column.get(y))
            .copied()
            .unwrap_or(false)
    }

    /// Number of floor cells
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Floor cells in code-grid coordinates, column by column
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells.iter().enumerate().flat_map(|(x, column)| {
            column
                .iter()
                .enumerate()
                .filter(|(_, floor)| **floor)
                .map(move |(y, _)| (x, y))
        })
    }

    /// Floor tiles to draw: cell `(x, y)` maps to tile `(x + 1, y + 1)`
    pub fn positions(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells().map(|(x, y)| (x + 1, y + 1))
    }
}

/// 4-connected fill over zero-code cells starting at `seed`.
///
/// A seed outside the grid or on a non-zero code gives an empty mask.
pub fn flood_fill(codes: &CodeGrid, seed: (usize, usize)) -> FloorMask {
    let mut mask = FloorMask::empty(codes.width(), codes.height());

    match codes.code(seed.0, seed.1) {
        Some(0) => {}
        Some(code) => {
            log::warn!("flood seed {:?} is on wall code {}", seed, code);
            return mask;
        }
        None => {
            log::warn!("flood seed {:?} is outside the code grid", seed);
            return mask;
        }
    }

    let mut frontier = vec![seed];
    mask.cells[seed.0][seed.1] = true;
    mask.count = 1;

    while let Some((x, y)) = frontier.pop() {
        let neighbours = [
            (x.checked_sub(1), Some(y)),
            (x.checked_add(1), Some(y)),
            (Some(x), y.checked_sub(1)),
            (Some(x), y.checked_add(1)),
        ];
        for (nx, ny) in neighbours {
            let (Some(nx), Some(ny)) = (nx, ny) else {
                continue;
            };
            if codes.code(nx, ny) != Some(0) || mask.cells[nx][ny] {
                continue;
            }
            mask.cells[nx][ny] = true;
            mask.count += 1;
            frontier.push((nx, ny));
        }
    }

    log::debug!("flood fill from {:?} reached {} cells", seed, mask.count);
    mask
}
