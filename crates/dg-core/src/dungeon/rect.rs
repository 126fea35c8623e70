//! Integer rectangles
//!
//! Rooms, doors and the dungeon bounds are all axis-aligned rectangles on the
//! integer lattice. `x_max`/`y_max` are exclusive, so a room of width 10 at
//! x = 0 covers lattice columns 0..=9.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Lattice axis. Displays as the extent measured along it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum Axis {
    #[strum(serialize = "width")]
    X,
    #[strum(serialize = "height")]
    Y,
}

impl Axis {
    pub const fn other(self) -> Axis {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }
}

/// An axis-aligned integer rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left x coordinate
    pub x: i32,
    /// Bottom y coordinate
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// The zero rectangle, returned for empty intersections
    pub const ZERO: Rect = Rect::new(0, 0, 0, 0);

    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Exclusive right edge
    pub const fn x_max(&self) -> i32 {
        self.x + self.width
    }

    /// Exclusive top edge
    pub const fn y_max(&self) -> i32 {
        self.y + self.height
    }

    /// Integer center, rounded towards the origin corner
    pub const fn center(&self) -> (i32, i32) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Width for [`Axis::X`], height for [`Axis::Y`]
    pub const fn extent(&self, axis: Axis) -> i32 {
        match axis {
            Axis::X => self.width,
            Axis::Y => self.height,
        }
    }

    pub const fn area(&self) -> i64 {
        self.width as i64 * self.height as i64
    }

    /// True when the rectangle has no positive area
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Check if the open interiors overlap on both axes.
    ///
    /// Rectangles that only touch along an edge do not intersect.
    pub const fn intersects(&self, other: &Rect) -> bool {
        self.x < other.x_max()
            && self.x_max() > other.x
            && self.y < other.y_max()
            && self.y_max() > other.y
    }

    /// Calculate the overlap of two rectangles.
    ///
    /// Returns [`Rect::ZERO`] when the overlap has no positive width or height.
    pub fn intersection(&self, other: &Rect) -> Rect {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let width = self.x_max().min(other.x_max()) - x;
        let height = self.y_max().min(other.y_max()) - y;

        if width <= 0 || height <= 0 {
            Rect::ZERO
        } else {
            Rect::new(x, y, width, height)
        }
    }

    /// Check if a lattice point lies inside the rectangle
    pub const fn contains_point(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.x_max() && y >= self.y && y < self.y_max()
    }

    /// Check if this rectangle contains another
    pub const fn contains_rect(&self, other: &Rect) -> bool {
        self.x <= other.x
            && self.y <= other.y
            && self.x_max() >= other.x_max()
            && self.y_max() >= other.y_max()
    }

    /// Every lattice point inside the rectangle, column by column
    pub fn positions(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        (self.x..self.x_max()).flat_map(move |x| (self.y..self.y_max()).map(move |y| (x, y)))
    }

    /// Lattice points on the outline: first/last column and first/last row
    pub fn border_positions(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.positions().filter(move |&(x, y)| {
            x == self.x || x == self.x_max() - 1 || y == self.y || y == self.y_max() - 1
        })
    }
}

impl core::fmt::Display for Rect {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "({}, {}) {}x{}",
            self.x, self.y, self.width, self.height
        )
    }
}
