//! Rooms and their handles

use serde::{Deserialize, Serialize};

use super::Rect;

/// Stable room handle, assigned when the partitioner completes a room.
///
/// Graph edges refer to rooms by handle, so two rooms never alias even if
/// their rectangles are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(pub u32);

impl core::fmt::Display for RoomId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A completed room. The rect includes the room's walls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub rect: Rect,
}

impl Room {
    pub const fn new(id: RoomId, rect: Rect) -> Self {
        Self { id, rect }
    }

    pub const fn area(&self) -> i64 {
        self.rect.area()
    }

    pub const fn center(&self) -> (i32, i32) {
        self.rect.center()
    }
}
