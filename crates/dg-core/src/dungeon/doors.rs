//! Door placement along shared walls

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::rng::DungeonRng;

use super::{ConnectedLayout, Rect, RoomId};

/// A door cut into the wall shared by two rooms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Door {
    pub rect: Rect,
    /// The room whose pass created the door, then its neighbour
    pub rooms: (RoomId, RoomId),
}

impl Door {
    pub fn connects(&self, a: RoomId, b: RoomId) -> bool {
        self.rooms == (a, b) || self.rooms == (b, a)
    }
}

/// Doors created while visiting one room
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DoorStep {
    pub room: RoomId,
    pub doors: Vec<Door>,
}

/// Place a door of `length` tiles in the wall shared by `room` and `neighbor`.
///
/// A wide overlap gives a horizontal door on its bottom row, anything else a
/// vertical door on its left column. The door avoids the two end tiles of the
/// overlap when there is space; otherwise it is centred. Returns `None` when
/// the rects do not overlap.
pub fn door_between(
    room: &Rect,
    neighbor: &Rect,
    length: i32,
    rng: &mut DungeonRng,
) -> Option<Rect> {
    let overlap = room.intersection(neighbor);
    if overlap.is_empty() {
        return None;
    }

    if overlap.width > overlap.height {
        let x = place_along(overlap.x, overlap.width, length, rng);
        Some(Rect::new(x, overlap.y, length, 1))
    } else {
        let y = place_along(overlap.y, overlap.height, length, rng);
        Some(Rect::new(overlap.x, y, 1, length))
    }
}

fn place_along(start: i32, extent: i32, length: i32, rng: &mut DungeonRng) -> i32 {
    let lo = start + 1;
    let hi = start + extent - 1 - length;
    if hi >= lo {
        rng.range_inclusive(lo, hi)
    } else {
        start + (extent - length).max(0) / 2
    }
}

/// Walks the graph keys, creating one door per spanning-tree edge
#[derive(Debug, Clone)]
pub struct DoorPlacer {
    layout: ConnectedLayout,
    door_length: i32,
    cursor: usize,
    with_door: HashSet<RoomId>,
    doors: Vec<Door>,
}

impl DoorPlacer {
    pub fn new(layout: ConnectedLayout, door_length: i32) -> Self {
        let capacity = layout.rooms().len();
        Self {
            layout,
            door_length,
            cursor: 0,
            with_door: HashSet::with_capacity(capacity),
            doors: Vec::with_capacity(capacity.saturating_sub(1)),
        }
    }

    pub fn layout(&self) -> &ConnectedLayout {
        &self.layout
    }

    /// Doors placed so far
    pub fn doors(&self) -> &[Door] {
        &self.doors
    }

    pub fn is_done(&self) -> bool {
        self.cursor >= self.layout.graph().node_count()
    }

    /// Visit the next room in graph key order.
    ///
    /// A neighbour gets a door unless it was already visited, so each
    /// spanning-tree edge yields exactly one door.
    pub fn step(&mut self, rng: &mut DungeonRng) -> Option<DoorStep> {
        let room_id = *self.layout.graph().keys().get(self.cursor)?;
        self.cursor += 1;
        self.with_door.insert(room_id);

        let mut step = DoorStep {
            room: room_id,
            doors: Vec::new(),
        };
        let Some(room) = self.layout.room(room_id).copied() else {
            log::warn!("room {} is in the graph but not in the layout", room_id);
            return Some(step);
        };

        for &neighbor_id in self.layout.graph().neighbors(room_id) {
            if self.with_door.contains(&neighbor_id) {
                continue;
            }
            let Some(neighbor) = self.layout.room(neighbor_id) else {
                log::warn!("neighbour {} of {} has no room", neighbor_id, room_id);
                continue;
            };
            match door_between(&room.rect, &neighbor.rect, self.door_length, rng) {
                Some(rect) => {
                    log::debug!("door {} between {} and {}", rect, room_id, neighbor_id);
                    step.doors.push(Door {
                        rect,
                        rooms: (room_id, neighbor_id),
                    });
                }
                None => log::warn!("rooms {} and {} share no wall", room_id, neighbor_id),
            }
        }

        self.doors.extend_from_slice(&step.doors);
        Some(step)
    }

    /// Place every remaining door and return the layout with its doors
    pub fn run(mut self, rng: &mut DungeonRng) -> (ConnectedLayout, Vec<Door>) {
        while self.step(rng).is_some() {}
        self.into_parts()
    }

    pub fn into_parts(self) -> (ConnectedLayout, Vec<Door>) {
        (self.layout, self.doors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::{Pruner, Room};

    fn room(id: u32, x: i32, y: i32, w: i32, h: i32) -> Room {
        Room::new(RoomId(id), Rect::new(x, y, w, h))
    }

    #[test]
    fn test_vertical_door_in_shared_column() {
        let mut rng = DungeonRng::new(42);
        let left = Rect::new(0, 0, 10, 10);
        let right = Rect::new(9, 0, 11, 10);
        for _ in 0..100 {
            let door = door_between(&left, &right, 2, &mut rng).unwrap();
            assert_eq!(door.x, 9);
            assert_eq!(door.width, 1);
            assert_eq!(door.height, 2);
            // Corner tiles at y = 0 and y = 9 stay wall
            assert!(door.y >= 1 && door.y_max() <= 9, "door {}", door);
        }
    }

    #[test]
    fn test_horizontal_door_in_shared_row() {
        let mut rng = DungeonRng::new(3);
        let bottom = Rect::new(0, 0, 12, 10);
        let top = Rect::new(2, 9, 8, 10);
        let door = door_between(&bottom, &top, 3, &mut rng).unwrap();
        assert_eq!(door.y, 9);
        assert_eq!(door.height, 1);
        assert!(door.x >= 3 && door.x_max() <= 9);
        assert!(bottom.intersection(&top).contains_rect(&door));
    }

    #[test]
    fn test_tight_overlap_centres_door() {
        let mut rng = DungeonRng::new(0);
        // Overlap of 3 cannot fit a 2-tile door between its end tiles
        let door = door_between(&Rect::new(0, 0, 10, 10), &Rect::new(9, 7, 5, 5), 2, &mut rng)
            .unwrap();
        assert_eq!(door, Rect::new(9, 7, 1, 2));
    }

    #[test]
    fn test_no_overlap_no_door() {
        let mut rng = DungeonRng::new(0);
        assert!(
            door_between(&Rect::new(0, 0, 5, 5), &Rect::new(5, 0, 5, 5), 2, &mut rng).is_none()
        );
    }

    #[test]
    fn test_one_door_per_tree_edge() {
        let rooms = vec![
            room(0, 0, 0, 10, 10),
            room(1, 9, 0, 10, 10),
            room(2, 0, 9, 10, 10),
            room(3, 9, 9, 10, 10),
        ];
        let layout = Pruner::new(rooms, 3).finish().unwrap();
        let mut rng = DungeonRng::new(11);
        let mut placer = DoorPlacer::new(layout, 2);

        let mut visited = 0;
        while let Some(step) = placer.step(&mut rng) {
            visited += 1;
            for door in &step.doors {
                assert_eq!(door.rooms.0, step.room);
            }
        }
        assert_eq!(visited, 4);
        assert!(placer.is_done());

        let (layout, doors) = placer.into_parts();
        assert_eq!(doors.len(), 3);
        for door in &doors {
            let (a, b) = door.rooms;
            assert!(layout.graph().has_edge(a, b));
            let ra = layout.room(a).unwrap().rect;
            let rb = layout.room(b).unwrap().rect;
            assert!(ra.intersection(&rb).contains_rect(&door.rect));
            assert!(door.connects(b, a));
        }
    }
}
