//! Binary space partitioning of the dungeon bounds
//!
//! The bounds are split pass by pass. Every pass splits each pending rect
//! once; children that fit the max room size become rooms, the rest are
//! split again in the next pass. The two children of a split share the new
//! wall, so adjacent rooms overlap by exactly one lattice column or row.

use serde::Serialize;

use crate::config::{GeneratorConfig, Size};
use crate::error::ConfigError;
use crate::rng::DungeonRng;

use super::{Axis, Rect, Room, RoomId};

/// One split performed by the partitioner
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Split {
    pub parent: Rect,
    /// Axis whose extent was divided (`X` means a vertical wall)
    pub axis: Axis,
    /// Split offset from the parent's origin along `axis`
    pub position: i32,
    pub children: [Rect; 2],
    /// Children that were small enough to become rooms
    pub completed: Vec<Room>,
}

/// Incremental BSP partitioner
#[derive(Debug, Clone)]
pub struct Partitioner {
    min_room: Size,
    max_room: Size,
    max_generation: Size,
    /// Rects to split in the current pass
    pending: Vec<Rect>,
    cursor: usize,
    /// Rects produced this pass that still need splitting
    next_pass: Vec<Rect>,
    completed: Vec<Room>,
    next_id: u32,
}

impl Partitioner {
    /// Validate `config` and prepare to partition its bounds.
    ///
    /// Bounds that already fit the max room size become a single room.
    pub fn new(config: &GeneratorConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut partitioner = Self {
            min_room: config.min_room_size,
            max_room: config.max_room_size,
            max_generation: config.max_generation_size,
            pending: Vec::new(),
            cursor: 0,
            next_pass: Vec::new(),
            completed: Vec::new(),
            next_id: 0,
        };

        if partitioner.max_room.fits(&config.bounds) {
            partitioner.complete(config.bounds);
        } else {
            partitioner.pending.push(config.bounds);
        }
        Ok(partitioner)
    }

    /// True once no rect is left to split
    pub fn is_done(&self) -> bool {
        self.cursor >= self.pending.len() && self.next_pass.is_empty()
    }

    /// Rects still waiting to be split
    pub fn pending(&self) -> impl Iterator<Item = &Rect> {
        self.pending[self.cursor.min(self.pending.len())..]
            .iter()
            .chain(&self.next_pass)
    }

    /// Rooms completed so far, in completion order
    pub fn completed(&self) -> &[Room] {
        &self.completed
    }

    /// Split the next pending rect. Returns `None` when partitioning is done.
    pub fn step(&mut self, rng: &mut DungeonRng) -> Option<Split> {
        if self.cursor >= self.pending.len() {
            if self.next_pass.is_empty() {
                return None;
            }
            self.pending = std::mem::take(&mut self.next_pass);
            self.cursor = 0;
        }

        let parent = self.pending[self.cursor];
        self.cursor += 1;

        let axis = choose_axis(&parent, self.max_room);
        let position = self.split_position(parent.extent(axis), axis, rng);
        let children = split_rect(&parent, axis, position);

        let mut completed = Vec::new();
        for child in children {
            if self.max_room.fits(&child) {
                completed.push(self.complete(child));
            } else {
                self.next_pass.push(child);
            }
        }

        log::debug!(
            "split {} along {} at {}: {} + {}",
            parent,
            axis,
            position,
            children[0],
            children[1]
        );

        Some(Split {
            parent,
            axis,
            position,
            children,
            completed,
        })
    }

    /// Run every remaining split and return the rooms
    pub fn run(mut self, rng: &mut DungeonRng) -> Vec<Room> {
        while self.step(rng).is_some() {}
        self.into_rooms()
    }

    pub fn into_rooms(self) -> Vec<Room> {
        self.completed
    }

    fn complete(&mut self, rect: Rect) -> Room {
        let room = Room::new(RoomId(self.next_id), rect);
        self.next_id += 1;
        self.completed.push(room);
        room
    }

    /// Pick where to cut a rect of extent `size` along `axis`.
    ///
    /// The regular range keeps both children at least `min + 2` wide so the
    /// new wall never eats into the minimum. Rects only slightly larger than
    /// the max room leave that range empty; they are cut anywhere that keeps
    /// both children at least `min`.
    fn split_position(&self, size: i32, axis: Axis, rng: &mut DungeonRng) -> i32 {
        let min = self.min_room.along(axis);
        let max_split = (size - min).min(self.max_generation.along(axis));
        let lo = min + 2;

        if lo < max_split {
            let position = rng.range(lo, max_split);
            // Measure from the far edge half of the time
            if rng.one_in(2) { size - position } else { position }
        } else {
            let hi = (size - min + 1).min(max_split.max(min));
            let position = rng.range_inclusive(min, hi);
            if rng.one_in(2) { size + 1 - position } else { position }
        }
    }
}

/// Split axis for a rect: the longer side, unless exactly one side still
/// exceeds the max room size.
pub fn choose_axis(rect: &Rect, max_room: Size) -> Axis {
    let over_x = rect.width > max_room.width;
    let over_y = rect.height > max_room.height;

    match (over_x, over_y) {
        (true, false) => Axis::X,
        (false, true) => Axis::Y,
        _ if rect.width > rect.height => Axis::X,
        _ => Axis::Y,
    }
}

/// Cut `rect` at `position` along `axis`. Both children include the wall.
pub fn split_rect(rect: &Rect, axis: Axis, position: i32) -> [Rect; 2] {
    match axis {
        Axis::X => [
            Rect::new(rect.x, rect.y, position, rect.height),
            Rect::new(
                rect.x + position - 1,
                rect.y,
                rect.width - position + 1,
                rect.height,
            ),
        ],
        Axis::Y => [
            Rect::new(rect.x, rect.y, rect.width, position),
            Rect::new(
                rect.x,
                rect.y + position - 1,
                rect.width,
                rect.height - position + 1,
            ),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario() -> GeneratorConfig {
        GeneratorConfig::default()
    }

    #[test]
    fn test_choose_axis_longer_side() {
        let max = Size::new(16, 16);
        assert_eq!(choose_axis(&Rect::new(0, 0, 40, 30), max), Axis::X);
        assert_eq!(choose_axis(&Rect::new(0, 0, 30, 40), max), Axis::Y);
        // Square splits the height
        assert_eq!(choose_axis(&Rect::new(0, 0, 40, 40), max), Axis::Y);
    }

    #[test]
    fn test_choose_axis_forced_by_max_room() {
        let max = Size::new(16, 16);
        // Wider than tall, but only the height is still too big
        assert_eq!(choose_axis(&Rect::new(0, 0, 15, 14), Size::new(16, 13)), Axis::Y);
        assert_eq!(choose_axis(&Rect::new(0, 0, 17, 30), Size::new(16, 30)), Axis::X);
        assert_eq!(choose_axis(&Rect::new(0, 0, 12, 20), max), Axis::Y);
    }

    #[test]
    fn test_split_rect_shares_wall() {
        let [left, right] = split_rect(&Rect::new(0, 0, 20, 10), Axis::X, 8);
        assert_eq!(left, Rect::new(0, 0, 8, 10));
        assert_eq!(right, Rect::new(7, 0, 13, 10));
        assert_eq!(left.intersection(&right), Rect::new(7, 0, 1, 10));

        let [bottom, top] = split_rect(&Rect::new(5, 5, 10, 30), Axis::Y, 12);
        assert_eq!(bottom, Rect::new(5, 5, 10, 12));
        assert_eq!(top, Rect::new(5, 16, 10, 19));
        assert_eq!(bottom.y_max() - 1, top.y);
    }

    #[test]
    fn test_small_bounds_is_one_room() {
        let config = GeneratorConfig {
            bounds: Rect::new(3, 4, 12, 10),
            ..scenario()
        };
        let partitioner = Partitioner::new(&config).unwrap();
        assert!(partitioner.is_done());
        let rooms = partitioner.run(&mut DungeonRng::new(1));
        assert_eq!(rooms, vec![Room::new(RoomId(0), Rect::new(3, 4, 12, 10))]);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = GeneratorConfig {
            max_generation_size: Size::new(5, 5),
            ..scenario()
        };
        assert!(Partitioner::new(&config).is_err());
    }

    #[test]
    fn test_rooms_respect_size_limits() {
        let config = scenario();
        for seed in 0..50 {
            let mut rng = DungeonRng::new(seed);
            let rooms = Partitioner::new(&config).unwrap().run(&mut rng);
            assert!(rooms.len() >= 4, "seed {} produced {} rooms", seed, rooms.len());
            for room in &rooms {
                let r = room.rect;
                assert!(r.width <= 16 && r.height <= 16, "seed {}: {} too big", seed, r);
                assert!(r.width >= 8 && r.height >= 8, "seed {}: {} too small", seed, r);
                assert!(config.bounds.contains_rect(&r));
            }
        }
    }

    #[test]
    fn test_room_ids_are_unique_and_sequential() {
        let rooms = Partitioner::new(&scenario())
            .unwrap()
            .run(&mut DungeonRng::new(9));
        for (i, room) in rooms.iter().enumerate() {
            assert_eq!(room.id, RoomId(i as u32));
        }
    }

    #[test]
    fn test_step_reports_splits() {
        let mut rng = DungeonRng::new(42);
        let mut partitioner = Partitioner::new(&scenario()).unwrap();
        let first = partitioner.step(&mut rng).unwrap();
        assert_eq!(first.parent, Rect::new(0, 0, 40, 40));
        assert_eq!(first.axis, Axis::Y);
        assert_eq!(
            first.children[0].height + first.children[1].height,
            40 + 1
        );

        let mut steps = 1;
        let mut completed = first.completed.len();
        while let Some(split) = partitioner.step(&mut rng) {
            steps += 1;
            completed += split.completed.len();
        }
        assert!(partitioner.is_done());
        assert_eq!(partitioner.pending().count(), 0);
        assert_eq!(completed, partitioner.completed().len());
        // A binary split tree with n leaves has n - 1 splits
        assert_eq!(steps, completed - 1);
    }

    #[test]
    fn test_deterministic_per_seed() {
        let config = scenario();
        let a = Partitioner::new(&config).unwrap().run(&mut DungeonRng::new(5));
        let b = Partitioner::new(&config).unwrap().run(&mut DungeonRng::new(5));
        assert_eq!(a, b);
    }

    #[test]
    fn test_narrow_overflow_still_splits() {
        // 17 wide with min 8 leaves no room for the +2 range
        let config = GeneratorConfig {
            bounds: Rect::new(0, 0, 17, 10),
            max_room_size: Size::new(16, 16),
            min_room_size: Size::new(8, 8),
            max_generation_size: Size::new(30, 30),
            ..scenario()
        };
        for seed in 0..20 {
            let rooms = Partitioner::new(&config)
                .unwrap()
                .run(&mut DungeonRng::new(seed));
            assert_eq!(rooms.len(), 2);
            for room in rooms {
                assert!(room.rect.width >= 8 && room.rect.width <= 16);
            }
        }
    }
}
