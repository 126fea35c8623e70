//! Generation pipeline
//!
//! [`Steps`] runs the layout stages one discrete step at a time: one split,
//! one pruning attempt, one room's doors. [`generate`] drives the same
//! iterator to completion, so a seed gives the same dungeon no matter how the
//! steps are paced.

use hashbrown::HashMap;
use serde::Serialize;

use crate::config::GeneratorConfig;
use crate::dungeon::{
    ConnectedLayout, Door, DoorPlacer, DoorStep, Graph, Partitioner, PruneStep, Pruner, Rect,
    Room, RoomId, Split,
};
use crate::error::{ConfigError, GenerationError};
use crate::rng::DungeonRng;

/// A finished dungeon layout
#[derive(Debug, Clone, Serialize)]
pub struct Dungeon {
    seed: u64,
    bounds: Rect,
    rooms: Vec<Room>,
    doors: Vec<Door>,
    /// Position of each room in `rooms`
    #[serde(skip)]
    index: HashMap<RoomId, usize>,
    /// Spanning tree over the rooms, both directions of every edge stored
    #[serde(skip)]
    graph: Graph<RoomId>,
}

impl Dungeon {
    fn new(seed: u64, bounds: Rect, layout: ConnectedLayout, doors: Vec<Door>) -> Self {
        let (rooms, index, graph) = layout.into_parts();
        Self {
            seed,
            bounds,
            rooms,
            doors,
            index,
            graph,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Rooms, smallest first
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn doors(&self) -> &[Door] {
        &self.doors
    }

    pub fn graph(&self) -> &Graph<RoomId> {
        &self.graph
    }

    /// Connected room pairs, one per spanning-tree edge, lower id first
    pub fn connections(&self) -> impl Iterator<Item = (RoomId, RoomId)> + '_ {
        self.graph.edges().filter(|(a, b)| a < b)
    }

    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.index.get(&id).map(|&i| &self.rooms[i])
    }

    /// First room containing the lattice point `(x, y)`.
    ///
    /// Shared walls belong to both neighbours; the first in room order wins.
    pub fn room_at(&self, x: i32, y: i32) -> Option<&Room> {
        self.rooms.iter().find(|room| room.rect.contains_point(x, y))
    }

    /// Centre of the first room
    pub fn spawn_point(&self) -> Option<(i32, i32)> {
        self.rooms.first().map(Room::center)
    }

    /// Room and door rectangles, in room order and door creation order
    pub fn rooms_and_doors(&self) -> (Vec<Rect>, Vec<Rect>) {
        (
            self.rooms.iter().map(|room| room.rect).collect(),
            self.doors.iter().map(|door| door.rect).collect(),
        )
    }
}

/// One observable generation step
#[derive(Debug, Clone, Serialize)]
pub enum GenerationStep {
    Split(Split),
    PartitionComplete { rooms: usize },
    Prune(PruneStep),
    GraphFinalized { rooms: usize, connections: usize },
    Doors(DoorStep),
    Complete(Box<Dungeon>),
}

impl GenerationStep {
    pub fn is_complete(&self) -> bool {
        matches!(self, GenerationStep::Complete(_))
    }
}

enum Stage {
    Partition(Partitioner),
    Prune(Pruner),
    Doors(DoorPlacer),
    Done,
}

/// Finite iterator over the generation steps of one run.
///
/// Ends after [`GenerationStep::Complete`] or the first error. A run cannot
/// be restarted; create a new `Steps` instead.
pub struct Steps {
    config: GeneratorConfig,
    rng: DungeonRng,
    stage: Stage,
}

impl Steps {
    /// Validate `config` and set up the partitioner
    pub fn new(config: &GeneratorConfig) -> Result<Self, ConfigError> {
        let partitioner = Partitioner::new(config)?;
        log::info!(
            "generating dungeon {} with seed {}",
            config.bounds,
            config.seed
        );
        Ok(Self {
            config: config.clone(),
            rng: DungeonRng::new(config.seed),
            stage: Stage::Partition(partitioner),
        })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.stage, Stage::Done)
    }

    fn advance(&mut self) -> Option<Result<GenerationStep, GenerationError>> {
        match std::mem::replace(&mut self.stage, Stage::Done) {
            Stage::Partition(mut partitioner) => {
                if let Some(split) = partitioner.step(&mut self.rng) {
                    self.stage = Stage::Partition(partitioner);
                    return Some(Ok(GenerationStep::Split(split)));
                }
                let rooms = partitioner.into_rooms();
                let count = rooms.len();
                log::info!("partitioned into {} rooms", count);
                self.stage = Stage::Prune(Pruner::new(rooms, self.config.min_door_overlap));
                Some(Ok(GenerationStep::PartitionComplete { rooms: count }))
            }
            Stage::Prune(mut pruner) => {
                if let Some(step) = pruner.step() {
                    self.stage = Stage::Prune(pruner);
                    return Some(Ok(GenerationStep::Prune(step)));
                }
                match pruner.finish() {
                    Ok(layout) => {
                        let rooms = layout.rooms().len();
                        let connections = layout.graph().edge_count() / 2;
                        self.stage = Stage::Doors(DoorPlacer::new(layout, self.config.door_length));
                        Some(Ok(GenerationStep::GraphFinalized { rooms, connections }))
                    }
                    Err(err) => Some(Err(err)),
                }
            }
            Stage::Doors(mut placer) => {
                if let Some(step) = placer.step(&mut self.rng) {
                    self.stage = Stage::Doors(placer);
                    return Some(Ok(GenerationStep::Doors(step)));
                }
                let (layout, doors) = placer.into_parts();
                log::info!("placed {} doors", doors.len());
                let dungeon = Dungeon::new(self.config.seed, self.config.bounds, layout, doors);
                Some(Ok(GenerationStep::Complete(Box::new(dungeon))))
            }
            Stage::Done => None,
        }
    }
}

impl Iterator for Steps {
    type Item = Result<GenerationStep, GenerationError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.advance()
    }
}

impl core::iter::FusedIterator for Steps {}

/// Generate a complete dungeon in one call
pub fn generate(config: &GeneratorConfig) -> Result<Dungeon, GenerationError> {
    for step in Steps::new(config)? {
        if let GenerationStep::Complete(dungeon) = step? {
            return Ok(*dungeon);
        }
    }
    Err(GenerationError::NoRooms)
}
