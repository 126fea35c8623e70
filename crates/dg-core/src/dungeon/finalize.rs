//! Room graph construction and pruning
//!
//! Two rooms are connected when their shared wall is long enough for a door
//! plus the two corner tiles. After partitioning, the smallest rooms are
//! removed one at a time as long as the rest stays connected; the final graph
//! is then reduced to a DFS spanning tree.

use hashbrown::HashMap;

use crate::error::GenerationError;

use super::{Graph, Rect, Room, RoomId};

/// Removals must stay below one in this many of the rooms still left
const PRUNE_DIVISOR: usize = 10;

/// True when `a` and `b` share a wall long enough for a door
pub fn can_connect(a: &Rect, b: &Rect, min_door_overlap: i32) -> bool {
    let overlap = a.intersection(b);
    if overlap.is_empty() {
        return false;
    }
    let needed = min_door_overlap + 2;
    overlap.width >= needed || overlap.height >= needed
}

/// Build the symmetric connectivity graph of `rooms`.
///
/// Nodes keep the order of `rooms`; every connected pair is stored in both
/// directions.
pub fn build_room_graph(rooms: &[Room], min_door_overlap: i32) -> Graph<RoomId> {
    let mut graph = Graph::new();
    for room in rooms {
        graph.add_node(room.id);
    }
    for (i, a) in rooms.iter().enumerate() {
        for b in &rooms[i + 1..] {
            if can_connect(&a.rect, &b.rect, min_door_overlap) {
                graph.add_edge(a.id, b.id);
                graph.add_edge(b.id, a.id);
            }
        }
    }
    graph
}

/// Outcome of one pruning attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum PruneStep {
    /// The room was dropped and the rest stays connected
    Removed(Room),
    /// Dropping the room would disconnect the layout; it was kept and
    /// pruning stopped
    Rejected(Room),
}

impl PruneStep {
    pub fn room(&self) -> &Room {
        match self {
            PruneStep::Removed(room) | PruneStep::Rejected(room) => room,
        }
    }
}

/// Removes the smallest rooms while connectivity holds
#[derive(Debug, Clone)]
pub struct Pruner {
    /// Ascending by area, stable for equal areas
    rooms: Vec<Room>,
    min_door_overlap: i32,
    removed: usize,
    stopped: bool,
}

impl Pruner {
    pub fn new(mut rooms: Vec<Room>, min_door_overlap: i32) -> Self {
        rooms.sort_by_key(Room::area);
        Self {
            rooms,
            min_door_overlap,
            removed: 0,
            stopped: false,
        }
    }

    /// Rooms still in the layout, smallest first
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// True while the rooms removed so far are fewer than a tenth of the
    /// rooms remaining
    pub fn may_remove(&self) -> bool {
        !self.stopped && self.removed * PRUNE_DIVISOR < self.rooms.len()
    }

    pub fn removed(&self) -> usize {
        self.removed
    }

    /// Try to remove the smallest remaining room.
    ///
    /// Returns `None` once no further removal is allowed, pruning has
    /// stopped, or a single room is left.
    pub fn step(&mut self) -> Option<PruneStep> {
        if !self.may_remove() || self.rooms.len() <= 1 {
            return None;
        }

        let candidate = self.rooms.remove(0);
        let mut graph = build_room_graph(&self.rooms, self.min_door_overlap);
        let start = self.rooms[0].id;

        if graph.dfs(start, false) {
            self.removed += 1;
            log::debug!("removed room {} {}", candidate.id, candidate.rect);
            Some(PruneStep::Removed(candidate))
        } else {
            self.rooms.insert(0, candidate);
            self.stopped = true;
            log::info!("Not all rooms are reachable, stopped room removal early");
            Some(PruneStep::Rejected(candidate))
        }
    }

    /// Build the final graph and reduce it to a spanning tree.
    ///
    /// Fails with [`GenerationError::Disconnected`] if some room cannot be
    /// reached from the first one.
    pub fn finish(self) -> Result<ConnectedLayout, GenerationError> {
        let Some(first) = self.rooms.first() else {
            return Err(GenerationError::NoRooms);
        };
        let start = first.id;

        let mut graph = build_room_graph(&self.rooms, self.min_door_overlap);
        let total = graph.node_count();
        if !graph.dfs(start, true) {
            let reachable = graph.node_count();
            log::error!("only {} of {} rooms are reachable", reachable, total);
            return Err(GenerationError::Disconnected { reachable, total });
        }

        log::info!(
            "{} rooms connected by {} doors",
            total,
            graph.edge_count() / 2
        );
        Ok(ConnectedLayout::new(self.rooms, graph))
    }

    /// Run every remaining step, then [`finish`](Self::finish)
    pub fn run(mut self) -> Result<ConnectedLayout, GenerationError> {
        while self.step().is_some() {}
        self.finish()
    }
}

/// Pruned rooms plus their spanning-tree graph.
///
/// Rooms are looked up by handle through a side index; the graph never
/// stores rectangles.
#[derive(Debug, Clone)]
pub struct ConnectedLayout {
    rooms: Vec<Room>,
    index: HashMap<RoomId, usize>,
    graph: Graph<RoomId>,
}

impl ConnectedLayout {
    pub fn new(rooms: Vec<Room>, graph: Graph<RoomId>) -> Self {
        let index = rooms
            .iter()
            .enumerate()
            .map(|(i, room)| (room.id, i))
            .collect();
        Self {
            rooms,
            index,
            graph,
        }
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn graph(&self) -> &Graph<RoomId> {
        &self.graph
    }

    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.index.get(&id).map(|&i| &self.rooms[i])
    }

    pub fn into_parts(self) -> (Vec<Room>, HashMap<RoomId, usize>, Graph<RoomId>) {
        (self.rooms, self.index, self.graph)
    }
}
