//! Dungeon layout: geometry, room graph and the layout stages
//!
//! Partitioning produces rooms, pruning and the spanning tree decide which
//! rooms stay and which ones connect, and the door placer cuts one door per
//! connection.

mod doors;
mod finalize;
mod graph;
mod partition;
mod rect;
mod room;

pub use doors::{door_between, Door, DoorPlacer, DoorStep};
pub use finalize::{build_room_graph, can_connect, ConnectedLayout, PruneStep, Pruner};
pub use graph::Graph;
pub use partition::{choose_axis, split_rect, Partitioner, Split};
pub use rect::{Axis, Rect};
pub use room::{Room, RoomId};
