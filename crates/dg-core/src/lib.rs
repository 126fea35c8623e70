//! dg-core: BSP dungeon layout generation
//!
//! Splits a rectangular area into rooms, prunes the smallest ones while the
//! layout stays connected, reduces the room graph to a spanning tree and cuts
//! one door per connection. The finished layout can be rasterized into a
//! wall/empty tile grid with marching-squares wall codes and a flood-filled
//! floor.
//!
//! This crate has no I/O beyond reading a config file and never installs a
//! logger; it reports through the `log` facade.

pub mod config;
pub mod dungeon;
pub mod error;
pub mod generator;
pub mod rng;
pub mod session;
pub mod tilemap;

pub use config::{GeneratorConfig, Pacing, Size};
pub use dungeon::{Axis, Door, Graph, Rect, Room, RoomId};
pub use error::{ConfigError, GenerationError};
pub use generator::{generate, Dungeon, GenerationStep, Steps};
pub use rng::DungeonRng;
pub use session::DungeonSession;
pub use tilemap::Tilemap;
