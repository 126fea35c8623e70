//! Error types for configuration and generation

use thiserror::Error;

use crate::dungeon::Axis;

/// Invalid or unreadable generator configuration.
///
/// Reported before the first generation step; a run never starts with a
/// configuration that failed validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("max generation {axis} is {value}, must be at least {minimum} (min room {axis} + 2)")]
    GenerationSizeTooSmall { axis: Axis, value: i32, minimum: i32 },

    #[error("min room {axis} is {value}, must be at least {minimum}")]
    RoomTooSmall { axis: Axis, value: i32, minimum: i32 },

    #[error("max room {axis} is {value}, must be at least {minimum} (2 * min room {axis} - 2)")]
    RoomRangeTooNarrow { axis: Axis, value: i32, minimum: i32 },

    #[error("dungeon {axis} is {value}, must be at least the min room {axis} {minimum}")]
    BoundsTooSmall { axis: Axis, value: i32, minimum: i32 },

    #[error("min door overlap must not be negative, got {0}")]
    NegativeDoorOverlap(i32),

    #[error("door length is {value}, must be at least {minimum}")]
    DoorTooShort { value: i32, minimum: i32 },

    #[error("door length {door_length} exceeds min door overlap {min_door_overlap}")]
    DoorLongerThanOverlap {
        door_length: i32,
        min_door_overlap: i32,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Fatal generation failures
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// The final reachability check failed. The layout must not be used.
    #[error("layout is not fully connected: reached {reachable} of {total} rooms")]
    Disconnected { reachable: usize, total: usize },

    #[error("partitioning produced no rooms")]
    NoRooms,
}
