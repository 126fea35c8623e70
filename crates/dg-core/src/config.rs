//! Generator configuration
//!
//! Supplied once when a run starts. Loaded from JSON (every field optional,
//! missing fields fall back to [`GeneratorConfig::default`]) and validated
//! before the first generation step.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::dungeon::{Axis, Rect};
use crate::error::ConfigError;

/// Smallest room extent that still leaves one floor tile between two walls
pub const MIN_ROOM_EXTENT: i32 = 3;

/// Shortest door the floor flood fill can pass through. A 2x2 code cell only
/// reads as open when two door tiles sit side by side.
pub const MIN_DOOR_LENGTH: i32 = 2;

/// Width/height pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub const fn along(&self, axis: Axis) -> i32 {
        match axis {
            Axis::X => self.width,
            Axis::Y => self.height,
        }
    }

    /// True when `rect` fits inside this size on both axes
    pub const fn fits(&self, rect: &Rect) -> bool {
        rect.width <= self.width && rect.height <= self.height
    }
}

/// How a caller should pace generation steps.
///
/// The library never sleeps; this is read by whoever drives
/// [`Steps`](crate::generator::Steps).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Pacing {
    /// Run every step back to back
    #[default]
    Fast,
    /// Pause between steps, for watching the layout grow
    Stepwise { delay_ms: u64 },
}

/// Full set of generation parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Area to partition
    pub bounds: Rect,
    /// Cap on the portion split off a large rect, prevents spiral layouts.
    /// Around 3/4 of the bounds works well.
    pub max_generation_size: Size,
    pub max_room_size: Size,
    pub min_room_size: Size,
    /// Minimum shared wall, excluding the two corner tiles, for two rooms to
    /// be connected
    pub min_door_overlap: i32,
    /// Door extent along the wall it is cut into
    pub door_length: i32,
    pub seed: u64,
    pub pacing: Pacing,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            bounds: Rect::new(0, 0, 40, 40),
            max_generation_size: Size::new(30, 30),
            max_room_size: Size::new(16, 16),
            min_room_size: Size::new(8, 8),
            min_door_overlap: 3,
            door_length: 2,
            seed: 42,
            pacing: Pacing::Fast,
        }
    }
}

impl GeneratorConfig {
    /// Parse a JSON document. Fields that are absent keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON config file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Check every precondition of the generator.
    ///
    /// Besides `max_generation_size >= min_room_size + 2`, each axis needs
    /// `max_room_size >= 2 * min_room_size - 2` so that any rect larger than
    /// the max room can still be split into two rooms of at least min size.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for axis in [Axis::X, Axis::Y] {
            let min_room = self.min_room_size.along(axis);
            if min_room < MIN_ROOM_EXTENT {
                return Err(ConfigError::RoomTooSmall {
                    axis,
                    value: min_room,
                    minimum: MIN_ROOM_EXTENT,
                });
            }

            let max_gen = self.max_generation_size.along(axis);
            if max_gen < min_room + 2 {
                return Err(ConfigError::GenerationSizeTooSmall {
                    axis,
                    value: max_gen,
                    minimum: min_room + 2,
                });
            }

            let max_room = self.max_room_size.along(axis);
            if max_room < 2 * min_room - 2 {
                return Err(ConfigError::RoomRangeTooNarrow {
                    axis,
                    value: max_room,
                    minimum: 2 * min_room - 2,
                });
            }

            let bound = self.bounds.extent(axis);
            if bound < min_room {
                return Err(ConfigError::BoundsTooSmall {
                    axis,
                    value: bound,
                    minimum: min_room,
                });
            }
        }

        if self.min_door_overlap < 0 {
            return Err(ConfigError::NegativeDoorOverlap(self.min_door_overlap));
        }
        if self.door_length < MIN_DOOR_LENGTH {
            return Err(ConfigError::DoorTooShort {
                value: self.door_length,
                minimum: MIN_DOOR_LENGTH,
            });
        }
        if self.door_length > self.min_door_overlap {
            return Err(ConfigError::DoorLongerThanOverlap {
                door_length: self.door_length,
                min_door_overlap: self.min_door_overlap,
            });
        }

        Ok(())
    }
}
