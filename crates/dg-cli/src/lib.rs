//! dg-cli: terminal front end for dg-core
//!
//! Provides the stderr logger and the text renderers used by the
//! `dungeon-gen` binary.

pub mod logger;
pub mod render;

use dg_core::{ConfigError, GenerationError};
use thiserror::Error;

/// Anything that stops the binary
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error("failed to encode dungeon: {0}")]
    Json(#[from] serde_json::Error),
}
