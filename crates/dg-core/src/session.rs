//! Long-lived generation session
//!
//! Holds the configuration, an in-flight run, the finished dungeon and its
//! tilemap. Resetting drops all of them, so a stale run can never write into
//! a new one.

use crate::config::GeneratorConfig;
use crate::dungeon::{Rect, Room};
use crate::error::{ConfigError, GenerationError};
use crate::generator::{Dungeon, GenerationStep, Steps};
use crate::tilemap::Tilemap;

#[derive(Default)]
pub struct DungeonSession {
    config: GeneratorConfig,
    steps: Option<Steps>,
    dungeon: Option<Dungeon>,
    tilemap: Option<Tilemap>,
}

impl DungeonSession {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            steps: None,
            dungeon: None,
            tilemap: None,
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Replace the configuration. Takes effect on the next [`reset`](Self::reset).
    pub fn set_config(&mut self, config: GeneratorConfig) {
        self.config = config;
    }

    /// Drop the current run and all results, then start a fresh run
    pub fn reset(&mut self) -> Result<(), ConfigError> {
        self.clear();
        self.steps = Some(Steps::new(&self.config)?);
        Ok(())
    }

    /// Drop the current run and all results
    pub fn clear(&mut self) {
        self.steps = None;
        self.dungeon = None;
        self.tilemap = None;
    }

    /// True while a run has steps left
    pub fn is_running(&self) -> bool {
        self.steps.is_some()
    }

    /// Advance the current run by one step.
    ///
    /// Returns `None` when no run is active. The run ends after its final
    /// step or its first error.
    pub fn step(&mut self) -> Option<Result<GenerationStep, GenerationError>> {
        let next = self.steps.as_mut()?.next();
        match &next {
            Some(Ok(GenerationStep::Complete(dungeon))) => {
                self.dungeon = Some(dungeon.as_ref().clone());
                self.steps = None;
            }
            Some(Err(_)) | None => self.steps = None,
            Some(Ok(_)) => {}
        }
        next
    }

    /// Finish the current run, starting one if none is active and nothing
    /// has been generated yet
    pub fn run(&mut self) -> Result<&Dungeon, GenerationError> {
        if self.steps.is_none() && self.dungeon.is_none() {
            self.reset()?;
        }
        while let Some(step) = self.step() {
            step?;
        }
        self.dungeon.as_ref().ok_or(GenerationError::NoRooms)
    }

    pub fn dungeon(&self) -> Option<&Dungeon> {
        self.dungeon.as_ref()
    }

    /// Rooms of the finished dungeon, empty before generation completes
    pub fn rooms(&self) -> &[Room] {
        self.dungeon.as_ref().map(Dungeon::rooms).unwrap_or(&[])
    }

    pub fn rooms_and_doors(&self) -> (Vec<Rect>, Vec<Rect>) {
        self.dungeon
            .as_ref()
            .map(Dungeon::rooms_and_doors)
            .unwrap_or_default()
    }

    /// Tilemap of the finished dungeon, built on first request
    pub fn tilemap(&mut self) -> Option<&Tilemap> {
        if self.tilemap.is_none() {
            return self.generate_tilemap();
        }
        self.tilemap.as_ref()
    }

    /// Rebuild the tilemap from the finished dungeon
    pub fn generate_tilemap(&mut self) -> Option<&Tilemap> {
        let dungeon = self.dungeon.as_ref()?;
        self.tilemap = Some(Tilemap::build(dungeon));
        self.tilemap.as_ref()
    }
}
