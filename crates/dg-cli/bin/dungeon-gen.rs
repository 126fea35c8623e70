//! BSP dungeon generator
//!
//! Generates a layout from a JSON config and/or flags and prints it as
//! ASCII, marching-squares codes or JSON.

use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;
use std::time::Duration;

use clap::Parser;

use dg_cli::{CliError, logger, render};
use dg_core::{DungeonSession, GenerationError, GeneratorConfig, Pacing};

/// Default pause between steps when `--stepwise` is given without `--delay-ms`
const DEFAULT_DELAY_MS: u64 = 100;

/// BSP dungeon generator
#[derive(Parser, Debug)]
#[command(name = "dungeon-gen")]
#[command(author, version, about = "Generate a BSP dungeon layout", long_about = None)]
struct Args {
    /// JSON config file; missing fields use the defaults
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Random seed
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// Dungeon width in tiles
    #[arg(short = 'W', long = "width")]
    width: Option<i32>,

    /// Dungeon height in tiles
    #[arg(short = 'H', long = "height")]
    height: Option<i32>,

    /// Print every generation step, pausing in between
    #[arg(long = "stepwise")]
    stepwise: bool,

    /// Pause between steps in milliseconds
    #[arg(long = "delay-ms")]
    delay_ms: Option<u64>,

    /// Also print the marching-squares code grid
    #[arg(long = "codes")]
    codes: bool,

    /// Print the dungeon as JSON instead of a map
    #[arg(long = "json")]
    json: bool,

    /// Debug logging
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

impl Args {
    fn apply(&self, config: &mut GeneratorConfig) {
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(width) = self.width {
            config.bounds.width = width;
        }
        if let Some(height) = self.height {
            config.bounds.height = height;
        }

        let current_delay = match config.pacing {
            Pacing::Stepwise { delay_ms } => Some(delay_ms),
            Pacing::Fast => None,
        };
        if self.stepwise || current_delay.is_some() {
            let delay_ms = self
                .delay_ms
                .or(current_delay)
                .unwrap_or(DEFAULT_DELAY_MS);
            config.pacing = Pacing::Stepwise { delay_ms };
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(err) = logger::init(args.verbose) {
        eprintln!("failed to install logger: {}", err);
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), CliError> {
    let mut config = match &args.config {
        Some(path) => GeneratorConfig::from_path(path)?,
        None => GeneratorConfig::default(),
    };
    args.apply(&mut config);

    let delay = match config.pacing {
        Pacing::Stepwise { delay_ms } => Some(Duration::from_millis(delay_ms)),
        Pacing::Fast => None,
    };

    let mut session = DungeonSession::new(config);
    session.reset()?;
    while let Some(step) = session.step() {
        let step = step?;
        if let Some(delay) = delay {
            println!("{}", render::describe_step(&step));
            thread::sleep(delay);
        }
    }

    if args.json {
        let dungeon = session.dungeon().ok_or(GenerationError::NoRooms)?;
        println!("{}", serde_json::to_string_pretty(dungeon)?);
        return Ok(());
    }

    let tilemap = session.tilemap().ok_or(GenerationError::NoRooms)?;
    print!("{}", render::render_map(tilemap));
    println!("{}", render::legend());
    if args.codes {
        println!();
        print!("{}", tilemap.codes);
    }
    Ok(())
}
