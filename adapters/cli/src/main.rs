#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Headless command-line adapter that plays Tile Bomber from an input script.

mod ascii;
mod logging;
mod script;

use std::{
    fs, io,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use tile_bomber_simulation::{FrameInput, GameConfig, Simulation, Status};
use tile_bomber_world::query;

use crate::{ascii::AsciiRenderer, script::Script};

/// Command line arguments for the headless player.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML configuration file. Defaults apply when omitted.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Input script. Read from standard input when omitted.
    #[arg(long, value_name = "PATH")]
    script: Option<PathBuf>,

    /// Seed for monster movement, overriding the configuration.
    #[arg(long)]
    seed: Option<u64>,

    /// Synthetic duration of a single frame in milliseconds.
    #[arg(long, default_value_t = 50, value_name = "MS")]
    frame_ms: u64,

    /// Empty frames inserted after each scripted frame.
    #[arg(long, default_value_t = 0, value_name = "N")]
    idle_frames: usize,

    /// Only print the final report.
    #[arg(short, long)]
    quiet: bool,

    /// Print the final scene as JSON after the report.
    #[arg(long)]
    json: bool,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

/// Entry point for the Tile Bomber command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("failed to load configuration {}", path.display()))?,
        None => GameConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    let script = read_script(args.script.as_deref())?;
    info!("loaded {} scripted frames", script.len());

    let mut simulation = Simulation::new(&config).context("failed to start the session")?;
    println!("{}", query::welcome_banner(simulation.game()));

    let frame = Duration::from_millis(args.frame_ms);
    let mut renderer = AsciiRenderer::default();
    let mut now = Duration::ZERO;
    let mut status = Status::Running;
    let mut frames = 0_usize;
    for input in script.paced(args.idle_frames) {
        status = step(&mut simulation, &mut renderer, now, input, args.quiet)?;
        frames += 1;
        if status.is_finished() {
            break;
        }
        now = now.saturating_add(frame);
    }

    let scene = simulation.scene();
    if args.quiet || frames == 0 {
        println!("{}", renderer.draw(&scene));
    }
    println!("{} after {frames} frames ({} ms)", outcome(status), now.as_millis());
    if args.json {
        let json = serde_json::to_string_pretty(&scene).context("failed to encode the scene")?;
        println!("{json}");
    }
    Ok(())
}

fn read_script(path: Option<&Path>) -> Result<Script> {
    let text = match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read script {}", path.display()))?,
        None => io::read_to_string(io::stdin()).context("failed to read script from stdin")?,
    };
    Ok(Script::parse(&text))
}

fn step(
    simulation: &mut Simulation,
    renderer: &mut AsciiRenderer,
    now: Duration,
    input: FrameInput,
    quiet: bool,
) -> Result<Status> {
    let status = simulation
        .update(now, input)
        .with_context(|| format!("simulation failed at {} ms", now.as_millis()))?;
    let drawn = renderer.draw(&simulation.scene());
    if !quiet {
        println!("{drawn}\n");
    }
    simulation
        .acknowledge_render()
        .context("failed to acknowledge the rendered frame")?;
    Ok(status)
}

fn outcome(status: Status) -> &'static str {
    match status {
        Status::Running => "Script finished",
        Status::Won => "The princess is saved",
        Status::Lost => "Game over",
        Status::Quit => "Quit",
    }
}
