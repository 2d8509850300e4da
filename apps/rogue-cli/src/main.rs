mod demo;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use rogue_common::{Axis, Point};
use rogue_input::HeadlessWindow;
use rogue_kernel::{ClientConfig, GameClient, ScriptedClock};
use rogue_render::TextRenderer;

use crate::demo::{Wanderer, jitter_frames};

#[derive(Parser)]
#[command(name = "rogue-cli", about = "Run and replay the fixed-timestep game loop headless")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print crate versions and the default loop configuration
    Info,
    /// Run the demo game on the wall clock for a number of frames
    Run {
        /// Frames to run before the window quits
        #[arg(short, long, default_value = "120")]
        frames: u64,
        /// Simulation updates per second (overrides the config file)
        #[arg(long)]
        hz: Option<u32>,
        /// JSON client config
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Stop from inside the game after this many simulation steps
        #[arg(long)]
        max_steps: Option<u64>,
    },
    /// Replay scripted frame times and report what each frame did
    Replay {
        /// Simulation updates per second
        #[arg(long, default_value = "50")]
        hz: u32,
        /// Comma-separated frame times in milliseconds
        #[arg(long, value_delimiter = ',', conflicts_with = "jitter")]
        frames_ms: Vec<i64>,
        /// Generate frame times from this seed instead
        #[arg(long)]
        jitter: Option<u64>,
        /// Number of generated frames
        #[arg(long, default_value = "1000")]
        count: usize,
        /// Print per-frame reports as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show how row/col/depth map onto x/y/z for an orientation axis
    Point {
        /// Orientation axis: 0 = x, 1 = y, 2 = z
        #[arg(short, long, default_value = "2")]
        axis: usize,
        #[arg(allow_hyphen_values = true)]
        row: i32,
        #[arg(allow_hyphen_values = true)]
        col: i32,
        #[arg(allow_hyphen_values = true)]
        depth: i32,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Info => {
            println!("rogue-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", rogue_common::crate_info());
            println!("kernel: {}", rogue_kernel::crate_info());
            println!("input: {}", rogue_input::crate_info());
            println!("render: {}", rogue_render::crate_info());
            let defaults = ClientConfig::default();
            println!(
                "defaults: {}",
                serde_json::to_string_pretty(&defaults).context("serialize defaults")?
            );
        }
        Commands::Run {
            frames,
            hz,
            config,
            max_steps,
        } => {
            let mut cfg = match config {
                Some(path) => ClientConfig::load(&path)
                    .with_context(|| format!("load config {}", path.display()))?,
                None => ClientConfig::default(),
            };
            if let Some(hz) = hz {
                cfg.update_frequency = hz;
            }

            let mut window = HeadlessWindow::new(640, 480).with_frame_limit(frames);
            let mut renderer = TextRenderer::new();
            let mut client = GameClient::new(&mut window, &mut renderer).with_config(&cfg)?;
            let mut game = Wanderer::new(Axis::Z, 8);
            if let Some(steps) = max_steps {
                game = game.with_max_steps(steps);
            }

            let status = client.run(&mut game);
            let stats = client.stats();
            drop(client);

            println!(
                "frames={} updates={} slow={} clamped={} sleeps={} simulation_time={}",
                stats.frames,
                stats.updates,
                stats.slow_frames,
                stats.clamped_frames,
                stats.sleeps,
                stats.simulation_time
            );
            print!("{}", renderer.summary());
            println!("steps={} final cell: {}", game.steps(), game.cell());
            return Ok(status.into());
        }
        Commands::Replay {
            hz,
            frames_ms,
            jitter,
            count,
            json,
        } => {
            let cfg = ClientConfig {
                update_frequency: hz,
                ..ClientConfig::default()
            };
            let frames = match jitter {
                Some(seed) => jitter_frames(seed, count),
                None => frames_ms,
            };
            anyhow::ensure!(!frames.is_empty(), "no frames to replay");

            let mut window = HeadlessWindow::new(640, 480).with_frame_limit(frames.len() as u64);
            let mut renderer = TextRenderer::new();
            let mut client =
                GameClient::with_clock(&mut window, &mut renderer, ScriptedClock::from_millis(&frames))
                    .with_config(&cfg)
                    .context("invalid --hz")?;
            let mut game = Wanderer::new(Axis::Z, 8);

            let status = client.run(&mut game);
            let stats = client.stats();

            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(game.frames()).context("serialize frames")?
                );
            } else {
                for (report, ms) in game.frames().iter().zip(&frames) {
                    println!(
                        "frame {:>4}  dt={:>4}ms  updates={}  sim={}  interp={:.3}  slow={}  cell={}",
                        report.frame,
                        ms,
                        report.updates,
                        report.simulation_time,
                        report.interpolation,
                        report.running_slowly,
                        report.cell
                    );
                }
                println!(
                    "total: frames={} updates={} clamped={} simulation_time={}",
                    stats.frames, stats.updates, stats.clamped_frames, stats.simulation_time
                );
            }
            return Ok(status.into());
        }
        Commands::Point {
            axis,
            row,
            col,
            depth,
        } => {
            let orientation = Axis::try_from(axis)?;
            let p = Point::on(orientation, row, col, depth);
            println!("oriented on {orientation}: {p}");
            for view in Axis::ALL {
                println!(
                    "  viewed along {view}: row={} col={} depth={}",
                    p.row(view),
                    p.col(view),
                    p.depth(view)
                );
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
