#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the top-down shooter.

mod scene;

use std::time::Instant;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use log::info;
use topdown_shooter_core::WINDOW_TITLE;
use topdown_shooter_rendering::{
    Camera, Color, FrameSimulationBreakdown, Presentation, RenderingBackend, Viewport,
};
use topdown_shooter_rendering_macroquad::MacroquadBackend;
use topdown_shooter_system_simulation::Simulation;

const WINDOW_WIDTH: f32 = 800.0;
const WINDOW_HEIGHT: f32 = 600.0;
const CAMERA_ZOOM: f32 = 1.0;

/// Command-line arguments accepted by the shooter binary.
#[derive(Debug, Parser)]
#[command(name = "topdown-shooter", about = "Top-down arena shooter")]
struct CliArgs {
    /// Log frame timing metrics once per second.
    #[arg(long)]
    show_fps: bool,
    /// Synchronise presentation with the display refresh rate.
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    vsync: bool,
    /// Default log filter; `RUST_LOG` takes precedence when set.
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,
}

/// Verbosity levels selectable from the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn as_filter(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

/// Entry point for the shooter command-line interface.
fn main() -> Result<()> {
    let args = CliArgs::parse();
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(args.log_level.as_filter()),
    )
    .init();

    let viewport = Viewport::new(WINDOW_WIDTH, WINDOW_HEIGHT).context("invalid window size")?;
    let camera = Camera::new(viewport, CAMERA_ZOOM).context("invalid camera zoom")?;

    let mut simulation = Simulation::new();
    let initial = scene::initial_scene(simulation.world(), camera);
    let presentation = Presentation::new(WINDOW_TITLE, Color::RAY_WHITE, viewport, initial);

    info!(
        "starting {WINDOW_TITLE} ({}x{}, vsync: {}, show fps: {})",
        viewport.width(),
        viewport.height(),
        args.vsync,
        args.show_fps
    );

    MacroquadBackend::new()
        .with_vsync(args.vsync)
        .with_show_fps(args.show_fps)
        .run(presentation, move |_frame_dt, input, scene| {
            let simulation_start = Instant::now();
            let _ = simulation.step(&input.player_input());
            let simulation_time = simulation_start.elapsed();

            let population_start = Instant::now();
            scene::populate_scene(simulation.world(), scene);

            FrameSimulationBreakdown {
                simulation: simulation_time,
                scene_population: population_start.elapsed(),
            }
        })
        .context("rendering backend failed")
}
