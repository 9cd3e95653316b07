/// QuatViz Terminal - Shuttle rotation with protractor rings
///
/// Controls:
///   - W/S or Up/Down: x angle
///   - A/D or Left/Right: y angle
///   - E/R: z angle
///   - 0: Reset
///   - Q/ESC: Quit
use clap::Parser;
use quatviz_core::config::{DEFAULT_RING_SEGMENTS, DEFAULT_STEP_DEGREES};
use quatviz_core::{Axis, Mesh, VisualizationConfig};
use quatviz_terminal::{to_io_error, TerminalApp};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Shuttle length in scene units
const SHUTTLE_LENGTH: f32 = 100.0;

#[derive(Parser, Debug)]
#[command(version, about = "Interactive Euler rotation visualizer with protractor rings")]
struct Args {
    /// Initial x rotation in degrees
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    x: f32,

    /// Initial y rotation in degrees
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    y: f32,

    /// Initial z rotation in degrees
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    z: f32,

    /// Angular segments per protractor ring
    #[arg(long, default_value_t = DEFAULT_RING_SEGMENTS)]
    segments: u32,

    /// Degrees per key press
    #[arg(long, default_value_t = DEFAULT_STEP_DEGREES)]
    step: f32,

    /// Frame rate cap
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Write logs here (filtered by RUST_LOG); the screen is in raw mode
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> io::Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }

    let config = VisualizationConfig {
        segments: args.segments,
        step_degrees: args.step,
        ..VisualizationConfig::default()
    };
    tracing::info!(?config, "starting terminal visualizer");

    let shuttle = Mesh::shuttle(SHUTTLE_LENGTH);
    let mut app = TerminalApp::new(shuttle, config, args.fps)?;

    let visualization = app.visualization_mut();
    for (axis, degrees) in Axis::ALL.into_iter().zip([args.x, args.y, args.z]) {
        visualization.set_angle(axis, degrees).map_err(to_io_error)?;
    }

    app.run()?;

    tracing::info!("visualizer closed");
    Ok(())
}
