use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use log::{error, info};
use std::path::PathBuf;

use framestep::console::{Console, StdConsole};
use framestep::display::{HighguiDisplay, OverlayStyle};
use framestep::player::PlaybackController;
use framestep::source::OpenCvFrameSource;
use framestep::utils::config::Config;

/// framestep - a minimal interactive video frame browser
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Video file to browse
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Use an explicit configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Load configuration
    let config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    // Initialize logging; --debug wins over the configured level
    let log_level = if args.debug {
        "debug"
    } else {
        config.general.log_level.as_str()
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level))
        .format_timestamp_millis()
        .init();

    info!("Starting framestep v{}", env!("CARGO_PKG_VERSION"));

    let mut console = StdConsole::new();

    // Take the file from the CLI, or prompt for one
    let path = match args.file {
        Some(path) => path,
        None => {
            let entry = console.read_line("Enter video file path: ")?;
            PathBuf::from(entry)
        }
    };

    // Build the controller and load the file
    let mut controller =
        PlaybackController::new(OpenCvFrameSource::new(), config.playback.fallback_fps);
    if let Err(e) = controller.load(&path) {
        error!("Failed to load video {}: {}", path.display(), e);
        std::process::exit(1);
    }

    // Run the interactive session
    let style = OverlayStyle::from_config(&config.overlay)?;
    let mut display = HighguiDisplay::new(&config.window.title, style);
    controller.run_event_loop(&mut display, &mut console)?;

    Ok(())
}
