//! instafilter: pick a photo, apply a filter, save it to a photo library.
//!
//! Two modes:
//!
//! - **One-shot** (default): open `IMAGE`, render it with the configured
//!   filter and intensity, save it, and print where it went.
//! - **Interactive** (`--interactive`): read session commands from stdin
//!   (`open`, `filter`, `intensity`, `save`, ...) and print the state
//!   after each one.
//!
//! Settings come from built-in defaults, then the optional JSON
//! `--config` file, then flags. Set `RUST_LOG` to change log verbosity.
//!
//! # Usage
//!
//! ```text
//! instafilter --filter gaussian-blur --intensity 0.3 --library ~/Pictures photo.jpg
//! instafilter --interactive
//! ```

#![allow(clippy::print_stdout, clippy::print_stderr)]

mod command;
mod config;
mod interactive;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use instafilter_core::{
    FilterKind, ImageprocBackend, PersistenceError, ProcessingError, SaveError, SaveRequest,
    Session,
};
use instafilter_io::{PhotoLibrary, SourceError, load_image};

use crate::config::{ConfigFileError, Overrides};

/// Apply a photo filter with a single intensity slider and save the result.
#[derive(Parser)]
#[command(name = "instafilter", version)]
struct Cli {
    /// Photo to open (PNG, JPEG, BMP, WebP).
    #[arg(required_unless_present = "interactive")]
    image: Option<PathBuf>,

    /// Filter to apply.
    #[arg(short, long, value_enum)]
    filter: Option<Filter>,

    /// Slider position, from 0 to 1.
    #[arg(short, long)]
    intensity: Option<f64>,

    /// Photo library directory saved images are written to.
    #[arg(short, long, value_name = "DIR")]
    library: Option<PathBuf>,

    /// JSON configuration file.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Read session commands from stdin instead of saving once.
    #[arg(long)]
    interactive: bool,
}

/// Filter choices on the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Filter {
    Edges,
    GaussianBlur,
    Pixellate,
    SepiaTone,
}

impl From<Filter> for FilterKind {
    fn from(filter: Filter) -> Self {
        match filter {
            Filter::Edges => Self::Edges,
            Filter::GaussianBlur => Self::GaussianBlur,
            Filter::Pixellate => Self::Pixellate,
            Filter::SepiaTone => Self::SepiaTone,
        }
    }
}

/// Everything that can stop a run.
#[derive(Debug, thiserror::Error)]
enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigFileError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Processing(#[from] ProcessingError),

    #[error("cannot save: {0}")]
    Save(#[from] SaveError),

    #[error("failed to save photo: {0}")]
    Persistence(#[from] PersistenceError),

    #[error("nothing was rendered to save")]
    NothingRendered,

    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), RunError> {
    let settings = config::resolve(
        cli.config.as_deref(),
        Overrides {
            filter: cli.filter.map(FilterKind::from),
            intensity: cli.intensity,
            library: cli.library,
        },
    )?;

    let library = PhotoLibrary::new(settings.library);
    let mut session = Session::new(ImageprocBackend, &library, &settings.session);

    if cli.interactive {
        if let Some(path) = &cli.image {
            session.select_image(load_image(path)?).ok();
        }
        let stdin = std::io::stdin();
        let mut stdout = std::io::stdout();
        interactive::run(&mut session, stdin.lock(), &mut stdout)?;
        return Ok(());
    }

    match &cli.image {
        Some(path) => save_once(&mut session, path),
        None => Ok(()),
    }
}

fn save_once(
    session: &mut Session<ImageprocBackend, &PhotoLibrary>,
    path: &Path,
) -> Result<(), RunError> {
    log::info!(
        "applying {} at intensity {:.2} to {}",
        session.filter(),
        session.intensity(),
        path.display()
    );
    session.select_image(load_image(path)?)?;

    match session.save()? {
        SaveRequest::Submitted => {}
        SaveRequest::NothingRendered => return Err(RunError::NothingRendered),
    }

    for outcome in session.wait_for_saves() {
        println!("{}", outcome?.location);
    }
    Ok(())
}
