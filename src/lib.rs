//! Boxmark: draw Pascal VOC bounding boxes onto images.
//!
//! Boxmark walks a directory of `.jpg` images, reads the matching VOC XML
//! annotation for each one, and writes a copy of the image with every
//! bounding box outlined. Images without an annotation, or with one that
//! cannot be parsed or drawn, are logged and skipped.
//!
//! # Modules
//!
//! - [`annotation`]: Bounding box types and the VOC XML reader
//! - [`render`]: Drawing box outlines and saving annotated images
//! - [`batch`]: The directory-level driver and its outcome report
//! - [`error`]: Error types for boxmark operations

pub mod annotation;
pub mod batch;
pub mod error;
pub mod logging;
pub mod render;

use clap::Parser;

pub use error::BoxmarkError;

/// The boxmark CLI application.
///
/// Reads images from `data/raw/`, annotations from `data/annotated/` and
/// writes annotated copies to `data/processed/`, all relative to the working
/// directory.
#[derive(Parser)]
#[command(name = "boxmark")]
#[command(version, about)]
struct Cli {
    /// Also log debug-level detail, including a summary of the run.
    #[arg(short, long)]
    verbose: bool,
}

/// Run the boxmark CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), BoxmarkError> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    batch::annotate_dir(&batch::Layout::default(), &render::BoxStyle::default())?;
    Ok(())
}
