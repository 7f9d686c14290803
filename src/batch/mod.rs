//! Batch annotation over a directory of images.
//!
//! Every `.jpg` file in the image directory is paired with the `.xml` file of
//! the same stem in the annotation directory. Pairs are processed one at a
//! time, in directory listing order; a failure on one image is logged and
//! never stops the rest of the batch.

mod report;

pub use report::{BatchItem, BatchReport, ItemOutcome};

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::annotation::io_voc_xml::parse_annotation;
use crate::error::BoxmarkError;
use crate::render::{annotate_image, BoxStyle};

/// Directory holding the source images.
pub const IMAGE_DIR: &str = "data/raw/";
/// Directory holding one VOC XML file per image.
pub const ANNOTATION_DIR: &str = "data/annotated/";
/// Directory receiving annotated copies.
pub const OUTPUT_DIR: &str = "data/processed/";

/// Suffix an image file name must end with to be processed.
///
/// Matched case-sensitively against the whole file name, so the dot is part
/// of it.
pub const IMAGE_SUFFIX: &str = ".jpg";
/// Extension of annotation files, without the dot, as
/// [`Path::with_extension`] expects.
pub const ANNOTATION_EXTENSION: &str = "xml";
/// Prefix added to the file name of every annotated copy.
pub const OUTPUT_PREFIX: &str = "annotated_";

/// Where a batch reads images and annotations and writes its output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    pub image_dir: PathBuf,
    pub annotation_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            image_dir: PathBuf::from(IMAGE_DIR),
            annotation_dir: PathBuf::from(ANNOTATION_DIR),
            output_dir: PathBuf::from(OUTPUT_DIR),
        }
    }
}

impl Layout {
    /// The default layout resolved against `root` instead of the working
    /// directory.
    pub fn under(root: &Path) -> Self {
        Self {
            image_dir: root.join(IMAGE_DIR),
            annotation_dir: root.join(ANNOTATION_DIR),
            output_dir: root.join(OUTPUT_DIR),
        }
    }

    /// Expected annotation path for an image file name.
    ///
    /// Only the last extension is replaced: `a.b.jpg` maps to `a.b.xml`.
    pub fn annotation_path_for(&self, image_file_name: &str) -> PathBuf {
        let annotation_file = Path::new(image_file_name).with_extension(ANNOTATION_EXTENSION);
        self.annotation_dir.join(annotation_file)
    }

    /// Output path for an image file name.
    pub fn output_path_for(&self, image_file_name: &str) -> PathBuf {
        self.output_dir.join(format!("{OUTPUT_PREFIX}{image_file_name}"))
    }
}

/// List the eligible image file names in `dir`, in listing order.
///
/// Names that are not valid UTF-8 never match the image suffix and are
/// skipped.
pub fn list_images(dir: &Path) -> Result<Vec<String>, BoxmarkError> {
    let mut names = Vec::new();

    for entry in fs::read_dir(dir).map_err(BoxmarkError::Io)? {
        let entry = entry.map_err(BoxmarkError::Io)?;
        if let Some(name) = entry.file_name().to_str() {
            if name.ends_with(IMAGE_SUFFIX) {
                names.push(name.to_owned());
            }
        }
    }

    Ok(names)
}

/// Annotate every eligible image under `layout`.
///
/// Only a failure to list the image directory is returned as an error.
/// Per-image failures are logged and recorded in the report.
pub fn annotate_dir(layout: &Layout, style: &BoxStyle) -> Result<BatchReport, BoxmarkError> {
    let images = list_images(&layout.image_dir)?;
    let mut report = BatchReport::new();

    if images.is_empty() {
        info!("No images found in the raw data directory.");
        return Ok(report);
    }

    info!("Found {} images to process.", images.len());

    for file_name in images {
        let outcome = annotate_one(layout, style, &file_name);
        report.add(file_name, outcome);
    }

    debug!("{report}");
    Ok(report)
}

fn annotate_one(layout: &Layout, style: &BoxStyle, file_name: &str) -> ItemOutcome {
    let image_path = layout.image_dir.join(file_name);
    let annotation_path = layout.annotation_path_for(file_name);

    if !annotation_path.exists() {
        info!(
            "Annotation file not found for {} at {}",
            file_name,
            annotation_path.display()
        );
        return ItemOutcome::AnnotationMissing;
    }

    info!("Processing {file_name}...");

    let Some(boxes) = parse_annotation(&annotation_path) else {
        info!("Skipping {file_name} due to parsing error.");
        return ItemOutcome::ParseFailed;
    };

    let output_path = layout.output_path_for(file_name);
    if annotate_image(&image_path, &boxes, &output_path, style) {
        ItemOutcome::Annotated
    } else {
        ItemOutcome::RenderFailed
    }
}
