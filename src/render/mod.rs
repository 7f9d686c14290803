//! Drawing bounding boxes onto images.
//!
//! Boxes are stroked as unfilled outlines. The outer edge of the stroke runs
//! through both corners of the box (inclusive) and the stroke grows inward,
//! so a box never paints outside the rectangle it describes. Pixels that
//! fall outside the image are clipped. Inverted boxes (xmax < xmin or
//! ymax < ymin) are never reordered: they paint nothing, and
//! [`draw_boxes_on_image`] rejects them before anything is written.

use std::fs;
use std::path::Path;

use image::{ImageReader, Rgb, RgbImage};
use log::{error, info};

use crate::annotation::{AnnotationSet, BoundingBox};
use crate::error::BoxmarkError;

/// Outline color used when no other style is given.
pub const DEFAULT_BOX_COLOR: Rgb<u8> = Rgb([255, 0, 0]);

/// Outline width in pixels used when no other style is given.
pub const DEFAULT_STROKE_WIDTH: u32 = 3;

/// How box outlines are painted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoxStyle {
    /// Outline color.
    pub color: Rgb<u8>,
    /// Outline width in pixels, growing inward from the box edge.
    pub width: u32,
}

impl Default for BoxStyle {
    fn default() -> Self {
        Self {
            color: DEFAULT_BOX_COLOR,
            width: DEFAULT_STROKE_WIDTH,
        }
    }
}

/// Draw every box in `boxes` onto `image`, in order.
///
/// Later boxes paint over earlier ones where they overlap. Inverted boxes
/// are skipped.
pub fn draw_boxes(image: &mut RgbImage, boxes: &AnnotationSet, style: &BoxStyle) {
    for bbox in boxes {
        draw_box(image, bbox, style);
    }
}

/// Decode `image_path`, draw `boxes` on it and save the result to
/// `output_path`.
///
/// Missing parent directories of `output_path` are created. An existing file
/// at `output_path` is overwritten. The output encoding follows the
/// extension of `output_path`. A set containing an inverted box fails
/// without touching `output_path`.
pub fn draw_boxes_on_image(
    image_path: &Path,
    boxes: &AnnotationSet,
    output_path: &Path,
    style: &BoxStyle,
) -> Result<(), BoxmarkError> {
    let mut image = decode_rgb(image_path)?;
    check_box_order(image_path, boxes)?;
    draw_boxes(&mut image, boxes, style);

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| BoxmarkError::ImageProcessing {
                path: image_path.to_path_buf(),
                message: format!(
                    "failed to create output directory {}: {source}",
                    parent.display()
                ),
            })?;
        }
    }

    image
        .save(output_path)
        .map_err(|source| BoxmarkError::ImageProcessing {
            path: image_path.to_path_buf(),
            message: format!("failed to write {}: {source}", output_path.display()),
        })
}

/// Annotate one image, logging the outcome.
///
/// Returns `true` when the annotated copy was written.
pub fn annotate_image(
    image_path: &Path,
    boxes: &AnnotationSet,
    output_path: &Path,
    style: &BoxStyle,
) -> bool {
    match draw_boxes_on_image(image_path, boxes, output_path, style) {
        Ok(()) => {
            info!("Annotated image saved to: {}", output_path.display());
            true
        }
        Err(BoxmarkError::ImageProcessing { path, message }) => {
            error!("Error processing image {}: {}", path.display(), message);
            false
        }
        Err(other) => {
            error!("Error processing image {}: {}", image_path.display(), other);
            false
        }
    }
}

fn decode_rgb(image_path: &Path) -> Result<RgbImage, BoxmarkError> {
    let decode_error = |message: String| BoxmarkError::ImageProcessing {
        path: image_path.to_path_buf(),
        message,
    };

    // Sniff the content so a mislabelled file still decodes.
    let reader = ImageReader::open(image_path)
        .map_err(|source| decode_error(source.to_string()))?
        .with_guessed_format()
        .map_err(|source| decode_error(source.to_string()))?;
    let image = reader
        .decode()
        .map_err(|source| decode_error(source.to_string()))?;

    Ok(image.to_rgb8())
}

fn check_box_order(image_path: &Path, boxes: &AnnotationSet) -> Result<(), BoxmarkError> {
    for bbox in boxes {
        let problem = if bbox.xmax() < bbox.xmin() {
            "xmax must be greater than or equal to xmin"
        } else if bbox.ymax() < bbox.ymin() {
            "ymax must be greater than or equal to ymin"
        } else {
            continue;
        };
        return Err(BoxmarkError::ImageProcessing {
            path: image_path.to_path_buf(),
            message: format!("cannot draw {bbox:?}: {problem}"),
        });
    }
    Ok(())
}

fn draw_box(image: &mut RgbImage, bbox: &BoundingBox, style: &BoxStyle) {
    for inset in 0..i64::from(style.width) {
        let left = bbox.xmin().saturating_add(inset);
        let top = bbox.ymin().saturating_add(inset);
        let right = bbox.xmax().saturating_sub(inset);
        let bottom = bbox.ymax().saturating_sub(inset);
        if left > right || top > bottom {
            break;
        }

        fill_rect(image, left, top, right, top, style.color);
        fill_rect(image, left, bottom, right, bottom, style.color);
        fill_rect(image, left, top, left, bottom, style.color);
        fill_rect(image, right, top, right, bottom, style.color);
    }
}

/// Paint the inclusive rectangle `(x0, y0)..=(x1, y1)`, clipped to the image.
fn fill_rect(image: &mut RgbImage, x0: i64, y0: i64, x1: i64, y1: i64, color: Rgb<u8>) {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return;
    }

    let max_x = i64::from(width) - 1;
    let max_y = i64::from(height) - 1;
    if x1 < 0 || y1 < 0 || x0 > max_x || y0 > max_y {
        return;
    }

    // Clamped into 0..=max, so the casts are lossless.
    let x_start = x0.clamp(0, max_x) as u32;
    let x_end = x1.clamp(0, max_x) as u32;
    let y_start = y0.clamp(0, max_y) as u32;
    let y_end = y1.clamp(0, max_y) as u32;

    for y in y_start..=y_end {
        for x in x_start..=x_end {
            image.put_pixel(x, y, color);
        }
    }
}
