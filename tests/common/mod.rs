#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};

pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// Directories of the fixed layout under `root`, created empty.
pub struct Workspace {
    pub raw: PathBuf,
    pub annotated: PathBuf,
    pub processed: PathBuf,
}

pub fn workspace(root: &Path) -> Workspace {
    let ws = Workspace {
        raw: root.join("data/raw"),
        annotated: root.join("data/annotated"),
        processed: root.join("data/processed"),
    };
    fs::create_dir_all(&ws.raw).expect("create raw dir");
    fs::create_dir_all(&ws.annotated).expect("create annotated dir");
    ws
}

pub fn write_jpg(path: &Path, width: u32, height: u32) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    RgbImage::from_pixel(width, height, WHITE)
        .save(path)
        .expect("write jpg file");
}

/// Render a VOC document with one `<object>` per box.
pub fn voc_xml(boxes: &[(i64, i64, i64, i64)]) -> String {
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<annotation>\n");
    xml.push_str("  <folder>raw</folder>\n  <filename>image.jpg</filename>\n");
    for (xmin, ymin, xmax, ymax) in boxes {
        xml.push_str(&format!(
            "  <object>\n    <name>thing</name>\n    <bndbox>\n      <xmin>{xmin}</xmin>\n      <ymin>{ymin}</ymin>\n      <xmax>{xmax}</xmax>\n      <ymax>{ymax}</ymax>\n    </bndbox>\n  </object>\n"
        ));
    }
    xml.push_str("</annotation>\n");
    xml
}

pub fn write_voc(path: &Path, boxes: &[(i64, i64, i64, i64)]) {
    fs::write(path, voc_xml(boxes)).expect("write xml file");
}

/// True if the pixel reads as red after lossy JPEG encoding.
pub fn is_reddish(pixel: &Rgb<u8>) -> bool {
    let [r, g, b] = pixel.0;
    r > 170 && g < 120 && b < 120
}

/// True if the pixel reads as white after lossy JPEG encoding.
pub fn is_whiteish(pixel: &Rgb<u8>) -> bool {
    pixel.0.iter().all(|channel| *channel > 200)
}
