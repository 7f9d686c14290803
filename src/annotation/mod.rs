//! Annotation types and the Pascal VOC XML reader.
//!
//! Boxes are kept in integer pixel space exactly as the annotation file
//! states them. Construction is permissive: inverted or out-of-image boxes
//! are representable, and drawing decides how to clip them.
//!
//! # Example
//!
//! ```
//! use boxmark::annotation::io_voc_xml::from_voc_xml_str;
//! use boxmark::annotation::BoundingBox;
//!
//! let set = from_voc_xml_str(
//!     "<annotation><object><bndbox>\
//!      <xmin>10</xmin><ymin>20</ymin><xmax>100</xmax><ymax>120</ymax>\
//!      </bndbox></object></annotation>",
//! )
//! .unwrap();
//! assert_eq!(set.boxes(), &[BoundingBox::from_xyxy(10, 20, 100, 120)]);
//! ```

mod bbox;
pub mod io_voc_xml;
mod model;

// Re-export core types for convenient access
pub use bbox::BoundingBox;
pub use model::AnnotationSet;
