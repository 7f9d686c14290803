//! Pascal VOC XML box reader.
//!
//! Only the geometry is read: every direct `<object>` child of the root
//! element must carry a `<bndbox>` with integer `<xmin>`, `<ymin>`, `<xmax>`
//! and `<ymax>` leaves. Everything else in the document (`<filename>`,
//! `<size>`, `<name>`, `<pose>`, ...) is ignored. Elements are matched by
//! local name without a namespace, so a namespaced `<object>` does not
//! count.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::error;
use roxmltree::Node;

use super::{AnnotationSet, BoundingBox};
use crate::error::BoxmarkError;

/// Read the boxes of one VOC annotation file, in document order.
pub fn read_voc_boxes(path: &Path) -> Result<AnnotationSet, BoxmarkError> {
    let bytes = fs::read(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => BoxmarkError::AnnotationNotFound {
            path: path.to_path_buf(),
        },
        _ => BoxmarkError::AnnotationParse {
            path: path.to_path_buf(),
            message: source.to_string(),
        },
    })?;
    parse_voc_slice(&bytes, path)
}

/// Read one annotation file, logging any failure.
///
/// Returns `None` when the file is missing or unreadable, so callers can
/// tell "no boxes" (an empty set) apart from "could not parse".
pub fn parse_annotation(path: &Path) -> Option<AnnotationSet> {
    match read_voc_boxes(path) {
        Ok(set) => Some(set),
        Err(BoxmarkError::AnnotationNotFound { path }) => {
            error!("Error: XML file not found at {}", path.display());
            None
        }
        Err(BoxmarkError::AnnotationParse { path, message }) => {
            error!("Error parsing XML file {}: {}", path.display(), message);
            None
        }
        Err(other) => {
            error!("Error parsing XML file {}: {}", path.display(), other);
            None
        }
    }
}

/// Parse VOC XML from a UTF-8 string.
pub fn from_voc_xml_str(xml: &str) -> Result<AnnotationSet, BoxmarkError> {
    parse_voc_xml_str(xml, Path::new("<memory>"))
}

/// Parse VOC XML from bytes.
///
/// The input must be valid UTF-8.
pub fn from_voc_xml_slice(bytes: &[u8]) -> Result<AnnotationSet, BoxmarkError> {
    parse_voc_slice(bytes, Path::new("<memory>"))
}

fn parse_voc_slice(bytes: &[u8], path: &Path) -> Result<AnnotationSet, BoxmarkError> {
    let xml = std::str::from_utf8(bytes).map_err(|source| BoxmarkError::AnnotationParse {
        path: path.to_path_buf(),
        message: format!("input is not valid UTF-8: {source}"),
    })?;
    parse_voc_xml_str(xml, path)
}

fn parse_voc_xml_str(xml: &str, path: &Path) -> Result<AnnotationSet, BoxmarkError> {
    let mut options = roxmltree::ParsingOptions::default();
    options.allow_dtd = true;
    let document = roxmltree::Document::parse_with_options(xml, options).map_err(|source| {
        BoxmarkError::AnnotationParse {
            path: path.to_path_buf(),
            message: source.to_string(),
        }
    })?;

    let root = document.root_element();
    let mut boxes = AnnotationSet::new();

    for object in root.children().filter(|node| is_plain_element(*node, "object")) {
        let bndbox = required_child_element(object, "bndbox", path, "<object>")?;

        let xmin = parse_required_i64(bndbox, "xmin", path, "<bndbox>")?;
        let ymin = parse_required_i64(bndbox, "ymin", path, "<bndbox>")?;
        let xmax = parse_required_i64(bndbox, "xmax", path, "<bndbox>")?;
        let ymax = parse_required_i64(bndbox, "ymax", path, "<bndbox>")?;

        boxes.push(BoundingBox::from_xyxy(xmin, ymin, xmax, ymax));
    }

    Ok(boxes)
}

fn parse_error(path: &Path, message: String) -> BoxmarkError {
    BoxmarkError::AnnotationParse {
        path: PathBuf::from(path),
        message,
    }
}

fn required_child_element<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &str,
    path: &Path,
    context: &str,
) -> Result<Node<'a, 'input>, BoxmarkError> {
    child_element(node, tag)
        .ok_or_else(|| parse_error(path, format!("missing <{tag}> in {context}")))
}

fn parse_required_i64(
    node: Node<'_, '_>,
    tag: &str,
    path: &Path,
    context: &str,
) -> Result<i64, BoxmarkError> {
    let raw = optional_child_text(node, tag)
        .ok_or_else(|| parse_error(path, format!("missing <{tag}> in {context}")))?;
    raw.parse::<i64>().map_err(|_| {
        parse_error(
            path,
            format!("invalid <{tag}> value '{raw}' in {context}; expected integer"),
        )
    })
}

fn child_element<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|child| is_plain_element(*child, tag))
}

fn is_plain_element(node: Node<'_, '_>, tag: &str) -> bool {
    node.is_element() && node.tag_name().namespace().is_none() && node.tag_name().name() == tag
}

fn optional_child_text<'a>(node: Node<'a, '_>, tag: &str) -> Option<&'a str> {
    child_element(node, tag)
        .and_then(|child| child.text())
        .map(str::trim)
        .filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Per-thread record of log messages, so parallel tests stay isolated.
    mod captured_log {
        use std::cell::RefCell;
        use std::sync::Once;

        use log::{LevelFilter, Log, Metadata, Record};

        thread_local! {
            static LINES: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
        }

        struct CapturingLogger;

        impl Log for CapturingLogger {
            fn enabled(&self, _metadata: &Metadata) -> bool {
                true
            }

            fn log(&self, record: &Record) {
                LINES.with(|lines| lines.borrow_mut().push(record.args().to_string()));
            }

            fn flush(&self) {}
        }

        static LOGGER: CapturingLogger = CapturingLogger;
        static INSTALL: Once = Once::new();

        /// Install the logger (once per process) and clear this thread's lines.
        pub fn start() {
            INSTALL.call_once(|| {
                log::set_logger(&LOGGER).expect("no other logger installed");
                log::set_max_level(LevelFilter::Trace);
            });
            LINES.with(|lines| lines.borrow_mut().clear());
        }

        pub fn lines() -> Vec<String> {
            LINES.with(|lines| lines.borrow().clone())
        }
    }

    const TWO_OBJECTS: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<annotation>
  <filename>img1.jpg</filename>
  <size>
    <width>640</width>
    <height>480</height>
    <depth>3</depth>
  </size>
  <object>
    <name>cat</name>
    <pose>Unspecified</pose>
    <bndbox>
      <xmin>10</xmin>
      <ymin>20</ymin>
      <xmax>30</xmax>
      <ymax>40</ymax>
    </bndbox>
  </object>
  <object>
    <name>dog</name>
    <bndbox>
      <ymax> 8 </ymax>
      <xmax>7</xmax>
      <ymin>6</ymin>
      <xmin>5</xmin>
    </bndbox>
  </object>
</annotation>"#;

    fn parse_message(err: BoxmarkError) -> String {
        match err {
            BoxmarkError::AnnotationParse { message, .. } => message,
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn parses_boxes_in_document_order() {
        let set = parse_voc_xml_str(TWO_OBJECTS, Path::new("sample.xml")).expect("parse xml");
        assert_eq!(
            set.boxes(),
            &[
                BoundingBox::from_xyxy(10, 20, 30, 40),
                BoundingBox::from_xyxy(5, 6, 7, 8),
            ]
        );
    }

    #[test]
    fn no_objects_yields_empty_set() {
        let xml = "<annotation><filename>a.jpg</filename></annotation>";
        let set = from_voc_xml_str(xml).expect("parse xml");
        assert!(set.is_empty());
    }

    #[test]
    fn root_element_name_is_not_checked() {
        let xml = "<doc><object><bndbox><xmin>1</xmin><ymin>2</ymin><xmax>3</xmax><ymax>4</ymax></bndbox></object></doc>";
        let set = from_voc_xml_str(xml).expect("parse xml");
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn namespaced_elements_are_ignored() {
        let xml = r#"<annotation xmlns:v="urn:voc">
  <v:object><bndbox><xmin>1</xmin><ymin>2</ymin><xmax>3</xmax><ymax>4</ymax></bndbox></v:object>
  <object xmlns="urn:voc"><bndbox><xmin>1</xmin><ymin>2</ymin><xmax>3</xmax><ymax>4</ymax></bndbox></object>
</annotation>"#;
        let set = from_voc_xml_str(xml).expect("parse xml");
        assert!(set.is_empty());

        let xml = r#"<annotation xmlns:v="urn:voc"><object><v:bndbox><xmin>1</xmin></v:bndbox></object></annotation>"#;
        let message = parse_message(from_voc_xml_str(xml).unwrap_err());
        assert_eq!(message, "missing <bndbox> in <object>");
    }

    #[test]
    fn nested_objects_are_ignored() {
        let xml = "<annotation><part><object><bndbox><xmin>1</xmin></bndbox></object></part></annotation>";
        let set = from_voc_xml_str(xml).expect("parse xml");
        assert!(set.is_empty());
    }

    #[test]
    fn inverted_and_negative_values_are_kept() {
        let xml = "<annotation><object><bndbox><xmin>90</xmin><ymin>-4</ymin><xmax>+10</xmax><ymax>3</ymax></bndbox></object></annotation>";
        let set = from_voc_xml_str(xml).expect("parse xml");
        assert_eq!(set.boxes(), &[BoundingBox::from_xyxy(90, -4, 10, 3)]);
    }

    #[test]
    fn missing_coordinate_is_an_error() {
        let xml = "<annotation><object><bndbox><xmin>1</xmin><ymin>2</ymin><ymax>4</ymax></bndbox></object></annotation>";
        let message = parse_message(from_voc_xml_str(xml).unwrap_err());
        assert_eq!(message, "missing <xmax> in <bndbox>");
    }

    #[test]
    fn empty_coordinate_is_an_error() {
        let xml = "<annotation><object><bndbox><xmin>1</xmin><ymin>2</ymin><xmax> </xmax><ymax>4</ymax></bndbox></object></annotation>";
        let message = parse_message(from_voc_xml_str(xml).unwrap_err());
        assert!(message.contains("<xmax>"));
    }

    #[test]
    fn missing_bndbox_is_an_error() {
        let xml = "<annotation><object><name>cat</name></object></annotation>";
        let message = parse_message(from_voc_xml_str(xml).unwrap_err());
        assert_eq!(message, "missing <bndbox> in <object>");
    }

    #[test]
    fn non_integer_coordinate_is_an_error() {
        let xml = "<annotation><object><bndbox><xmin>1.5</xmin><ymin>2</ymin><xmax>3</xmax><ymax>4</ymax></bndbox></object></annotation>";
        let message = parse_message(from_voc_xml_str(xml).unwrap_err());
        assert!(message.contains("'1.5'"));
        assert!(message.contains("expected integer"));
    }

    #[test]
    fn malformed_xml_is_an_error() {
        let err = from_voc_xml_str("<annotation><object>").unwrap_err();
        assert!(matches!(err, BoxmarkError::AnnotationParse { .. }));
    }

    #[test]
    fn invalid_utf8_is_an_error() {
        let message = parse_message(from_voc_xml_slice(&[0x3c, 0xff, 0xfe]).unwrap_err());
        assert!(message.starts_with("input is not valid UTF-8"));
    }

    #[test]
    fn doctype_is_accepted() {
        let xml = "<?xml version=\"1.0\"?><!DOCTYPE annotation><annotation></annotation>";
        assert!(from_voc_xml_str(xml).expect("parse xml").is_empty());
    }

    #[test]
    fn missing_file_is_reported_as_not_found() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let path = temp.path().join("absent.xml");

        let err = read_voc_boxes(&path).unwrap_err();
        assert!(matches!(err, BoxmarkError::AnnotationNotFound { path: ref p } if *p == path));

        captured_log::start();
        assert!(parse_annotation(&path).is_none());
        assert_eq!(
            captured_log::lines(),
            vec![format!("Error: XML file not found at {}", path.display())]
        );
    }

    #[test]
    fn parse_error_carries_file_path() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let path = temp.path().join("broken.xml");
        fs::write(&path, "<annotation><object>").expect("write xml");

        let err = read_voc_boxes(&path).unwrap_err();
        assert!(err.to_string().contains("broken.xml"));

        captured_log::start();
        assert!(parse_annotation(&path).is_none());
        let lines = captured_log::lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("Error parsing XML file "));
        assert!(lines[0].contains("broken.xml"));
    }

    #[test]
    fn parse_annotation_returns_empty_set_not_none() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let path = temp.path().join("empty.xml");
        fs::write(&path, "<annotation/>").expect("write xml");

        captured_log::start();
        assert_eq!(parse_annotation(&path), Some(AnnotationSet::new()));
        assert!(captured_log::lines().is_empty());
    }
}
