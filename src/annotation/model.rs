//! Parse results for one annotation file.

use super::BoundingBox;

/// The ordered boxes read from one annotation file.
///
/// Boxes keep document order. An empty set means the file was read and
/// listed no objects; a failed read is represented by the caller as `None`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AnnotationSet {
    boxes: Vec<BoundingBox>,
}

impl AnnotationSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self { boxes: Vec::new() }
    }

    /// Appends a box after all existing ones.
    pub fn push(&mut self, bbox: BoundingBox) {
        self.boxes.push(bbox);
    }

    /// Returns the boxes in document order.
    pub fn boxes(&self) -> &[BoundingBox] {
        &self.boxes
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BoundingBox> {
        self.boxes.iter()
    }
}

impl From<Vec<BoundingBox>> for AnnotationSet {
    fn from(boxes: Vec<BoundingBox>) -> Self {
        Self { boxes }
    }
}

impl FromIterator<BoundingBox> for AnnotationSet {
    fn from_iter<I: IntoIterator<Item = BoundingBox>>(iter: I) -> Self {
        Self {
            boxes: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a AnnotationSet {
    type Item = &'a BoundingBox;
    type IntoIter = std::slice::Iter<'a, BoundingBox>;

    fn into_iter(self) -> Self::IntoIter {
        self.boxes.iter()
    }
}
