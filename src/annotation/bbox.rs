//! Integer bounding boxes in pixel space.

/// An axis-aligned bounding box in XYXY format (xmin, ymin, xmax, ymax).
///
/// Coordinates are integer pixel positions in source-image space, with the
/// origin at the top-left corner.
///
/// Note: This type does NOT enforce that min <= max. Annotation values are
/// carried exactly as written; the renderer refuses inverted boxes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BoundingBox {
    xmin: i64,
    ymin: i64,
    xmax: i64,
    ymax: i64,
}

impl BoundingBox {
    /// Creates a new bounding box from explicit coordinates.
    #[inline]
    pub fn from_xyxy(xmin: i64, ymin: i64, xmax: i64, ymax: i64) -> Self {
        Self {
            xmin,
            ymin,
            xmax,
            ymax,
        }
    }

    /// Returns the left edge.
    #[inline]
    pub fn xmin(&self) -> i64 {
        self.xmin
    }

    /// Returns the top edge.
    #[inline]
    pub fn ymin(&self) -> i64 {
        self.ymin
    }

    /// Returns the right edge.
    #[inline]
    pub fn xmax(&self) -> i64 {
        self.xmax
    }

    /// Returns the bottom edge.
    #[inline]
    pub fn ymax(&self) -> i64 {
        self.ymax
    }

    /// Returns true if the box is properly ordered (min <= max for both axes).
    #[inline]
    pub fn is_ordered(&self) -> bool {
        self.xmin <= self.xmax && self.ymin <= self.ymax
    }
}

impl std::fmt::Debug for BoundingBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundingBox")
            .field("xmin", &self.xmin)
            .field("ymin", &self.ymin)
            .field("xmax", &self.xmax)
            .field("ymax", &self.ymax)
            .finish()
    }
}
