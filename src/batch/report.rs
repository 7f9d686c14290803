//! Per-run outcome tracking for batch annotation.

use std::fmt;

/// What happened to one eligible image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemOutcome {
    /// No annotation file exists for the image; the parser was not called.
    AnnotationMissing,
    /// The annotation file could not be parsed.
    ParseFailed,
    /// The image could not be decoded or the annotated copy not written.
    RenderFailed,
    /// The annotated copy was written.
    Annotated,
}

impl fmt::Display for ItemOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ItemOutcome::AnnotationMissing => "annotation missing",
            ItemOutcome::ParseFailed => "parse failed",
            ItemOutcome::RenderFailed => "render failed",
            ItemOutcome::Annotated => "annotated",
        };
        f.write_str(label)
    }
}

/// One processed image and its outcome.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchItem {
    /// Image file name as listed in the image directory.
    pub file_name: String,
    pub outcome: ItemOutcome,
}

/// The result of one batch run, in processing order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub items: Vec<BatchItem>,
}

impl BatchReport {
    /// Creates a new empty report.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Records the outcome for one image.
    pub fn add(&mut self, file_name: impl Into<String>, outcome: ItemOutcome) {
        self.items.push(BatchItem {
            file_name: file_name.into(),
            outcome,
        });
    }

    /// Number of images processed.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if no eligible images were found.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of images with the given outcome.
    pub fn count(&self, outcome: ItemOutcome) -> usize {
        self.items
            .iter()
            .filter(|item| item.outcome == outcome)
            .count()
    }

    /// Outcome recorded for `file_name`, if it was processed.
    pub fn outcome_of(&self, file_name: &str) -> Option<ItemOutcome> {
        self.items
            .iter()
            .find(|item| item.file_name == file_name)
            .map(|item| item.outcome)
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Processed {} image(s): {} annotated, {} without annotation, {} parse error(s), {} render error(s)",
            self.len(),
            self.count(ItemOutcome::Annotated),
            self.count(ItemOutcome::AnnotationMissing),
            self.count(ItemOutcome::ParseFailed),
            self.count(ItemOutcome::RenderFailed),
        )
    }
}
