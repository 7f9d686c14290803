use std::path::PathBuf;
use thiserror::Error;

/// The main error type for boxmark operations.
#[derive(Debug, Error)]
pub enum BoxmarkError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML file not found at {}", path.display())]
    AnnotationNotFound { path: PathBuf },

    #[error("Failed to parse annotation XML {}: {message}", path.display())]
    AnnotationParse { path: PathBuf, message: String },

    #[error("Failed to process image {}: {message}", path.display())]
    ImageProcessing { path: PathBuf, message: String },
}
