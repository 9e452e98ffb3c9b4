use std::path::PathBuf;
use thiserror::Error;

/// Conditions that abort a whole run.
#[derive(Debug, Error)]
pub enum SamplerError {
    #[error("No valid images provided.")]
    NoValidImages,
    #[error("No comments extracted from the provided images.")]
    NoComments,
    #[error("OCR failed for {}: {message}", .image.display())]
    Ocr { image: PathBuf, message: String },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
