//! OCR engine boundary.
//!
//! The comment extractor never talks to an OCR backend directly. It consumes
//! [`Detection`]s produced by any [`OcrEngine`], which callers construct
//! explicitly and pass in.

pub mod engine;
pub mod preprocess;
pub mod setup;
pub mod sidecar;

pub use engine::TesseractEngine;
pub use preprocess::{is_supported_image, SUPPORTED_EXTENSIONS};
pub use sidecar::DetectionFileEngine;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Four corner points of a detection, each `[x, y]`.
pub type Polygon = [[f64; 2]; 4];

/// One text region reported by an OCR engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Bounding polygon in image pixel coordinates
    pub bbox: Polygon,
    /// Recognized text, untrimmed
    pub text: String,
    /// Recognition confidence in [0, 1]
    pub confidence: f64,
}

impl Detection {
    pub fn new(bbox: Polygon, text: impl Into<String>, confidence: f64) -> Self {
        Self {
            bbox,
            text: text.into(),
            confidence,
        }
    }

    /// Builds an axis-aligned detection from a top-left corner and size.
    pub fn from_rect(left: f64, top: f64, width: f64, height: f64, text: impl Into<String>, confidence: f64) -> Self {
        let right = left + width;
        let bottom = top + height;
        Self::new(
            [[left, top], [right, top], [right, bottom], [left, bottom]],
            text,
            confidence,
        )
    }
}

/// Anything that turns an image on disk into text detections.
///
/// Detection order is not significant; the extractor re-sorts by position.
pub trait OcrEngine {
    fn detect(&self, image: &Path) -> Result<Vec<Detection>>;
}

impl<E: OcrEngine + ?Sized> OcrEngine for Box<E> {
    fn detect(&self, image: &Path) -> Result<Vec<Detection>> {
        (**self).detect(image)
    }
}
