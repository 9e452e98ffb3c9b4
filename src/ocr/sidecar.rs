//! Precomputed detections stored next to each image.
//!
//! `shot.png` is read from `shot.png.json`, a JSON array of
//! `{"bbox": [[x, y] x4], "text": "...", "confidence": 0.9}` objects. This is
//! the shape EasyOCR prints with `detail=1`, so output from an external OCR
//! run can be fed straight into the extractor.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::{Detection, OcrEngine};

#[derive(Debug, Clone, Default)]
pub struct DetectionFileEngine;

impl DetectionFileEngine {
    pub fn new() -> Self {
        Self
    }

    /// Path of the detection file for `image`.
    pub fn sidecar_path(image: &Path) -> PathBuf {
        let mut name = image.as_os_str().to_os_string();
        name.push(".json");
        PathBuf::from(name)
    }
}

impl OcrEngine for DetectionFileEngine {
    fn detect(&self, image: &Path) -> Result<Vec<Detection>> {
        let path = Self::sidecar_path(image);
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read detections from {}", path.display()))?;
        let detections: Vec<Detection> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse detections in {}", path.display()))?;
        Ok(detections)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_sidecar_path_appends_json() {
        let path = DetectionFileEngine::sidecar_path(Path::new("shots/feed_01.png"));
        assert_eq!(path, PathBuf::from("shots/feed_01.png.json"));
    }

    #[test]
    fn test_detect_reads_sidecar() {
        let dir = tempdir().unwrap();
        let image = dir.path().join("feed.png");
        fs::write(
            DetectionFileEngine::sidecar_path(&image),
            r#"[
                {"bbox": [[0, 10], [50, 10], [50, 30], [0, 30]], "text": "User A", "confidence": 0.9},
                {"bbox": [[0, 40], [90, 40], [90, 60], [0, 60]], "text": "Hello there", "confidence": 0.8}
            ]"#,
        )
        .unwrap();

        let detections = DetectionFileEngine::new().detect(&image).unwrap();
        assert_eq!(detections.len(), 2);
        assert_eq!(detections[1].text, "Hello there");
    }

    #[test]
    fn test_detect_missing_sidecar_is_error() {
        let dir = tempdir().unwrap();
        let image = dir.path().join("feed.png");
        let err = DetectionFileEngine::new().detect(&image).unwrap_err();
        assert!(format!("{:#}", err).contains("feed.png.json"));
    }
}
