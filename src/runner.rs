//! Multi-image orchestration.
//!
//! Images are processed strictly in the order given. That order decides which
//! duplicate survives deduplication, so it is never changed here.

use log::{info, warn};
use std::path::{Path, PathBuf};

use crate::comments::{CommentEntry, CommentExtractor};
use crate::dedup::deduplicate;
use crate::error::SamplerError;
use crate::ocr::{is_supported_image, OcrEngine};

/// Outcome of processing a batch of screenshots.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    /// Deduplicated entries in first-appearance order
    pub entries: Vec<CommentEntry>,
    /// Entry count before deduplication
    pub total_extracted: usize,
    /// Images that were read but produced no comments
    pub empty_images: Vec<PathBuf>,
    /// Inputs skipped because they were missing or not a supported image
    pub skipped_images: Vec<PathBuf>,
}

/// Splits inputs into (usable, skipped), keeping the input order.
pub fn select_images(paths: &[PathBuf]) -> (Vec<PathBuf>, Vec<PathBuf>) {
    let mut usable = Vec::new();
    let mut skipped = Vec::new();

    for path in paths {
        if !path.exists() {
            warn!("missing image skipped: {}", path.display());
            skipped.push(path.clone());
        } else if !is_supported_image(path) {
            warn!("unsupported image type skipped: {}", path.display());
            skipped.push(path.clone());
        } else {
            usable.push(path.clone());
        }
    }

    (usable, skipped)
}

/// The identifier recorded as `source_image`: the file name.
pub fn source_image_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Runs OCR and extraction over every usable image, then deduplicates.
///
/// Fails when no image is usable, when the engine fails on an image, or when
/// nothing at all was extracted.
pub fn run<E: OcrEngine + ?Sized>(
    images: &[PathBuf],
    engine: &E,
    extractor: &CommentExtractor,
) -> Result<RunReport, SamplerError> {
    let (usable, skipped_images) = select_images(images);
    if usable.is_empty() {
        return Err(SamplerError::NoValidImages);
    }

    let mut all_comments = Vec::new();
    let mut empty_images = Vec::new();

    for (idx, image) in usable.iter().enumerate() {
        info!("[{}/{}] {}", idx + 1, usable.len(), image.display());

        let detections = engine.detect(image).map_err(|e| SamplerError::Ocr {
            image: image.clone(),
            message: format!("{:#}", e),
        })?;

        let comments = extractor.extract_comments(&source_image_name(image), &detections);
        if comments.is_empty() {
            warn!("no comments found in {}", image.display());
            empty_images.push(image.clone());
        } else {
            info!(
                "{}: {} detections -> {} comments",
                image.display(),
                detections.len(),
                comments.len()
            );
        }
        all_comments.extend(comments);
    }

    if all_comments.is_empty() {
        return Err(SamplerError::NoComments);
    }

    let total_extracted = all_comments.len();
    let entries = deduplicate(all_comments);
    info!(
        "{} comments extracted, {} after removing duplicates",
        total_extracted,
        entries.len()
    );

    Ok(RunReport {
        entries,
        total_extracted,
        empty_images,
        skipped_images,
    })
}
