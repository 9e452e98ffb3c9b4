//! Detection-to-comment segmentation.
//!
//! One image's detections go through:
//! - confidence/blank filtering and conversion to positional [`Line`]s
//! - reading-order sort and gap-based grouping into [`Block`]s
//! - username extraction from each block's first line
//! - noise filtering and joining of the remaining lines into a comment

pub mod assemble;
pub mod block;
pub mod line;

pub use assemble::{assemble_block, NoiseFilter, UsernameNormalizer};
pub use block::{segment_blocks, Block};
pub use line::{filter_detections, normalize_lines, Line};

use anyhow::Result;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::SamplerConfig;
use crate::ocr::Detection;

/// One extracted (username, comment) record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommentEntry {
    /// File name of the screenshot the comment came from
    pub source_image: String,
    /// Normalized author handle, never contains a space
    pub username: String,
    /// Comment body, never empty
    pub comment: String,
}

/// Turns one image's detections into comment entries.
#[derive(Debug, Clone)]
pub struct CommentExtractor {
    min_conf: f64,
    line_gap: f64,
    usernames: UsernameNormalizer,
    noise: NoiseFilter,
}

impl CommentExtractor {
    pub fn new(min_conf: f64, line_gap: f64) -> Result<Self> {
        Ok(Self {
            min_conf,
            line_gap,
            usernames: UsernameNormalizer::new()?,
            noise: NoiseFilter::new()?,
        })
    }

    pub fn from_config(config: &SamplerConfig) -> Result<Self> {
        Self::new(config.min_conf, config.line_gap)
    }

    pub fn min_conf(&self) -> f64 {
        self.min_conf
    }

    pub fn line_gap(&self) -> f64 {
        self.line_gap
    }

    /// Extracts entries in block order. An image with no usable text yields
    /// an empty list.
    pub fn extract_comments(&self, source_image: &str, detections: &[Detection]) -> Vec<CommentEntry> {
        let lines = normalize_lines(detections, self.min_conf);
        debug!(
            "{}: {} of {} detections kept",
            source_image,
            lines.len(),
            detections.len()
        );

        let blocks = segment_blocks(lines, self.line_gap);
        debug!("{}: {} blocks", source_image, blocks.len());

        blocks
            .iter()
            .filter_map(|block| {
                let entry = assemble_block(block, source_image, &self.usernames, &self.noise);
                if entry.is_none() {
                    debug!(
                        "{}: block at y={:.0} ({}) has no comment body, dropped",
                        source_image,
                        block.head().top_y,
                        block.head().text
                    );
                }
                entry
            })
            .collect()
    }
}
