//! Comment Sampler
//!
//! Turns OCR detections from screenshots of a scrolling comment feed into
//! `(username, comment)` records, removes exact duplicates, and draws random
//! winners.

pub mod comments;
pub mod config;
pub mod dedup;
pub mod error;
pub mod logging;
pub mod ocr;
pub mod output;
pub mod paths;
pub mod runner;
pub mod sample;

pub use comments::{CommentEntry, CommentExtractor};
pub use config::SamplerConfig;
pub use dedup::deduplicate;
pub use error::SamplerError;
pub use ocr::{Detection, DetectionFileEngine, OcrEngine, TesseractEngine};
pub use runner::{run, RunReport};
pub use sample::{draw_winners, rng_from_seed, Sample};
