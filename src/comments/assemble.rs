use anyhow::Result;
use regex::Regex;

use super::block::Block;
use super::line::Line;
use super::CommentEntry;

/// Lines made only of digits, O/o, zero-like glyphs (full-width ０, 〇, 零)
/// and whitespace. These are floor-count watermarks, not message text.
const NOISE_PATTERN: &str = r"^[0-9Oo\u{FF10}\u{3007}\u{96F6}\s]+$";

const UNDERSCORE_RUN_PATTERN: &str = r"_+";

/// Predicate for watermark lines, compiled once.
#[derive(Debug, Clone)]
pub struct NoiseFilter {
    pattern: Regex,
}

impl NoiseFilter {
    pub fn new() -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(NOISE_PATTERN)?,
        })
    }

    /// True when the trimmed text is empty or a watermark.
    pub fn is_noise(&self, text: &str) -> bool {
        let cleaned = text.trim();
        cleaned.is_empty() || self.pattern.is_match(cleaned)
    }
}

/// Rejoins OCR'd handles: trims, turns spaces into underscores and
/// collapses underscore runs.
#[derive(Debug, Clone)]
pub struct UsernameNormalizer {
    underscores: Regex,
}

impl UsernameNormalizer {
    pub fn new() -> Result<Self> {
        Ok(Self {
            underscores: Regex::new(UNDERSCORE_RUN_PATTERN)?,
        })
    }

    /// `" rene  fairy_ _fan "` becomes `"rene_fairy_fan"`.
    pub fn normalize(&self, raw: &str) -> String {
        let joined = raw.trim().replace(' ', "_");
        self.underscores.replace_all(&joined, "_").into_owned()
    }
}

/// Joins the non-noise body lines with single spaces.
pub fn assemble_comment(body: &[Line], noise: &NoiseFilter) -> String {
    body.iter()
        .map(|line| line.text.as_str())
        .filter(|text| !noise.is_noise(text))
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

/// Builds the entry for one block, or `None` when nothing is left of the
/// body after noise filtering.
pub fn assemble_block(
    block: &Block,
    source_image: &str,
    usernames: &UsernameNormalizer,
    noise: &NoiseFilter,
) -> Option<CommentEntry> {
    let comment = assemble_comment(block.body(), noise);
    if comment.is_empty() {
        return None;
    }

    Some(CommentEntry {
        source_image: source_image.to_string(),
        username: usernames.normalize(&block.head().text),
        comment,
    })
}
