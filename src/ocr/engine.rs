use anyhow::{anyhow, Context, Result};
use log::debug;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::NamedTempFile;

use super::preprocess::load_grayscale;
use super::setup::{find_tessdata_dir, find_tesseract_executable};
use super::{Detection, OcrEngine};
use crate::config::TesseractConfig;

/// Runs the Tesseract CLI and reports one detection per recognized text line.
#[derive(Debug, Clone)]
pub struct TesseractEngine {
    executable: PathBuf,
    tessdata: Option<PathBuf>,
    languages: String,
    psm: u8,
}

impl TesseractEngine {
    /// Locates Tesseract using the configured overrides, then the usual places.
    pub fn from_config(config: &TesseractConfig) -> Result<Self> {
        let executable = find_tesseract_executable(config.executable.as_deref())?;
        let tessdata = find_tessdata_dir(config.tessdata_dir.as_deref(), &config.languages);

        debug!(
            "Tesseract: {} (tessdata: {}, languages: {}, psm: {})",
            executable.display(),
            tessdata
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "built-in".to_string()),
            config.languages,
            config.psm
        );

        Ok(Self {
            executable,
            tessdata,
            languages: config.languages.clone(),
            psm: config.psm,
        })
    }
}

impl OcrEngine for TesseractEngine {
    fn detect(&self, image: &Path) -> Result<Vec<Detection>> {
        let gray = load_grayscale(image)?;

        // Save image to temporary file
        let temp_input = NamedTempFile::with_suffix(".png")?;
        gray.save(temp_input.path())
            .context("Failed to write preprocessed image")?;

        // Tesseract appends .tsv to the output base
        let temp_output = NamedTempFile::new()?;
        let output_base = temp_output.path().to_string_lossy().to_string();

        let mut command = Command::new(&self.executable);
        command.arg(temp_input.path()).arg(&output_base);
        if let Some(tessdata) = &self.tessdata {
            command.arg("--tessdata-dir").arg(tessdata);
        }
        let output = command
            .arg("-l")
            .arg(&self.languages)
            .arg("--psm")
            .arg(self.psm.to_string())
            .arg("tsv")
            .output()
            .with_context(|| format!("Failed to launch {}", self.executable.display()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow!("Tesseract failed: {}", stderr.trim()));
        }

        let tsv_path = format!("{}.tsv", output_base);
        let tsv_content = std::fs::read_to_string(&tsv_path)
            .map_err(|e| anyhow!("Failed to read Tesseract output: {}", e))?;
        let _ = std::fs::remove_file(&tsv_path);

        parse_tsv_output(&tsv_content)
    }
}

/// Running union of the word boxes on one Tesseract line.
struct LineAccumulator {
    words: Vec<String>,
    conf_sum: f64,
    left: f64,
    top: f64,
    right: f64,
    bottom: f64,
}

impl LineAccumulator {
    fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            words: Vec::new(),
            conf_sum: 0.0,
            left,
            top,
            right,
            bottom,
        }
    }

    fn push(&mut self, text: &str, conf: f64, left: f64, top: f64, right: f64, bottom: f64) {
        self.words.push(text.to_string());
        self.conf_sum += conf;
        self.left = self.left.min(left);
        self.top = self.top.min(top);
        self.right = self.right.max(right);
        self.bottom = self.bottom.max(bottom);
    }

    fn into_detection(self) -> Detection {
        let confidence = self.conf_sum / self.words.len() as f64 / 100.0;
        Detection::new(
            [
                [self.left, self.top],
                [self.right, self.top],
                [self.right, self.bottom],
                [self.left, self.bottom],
            ],
            self.words.join(" "),
            confidence,
        )
    }
}

/// Parses Tesseract TSV output into line-level detections.
///
/// Word rows (level 5) are grouped by (block, paragraph, line) number. The
/// line polygon is the union of its word boxes and the confidence is the mean
/// word confidence rescaled from 0-100 to 0-1.
fn parse_tsv_output(tsv: &str) -> Result<Vec<Detection>> {
    let mut lines: BTreeMap<(i32, i32, i32), LineAccumulator> = BTreeMap::new();

    for row in tsv.lines().skip(1) {
        // TSV fields: level, page_num, block_num, par_num, line_num, word_num,
        //             left, top, width, height, conf, text
        let fields: Vec<&str> = row.split('\t').collect();
        if fields.len() < 12 {
            continue;
        }

        let level: i32 = fields[0].parse().unwrap_or(-1);
        if level != 5 {
            continue;
        }

        let text = fields[11].trim();
        let conf: f64 = fields[10].parse().unwrap_or(-1.0);
        if text.is_empty() || conf < 0.0 {
            continue;
        }

        let key = (
            fields[2].parse().unwrap_or(-1),
            fields[3].parse().unwrap_or(-1),
            fields[4].parse().unwrap_or(-1),
        );
        let left: f64 = fields[6].parse().context("Invalid left in TSV")?;
        let top: f64 = fields[7].parse().context("Invalid top in TSV")?;
        let width: f64 = fields[8].parse().context("Invalid width in TSV")?;
        let height: f64 = fields[9].parse().context("Invalid height in TSV")?;
        let (right, bottom) = (left + width, top + height);

        lines
            .entry(key)
            .or_insert_with(|| LineAccumulator::new(left, top, right, bottom))
            .push(text, conf, left, top, right, bottom);
    }

    Ok(lines.into_values().map(LineAccumulator::into_detection).collect())
}
