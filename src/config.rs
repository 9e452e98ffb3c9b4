//! Run configuration.
//!
//! Loaded from a JSON file when one is present; every field falls back to a
//! default, so a partial file (or none at all) is fine. Command-line flags are
//! layered on top through [`ConfigOverrides`].

use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::SamplerError;
use crate::paths::get_default_config_path;

/// Confidence below which detections are discarded.
pub const DEFAULT_MIN_CONF: f64 = 0.3;

/// Largest vertical step (pixels) between lines of the same comment block.
pub const DEFAULT_LINE_GAP: f64 = 120.0;

/// Line gap used by the upload form, tuned for phone screenshots.
pub const WEB_LINE_GAP: f64 = 130.0;

/// Tesseract invocation settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct TesseractConfig {
    /// Explicit path to the tesseract binary; searched for when unset
    pub executable: Option<PathBuf>,
    /// Explicit tessdata directory; searched for when unset
    pub tessdata_dir: Option<PathBuf>,
    /// `+`-separated language list passed to `-l`
    pub languages: String,
    /// Page segmentation mode (11 = sparse text)
    pub psm: u8,
}

impl Default for TesseractConfig {
    fn default() -> Self {
        Self {
            executable: None,
            tessdata_dir: None,
            languages: "chi_tra+eng".to_string(),
            psm: 11,
        }
    }
}

/// Complete run configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerConfig {
    /// Minimum OCR confidence required to keep a text line
    pub min_conf: f64,
    /// Maximum vertical gap between lines of one comment block
    pub line_gap: f64,
    /// Number of winners to draw; 0 skips sampling
    pub sample_size: usize,
    /// Seed for reproducible sampling
    pub seed: Option<u64>,
    /// Where the extracted comments are written as CSV
    pub output: PathBuf,
    /// Optional JSON file receiving the drawn winners
    pub winners_json: Option<PathBuf>,
    pub tesseract: TesseractConfig,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            min_conf: DEFAULT_MIN_CONF,
            line_gap: DEFAULT_LINE_GAP,
            sample_size: 0,
            seed: None,
            output: PathBuf::from("comments.csv"),
            winners_json: None,
            tesseract: TesseractConfig::default(),
        }
    }
}

/// Values given on the command line. `None` keeps the file's value.
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub output: Option<PathBuf>,
    pub sample_size: Option<usize>,
    pub seed: Option<u64>,
    pub min_conf: Option<f64>,
    pub line_gap: Option<f64>,
    pub winners_json: Option<PathBuf>,
}

impl SamplerConfig {
    /// Settings the upload form uses.
    pub fn web_preset() -> Self {
        Self {
            line_gap: WEB_LINE_GAP,
            ..Self::default()
        }
    }

    /// Loads config from `path`, or returns defaults if it is missing or broken.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            info!("{} not found. Using default config.", path.display());
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(config) => {
                    info!("Config loaded from {}", path.display());
                    return config;
                }
                Err(e) => {
                    warn!("Failed to parse {}: {}. Using defaults.", path.display(), e);
                }
            },
            Err(e) => {
                warn!("Failed to read {}: {}. Using defaults.", path.display(), e);
            }
        }

        Self::default()
    }

    /// Loads `configured`, or `comment_sampler.json` next to the executable
    /// when no path is given, then applies `overrides`.
    pub fn resolve(configured: Option<&Path>, overrides: &ConfigOverrides) -> Self {
        let path = configured
            .map(Path::to_path_buf)
            .unwrap_or_else(get_default_config_path);
        let mut config = Self::load(&path);
        config.apply_overrides(overrides);
        config
    }

    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(output) = &overrides.output {
            self.output = output.clone();
        }
        if let Some(sample_size) = overrides.sample_size {
            self.sample_size = sample_size;
        }
        if overrides.seed.is_some() {
            self.seed = overrides.seed;
        }
        if let Some(min_conf) = overrides.min_conf {
            self.min_conf = min_conf;
        }
        if let Some(line_gap) = overrides.line_gap {
            self.line_gap = line_gap;
        }
        if overrides.winners_json.is_some() {
            self.winners_json = overrides.winners_json.clone();
        }
    }

    /// Rejects thresholds the extractor cannot work with.
    pub fn validate(&self) -> Result<(), SamplerError> {
        if !self.min_conf.is_finite() || !(0.0..=1.0).contains(&self.min_conf) {
            return Err(SamplerError::InvalidConfig(format!(
                "min_conf must be within [0, 1], got {}",
                self.min_conf
            )));
        }
        if !self.line_gap.is_finite() || self.line_gap < 0.0 {
            return Err(SamplerError::InvalidConfig(format!(
                "line_gap must be a non-negative number, got {}",
                self.line_gap
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = SamplerConfig::default();
        assert_eq!(config.min_conf, 0.3);
        assert_eq!(config.line_gap, 120.0);
        assert_eq!(config.sample_size, 0);
        assert!(config.seed.is_none());
        assert_eq!(config.output, PathBuf::from("comments.csv"));
        assert_eq!(config.tesseract.languages, "chi_tra+eng");
    }

    #[test]
    fn test_web_preset_line_gap() {
        assert_eq!(SamplerConfig::web_preset().line_gap, 130.0);
    }

    #[test]
    fn test_load_partial_file_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"line_gap": 90.5, "seed": 7, "tesseract": {{"psm": 6}}}}"#).unwrap();

        let config = SamplerConfig::load(file.path());

        assert_eq!(config.line_gap, 90.5);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.min_conf, 0.3);
        assert_eq!(config.tesseract.psm, 6);
        assert_eq!(config.tesseract.languages, "chi_tra+eng");
    }

    #[test]
    fn test_load_broken_file_falls_back() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        let config = SamplerConfig::load(file.path());
        assert_eq!(config.line_gap, DEFAULT_LINE_GAP);
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let config = SamplerConfig::load(Path::new("/definitely/not/here.json"));
        assert_eq!(config.min_conf, DEFAULT_MIN_CONF);
    }

    #[test]
    fn test_cli_overrides_win_over_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"min_conf": 0.5, "line_gap": 90.0, "sample_size": 3, "seed": 7,
                "output": "from_file.csv", "winners_json": "file_winners.json"}}"#
        )
        .unwrap();

        let cases = [
            (
                ConfigOverrides::default(),
                (0.5, 90.0, 3, Some(7), "from_file.csv", Some("file_winners.json")),
            ),
            (
                ConfigOverrides { seed: Some(42), sample_size: Some(5), ..Default::default() },
                (0.5, 90.0, 5, Some(42), "from_file.csv", Some("file_winners.json")),
            ),
            (
                ConfigOverrides {
                    min_conf: Some(0.8),
                    line_gap: Some(130.0),
                    output: Some(PathBuf::from("cli.csv")),
                    winners_json: Some(PathBuf::from("cli_winners.json")),
                    ..Default::default()
                },
                (0.8, 130.0, 3, Some(7), "cli.csv", Some("cli_winners.json")),
            ),
            (
                ConfigOverrides { sample_size: Some(0), ..Default::default() },
                (0.5, 90.0, 0, Some(7), "from_file.csv", Some("file_winners.json")),
            ),
        ];

        for (overrides, (min_conf, line_gap, sample_size, seed, output, winners)) in cases {
            let config = SamplerConfig::resolve(Some(file.path()), &overrides);

            assert_eq!(config.min_conf, min_conf, "{:?}", overrides);
            assert_eq!(config.line_gap, line_gap, "{:?}", overrides);
            assert_eq!(config.sample_size, sample_size, "{:?}", overrides);
            assert_eq!(config.seed, seed, "{:?}", overrides);
            assert_eq!(config.output, PathBuf::from(output), "{:?}", overrides);
            assert_eq!(config.winners_json, winners.map(PathBuf::from), "{:?}", overrides);
        }
    }

    #[test]
    fn test_overrides_apply_over_defaults_without_file() {
        let overrides = ConfigOverrides { seed: Some(1), ..Default::default() };

        let config = SamplerConfig::resolve(Some(Path::new("/definitely/not/here.json")), &overrides);

        assert_eq!(config.seed, Some(1));
        assert_eq!(config.sample_size, 0);
        assert_eq!(config.line_gap, DEFAULT_LINE_GAP);
    }

    #[test]
    fn test_validate() {
        assert!(SamplerConfig::default().validate().is_ok());

        let config = SamplerConfig { min_conf: 1.5, ..SamplerConfig::default() };
        assert!(matches!(config.validate(), Err(SamplerError::InvalidConfig(_))));

        let config = SamplerConfig { line_gap: -1.0, ..SamplerConfig::default() };
        assert!(config.validate().is_err());

        let config = SamplerConfig { line_gap: f64::NAN, ..SamplerConfig::default() };
        assert!(config.validate().is_err());
    }
}
