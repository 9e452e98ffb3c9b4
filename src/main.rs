//! Comment Sampler
//!
//! Command-line front end: OCR a batch of comment-feed screenshots, save the
//! extracted comments as CSV, and optionally draw winners.

use anyhow::Result;
use clap::{Parser, ValueEnum};
use log::info;
use std::path::PathBuf;

use comment_sampler::config::{ConfigOverrides, SamplerConfig};
use comment_sampler::logging::{init_logging, install_panic_hook};
use comment_sampler::ocr::{DetectionFileEngine, OcrEngine, TesseractEngine};
use comment_sampler::output::{export_winners_json, format_winners, write_csv};
use comment_sampler::sample::{draw_winners, rng_from_seed};
use comment_sampler::{runner, CommentExtractor};

/// Where detections come from.
#[derive(Copy, Clone, Debug, ValueEnum)]
enum EngineKind {
    /// Run the Tesseract CLI on each image
    Tesseract,
    /// Read precomputed detections from `<image>.json`
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "comment-sampler",
    version,
    about = "Extract usernames and comments from comment-feed screenshots and sample winners."
)]
struct Args {
    /// One or more screenshot image paths, processed in the order given.
    #[arg(required = true)]
    images: Vec<PathBuf>,

    /// Where to write the extracted comments as CSV (default: comments.csv).
    #[arg(long)]
    output: Option<PathBuf>,

    /// How many random winners to draw from the extracted comments.
    #[arg(long)]
    sample: Option<usize>,

    /// Optional random seed to make the sampling reproducible.
    #[arg(long)]
    seed: Option<u64>,

    /// Minimum OCR confidence required to keep a text line (default: 0.3).
    #[arg(long)]
    min_conf: Option<f64>,

    /// Maximum vertical gap (in pixels) between lines of the same comment block (default: 120).
    #[arg(long)]
    line_gap: Option<f64>,

    /// OCR backend.
    #[arg(long, value_enum, default_value_t = EngineKind::Tesseract)]
    engine: EngineKind,

    /// Also write the drawn winners to this JSON file.
    #[arg(long)]
    winners_json: Option<PathBuf>,

    /// JSON config file (default: comment_sampler.json next to the executable).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Append log output to this file as well as stderr.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log per-block details.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose, args.log_file.as_deref())?;
    install_panic_hook();

    let config = load_config(&args);
    config.validate()?;

    run(&args, &config)
}

/// Reads the config file and layers command-line flags on top.
fn load_config(args: &Args) -> SamplerConfig {
    let overrides = ConfigOverrides {
        output: args.output.clone(),
        sample_size: args.sample,
        seed: args.seed,
        min_conf: args.min_conf,
        line_gap: args.line_gap,
        winners_json: args.winners_json.clone(),
    };
    SamplerConfig::resolve(args.config.as_deref(), &overrides)
}

fn run(args: &Args, config: &SamplerConfig) -> Result<()> {
    let extractor = CommentExtractor::from_config(config)?;
    let engine: Box<dyn OcrEngine> = match args.engine {
        EngineKind::Tesseract => Box::new(TesseractEngine::from_config(&config.tesseract)?),
        EngineKind::Json => Box::new(DetectionFileEngine::new()),
    };

    info!(
        "Processing {} image(s) (min_conf={}, line_gap={})",
        args.images.len(),
        extractor.min_conf(),
        extractor.line_gap()
    );
    let report = runner::run(&args.images, engine.as_ref(), &extractor)?;

    write_csv(&config.output, &report.entries)?;
    info!(
        "Saved {} comments to {}",
        report.entries.len(),
        config.output.display()
    );

    if config.sample_size == 0 {
        if config.winners_json.is_some() {
            info!("Sample size is 0; no winners drawn");
        }
        return Ok(());
    }

    let mut rng = rng_from_seed(config.seed);
    let sample = draw_winners(&report.entries, config.sample_size, &mut rng);
    print!("{}", format_winners(&sample.winners));

    if let Some(path) = &config.winners_json {
        export_winners_json(&sample.winners, path)?;
        info!("Winners JSON saved: {}", path.display());
    }

    Ok(())
}
