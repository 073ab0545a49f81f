use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;

use polyup::constants::DEFAULT_INPUT_PATH;
use polyup::{InterpolationFactor, UpsampleConfig, Upsampler, resampled_path};

#[derive(Parser, Debug)]
#[command(name = "polyup")]
#[command(about = "Upsample a mono WAV file with a polyphase FIR filter", long_about = None)]
struct Args {
    /// Input WAV file (must be mono)
    #[arg(default_value = DEFAULT_INPUT_PATH)]
    input: PathBuf,

    /// Output WAV file (default: <input>_resampled.wav)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// TOML filter configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Interpolation factor (e.g., "4", "4x")
    #[arg(short, long)]
    factor: Option<InterpolationFactor>,

    /// Coefficients per polyphase sub-filter
    #[arg(long)]
    taps_per_phase: Option<usize>,

    /// Normalized prototype cutoff (default: derived from the factor)
    #[arg(long)]
    cutoff: Option<f64>,

    /// Fail on a truncated input file instead of warning
    #[arg(long)]
    strict: bool,

    /// Increase output verbosity
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = build_config(&args)?;
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| resampled_path(&args.input));

    println!(
        "Processing: {} -> {}",
        args.input.display(),
        output.display()
    );
    println!("Rate change: {}", config.interpolation_factor);

    let upsampler = Upsampler::new(&config).context("Failed to build filter bank")?;
    let report = upsampler
        .process_file(&args.input, &output, args.strict)
        .with_context(|| format!("Failed to upsample {}", args.input.display()))?;

    log::info!(
        "{} frames @ {} Hz -> {} frames @ {} Hz",
        report.input_frames,
        report.input_rate,
        report.output_frames,
        report.output_rate
    );
    println!("Saved: {}", output.display());

    Ok(())
}

fn build_config(args: &Args) -> anyhow::Result<UpsampleConfig> {
    let mut config = match &args.config {
        Some(path) => UpsampleConfig::from_toml_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => UpsampleConfig::default(),
    };

    if let Some(factor) = args.factor {
        config.interpolation_factor = factor.get();
    }
    if let Some(taps) = args.taps_per_phase {
        config.taps_per_phase = taps;
    }
    if args.cutoff.is_some() {
        config.cutoff = args.cutoff;
    }

    config.validate().context("Invalid filter configuration")?;
    Ok(config)
}
