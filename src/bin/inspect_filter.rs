use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use polyup::constants::DEFAULT_TAPS_PER_PHASE;
use polyup::signal_processing::{design_lowpass, frequency_response, peak_magnitude_db};
use polyup::{InterpolationFactor, PolyphaseFilterBank, UpsampleConfig};

#[derive(Parser, Debug)]
#[command(name = "inspect_filter")]
#[command(about = "Print the polyphase filter bank and its frequency response")]
struct Args {
    /// Interpolation factor (e.g., "4", "4x")
    #[arg(short, long, default_value_t = InterpolationFactor::default())]
    factor: InterpolationFactor,

    /// Coefficients per polyphase sub-filter
    #[arg(long, default_value_t = DEFAULT_TAPS_PER_PHASE)]
    taps_per_phase: usize,

    /// Normalized prototype cutoff (default: derived from the factor)
    #[arg(long)]
    cutoff: Option<f64>,

    /// Output format: text, json
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Include every coefficient in the output
    #[arg(long)]
    coefficients: bool,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Serialize)]
struct FilterSummary {
    interpolation_factor: usize,
    num_taps: usize,
    taps_per_phase: usize,
    cutoff: f64,
    dc_gain: f64,
    phase_gains: Vec<f64>,
    passband_peak_db: f64,
    stopband_peak_db: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    phases: Option<Vec<Vec<f32>>>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = UpsampleConfig {
        interpolation_factor: args.factor.get(),
        taps_per_phase: args.taps_per_phase,
        cutoff: args.cutoff,
    };
    config.validate().context("Invalid filter configuration")?;

    let cutoff = config.cutoff();
    let prototype =
        design_lowpass(config.num_taps(), cutoff).context("Failed to design prototype")?;
    let bank = PolyphaseFilterBank::from_prototype(&prototype, config.interpolation_factor)
        .context("Failed to build filter bank")?;

    let dc_gain = frequency_response(&prototype, 0.0).norm();
    // First image of the passband sits at 1/factor - cutoff
    let image_start = 1.0 / config.interpolation_factor as f64 - cutoff;

    let summary = FilterSummary {
        interpolation_factor: config.interpolation_factor,
        num_taps: config.num_taps(),
        taps_per_phase: bank.taps_per_phase(),
        cutoff,
        dc_gain,
        phase_gains: bank.phase_gains(),
        passband_peak_db: peak_magnitude_db(&prototype, 0.0, cutoff * 0.7, 64, dc_gain),
        stopband_peak_db: peak_magnitude_db(&prototype, image_start.max(cutoff), 0.5, 512, dc_gain),
        phases: args
            .coefficients
            .then(|| (0..bank.phases()).map(|p| bank.phase(p).to_vec()).collect()),
    };

    match args.format {
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(&summary).context("Failed to serialize summary")?;
            println!("{}", json);
        }
        OutputFormat::Text => print_text(&summary),
    }

    Ok(())
}

fn print_text(summary: &FilterSummary) {
    println!("=== Polyphase Filter Bank ===");
    println!("Interpolation factor: {}", summary.interpolation_factor);
    println!(
        "Prototype taps: {} ({} per phase)",
        summary.num_taps, summary.taps_per_phase
    );
    println!("Cutoff: {:.4} cycles/sample", summary.cutoff);
    println!("DC gain: {:.4}", summary.dc_gain);
    for (p, gain) in summary.phase_gains.iter().enumerate() {
        println!("  Phase {} gain: {:.6}", p, gain);
    }
    println!("Passband peak: {:+.4} dB", summary.passband_peak_db);
    println!("Stopband peak: {:.1} dB", summary.stopband_peak_db);

    if let Some(phases) = &summary.phases {
        println!();
        for (p, coeffs) in phases.iter().enumerate() {
            println!("Phase {}:", p);
            for (k, c) in coeffs.iter().enumerate() {
                println!("  [{:3}] {:+.9}", k, c);
            }
        }
    }
}
