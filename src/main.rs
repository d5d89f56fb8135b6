//! Optical Exfiltration Analysis CLI
//!
//! Command-line demonstration of the decoding pipeline against a synthetic
//! recording: a chosen message is modulated onto a simulated fan and then
//! recovered through the full analysis chain.

use clap::Parser;
use optical_exfil::{
    anomaly::BaselineModel,
    capture::SyntheticSource,
    config::{AnalysisConfig, BaselineConfig, FileConfig},
    pipeline::analyze,
};
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "optical-exfil", version, about = "Fan-speed covert channel decoder demo")]
struct Cli {
    /// Message to embed in the synthetic recording.
    #[arg(short, long, default_value = "HELLO WORLD!")]
    message: String,

    /// Frame rate of the synthetic recording. Power-of-two rates keep the
    /// synthetic timestamps exactly representable.
    #[arg(long, default_value_t = 32.0)]
    fps: f64,

    /// Rotational speed for bit 1 windows (rpm).
    #[arg(long, default_value_t = 240.0)]
    high_rpm: f64,

    /// Rotational speed for bit 0 windows (rpm).
    #[arg(long, default_value_t = 120.0)]
    low_rpm: f64,

    /// Optional TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the full analysis report as JSON.
    #[arg(long)]
    json: bool,
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();
    info!("Optical Exfil Analyzer v{}", optical_exfil::VERSION);

    let (analysis, baseline_config) = match cli.config {
        Some(ref path) => match FileConfig::from_file(path) {
            Ok(file) => (file.analysis, file.baseline),
            Err(e) => {
                eprintln!("Failed to load config {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => (AnalysisConfig::default(), BaselineConfig::default()),
    };

    let baseline = match BaselineModel::fit(&baseline_config) {
        Ok(model) => model,
        Err(e) => {
            eprintln!("Failed to fit anomaly baseline: {}", e);
            std::process::exit(1);
        }
    };

    let bits = match analysis.symbols.encode_message(&cli.message) {
        Some(bits) => bits,
        None => {
            eprintln!(
                "Message contains characters outside the 16-symbol alphabet: {:?}",
                cli.message
            );
            std::process::exit(1);
        }
    };

    info!(
        bits = bits.len(),
        fps = cli.fps,
        "rendering synthetic recording"
    );
    let mut source = SyntheticSource::from_bits(
        &bits,
        cli.high_rpm,
        cli.low_rpm,
        cli.fps,
        analysis.window_secs,
    );

    let report = match analyze(&mut source, &analysis, &baseline) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Analysis failed: {}", e);
            std::process::exit(1);
        }
    };

    if cli.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Failed to serialize report: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    println!("Decoded message: {}", report.message);
    println!("Bitstream:       {}", report.bitstream);
    println!("Sampling rate:   {:.2} fps", report.sample_rate_hz);
    println!("Average rpm:     {:.2}", report.average_rpm);
    println!(
        "Anomalies:       {} of {} windows",
        report.outlier_count(),
        report.anomalies.len()
    );
}
