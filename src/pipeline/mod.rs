//! End-to-end analysis pipeline.
//!
//! Runs the full chain over one recording: drain the frame source, reduce
//! frames to ROI brightness, estimate the sampling rate, window and
//! transform the brightness series, threshold the rpm estimates into bits,
//! decode the message, and score every window against the anomaly baseline.
//!
//! One pass, fully buffered: the whole frame sequence is consumed before
//! windowing begins. Runs share no mutable state, so independent recordings
//! may be analyzed concurrently against the same fitted baseline.

mod report;

pub use report::AnalysisReport;

use crate::anomaly::{AnomalyScorer, BaselineModel};
use crate::capture::{FrameSource, SourceError};
use crate::config::{AnalysisConfig, ConfigError};
use crate::decode::Bitstream;
use crate::extraction::{estimate_sample_rate, roi_brightness, ExtractionError, FrameSample};
use crate::spectral::RpmEstimator;
use chrono::Utc;
use thiserror::Error;

/// Terminal pipeline errors.
///
/// Only malformed frames and a signal-free recording abort a run; all other
/// conditions degrade in-band (nominal-rate fallback, zero-rpm degenerate
/// windows).
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    MalformedFrame(#[from] ExtractionError),
    #[error("no usable signal: {0}")]
    NoUsableSignal(&'static str),
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    InvalidConfig(#[from] ConfigError),
}

/// Analyzes one recording end to end.
pub fn analyze<S: FrameSource>(
    source: &mut S,
    config: &AnalysisConfig,
    baseline: &BaselineModel,
) -> Result<AnalysisReport, AnalysisError> {
    config.validate()?;

    let mut brightness = Vec::new();
    while let Some(frame) = source.next_frame()? {
        let sample = FrameSample {
            timestamp: frame.timestamp(),
            brightness: roi_brightness(&frame)?,
        };
        brightness.push(sample);
    }

    if brightness.is_empty() {
        return Err(AnalysisError::NoUsableSignal("recording contains no frames"));
    }
    tracing::info!(frames = brightness.len(), "brightness series extracted");

    let timestamps: Vec<f64> = brightness.iter().map(|s| s.timestamp).collect();
    let sample_rate_hz = estimate_sample_rate(&timestamps, config.nominal_fps);
    tracing::debug!(sample_rate_hz, "effective sampling rate estimated");

    let mut estimator = RpmEstimator::new(sample_rate_hz, config.window_secs)
        .map_err(|_| AnalysisError::NoUsableSignal("window shorter than one sample"))?;

    let series: Vec<f64> = brightness.iter().map(|s| s.brightness).collect();
    let rate_samples = estimator.estimate_series(&series);
    if rate_samples.is_empty() {
        return Err(AnalysisError::NoUsableSignal(
            "too few samples for a single window",
        ));
    }

    let bits = Bitstream::from_rates(&rate_samples, config.rpm_threshold);
    let message = config.symbols.decode(&bits);
    let anomalies = AnomalyScorer::new(baseline).score_series(&rate_samples);
    let average_rpm =
        rate_samples.iter().map(|r| r.rpm).sum::<f64>() / rate_samples.len() as f64;

    tracing::info!(
        windows = rate_samples.len(),
        bits = bits.len(),
        chars = message.chars().count(),
        average_rpm,
        outliers = anomalies.iter().filter(|l| l.is_outlier).count(),
        "analysis complete"
    );

    Ok(AnalysisReport {
        brightness,
        sample_rate_hz,
        rate_samples,
        bitstream: bits.to_string(),
        message,
        anomalies,
        average_rpm,
        analyzed_at: Utc::now(),
    })
}
