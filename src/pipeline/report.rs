//! Result record produced by one pipeline run.

use crate::anomaly::AnomalyLabel;
use crate::extraction::FrameSample;
use crate::spectral::RateSample;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Everything external consumers need from one analyzed recording.
///
/// Plot rendering, report assembly, and the upload-facing layer consume
/// this record only; no pipeline-internal representation leaks past it.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// Per-frame ROI brightness series.
    pub brightness: Vec<FrameSample>,
    /// Effective sampling rate estimated from the timestamps.
    pub sample_rate_hz: f64,
    /// Per-window rotational-speed estimates.
    pub rate_samples: Vec<RateSample>,
    /// Threshold-derived bits as a 0/1 string.
    pub bitstream: String,
    /// Decoded message text.
    pub message: String,
    /// Anomaly labels aligned with `rate_samples` by window index.
    pub anomalies: Vec<AnomalyLabel>,
    /// Mean rpm across all windows.
    pub average_rpm: f64,
    /// When the analysis ran.
    pub analyzed_at: DateTime<Utc>,
}

impl AnalysisReport {
    /// Number of windows flagged as outliers.
    pub fn outlier_count(&self) -> usize {
        self.anomalies.iter().filter(|label| label.is_outlier).count()
    }
}
