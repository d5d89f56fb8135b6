//! Sampling-rate estimation from frame timestamps.
//!
//! Container-reported frame rates are frequently wrong or missing, so the
//! effective rate is derived from the timestamps themselves: the reciprocal
//! of the mean consecutive difference. All downstream timing math (window
//! size, frequency axis, per-window timestamps) uses this estimate.

/// Estimates the sampling rate in frames per second.
///
/// Falls back to `nominal_fps` when fewer than two timestamps exist or the
/// timestamps are not increasing on average.
pub fn estimate_sample_rate(timestamps: &[f64], nominal_fps: f64) -> f64 {
    if timestamps.len() < 2 {
        tracing::debug!(
            frames = timestamps.len(),
            nominal_fps,
            "too few timestamps, using nominal rate"
        );
        return nominal_fps;
    }

    let deltas: Vec<f64> = timestamps.windows(2).map(|w| w[1] - w[0]).collect();
    let mean_delta = deltas.iter().sum::<f64>() / deltas.len() as f64;

    if !mean_delta.is_finite() || mean_delta <= 0.0 {
        tracing::warn!(mean_delta, nominal_fps, "non-increasing timestamps, using nominal rate");
        return nominal_fps;
    }

    1.0 / mean_delta
}
