//! Rotational-speed estimation via windowed spectral analysis.
//!
//! Each window is mean/std normalized, transformed with a forward FFT, and
//! reduced to the dominant non-DC frequency in the positive half of the
//! spectrum. That frequency is the rotation rate; times 60 it is the rpm
//! estimate for the window.

use super::window::{window_count, window_size, windows};
use rustfft::{num_complex::Complex, FftPlanner};
use serde::Serialize;
use thiserror::Error;

/// Errors raised while setting up spectral analysis.
#[derive(Debug, Clone, Error)]
pub enum SpectralError {
    #[error("window of {0} samples is too small for spectral analysis")]
    WindowTooSmall(usize),
}

/// Rotational-speed estimate for one analysis window.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RateSample {
    /// Zero-based window index.
    pub window_index: usize,
    /// Window start time in seconds (`window_index * window_size / rate`).
    pub time_secs: f64,
    /// Estimated rotational speed in revolutions per minute.
    pub rpm: f64,
    /// True when the window had no usable spectrum (constant brightness or
    /// no non-DC bin); such windows report 0 rpm instead of NaN.
    pub degenerate: bool,
}

/// Per-recording rpm estimator.
///
/// Holds the FFT plan for the recording's window size so repeated windows
/// reuse the same plan.
pub struct RpmEstimator {
    planner: FftPlanner<f64>,
    sample_rate: f64,
    window_size: usize,
}

impl RpmEstimator {
    /// Creates an estimator for the given sampling rate and window duration.
    ///
    /// Fails when `floor(rate * window_secs)` is below one sample.
    pub fn new(sample_rate: f64, window_secs: f64) -> Result<Self, SpectralError> {
        let size = window_size(sample_rate, window_secs);
        if size < 1 {
            return Err(SpectralError::WindowTooSmall(size));
        }
        Ok(Self {
            planner: FftPlanner::new(),
            sample_rate,
            window_size: size,
        })
    }

    /// Returns the window size in samples.
    #[inline]
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Estimates the rpm for every complete window of the brightness series.
    pub fn estimate_series(&mut self, brightness: &[f64]) -> Vec<RateSample> {
        let count = window_count(brightness.len(), self.window_size);
        tracing::debug!(
            samples = brightness.len(),
            window_size = self.window_size,
            windows = count,
            "estimating rotational speed"
        );

        let mut rates = Vec::with_capacity(count);
        for (index, window) in windows(brightness, self.window_size).enumerate() {
            rates.push(self.estimate_window(index, window));
        }
        rates
    }

    fn estimate_window(&mut self, index: usize, samples: &[f64]) -> RateSample {
        let n = samples.len();
        let time_secs = index as f64 * n as f64 / self.sample_rate;

        let mean = samples.iter().sum::<f64>() / n as f64;
        let variance = samples.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / n as f64;
        let std = variance.sqrt();

        // Constant brightness has no defined normalized spectrum. Report
        // zero rpm and flag the window instead of propagating NaN.
        if std == 0.0 || !std.is_finite() {
            tracing::trace!(window = index, "degenerate window: zero variance");
            return RateSample {
                window_index: index,
                time_secs,
                rpm: 0.0,
                degenerate: true,
            };
        }

        let mut buffer: Vec<Complex<f64>> = samples
            .iter()
            .map(|&s| Complex::new((s - mean) / std, 0.0))
            .collect();

        let fft = self.planner.plan_fft_forward(n);
        fft.process(&mut buffer);

        // Positive-frequency half only; the spectrum of a real signal is
        // symmetric and the negative half carries no extra information.
        let half = n / 2;
        if half <= 1 {
            tracing::trace!(window = index, "degenerate window: no non-DC bin");
            return RateSample {
                window_index: index,
                time_secs,
                rpm: 0.0,
                degenerate: true,
            };
        }

        // Dominant bin excluding DC; strict comparison keeps the lowest
        // index on ties.
        let mut peak_index = 1;
        let mut peak_magnitude = buffer[1].norm();
        for (bin, value) in buffer.iter().enumerate().take(half).skip(2) {
            let magnitude = value.norm();
            if magnitude > peak_magnitude {
                peak_magnitude = magnitude;
                peak_index = bin;
            }
        }

        let rotations_per_sec = peak_index as f64 * self.sample_rate / n as f64;
        RateSample {
            window_index: index,
            time_secs,
            rpm: rotations_per_sec * 60.0,
            degenerate: false,
        }
    }
}

impl std::fmt::Debug for RpmEstimator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpmEstimator")
            .field("sample_rate", &self.sample_rate)
            .field("window_size", &self.window_size)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Brightness series oscillating at `freq_hz` for `windows` windows.
    fn tone(freq_hz: f64, rate: f64, window: usize, count: usize) -> Vec<f64> {
        (0..window * count)
            .map(|i| 128.0 + 50.0 * (2.0 * std::f64::consts::PI * freq_hz * i as f64 / rate).sin())
            .collect()
    }

    #[test]
    fn test_pure_tone_maps_to_rpm() {
        // 4 Hz at 32 fps, 64-sample windows: bin 8, 240 rpm.
        let mut estimator = RpmEstimator::new(32.0, 2.0).unwrap();
        let series = tone(4.0, 32.0, 64, 3);
        let rates = estimator.estimate_series(&series);

        assert_eq!(rates.len(), 2);
        for rate in &rates {
            assert!(!rate.degenerate);
            assert!((rate.rpm - 240.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_window_times_follow_index() {
        let mut estimator = RpmEstimator::new(32.0, 2.0).unwrap();
        let series = tone(2.0, 32.0, 64, 4);
        let rates = estimator.estimate_series(&series);

        assert_eq!(rates.len(), 3);
        assert_eq!(rates[0].time_secs, 0.0);
        assert_eq!(rates[1].time_secs, 2.0);
        assert_eq!(rates[2].time_secs, 4.0);
    }

    #[test]
    fn test_constant_window_is_degenerate() {
        let mut estimator = RpmEstimator::new(32.0, 2.0).unwrap();
        let series = vec![42.0; 64 * 3];
        let rates = estimator.estimate_series(&series);

        assert_eq!(rates.len(), 2);
        for rate in &rates {
            assert!(rate.degenerate);
            assert_eq!(rate.rpm, 0.0);
            assert!(rate.rpm.is_finite());
        }
    }

    #[test]
    fn test_dc_offset_does_not_win() {
        // Large offset with a weak 3 Hz ripple: DC is excluded, so the
        // ripple bin must still win.
        let mut estimator = RpmEstimator::new(32.0, 2.0).unwrap();
        let series: Vec<f64> = (0..192)
            .map(|i| 10_000.0 + (2.0 * std::f64::consts::PI * 3.0 * i as f64 / 32.0).sin())
            .collect();
        let rates = estimator.estimate_series(&series);

        assert!((rates[0].rpm - 180.0).abs() < 1e-6);
    }

    #[test]
    fn test_too_small_window_rejected() {
        assert!(matches!(
            RpmEstimator::new(0.3, 2.0),
            Err(SpectralError::WindowTooSmall(0))
        ));
    }

    #[test]
    fn test_short_series_yields_no_rates() {
        let mut estimator = RpmEstimator::new(32.0, 2.0).unwrap();
        // Exactly one window of samples: n == w, so nothing is produced.
        let rates = estimator.estimate_series(&vec![1.0; 64]);
        assert!(rates.is_empty());
    }
}
