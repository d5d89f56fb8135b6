//! Fixed-size windowing of the brightness series.
//!
//! The series is partitioned into non-overlapping windows of
//! `floor(rate * window_secs)` samples. Trailing samples that do not fill a
//! complete window are discarded, never padded.

/// Computes the window size in samples for a given rate and duration.
pub fn window_size(sample_rate: f64, window_secs: f64) -> usize {
    (sample_rate * window_secs).floor() as usize
}

/// Number of complete windows produced from `n` samples at window size `w`.
///
/// Invariant: `floor((n - w) / w)` for `n > w`, zero otherwise.
pub fn window_count(n: usize, w: usize) -> usize {
    if w == 0 || n <= w {
        0
    } else {
        (n - w) / w
    }
}

/// Iterates the complete non-overlapping windows of `samples`.
pub fn windows(samples: &[f64], w: usize) -> impl Iterator<Item = &[f64]> {
    let count = window_count(samples.len(), w);
    (0..count).map(move |k| &samples[k * w..(k + 1) * w])
}
