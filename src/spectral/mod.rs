//! Windowed spectral analysis of the brightness series.
//!
//! Partitions the brightness signal into fixed-size windows and estimates a
//! rotational speed per window from the dominant non-DC frequency of its
//! normalized spectrum.

mod rpm;
mod window;

pub use rpm::{RateSample, RpmEstimator, SpectralError};
pub use window::{window_count, window_size, windows};
