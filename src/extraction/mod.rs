//! Frame-to-signal reduction.
//!
//! This module turns decoded frames into the one-dimensional brightness
//! series the spectral stages consume: a scalar ROI luminance per frame and
//! an effective sampling rate derived from the frame timestamps.

mod brightness;
mod timing;

pub use brightness::{roi_brightness, ExtractionError, FrameSample};
pub use timing::estimate_sample_rate;
