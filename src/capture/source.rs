//! Frame source abstraction.
//!
//! The pipeline consumes an ordered, finite sequence of timestamped frames
//! and is agnostic to where they come from. Container demuxing and codec
//! handling live behind this trait, outside the crate.

use super::Frame;
use thiserror::Error;

/// Errors that can occur while pulling frames from a source.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read frame: {0}")]
    ReadFailed(String),
    #[error("failed to decode frame: {0}")]
    DecodeFailed(String),
}

/// Trait for frame sources.
///
/// Implementations yield frames in presentation order and return `None`
/// once the recording is exhausted. The sequence is finite; the pipeline
/// drains it fully before any analysis begins.
pub trait FrameSource {
    /// Returns the next frame in recording order, or `None` at end of stream.
    fn next_frame(&mut self) -> Result<Option<Frame>, SourceError>;
}

/// Synthetic source that renders a fan-like brightness oscillation.
///
/// Produces frames whose region-of-interest brightness oscillates at the
/// rotation frequency programmed for each analysis window. One trailing pad
/// window (repeating the last scheduled speed) is appended so that every
/// scheduled window survives the pipeline's trailing-window discard.
#[derive(Debug)]
pub struct SyntheticSource {
    /// Target rotational speed (rpm) for each window.
    schedule: Vec<f64>,
    /// Frames per second of the synthetic recording.
    fps: f64,
    /// Samples per analysis window.
    window_size: usize,
    /// Frame width in pixels.
    width: u32,
    /// Frame height in pixels.
    height: u32,
    /// Frames emitted so far.
    emitted: usize,
}

impl SyntheticSource {
    /// Creates a source producing one window per scheduled rpm value.
    ///
    /// Prefer power-of-two frame rates (e.g. 32): the timestamps `k / fps`
    /// are then exactly representable and the estimated rate matches `fps`
    /// bit for bit.
    pub fn new(schedule: Vec<f64>, fps: f64, window_secs: f64) -> Self {
        let window_size = ((fps * window_secs).floor() as usize).max(1);
        Self {
            schedule,
            fps,
            window_size,
            width: 64,
            height: 48,
            emitted: 0,
        }
    }

    /// Creates a source that modulates one bit per window.
    ///
    /// Bit 1 windows spin at `high_rpm`, bit 0 windows at `low_rpm`.
    pub fn from_bits(bits: &[u8], high_rpm: f64, low_rpm: f64, fps: f64, window_secs: f64) -> Self {
        let schedule = bits
            .iter()
            .map(|&b| if b != 0 { high_rpm } else { low_rpm })
            .collect();
        Self::new(schedule, fps, window_secs)
    }

    /// Overrides the frame dimensions.
    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = width.max(3);
        self.height = height.max(3);
        self
    }

    /// Total frames this source will emit (schedule plus the pad window).
    pub fn total_frames(&self) -> usize {
        (self.schedule.len() + 1) * self.window_size
    }

    fn rpm_for_frame(&self, index: usize) -> f64 {
        let window = index / self.window_size;
        self.schedule
            .get(window)
            .or_else(|| self.schedule.last())
            .copied()
            .unwrap_or(0.0)
    }
}

impl FrameSource for SyntheticSource {
    fn next_frame(&mut self) -> Result<Option<Frame>, SourceError> {
        if self.emitted >= self.total_frames() {
            return Ok(None);
        }

        let rpm = self.rpm_for_frame(self.emitted);
        let rotations_per_sec = rpm / 60.0;
        // Phase restarts at each window boundary so every window holds an
        // integer number of cycles when rpm is a multiple of 30 at fps 32.
        let local = (self.emitted % self.window_size) as f64;
        let phase = 2.0 * std::f64::consts::PI * rotations_per_sec * (local / self.fps);
        let level = (128.0 + 96.0 * phase.sin()).clamp(0.0, 255.0) as u8;

        let pixel_count = (self.width as usize) * (self.height as usize) * 3;
        let pixels = vec![level; pixel_count];
        let timestamp = self.emitted as f64 / self.fps;
        self.emitted += 1;

        Ok(Some(Frame::new(
            pixels,
            self.width,
            self.height,
            3,
            timestamp,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(source: &mut SyntheticSource) -> Vec<Frame> {
        let mut frames = Vec::new();
        while let Some(frame) = source.next_frame().unwrap() {
            frames.push(frame);
        }
        frames
    }

    #[test]
    fn test_emits_schedule_plus_pad_window() {
        let mut source = SyntheticSource::new(vec![240.0, 120.0], 32.0, 2.0);
        let frames = drain(&mut source);

        // Two scheduled windows plus one pad window of 64 samples each.
        assert_eq!(frames.len(), 3 * 64);
        assert!(frames.iter().all(Frame::is_valid));
    }

    #[test]
    fn test_timestamps_are_uniform() {
        let mut source = SyntheticSource::new(vec![240.0], 32.0, 2.0);
        let frames = drain(&mut source);

        assert_eq!(frames[0].timestamp(), 0.0);
        assert_eq!(frames[32].timestamp(), 1.0);
    }

    #[test]
    fn test_zero_rpm_window_is_flat() {
        let mut source = SyntheticSource::new(vec![0.0], 32.0, 2.0);
        let frames = drain(&mut source);

        let first = frames[0].pixels()[0];
        assert!(frames.iter().all(|f| f.pixels()[0] == first));
    }

    #[test]
    fn test_exhausted_source_stays_empty() {
        let mut source = SyntheticSource::new(vec![120.0], 32.0, 2.0);
        drain(&mut source);

        assert!(source.next_frame().unwrap().is_none());
    }
}
