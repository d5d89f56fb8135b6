//! Region-of-interest brightness extraction.
//!
//! Each frame is reduced to a single scalar: the mean luminance of the
//! central region of interest. The ROI is the middle third of the frame in
//! both dimensions, which keeps the oscillator centered in view while
//! ignoring background clutter at the edges.

use crate::capture::Frame;
use serde::Serialize;
use thiserror::Error;

/// BT.601 luma weights, matching the common video gray conversion.
const LUMA_R: f64 = 0.299;
const LUMA_G: f64 = 0.587;
const LUMA_B: f64 = 0.114;

/// Errors that can occur during brightness extraction.
///
/// Any of these fails the whole run: a malformed frame means the recording
/// cannot be trusted.
#[derive(Debug, Clone, Error)]
pub enum ExtractionError {
    #[error("frame too small for ROI analysis: {width}x{height}")]
    MalformedFrame { width: u32, height: u32 },
    #[error("pixel buffer length {actual} does not match {width}x{height}x{channels}")]
    BufferMismatch {
        actual: usize,
        width: u32,
        height: u32,
        channels: u32,
    },
    #[error("unsupported channel count: {0}")]
    UnsupportedChannels(u32),
}

/// One frame reduced to its ROI brightness.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FrameSample {
    /// Presentation timestamp in seconds.
    pub timestamp: f64,
    /// Mean ROI luminance in [0, 255].
    pub brightness: f64,
}

/// Computes the mean luminance over the frame's central ROI.
///
/// The ROI spans rows `h/3..2h/3` and columns `w/3..2w/3`. Frames narrower
/// or shorter than 3 pixels have an empty ROI and are rejected.
pub fn roi_brightness(frame: &Frame) -> Result<f64, ExtractionError> {
    let (width, height, channels) = (frame.width(), frame.height(), frame.channels());

    if width < 3 || height < 3 {
        return Err(ExtractionError::MalformedFrame { width, height });
    }
    if !frame.is_valid() {
        return Err(ExtractionError::BufferMismatch {
            actual: frame.pixels().len(),
            width,
            height,
            channels,
        });
    }
    if channels != 1 && channels < 3 {
        return Err(ExtractionError::UnsupportedChannels(channels));
    }

    let (row_start, row_end) = (height / 3, 2 * height / 3);
    let (col_start, col_end) = (width / 3, 2 * width / 3);

    let pixels = frame.pixels();
    let stride = (width * channels) as usize;
    let mut sum = 0.0;
    let mut count = 0usize;

    for row in row_start..row_end {
        let row_base = row as usize * stride;
        for col in col_start..col_end {
            let offset = row_base + (col * channels) as usize;
            let luma = if channels == 1 {
                pixels[offset] as f64
            } else {
                LUMA_R * pixels[offset] as f64
                    + LUMA_G * pixels[offset + 1] as f64
                    + LUMA_B * pixels[offset + 2] as f64
            };
            sum += luma;
            count += 1;
        }
    }

    Ok(sum / count as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_frame(level: u8, width: u32, height: u32, channels: u32) -> Frame {
        let len = (width * height * channels) as usize;
        Frame::new(vec![level; len], width, height, channels, 0.0)
    }

    #[test]
    fn test_solid_frame_brightness() {
        let frame = solid_frame(200, 30, 30, 3);
        let brightness = roi_brightness(&frame).unwrap();

        // Luma weights sum to 1, so a solid frame keeps its level.
        assert!((brightness - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_grayscale_frame_brightness() {
        let frame = solid_frame(77, 12, 9, 1);
        assert!((roi_brightness(&frame).unwrap() - 77.0).abs() < 1e-9);
    }

    #[test]
    fn test_roi_ignores_border() {
        // Bright center third, dark border.
        let (w, h) = (9u32, 9u32);
        let mut pixels = vec![0u8; (w * h) as usize];
        for row in 3..6 {
            for col in 3..6 {
                pixels[(row * w + col) as usize] = 240;
            }
        }
        let frame = Frame::new(pixels, w, h, 1, 0.0);

        assert!((roi_brightness(&frame).unwrap() - 240.0).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_dimensions_rejected() {
        let frame = solid_frame(10, 2, 30, 3);
        assert!(matches!(
            roi_brightness(&frame),
            Err(ExtractionError::MalformedFrame { .. })
        ));
    }

    #[test]
    fn test_buffer_mismatch_rejected() {
        let frame = Frame::new(vec![0u8; 10], 30, 30, 3, 0.0);
        assert!(matches!(
            roi_brightness(&frame),
            Err(ExtractionError::BufferMismatch { .. })
        ));
    }

    #[test]
    fn test_two_channel_frames_rejected() {
        let frame = solid_frame(10, 30, 30, 2);
        assert!(matches!(
            roi_brightness(&frame),
            Err(ExtractionError::UnsupportedChannels(2))
        ));
    }
}
