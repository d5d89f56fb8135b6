//! Frame input and handling.
//!
//! This module provides the frame type and the source abstraction the
//! pipeline pulls frames through. Sources are treated as suppliers of
//! ordered, timestamped pixel buffers; container and codec concerns stay
//! on the other side of the [`FrameSource`] trait.

mod frame;
mod source;

pub use frame::Frame;
pub use source::{FrameSource, SourceError, SyntheticSource};
