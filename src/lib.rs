//! Optical Exfiltration Analysis Library
//!
//! Recovers a digital message covertly embedded in the rotational speed of
//! a mechanical oscillator (typically a cooling fan) that was captured on
//! video. Frame-by-frame brightness of a fixed region of interest modulates
//! with rotation; windowed spectral analysis turns that modulation back
//! into a speed series, which is thresholded into bits and decoded into
//! text. A pre-fit statistical baseline flags anomalous speed windows.
//!
//! # Architecture
//!
//! The pipeline is an explicit data flow over one fully buffered recording:
//!
//! ```text
//! capture → extraction → spectral → decode
//!                            ↓
//!                         anomaly
//! ```
//!
//! # Design Principles
//!
//! - **Sources are external**: the core consumes ordered timestamped
//!   frames; demuxing and codec handling stay behind [`capture::FrameSource`]
//! - **Timestamps over metadata**: the effective sampling rate is estimated
//!   from the frame timestamps, not the container's reported rate
//! - **Degrade, don't die**: zero-variance windows produce flagged zero-rpm
//!   samples; only malformed frames and a signal-free recording abort a run
//! - **Fixed baseline**: anomaly classification uses a boundary fitted once
//!   on a reference distribution, never statistics of the current recording
//!
//! # Example
//!
//! ```
//! use optical_exfil::{
//!     anomaly::BaselineModel,
//!     capture::SyntheticSource,
//!     config::{AnalysisConfig, BaselineConfig},
//!     decode::SymbolTable,
//!     pipeline::analyze,
//! };
//!
//! let config = AnalysisConfig::default();
//! let baseline = BaselineModel::fit(&BaselineConfig::default()).unwrap();
//!
//! // Render a short synthetic recording carrying "HELLO".
//! let bits = SymbolTable::DEFAULT.encode_message("HELLO").unwrap();
//! let mut source = SyntheticSource::from_bits(&bits, 240.0, 120.0, 32.0, config.window_secs);
//!
//! let report = analyze(&mut source, &config, &baseline).unwrap();
//! assert!(report.message.starts_with("HELLO"));
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod anomaly;
pub mod capture;
pub mod config;
pub mod decode;
pub mod extraction;
pub mod pipeline;
pub mod spectral;

// Re-export commonly used types at crate root
pub use anomaly::{AnomalyLabel, AnomalyScorer, BaselineModel};
pub use capture::{Frame, FrameSource, SyntheticSource};
pub use config::{AnalysisConfig, BaselineConfig, FileConfig};
pub use decode::{Bitstream, SymbolTable};
pub use extraction::FrameSample;
pub use pipeline::{analyze, AnalysisError, AnalysisReport};
pub use spectral::RateSample;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
