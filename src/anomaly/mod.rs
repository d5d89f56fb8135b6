//! Statistical anomaly detection over the rate series.
//!
//! A baseline model is fitted once on a synthetic reference distribution
//! and reused, read-only, across recordings. Scoring classifies each
//! window's rpm against that fixed boundary.

mod baseline;
mod scorer;

pub use baseline::{BaselineError, BaselineModel};
pub use scorer::{AnomalyLabel, AnomalyScorer};
