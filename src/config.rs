//! Analysis configuration.
//!
//! Fixed, validated knobs for one run: window duration, bit threshold, the
//! symbol alphabet, and the parameters of the synthetic reference set the
//! anomaly baseline is fitted on.

use crate::decode::SymbolTable;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration for the frame-to-message pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Duration of one spectral window in seconds.
    pub window_secs: f64,
    /// Rpm at or above which a window encodes bit 1.
    pub rpm_threshold: f64,
    /// Fallback rate when the recording has fewer than two timestamps.
    pub nominal_fps: f64,
    /// Alphabet used to decode 4-bit symbols.
    pub symbols: SymbolTable,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            window_secs: 2.0,
            rpm_threshold: 200.0,
            nominal_fps: 30.0,
            symbols: SymbolTable::DEFAULT,
        }
    }
}

impl AnalysisConfig {
    /// Validates the configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.window_secs.is_finite() || self.window_secs <= 0.0 {
            return Err(ConfigError::InvalidWindowDuration(self.window_secs));
        }
        if !self.rpm_threshold.is_finite() || self.rpm_threshold < 0.0 {
            return Err(ConfigError::InvalidThreshold(self.rpm_threshold));
        }
        if !self.nominal_fps.is_finite() || self.nominal_fps <= 0.0 {
            return Err(ConfigError::InvalidNominalRate(self.nominal_fps));
        }
        Ok(())
    }
}

/// Parameters of the synthetic reference distribution the anomaly baseline
/// learns from: a tight normal cluster of ordinary speeds plus a small
/// fraction of injected high-speed outliers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BaselineConfig {
    /// Mean rpm of the normal cluster.
    pub normal_mean: f64,
    /// Standard deviation of the normal cluster.
    pub normal_std: f64,
    /// Samples drawn from the normal cluster.
    pub normal_count: usize,
    /// Lower bound of the injected outlier range (rpm).
    pub outlier_low: f64,
    /// Upper bound of the injected outlier range (rpm).
    pub outlier_high: f64,
    /// Injected outlier samples.
    pub outlier_count: usize,
    /// Expected outlier proportion; sets the decision boundary quantile.
    pub contamination: f64,
    /// Seed for the reference draw, fixed for reproducible fits.
    pub seed: u64,
}

impl Default for BaselineConfig {
    fn default() -> Self {
        Self {
            normal_mean: 1800.0,
            normal_std: 100.0,
            normal_count: 1000,
            outlier_low: 2200.0,
            outlier_high: 3000.0,
            outlier_count: 50,
            contamination: 0.05,
            seed: 42,
        }
    }
}

impl BaselineConfig {
    /// Validates the reference-distribution parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.normal_count == 0 {
            return Err(ConfigError::EmptyReference);
        }
        if !self.normal_std.is_finite() || self.normal_std <= 0.0 {
            return Err(ConfigError::InvalidReferenceSpread(self.normal_std));
        }
        if self.outlier_count > 0 && self.outlier_low >= self.outlier_high {
            return Err(ConfigError::InvalidOutlierRange {
                low: self.outlier_low,
                high: self.outlier_high,
            });
        }
        if !self.contamination.is_finite()
            || self.contamination <= 0.0
            || self.contamination > 0.5
        {
            return Err(ConfigError::InvalidContamination(self.contamination));
        }
        Ok(())
    }
}

/// Configuration validation and loading errors.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("invalid window duration: {0} s")]
    InvalidWindowDuration(f64),
    #[error("invalid rpm threshold: {0}")]
    InvalidThreshold(f64),
    #[error("invalid nominal frame rate: {0}")]
    InvalidNominalRate(f64),
    #[error("reference distribution needs at least one normal sample")]
    EmptyReference,
    #[error("invalid reference spread: {0}")]
    InvalidReferenceSpread(f64),
    #[error("invalid outlier range: {low}..{high}")]
    InvalidOutlierRange { low: f64, high: f64 },
    #[error("contamination {0} outside (0, 0.5]")]
    InvalidContamination(f64),
    #[error("failed to read config file: {0}")]
    FileReadError(String),
    #[error("failed to parse config file: {0}")]
    ParseError(String),
}

/// Full configuration file format.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileConfig {
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub baseline: BaselineConfig,
}

impl FileConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::FileReadError(e.to_string()))?;
        let config: FileConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.analysis.validate()?;
        config.baseline.validate()?;
        Ok(config)
    }
}
