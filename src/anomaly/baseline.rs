//! Pre-fit anomaly baseline model.
//!
//! The model is fitted once, ahead of any recording, on a synthetic
//! reference distribution of normal rotational speeds plus a small injected
//! fraction of high-speed outliers. A run's samples are then classified
//! against this fixed boundary — never against statistics of the run
//! itself, so a single extreme window in an otherwise clean recording is
//! still flagged.

use crate::config::{BaselineConfig, ConfigError};
use rand::{rngs::StdRng, Rng, SeedableRng};
use rand_distr::{Normal, Uniform};
use serde::Serialize;
use thiserror::Error;

/// Lower bound on the learned spread, guards the standardization divide.
const MIN_STD: f64 = 1e-3;

/// Errors raised while fitting the baseline.
#[derive(Debug, Clone, Error)]
pub enum BaselineError {
    #[error(transparent)]
    InvalidConfig(#[from] ConfigError),
    #[error("invalid reference distribution: {0}")]
    Distribution(String),
}

/// Immutable decision boundary learned from the reference distribution.
///
/// Standardizes values with the reference mean/spread and separates normal
/// from outlier at a fixed |z| boundary set by the contamination quantile.
/// Plain data after the fit: share by reference across concurrent runs.
#[derive(Debug, Clone, Serialize)]
pub struct BaselineModel {
    mean: f64,
    std: f64,
    boundary: f64,
    contamination: f64,
    reference_size: usize,
}

impl BaselineModel {
    /// Fits the model on the configured synthetic reference set.
    pub fn fit(config: &BaselineConfig) -> Result<Self, BaselineError> {
        config.validate()?;

        let mut rng = StdRng::seed_from_u64(config.seed);
        let normal = Normal::new(config.normal_mean, config.normal_std)
            .map_err(|e| BaselineError::Distribution(e.to_string()))?;

        let mut reference: Vec<f64> = (0..config.normal_count)
            .map(|_| rng.sample(normal))
            .collect();
        if config.outlier_count > 0 {
            let outliers = Uniform::new(config.outlier_low, config.outlier_high);
            reference.extend((0..config.outlier_count).map(|_| rng.sample(outliers)));
        }

        let n = reference.len() as f64;
        let mean = reference.iter().sum::<f64>() / n;
        let variance = reference.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
        let std = variance.sqrt().max(MIN_STD);

        let mut scores: Vec<f64> = reference.iter().map(|x| ((x - mean) / std).abs()).collect();
        scores.sort_by(|a, b| a.total_cmp(b));
        let index = (((1.0 - config.contamination) * scores.len() as f64).floor() as usize)
            .min(scores.len() - 1);
        let boundary = scores[index];

        tracing::info!(
            mean,
            std,
            boundary,
            reference_size = reference.len(),
            "anomaly baseline fitted"
        );

        Ok(Self {
            mean,
            std,
            boundary,
            contamination: config.contamination,
            reference_size: reference.len(),
        })
    }

    /// Continuous anomaly score: positive is normal, negative is outlier.
    ///
    /// Defined as `boundary - |z|` with z standardized by the reference
    /// statistics, matching the decision-function polarity of the usual
    /// boundary classifiers.
    pub fn score(&self, rpm: f64) -> f64 {
        self.boundary - ((rpm - self.mean) / self.std).abs()
    }

    /// Boolean decision at the fitted boundary.
    pub fn is_outlier(&self, rpm: f64) -> bool {
        self.score(rpm) < 0.0
    }

    /// Reference mean used for standardization.
    #[inline]
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Reference spread used for standardization.
    #[inline]
    pub fn std_dev(&self) -> f64 {
        self.std
    }

    /// |z| decision boundary.
    #[inline]
    pub fn boundary(&self) -> f64 {
        self.boundary
    }

    /// Contamination fraction the boundary was derived from.
    #[inline]
    pub fn contamination(&self) -> f64 {
        self.contamination
    }

    /// Size of the reference set the model was fitted on.
    #[inline]
    pub fn reference_size(&self) -> usize {
        self.reference_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_is_deterministic() {
        let config = BaselineConfig::default();
        let a = BaselineModel::fit(&config).unwrap();
        let b = BaselineModel::fit(&config).unwrap();

        assert_eq!(a.mean(), b.mean());
        assert_eq!(a.std_dev(), b.std_dev());
        assert_eq!(a.boundary(), b.boundary());
    }

    #[test]
    fn test_cluster_values_are_normal() {
        let model = BaselineModel::fit(&BaselineConfig::default()).unwrap();

        for rpm in [1750.0, 1800.0, 1850.0] {
            assert!(!model.is_outlier(rpm), "rpm {rpm} should be normal");
            assert!(model.score(rpm) > 0.0);
        }
    }

    #[test]
    fn test_far_value_is_outlier() {
        let model = BaselineModel::fit(&BaselineConfig::default()).unwrap();

        assert!(model.is_outlier(5000.0));
        assert!(model.score(5000.0) < 0.0);
        // Far below the cluster counts too: the boundary is on |z|.
        assert!(model.is_outlier(0.0));
    }

    #[test]
    fn test_boundary_respects_contamination() {
        let config = BaselineConfig::default();
        let model = BaselineModel::fit(&config).unwrap();

        // Redraw the reference and check the flagged fraction.
        let mut rng = StdRng::seed_from_u64(config.seed);
        let normal = Normal::new(config.normal_mean, config.normal_std).unwrap();
        let mut reference: Vec<f64> =
            (0..config.normal_count).map(|_| rng.sample(normal)).collect();
        let outliers = Uniform::new(config.outlier_low, config.outlier_high);
        reference.extend((0..config.outlier_count).map(|_| rng.sample(outliers)));

        let flagged = reference.iter().filter(|&&x| model.is_outlier(x)).count();
        let fraction = flagged as f64 / reference.len() as f64;

        assert!(fraction > 0.03 && fraction < 0.07, "fraction {fraction}");
    }

    #[test]
    fn test_invalid_contamination_rejected() {
        let mut config = BaselineConfig::default();
        config.contamination = 0.0;
        assert!(matches!(
            BaselineModel::fit(&config),
            Err(BaselineError::InvalidConfig(_))
        ));
    }
}
