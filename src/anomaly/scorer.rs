//! Batch anomaly scoring of a rate series.

use super::BaselineModel;
use crate::spectral::RateSample;
use serde::Serialize;

/// Anomaly verdict for one analysis window.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct AnomalyLabel {
    /// Window index, aligned with the rate series.
    pub window_index: usize,
    /// True when the window's rpm falls outside the baseline boundary.
    pub is_outlier: bool,
    /// Continuous score; positive is normal, negative is outlier.
    pub score: f64,
}

/// Applies a pre-fit baseline to a run's rate samples.
pub struct AnomalyScorer<'a> {
    model: &'a BaselineModel,
}

impl<'a> AnomalyScorer<'a> {
    /// Creates a scorer over the given fitted model.
    pub fn new(model: &'a BaselineModel) -> Self {
        Self { model }
    }

    /// Labels every sample against the fixed baseline boundary.
    pub fn score_series(&self, rates: &[RateSample]) -> Vec<AnomalyLabel> {
        let labels: Vec<AnomalyLabel> = rates
            .iter()
            .map(|rate| AnomalyLabel {
                window_index: rate.window_index,
                is_outlier: self.model.is_outlier(rate.rpm),
                score: self.model.score(rate.rpm),
            })
            .collect();

        let outliers = labels.iter().filter(|l| l.is_outlier).count();
        if outliers > 0 {
            tracing::debug!(windows = labels.len(), outliers, "anomalous windows found");
        }
        labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BaselineConfig;

    fn rate(window_index: usize, rpm: f64) -> RateSample {
        RateSample {
            window_index,
            time_secs: window_index as f64 * 2.0,
            rpm,
            degenerate: false,
        }
    }

    #[test]
    fn test_single_extreme_among_cluster() {
        let model = BaselineModel::fit(&BaselineConfig::default()).unwrap();
        let scorer = AnomalyScorer::new(&model);

        let rates = vec![
            rate(0, 1790.0),
            rate(1, 1810.0),
            rate(2, 5200.0),
            rate(3, 1805.0),
        ];
        let labels = scorer.score_series(&rates);

        assert_eq!(labels.len(), 4);
        assert!(!labels[0].is_outlier);
        assert!(!labels[1].is_outlier);
        assert!(labels[2].is_outlier);
        assert!(!labels[3].is_outlier);
    }

    #[test]
    fn test_labels_align_with_window_indices() {
        let model = BaselineModel::fit(&BaselineConfig::default()).unwrap();
        let scorer = AnomalyScorer::new(&model);

        let labels = scorer.score_series(&[rate(7, 1800.0)]);
        assert_eq!(labels[0].window_index, 7);
    }

    #[test]
    fn test_empty_series_yields_no_labels() {
        let model = BaselineModel::fit(&BaselineConfig::default()).unwrap();
        let scorer = AnomalyScorer::new(&model);

        assert!(scorer.score_series(&[]).is_empty());
    }
}
