//! Regression metrics for model evaluation.
//!
//! [`ResidualAnalysis`] compares predictions with ground-truth labels and
//! produces a [`ResidualReport`]: error metrics of the predictions plus
//! summary statistics of the residuals `label - prediction`.

use crate::core::error::{HousingError, Result};
use crate::core::types::Score;
use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Residual report, serialised with one key per metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResidualReport {
    /// Mean of |error|
    pub mean_absolute_error: f64,
    /// Median of |error|
    pub median_absolute_error: f64,
    /// Mean of error squared
    pub mean_squared_error: f64,
    /// Mean of |error / label|, as a percentage
    pub mean_absolute_percentage_error: f64,
    /// Square root of the mean squared error
    pub rms_error: f64,
    /// Mean squared difference of `ln(1 + x)` between labels and predictions
    pub mean_squared_log_error: f64,
    /// Coefficient of determination
    pub r_squared: f64,
    /// Mean residual
    pub error_mean: f64,
    /// Midpoint of the smallest and largest residual
    pub error_midrange: f64,
    /// Median residual
    pub error_median: f64,
    /// Population variance of the residuals
    pub error_variance: f64,
    /// Population standard deviation of the residuals
    pub error_standard_deviation: f64,
    /// Median absolute deviation of the residuals
    pub error_mad: f64,
    /// Interquartile range of the residuals
    pub error_iqr: f64,
    /// Skewness of the residuals
    pub error_skewness: f64,
    /// Excess kurtosis of the residuals
    pub error_kurtosis: f64,
    /// Smallest residual
    pub error_min: f64,
    /// Largest residual
    pub error_max: f64,
    /// Number of predictions compared
    pub cardinality: usize,
}

impl fmt::Display for ResidualReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Residual Analysis ({} samples)", self.cardinality)?;
        writeln!(f, "  MAE:  {:.4}", self.mean_absolute_error)?;
        writeln!(f, "  MSE:  {:.4}", self.mean_squared_error)?;
        writeln!(f, "  RMSE: {:.4}", self.rms_error)?;
        writeln!(f, "  MAPE: {:.4}%", self.mean_absolute_percentage_error)?;
        write!(f, "  R²:   {:.6}", self.r_squared)
    }
}

/// Residual analysis report generator.
#[derive(Debug, Clone)]
pub struct ResidualAnalysis {
    /// Floor on |label| when dividing by it
    epsilon: f64,
}

impl Default for ResidualAnalysis {
    fn default() -> Self {
        ResidualAnalysis { epsilon: 1e-8 }
    }
}

impl ResidualAnalysis {
    /// Create a new report generator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate the report for `predictions` against `labels`.
    pub fn generate(
        &self,
        predictions: &ArrayView1<'_, Score>,
        labels: &ArrayView1<'_, Score>,
    ) -> Result<ResidualReport> {
        self.validate_inputs(predictions, labels)?;

        let n = labels.len() as f64;
        let errors: Vec<f64> = labels
            .iter()
            .zip(predictions.iter())
            .map(|(&y, &p)| y - p)
            .collect();

        let mut absolute: Vec<f64> = errors.iter().map(|e| e.abs()).collect();
        let mean_absolute_error = absolute.iter().sum::<f64>() / n;
        let mean_squared_error = errors.iter().map(|e| e * e).sum::<f64>() / n;

        let mean_absolute_percentage_error = 100.0
            * errors
                .iter()
                .zip(labels.iter())
                .map(|(e, &y)| (e / y.abs().max(self.epsilon)).abs())
                .sum::<f64>()
            / n;

        // Negative values are clipped so the log stays defined
        let mean_squared_log_error = labels
            .iter()
            .zip(predictions.iter())
            .map(|(&y, &p)| {
                let d = y.max(0.0).ln_1p() - p.max(0.0).ln_1p();
                d * d
            })
            .sum::<f64>()
            / n;

        let label_mean = labels.sum() / n;
        let total_sum_squares: f64 = labels.iter().map(|&y| (y - label_mean).powi(2)).sum();
        let r_squared = if total_sum_squares > 0.0 {
            1.0 - (mean_squared_error * n) / total_sum_squares
        } else {
            0.0
        };

        let error_mean = errors.iter().sum::<f64>() / n;
        let central_moment =
            |k: i32| errors.iter().map(|e| (e - error_mean).powi(k)).sum::<f64>() / n;
        let error_variance = central_moment(2);
        let (error_skewness, error_kurtosis) = if error_variance > 0.0 {
            (
                central_moment(3) / error_variance.powf(1.5),
                central_moment(4) / (error_variance * error_variance) - 3.0,
            )
        } else {
            (0.0, 0.0)
        };

        let mut sorted = errors.clone();
        sorted.sort_by(|a, b| a.total_cmp(b));
        let error_min = sorted[0];
        let error_max = sorted[sorted.len() - 1];
        let error_median = percentile(&sorted, 50.0);
        let error_iqr = percentile(&sorted, 75.0) - percentile(&sorted, 25.0);

        let mut deviations: Vec<f64> = errors.iter().map(|e| (e - error_median).abs()).collect();
        deviations.sort_by(|a, b| a.total_cmp(b));
        let error_mad = percentile(&deviations, 50.0);

        absolute.sort_by(|a, b| a.total_cmp(b));
        let median_absolute_error = percentile(&absolute, 50.0);

        Ok(ResidualReport {
            mean_absolute_error,
            median_absolute_error,
            mean_squared_error,
            mean_absolute_percentage_error,
            rms_error: mean_squared_error.sqrt(),
            mean_squared_log_error,
            r_squared,
            error_mean,
            error_midrange: (error_min + error_max) / 2.0,
            error_median,
            error_variance,
            error_standard_deviation: error_variance.sqrt(),
            error_mad,
            error_iqr,
            error_skewness,
            error_kurtosis,
            error_min,
            error_max,
            cardinality: labels.len(),
        })
    }

    fn validate_inputs(
        &self,
        predictions: &ArrayView1<'_, Score>,
        labels: &ArrayView1<'_, Score>,
    ) -> Result<()> {
        if predictions.len() != labels.len() {
            return Err(HousingError::dimension_mismatch(
                format!("{} predictions", labels.len()),
                format!("{} predictions", predictions.len()),
            ));
        }

        if labels.is_empty() {
            return Err(HousingError::dataset(
                "Cannot analyse residuals of an empty testing set",
            ));
        }

        if predictions.iter().chain(labels.iter()).any(|v| !v.is_finite()) {
            return Err(HousingError::prediction(
                "Predictions and labels must be finite",
            ));
        }

        Ok(())
    }
}

/// Linear-interpolated percentile of an ascending, non-empty slice.
fn percentile(sorted: &[f64], q: f64) -> f64 {
    let rank = (q / 100.0) * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let fraction = rank - lower as f64;
    sorted[lower] + fraction * (sorted[upper] - sorted[lower])
}
