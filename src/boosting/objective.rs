//! Objective functions for gradient boosting.

use crate::core::error::{HousingError, Result};
use crate::core::types::Score;
use ndarray::{ArrayView1, ArrayViewMut1, Zip};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Loss minimised by the booster.
pub trait ObjectiveFunction: Debug {
    /// Get the objective function name.
    fn name(&self) -> &'static str;

    /// Constant prediction the ensemble starts from.
    fn init_score(&self, labels: &ArrayView1<'_, Score>) -> Score;

    /// Write the negative gradient of the loss at `predictions` into
    /// `residuals`. These are the targets of the next tree.
    fn compute_residuals(
        &self,
        predictions: &ArrayView1<'_, Score>,
        labels: &ArrayView1<'_, Score>,
        residuals: &mut ArrayViewMut1<'_, Score>,
    ) -> Result<()>;

    /// Loss of `predictions` against `labels`.
    fn loss(&self, predictions: &ArrayView1<'_, Score>, labels: &ArrayView1<'_, Score>) -> Score;

    /// Validate labels for this objective function.
    fn validate_labels(&self, labels: &ArrayView1<'_, Score>) -> Result<()> {
        if let Some(i) = labels.iter().position(|v| !v.is_finite()) {
            return Err(HousingError::training(format!(
                "Label at index {} is not finite",
                i
            )));
        }
        Ok(())
    }
}

/// Least squares regression objective.
///
/// Starts from the label mean; residuals are `label - prediction` and the
/// loss is the mean squared residual.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RegressionObjective;

impl ObjectiveFunction for RegressionObjective {
    fn name(&self) -> &'static str {
        "least squares"
    }

    fn init_score(&self, labels: &ArrayView1<'_, Score>) -> Score {
        labels.mean().unwrap_or(0.0)
    }

    fn compute_residuals(
        &self,
        predictions: &ArrayView1<'_, Score>,
        labels: &ArrayView1<'_, Score>,
        residuals: &mut ArrayViewMut1<'_, Score>,
    ) -> Result<()> {
        if predictions.len() != labels.len() || residuals.len() != labels.len() {
            return Err(HousingError::dimension_mismatch(
                format!("{} values", labels.len()),
                format!(
                    "{} predictions and {} residuals",
                    predictions.len(),
                    residuals.len()
                ),
            ));
        }

        Zip::from(residuals)
            .and(predictions)
            .and(labels)
            .for_each(|r, &p, &y| *r = y - p);

        Ok(())
    }

    fn loss(&self, predictions: &ArrayView1<'_, Score>, labels: &ArrayView1<'_, Score>) -> Score {
        if labels.is_empty() {
            return 0.0;
        }
        let sum: f64 = predictions
            .iter()
            .zip(labels.iter())
            .map(|(p, y)| (y - p) * (y - p))
            .sum();
        sum / labels.len() as f64
    }
}
