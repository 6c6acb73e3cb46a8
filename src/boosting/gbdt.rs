//! Gradient boosted regression trees.
//!
//! [`GradientBoost`] fits an additive ensemble of regression trees to the
//! residuals of the current prediction, one stage at a time. Each stage
//! trains on a random subsample of the rows (drawn without replacement)
//! and contributes its output scaled by the learning rate. The training
//! loss of every stage is recorded and logged.

use crate::boosting::early_stopping::{EarlyStopping, EarlyStoppingConfig};
use crate::boosting::objective::{ObjectiveFunction, RegressionObjective};
use crate::config::Config;
use crate::core::error::{HousingError, Result};
use crate::core::types::{Score, Value};
use crate::dataset::Labeled;
use crate::tree::{SerialTreeLearner, SerialTreeLearnerConfig, Tree, TreeLearner};
use ndarray::Array1;
use rand::rngs::StdRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Gradient boosting regressor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradientBoost {
    /// Hyperparameters the model was built with
    config: Config,
    /// Loss being minimised
    objective: RegressionObjective,
    /// Initial prediction, set once trained
    base_score: Option<Score>,
    /// Fitted trees, in stage order
    ensemble: Vec<Tree>,
    /// Training loss of every stage
    steps: Vec<Score>,
    /// Feature column names seen during training
    feature_names: Vec<String>,
}

impl GradientBoost {
    /// Create a new untrained booster.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(GradientBoost {
            config,
            objective: RegressionObjective,
            base_score: None,
            ensemble: Vec::new(),
            steps: Vec::new(),
            feature_names: Vec::new(),
        })
    }

    /// Get the current configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Whether the model has been trained
    pub fn is_trained(&self) -> bool {
        self.base_score.is_some()
    }

    /// Initial prediction of the ensemble
    pub fn base_score(&self) -> Option<Score> {
        self.base_score
    }

    /// Fitted trees
    pub fn trees(&self) -> &[Tree] {
        &self.ensemble
    }

    /// Number of fitted trees
    pub fn num_trees(&self) -> usize {
        self.ensemble.len()
    }

    /// Training loss at each stage, in order.
    pub fn steps(&self) -> &[Score] {
        &self.steps
    }

    /// Feature column names seen during training
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Train on `dataset`, seeding the subsampler from the configured
    /// random seed or from entropy.
    pub fn train(&mut self, dataset: &Labeled) -> Result<()> {
        let mut rng = match self.config.random_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.train_with_rng(dataset, &mut rng)
    }

    /// Train on `dataset` using `rng` for row subsampling.
    ///
    /// Any previous fit is discarded. Labels must already be numeric.
    pub fn train_with_rng<R: Rng + ?Sized>(&mut self, dataset: &Labeled, rng: &mut R) -> Result<()> {
        if dataset.is_empty() {
            return Err(HousingError::training("Cannot train on an empty dataset"));
        }

        let labels = dataset.numeric_labels()?;
        self.objective.validate_labels(&labels.view())?;

        let learner = SerialTreeLearner::new(SerialTreeLearnerConfig::from(&self.config))?;
        let mut early_stopping = EarlyStopping::new(EarlyStoppingConfig::from(&self.config));

        let n = dataset.num_samples();
        let subsample_size = self.config.subsample_size(n).min(n);
        let learning_rate = self.config.learning_rate;

        let base_score = self.objective.init_score(&labels.view());
        let mut predictions = Array1::from_elem(n, base_score);
        let mut residuals = Array1::zeros(n);

        self.ensemble.clear();
        self.steps.clear();
        self.base_score = None;

        log::info!(
            "Training gradient boost ({}) on {} samples, {} per stage, up to {} stages",
            self.objective.name(),
            n,
            subsample_size,
            self.config.num_iterations
        );

        for epoch in 1..=self.config.num_iterations {
            self.objective.compute_residuals(
                &predictions.view(),
                &labels.view(),
                &mut residuals.view_mut(),
            )?;
            let loss = self.objective.loss(&predictions.view(), &labels.view());

            if !loss.is_finite() {
                log::warn!("Numerical instability detected at epoch {}, loss={}", epoch, loss);
                break;
            }

            let rows = index::sample(rng, n, subsample_size).into_vec();
            let tree = learner
                .train(dataset.samples(), residuals.view(), &rows)?
                .with_shrinkage(learning_rate);

            for (prediction, sample) in predictions.iter_mut().zip(dataset.samples()) {
                *prediction += tree.predict(sample);
            }

            self.ensemble.push(tree);
            self.steps.push(loss);

            log::info!("Epoch {} loss={}", epoch, loss);

            if early_stopping.update(loss, epoch) {
                break;
            }
        }

        if self.steps.is_empty() {
            return Err(HousingError::training("No boosting stage completed"));
        }

        self.base_score = Some(base_score);
        self.feature_names = dataset.feature_names().to_vec();

        log::info!("Training complete with {} trees", self.ensemble.len());
        Ok(())
    }

    /// Predict one value per sample.
    pub fn predict(&self, samples: &[Vec<Value>]) -> Result<Array1<Score>> {
        samples
            .iter()
            .map(|sample| self.predict_sample(sample))
            .collect::<Result<Vec<_>>>()
            .map(Array1::from_vec)
    }

    /// Predict a single sample.
    pub fn predict_sample(&self, sample: &[Value]) -> Result<Score> {
        let base_score = self
            .base_score
            .ok_or_else(|| HousingError::prediction("Model has not been trained"))?;

        if sample.len() != self.feature_names.len() {
            return Err(HousingError::dimension_mismatch(
                format!("{} features", self.feature_names.len()),
                format!("{} features", sample.len()),
            ));
        }

        Ok(base_score + self.ensemble.iter().map(|tree| tree.predict(sample)).sum::<f64>())
    }

    /// Normalised importance of every feature, in column order.
    ///
    /// Importance is the share of the total split gain across the ensemble
    /// attributed to splits on that feature.
    pub fn feature_importances(&self) -> Vec<(String, f64)> {
        let mut gains = vec![0.0; self.feature_names.len()];
        for tree in &self.ensemble {
            for (total, gain) in gains.iter_mut().zip(tree.split_gains()) {
                *total += gain;
            }
        }

        let sum: f64 = gains.iter().sum();
        if sum > 0.0 {
            gains.iter_mut().for_each(|g| *g /= sum);
        }

        self.feature_names.iter().cloned().zip(gains).collect()
    }
}
