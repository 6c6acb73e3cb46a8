//! Core configuration structure and builder for the housing pipeline.
//!
//! [`Config`] carries the boosting hyperparameters, the regression tree
//! settings, the train/test split ratio and every file path the job
//! reads or writes. The defaults are the fixed settings of the housing
//! price job.

use crate::core::constants::*;
use crate::core::error::{HousingError, Result};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure for training and evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // Regression tree parameters
    /// Maximum number of split levels below the root of each tree
    pub max_depth: usize,
    /// Nodes holding this many samples or fewer become leaves
    pub max_leaf_size: usize,
    /// Minimum impurity decrease required to make a split
    pub min_purity_increase: f64,

    // Boosting parameters
    /// Learning rate (shrinkage) applied to every tree
    pub learning_rate: f64,
    /// Maximum number of boosting stages
    pub num_iterations: usize,
    /// Fraction of training rows sampled for each stage
    pub subsample_ratio: f64,
    /// Stop when the loss changes by less than this between stages
    pub min_change: f64,
    /// Stop when the loss falls below this value
    pub tolerance: f64,

    // Data split
    /// Fraction of the dataset used for training
    pub train_fraction: f64,
    /// Random seed for shuffling and subsampling (None = entropy)
    pub random_seed: Option<u64>,

    // Input/output
    /// Input dataset path
    pub dataset_path: PathBuf,
    /// Loss history output path
    pub progress_path: PathBuf,
    /// Residual report output path
    pub report_path: PathBuf,
    /// Model output path
    pub model_path: PathBuf,
    /// Keep a timestamped copy of an existing model file instead of overwriting it
    pub keep_model_history: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_depth: DEFAULT_MAX_DEPTH,
            max_leaf_size: DEFAULT_MAX_LEAF_SIZE,
            min_purity_increase: DEFAULT_MIN_PURITY_INCREASE,

            learning_rate: DEFAULT_LEARNING_RATE,
            num_iterations: DEFAULT_NUM_ITERATIONS,
            subsample_ratio: DEFAULT_SUBSAMPLE_RATIO,
            min_change: DEFAULT_MIN_CHANGE,
            tolerance: DEFAULT_TOLERANCE,

            train_fraction: DEFAULT_TRAIN_FRACTION,
            random_seed: None,

            dataset_path: PathBuf::from(DATASET_FILE),
            progress_path: PathBuf::from(PROGRESS_FILE),
            report_path: PathBuf::from(REPORT_FILE),
            model_path: PathBuf::from(MODEL_FILE),
            keep_model_history: false,
        }
    }
}

impl Config {
    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<()> {
        // Validate learning rate
        if !(self.learning_rate > 0.0 && self.learning_rate <= 1.0) {
            return Err(HousingError::invalid_parameter(
                "learning_rate",
                self.learning_rate.to_string(),
                "must be in range (0.0, 1.0]",
            ));
        }

        if self.num_iterations < 1 {
            return Err(HousingError::invalid_parameter(
                "num_iterations",
                self.num_iterations.to_string(),
                "must be at least 1",
            ));
        }

        if !(self.subsample_ratio > 0.0 && self.subsample_ratio <= 1.0) {
            return Err(HousingError::invalid_parameter(
                "subsample_ratio",
                self.subsample_ratio.to_string(),
                "must be in range (0.0, 1.0]",
            ));
        }

        if self.max_depth < 1 {
            return Err(HousingError::invalid_parameter(
                "max_depth",
                self.max_depth.to_string(),
                "must be at least 1",
            ));
        }

        if self.max_leaf_size < 1 {
            return Err(HousingError::invalid_parameter(
                "max_leaf_size",
                self.max_leaf_size.to_string(),
                "must be at least 1",
            ));
        }

        if !(self.min_purity_increase.is_finite() && self.min_purity_increase >= 0.0) {
            return Err(HousingError::invalid_parameter(
                "min_purity_increase",
                self.min_purity_increase.to_string(),
                "must be finite and non-negative",
            ));
        }

        if !(self.min_change.is_finite() && self.min_change >= 0.0) {
            return Err(HousingError::invalid_parameter(
                "min_change",
                self.min_change.to_string(),
                "must be finite and non-negative",
            ));
        }

        if !(self.tolerance.is_finite() && self.tolerance >= 0.0) {
            return Err(HousingError::invalid_parameter(
                "tolerance",
                self.tolerance.to_string(),
                "must be finite and non-negative",
            ));
        }

        // The split must leave rows on both sides
        if !(self.train_fraction > 0.0 && self.train_fraction < 1.0) {
            return Err(HousingError::invalid_parameter(
                "train_fraction",
                self.train_fraction.to_string(),
                "must be in range (0.0, 1.0)",
            ));
        }

        Ok(())
    }

    /// Load configuration from a file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| HousingError::config(format!("Failed to read config file: {}", e)))?;

        let config: Config = if path.extension().and_then(|s| s.to_str()) == Some("json") {
            serde_json::from_str(&content)
                .map_err(|e| HousingError::config(format!("Failed to parse JSON config: {}", e)))?
        } else if path.extension().and_then(|s| s.to_str()) == Some("toml") {
            toml::from_str(&content)
                .map_err(|e| HousingError::config(format!("Failed to parse TOML config: {}", e)))?
        } else {
            return Err(HousingError::config(
                "Unsupported config file format. Use .json or .toml",
            ));
        };

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = if path.extension().and_then(|s| s.to_str()) == Some("json") {
            serde_json::to_string_pretty(self)
                .map_err(|e| HousingError::config(format!("Failed to serialize to JSON: {}", e)))?
        } else if path.extension().and_then(|s| s.to_str()) == Some("toml") {
            toml::to_string_pretty(self)
                .map_err(|e| HousingError::config(format!("Failed to serialize to TOML: {}", e)))?
        } else {
            return Err(HousingError::config(
                "Unsupported config file format. Use .json or .toml",
            ));
        };

        std::fs::write(path, content)
            .map_err(|e| HousingError::config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Number of rows sampled for each boosting stage out of `num_samples`.
    pub fn subsample_size(&self, num_samples: usize) -> usize {
        ((self.subsample_ratio * num_samples as f64).round() as usize).max(1)
    }
}

/// Builder pattern for creating configurations
#[derive(Debug)]
pub struct ConfigBuilder {
    config: Config,
    validation_errors: Vec<String>,
}

impl ConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        ConfigBuilder {
            config: Config::default(),
            validation_errors: Vec::new(),
        }
    }

    /// Set the maximum tree depth
    pub fn max_depth(mut self, depth: usize) -> Self {
        if depth < 1 {
            self.validation_errors
                .push("max_depth must be at least 1".to_string());
        }
        self.config.max_depth = depth;
        self
    }

    /// Set the maximum leaf size
    pub fn max_leaf_size(mut self, size: usize) -> Self {
        self.config.max_leaf_size = size;
        self
    }

    /// Set the minimum impurity decrease for a split
    pub fn min_purity_increase(mut self, increase: f64) -> Self {
        self.config.min_purity_increase = increase;
        self
    }

    /// Set the learning rate
    pub fn learning_rate(mut self, rate: f64) -> Self {
        if !(rate > 0.0 && rate <= 1.0) {
            self.validation_errors
                .push("learning_rate must be in range (0.0, 1.0]".to_string());
        }
        self.config.learning_rate = rate;
        self
    }

    /// Set the number of boosting stages
    pub fn num_iterations(mut self, iterations: usize) -> Self {
        self.config.num_iterations = iterations;
        self
    }

    /// Set the per-stage row subsample ratio
    pub fn subsample_ratio(mut self, ratio: f64) -> Self {
        if !(ratio > 0.0 && ratio <= 1.0) {
            self.validation_errors
                .push("subsample_ratio must be in range (0.0, 1.0]".to_string());
        }
        self.config.subsample_ratio = ratio;
        self
    }

    /// Set the minimum loss change between stages
    pub fn min_change(mut self, min_change: f64) -> Self {
        self.config.min_change = min_change;
        self
    }

    /// Set the loss tolerance
    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.config.tolerance = tolerance;
        self
    }

    /// Set the training split fraction
    pub fn train_fraction(mut self, fraction: f64) -> Self {
        self.config.train_fraction = fraction;
        self
    }

    /// Set the random seed
    pub fn random_seed(mut self, seed: u64) -> Self {
        self.config.random_seed = Some(seed);
        self
    }

    /// Set the dataset input path
    pub fn dataset_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.config.dataset_path = path.into();
        self
    }

    /// Set the loss history output path
    pub fn progress_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.config.progress_path = path.into();
        self
    }

    /// Set the residual report output path
    pub fn report_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.config.report_path = path.into();
        self
    }

    /// Set the model output path
    pub fn model_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.config.model_path = path.into();
        self
    }

    /// Keep timestamped copies of replaced model files
    pub fn keep_model_history(mut self, keep: bool) -> Self {
        self.config.keep_model_history = keep;
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<Config> {
        if !self.validation_errors.is_empty() {
            return Err(HousingError::config(format!(
                "Configuration validation failed: {}",
                self.validation_errors.join(", ")
            )));
        }

        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
