//! Serial tree learner implementation.
//!
//! Grows a CART regression tree depth-first. A node becomes a leaf when it
//! reaches the maximum depth, holds no more than `max_leaf_size` rows, has
//! no usable split, or its best split improves purity by less than
//! `min_purity_increase`.

use crate::config::Config;
use crate::core::constants::*;
use crate::core::error::{HousingError, Result};
use crate::core::types::{Score, Value};
use crate::tree::learner::TreeLearner;
use crate::tree::node::TreeNode;
use crate::tree::split::{NodeStatistics, SplitFinder};
use crate::tree::tree::Tree;
use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};

/// Configuration for the serial tree learner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerialTreeLearnerConfig {
    /// Maximum number of split levels below the root
    pub max_depth: usize,
    /// Nodes with at most this many rows are not split
    pub max_leaf_size: usize,
    /// Minimum decrease in per-row variance required for a split
    pub min_purity_increase: f64,
}

impl Default for SerialTreeLearnerConfig {
    fn default() -> Self {
        SerialTreeLearnerConfig {
            max_depth: DEFAULT_MAX_DEPTH,
            max_leaf_size: DEFAULT_MAX_LEAF_SIZE,
            min_purity_increase: DEFAULT_MIN_PURITY_INCREASE,
        }
    }
}

impl From<&Config> for SerialTreeLearnerConfig {
    fn from(config: &Config) -> Self {
        SerialTreeLearnerConfig {
            max_depth: config.max_depth,
            max_leaf_size: config.max_leaf_size,
            min_purity_increase: config.min_purity_increase,
        }
    }
}

/// Depth-first CART learner.
#[derive(Debug, Clone)]
pub struct SerialTreeLearner {
    config: SerialTreeLearnerConfig,
    split_finder: SplitFinder,
}

impl SerialTreeLearner {
    /// Creates a new serial tree learner.
    pub fn new(config: SerialTreeLearnerConfig) -> Result<Self> {
        if config.max_depth == 0 {
            return Err(HousingError::invalid_parameter(
                "max_depth",
                "0",
                "must be at least 1",
            ));
        }
        if config.max_leaf_size == 0 {
            return Err(HousingError::invalid_parameter(
                "max_leaf_size",
                "0",
                "must be at least 1",
            ));
        }
        if !(config.min_purity_increase.is_finite() && config.min_purity_increase >= 0.0) {
            return Err(HousingError::invalid_parameter(
                "min_purity_increase",
                config.min_purity_increase.to_string(),
                "must be finite and non-negative",
            ));
        }

        Ok(SerialTreeLearner {
            config,
            split_finder: SplitFinder::new(),
        })
    }

    /// Returns the learner configuration.
    pub fn config(&self) -> &SerialTreeLearnerConfig {
        &self.config
    }

    fn grow(
        &self,
        samples: &[Vec<Value>],
        targets: ArrayView1<'_, Score>,
        rows: Vec<usize>,
        depth: usize,
        num_features: usize,
        split_gains: &mut [f64],
    ) -> TreeNode {
        let output = NodeStatistics::from_rows(targets, &rows, 0.0).mean();
        let leaf = TreeNode::new_leaf(output, rows.len());

        if depth >= self.config.max_depth || rows.len() <= self.config.max_leaf_size {
            return leaf;
        }

        let split = match self
            .split_finder
            .find_best_split(samples, targets, &rows, num_features)
        {
            Some(split) => split,
            None => return leaf,
        };

        if split.gain / (rows.len() as f64) < self.config.min_purity_increase {
            return leaf;
        }

        let data_count = rows.len();
        let (left_rows, right_rows): (Vec<usize>, Vec<usize>) = rows
            .into_iter()
            .partition(|&row| split.rule.goes_left(&samples[row]));

        if left_rows.is_empty() || right_rows.is_empty() {
            return leaf;
        }

        split_gains[split.feature()] += split.gain;

        let left = self.grow(samples, targets, left_rows, depth + 1, num_features, split_gains);
        let right = self.grow(samples, targets, right_rows, depth + 1, num_features, split_gains);

        TreeNode::new_internal(split.rule, split.gain, data_count, left, right)
    }
}

impl TreeLearner for SerialTreeLearner {
    fn train(
        &self,
        samples: &[Vec<Value>],
        targets: ArrayView1<'_, Score>,
        rows: &[usize],
    ) -> Result<Tree> {
        if samples.len() != targets.len() {
            return Err(HousingError::dimension_mismatch(
                format!("{} targets", samples.len()),
                format!("{} targets", targets.len()),
            ));
        }
        if rows.is_empty() {
            return Err(HousingError::training("Cannot grow a tree on zero rows"));
        }
        if let Some(&row) = rows.iter().find(|&&row| row >= samples.len()) {
            return Err(HousingError::training(format!(
                "Row index {} out of bounds for {} samples",
                row,
                samples.len()
            )));
        }

        let num_features = samples[rows[0]].len();
        let mut split_gains = vec![0.0; num_features];
        let root = self.grow(
            samples,
            targets,
            rows.to_vec(),
            0,
            num_features,
            &mut split_gains,
        );

        log::debug!(
            "Grew tree with {} leaves and depth {} on {} rows",
            root.num_leaves(),
            root.depth(),
            rows.len()
        );

        Ok(Tree::new(root, num_features, split_gains))
    }
}
