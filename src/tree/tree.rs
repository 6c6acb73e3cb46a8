//! Decision tree implementation.
//!
//! A [`Tree`] is a fitted regression tree together with its shrinkage
//! factor and the per-feature split gains accumulated while growing it.

use crate::core::types::{FeatureIndex, Score, Value};
use crate::tree::node::TreeNode;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Decision tree structure representing a single tree in the ensemble.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    /// Root node
    root: TreeNode,
    /// Tree shrinkage factor (learning rate)
    shrinkage: f64,
    /// Number of features the tree was grown on
    num_features: usize,
    /// Summed split gain per feature
    split_gains: Vec<f64>,
}

impl Tree {
    /// Creates a tree from a grown root node.
    pub fn new(root: TreeNode, num_features: usize, split_gains: Vec<f64>) -> Self {
        Tree {
            root,
            shrinkage: 1.0,
            num_features,
            split_gains,
        }
    }

    /// Sets the shrinkage applied to every leaf output.
    pub fn with_shrinkage(mut self, shrinkage: f64) -> Self {
        self.shrinkage = shrinkage;
        self
    }

    /// Returns the root node.
    pub fn root(&self) -> &TreeNode {
        &self.root
    }

    /// Returns the shrinkage factor.
    pub fn shrinkage(&self) -> f64 {
        self.shrinkage
    }

    /// Returns the number of features the tree was grown on.
    pub fn num_features(&self) -> usize {
        self.num_features
    }

    /// Returns the number of leaf nodes in the tree.
    pub fn num_leaves(&self) -> usize {
        self.root.num_leaves()
    }

    /// Returns the depth of the tree.
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    /// Predicts the shrunken leaf output for a single sample.
    pub fn predict(&self, sample: &[Value]) -> Score {
        self.shrinkage * self.root.predict(sample)
    }

    /// Split gain accumulated for `feature`.
    pub fn split_gain(&self, feature: FeatureIndex) -> f64 {
        self.split_gains.get(feature).copied().unwrap_or(0.0)
    }

    /// Summed split gain for every feature.
    pub fn split_gains(&self) -> &[f64] {
        &self.split_gains
    }
}

impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn write_node(f: &mut fmt::Formatter<'_>, node: &TreeNode, indent: usize) -> fmt::Result {
            match node {
                TreeNode::Leaf { output, data_count } => {
                    writeln!(f, "{:indent$}leaf {} (n={})", "", output, data_count, indent = indent)
                }
                TreeNode::Internal {
                    rule, left, right, ..
                } => {
                    writeln!(f, "{:indent$}if {}", "", rule, indent = indent)?;
                    write_node(f, left, indent + 2)?;
                    writeln!(f, "{:indent$}else", "", indent = indent)?;
                    write_node(f, right, indent + 2)
                }
            }
        }

        write_node(f, &self.root, 0)
    }
}
