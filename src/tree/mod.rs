//! Regression tree learning.
//!
//! This module provides the tree structures used as weak learners by the
//! gradient booster: nodes and split rules, exhaustive split finding over
//! mixed numeric and categorical columns, and a depth-first serial learner.

pub mod learner;
pub mod node;
pub mod split;
pub mod tree;

pub use learner::{SerialTreeLearner, SerialTreeLearnerConfig, TreeLearner};
pub use node::{SplitRule, TreeNode};
pub use split::{NodeStatistics, SplitFinder, SplitInfo};
pub use tree::Tree;
