//! Tree node implementation.
//!
//! A fitted regression tree is a recursive [`TreeNode`]: internal nodes hold
//! a [`SplitRule`] and two children, leaves hold the mean target of the
//! training rows that reached them.

use crate::core::types::{FeatureIndex, Score, Value};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Binary decision routing a sample to the left or right child.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SplitRule {
    /// Numeric rule: left when the value is a number strictly below
    /// `threshold`. Categorical values always go right.
    Threshold {
        /// Feature column tested
        feature: FeatureIndex,
        /// Split threshold
        threshold: f64,
    },
    /// Categorical rule: left when the value equals `category`.
    Category {
        /// Feature column tested
        feature: FeatureIndex,
        /// Category sent left
        category: String,
    },
}

impl SplitRule {
    /// Feature column tested by this rule
    pub fn feature(&self) -> FeatureIndex {
        match self {
            SplitRule::Threshold { feature, .. } | SplitRule::Category { feature, .. } => *feature,
        }
    }

    /// Whether `sample` is routed to the left child.
    pub fn goes_left(&self, sample: &[Value]) -> bool {
        match self {
            SplitRule::Threshold { feature, threshold } => sample
                .get(*feature)
                .and_then(Value::as_f64)
                .map_or(false, |x| x < *threshold),
            SplitRule::Category { feature, category } => sample
                .get(*feature)
                .and_then(Value::as_category)
                .map_or(false, |c| c == category),
        }
    }
}

impl fmt::Display for SplitRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SplitRule::Threshold { feature, threshold } => {
                write!(f, "x[{}] < {}", feature, threshold)
            }
            SplitRule::Category { feature, category } => {
                write!(f, "x[{}] == {:?}", feature, category)
            }
        }
    }
}

/// Tree node representation supporting both internal and leaf nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TreeNode {
    /// Terminal node
    Leaf {
        /// Prediction value
        output: Score,
        /// Number of training rows in this leaf
        data_count: usize,
    },
    /// Internal node
    Internal {
        /// Routing rule
        rule: SplitRule,
        /// Decrease in summed squared error achieved by the split
        split_gain: f64,
        /// Number of training rows reaching this node
        data_count: usize,
        /// Child for rows satisfying the rule
        left: Box<TreeNode>,
        /// Child for all other rows
        right: Box<TreeNode>,
    },
}

impl TreeNode {
    /// Creates a new leaf node.
    pub fn new_leaf(output: Score, data_count: usize) -> Self {
        TreeNode::Leaf { output, data_count }
    }

    /// Creates a new internal node.
    pub fn new_internal(
        rule: SplitRule,
        split_gain: f64,
        data_count: usize,
        left: TreeNode,
        right: TreeNode,
    ) -> Self {
        TreeNode::Internal {
            rule,
            split_gain,
            data_count,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Whether this node is a leaf
    pub fn is_leaf(&self) -> bool {
        matches!(self, TreeNode::Leaf { .. })
    }

    /// Number of training rows that reached this node
    pub fn data_count(&self) -> usize {
        match self {
            TreeNode::Leaf { data_count, .. } | TreeNode::Internal { data_count, .. } => {
                *data_count
            }
        }
    }

    /// Output of the leaf `sample` falls into.
    pub fn predict(&self, sample: &[Value]) -> Score {
        let mut node = self;
        loop {
            match node {
                TreeNode::Leaf { output, .. } => return *output,
                TreeNode::Internal {
                    rule, left, right, ..
                } => {
                    node = if rule.goes_left(sample) { &**left } else { &**right };
                }
            }
        }
    }

    /// Number of split levels below this node.
    pub fn depth(&self) -> usize {
        match self {
            TreeNode::Leaf { .. } => 0,
            TreeNode::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    /// Number of leaves in the subtree.
    pub fn num_leaves(&self) -> usize {
        match self {
            TreeNode::Leaf { .. } => 1,
            TreeNode::Internal { left, right, .. } => left.num_leaves() + right.num_leaves(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stump() -> TreeNode {
        TreeNode::new_internal(
            SplitRule::Threshold {
                feature: 0,
                threshold: 10.0,
            },
            4.0,
            4,
            TreeNode::new_leaf(1.0, 2),
            TreeNode::new_leaf(3.0, 2),
        )
    }

    #[test]
    fn test_threshold_rule_routing() {
        let rule = SplitRule::Threshold {
            feature: 1,
            threshold: 5.0,
        };
        assert!(rule.goes_left(&[Value::from("x"), Value::Integer(4)]));
        assert!(!rule.goes_left(&[Value::from("x"), Value::Continuous(5.0)]));
        assert!(!rule.goes_left(&[Value::from("x"), Value::from("NA")]));
        assert!(!rule.goes_left(&[Value::from("x")]));
    }

    #[test]
    fn test_category_rule_routing() {
        let rule = SplitRule::Category {
            feature: 0,
            category: "Pave".to_string(),
        };
        assert!(rule.goes_left(&[Value::from("Pave")]));
        assert!(!rule.goes_left(&[Value::from("Grvl")]));
        assert!(!rule.goes_left(&[Value::Integer(1)]));
    }

    #[test]
    fn test_predict_follows_rules() {
        let tree = stump();
        assert_eq!(tree.predict(&[Value::Integer(3)]), 1.0);
        assert_eq!(tree.predict(&[Value::Integer(30)]), 3.0);
        assert_eq!(tree.predict(&[Value::from("NA")]), 3.0);
    }

    #[test]
    fn test_shape() {
        let tree = stump();
        assert!(!tree.is_leaf());
        assert_eq!(tree.depth(), 1);
        assert_eq!(tree.num_leaves(), 2);
        assert_eq!(tree.data_count(), 4);
        assert_eq!(TreeNode::new_leaf(0.0, 1).depth(), 0);
    }

    #[test]
    fn test_rule_display() {
        let rule = SplitRule::Category {
            feature: 2,
            category: "RL".to_string(),
        };
        assert_eq!(rule.to_string(), "x[2] == \"RL\"");
    }
}
