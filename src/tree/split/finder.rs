//! Split finding for regression trees.
//!
//! Splits are scored by the decrease in summed squared error they achieve.
//! Numeric cells are swept in sorted order so every distinct value is tried
//! as a `x < t` threshold; categorical cells are tried as `x == c`
//! equality tests.

use crate::core::types::{FeatureIndex, Score, Value};
use crate::tree::node::SplitRule;
use ndarray::ArrayView1;
use std::collections::BTreeMap;

/// Running count, sum and sum of squares of a set of targets.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NodeStatistics {
    /// Number of targets
    pub count: usize,
    /// Sum of targets
    pub sum: f64,
    /// Sum of squared targets
    pub sum_squares: f64,
}

impl NodeStatistics {
    /// Statistics of `targets[rows] - shift`.
    pub fn from_rows(targets: ArrayView1<'_, Score>, rows: &[usize], shift: f64) -> Self {
        let mut stats = NodeStatistics::default();
        for &row in rows {
            stats.add(targets[row] - shift);
        }
        stats
    }

    /// Add one target.
    pub fn add(&mut self, y: f64) {
        self.count += 1;
        self.sum += y;
        self.sum_squares += y * y;
    }

    /// Statistics of the targets in `self` but not in `part`.
    pub fn difference(&self, part: &NodeStatistics) -> Self {
        NodeStatistics {
            count: self.count - part.count,
            sum: self.sum - part.sum,
            sum_squares: self.sum_squares - part.sum_squares,
        }
    }

    /// Mean target, zero when empty.
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }

    /// Summed squared deviation from the mean.
    pub fn sse(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        (self.sum_squares - self.sum * self.sum / self.count as f64).max(0.0)
    }
}

/// Information about a chosen split.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitInfo {
    /// Routing rule
    pub rule: SplitRule,
    /// Decrease in summed squared error
    pub gain: f64,
    /// Rows routed left
    pub left_count: usize,
    /// Rows routed right
    pub right_count: usize,
}

impl SplitInfo {
    /// Feature the split tests
    pub fn feature(&self) -> FeatureIndex {
        self.rule.feature()
    }
}

/// Exhaustive split finder.
#[derive(Debug, Clone, Copy, Default)]
pub struct SplitFinder;

impl SplitFinder {
    /// Creates a finder that accepts any split leaving both sides non-empty.
    pub fn new() -> Self {
        SplitFinder
    }

    /// Finds the split of `rows` with the largest gain over all features,
    /// or `None` when no feature separates the rows.
    pub fn find_best_split(
        &self,
        samples: &[Vec<Value>],
        targets: ArrayView1<'_, Score>,
        rows: &[usize],
        num_features: usize,
    ) -> Option<SplitInfo> {
        if rows.len() < 2 {
            return None;
        }

        // Centering keeps the sum-of-squares form accurate for large targets
        let shift = NodeStatistics::from_rows(targets, rows, 0.0).mean();
        let parent = NodeStatistics::from_rows(targets, rows, shift);

        let mut best: Option<SplitInfo> = None;
        for feature in 0..num_features {
            self.scan_feature(samples, targets, rows, feature, shift, &parent, &mut best);
        }
        best
    }

    #[allow(clippy::too_many_arguments)]
    fn scan_feature(
        &self,
        samples: &[Vec<Value>],
        targets: ArrayView1<'_, Score>,
        rows: &[usize],
        feature: FeatureIndex,
        shift: f64,
        parent: &NodeStatistics,
        best: &mut Option<SplitInfo>,
    ) {
        let mut numeric: Vec<(f64, f64)> = Vec::with_capacity(rows.len());
        let mut categories: BTreeMap<&str, NodeStatistics> = BTreeMap::new();
        let mut categorical_count = 0;

        for &row in rows {
            let y = targets[row] - shift;
            match samples[row].get(feature) {
                Some(Value::Categorical(category)) => {
                    categorical_count += 1;
                    categories.entry(category.as_str()).or_default().add(y);
                }
                Some(value) => {
                    if let Some(x) = value.as_f64() {
                        numeric.push((x, y));
                    }
                }
                None => {}
            }
        }

        numeric.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut left = NodeStatistics::default();
        for (i, &(x, y)) in numeric.iter().enumerate() {
            if i > 0 && x > numeric[i - 1].0 {
                let rule = SplitRule::Threshold {
                    feature,
                    threshold: x,
                };
                self.consider(rule, &left, parent, best);
            }
            left.add(y);
        }

        // Separates the numeric cells from the categorical ones
        if categorical_count > 0 && !numeric.is_empty() {
            let rule = SplitRule::Threshold {
                feature,
                threshold: f64::INFINITY,
            };
            self.consider(rule, &left, parent, best);
        }

        for (category, stats) in &categories {
            let rule = SplitRule::Category {
                feature,
                category: category.to_string(),
            };
            self.consider(rule, stats, parent, best);
        }
    }

    fn consider(
        &self,
        rule: SplitRule,
        left: &NodeStatistics,
        parent: &NodeStatistics,
        best: &mut Option<SplitInfo>,
    ) {
        let right = parent.difference(left);
        if left.count == 0 || right.count == 0 {
            return;
        }

        let gain = parent.sse() - left.sse() - right.sse();
        if best.as_ref().map_or(true, |b| gain > b.gain) {
            *best = Some(SplitInfo {
                rule,
                gain,
                left_count: left.count,
                right_count: right.count,
            });
        }
    }
}
