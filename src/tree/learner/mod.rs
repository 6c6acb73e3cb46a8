//! Tree learning algorithms.

pub mod serial;

pub use serial::{SerialTreeLearner, SerialTreeLearnerConfig};

use crate::core::error::Result;
use crate::core::types::{Score, Value};
use crate::tree::tree::Tree;
use ndarray::ArrayView1;

/// Common interface for tree learners.
pub trait TreeLearner {
    /// Grows a tree fitting `targets` on the samples at `rows`.
    fn train(
        &self,
        samples: &[Vec<Value>],
        targets: ArrayView1<'_, Score>,
        rows: &[usize],
    ) -> Result<Tree>;
}
