//! Gradient boosting.
//!
//! This module contains the least squares objective, the early stopping
//! monitor and the [`GradientBoost`] regressor that ties them to the
//! regression tree learner.

pub mod early_stopping;
pub mod gbdt;
pub mod objective;

pub use early_stopping::{EarlyStopping, EarlyStoppingConfig, StopReason};
pub use gbdt::GradientBoost;
pub use objective::{ObjectiveFunction, RegressionObjective};
