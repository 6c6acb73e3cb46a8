//! Early stopping for the boosting loop.
//!
//! Training halts once the training loss drops below `tolerance` or stops
//! moving by at least `min_change` between two consecutive stages.

use crate::config::Config;
use crate::core::types::{IterationIndex, Score};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Configuration for early stopping behavior.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EarlyStoppingConfig {
    /// Minimum loss change between stages to keep training
    pub min_change: f64,
    /// Loss below which the fit is considered good enough
    pub tolerance: f64,
}

impl From<&Config> for EarlyStoppingConfig {
    fn from(config: &Config) -> Self {
        EarlyStoppingConfig {
            min_change: config.min_change,
            tolerance: config.tolerance,
        }
    }
}

/// Why training halted early.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    /// Loss fell below the tolerance
    Converged,
    /// Loss changed by less than the minimum change
    Plateaued,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::Converged => write!(f, "loss below tolerance"),
            StopReason::Plateaued => write!(f, "loss change below minimum"),
        }
    }
}

/// Tracks the training loss and determines when to stop training.
#[derive(Debug, Clone)]
pub struct EarlyStopping {
    config: EarlyStoppingConfig,
    previous: Option<Score>,
    stopped: Option<StopReason>,
}

impl EarlyStopping {
    /// Creates a new early stopping monitor with the given configuration.
    pub fn new(config: EarlyStoppingConfig) -> Self {
        EarlyStopping {
            config,
            previous: None,
            stopped: None,
        }
    }

    /// Records the loss of `iteration` and returns whether to stop.
    pub fn update(&mut self, loss: Score, iteration: IterationIndex) -> bool {
        if self.stopped.is_some() {
            return true;
        }

        let reason = if loss < self.config.tolerance {
            Some(StopReason::Converged)
        } else {
            match self.previous {
                Some(previous) if (previous - loss).abs() < self.config.min_change => {
                    Some(StopReason::Plateaued)
                }
                _ => None,
            }
        };
        self.previous = Some(loss);

        if let Some(reason) = reason {
            log::info!(
                "Early stopping triggered at iteration {} ({}, loss={})",
                iteration,
                reason,
                loss
            );
            self.stopped = Some(reason);
        }

        self.stopped.is_some()
    }

    /// Why training stopped, if it has.
    pub fn stop_reason(&self) -> Option<StopReason> {
        self.stopped
    }
}
