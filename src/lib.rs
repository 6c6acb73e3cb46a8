//! # housing-gbm
//!
//! Gradient boosted regression trees for house sale prices.
//!
//! The crate loads the housing dataset from CSV, converts numeric strings
//! into numbers, shuffles and splits the rows, fits a least squares
//! gradient booster over CART regression trees, and reports residual
//! statistics of the predictions on the held-out rows. Every stage is
//! usable on its own; [`Pipeline`] chains them in order.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use housing_gbm::{Config, Pipeline};
//!
//! # fn main() -> housing_gbm::Result<()> {
//! housing_gbm::init();
//!
//! let mut pipeline = Pipeline::new(Config::default())?;
//! pipeline.load()?;
//! pipeline.transform()?;
//! pipeline.split()?;
//! pipeline.train()?;
//!
//! let report = pipeline.evaluate()?;
//! println!("MAE: {:.2}", report.mean_absolute_error);
//!
//! pipeline.report()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`core`]: Fundamental types, constants and error handling
//! - [`config`]: Hyperparameters and file paths
//! - [`dataset`]: CSV loading, the labeled dataset and preprocessing
//! - [`tree`]: Regression tree learning
//! - [`boosting`]: The gradient booster
//! - [`metrics`]: Residual analysis
//! - [`io`]: Output files and model persistence
//! - [`pipeline`]: The staged training job

#![warn(missing_docs)]
#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    non_snake_case,
    non_upper_case_globals
)]

// Core infrastructure module - always available
pub mod core;

pub mod boosting;
pub mod config;
pub mod dataset;
pub mod io;
pub mod metrics;
pub mod pipeline;
pub mod prompt;
pub mod tree;

pub use crate::core::{
    constants::*,
    error::{HousingError, Result},
    types::*,
};

pub use crate::boosting::{GradientBoost, ObjectiveFunction, RegressionObjective};
pub use crate::config::{Config, ConfigBuilder};
pub use crate::dataset::{
    cast_to_integer, CsvConfig, CsvLoader, Labeled, NumericStringConverter, Transformer,
};
pub use crate::io::{write_progress, write_report, Filesystem, PersistentModel, Persister};
pub use crate::metrics::{ResidualAnalysis, ResidualReport};
pub use crate::pipeline::{Pipeline, Stage};
pub use crate::prompt::{confirm, SAVE_PROMPT};
pub use crate::tree::{SerialTreeLearner, SerialTreeLearnerConfig, Tree};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Install the global logger.
///
/// Uses `env_logger` with an `info` default filter, still overridable with
/// `RUST_LOG`. Calling it more than once is harmless.
pub fn init() {
    let env = env_logger::Env::default().default_filter_or("info");
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init();
}
