//! Evaluation metrics.
//!
//! ```rust,no_run
//! use housing_gbm::metrics::ResidualAnalysis;
//! use ndarray::Array1;
//!
//! # fn example() -> housing_gbm::Result<()> {
//! let predictions = Array1::from_vec(vec![181_000.0, 220_000.0]);
//! let labels = Array1::from_vec(vec![181_500.0, 223_500.0]);
//!
//! let report = ResidualAnalysis::new().generate(&predictions.view(), &labels.view())?;
//! println!("MAE: {:.2}", report.mean_absolute_error);
//! # Ok(())
//! # }
//! ```

pub mod regression;

pub use regression::{ResidualAnalysis, ResidualReport};
