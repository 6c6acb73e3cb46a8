//! Dataset management module.
//!
//! This module provides the in-memory labeled dataset, the CSV loader that
//! fills it, and the preprocessing transformers applied before training.

pub mod dataset;
pub mod loader;
pub mod preprocessing;

// Re-export commonly used types
pub use dataset::Labeled;
pub use loader::{CsvConfig, CsvLoader};
pub use preprocessing::{cast_to_integer, NumericStringConverter, Transformer};
