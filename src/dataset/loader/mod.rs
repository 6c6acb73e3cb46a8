//! Data loaders that build a [`Labeled`](crate::dataset::Labeled) dataset
//! from files on disk.

pub mod csv;

pub use self::csv::{CsvConfig, CsvLoader};
