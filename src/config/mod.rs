//! Configuration management for the housing pipeline.
//!
//! Hyperparameters and file paths live in a single serde-backed
//! [`Config`], built either from defaults, from a [`ConfigBuilder`], or
//! from a `.toml`/`.json` file.

pub mod core;

pub use self::core::{Config, ConfigBuilder};
