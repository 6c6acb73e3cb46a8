//! Core data types for the housing pipeline.
//!
//! A dataset cell is a [`Value`]: either a number or a categorical string.
//! Cells start out as the raw text read from the CSV file and become
//! numeric only once a transformer converts them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Prediction, residual and loss value type.
pub type Score = f64;

/// Feature index type for identifying columns in a sample.
pub type FeatureIndex = usize;

/// Iteration number type for boosting stages.
pub type IterationIndex = usize;

/// A single dataset cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Whole number, produced when a numeric string has no fractional part
    Integer(i64),
    /// Real number
    Continuous(f64),
    /// Text that is not (or not yet) interpreted as a number
    Categorical(String),
}

impl Value {
    /// Returns the numeric value of the cell, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(v) => Some(*v as f64),
            Value::Continuous(v) => Some(*v),
            Value::Categorical(_) => None,
        }
    }

    /// Returns the category string of a categorical cell.
    pub fn as_category(&self) -> Option<&str> {
        match self {
            Value::Categorical(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Categorical(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Categorical(s)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Continuous(v)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(v) => write!(f, "{}", v),
            Value::Continuous(v) => write!(f, "{}", v),
            Value::Categorical(s) => write!(f, "{}", s),
        }
    }
}
