//! Data preprocessing: sample transformers and label casts.
//!
//! A [`Transformer`] rewrites sample values in place. The
//! [`NumericStringConverter`] turns numeric-looking strings into numbers;
//! [`cast_to_integer`] is the label cast applied through
//! [`Labeled::transform_labels`](crate::dataset::Labeled::transform_labels).

use crate::core::error::{HousingError, Result};
use crate::core::types::*;

/// A stateless transformation applied to every sample of a dataset.
pub trait Transformer {
    /// Name used in log output.
    fn name(&self) -> &'static str;

    /// Transform the samples in place.
    fn transform(&self, samples: &mut [Vec<Value>]) -> Result<()>;
}

/// Converts numeric strings into numeric values.
///
/// A string that parses as a 64-bit integer becomes [`Value::Integer`],
/// otherwise one that parses as a finite real number becomes
/// [`Value::Continuous`]. Everything else, including `NA`, `inf` and
/// `nan`, stays categorical.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumericStringConverter;

impl NumericStringConverter {
    /// Create a new converter
    pub fn new() -> Self {
        NumericStringConverter
    }

    /// Convert a single value.
    pub fn convert(value: &Value) -> Value {
        let mut converted = value.clone();
        Self::convert_in_place(&mut converted);
        converted
    }

    fn convert_in_place(value: &mut Value) {
        if let Value::Categorical(s) = value {
            if let Some(numeric) = parse_numeric(s) {
                *value = numeric;
            }
        }
    }
}

impl Transformer for NumericStringConverter {
    fn name(&self) -> &'static str {
        "Numeric String Converter"
    }

    fn transform(&self, samples: &mut [Vec<Value>]) -> Result<()> {
        samples
            .iter_mut()
            .flatten()
            .for_each(NumericStringConverter::convert_in_place);
        Ok(())
    }
}

/// Parse a string as a number the way the converter does.
fn parse_numeric(s: &str) -> Option<Value> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(v) = trimmed.parse::<i64>() {
        return Some(Value::Integer(v));
    }

    // `f64::from_str` accepts "inf" and "NaN", which are categories here
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => Some(Value::Continuous(v)),
        _ => None,
    }
}

/// Cast a label to an integer, truncating toward zero.
///
/// Numeric strings are parsed first, so raw labels can be cast without a
/// prior conversion pass. Casting an integer label returns it unchanged.
pub fn cast_to_integer(label: &Value) -> Result<Value> {
    let numeric = match label {
        Value::Integer(v) => return Ok(Value::Integer(*v)),
        Value::Continuous(v) => *v,
        Value::Categorical(s) => match parse_numeric(s) {
            Some(Value::Integer(v)) => return Ok(Value::Integer(v)),
            Some(Value::Continuous(v)) => v,
            _ => {
                return Err(HousingError::dataset(format!(
                    "Label '{}' cannot be cast to an integer",
                    s
                )))
            }
        },
    };

    if !numeric.is_finite() || numeric.abs() >= i64::MAX as f64 {
        return Err(HousingError::dataset(format!(
            "Label {} is out of integer range",
            numeric
        )));
    }

    Ok(Value::Integer(numeric.trunc() as i64))
}
