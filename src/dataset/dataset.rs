//! Labeled dataset structure.
//!
//! [`Labeled`] holds an ordered sequence of samples together with one label
//! per sample and the names of the feature columns. It supports in-place
//! transformation, shuffling and a two-way split that keeps the relative
//! order of the rows on each side.

use crate::core::error::{HousingError, Result};
use crate::core::types::*;
use crate::dataset::preprocessing::Transformer;
use ndarray::Array1;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A dataset of samples paired with labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Labeled {
    /// Feature column names, in sample order
    feature_names: Vec<String>,
    /// Row-major samples
    samples: Vec<Vec<Value>>,
    /// One label per sample
    labels: Vec<Value>,
}

impl Labeled {
    /// Create a new labeled dataset.
    ///
    /// Every sample must have one value per feature name and there must be
    /// exactly one label per sample.
    pub fn new(
        feature_names: Vec<String>,
        samples: Vec<Vec<Value>>,
        labels: Vec<Value>,
    ) -> Result<Self> {
        if samples.len() != labels.len() {
            return Err(HousingError::dimension_mismatch(
                format!("{} labels", samples.len()),
                format!("{} labels", labels.len()),
            ));
        }

        for (row, sample) in samples.iter().enumerate() {
            if sample.len() != feature_names.len() {
                return Err(HousingError::dataset(format!(
                    "Sample {} has {} values but there are {} feature columns",
                    row,
                    sample.len(),
                    feature_names.len()
                )));
            }
        }

        Ok(Labeled {
            feature_names,
            samples,
            labels,
        })
    }

    /// Number of samples (rows)
    pub fn num_samples(&self) -> usize {
        self.samples.len()
    }

    /// Number of feature columns
    pub fn num_features(&self) -> usize {
        self.feature_names.len()
    }

    /// Whether the dataset holds no samples
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Feature column names
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// All samples
    pub fn samples(&self) -> &[Vec<Value>] {
        &self.samples
    }

    /// A single sample
    pub fn sample(&self, index: usize) -> Option<&[Value]> {
        self.samples.get(index).map(|s| s.as_slice())
    }

    /// All labels
    pub fn labels(&self) -> &[Value] {
        &self.labels
    }

    /// Labels as numbers.
    ///
    /// Fails if any label has not been converted to a numeric value.
    pub fn numeric_labels(&self) -> Result<Array1<Score>> {
        self.labels
            .iter()
            .enumerate()
            .map(|(row, label)| {
                label.as_f64().ok_or_else(|| {
                    HousingError::dataset(format!(
                        "Label of sample {} is not numeric: {:?}",
                        row, label
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()
            .map(Array1::from_vec)
    }

    /// Apply a transformer to every sample in place.
    pub fn apply<T: Transformer + ?Sized>(&mut self, transformer: &T) -> Result<&mut Self> {
        log::debug!("Applying transformer: {}", transformer.name());
        transformer.transform(&mut self.samples)?;
        Ok(self)
    }

    /// Map every label through `f` in place.
    pub fn transform_labels<F>(&mut self, mut f: F) -> Result<&mut Self>
    where
        F: FnMut(&Value) -> Result<Value>,
    {
        for label in self.labels.iter_mut() {
            *label = f(label)?;
        }
        Ok(self)
    }

    /// Shuffle the rows with a uniform random permutation, keeping every
    /// sample paired with its label.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) -> &mut Self {
        let mut order: Vec<usize> = (0..self.samples.len()).collect();
        order.shuffle(rng);

        let mut samples: Vec<Option<Vec<Value>>> =
            std::mem::take(&mut self.samples).into_iter().map(Some).collect();
        let mut labels: Vec<Option<Value>> =
            std::mem::take(&mut self.labels).into_iter().map(Some).collect();

        self.samples = order.iter().filter_map(|&i| samples[i].take()).collect();
        self.labels = order.iter().filter_map(|&i| labels[i].take()).collect();
        self
    }

    /// Split into `(left, right)` where `left` holds the first
    /// `floor(ratio * n)` rows and `right` holds the rest.
    pub fn split(mut self, ratio: f64) -> Result<(Labeled, Labeled)> {
        if !(ratio > 0.0 && ratio < 1.0) {
            return Err(HousingError::invalid_parameter(
                "ratio",
                ratio.to_string(),
                "must be in range (0.0, 1.0)",
            ));
        }

        let n = self.samples.len();
        let cut = (ratio * n as f64).floor() as usize;

        let right_samples = self.samples.split_off(cut);
        let right_labels = self.labels.split_off(cut);

        let right = Labeled {
            feature_names: self.feature_names.clone(),
            samples: right_samples,
            labels: right_labels,
        };

        Ok((self, right))
    }
}
