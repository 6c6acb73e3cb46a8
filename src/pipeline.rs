//! The housing price training pipeline.
//!
//! [`Pipeline`] runs the job as a one-way sequence of stages:
//!
//! ```text
//! Idle -> Loaded -> Transformed -> Split -> Trained -> Evaluated -> Reported -> Persisted
//! ```
//!
//! Each stage method may only be called from the stage before it and only
//! once. Calling one out of order is an
//! [`InvalidTransition`](crate::core::error::HousingError::InvalidTransition)
//! error. A stage that fails leaves the pipeline where it was.

use crate::boosting::GradientBoost;
use crate::config::Config;
use crate::core::constants::{HOUSING_FEATURES, LABEL_COLUMN};
use crate::core::error::{HousingError, Result};
use crate::core::types::Score;
use crate::dataset::{cast_to_integer, CsvLoader, Labeled, NumericStringConverter};
use crate::io::{write_progress, write_report, Filesystem, Persister};
use crate::metrics::{ResidualAnalysis, ResidualReport};
use ndarray::Array1;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fmt;

/// Pipeline progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    /// Nothing done yet
    Idle,
    /// Dataset read into memory
    Loaded,
    /// Features converted and labels cast
    Transformed,
    /// Shuffled and split into training and testing sets
    Split,
    /// Model fitted on the training set
    Trained,
    /// Testing set predicted and residuals analysed
    Evaluated,
    /// Loss history and residual report written
    Reported,
    /// Model saved
    Persisted,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Idle => "idle",
            Stage::Loaded => "loaded",
            Stage::Transformed => "transformed",
            Stage::Split => "split",
            Stage::Trained => "trained",
            Stage::Evaluated => "evaluated",
            Stage::Reported => "reported",
            Stage::Persisted => "persisted",
        };
        write!(f, "{}", name)
    }
}

/// Housing price training pipeline.
#[derive(Debug)]
pub struct Pipeline {
    config: Config,
    stage: Stage,
    rng: StdRng,
    dataset: Option<Labeled>,
    training: Option<Labeled>,
    testing: Option<Labeled>,
    model: Option<GradientBoost>,
    predictions: Option<Array1<Score>>,
    report: Option<ResidualReport>,
}

impl Pipeline {
    /// Create an idle pipeline.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let rng = match config.random_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Pipeline {
            config,
            stage: Stage::Idle,
            rng,
            dataset: None,
            training: None,
            testing: None,
            model: None,
            predictions: None,
            report: None,
        })
    }

    /// Current stage
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Pipeline configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Read the housing dataset from the configured path.
    pub fn load(&mut self) -> Result<&Labeled> {
        self.expect(Stage::Idle, Stage::Loaded)?;
        let loader = CsvLoader::new(&HOUSING_FEATURES, LABEL_COLUMN);
        let dataset = loader.load_csv(&self.config.dataset_path)?;
        self.load_dataset(dataset)
    }

    /// Start from an in-memory dataset instead of the CSV file.
    pub fn load_dataset(&mut self, dataset: Labeled) -> Result<&Labeled> {
        self.expect(Stage::Idle, Stage::Loaded)?;
        self.advance(Stage::Loaded);
        Ok(self.dataset.insert(dataset))
    }

    /// Convert numeric strings and cast labels to integers.
    pub fn transform(&mut self) -> Result<()> {
        self.expect(Stage::Loaded, Stage::Transformed)?;
        let dataset = self.dataset_mut()?;
        dataset
            .apply(&NumericStringConverter::new())?
            .transform_labels(cast_to_integer)?;
        self.advance(Stage::Transformed);
        Ok(())
    }

    /// Shuffle and split into training and testing sets.
    ///
    /// Returns the sizes of the two sets.
    pub fn split(&mut self) -> Result<(usize, usize)> {
        self.expect(Stage::Transformed, Stage::Split)?;
        let mut dataset = self
            .dataset
            .take()
            .ok_or_else(|| HousingError::dataset("No dataset loaded"))?;

        dataset.randomize(&mut self.rng);
        let (training, testing) = dataset.split(self.config.train_fraction)?;
        let sizes = (training.num_samples(), testing.num_samples());
        log::info!("Split into {} training and {} testing samples", sizes.0, sizes.1);

        self.training = Some(training);
        self.testing = Some(testing);
        self.advance(Stage::Split);
        Ok(sizes)
    }

    /// Fit the gradient booster on the training set.
    pub fn train(&mut self) -> Result<&GradientBoost> {
        self.expect(Stage::Split, Stage::Trained)?;
        let training = self
            .training
            .as_ref()
            .ok_or_else(|| HousingError::training("No training set"))?;

        let mut model = GradientBoost::new(self.config.clone())?;
        model.train_with_rng(training, &mut self.rng)?;

        self.advance(Stage::Trained);
        Ok(self.model.insert(model))
    }

    /// Predict the testing set and analyse the residuals.
    pub fn evaluate(&mut self) -> Result<&ResidualReport> {
        self.expect(Stage::Trained, Stage::Evaluated)?;
        let model = self
            .model
            .as_ref()
            .ok_or_else(|| HousingError::prediction("No trained model"))?;
        let testing = self
            .testing
            .as_ref()
            .ok_or_else(|| HousingError::prediction("No testing set"))?;

        log::info!("Making predictions ...");
        let predictions = model.predict(testing.samples())?;
        let labels = testing.numeric_labels()?;
        let report = ResidualAnalysis::new().generate(&predictions.view(), &labels.view())?;

        self.predictions = Some(predictions);
        self.advance(Stage::Evaluated);
        Ok(self.report.insert(report))
    }

    /// Write the loss history and the residual report.
    pub fn report(&mut self) -> Result<()> {
        self.expect(Stage::Evaluated, Stage::Reported)?;
        let model = self
            .model
            .as_ref()
            .ok_or_else(|| HousingError::prediction("No trained model"))?;
        let report = self
            .report
            .as_ref()
            .ok_or_else(|| HousingError::prediction("No residual report"))?;

        write_progress(&self.config.progress_path, model.steps())?;
        log::info!("Progress saved to {}", self.config.progress_path.display());

        write_report(&self.config.report_path, report)?;
        log::info!("Report saved to {}", self.config.report_path.display());

        self.advance(Stage::Reported);
        Ok(())
    }

    /// Save the model to the configured path.
    pub fn persist(&mut self) -> Result<()> {
        self.expect(Stage::Reported, Stage::Persisted)?;
        let model = self
            .model
            .as_ref()
            .ok_or_else(|| HousingError::serialization("No trained model"))?;

        Filesystem::new(&self.config.model_path)
            .with_history(self.config.keep_model_history)
            .save(model)?;

        self.advance(Stage::Persisted);
        Ok(())
    }

    /// Training set, once split
    pub fn training(&self) -> Option<&Labeled> {
        self.training.as_ref()
    }

    /// Testing set, once split
    pub fn testing(&self) -> Option<&Labeled> {
        self.testing.as_ref()
    }

    /// Trained model
    pub fn model(&self) -> Option<&GradientBoost> {
        self.model.as_ref()
    }

    /// Predictions for the testing set
    pub fn predictions(&self) -> Option<&Array1<Score>> {
        self.predictions.as_ref()
    }

    /// Residual report
    pub fn residual_report(&self) -> Option<&ResidualReport> {
        self.report.as_ref()
    }

    fn dataset_mut(&mut self) -> Result<&mut Labeled> {
        self.dataset
            .as_mut()
            .ok_or_else(|| HousingError::dataset("No dataset loaded"))
    }

    fn expect(&self, from: Stage, to: Stage) -> Result<()> {
        if self.stage != from {
            return Err(HousingError::invalid_transition(self.stage, to));
        }
        Ok(())
    }

    fn advance(&mut self, to: Stage) {
        log::debug!("Pipeline stage: {} -> {}", self.stage, to);
        self.stage = to;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigBuilder;
    use crate::core::types::Value;
    use tempfile::TempDir;

    fn raw_dataset(n: usize) -> Labeled {
        let names = vec!["GrLivArea".to_string(), "Street".to_string()];
        let samples = (0..n)
            .map(|i| {
                let street = if i % 4 == 0 { "Grvl" } else { "Pave" };
                vec![Value::from((800 + 100 * i).to_string()), Value::from(street)]
            })
            .collect();
        let labels = (0..n)
            .map(|i| Value::from(format!("{}.75", 100_000 + 5_000 * i)))
            .collect();
        Labeled::new(names, samples, labels).unwrap()
    }

    fn config(dir: &TempDir) -> Config {
        ConfigBuilder::new()
            .random_seed(11)
            .num_iterations(20)
            .progress_path(dir.path().join("progress.csv"))
            .report_path(dir.path().join("report.json"))
            .model_path(dir.path().join("housing.model"))
            .build()
            .unwrap()
    }

    #[test]
    fn test_full_run() {
        let dir = TempDir::new().unwrap();
        let mut pipeline = Pipeline::new(config(&dir)).unwrap();
        assert_eq!(pipeline.stage(), Stage::Idle);

        pipeline.load_dataset(raw_dataset(10)).unwrap();
        pipeline.transform().unwrap();
        assert_eq!(pipeline.split().unwrap(), (8, 2));

        let model = pipeline.train().unwrap();
        assert!(!model.steps().is_empty());
        assert!(model.steps().len() <= 20);

        let report = pipeline.evaluate().unwrap();
        assert_eq!(report.cardinality, 2);
        assert!(report.mean_absolute_error.is_finite());
        assert_eq!(pipeline.predictions().unwrap().len(), 2);

        pipeline.report().unwrap();
        assert!(dir.path().join("progress.csv").exists());
        assert!(dir.path().join("report.json").exists());

        pipeline.persist().unwrap();
        assert!(dir.path().join("housing.model").exists());
        assert_eq!(pipeline.stage(), Stage::Persisted);
    }

    #[test]
    fn test_labels_are_truncated_before_split() {
        let dir = TempDir::new().unwrap();
        let mut pipeline = Pipeline::new(config(&dir)).unwrap();
        pipeline.load_dataset(raw_dataset(10)).unwrap();
        pipeline.transform().unwrap();
        pipeline.split().unwrap();

        let labels = pipeline
            .training()
            .unwrap()
            .labels()
            .iter()
            .chain(pipeline.testing().unwrap().labels());
        for label in labels {
            match label {
                Value::Integer(v) => assert_eq!(v % 5_000, 0),
                other => panic!("label not cast: {:?}", other),
            }
        }
    }

    #[test]
    fn test_out_of_order_stage_is_rejected() {
        let dir = TempDir::new().unwrap();
        let mut pipeline = Pipeline::new(config(&dir)).unwrap();

        let err = pipeline.train().unwrap_err();
        assert!(matches!(
            err,
            HousingError::InvalidTransition { ref from, ref to } if from == "idle" && to == "trained"
        ));
        assert_eq!(pipeline.stage(), Stage::Idle);

        pipeline.load_dataset(raw_dataset(10)).unwrap();
        assert!(pipeline.load_dataset(raw_dataset(10)).is_err());
        assert!(pipeline.split().is_err());
        assert_eq!(pipeline.stage(), Stage::Loaded);
    }

    #[test]
    fn test_failed_stage_does_not_advance() {
        let dir = TempDir::new().unwrap();
        let mut pipeline = Pipeline::new(config(&dir)).unwrap();
        let dataset = Labeled::new(
            vec!["x".to_string()],
            vec![vec![Value::from("1")]],
            vec![Value::from("unknown")],
        )
        .unwrap();

        pipeline.load_dataset(dataset).unwrap();
        assert!(pipeline.transform().is_err());
        assert_eq!(pipeline.stage(), Stage::Loaded);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let config = ConfigBuilder::new()
            .dataset_path(dir.path().join("dataset.csv"))
            .build()
            .unwrap();
        let mut pipeline = Pipeline::new(config).unwrap();
        assert!(matches!(
            pipeline.load().unwrap_err(),
            HousingError::DataLoading { .. }
        ));
        assert_eq!(pipeline.stage(), Stage::Idle);
    }

    #[test]
    fn test_nan_train_fraction_is_rejected() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            train_fraction: f64::NAN,
            ..config(&dir)
        };
        assert!(matches!(
            Pipeline::new(config),
            Err(HousingError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_stage_order() {
        assert!(Stage::Idle < Stage::Loaded);
        assert!(Stage::Reported < Stage::Persisted);
        assert_eq!(Stage::Evaluated.to_string(), "evaluated");
    }
}
