//! Model persistence.
//!
//! A [`Filesystem`] persister stores a trained [`GradientBoost`] as a
//! bincode file. By default an existing file is overwritten; with history
//! enabled it is first renamed to `<path>-<timestamp>.old`.
//! [`PersistentModel`] pairs an estimator with the persister that saves
//! and restores it.

use crate::boosting::GradientBoost;
use crate::core::error::{HousingError, Result};
use crate::core::types::{Score, Value};
use chrono::{DateTime, Utc};
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Current model file format version
pub const MODEL_FORMAT_VERSION: u32 = 1;

#[derive(Serialize)]
struct ModelFileRef<'a> {
    version: u32,
    saved_at: DateTime<Utc>,
    model: &'a GradientBoost,
}

#[derive(Deserialize)]
struct ModelFile {
    version: u32,
    saved_at: DateTime<Utc>,
    model: GradientBoost,
}

/// Storage backend for trained models.
pub trait Persister {
    /// Persist `model`.
    fn save(&self, model: &GradientBoost) -> Result<()>;

    /// Restore the last persisted model.
    fn load(&self) -> Result<GradientBoost>;
}

/// Persists models to a single file path.
#[derive(Debug, Clone, PartialEq)]
pub struct Filesystem {
    path: PathBuf,
    history: bool,
}

impl Filesystem {
    /// Create a persister that overwrites `path` on save.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Filesystem {
            path: path.into(),
            history: false,
        }
    }

    /// Keep a timestamped copy of the previous file on save.
    pub fn with_history(mut self, history: bool) -> Self {
        self.history = history;
        self
    }

    /// Target file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether previous files are kept
    pub fn keeps_history(&self) -> bool {
        self.history
    }

    fn backup_existing(&self) -> Result<Option<PathBuf>> {
        if !self.history || !self.path.exists() {
            return Ok(None);
        }

        let timestamp = Utc::now().format("%Y%m%d%H%M%S%.6f");
        let mut backup = self.path.as_os_str().to_owned();
        backup.push(format!("-{}.old", timestamp));
        let backup = PathBuf::from(backup);

        fs::rename(&self.path, &backup)?;
        log::info!("Moved previous model to {}", backup.display());
        Ok(Some(backup))
    }
}

impl Persister for Filesystem {
    fn save(&self, model: &GradientBoost) -> Result<()> {
        if !model.is_trained() {
            return Err(HousingError::serialization(
                "Refusing to save a model that has not been trained",
            ));
        }

        self.backup_existing()?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = File::create(&self.path)?;
        let mut writer = BufWriter::new(file);
        let envelope = ModelFileRef {
            version: MODEL_FORMAT_VERSION,
            saved_at: Utc::now(),
            model,
        };
        bincode::serialize_into(&mut writer, &envelope)?;
        writer.flush()?;

        log::info!("Model saved to {}", self.path.display());
        Ok(())
    }

    fn load(&self) -> Result<GradientBoost> {
        let file = File::open(&self.path).map_err(|e| {
            HousingError::serialization(format!(
                "Failed to open model file {}: {}",
                self.path.display(),
                e
            ))
        })?;

        let envelope: ModelFile = bincode::deserialize_from(BufReader::new(file))?;
        if envelope.version != MODEL_FORMAT_VERSION {
            return Err(HousingError::serialization(format!(
                "Unsupported model file version {} (expected {})",
                envelope.version, MODEL_FORMAT_VERSION
            )));
        }

        log::info!(
            "Loaded model from {} (saved {})",
            self.path.display(),
            envelope.saved_at.to_rfc3339()
        );
        Ok(envelope.model)
    }
}

/// An estimator bound to the persister that stores it.
#[derive(Debug, Clone)]
pub struct PersistentModel<P: Persister = Filesystem> {
    estimator: GradientBoost,
    persister: P,
}

impl<P: Persister> PersistentModel<P> {
    /// Wrap `estimator` with `persister`.
    pub fn new(estimator: GradientBoost, persister: P) -> Self {
        PersistentModel {
            estimator,
            persister,
        }
    }

    /// Restore a model through `persister`.
    pub fn load(persister: P) -> Result<Self> {
        let estimator = persister.load()?;
        Ok(PersistentModel {
            estimator,
            persister,
        })
    }

    /// Persist the wrapped estimator.
    pub fn save(&self) -> Result<()> {
        self.persister.save(&self.estimator)
    }

    /// Predict with the wrapped estimator.
    pub fn predict(&self, samples: &[Vec<Value>]) -> Result<Array1<Score>> {
        self.estimator.predict(samples)
    }

    /// The wrapped estimator
    pub fn estimator(&self) -> &GradientBoost {
        &self.estimator
    }

    /// The persister
    pub fn persister(&self) -> &P {
        &self.persister
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigBuilder;
    use crate::dataset::Labeled;
    use tempfile::TempDir;

    fn trained_model() -> (GradientBoost, Labeled) {
        let names = vec!["OverallQual".to_string(), "CentralAir".to_string()];
        let samples: Vec<Vec<Value>> = (0..20)
            .map(|i| {
                let air = if i % 2 == 0 { "Y" } else { "N" };
                vec![Value::Integer(i % 10), Value::from(air)]
            })
            .collect();
        let labels = (0..20)
            .map(|i| Value::Integer(100_000 + 10_000 * (i % 10)))
            .collect();
        let dataset = Labeled::new(names, samples, labels).unwrap();

        let config = ConfigBuilder::new()
            .random_seed(3)
            .num_iterations(10)
            .build()
            .unwrap();
        let mut model = GradientBoost::new(config).unwrap();
        model.train(&dataset).unwrap();
        (model, dataset)
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let (model, dataset) = trained_model();
        let persister = Filesystem::new(dir.path().join("housing.model"));

        persister.save(&model).unwrap();
        let restored = persister.load().unwrap();

        assert_eq!(
            model.predict(dataset.samples()).unwrap(),
            restored.predict(dataset.samples()).unwrap()
        );
        assert_eq!(model.steps(), restored.steps());
    }

    #[test]
    fn test_overwrite_without_history() {
        let dir = TempDir::new().unwrap();
        let (model, _) = trained_model();
        let persister = Filesystem::new(dir.path().join("housing.model"));

        persister.save(&model).unwrap();
        persister.save(&model).unwrap();

        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_history_keeps_previous_file() {
        let dir = TempDir::new().unwrap();
        let (model, _) = trained_model();
        let persister = Filesystem::new(dir.path().join("housing.model")).with_history(true);

        persister.save(&model).unwrap();
        persister.save(&model).unwrap();

        let names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names.len(), 2);
        assert!(names.iter().any(|n| n == "housing.model"));
        assert!(names
            .iter()
            .any(|n| n.starts_with("housing.model-") && n.ends_with(".old")));
    }

    #[test]
    fn test_untrained_model_is_not_saved() {
        let dir = TempDir::new().unwrap();
        let model = GradientBoost::new(crate::config::Config::default()).unwrap();
        let persister = Filesystem::new(dir.path().join("housing.model"));
        assert!(persister.save(&model).is_err());
        assert!(!persister.path().exists());
    }

    #[test]
    fn test_load_missing_or_corrupt_file() {
        let dir = TempDir::new().unwrap();
        let persister = Filesystem::new(dir.path().join("missing.model"));
        assert!(persister.load().is_err());

        let corrupt = dir.path().join("corrupt.model");
        fs::write(&corrupt, b"not a model").unwrap();
        assert!(Filesystem::new(corrupt).load().is_err());
    }

    #[test]
    fn test_persistent_model() {
        let dir = TempDir::new().unwrap();
        let (model, dataset) = trained_model();
        let expected = model.predict(dataset.samples()).unwrap();

        let wrapped = PersistentModel::new(model, Filesystem::new(dir.path().join("m.model")));
        wrapped.save().unwrap();

        let restored = PersistentModel::load(Filesystem::new(dir.path().join("m.model"))).unwrap();
        assert_eq!(restored.predict(dataset.samples()).unwrap(), expected);
        assert!(restored.estimator().is_trained());
        assert_eq!(restored.persister().path(), dir.path().join("m.model"));
    }
}
