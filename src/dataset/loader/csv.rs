//! CSV file loader.
//!
//! Reads a headed CSV file, selects an explicit list of feature columns
//! plus one label column, and returns a [`Labeled`] dataset whose values
//! are the raw strings of the file.

use crate::core::error::{HousingError, Result};
use crate::core::types::*;
use crate::dataset::Labeled;
use csv::{ReaderBuilder, StringRecord};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// CSV-specific configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CsvConfig {
    /// Field delimiter
    pub delimiter: char,
    /// Quote character
    pub quote_char: char,
    /// Trim whitespace from fields
    pub trim: bool,
    /// Buffer size for reading
    pub buffer_size: usize,
}

impl Default for CsvConfig {
    fn default() -> Self {
        CsvConfig {
            delimiter: ',',
            quote_char: '"',
            trim: true,
            buffer_size: 8192,
        }
    }
}

/// CSV data loader
#[derive(Debug, Clone)]
pub struct CsvLoader {
    /// CSV-specific configuration
    csv_config: CsvConfig,
    /// Feature columns to read, in sample order
    feature_columns: Vec<String>,
    /// Label column
    label_column: String,
}

impl CsvLoader {
    /// Create a new CSV loader for the given feature and label columns
    pub fn new<S: AsRef<str>>(feature_columns: &[S], label_column: &str) -> Self {
        CsvLoader {
            csv_config: CsvConfig::default(),
            feature_columns: feature_columns
                .iter()
                .map(|c| c.as_ref().to_string())
                .collect(),
            label_column: label_column.to_string(),
        }
    }

    /// Set delimiter character
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.csv_config.delimiter = delimiter;
        self
    }

    /// Feature columns this loader reads
    pub fn feature_columns(&self) -> &[String] {
        &self.feature_columns
    }

    /// Load a CSV file
    pub fn load_csv<P: AsRef<Path>>(&self, path: P) -> Result<Labeled> {
        let path = path.as_ref();
        log::info!("Loading CSV file: {}", path.display());

        if !path.is_file() {
            return Err(HousingError::data_loading(format!(
                "File does not exist or is not a file: {}",
                path.display()
            )));
        }

        let file = File::open(path).map_err(|e| {
            HousingError::data_loading(format!("Failed to open file {}: {}", path.display(), e))
        })?;

        let dataset = self.load_from_reader(file)?;

        log::info!(
            "Loaded {} samples with {} features from {}",
            dataset.num_samples(),
            dataset.num_features(),
            path.display()
        );

        Ok(dataset)
    }

    /// Load CSV data from any reader
    pub fn load_from_reader<R: Read>(&self, reader: R) -> Result<Labeled> {
        let trim = if self.csv_config.trim {
            csv::Trim::All
        } else {
            csv::Trim::None
        };

        let mut reader = ReaderBuilder::new()
            .delimiter(self.csv_config.delimiter as u8)
            .quote(self.csv_config.quote_char as u8)
            .has_headers(true)
            .trim(trim)
            .buffer_capacity(self.csv_config.buffer_size)
            .from_reader(reader);

        let headers = reader
            .headers()
            .map_err(|e| HousingError::data_loading(format!("Failed to read headers: {}", e)))?
            .clone();

        let feature_indices = self
            .feature_columns
            .iter()
            .map(|name| column_index(&headers, name))
            .collect::<Result<Vec<_>>>()?;
        let label_index = column_index(&headers, &self.label_column)?;

        let mut samples = Vec::new();
        let mut labels = Vec::new();

        for result in reader.records() {
            let record = result?;

            let sample = feature_indices
                .iter()
                .map(|&i| field(&record, i))
                .collect::<Result<Vec<_>>>()?;

            samples.push(sample);
            labels.push(field(&record, label_index)?);
        }

        Labeled::new(self.feature_columns.clone(), samples, labels)
    }
}

/// Position of `name` in the header row.
fn column_index(headers: &StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| HousingError::missing_column(name))
}

fn field(record: &StringRecord, index: usize) -> Result<Value> {
    record.get(index).map(Value::from).ok_or_else(|| {
        HousingError::data_loading(format!(
            "Record at line {} has no field {}",
            record.position().map(|p| p.line()).unwrap_or(0),
            index
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const CSV: &str = "Id,LotArea,Street,SalePrice\n\
                       1,8450,Pave,208500\n\
                       2,9600,\"Grvl\",181500\n\
                       3,11250,Pave,223500\n";

    #[test]
    fn test_load_selects_columns_in_order() {
        let loader = CsvLoader::new(&["Street", "LotArea"], "SalePrice");
        let dataset = loader.load_from_reader(CSV.as_bytes()).unwrap();

        assert_eq!(dataset.num_samples(), 3);
        assert_eq!(dataset.feature_names(), &["Street", "LotArea"]);
        assert_eq!(
            dataset.sample(1).unwrap(),
            &[Value::from("Grvl"), Value::from("9600")]
        );
        assert_eq!(dataset.labels()[2], Value::from("223500"));
    }

    #[test]
    fn test_missing_feature_column() {
        let loader = CsvLoader::new(&["LotArea", "PoolQC"], "SalePrice");
        let err = loader.load_from_reader(CSV.as_bytes()).unwrap_err();
        assert!(matches!(err, HousingError::MissingColumn { ref column } if column == "PoolQC"));
    }

    #[test]
    fn test_missing_label_column() {
        let loader = CsvLoader::new(&["LotArea"], "Price");
        let err = loader.load_from_reader(CSV.as_bytes()).unwrap_err();
        assert!(matches!(err, HousingError::MissingColumn { .. }));
    }

    #[test]
    fn test_ragged_record_is_an_error() {
        let data = "LotArea,SalePrice\n8450,208500\n9600\n";
        let loader = CsvLoader::new(&["LotArea"], "SalePrice");
        assert!(loader.load_from_reader(data.as_bytes()).is_err());
    }

    #[test]
    fn test_load_csv_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(CSV.as_bytes()).unwrap();

        let loader = CsvLoader::new(&["LotArea"], "SalePrice");
        let dataset = loader.load_csv(file.path()).unwrap();
        assert_eq!(dataset.num_samples(), 3);
    }

    #[test]
    fn test_load_csv_missing_file() {
        let loader = CsvLoader::new(&["LotArea"], "SalePrice");
        let err = loader.load_csv("does/not/exist.csv").unwrap_err();
        assert!(matches!(err, HousingError::DataLoading { .. }));
    }

    #[test]
    fn test_semicolon_delimiter() {
        let data = "LotArea;SalePrice\n8450;208500\n";
        let loader = CsvLoader::new(&["LotArea"], "SalePrice").with_delimiter(';');
        let dataset = loader.load_from_reader(data.as_bytes()).unwrap();
        assert_eq!(dataset.labels()[0], Value::from("208500"));
    }
}
