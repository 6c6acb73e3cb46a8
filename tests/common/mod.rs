//! Common test utilities for housing-gbm integration tests.

#![allow(dead_code)]

use housing_gbm::*;
use rand::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Feature columns filled with numbers; every other column is categorical.
const NUMERIC_COLUMNS: &[&str] = &[
    "MSSubClass", "LotFrontage", "LotArea", "OverallQual", "OverallCond", "YearBuilt",
    "YearRemodAdd", "MasVnrArea", "BsmtFinSF1", "BsmtFinSF2", "BsmtUnfSF", "TotalBsmtSF",
    "1stFlrSF", "2ndFlrSF", "LowQualFinSF", "GrLivArea", "BsmtFullBath", "BsmtHalfBath",
    "FullBath", "HalfBath", "BedroomAbvGr", "KitchenAbvGr", "TotRmsAbvGrd", "Fireplaces",
    "GarageYrBlt", "GarageCars", "GarageArea", "WoodDeckSF", "OpenPorchSF",
    "EnclosedPorch", "3SsnPorch", "ScreenPorch", "PoolArea", "MiscVal", "MoSold", "YrSold",
];

const CATEGORIES: &[&str] = &["RL", "RM", "Pave", "Grvl", "Gd", "TA", "Ex", "NA"];

/// One synthetic house: the feature cells as CSV text and the sale price.
pub fn create_house(rng: &mut StdRng) -> (Vec<String>, f64) {
    let quality: i64 = rng.gen_range(1..=10);
    let living_area: i64 = rng.gen_range(600..=3000);

    let cells = HOUSING_FEATURES
        .iter()
        .map(|&column| match column {
            "OverallQual" => quality.to_string(),
            "GrLivArea" => living_area.to_string(),
            // Real data marks unknown frontage with NA
            "LotFrontage" if rng.gen_bool(0.2) => "NA".to_string(),
            "LotFrontage" => format!("{:.1}", rng.gen_range(20.0..120.0)),
            c if NUMERIC_COLUMNS.contains(&c) => rng.gen_range(0..2000).to_string(),
            _ => CATEGORIES[rng.gen_range(0..CATEGORIES.len())].to_string(),
        })
        .collect();

    let noise = rng.gen_range(-2_000.0..2_000.0);
    let price = 20_000.0 * quality as f64 + 50.0 * living_area as f64 + noise + 0.5;
    (cells, price)
}

/// Write a housing CSV with `rows` houses (plus an unused `Id` column) to
/// `path`.
pub fn write_housing_csv(path: &Path, rows: usize, seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut writer = csv::Writer::from_path(path).unwrap();

    let mut header = vec!["Id".to_string()];
    header.extend(HOUSING_FEATURES.iter().map(|c| c.to_string()));
    header.push(LABEL_COLUMN.to_string());
    writer.write_record(&header).unwrap();

    for id in 0..rows {
        let (cells, price) = create_house(&mut rng);
        let mut record = vec![(id + 1).to_string()];
        record.extend(cells);
        record.push(format!("{:.2}", price));
        writer.write_record(&record).unwrap();
    }

    writer.flush().unwrap();
}

/// Write a CSV whose header lacks `column`.
pub fn write_csv_without(path: &Path, column: &str) {
    let mut header: Vec<&str> = HOUSING_FEATURES.to_vec();
    header.push(LABEL_COLUMN);
    header.retain(|c| *c != column);

    let row = vec!["1"; header.len()];
    fs::write(path, format!("{}\n{}\n", header.join(","), row.join(","))).unwrap();
}

/// Temporary working directory holding `dataset.csv` with `rows` houses.
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new(rows: usize, seed: u64) -> Self {
        let dir = TempDir::new().unwrap();
        write_housing_csv(&dir.path().join(DATASET_FILE), rows, seed);
        Workspace { dir }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Default configuration with every path inside the workspace.
    pub fn config(&self, seed: u64) -> ConfigBuilder {
        ConfigBuilder::new()
            .random_seed(seed)
            .dataset_path(self.path(DATASET_FILE))
            .progress_path(self.path(PROGRESS_FILE))
            .report_path(self.path(REPORT_FILE))
            .model_path(self.path(MODEL_FILE))
    }
}

/// Run every stage up to and including the written reports.
pub fn run_until_reported(config: Config) -> Pipeline {
    let mut pipeline = Pipeline::new(config).unwrap();
    pipeline.load().unwrap();
    pipeline.transform().unwrap();
    pipeline.split().unwrap();
    pipeline.train().unwrap();
    pipeline.evaluate().unwrap();
    pipeline.report().unwrap();
    pipeline
}
