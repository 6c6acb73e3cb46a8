//! End-to-end tests of the housing price job.
//!
//! Each test writes a synthetic housing CSV into a temporary directory and
//! drives the pipeline the way the `housing` binary does.

use housing_gbm::*;
use std::fs;

mod common;
use common::*;

#[test]
fn test_ten_row_run() {
    let workspace = Workspace::new(10, 1);
    let mut pipeline = Pipeline::new(workspace.config(42).build().unwrap()).unwrap();

    let dataset = pipeline.load().unwrap();
    assert_eq!(dataset.num_samples(), 10);
    assert_eq!(dataset.num_features(), 79);

    pipeline.transform().unwrap();
    assert_eq!(pipeline.split().unwrap(), (8, 2));

    let model = pipeline.train().unwrap();
    let steps = model.steps().len();
    assert!((1..=100).contains(&steps));

    let report = pipeline.evaluate().unwrap();
    assert_eq!(report.cardinality, 2);
    assert!(report.mean_absolute_error.is_finite());
    assert_eq!(pipeline.predictions().unwrap().len(), 2);

    pipeline.report().unwrap();

    let progress = fs::read_to_string(workspace.path(PROGRESS_FILE)).unwrap();
    let mut lines = progress.lines();
    assert_eq!(lines.next(), Some("loss"));
    assert_eq!(lines.count(), steps);

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(workspace.path(REPORT_FILE)).unwrap()).unwrap();
    assert!(json["mean_absolute_error"].as_f64().unwrap().is_finite());
    assert_eq!(json["cardinality"], 2);
}

#[test]
fn test_saved_model_predicts_identically() {
    let workspace = Workspace::new(30, 2);
    let mut pipeline = run_until_reported(workspace.config(7).build().unwrap());
    pipeline.persist().unwrap();
    assert_eq!(pipeline.stage(), Stage::Persisted);

    let testing = pipeline.testing().unwrap();
    let expected = pipeline.predictions().unwrap().clone();

    let restored = PersistentModel::load(Filesystem::new(workspace.path(MODEL_FILE))).unwrap();
    assert_eq!(restored.predict(testing.samples()).unwrap(), expected);
}

#[test]
fn test_declined_prompt_leaves_no_model() {
    let workspace = Workspace::new(20, 3);
    let pipeline = run_until_reported(workspace.config(3).build().unwrap());

    let mut output = Vec::new();
    let save = confirm(&mut "n\n".as_bytes(), &mut output, SAVE_PROMPT).unwrap();
    assert!(!save);
    assert_eq!(String::from_utf8(output).unwrap(), "Save this model? (y|[n]): ");

    assert_eq!(pipeline.stage(), Stage::Reported);
    assert!(!workspace.path(MODEL_FILE).exists());
}

#[test]
fn test_accepted_prompt_saves_model() {
    let workspace = Workspace::new(20, 4);
    let mut pipeline = run_until_reported(workspace.config(4).build().unwrap());

    if confirm(&mut "Y\n".as_bytes(), &mut Vec::new(), SAVE_PROMPT).unwrap() {
        pipeline.persist().unwrap();
    }
    assert!(workspace.path(MODEL_FILE).exists());
}

#[test]
fn test_model_history_keeps_previous_file() {
    let workspace = Workspace::new(20, 5);
    let config = workspace
        .config(5)
        .keep_model_history(true)
        .build()
        .unwrap();

    for _ in 0..2 {
        let mut pipeline = run_until_reported(config.clone());
        pipeline.persist().unwrap();
    }

    let old_files = fs::read_dir(workspace.dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".old"))
        .count();
    assert_eq!(old_files, 1);
    assert!(workspace.path(MODEL_FILE).exists());
}

#[test]
fn test_model_learns_price_structure() {
    let workspace = Workspace::new(250, 6);
    let pipeline = run_until_reported(workspace.config(6).build().unwrap());

    let model = pipeline.model().unwrap();
    let steps = model.steps();
    assert!(steps.last().unwrap() < steps.first().unwrap());

    let report = pipeline.residual_report().unwrap();
    assert_eq!(report.cardinality, 50);
    assert!(report.r_squared > 0.5, "r_squared = {}", report.r_squared);

    let importances = model.feature_importances();
    let top = importances
        .iter()
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .unwrap();
    assert!(top.0 == "OverallQual" || top.0 == "GrLivArea", "top = {}", top.0);
}

#[test]
fn test_seeded_runs_are_reproducible() {
    let workspace = Workspace::new(40, 8);
    let first = run_until_reported(workspace.config(99).build().unwrap());
    let second = run_until_reported(workspace.config(99).build().unwrap());

    assert_eq!(first.model().unwrap().steps(), second.model().unwrap().steps());
    assert_eq!(first.predictions(), second.predictions());
}

#[test]
fn test_missing_column_is_reported() {
    let workspace = Workspace::new(5, 9);
    write_csv_without(&workspace.path(DATASET_FILE), "GarageArea");

    let mut pipeline = Pipeline::new(workspace.config(1).build().unwrap()).unwrap();
    match pipeline.load() {
        Err(HousingError::MissingColumn { column }) => assert_eq!(column, "GarageArea"),
        other => panic!("expected a missing column error, got {:?}", other.map(|d| d.num_samples())),
    }
}

#[test]
fn test_missing_label_column_is_reported() {
    let workspace = Workspace::new(5, 10);
    write_csv_without(&workspace.path(DATASET_FILE), LABEL_COLUMN);

    let mut pipeline = Pipeline::new(workspace.config(1).build().unwrap()).unwrap();
    assert!(matches!(
        pipeline.load(),
        Err(HousingError::MissingColumn { .. })
    ));
}

#[test]
fn test_config_file_drives_the_run() {
    let workspace = Workspace::new(20, 11);
    let config_path = workspace.path(CONFIG_FILE);
    workspace
        .config(12)
        .num_iterations(5)
        .min_change(0.0)
        .tolerance(0.0)
        .build()
        .unwrap()
        .save_to_file(&config_path)
        .unwrap();

    let config = Config::load_from_file(&config_path).unwrap();
    let pipeline = run_until_reported(config);
    assert_eq!(pipeline.model().unwrap().steps().len(), 5);
}
