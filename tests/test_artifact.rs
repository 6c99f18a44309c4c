use chrono::NaiveDate;
use energy_forecast::artifact::{latest_artifact, load_model, save_model, LATEST_POINTER};
use energy_forecast::data::{Dataset, Observation};
use energy_forecast::error::ForecastError;
use energy_forecast::models::scaler::{Scaler, SCALER_VERSION};
use energy_forecast::models::trend::{TrendModel, TrendRegressor};
use energy_forecast::models::PriceModel;
use std::fs;
use tempfile::tempdir;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn small_model() -> TrendModel {
    let observations = vec![
        Observation::new(date(2024, 1, 1), "Germany", "DEU", Some(60.0)),
        Observation::new(date(2024, 2, 1), "Germany", "DEU", Some(62.0)),
        Observation::new(date(2024, 3, 1), "Germany", "DEU", Some(64.0)),
    ];
    let data = Dataset::from_observations(observations);
    let scaler = Scaler::fit(&data).unwrap();
    let scaled = scaler.apply(&data);
    TrendRegressor::new().fit(&scaled, scaler).unwrap()
}

#[test]
fn test_latest_artifact_empty_directory_is_not_found() {
    let dir = tempdir().unwrap();
    let result = latest_artifact(dir.path());
    assert!(matches!(result, Err(ForecastError::ArtifactNotFound(_))));
}

#[test]
fn test_latest_artifact_missing_directory_is_not_found() {
    let result = latest_artifact(std::path::Path::new("no/such/directory"));
    assert!(matches!(result, Err(ForecastError::ArtifactNotFound(_))));
}

#[test]
fn test_save_then_resolve_and_load_round_trip() {
    let dir = tempdir().unwrap();
    let model = small_model();

    let saved = save_model(&model, dir.path()).unwrap();
    let resolved = latest_artifact(dir.path()).unwrap();
    assert_eq!(saved, resolved);

    let loaded = load_model(&resolved).unwrap();
    assert_eq!(loaded.name(), model.name());
    assert_eq!(loaded.scaler().version, SCALER_VERSION);
    assert_eq!(loaded.rows_trained, 3);

    let obs = Observation::new(date(2024, 4, 1), "Germany", "DEU", None);
    let original = model.predict(&obs).unwrap();
    let reloaded = loaded.predict(&obs).unwrap();
    assert_eq!(original, reloaded);
}

#[test]
fn test_save_writes_latest_pointer() {
    let dir = tempdir().unwrap();
    let saved = save_model(&small_model(), dir.path()).unwrap();

    let pointer = fs::read_to_string(dir.path().join(LATEST_POINTER)).unwrap();
    assert_eq!(
        pointer.trim(),
        saved.file_name().unwrap().to_str().unwrap()
    );
}

#[test]
fn test_resolution_falls_back_to_scan_without_pointer() {
    let dir = tempdir().unwrap();
    let saved = save_model(&small_model(), dir.path()).unwrap();

    fs::remove_file(dir.path().join(LATEST_POINTER)).unwrap();
    let resolved = latest_artifact(dir.path()).unwrap();
    assert_eq!(saved, resolved);
}

#[test]
fn test_resolution_ignores_stale_pointer() {
    let dir = tempdir().unwrap();
    let saved = save_model(&small_model(), dir.path()).unwrap();

    fs::write(dir.path().join(LATEST_POINTER), "model-gone").unwrap();
    let resolved = latest_artifact(dir.path()).unwrap();
    assert_eq!(saved, resolved);
}

#[test]
fn test_scan_tie_break_is_deterministic_by_name() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("model-aaa")).unwrap();
    fs::create_dir(dir.path().join("model-bbb")).unwrap();

    let resolved = latest_artifact(dir.path()).unwrap();
    assert_eq!(resolved.file_name().unwrap(), "model-bbb");
}

#[test]
fn test_scan_ignores_unrelated_entries() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("not-an-artifact")).unwrap();
    fs::write(dir.path().join("model-file-not-dir"), "x").unwrap();

    let result = latest_artifact(dir.path());
    assert!(matches!(result, Err(ForecastError::ArtifactNotFound(_))));
}

#[test]
fn test_load_unparsable_artifact_is_corrupt() {
    let dir = tempdir().unwrap();
    let artifact = dir.path().join("model-bad");
    fs::create_dir(&artifact).unwrap();
    fs::write(artifact.join("model.json"), "not json at all").unwrap();

    let result = load_model(&artifact);
    assert!(matches!(result, Err(ForecastError::ArtifactCorrupt(_))));
}

#[test]
fn test_load_missing_model_file_is_corrupt() {
    let dir = tempdir().unwrap();
    let artifact = dir.path().join("model-empty");
    fs::create_dir(&artifact).unwrap();

    let result = load_model(&artifact);
    assert!(matches!(result, Err(ForecastError::ArtifactCorrupt(_))));
}
