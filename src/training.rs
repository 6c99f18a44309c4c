//! Offline training pipeline: cleaning, splitting, fitting, persistence

use crate::artifact;
use crate::data::{Dataset, Observation};
use crate::error::{ForecastError, Result};
use crate::metrics::forecast_accuracy;
use crate::models::scaler::Scaler;
use crate::models::trend::TrendRegressor;
use crate::models::PriceModel;
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Fixed seed for the reproducible train/test partition.
pub const DEFAULT_SEED: u64 = 42;
/// Share of the cleaned data held out for evaluation.
pub const DEFAULT_TEST_RATIO: f64 = 0.2;

type DedupKey = (
    NaiveDate,
    String,
    String,
    Option<u64>,
    Vec<(String, u64)>,
);

fn dedup_key(obs: &Observation) -> DedupKey {
    (
        obs.date,
        obs.country.clone(),
        obs.country_code.clone(),
        obs.price.map(f64::to_bits),
        obs.features
            .iter()
            .map(|(k, v)| (k.clone(), v.to_bits()))
            .collect(),
    )
}

/// Clean a raw dataset for training.
///
/// Drops rows with any missing field, drops exact duplicates, then fits
/// the winsorize-and-standardize [`Scaler`] on the surviving rows and
/// applies it. The scaler is returned alongside the cleaned data so it
/// can be persisted with the model and inverted at prediction time.
pub fn clean(raw: &Dataset) -> Result<(Dataset, Scaler)> {
    // A feature column counts as required once any row carries it;
    // non-numeric source columns never reach the feature map.
    let required: Vec<&String> = raw
        .feature_columns()
        .iter()
        .filter(|column| raw.iter().any(|o| o.features.contains_key(*column)))
        .collect();

    let mut seen = HashSet::new();
    let mut kept = Vec::new();
    for obs in raw.iter() {
        if obs.price.is_none() || obs.country.is_empty() || obs.country_code.is_empty() {
            continue;
        }
        if required.iter().any(|c| !obs.features.contains_key(*c)) {
            continue;
        }
        if seen.insert(dedup_key(obs)) {
            kept.push(obs.clone());
        }
    }

    if kept.is_empty() {
        return Err(ForecastError::DataUnavailable(
            "No complete rows left after cleaning".to_string(),
        ));
    }

    tracing::info!(
        raw = raw.len(),
        cleaned = kept.len(),
        "cleaned training data"
    );

    let complete = Dataset::from_observations(kept);
    let scaler = Scaler::fit(&complete)?;
    let cleaned = scaler.apply(&complete);
    Ok((cleaned, scaler))
}

/// Deterministic shuffled train/test partition.
pub fn split(data: &Dataset, test_ratio: f64, seed: u64) -> Result<(Dataset, Dataset)> {
    if !(0.0..1.0).contains(&test_ratio) {
        return Err(ForecastError::InvalidParameter(format!(
            "Test ratio must be in [0, 1), got {}",
            test_ratio
        )));
    }

    let mut indices: Vec<usize> = (0..data.len()).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let test_size = (data.len() as f64 * test_ratio).round() as usize;
    let train_size = data.len() - test_size;

    let observations = data.observations();
    let train: Vec<Observation> = indices[..train_size]
        .iter()
        .map(|&i| observations[i].clone())
        .collect();
    let test: Vec<Observation> = indices[train_size..]
        .iter()
        .map(|&i| observations[i].clone())
        .collect();

    Ok((
        Dataset::from_observations(train),
        Dataset::from_observations(test),
    ))
}

/// Train a model from a historical CSV source and persist it as a new
/// artifact under `model_dir`. Returns the artifact path.
pub fn train(source: &Path, model_dir: &Path) -> Result<PathBuf> {
    let raw = Dataset::from_csv(source)?;
    let (cleaned, scaler) = clean(&raw)?;
    let (train_set, test_set) = split(&cleaned, DEFAULT_TEST_RATIO, DEFAULT_SEED)?;

    let model = TrendRegressor::new().fit(&train_set, scaler.clone())?;

    // Holdout evaluation in the original price scale. Countries that only
    // ended up in the test split cannot be scored.
    let mut predicted = Vec::new();
    let mut actual = Vec::new();
    for obs in test_set.iter() {
        if model.country_params(&obs.country).is_none() {
            continue;
        }
        if let Some(price) = obs.price {
            predicted.push(model.predict(obs)?);
            actual.push(scaler.invert_target(price));
        }
    }
    if !predicted.is_empty() {
        let accuracy = forecast_accuracy(&predicted, &actual)?;
        tracing::info!(
            rmse = accuracy.rmse,
            mae = accuracy.mae,
            holdout_rows = predicted.len(),
            "holdout evaluation"
        );
    }

    artifact::save_model(&model, model_dir)
}
