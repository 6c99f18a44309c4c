//! End-to-end forecast pipeline
//!
//! Keeping the workflow in one place:
//! load historical data -> resolve + load artifact -> extend -> project
//!
//! Front-ends (the `forecast` binary, or any caller) only deal with
//! presentation.

use crate::artifact;
use crate::data::Dataset;
use crate::dates::month_start;
use crate::error::{ForecastError, Result};
use crate::extend::extend;
use crate::project::prices_for_country;
use chrono::NaiveDate;
use std::path::PathBuf;

/// Locations the pipeline reads from.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Historical observations CSV
    pub data_path: PathBuf,
    /// Directory holding trained model artifacts
    pub model_dir: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data/electricity.csv"),
            model_dir: PathBuf::from("models"),
        }
    }
}

/// A single forecast request: how far to extend, and for whom.
#[derive(Debug, Clone)]
pub struct ForecastRequest {
    /// Last month to forecast, truncated to month start
    pub end_date: NaiveDate,
    /// Country identifier, matched exactly
    pub country: String,
}

impl ForecastRequest {
    /// Build a request for the given target month and country.
    pub fn new(year: i32, month: u32, country: impl Into<String>) -> Result<Self> {
        let end_date = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
            ForecastError::InvalidParameter(format!(
                "Invalid target month {}-{}",
                year, month
            ))
        })?;
        Ok(Self {
            end_date,
            country: country.into(),
        })
    }
}

/// Run the forecast pipeline with explicit configuration.
///
/// Loads the historical data and the latest artifact fresh on every
/// call, so newly trained models are picked up without a restart.
pub fn run_with(config: &PipelineConfig, request: &ForecastRequest) -> Result<Vec<f64>> {
    tracing::info!(
        country = %request.country,
        end_date = %request.end_date,
        data = %config.data_path.display(),
        "running forecast pipeline"
    );

    // 1) Load historical observations.
    let historical = Dataset::from_csv(&config.data_path)?;

    // 2) Resolve and load the latest trained model.
    let artifact_path = artifact::latest_artifact(&config.model_dir)?;
    let model = artifact::load_model(&artifact_path)?;

    // 3) Extend history with model-priced future rows.
    let combined = extend(&historical, &model, request.end_date)?;

    // 4) Project the requested country's ordered, rounded trajectory.
    Ok(prices_for_country(&combined, &request.country))
}

/// Run the forecast pipeline with default locations.
///
/// The `day` argument is accepted for interface compatibility but the
/// axis operates at month granularity; any day value is truncated to the
/// first of the month.
pub fn run(year: i32, month: u32, day: u32, country: &str) -> Result<Vec<f64>> {
    let request = ForecastRequest::new(year, month, country)?;
    if day > 1 {
        tracing::debug!(day, end_date = %month_start(request.end_date), "day truncated to month start");
    }
    run_with(&PipelineConfig::default(), &request)
}
