//! Per-country trend regressor with monthly seasonal offsets

use crate::data::{Dataset, Observation};
use crate::dates::month_index;
use crate::error::{ForecastError, Result};
use crate::models::scaler::Scaler;
use crate::models::PriceModel;
use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Untrained per-country trend regressor.
#[derive(Debug, Clone)]
pub struct TrendRegressor {
    /// Name of the model
    name: String,
}

/// Fitted per-country parameters: a linear trend over the month index
/// plus one additive offset per calendar month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountryParams {
    /// Trend intercept in standardized target units
    pub intercept: f64,
    /// Trend slope per month in standardized target units
    pub slope: f64,
    /// Additive offset per calendar month (January first)
    pub seasonal: Vec<f64>,
}

/// Trained per-country trend model.
///
/// Fitted on the standardized target; predictions are mapped back to the
/// original scale through the embedded [`Scaler`], so the values a caller
/// sees are EUR/MWhe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendModel {
    /// Name of the model
    name: String,
    /// Numeric transform fitted by the Trainer
    scaler: Scaler,
    /// Fitted parameters per country
    countries: BTreeMap<String, CountryParams>,
    /// When the model was trained
    pub trained_at: DateTime<Utc>,
    /// Number of rows the model was fitted on
    pub rows_trained: usize,
}

impl TrendRegressor {
    /// Create a new trend regressor.
    pub fn new() -> Self {
        Self {
            name: "Per-country seasonal trend".to_string(),
        }
    }

    /// Fit the regressor on a cleaned, standardized training set.
    ///
    /// `scaler` must be the transform that produced `data`; it travels
    /// with the trained model so prediction inverts the same step.
    pub fn fit(&self, data: &Dataset, scaler: Scaler) -> Result<TrendModel> {
        if data.is_empty() {
            return Err(ForecastError::DataUnavailable(
                "Empty training dataset".to_string(),
            ));
        }

        let mut grouped: BTreeMap<String, Vec<(f64, u32, f64)>> = BTreeMap::new();
        for obs in data.iter() {
            let price = obs.price.ok_or_else(|| {
                ForecastError::InvalidParameter(
                    "Training rows must carry a price".to_string(),
                )
            })?;
            grouped.entry(obs.country.clone()).or_default().push((
                month_index(obs.date) as f64,
                obs.date.month(),
                price,
            ));
        }

        let mut countries = BTreeMap::new();
        for (country, rows) in grouped {
            countries.insert(country, Self::fit_country(&rows));
        }

        Ok(TrendModel {
            name: self.name.clone(),
            scaler,
            countries,
            trained_at: Utc::now(),
            rows_trained: data.len(),
        })
    }

    /// Closed-form least squares on (month index, price), then mean
    /// residual per calendar month as the seasonal component.
    fn fit_country(rows: &[(f64, u32, f64)]) -> CountryParams {
        let n = rows.len() as f64;
        let t_mean = rows.iter().map(|(t, _, _)| t).sum::<f64>() / n;
        let y_mean = rows.iter().map(|(_, _, y)| y).sum::<f64>() / n;

        let covariance: f64 = rows
            .iter()
            .map(|(t, _, y)| (t - t_mean) * (y - y_mean))
            .sum();
        let variance: f64 = rows.iter().map(|(t, _, _)| (t - t_mean).powi(2)).sum();

        let slope = if variance == 0.0 {
            0.0
        } else {
            covariance / variance
        };
        let intercept = y_mean - slope * t_mean;

        let mut seasonal = vec![0.0; 12];
        let mut counts = vec![0usize; 12];
        for (t, month, y) in rows {
            let residual = y - (intercept + slope * t);
            seasonal[(*month as usize) - 1] += residual;
            counts[(*month as usize) - 1] += 1;
        }
        for (sum, count) in seasonal.iter_mut().zip(counts) {
            if count > 0 {
                *sum /= count as f64;
            }
        }

        CountryParams {
            intercept,
            slope,
            seasonal,
        }
    }

    /// Get the model's name
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Default for TrendRegressor {
    fn default() -> Self {
        Self::new()
    }
}

impl TrendModel {
    /// Fitted parameters for one country, if it was seen in training.
    pub fn country_params(&self, country: &str) -> Option<&CountryParams> {
        self.countries.get(country)
    }

    /// Countries the model can price.
    pub fn countries(&self) -> impl Iterator<Item = &String> {
        self.countries.keys()
    }

    /// The numeric transform fitted alongside the model.
    pub fn scaler(&self) -> &Scaler {
        &self.scaler
    }
}

impl PriceModel for TrendModel {
    fn predict(&self, observation: &Observation) -> Result<f64> {
        let params = self.countries.get(&observation.country).ok_or_else(|| {
            ForecastError::Prediction(format!(
                "Model has no parameters for country '{}'",
                observation.country
            ))
        })?;

        let t = month_index(observation.date) as f64;
        let month = observation.date.month() as usize;
        let standardized = params.intercept + params.slope * t + params.seasonal[month - 1];

        Ok(self.scaler.invert_target(standardized))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
