//! Winsorize-and-standardize transform shared by training and prediction

use crate::data::Dataset;
use crate::error::{ForecastError, Result};
use serde::{Deserialize, Serialize};
use statrs::statistics::{Data, OrderStatistics, Statistics};
use std::collections::BTreeMap;

/// Current scaler format version, persisted with the artifact.
pub const SCALER_VERSION: u32 = 1;

/// Per-column clipping bounds and standardization statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnStats {
    /// 1st percentile of the training column
    pub lower: f64,
    /// 99th percentile of the training column
    pub upper: f64,
    /// Mean of the clipped training column
    pub mean: f64,
    /// Standard deviation of the clipped training column
    pub std_dev: f64,
}

impl ColumnStats {
    /// Fit clipping bounds and standardization statistics on one column.
    ///
    /// Both the mean and standard deviation are computed on the clipped
    /// values, never on the original scale.
    pub fn fit(values: &[f64]) -> Result<Self> {
        if values.is_empty() {
            return Err(ForecastError::InvalidParameter(
                "Cannot fit a scaler on an empty column".to_string(),
            ));
        }

        let mut ordered = Data::new(values.to_vec());
        let lower = ordered.percentile(1);
        let upper = ordered.percentile(99);

        let clipped: Vec<f64> = values.iter().map(|v| v.clamp(lower, upper)).collect();
        let mean = clipped.iter().mean();
        let std_dev = clipped.iter().std_dev();

        Ok(Self {
            lower,
            upper,
            mean,
            std_dev,
        })
    }

    /// Clip to the fitted percentile bounds, then standardize.
    pub fn apply(&self, value: f64) -> f64 {
        let clipped = value.clamp(self.lower, self.upper);
        if self.std_dev == 0.0 || self.std_dev.is_nan() {
            0.0
        } else {
            (clipped - self.mean) / self.std_dev
        }
    }

    /// Map a standardized value back to the original scale.
    ///
    /// Clipping is lossy and is not undone here.
    pub fn invert(&self, value: f64) -> f64 {
        if self.std_dev == 0.0 || self.std_dev.is_nan() {
            self.mean
        } else {
            value * self.std_dev + self.mean
        }
    }
}

/// Versioned numeric transform fitted on the cleaned training set and
/// persisted inside the model artifact, so training and prediction apply
/// the identical step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scaler {
    /// Format version of the persisted transform
    pub version: u32,
    /// Statistics for the target price column
    pub target: ColumnStats,
    /// Statistics for the passthrough feature columns
    pub features: BTreeMap<String, ColumnStats>,
}

impl Scaler {
    /// Fit the transform on every numeric column of the dataset.
    ///
    /// Every row must carry a price; the Trainer drops incomplete rows
    /// before fitting.
    pub fn fit(data: &Dataset) -> Result<Self> {
        let prices: Vec<f64> = data.iter().filter_map(|o| o.price).collect();
        if prices.len() != data.len() || prices.is_empty() {
            return Err(ForecastError::InvalidParameter(
                "Scaler requires a price on every training row".to_string(),
            ));
        }

        let target = ColumnStats::fit(&prices)?;

        let mut features = BTreeMap::new();
        for column in data.feature_columns() {
            let values: Vec<f64> = data
                .iter()
                .filter_map(|o| o.features.get(column).copied())
                .collect();
            if !values.is_empty() {
                features.insert(column.clone(), ColumnStats::fit(&values)?);
            }
        }

        Ok(Self {
            version: SCALER_VERSION,
            target,
            features,
        })
    }

    /// Winsorize and standardize every numeric column, returning a new
    /// dataset. Rows without a price keep it absent.
    pub fn apply(&self, data: &Dataset) -> Dataset {
        let observations = data
            .iter()
            .map(|obs| {
                let mut scaled = obs.clone();
                scaled.price = obs.price.map(|p| self.target.apply(p));
                for (name, value) in scaled.features.iter_mut() {
                    if let Some(stats) = self.features.get(name) {
                        *value = stats.apply(*value);
                    }
                }
                scaled
            })
            .collect();
        Dataset::from_observations(observations)
    }

    /// Map a standardized target prediction back to EUR/MWhe.
    pub fn invert_target(&self, value: f64) -> f64 {
        self.target.invert(value)
    }
}
