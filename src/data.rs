//! Historical electricity-price observations and their CSV ingestion

use crate::dates::month_start;
use crate::error::{ForecastError, Result};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::path::Path;

/// Name of the date column in the historical source.
pub const DATE_COLUMN: &str = "Date";
/// Name of the country column in the historical source.
pub const COUNTRY_COLUMN: &str = "Country";
/// Name of the short country-code column in the historical source.
pub const CODE_COLUMN: &str = "ISO3 Code";
/// Name of the target price column in the historical source.
pub const TARGET_COLUMN: &str = "Price (EUR/MWhe)";

/// One country-month row of the tabular dataset.
///
/// `price` is present for historical rows and absent for synthetic future
/// rows until the model has priced them. Any extra numeric columns of the
/// source are carried through untouched in `features`.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    /// Month-start date of the observation
    pub date: NaiveDate,
    /// Country identifier
    pub country: String,
    /// Short country code (ISO3)
    pub country_code: String,
    /// Electricity price in EUR/MWhe, absent until predicted
    pub price: Option<f64>,
    /// Passthrough numeric feature columns
    pub features: BTreeMap<String, f64>,
}

impl Observation {
    /// Create an observation without passthrough features.
    pub fn new(
        date: NaiveDate,
        country: impl Into<String>,
        country_code: impl Into<String>,
        price: Option<f64>,
    ) -> Self {
        Self {
            date,
            country: country.into(),
            country_code: country_code.into(),
            price,
            features: BTreeMap::new(),
        }
    }
}

/// A collection of observations, possibly spanning multiple countries.
///
/// Dates are normalized to month-starts on ingestion so cross joins and
/// merges align exactly.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    observations: Vec<Observation>,
    feature_columns: Vec<String>,
}

impl Dataset {
    /// Load observations from a tabular CSV source.
    ///
    /// Fails with [`ForecastError::DataUnavailable`] when the file is
    /// missing, empty, or malformed.
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut reader = csv::Reader::from_path(path).map_err(|e| {
            ForecastError::DataUnavailable(format!("{}: {}", path.display(), e))
        })?;

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| {
                ForecastError::DataUnavailable(format!("{}: {}", path.display(), e))
            })?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let date_idx = Self::find_column(&headers, DATE_COLUMN, "date")?;
        let country_idx = Self::find_column(&headers, COUNTRY_COLUMN, "country")?;
        let code_idx = Self::find_column(&headers, CODE_COLUMN, "code")?;
        let price_idx = Self::find_column(&headers, TARGET_COLUMN, "price")?;

        let reserved = [date_idx, country_idx, code_idx, price_idx];
        let feature_columns: Vec<String> = headers
            .iter()
            .enumerate()
            .filter(|(i, _)| !reserved.contains(i))
            .map(|(_, name)| name.clone())
            .collect();

        let mut observations = Vec::new();
        for (row, record) in reader.records().enumerate() {
            let record = record.map_err(|e| {
                ForecastError::DataUnavailable(format!(
                    "{} row {}: {}",
                    path.display(),
                    row + 2,
                    e
                ))
            })?;

            let date = Self::parse_date(record.get(date_idx).unwrap_or(""))
                .ok_or_else(|| {
                    ForecastError::DataUnavailable(format!(
                        "{} row {}: unparsable date '{}'",
                        path.display(),
                        row + 2,
                        record.get(date_idx).unwrap_or("")
                    ))
                })?;

            let price_field = record.get(price_idx).unwrap_or("").trim();
            let price = if price_field.is_empty() {
                None
            } else {
                Some(price_field.parse::<f64>().map_err(|_| {
                    ForecastError::DataUnavailable(format!(
                        "{} row {}: unparsable price '{}'",
                        path.display(),
                        row + 2,
                        price_field
                    ))
                })?)
            };

            let mut features = BTreeMap::new();
            for (i, name) in headers.iter().enumerate() {
                if reserved.contains(&i) {
                    continue;
                }
                if let Some(value) = record.get(i) {
                    if let Ok(parsed) = value.trim().parse::<f64>() {
                        features.insert(name.clone(), parsed);
                    }
                }
            }

            observations.push(Observation {
                date: month_start(date),
                country: record.get(country_idx).unwrap_or("").trim().to_string(),
                country_code: record.get(code_idx).unwrap_or("").trim().to_string(),
                price,
                features,
            });
        }

        if observations.is_empty() {
            return Err(ForecastError::DataUnavailable(format!(
                "{}: no observations",
                path.display()
            )));
        }

        tracing::info!(
            path = %path.display(),
            rows = observations.len(),
            "loaded historical observations"
        );

        Ok(Self {
            observations,
            feature_columns,
        })
    }

    /// Build a dataset from in-memory observations.
    pub fn from_observations(observations: Vec<Observation>) -> Self {
        let mut feature_columns: Vec<String> = Vec::new();
        for obs in &observations {
            for name in obs.features.keys() {
                if !feature_columns.contains(name) {
                    feature_columns.push(name.clone());
                }
            }
        }
        Self {
            observations,
            feature_columns,
        }
    }

    /// Locate a column by exact name, falling back to a case-insensitive
    /// substring match.
    fn find_column(headers: &[String], exact: &str, fragment: &str) -> Result<usize> {
        if let Some(idx) = headers.iter().position(|h| h == exact) {
            return Ok(idx);
        }
        headers
            .iter()
            .position(|h| h.to_lowercase().contains(fragment))
            .ok_or_else(|| {
                ForecastError::DataUnavailable(format!("no '{}' column found", exact))
            })
    }

    fn parse_date(field: &str) -> Option<NaiveDate> {
        let field = field.trim();
        for format in ["%Y-%m-%d", "%Y/%m/%d", "%d.%m.%Y"] {
            if let Ok(date) = NaiveDate::parse_from_str(field, format) {
                return Some(date);
            }
        }
        None
    }

    /// All observations in insertion order.
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Iterate over the observations.
    pub fn iter(&self) -> std::slice::Iter<'_, Observation> {
        self.observations.iter()
    }

    /// Names of the passthrough feature columns.
    pub fn feature_columns(&self) -> &[String] {
        &self.feature_columns
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Check if the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Latest date present in the dataset across all countries.
    pub fn watermark(&self) -> Option<NaiveDate> {
        self.observations.iter().map(|o| o.date).max()
    }

    /// Distinct (country, country_code) pairs in first-seen order.
    pub fn country_pairs(&self) -> Vec<(String, String)> {
        let mut pairs: Vec<(String, String)> = Vec::new();
        for obs in &self.observations {
            let pair = (obs.country.clone(), obs.country_code.clone());
            if !pairs.contains(&pair) {
                pairs.push(pair);
            }
        }
        pairs
    }
}
