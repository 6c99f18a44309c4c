//! Extension of a historical dataset with model-priced future rows

use crate::data::{Dataset, Observation};
use crate::dates::{month_sequence, month_start, next_month};
use crate::error::{ForecastError, Result};
use crate::models::PriceModel;
use chrono::NaiveDate;

/// Extend `historical` through `end_date` with synthetic, model-priced
/// rows for every known country.
///
/// The watermark is the latest date across all countries. Synthetic rows
/// cover the months strictly after it, one per (future month, country)
/// pair, so concatenation cannot overlap history. Historical prices are
/// never revised: only rows lacking a price receive a predicted value.
pub fn extend<M: PriceModel>(
    historical: &Dataset,
    model: &M,
    end_date: NaiveDate,
) -> Result<Dataset> {
    let watermark = historical.watermark().ok_or_else(|| {
        ForecastError::DataUnavailable("No historical observations to extend".to_string())
    })?;

    let end = month_start(end_date);
    let future_months = if end <= watermark {
        Vec::new()
    } else {
        month_sequence(next_month(watermark), end)
    };

    let countries = historical.country_pairs();
    tracing::info!(
        watermark = %watermark,
        future_months = future_months.len(),
        countries = countries.len(),
        model = model.name(),
        "extending dataset"
    );

    let mut combined: Vec<Observation> = historical.observations().to_vec();
    for month in &future_months {
        for (country, code) in &countries {
            combined.push(Observation::new(*month, country.clone(), code.clone(), None));
        }
    }

    for obs in combined.iter_mut() {
        if obs.price.is_none() {
            obs.price = Some(model.predict(obs)?);
        }
    }

    Ok(Dataset::from_observations(combined))
}
