use chrono::NaiveDate;
use energy_forecast::data::{Dataset, Observation};
use energy_forecast::error::{ForecastError, Result};
use energy_forecast::extend::extend;
use energy_forecast::models::PriceModel;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

struct ConstModel(f64);

impl PriceModel for ConstModel {
    fn predict(&self, _observation: &Observation) -> Result<f64> {
        Ok(self.0)
    }

    fn name(&self) -> &str {
        "constant"
    }
}

struct RejectingModel;

impl PriceModel for RejectingModel {
    fn predict(&self, observation: &Observation) -> Result<f64> {
        Err(ForecastError::Prediction(format!(
            "unseen country '{}'",
            observation.country
        )))
    }

    fn name(&self) -> &str {
        "rejecting"
    }
}

fn two_country_history() -> Dataset {
    Dataset::from_observations(vec![
        Observation::new(date(2024, 11, 1), "Germany", "DEU", Some(60.0)),
        Observation::new(date(2024, 12, 1), "Germany", "DEU", Some(62.0)),
        Observation::new(date(2024, 11, 1), "France", "FRA", Some(50.0)),
        Observation::new(date(2024, 12, 1), "France", "FRA", Some(52.0)),
    ])
}

#[test]
fn test_extend_synthesizes_cross_product_of_months_and_countries() {
    let historical = two_country_history();
    let combined = extend(&historical, &ConstModel(70.0), date(2025, 3, 1)).unwrap();

    // 4 historical rows + 3 future months x 2 countries
    assert_eq!(combined.len(), 10);

    let synthetic: Vec<_> = combined
        .iter()
        .filter(|o| o.date > date(2024, 12, 1))
        .collect();
    assert_eq!(synthetic.len(), 6);

    for month in [date(2025, 1, 1), date(2025, 2, 1), date(2025, 3, 1)] {
        for country in ["Germany", "France"] {
            assert_eq!(
                synthetic
                    .iter()
                    .filter(|o| o.date == month && o.country == country)
                    .count(),
                1
            );
        }
    }
}

#[test]
fn test_extend_never_overwrites_historical_prices() {
    let historical = two_country_history();
    let combined = extend(&historical, &ConstModel(999.0), date(2025, 2, 1)).unwrap();

    for original in historical.iter() {
        let kept = combined
            .iter()
            .find(|o| o.date == original.date && o.country == original.country)
            .unwrap();
        assert_eq!(kept.price, original.price);
    }
}

#[test]
fn test_extend_prices_every_synthetic_row() {
    let historical = two_country_history();
    let combined = extend(&historical, &ConstModel(71.5), date(2025, 1, 1)).unwrap();

    for obs in combined.iter().filter(|o| o.date > date(2024, 12, 1)) {
        assert_eq!(obs.price, Some(71.5));
    }
}

#[test]
fn test_extend_with_end_date_at_watermark_adds_nothing() {
    let historical = two_country_history();
    let combined = extend(&historical, &ConstModel(70.0), date(2024, 12, 1)).unwrap();
    assert_eq!(combined.len(), historical.len());
}

#[test]
fn test_extend_with_end_date_before_watermark_adds_nothing() {
    let historical = two_country_history();
    let combined = extend(&historical, &ConstModel(70.0), date(2024, 6, 1)).unwrap();
    assert_eq!(combined.len(), historical.len());
}

#[test]
fn test_extend_truncates_end_date_to_month_start() {
    let historical = two_country_history();
    let combined = extend(&historical, &ConstModel(70.0), date(2025, 1, 31)).unwrap();

    // Only 2025-01 is synthesized, for both countries.
    assert_eq!(combined.len(), historical.len() + 2);
}

#[test]
fn test_extend_empty_history_is_data_unavailable() {
    let historical = Dataset::from_observations(Vec::new());
    let result = extend(&historical, &ConstModel(70.0), date(2025, 1, 1));
    assert!(matches!(result, Err(ForecastError::DataUnavailable(_))));
}

#[test]
fn test_prediction_failure_aborts_the_run() {
    let historical = two_country_history();
    let result = extend(&historical, &RejectingModel, date(2025, 1, 1));
    assert!(matches!(result, Err(ForecastError::Prediction(_))));
}

#[test]
fn test_extend_fills_missing_historical_prices_without_touching_known_ones() {
    let mut observations = two_country_history().observations().to_vec();
    observations.push(Observation::new(date(2024, 10, 1), "Germany", "DEU", None));
    let historical = Dataset::from_observations(observations);

    let combined = extend(&historical, &ConstModel(42.0), date(2024, 12, 1)).unwrap();

    let gap = combined
        .iter()
        .find(|o| o.date == date(2024, 10, 1) && o.country == "Germany")
        .unwrap();
    assert_eq!(gap.price, Some(42.0));

    let known = combined
        .iter()
        .find(|o| o.date == date(2024, 11, 1) && o.country == "Germany")
        .unwrap();
    assert_eq!(known.price, Some(60.0));
}
