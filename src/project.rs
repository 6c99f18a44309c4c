//! Projection of a combined dataset onto one country's price trajectory

use crate::data::Dataset;

/// Round a price to 2 decimal digits for presentation.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Ordered, rounded prices for one country.
///
/// Matches the country identifier exactly (case-sensitive) and sorts by
/// date rather than trusting the dataset's concatenation order. An
/// unknown country yields an empty sequence, not an error.
pub fn prices_for_country(dataset: &Dataset, country: &str) -> Vec<f64> {
    let mut rows: Vec<_> = dataset
        .iter()
        .filter(|obs| obs.country == country)
        .collect();
    rows.sort_by_key(|obs| obs.date);

    rows.iter()
        .filter_map(|obs| obs.price)
        .map(round2)
        .collect()
}
