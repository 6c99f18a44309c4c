//! Price models for the forecast pipeline

use crate::data::Observation;
use crate::error::Result;

/// Common interface for trained price models.
///
/// The pipeline never depends on a concrete regressor; any collaborator
/// that can price one observation's non-price fields fits here, which
/// keeps the extender testable with a substitute model.
pub trait PriceModel {
    /// Estimate a price for the observation's non-price fields
    fn predict(&self, observation: &Observation) -> Result<f64>;

    /// Get the model's name
    fn name(&self) -> &str;
}

pub mod scaler;
pub mod trend;
