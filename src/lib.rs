//! # Energy Forecast
//!
//! A Rust library for forecasting monthly electricity prices per country by
//! training a tabular regression model on historical data and extrapolating
//! it forward to an arbitrary future month.
//!
//! ## Features
//!
//! - Month-granular date axis with correct year rollover
//! - CSV ingestion of per-country historical price observations
//! - Trainable per-country trend model with a persisted, versioned
//!   winsorize-and-standardize transform shared by training and prediction
//! - Artifact store resolving the latest trained model per run
//! - Forecast extension: synthetic future rows for every known country,
//!   priced by the model without ever revising known history
//! - Country projection into an ordered, rounded price trajectory
//!
//! ## Quick Start
//!
//! ```no_run
//! use energy_forecast::pipeline::{run_with, ForecastRequest, PipelineConfig};
//!
//! # fn main() -> energy_forecast::error::Result<()> {
//! // Forecast Germany's prices through March 2025
//! let config = PipelineConfig::default();
//! let request = ForecastRequest::new(2025, 3, "Germany")?;
//! let prices = run_with(&config, &request)?;
//!
//! for price in prices {
//!     println!("{:.2}", price);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Training is a separate offline step; see [`training::train`].

pub mod artifact;
pub mod data;
pub mod dates;
pub mod error;
pub mod extend;
pub mod metrics;
pub mod models;
pub mod pipeline;
pub mod project;
pub mod training;

// Re-export commonly used types
pub use crate::data::{Dataset, Observation};
pub use crate::error::ForecastError;
pub use crate::models::trend::TrendModel;
pub use crate::models::PriceModel;
pub use crate::pipeline::{ForecastRequest, PipelineConfig};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
