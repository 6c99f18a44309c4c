//! CLI front-end for the forecast pipeline.
//!
//! Usage: forecast <year> <month> <country>
//!
//! `month` is a number (1-12) or an English month name. The data file and
//! model directory default to `data/electricity.csv` and `models/`, and can
//! be overridden with the `ENERGY_DATA` and `ENERGY_MODEL_DIR` environment
//! variables.

use energy_forecast::dates::month_number;
use energy_forecast::pipeline::{run_with, ForecastRequest, PipelineConfig};
use std::env;
use std::path::PathBuf;
use std::process;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "energy_forecast=info".into()),
        )
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    if args.len() < 3 {
        eprintln!("Usage: forecast <year> <month> <country>");
        process::exit(2);
    }

    let year: i32 = match args[0].parse() {
        Ok(year) => year,
        Err(_) => {
            eprintln!("Invalid year: {}", args[0]);
            process::exit(2);
        }
    };

    let month: u32 = match args[1].parse().ok().or_else(|| month_number(&args[1])) {
        Some(month) => month,
        None => {
            eprintln!("Invalid month: {}", args[1]);
            process::exit(2);
        }
    };

    let country = args[2..].join(" ");

    let mut config = PipelineConfig::default();
    if let Ok(path) = env::var("ENERGY_DATA") {
        config.data_path = PathBuf::from(path);
    }
    if let Ok(path) = env::var("ENERGY_MODEL_DIR") {
        config.model_dir = PathBuf::from(path);
    }

    let request = match ForecastRequest::new(year, month, country) {
        Ok(request) => request,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(2);
        }
    };

    match run_with(&config, &request) {
        Ok(prices) => {
            for price in prices {
                println!("{:.2}", price);
            }
        }
        Err(e) => {
            tracing::error!("Forecast failed: {}", e);
            eprintln!("{}", e);
            process::exit(1);
        }
    }
}
