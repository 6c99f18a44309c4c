//! Offline training entry point.
//!
//! Usage: train [source_csv] [model_dir]
//!
//! Cleans the historical data, fits a fresh model on a reproducible 80/20
//! split, evaluates it on the holdout, and persists the artifact.

use energy_forecast::pipeline::PipelineConfig;
use energy_forecast::training::train;
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

    let defaults = PipelineConfig::default();
    let args: Vec<String> = env::args().skip(1).collect();
    let source = args
        .first()
        .map(PathBuf::from)
        .unwrap_or(defaults.data_path);
    let model_dir = args
        .get(1)
        .map(PathBuf::from)
        .unwrap_or(defaults.model_dir);

    match train(&source, &model_dir) {
        Ok(artifact) => {
            tracing::info!(artifact = %artifact.display(), "model training complete");
            println!("{}", artifact.display());
        }
        Err(e) => {
            tracing::error!("Training failed: {}", e);
            eprintln!("{}", e);
            process::exit(1);
        }
    }
}
