//! Discovery, loading and persistence of trained model artifacts

use crate::error::{ForecastError, Result};
use crate::models::trend::TrendModel;
use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};

/// Prefix of artifact subdirectory names.
pub const ARTIFACT_PREFIX: &str = "model-";
/// File holding the serialized model inside an artifact directory.
pub const MODEL_FILE: &str = "model.json";
/// Pointer file naming the most recently trained artifact.
pub const LATEST_POINTER: &str = "latest";

/// Resolve the most recently trained artifact in `directory`.
///
/// Prefers the `latest` pointer written by the Trainer; when the pointer
/// is absent or stale, falls back to scanning artifact subdirectories by
/// modification time, breaking ties deterministically by name.
pub fn latest_artifact(directory: &Path) -> Result<PathBuf> {
    if let Some(path) = read_pointer(directory) {
        tracing::info!(artifact = %path.display(), "resolved artifact from pointer");
        return Ok(path);
    }

    let entries = fs::read_dir(directory).map_err(|e| {
        ForecastError::ArtifactNotFound(format!("{}: {}", directory.display(), e))
    })?;

    let mut artifacts = Vec::new();
    for entry in entries {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().to_string();
        if entry.file_type()?.is_dir() && name.starts_with(ARTIFACT_PREFIX) {
            let modified = entry.metadata()?.modified()?;
            artifacts.push((modified, name, entry.path()));
        }
    }

    tracing::info!(
        directory = %directory.display(),
        count = artifacts.len(),
        "scanned model artifacts"
    );

    artifacts
        .into_iter()
        .max_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)))
        .map(|(_, _, path)| path)
        .ok_or_else(|| {
            ForecastError::ArtifactNotFound(format!(
                "no '{}*' artifacts in {}",
                ARTIFACT_PREFIX,
                directory.display()
            ))
        })
}

fn read_pointer(directory: &Path) -> Option<PathBuf> {
    let pointer = directory.join(LATEST_POINTER);
    let name = fs::read_to_string(pointer).ok()?;
    let candidate = directory.join(name.trim());
    if candidate.is_dir() {
        Some(candidate)
    } else {
        tracing::warn!(
            candidate = %candidate.display(),
            "latest pointer names a missing artifact, falling back to scan"
        );
        None
    }
}

/// Deserialize the artifact at `path` into a model handle.
pub fn load_model(path: &Path) -> Result<TrendModel> {
    let model_file = path.join(MODEL_FILE);
    tracing::info!(artifact = %model_file.display(), "loading model");

    let contents = fs::read_to_string(&model_file).map_err(|e| {
        ForecastError::ArtifactCorrupt(format!("{}: {}", model_file.display(), e))
    })?;
    serde_json::from_str(&contents).map_err(|e| {
        ForecastError::ArtifactCorrupt(format!("{}: {}", model_file.display(), e))
    })
}

/// Persist a trained model as a new artifact directory and atomically
/// repoint `latest` at it. Returns the artifact path.
pub fn save_model(model: &TrendModel, directory: &Path) -> Result<PathBuf> {
    fs::create_dir_all(directory)?;

    let name = format!("{}{}", ARTIFACT_PREFIX, Utc::now().format("%Y%m%d-%H%M%S-%f"));
    let path = directory.join(&name);
    fs::create_dir(&path)?;

    let contents = serde_json::to_string_pretty(model)
        .map_err(|e| ForecastError::ArtifactCorrupt(e.to_string()))?;
    fs::write(path.join(MODEL_FILE), contents)?;

    // The artifact is complete before it becomes visible through the pointer.
    let staged = directory.join(".latest.tmp");
    fs::write(&staged, &name)?;
    fs::rename(&staged, directory.join(LATEST_POINTER))?;

    tracing::info!(artifact = %path.display(), "saved model artifact");
    Ok(path)
}
