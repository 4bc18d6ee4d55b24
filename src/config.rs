// src/config.rs
use crate::error::{PipelineError, Result};
use serde::de::DeserializeOwned;
use std::fs; // For reading the file
use std::path::Path; // For path handling

pub mod loader;
pub mod pipeline;
pub mod server;

pub use loader::CsvLoaderConfig;
pub use pipeline::{load_cleaning_request, CleaningRequest};
pub use server::{load_service_config, ServiceConfig};

/// Reads and parses a YAML file; `what` names the document in error messages.
pub(crate) fn read_yaml<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let content = fs::read_to_string(path).map_err(|e| {
        PipelineError::ConfigError(format!(
            "Failed to read {} file '{}': {}",
            what,
            path.display(),
            e
        ))
    })?;

    serde_yaml::from_str(&content).map_err(|e| {
        PipelineError::ConfigError(format!(
            "Failed to parse {} YAML from '{}': {}",
            what,
            path.display(),
            e
        ))
    })
}
