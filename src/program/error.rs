use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or assembling a program model
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Failed to read program model {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse JSON program model: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Failed to parse YAML program model: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Method declared twice: {0}")]
    DuplicateMethod(String),
}
