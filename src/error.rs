use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LogweaveError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid glob pattern: {pattern}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON serialization error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    #[error("Unknown module: {0}")]
    UnknownModule(String),

    #[error("Unknown template: {0}")]
    UnknownTemplate(String),

    #[error("Output already exists (use --force to overwrite): {path}")]
    Conflict { path: PathBuf },

    #[error("Render error: {0}")]
    Render(String),

    #[error("Failed to promote output to {path}")]
    Promote {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Run cancelled")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, LogweaveError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
