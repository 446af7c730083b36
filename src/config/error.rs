//! Configuration-specific error types.

use std::path::PathBuf;

/// Errors that can occur while reading or writing `config.yml`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Save was called before a file path was resolved by `load`
    #[error("Configuration file path not set")]
    FilePathNotSet,

    /// No home directory to place the default configuration under
    #[error("Failed to find home directory")]
    HomeDirectoryNotFound,

    /// Failed to read the configuration file
    #[error("Failed to read configuration from {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to write the configuration file
    #[error("Failed to write configuration to {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to create the configuration directory
    #[error("Failed to create configuration directory {path}: {source}")]
    CreateDirectoryFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The file is not a valid seed and log-level document
    #[error("Invalid configuration in {path}: {source}")]
    Malformed {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// Failed to encode the configuration as YAML
    #[error("Failed to encode configuration: {0}")]
    Encode(#[source] serde_yaml::Error),

    /// `log_level` is not one of off, error, warn, info, debug, trace
    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),
}
