//! Error types for keeplog

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using KeeplogError
pub type Result<T> = std::result::Result<T, KeeplogError>;

/// Main error type for keeplog operations
#[derive(Debug, Error)]
pub enum KeeplogError {
    /// Configuration-related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Changelog-related errors
    #[error(transparent)]
    Changelog(#[from] ChangelogError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found at {0}")]
    NotFound(PathBuf),

    /// Invalid configuration value
    #[error("Invalid configuration: {field} - {message}")]
    InvalidValue { field: String, message: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// IO error
    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),
}

/// Changelog-related errors
#[derive(Debug, Error)]
pub enum ChangelogError {
    /// Release requested on a changelog without an Unreleased section
    #[error("no Unreleased section found in the changelog")]
    UnreleasedNotFound,

    /// No compare URL template given and none could be derived
    #[error("could not infer the compare link")]
    CompareLinkNotInferred,

    /// Tag format without a `{version}` placeholder
    #[error("invalid tag format '{0}': must contain {{version}}")]
    InvalidTagFormat(String),

    /// Requested version does not exist
    #[error("Unknown version: '{0}'")]
    VersionNotFound(String),

    /// Changelog has no version sections at all
    #[error("There are no versions in the changelog yet")]
    NoVersions,

    /// Changelog only has an Unreleased section
    #[error("There are no released versions in the changelog yet")]
    NoReleasedVersions,

    /// Fragment directory missing
    #[error("Fragment directory not found at {0}")]
    FragmentDirNotFound(PathBuf),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
