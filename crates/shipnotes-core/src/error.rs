//! Error types for shipnotes

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using ShipnotesError
pub type Result<T> = std::result::Result<T, ShipnotesError>;

/// Main error type for shipnotes operations
#[derive(Debug, Error)]
pub enum ShipnotesError {
    /// Configuration-related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Git-related errors
    #[error(transparent)]
    Git(#[from] GitError),

    /// Changelog-related errors
    #[error(transparent)]
    Changelog(#[from] ChangelogError),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid configuration value
    #[error("Invalid configuration: {field} - {message}")]
    InvalidValue { field: String, message: String },

    /// Sort directive other than "", "asc" or "desc"
    #[error("invalid sort direction: {0}")]
    InvalidSortDirection(String),

    /// Exclude pattern that does not compile
    #[error(transparent)]
    InvalidFilter(#[from] regex::Error),

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

/// Git-related errors
#[derive(Debug, Error)]
pub enum GitError {
    /// Repository not found
    #[error("Git repository not found at {0}")]
    RepositoryNotFound(PathBuf),

    /// Not a git repository
    #[error("Not a git repository: {0}")]
    NotARepository(PathBuf),

    /// Failed to open repository
    #[error("Failed to open repository: {0}")]
    OpenFailed(String),

    /// Repository has no tags at all
    #[error("no tags found")]
    NoTags,

    /// Requested tag is not among the repository tags
    #[error("tag not found: {0}")]
    TagNotFound(String),

    /// Git2 library error
    #[error("Git error: {0}")]
    Git2(#[from] git2::Error),
}

/// Changelog-related errors
#[derive(Debug, Error)]
pub enum ChangelogError {
    /// A notes, header or footer file could not be read
    #[error("failed to read {}: {source}", path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write changelog
    #[error("failed to write changelog to {}: {source}", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Template parse or render failure
    #[error("template error: {0}")]
    Template(String),
}
