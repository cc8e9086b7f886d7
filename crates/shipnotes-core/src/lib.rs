//! shipnotes core - shared foundation for release notes generation
//!
//! This crate provides the error taxonomy, configuration loading and
//! validation, and the small enums shared by the git and changelog crates.

pub mod config;
pub mod error;
pub mod types;

pub use error::{ChangelogError, ConfigError, GitError, Result, ShipnotesError};
pub use types::{ProviderTag, SortDirection};
