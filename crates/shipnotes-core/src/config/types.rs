//! Configuration types

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::types::ProviderTag;

/// Main configuration for shipnotes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Project name, exposed to templates as `project_name`
    pub name: Option<String>,

    /// Directory the generated CHANGELOG.md is written to
    pub dist: PathBuf,

    /// Hosting provider the notes are rendered for
    pub provider: ProviderTag,

    /// Changelog configuration
    pub changelog: ChangelogConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            name: None,
            dist: PathBuf::from("dist"),
            provider: ProviderTag::default(),
            changelog: ChangelogConfig::default(),
        }
    }
}

/// Changelog configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangelogConfig {
    /// Skip changelog generation entirely
    pub skip: bool,

    /// Entry ordering: "", "asc" or "desc"
    pub sort: String,

    /// Commit filters
    pub filters: FiltersConfig,
}

/// Commit subject filters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FiltersConfig {
    /// Regular expressions; matching commit subjects are left out
    pub exclude: Vec<String>,
}
