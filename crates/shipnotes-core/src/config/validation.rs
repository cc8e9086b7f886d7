//! Configuration validation

use regex::Regex;
use tracing::debug;

use crate::error::{ConfigError, Result};
use crate::types::SortDirection;

use super::types::Config;

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    debug!("validating configuration");
    validate_dist(config)?;
    validate_changelog(config)?;
    debug!("configuration validation passed");
    Ok(())
}

fn validate_dist(config: &Config) -> Result<()> {
    if config.dist.as_os_str().is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "dist".to_string(),
            message: "dist directory cannot be empty".to_string(),
        }
        .into());
    }

    Ok(())
}

fn validate_changelog(config: &Config) -> Result<()> {
    config.changelog.sort.parse::<SortDirection>()?;

    if !config.changelog.filters.exclude.is_empty() {
        debug!(
            count = config.changelog.filters.exclude.len(),
            "validating exclude filters"
        );
    }
    for pattern in &config.changelog.filters.exclude {
        Regex::new(pattern).map_err(ConfigError::InvalidFilter)?;
    }

    Ok(())
}
