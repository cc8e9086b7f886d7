//! Exit codes for the CLI

use shipnotes_core::ShipnotesError;

use crate::cli::commands::ValidationFailed;

/// General error
pub const ERROR: u8 = 1;

/// Configuration error
pub const CONFIG_ERROR: u8 = 2;

/// Git error
pub const GIT_ERROR: u8 = 3;

/// Changelog generation error
pub const CHANGELOG_ERROR: u8 = 4;

/// Validation found problems
pub const VALIDATION_ERROR: u8 = 5;

/// Map an error to the process exit code
pub fn for_error(err: &anyhow::Error) -> u8 {
    if err.downcast_ref::<ValidationFailed>().is_some() {
        return VALIDATION_ERROR;
    }

    match err.downcast_ref::<ShipnotesError>() {
        Some(ShipnotesError::Config(_)) => CONFIG_ERROR,
        Some(ShipnotesError::Git(_)) => GIT_ERROR,
        Some(ShipnotesError::Changelog(_)) => CHANGELOG_ERROR,
        _ => ERROR,
    }
}
