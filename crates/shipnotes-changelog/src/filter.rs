//! Commit subject filtering

use regex::Regex;
use shipnotes_core::error::ConfigError;
use shipnotes_core::Result;
use tracing::debug;

use crate::types::Commit;

/// Compiled exclusion patterns
#[derive(Debug, Clone, Default)]
pub struct FilterSet {
    patterns: Vec<Regex>,
}

impl FilterSet {
    /// Compile every pattern up front; the first invalid one is an error
    pub fn new<I, S>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|p| Regex::new(p.as_ref()).map_err(ConfigError::InvalidFilter))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self { patterns })
    }

    /// Whether a subject matches any pattern (unanchored search)
    pub fn is_excluded(&self, subject: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(subject))
    }

    /// Drop excluded commits, keeping the order of the rest
    pub fn apply(&self, commits: Vec<Commit>) -> Vec<Commit> {
        if self.patterns.is_empty() {
            return commits;
        }

        let before = commits.len();
        let kept: Vec<Commit> = commits
            .into_iter()
            .filter(|c| !self.is_excluded(&c.subject))
            .collect();
        debug!(before, after = kept.len(), "filtered commits");
        kept
    }

    /// Number of patterns
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether there are no patterns
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
