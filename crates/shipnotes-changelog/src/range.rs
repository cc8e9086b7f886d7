//! Revision range resolution

use serde::{Deserialize, Serialize};
use shipnotes_core::error::GitError;
use shipnotes_core::Result;
use tracing::{debug, info, instrument};

use crate::log::LogProvider;

/// The span of history a release covers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevisionRange {
    /// Previous release tag; `None` for a first release
    pub previous: Option<String>,
    /// Tag of the release being built
    pub current: String,
}

impl RevisionRange {
    /// Create a new range
    pub fn new(previous: Option<String>, current: impl Into<String>) -> Self {
        Self {
            previous,
            current: current.into(),
        }
    }

    /// Whether the range starts at the repository root
    pub fn is_first_release(&self) -> bool {
        self.previous.is_none()
    }
}

/// Works out which tags bound a release
pub struct RangeResolver<'a, P: LogProvider + ?Sized> {
    provider: &'a P,
}

impl<'a, P: LogProvider + ?Sized> RangeResolver<'a, P> {
    /// Create a resolver backed by a log provider
    pub fn new(provider: &'a P) -> Self {
        Self { provider }
    }

    /// Resolve the range for `current`.
    ///
    /// An empty or missing `current` means the most recent tag. A non-empty
    /// `previous_override` is used as-is; otherwise the previous tag is the
    /// latest earlier tag in the history of `current`. Tags on other branches
    /// are skipped, and with no such tag the range starts at the root.
    #[instrument(skip(self))]
    pub fn resolve(
        &self,
        current: Option<&str>,
        previous_override: Option<&str>,
    ) -> Result<RevisionRange> {
        let tags = self.provider.list_tags()?;
        debug!(count = tags.len(), "tags available");

        let current = match current.filter(|c| !c.is_empty()) {
            Some(tag) => tag.to_string(),
            None => tags.last().cloned().ok_or(GitError::NoTags)?,
        };

        if tags.is_empty() {
            return Err(GitError::NoTags.into());
        }

        let position = tags
            .iter()
            .position(|t| *t == current)
            .ok_or_else(|| GitError::TagNotFound(current.clone()))?;

        let previous = match previous_override.filter(|p| !p.is_empty()) {
            Some(tag) => {
                debug!(tag, "using previous tag override");
                Some(tag.to_string())
            }
            None => self.nearest_ancestor(&tags[..position], &current)?,
        };

        info!(previous = ?previous, current = %current, "resolved release range");
        Ok(RevisionRange::new(previous, current))
    }

    fn nearest_ancestor(&self, earlier: &[String], current: &str) -> Result<Option<String>> {
        for tag in earlier.iter().rev() {
            if self.provider.is_ancestor(tag, current)? {
                return Ok(Some(tag.clone()));
            }
            debug!(tag = %tag, current, "skipping tag outside current history");
        }
        Ok(None)
    }
}
