//! Git types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Information about a git commit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitInfo {
    /// Commit hash (full)
    pub hash: String,
    /// Short hash (first 7 characters)
    pub short_hash: String,
    /// Commit message (first line)
    pub message: String,
    /// Author name
    pub author: String,
    /// Commit timestamp
    pub timestamp: DateTime<Utc>,
}

impl CommitInfo {
    /// Create a new CommitInfo
    pub fn new(
        hash: impl Into<String>,
        message: impl Into<String>,
        author: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let hash = hash.into();
        let short_hash = hash.chars().take(7).collect();

        Self {
            hash,
            short_hash,
            message: message.into(),
            author: author.into(),
            timestamp,
        }
    }
}

/// Information about a git tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagInfo {
    /// Tag name, without the `refs/tags/` prefix
    pub name: String,
    /// Commit hash the tag points to
    pub commit_hash: String,
    /// Tagger time for annotated tags, commit time for lightweight ones
    pub timestamp: Option<DateTime<Utc>>,
}

impl TagInfo {
    /// Create a new TagInfo
    pub fn new(name: impl Into<String>, commit_hash: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            commit_hash: commit_hash.into(),
            timestamp: None,
        }
    }

    /// Set the timestamp
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_info() {
        let commit = CommitInfo::new("abc1234567890", "feat: add feature", "Author", Utc::now());
        assert_eq!(commit.short_hash, "abc1234");
        assert_eq!(commit.message, "feat: add feature");
    }

    #[test]
    fn test_short_hash_of_short_input() {
        let commit = CommitInfo::new("abc", "x", "Author", Utc::now());
        assert_eq!(commit.short_hash, "abc");
    }
}
