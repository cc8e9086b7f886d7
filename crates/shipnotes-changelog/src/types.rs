//! Changelog types

use serde::{Deserialize, Serialize};
use shipnotes_git::CommitInfo;

/// Section marker that opens the generated body
pub const CHANGELOG_MARKER: &str = "## Changelog";

/// A commit as it appears in the changelog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// Short commit hash
    pub hash: String,
    /// First line of the commit message
    pub subject: String,
    /// Position in the provider's log, 0 being the most recent commit.
    /// `None` until the commit has been read from a log.
    pub sequence: Option<usize>,
}

impl Commit {
    /// Create a new commit
    pub fn new(hash: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            hash: hash.into(),
            subject: subject.into(),
            sequence: None,
        }
    }

    /// Set the log position
    pub fn with_sequence(mut self, sequence: usize) -> Self {
        self.sequence = Some(sequence);
        self
    }
}

impl From<CommitInfo> for Commit {
    fn from(info: CommitInfo) -> Self {
        Self::new(info.short_hash, info.message)
    }
}

/// Assembled release notes: optional header, the changelog section, optional footer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangelogDocument {
    /// Rendered header text
    pub header: Option<String>,
    /// Formatted entry lines
    pub entries: Vec<String>,
    /// Rendered footer text
    pub footer: Option<String>,
}

impl ChangelogDocument {
    /// Create a document from formatted entries
    pub fn new(entries: Vec<String>) -> Self {
        Self {
            header: None,
            entries,
            footer: None,
        }
    }

    /// Set the header
    pub fn with_header(mut self, header: Option<String>) -> Self {
        self.header = header;
        self
    }

    /// Set the footer
    pub fn with_footer(mut self, footer: Option<String>) -> Self {
        self.footer = footer;
        self
    }

    /// Render the document, separating parts with a blank line
    pub fn render(&self) -> String {
        let mut parts = Vec::with_capacity(4);
        if let Some(header) = &self.header {
            parts.push(header.clone());
        }
        parts.push(CHANGELOG_MARKER.to_string());
        parts.push(self.entries.join("\n"));
        if let Some(footer) = &self.footer {
            parts.push(footer.clone());
        }
        parts.join("\n\n")
    }
}
