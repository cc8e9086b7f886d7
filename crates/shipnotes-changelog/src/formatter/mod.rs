//! Changelog entry formatters

mod markdown;

pub use markdown::{MarkdownFormatter, HARD_BREAK};

use crate::types::Commit;

/// Trait for changelog entry formatters
pub trait EntryFormatter: Send + Sync {
    /// Format one commit; `is_last` marks the final entry of the body
    fn format_entry(&self, commit: &Commit, is_last: bool) -> String;

    /// Format a whole body in order
    fn format_entries(&self, commits: &[Commit]) -> Vec<String> {
        let last = commits.len().saturating_sub(1);
        commits
            .iter()
            .enumerate()
            .map(|(i, c)| self.format_entry(c, i == last))
            .collect()
    }
}
