//! Markdown entry formatter

use shipnotes_core::ProviderTag;

use super::EntryFormatter;
use crate::types::Commit;

/// Trailing spaces that make markdown render a hard line break
pub const HARD_BREAK: &str = "   ";

/// Formats entries as `<hash> <subject>` lines
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownFormatter {
    /// Pad every line but the last with [`HARD_BREAK`]
    pub hard_line_breaks: bool,
}

impl MarkdownFormatter {
    /// Create a formatter without hard line breaks
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the formatter matching a provider's markdown flavor
    pub fn for_provider(provider: ProviderTag) -> Self {
        Self {
            hard_line_breaks: provider.requires_hard_breaks(),
        }
    }
}

impl EntryFormatter for MarkdownFormatter {
    fn format_entry(&self, commit: &Commit, is_last: bool) -> String {
        let mut line = format!("{} {}", commit.hash, commit.subject);
        if self.hard_line_breaks && !is_last {
            line.push_str(HARD_BREAK);
        }
        line
    }
}
