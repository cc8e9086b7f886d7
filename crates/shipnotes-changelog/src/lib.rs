//! Shipnotes Changelog - Release notes generation from git history
//!
//! This crate resolves the revision range for a release, lists its commits,
//! filters and orders them, formats entries for the target git host and
//! renders the final `CHANGELOG.md`.

pub mod filter;
pub mod formatter;
pub mod log;
pub mod pipeline;
pub mod range;
pub mod sort;
pub mod template;
pub mod types;

pub use filter::FilterSet;
pub use formatter::{EntryFormatter, MarkdownFormatter};
pub use log::{commits_between, LogProvider};
pub use pipeline::{ChangelogOptions, ChangelogOutcome, ChangelogPipeline, ReleaseNotes, SkipReason};
pub use range::{RangeResolver, RevisionRange};
pub use sort::sort_commits;
pub use template::{ReleaseContext, TemplateRenderer, TeraRenderer};
pub use types::{ChangelogDocument, Commit};
