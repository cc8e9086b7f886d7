//! Changelog pipeline
//!
//! Ties the pieces together for one release: skip checks, the explicit
//! release-notes override, range resolution, fetch, filter, sort, format,
//! header/footer rendering and finally writing `CHANGELOG.md`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use shipnotes_core::config::{Config, CHANGELOG_FILE_NAME};
use shipnotes_core::error::ChangelogError;
use shipnotes_core::{Result, SortDirection};
use tracing::{debug, info, instrument};

use crate::filter::FilterSet;
use crate::formatter::{EntryFormatter, MarkdownFormatter};
use crate::log::{commits_between, LogProvider};
use crate::range::{RangeResolver, RevisionRange};
use crate::sort::sort_commits;
use crate::template::{ReleaseContext, TemplateRenderer, TeraRenderer};
use crate::types::ChangelogDocument;

/// Per-run inputs that do not come from the configuration file
#[derive(Debug, Clone, Default)]
pub struct ChangelogOptions {
    /// Tag being released; the latest tag when absent. A release-notes
    /// file is rendered without reading git, so there `tag` is empty
    /// unless this is set.
    pub current_tag: Option<String>,
    /// Previous tag override
    pub previous_tag: Option<String>,
    /// File whose rendered content replaces the generated notes
    pub release_notes: Option<PathBuf>,
    /// Template prepended to the generated notes
    pub release_header: Option<PathBuf>,
    /// Template appended to the generated notes
    pub release_footer: Option<PathBuf>,
    /// Snapshot builds never get a changelog
    pub snapshot: bool,
    /// Environment exposed to templates
    pub env: BTreeMap<String, String>,
}

impl ChangelogOptions {
    /// Create empty options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the current tag
    pub fn with_current_tag(mut self, tag: impl Into<String>) -> Self {
        self.current_tag = Some(tag.into());
        self
    }

    /// Set the previous tag override
    pub fn with_previous_tag(mut self, tag: impl Into<String>) -> Self {
        self.previous_tag = Some(tag.into());
        self
    }

    /// Set the release notes file
    pub fn with_release_notes(mut self, path: impl Into<PathBuf>) -> Self {
        self.release_notes = Some(path.into());
        self
    }

    /// Set the header file
    pub fn with_release_header(mut self, path: impl Into<PathBuf>) -> Self {
        self.release_header = Some(path.into());
        self
    }

    /// Set the footer file
    pub fn with_release_footer(mut self, path: impl Into<PathBuf>) -> Self {
        self.release_footer = Some(path.into());
        self
    }

    /// Mark the run as a snapshot
    pub fn with_snapshot(mut self, snapshot: bool) -> Self {
        self.snapshot = snapshot;
        self
    }

    /// Expose environment variables to templates
    pub fn with_env<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.env
            .extend(vars.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }
}

/// Why a run produced no changelog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SkipReason {
    /// `changelog.skip` is set
    Disabled,
    /// Snapshot build
    Snapshot,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Disabled => write!(f, "changelog should not be built"),
            Self::Snapshot => write!(f, "not available for snapshots"),
        }
    }
}

/// Release notes produced by a run
#[derive(Debug, Clone, Serialize)]
pub struct ReleaseNotes {
    /// Final text
    pub content: String,
    /// Where `CHANGELOG.md` was written; `None` when notes came from a file
    pub path: Option<PathBuf>,
    /// Range the notes cover; `None` when notes came from a file
    pub range: Option<RevisionRange>,
}

/// Result of a pipeline run
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ChangelogOutcome {
    /// Notes were produced
    Generated(ReleaseNotes),
    /// Generation was skipped on purpose
    Skipped {
        reason: SkipReason,
        /// Rendered release-notes file, when one was supplied
        release_notes: Option<String>,
    },
}

impl ChangelogOutcome {
    /// Whether the run was skipped
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped { .. })
    }

    /// Release notes text, if any
    pub fn release_notes(&self) -> Option<&str> {
        match self {
            Self::Generated(notes) => Some(&notes.content),
            Self::Skipped { release_notes, .. } => release_notes.as_deref(),
        }
    }
}

/// Builds release notes for one release
pub struct ChangelogPipeline<'a> {
    config: &'a Config,
    provider: &'a dyn LogProvider,
    renderer: Box<dyn TemplateRenderer>,
}

impl<'a> ChangelogPipeline<'a> {
    /// Create a pipeline with the Tera renderer
    pub fn new(config: &'a Config, provider: &'a dyn LogProvider) -> Self {
        Self {
            config,
            provider,
            renderer: Box::new(TeraRenderer::new()),
        }
    }

    /// Use a custom template renderer
    pub fn with_renderer<R: TemplateRenderer + 'static>(mut self, renderer: R) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    /// Run the pipeline
    #[instrument(skip(self, options), fields(current_tag = ?options.current_tag, snapshot = options.snapshot))]
    pub fn run(&self, options: &ChangelogOptions) -> Result<ChangelogOutcome> {
        if let Some(reason) = self.skip_reason(options) {
            info!(%reason, "skipping changelog");
            let release_notes = options
                .release_notes
                .as_deref()
                .map(|path| self.render_release_notes(path, options))
                .transpose()?;
            return Ok(ChangelogOutcome::Skipped {
                reason,
                release_notes,
            });
        }

        if let Some(path) = &options.release_notes {
            info!(path = %path.display(), "using release notes from file");
            let content = self.render_release_notes(path, options)?;
            return Ok(ChangelogOutcome::Generated(ReleaseNotes {
                content,
                path: None,
                range: None,
            }));
        }

        let direction: SortDirection = self.config.changelog.sort.parse()?;
        let filters = FilterSet::new(&self.config.changelog.filters.exclude)?;
        let header = options.release_header.as_deref().map(read_file).transpose()?;
        let footer = options.release_footer.as_deref().map(read_file).transpose()?;

        let range = RangeResolver::new(self.provider).resolve(
            options.current_tag.as_deref(),
            options.previous_tag.as_deref(),
        )?;
        let entries = self.build_entries(&range, direction, &filters)?;

        let context = self
            .release_context(&range.current, options)
            .with_previous_tag(range.previous.as_deref());
        let header = header
            .map(|text| self.renderer.render(&text, &context))
            .transpose()?;
        let footer = footer
            .map(|text| self.renderer.render(&text, &context))
            .transpose()?;

        let content = ChangelogDocument::new(entries)
            .with_header(header)
            .with_footer(footer)
            .render();
        let path = self.write(&content)?;

        Ok(ChangelogOutcome::Generated(ReleaseNotes {
            content,
            path: Some(path),
            range: Some(range),
        }))
    }

    /// Fetch, filter, sort and format the entries of a range
    #[instrument(skip(self, filters), fields(exclude_count = filters.len()))]
    pub fn build_entries(
        &self,
        range: &RevisionRange,
        direction: SortDirection,
        filters: &FilterSet,
    ) -> Result<Vec<String>> {
        let commits = commits_between(self.provider, range)?;
        let commits = filters.apply(commits);
        let commits = sort_commits(direction, commits);

        let formatter = MarkdownFormatter::for_provider(self.config.provider);
        let entries = formatter.format_entries(&commits);
        debug!(count = entries.len(), provider = %self.config.provider, "formatted entries");
        Ok(entries)
    }

    fn skip_reason(&self, options: &ChangelogOptions) -> Option<SkipReason> {
        if self.config.changelog.skip {
            Some(SkipReason::Disabled)
        } else if options.snapshot {
            Some(SkipReason::Snapshot)
        } else {
            None
        }
    }

    fn release_context(&self, tag: &str, options: &ChangelogOptions) -> ReleaseContext {
        ReleaseContext::new(tag)
            .with_project_name(self.config.name.clone().unwrap_or_default())
            .with_env(options.env.clone())
    }

    /// Render a release-notes file against the tags given in `options` only
    fn render_release_notes(&self, path: &Path, options: &ChangelogOptions) -> Result<String> {
        let text = read_file(path)?;
        let context = self
            .release_context(options.current_tag.as_deref().unwrap_or_default(), options)
            .with_previous_tag(options.previous_tag.as_deref());
        self.renderer.render(&text, &context)
    }

    fn write(&self, content: &str) -> Result<PathBuf> {
        let dist = &self.config.dist;
        std::fs::create_dir_all(dist).map_err(|source| ChangelogError::WriteFailed {
            path: dist.clone(),
            source,
        })?;

        let path = dist.join(CHANGELOG_FILE_NAME);
        info!(path = %path.display(), "writing changelog");
        std::fs::write(&path, content).map_err(|source| ChangelogError::WriteFailed {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}

fn read_file(path: &Path) -> Result<String> {
    debug!(path = %path.display(), "reading template file");
    let text = std::fs::read_to_string(path).map_err(|source| ChangelogError::ReadFailed {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(text)
}


#[cfg(test)]
mod git_tests {
    use super::*;
    use git2::{Repository, Signature};
    use shipnotes_git::GitRepo;
    use tempfile::TempDir;

    fn commit(repo: &Repository, message: &str) -> git2::Oid {
        let sig = Signature::now("Test", "test@example.com").unwrap();
        let tree_id = repo.index().unwrap().write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();
        repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .unwrap()
    }

    fn tag(repo: &Repository, name: &str) {
        let head = repo.head().unwrap().peel_to_commit().unwrap();
        repo.tag_lightweight(name, head.as_object(), false).unwrap();
    }

    fn generate(temp: &TempDir, options: &ChangelogOptions) -> ReleaseNotes {
        let config = Config {
            dist: temp.path().join("dist"),
            ..Config::default()
        };
        let repo = GitRepo::open(temp.path()).unwrap();
        match ChangelogPipeline::new(&config, &repo).run(options).unwrap() {
            ChangelogOutcome::Generated(notes) => notes,
            other => panic!("expected generated notes, got {:?}", other),
        }
    }

    #[test]
    fn test_changelog_from_repository() {
        let temp = TempDir::new().unwrap();
        let repo = Repository::init(temp.path()).unwrap();
        commit(&repo, "first");
        tag(&repo, "v0.0.1");
        commit(&repo, "added feature 1");
        let head = commit(&repo, "fixed bug 2");
        tag(&repo, "v0.0.2");

        let notes = generate(&temp, &ChangelogOptions::new());
        let short = &head.to_string()[..7];
        assert!(notes.content.contains(&format!("{} fixed bug 2", short)));
        assert!(notes.content.contains("added feature 1"));
        assert!(!notes.content.contains("first"));
        assert!(temp.path().join("dist").join(CHANGELOG_FILE_NAME).exists());
    }

    #[test]
    fn test_branch_named_like_tag() {
        let temp = TempDir::new().unwrap();
        let repo = Repository::init(temp.path()).unwrap();
        let first = commit(&repo, "first");
        tag(&repo, "v0.0.1");
        commit(&repo, "second");
        commit(&repo, "third");
        tag(&repo, "v0.0.2");
        repo.branch("v0.0.2", &repo.find_commit(first).unwrap(), false)
            .unwrap();

        let notes = generate(&temp, &ChangelogOptions::new().with_current_tag("v0.0.2"));
        assert!(notes.content.contains("second"));
        assert!(notes.content.contains("third"));
        assert!(!notes.content.contains("first"));
    }

    #[test]
    fn test_previous_tag_override_from_repository() {
        let temp = TempDir::new().unwrap();
        let repo = Repository::init(temp.path()).unwrap();
        commit(&repo, "first");
        tag(&repo, "v0.0.1");
        commit(&repo, "second");
        tag(&repo, "v0.0.2");
        commit(&repo, "third");
        tag(&repo, "v0.0.3");

        let notes = generate(
            &temp,
            &ChangelogOptions::new()
                .with_current_tag("v0.0.3")
                .with_previous_tag("v0.0.1"),
        );
        assert!(notes.content.contains("second"));
        assert!(notes.content.contains("third"));
        assert!(!notes.content.contains("first"));
    }

    #[test]
    fn test_maintenance_release_skips_main_line_tags() {
        let temp = TempDir::new().unwrap();
        let repo = Repository::init(temp.path()).unwrap();
        let base = commit(&repo, "first");
        tag(&repo, "v1.0.0");
        commit(&repo, "feature on main");
        tag(&repo, "v1.1.0");

        let sig = Signature::now("Test", "test@example.com").unwrap();
        let base = repo.find_commit(base).unwrap();
        let fix = repo
            .commit(None, &sig, &sig, "backported fix", &base.tree().unwrap(), &[&base])
            .unwrap();
        repo.tag_lightweight("v1.0.1", &repo.find_object(fix, None).unwrap(), false)
            .unwrap();

        let notes = generate(&temp, &ChangelogOptions::new().with_current_tag("v1.0.1"));
        assert!(notes.content.contains("backported fix"));
        assert!(!notes.content.contains("feature on main"));
        assert!(!notes.content.contains("first"));
        assert_eq!(
            notes.range,
            Some(RevisionRange::new(Some("v1.0.0".to_string()), "v1.0.1"))
        );
    }
}
