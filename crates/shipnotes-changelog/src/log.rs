//! Log provider adapter
//!
//! The changelog only needs two things from version control: the tags in
//! release order and the commits between two revisions. [`LogProvider`]
//! captures that, and [`GitRepo`] is the production implementation.

use shipnotes_core::Result;
use shipnotes_git::GitRepo;
use tracing::{debug, instrument};

use crate::range::RevisionRange;
use crate::types::Commit;

/// Source of tags and commit history
pub trait LogProvider {
    /// Tag names ordered from oldest to newest
    fn list_tags(&self) -> Result<Vec<String>>;

    /// Commits reachable from `to` and not from `from`, most recent first.
    /// `None` for `from` means the repository root.
    fn log(&self, from: Option<&str>, to: &str) -> Result<Vec<Commit>>;

    /// Whether `ancestor` is in the history of `descendant`, excluding
    /// `descendant` itself
    fn is_ancestor(&self, ancestor: &str, descendant: &str) -> Result<bool>;
}

impl LogProvider for GitRepo {
    fn list_tags(&self) -> Result<Vec<String>> {
        let tags = self.tags_in_creation_order()?;
        Ok(tags.into_iter().map(|t| t.name).collect())
    }

    fn log(&self, from: Option<&str>, to: &str) -> Result<Vec<Commit>> {
        let commits = self.commits_between(from, to)?;
        Ok(commits.into_iter().map(Commit::from).collect())
    }

    fn is_ancestor(&self, ancestor: &str, descendant: &str) -> Result<bool> {
        Ok(GitRepo::is_ancestor(self, ancestor, descendant)?)
    }
}

/// Fetch the commits of a revision range, numbering them in log order
#[instrument(skip(provider), fields(previous = ?range.previous, current = %range.current))]
pub fn commits_between<P: LogProvider + ?Sized>(
    provider: &P,
    range: &RevisionRange,
) -> Result<Vec<Commit>> {
    let commits: Vec<Commit> = provider
        .log(range.previous.as_deref(), &range.current)?
        .into_iter()
        .enumerate()
        .map(|(i, c)| c.with_sequence(i))
        .collect();
    debug!(count = commits.len(), "fetched commits");
    Ok(commits)
}

#[cfg(test)]
pub(crate) mod mock {
    use std::cell::Cell;

    use shipnotes_core::error::GitError;

    use super::*;

    /// Linear in-memory history
    #[derive(Default)]
    pub struct MockProvider {
        /// Oldest first: (subject, tag on that commit)
        history: Vec<(String, Option<String>)>,
        pub calls: Cell<usize>,
    }

    impl MockProvider {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn commit(mut self, subject: &str) -> Self {
            self.history.push((subject.to_string(), None));
            self
        }

        /// Tag the latest commit
        pub fn tag(mut self, name: &str) -> Self {
            if let Some(last) = self.history.last_mut() {
                last.1 = Some(name.to_string());
            }
            self
        }

        fn position(&self, tag: &str) -> Result<usize> {
            self.history
                .iter()
                .position(|(_, t)| t.as_deref() == Some(tag))
                .ok_or_else(|| GitError::TagNotFound(tag.to_string()).into())
        }
    }

    impl LogProvider for MockProvider {
        fn list_tags(&self) -> Result<Vec<String>> {
            self.calls.set(self.calls.get() + 1);
            Ok(self.history.iter().filter_map(|(_, t)| t.clone()).collect())
        }

        fn log(&self, from: Option<&str>, to: &str) -> Result<Vec<Commit>> {
            self.calls.set(self.calls.get() + 1);
            let end = self.position(to)?;
            let start = match from {
                Some(from) => self.position(from)? + 1,
                None => 0,
            };
            Ok((start..=end)
                .rev()
                .map(|i| Commit::new(format!("{:07x}", i + 1), self.history[i].0.clone()))
                .collect())
        }

        fn is_ancestor(&self, ancestor: &str, descendant: &str) -> Result<bool> {
            self.calls.set(self.calls.get() + 1);
            Ok(self.position(ancestor)? < self.position(descendant)?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockProvider;
    use super::*;

    #[test]
    fn test_commits_between_numbers_in_log_order() {
        let provider = MockProvider::new()
            .commit("first")
            .tag("v0.0.1")
            .commit("second")
            .commit("third")
            .tag("v0.0.2");

        let range = RevisionRange::new(Some("v0.0.1".to_string()), "v0.0.2");
        let commits = commits_between(&provider, &range).unwrap();

        let subjects: Vec<_> = commits.iter().map(|c| c.subject.as_str()).collect();
        assert_eq!(subjects, vec!["third", "second"]);
        assert_eq!(commits[0].sequence, Some(0));
        assert_eq!(commits[1].sequence, Some(1));
    }

    #[test]
    fn test_errors_pass_through() {
        let provider = MockProvider::new().commit("first").tag("v0.0.1");
        let range = RevisionRange::new(Some("nope".to_string()), "v0.0.1");
        let err = commits_between(&provider, &range).unwrap_err();
        assert_eq!(err.to_string(), "tag not found: nope");
    }
}
