//! Commit history operations

use chrono::{TimeZone, Utc};
use git2::Sort;
use tracing::{debug, instrument};

use crate::repository::{GitRepo, Result};
use crate::types::CommitInfo;

impl GitRepo {
    /// Commits reachable from `to` but not from `from`, most recent first.
    ///
    /// Without `from` the walk runs to the root of the repository.
    #[instrument(skip(self))]
    pub fn commits_between(&self, from: Option<&str>, to: &str) -> Result<Vec<CommitInfo>> {
        let to_commit = self.resolve_commit(to)?;

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        revwalk.push(to_commit.id())?;

        if let Some(from) = from {
            let from_commit = self.resolve_commit(from)?;
            revwalk.hide(from_commit.id())?;
        }

        let mut commits = Vec::new();

        for oid in revwalk {
            let oid = oid?;
            let commit = self.repo.find_commit(oid)?;
            commits.push(commit_to_info(&commit));
        }

        debug!(count = commits.len(), "collected commits");
        Ok(commits)
    }
}

/// Convert a git2 Commit to CommitInfo
fn commit_to_info(commit: &git2::Commit<'_>) -> CommitInfo {
    let hash = commit.id().to_string();
    let author = commit.author();

    let message = commit.summary().unwrap_or("(no message)").to_string();

    let timestamp = Utc
        .timestamp_opt(commit.time().seconds(), 0)
        .single()
        .unwrap_or_else(Utc::now);

    CommitInfo::new(hash, message, author.name().unwrap_or("Unknown"), timestamp)
}

#[cfg(test)]
mod tests {
    use crate::repository::test_support::*;
    use shipnotes_core::error::GitError;

    fn messages(commits: &[crate::CommitInfo]) -> Vec<&str> {
        commits.iter().map(|c| c.message.as_str()).collect()
    }

    #[test]
    fn test_commits_between_tags() {
        let (temp, repo) = init_repo();
        commit(&repo, "first");
        tag(&repo, "v0.0.1");
        commit(&repo, "second");
        commit(&repo, "third");
        tag(&repo, "v0.0.2");

        let git = open(&temp);
        let commits = git.commits_between(Some("v0.0.1"), "v0.0.2").unwrap();
        assert_eq!(messages(&commits), vec!["third", "second"]);
    }

    #[test]
    fn test_commits_from_root() {
        let (temp, repo) = init_repo();
        commit(&repo, "initial commit");
        commit(&repo, "another one");
        tag(&repo, "v0.0.1");

        let git = open(&temp);
        let commits = git.commits_between(None, "v0.0.1").unwrap();
        assert_eq!(messages(&commits), vec!["another one", "initial commit"]);
        assert_eq!(commits[0].short_hash.len(), 7);
    }

    #[test]
    fn test_commits_stop_at_target_tag() {
        let (temp, repo) = init_repo();
        commit(&repo, "first");
        tag(&repo, "v0.0.1");
        commit(&repo, "unreleased");

        let git = open(&temp);
        let commits = git.commits_between(None, "v0.0.1").unwrap();
        assert_eq!(messages(&commits), vec!["first"]);
    }

    #[test]
    fn test_unknown_revision_is_error() {
        let (temp, repo) = init_repo();
        commit(&repo, "first");
        tag(&repo, "v0.0.1");

        let git = open(&temp);
        let result = git.commits_between(Some("v9.9.9"), "v0.0.1");
        assert!(matches!(result, Err(GitError::Git2(_))));
    }
}
