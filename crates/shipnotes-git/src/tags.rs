//! Tag operations

use std::collections::HashMap;

use chrono::{TimeZone, Utc};
use git2::{Oid, Sort};
use tracing::{debug, instrument};

use crate::repository::{GitRepo, Result};
use crate::types::TagInfo;

impl GitRepo {
    /// Get all tags that point (directly or through an annotated tag) at a commit
    #[instrument(skip(self))]
    pub fn tags(&self) -> Result<Vec<TagInfo>> {
        let mut tags = Vec::new();

        self.repo.tag_foreach(|oid, name| {
            let name = String::from_utf8_lossy(name)
                .trim_start_matches("refs/tags/")
                .to_string();

            if let Ok(commit) = self.repo.find_commit(oid) {
                // Lightweight tag
                let timestamp = Utc
                    .timestamp_opt(commit.time().seconds(), 0)
                    .single()
                    .unwrap_or_else(Utc::now);
                tags.push(TagInfo::new(&name, commit.id().to_string()).with_timestamp(timestamp));
            } else if let Ok(tag) = self.repo.find_tag(oid) {
                // Annotated tag; skip those pointing at trees or blobs
                if let Ok(commit) = tag.target().and_then(|t| t.peel_to_commit()) {
                    let mut tag_info = TagInfo::new(&name, commit.id().to_string());
                    if let Some(tagger) = tag.tagger() {
                        let timestamp = Utc
                            .timestamp_opt(tagger.when().seconds(), 0)
                            .single()
                            .unwrap_or_else(Utc::now);
                        tag_info = tag_info.with_timestamp(timestamp);
                    }
                    tags.push(tag_info);
                }
            }

            true
        })?;

        debug!(count = tags.len(), "listed all tags");
        Ok(tags)
    }

    /// Get all tags ordered from oldest to newest.
    ///
    /// Order follows the history of the tagged commits (ancestors first), so
    /// tags created within the same second still come out in release order.
    /// Tags on the same commit are ordered by timestamp, then name.
    #[instrument(skip(self))]
    pub fn tags_in_creation_order(&self) -> Result<Vec<TagInfo>> {
        let tags = self.tags()?;
        if tags.is_empty() {
            return Ok(tags);
        }

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME | Sort::REVERSE)?;

        let mut by_commit: HashMap<Oid, Vec<TagInfo>> = HashMap::new();
        for tag in tags {
            let oid = Oid::from_str(&tag.commit_hash)?;
            revwalk.push(oid)?;
            by_commit.entry(oid).or_default().push(tag);
        }

        let mut ordered = Vec::new();
        for oid in revwalk {
            let oid = oid?;
            if let Some(mut at_commit) = by_commit.remove(&oid) {
                at_commit.sort_by(|a, b| {
                    a.timestamp
                        .cmp(&b.timestamp)
                        .then_with(|| a.name.cmp(&b.name))
                });
                ordered.extend(at_commit);
            }
        }

        debug!(order = ?ordered.iter().map(|t| &t.name).collect::<Vec<_>>(), "ordered tags");
        Ok(ordered)
    }
}

#[cfg(test)]
mod tests {
    use crate::repository::test_support::*;
    use git2::Signature;

    #[test]
    fn test_list_tags() {
        let (temp, repo) = init_repo();
        commit(&repo, "Initial commit");
        tag(&repo, "v1.0.0");

        let git = open(&temp);
        let tags = git.tags().unwrap();
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].name, "v1.0.0");
        assert!(tags[0].timestamp.is_some());
    }

    #[test]
    fn test_no_tags() {
        let (temp, repo) = init_repo();
        commit(&repo, "first");
        let git = open(&temp);
        assert!(git.tags_in_creation_order().unwrap().is_empty());
    }

    #[test]
    fn test_creation_order_follows_history() {
        let (temp, repo) = init_repo();
        // names chosen so lexical order disagrees with history
        commit(&repo, "first");
        tag(&repo, "v0.0.9");
        commit(&repo, "second");
        tag(&repo, "v0.0.10");
        commit(&repo, "third");
        tag(&repo, "v0.0.2");

        let git = open(&temp);
        let names: Vec<String> = git
            .tags_in_creation_order()
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, vec!["v0.0.9", "v0.0.10", "v0.0.2"]);
    }

    #[test]
    fn test_annotated_tag() {
        let (temp, repo) = init_repo();
        commit(&repo, "first");
        let head = repo.head().unwrap().peel_to_commit().unwrap();
        let sig = Signature::now("Test", "test@example.com").unwrap();
        repo.tag("v1.0.0", head.as_object(), &sig, "Release 1.0", false)
            .unwrap();

        let git = open(&temp);
        let tags = git.tags_in_creation_order().unwrap();
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].commit_hash, head.id().to_string());
    }
}
