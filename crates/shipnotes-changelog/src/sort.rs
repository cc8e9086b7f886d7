//! Entry ordering

use std::cmp::Reverse;

use shipnotes_core::SortDirection;

use crate::types::Commit;

/// Order commits by log position.
///
/// Input is taken to be in provider order, most recent first. Commits that
/// carry no log position are numbered by their place in the input, so a
/// plain list is treated as native order. `Ascending` puts the oldest commit
/// first and `Descending` the newest; both are stable. `Unspecified` leaves
/// the input untouched.
pub fn sort_commits(direction: SortDirection, mut commits: Vec<Commit>) -> Vec<Commit> {
    if direction == SortDirection::Unspecified {
        return commits;
    }

    for (i, commit) in commits.iter_mut().enumerate() {
        commit.sequence.get_or_insert(i);
    }

    match direction {
        SortDirection::Ascending => commits.sort_by_key(|c| Reverse(c.sequence)),
        _ => commits.sort_by_key(|c| c.sequence),
    }
    commits
}
