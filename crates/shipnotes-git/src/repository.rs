//! Git repository operations

use std::path::{Path, PathBuf};

use git2::Repository;
use tracing::{info, instrument};

use shipnotes_core::error::GitError;

/// Result type for git operations
pub type Result<T> = std::result::Result<T, GitError>;

/// Git repository wrapper
pub struct GitRepo {
    pub(crate) repo: Repository,
    path: PathBuf,
}

impl GitRepo {
    /// Open a repository at the given path
    #[instrument(fields(path = %path.display()))]
    pub fn open(path: &Path) -> Result<Self> {
        info!(path = %path.display(), "opening git repository");
        let repo = Repository::open(path).map_err(|e| {
            if e.code() == git2::ErrorCode::NotFound {
                GitError::RepositoryNotFound(path.to_path_buf())
            } else {
                GitError::OpenFailed(e.to_string())
            }
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            repo,
        })
    }

    /// Discover and open a repository by searching parent directories
    #[instrument(fields(start_path = %start_path.display()))]
    pub fn discover(start_path: &Path) -> Result<Self> {
        info!(start_path = %start_path.display(), "discovering git repository");
        let repo = Repository::discover(start_path).map_err(|e| {
            if e.code() == git2::ErrorCode::NotFound {
                GitError::NotARepository(start_path.to_path_buf())
            } else {
                GitError::OpenFailed(e.to_string())
            }
        })?;

        let path = repo.workdir().unwrap_or_else(|| repo.path()).to_path_buf();

        Ok(Self { repo, path })
    }

    /// Get the repository path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Resolve a revision to a commit.
    ///
    /// Tag references win over anything else with the same name, so a branch
    /// called `v1.0.0` does not shadow the `v1.0.0` tag.
    pub fn resolve_commit(&self, rev: &str) -> Result<git2::Commit<'_>> {
        let tag_ref = format!("refs/tags/{}", rev);
        match self.repo.find_reference(&tag_ref) {
            Ok(reference) => Ok(reference.peel_to_commit()?),
            Err(e) if e.code() == git2::ErrorCode::NotFound => {
                let object = self.repo.revparse_single(rev)?;
                Ok(object.peel_to_commit()?)
            }
            Err(e) => Err(GitError::Git2(e)),
        }
    }

    /// Whether `ancestor` is reachable from `descendant` through its parents.
    /// A commit is not its own ancestor.
    pub fn is_ancestor(&self, ancestor: &str, descendant: &str) -> Result<bool> {
        let ancestor = self.resolve_commit(ancestor)?.id();
        let descendant = self.resolve_commit(descendant)?.id();
        Ok(self.repo.graph_descendant_of(descendant, ancestor)?)
    }
}
