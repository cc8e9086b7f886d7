//! shipnotes git - read access to repository history
//!
//! Lists tags in release order and walks commit ranges between revisions.

mod commits;
mod repository;
mod tags;
pub mod types;

pub use repository::{GitRepo, Result};
pub use types::{CommitInfo, TagInfo};
