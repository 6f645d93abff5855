//! Source control abstraction
//!
//! The registry mirror is a git working tree. This module provides a trait
//! for the handful of operations the cache lifecycle needs, so the lifecycle
//! can be exercised against an in-memory fake:
//! - `GitCli`: runs the `git` executable

pub mod cli;
#[cfg(test)]
pub(crate) mod fake;

pub use cli::GitCli;

use crate::error::RegistryResult;
use std::path::Path;

/// A configured remote of a repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Remote {
    pub name: String,
    pub urls: Vec<String>,
}

/// Result of a successful pull
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PullOutcome {
    /// New commits were merged
    Updated,
    /// Nothing to fetch
    AlreadyUpToDate,
}

/// Abstract source control client
pub trait SourceControl: Send + Sync {
    /// Clone `url` into `dest`, which must not exist yet
    fn clone_repo(&self, url: &str, dest: &Path) -> RegistryResult<Box<dyn Repository>>;

    /// Open the repository whose working tree root is `path`
    fn open(&self, path: &Path) -> RegistryResult<Box<dyn Repository>>;
}

/// An opened repository
pub trait Repository {
    /// Root of the working tree
    fn worktree_root(&self) -> &Path;

    /// All configured remotes
    fn remotes(&self) -> RegistryResult<Vec<Remote>>;

    /// Pull the current branch from the named remote
    fn pull(&self, remote: &str) -> RegistryResult<PullOutcome>;
}
