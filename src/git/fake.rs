//! In-memory source control used by lifecycle tests
//!
//! A "repository" is any directory holding a `.fake-remotes` file, one line
//! per remote: `<name> <url> [<url>...]`.

use crate::error::{RegistryError, RegistryResult};
use crate::git::{PullOutcome, Remote, Repository, SourceControl};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

const REMOTES_FILE: &str = ".fake-remotes";

#[derive(Debug, Default)]
struct Counters {
    clones: AtomicUsize,
    opens: AtomicUsize,
    remote_reads: AtomicUsize,
    pulls: AtomicUsize,
}

/// Fake client that materialises a fixed set of index files on clone
#[derive(Debug, Clone, Default)]
pub(crate) struct FakeScm {
    files: Vec<(PathBuf, String)>,
    fail_clone: bool,
    pull_error: Option<String>,
    counters: Arc<Counters>,
    last_clone_dest: Arc<Mutex<Option<PathBuf>>>,
}

impl FakeScm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file that every clone will contain
    pub fn with_file(mut self, path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        self.files.push((path.into(), contents.into()));
        self
    }

    pub fn failing_clone(mut self) -> Self {
        self.fail_clone = true;
        self
    }

    pub fn failing_pull(mut self, message: &str) -> Self {
        self.pull_error = Some(message.to_string());
        self
    }

    pub fn clones(&self) -> usize {
        self.counters.clones.load(Ordering::SeqCst)
    }

    pub fn opens(&self) -> usize {
        self.counters.opens.load(Ordering::SeqCst)
    }

    pub fn remote_reads(&self) -> usize {
        self.counters.remote_reads.load(Ordering::SeqCst)
    }

    pub fn pulls(&self) -> usize {
        self.counters.pulls.load(Ordering::SeqCst)
    }

    pub fn last_clone_dest(&self) -> Option<PathBuf> {
        self.last_clone_dest.lock().unwrap().clone()
    }

    /// Write a mirror directly, bypassing clone; URLs are space separated
    pub fn write_mirror(root: &Path, remotes: &[(&str, &str)]) {
        fs::create_dir_all(root).unwrap();
        let contents: String = remotes
            .iter()
            .map(|(name, urls)| format!("{} {}\n", name, urls))
            .collect();
        fs::write(root.join(REMOTES_FILE), contents).unwrap();
    }
}

impl SourceControl for FakeScm {
    fn clone_repo(&self, url: &str, dest: &Path) -> RegistryResult<Box<dyn Repository>> {
        self.counters.clones.fetch_add(1, Ordering::SeqCst);
        *self.last_clone_dest.lock().unwrap() = Some(dest.to_path_buf());

        if self.fail_clone {
            return Err(RegistryError::command_exec(
                format!("git clone {url}"),
                "fatal: repository not found",
            ));
        }

        Self::write_mirror(dest, &[("origin", url)]);
        for (path, contents) in &self.files {
            let path = dest.join(path);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(path, contents).unwrap();
        }

        self.open(dest)
    }

    fn open(&self, path: &Path) -> RegistryResult<Box<dyn Repository>> {
        self.counters.opens.fetch_add(1, Ordering::SeqCst);
        if !path.join(REMOTES_FILE).is_file() {
            return Err(RegistryError::NotARepository(path.to_path_buf()));
        }
        Ok(Box::new(FakeRepository {
            root: path.to_path_buf(),
            pull_error: self.pull_error.clone(),
            counters: Arc::clone(&self.counters),
        }))
    }
}

struct FakeRepository {
    root: PathBuf,
    pull_error: Option<String>,
    counters: Arc<Counters>,
}

impl Repository for FakeRepository {
    fn worktree_root(&self) -> &Path {
        &self.root
    }

    fn remotes(&self) -> RegistryResult<Vec<Remote>> {
        self.counters.remote_reads.fetch_add(1, Ordering::SeqCst);
        let contents = fs::read_to_string(self.root.join(REMOTES_FILE))
            .map_err(|e| RegistryError::io("reading fake remotes", e))?;

        Ok(contents
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(|line| {
                let mut parts = line.split_whitespace();
                Remote {
                    name: parts.next().unwrap_or_default().to_string(),
                    urls: parts.map(str::to_string).collect(),
                }
            })
            .collect())
    }

    fn pull(&self, remote: &str) -> RegistryResult<PullOutcome> {
        self.counters.pulls.fetch_add(1, Ordering::SeqCst);

        if let Some(message) = &self.pull_error {
            return Err(RegistryError::command_exec(
                format!("git pull {remote}"),
                message.clone(),
            ));
        }
        Ok(PullOutcome::AlreadyUpToDate)
    }
}
