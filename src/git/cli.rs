//! Git client backed by the `git` executable

use crate::error::{RegistryError, RegistryResult};
use crate::git::{PullOutcome, Remote, Repository, SourceControl};
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tracing::{debug, info};

/// Source control client that shells out to `git`
#[derive(Debug, Clone)]
pub struct GitCli {
    program: String,
}

impl GitCli {
    /// Create a client using `git` from `PATH`
    pub fn new() -> Self {
        Self {
            program: "git".to_string(),
        }
    }

    /// Create a client using a specific executable
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Execute a git command and return the output
    fn exec(&self, dir: Option<&Path>, args: &[&str]) -> RegistryResult<Output> {
        debug!("Executing: {} {:?}", self.program, args);

        let mut command = Command::new(&self.program);
        if let Some(dir) = dir {
            command.arg("-C").arg(dir);
        }

        command
            .args(args)
            // Output is matched against English messages
            .env("LC_ALL", "C")
            .env("GIT_TERMINAL_PROMPT", "0")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| {
                RegistryError::command_failed(format!("{} {}", self.program, args.join(" ")), e)
            })
    }

    /// Execute a git command that must succeed, returning stdout
    fn exec_ok(&self, dir: Option<&Path>, args: &[&str]) -> RegistryResult<String> {
        let output = self.exec(dir, args)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(RegistryError::command_exec(
                format!("{} {}", self.program, args.join(" ")),
                stderr.trim(),
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceControl for GitCli {
    fn clone_repo(&self, url: &str, dest: &Path) -> RegistryResult<Box<dyn Repository>> {
        info!("Cloning {} into {}", url, dest.display());

        let dest_str = dest.to_string_lossy().into_owned();
        self.exec_ok(None, &["clone", "--quiet", url, dest_str.as_str()])?;

        self.open(dest)
    }

    fn open(&self, path: &Path) -> RegistryResult<Box<dyn Repository>> {
        if !path.is_dir() {
            return Err(RegistryError::NotARepository(path.to_path_buf()));
        }

        let toplevel = self
            .exec_ok(Some(path), &["rev-parse", "--show-toplevel"])
            .map_err(|_| RegistryError::NotARepository(path.to_path_buf()))?;

        // A directory nested inside some other worktree is not a mirror
        let canonical = path
            .canonicalize()
            .map_err(|e| RegistryError::io(format!("resolving {}", path.display()), e))?;
        let toplevel = PathBuf::from(toplevel.trim());
        if toplevel.canonicalize().ok().as_deref() != Some(canonical.as_path()) {
            return Err(RegistryError::NotARepository(path.to_path_buf()));
        }

        Ok(Box::new(GitRepository {
            git: self.clone(),
            root: canonical,
        }))
    }
}

/// A working tree opened through `GitCli`
#[derive(Debug)]
struct GitRepository {
    git: GitCli,
    root: PathBuf,
}

impl Repository for GitRepository {
    fn worktree_root(&self) -> &Path {
        &self.root
    }

    fn remotes(&self) -> RegistryResult<Vec<Remote>> {
        let names = self.git.exec_ok(Some(self.root.as_path()), &["remote"])?;

        let mut remotes = Vec::new();
        for name in names.lines().map(str::trim).filter(|l| !l.is_empty()) {
            remotes.push(Remote {
                name: name.to_string(),
                urls: self.configured_urls(name)?,
            });
        }

        debug!("Found {} remotes in {}", remotes.len(), self.root.display());
        Ok(remotes)
    }

    fn pull(&self, remote: &str) -> RegistryResult<PullOutcome> {
        let stdout = self
            .git
            .exec_ok(Some(self.root.as_path()), &["pull", "--ff-only", remote])?;

        Ok(parse_pull_output(&stdout))
    }
}

impl GitRepository {
    /// Raw `remote.<name>.url` values; `url.<base>.insteadOf` rewrites are not applied
    fn configured_urls(&self, remote: &str) -> RegistryResult<Vec<String>> {
        let key = format!("remote.{}.url", remote);
        let args = ["config", "--get-all", key.as_str()];
        let output = self.git.exec(Some(self.root.as_path()), &args)?;

        // Exit status 1 means the key is unset
        if output.status.code() == Some(1) {
            return Ok(Vec::new());
        }
        if !output.status.success() {
            return Err(RegistryError::command_exec(
                format!("{} {}", self.git.program, args.join(" ")),
                String::from_utf8_lossy(&output.stderr).trim(),
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect())
    }
}

/// Older git releases hyphenate the message
fn parse_pull_output(stdout: &str) -> PullOutcome {
    if stdout.contains("Already up to date") || stdout.contains("Already up-to-date") {
        PullOutcome::AlreadyUpToDate
    } else {
        PullOutcome::Updated
    }
}
