//! Mirror lifecycle: create, validate, reset and refresh
//!
//! Run before every lookup. A mirror is valid only when it has exactly one
//! remote with exactly one URL equal to the registry URL; anything else is
//! discarded and cloned again once.

use crate::cache::locator::CacheHandle;
use crate::error::{RegistryError, RegistryResult};
use crate::git::{PullOutcome, Repository, SourceControl};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Remote pulled on refresh
pub const ORIGIN: &str = "origin";

/// On-disk state of a mirror
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MirrorState {
    /// Root does not exist
    Absent,
    /// Root exists but is not a mirror of the registry URL
    Invalid(String),
    /// Root is a mirror of the registry URL
    Valid,
}

/// Outcome of a single validation pass
enum Checked {
    Absent,
    Invalid(RegistryError),
    Valid(Box<dyn Repository>),
}

/// Inspect the mirror without modifying it
pub fn inspect(handle: &CacheHandle, scm: &dyn SourceControl) -> MirrorState {
    match check(handle, scm) {
        Checked::Absent => MirrorState::Absent,
        Checked::Invalid(e) => MirrorState::Invalid(e.to_string()),
        Checked::Valid(_) => MirrorState::Valid,
    }
}

/// Make sure a valid mirror exists, without pulling
pub fn initialize(handle: &CacheHandle, scm: &dyn SourceControl) -> RegistryResult<()> {
    prepare(handle, scm).map(|_| ())
}

/// Make sure a valid mirror exists and pull the latest index
pub fn ensure_ready(handle: &CacheHandle, scm: &dyn SourceControl) -> RegistryResult<()> {
    let repository = prepare(handle, scm)?;

    let outcome = repository
        .pull(ORIGIN)
        .map_err(|source| RegistryError::CacheRefresh {
            path: handle.root().to_path_buf(),
            source: Box::new(source),
        })?;

    match outcome {
        PullOutcome::AlreadyUpToDate => {
            debug!("Registry cache already up to date: {}", handle.url())
        }
        PullOutcome::Updated => info!("Updated registry cache from {}", handle.url()),
    }

    Ok(())
}

/// Validate once, creating or rebuilding the mirror as needed
///
/// A mirror cloned because the root was absent is validated again; one
/// rebuilt after failing validation is trusted.
fn prepare(handle: &CacheHandle, scm: &dyn SourceControl) -> RegistryResult<Box<dyn Repository>> {
    let mut checked = check(handle, scm);

    if let Checked::Absent = checked {
        create(handle, scm)?;
        checked = check(handle, scm);
    }

    match checked {
        Checked::Valid(repository) => Ok(repository),
        Checked::Invalid(e) => {
            warn!("Discarding registry cache {}: {}", handle.root().display(), e);
            rebuild(handle, scm)
        }
        Checked::Absent => rebuild(handle, scm),
    }
}

fn rebuild(handle: &CacheHandle, scm: &dyn SourceControl) -> RegistryResult<Box<dyn Repository>> {
    reset(handle.root())?;
    create(handle, scm)?;

    scm.open(handle.root())
        .map_err(|e| RegistryError::CacheCreate {
            source: Box::new(e),
        })
}

fn check(handle: &CacheHandle, scm: &dyn SourceControl) -> Checked {
    match fs::symlink_metadata(handle.root()) {
        Err(e) if e.kind() == io::ErrorKind::NotFound => Checked::Absent,
        _ => match validate(handle, scm) {
            Ok(repository) => Checked::Valid(repository),
            Err(e) => Checked::Invalid(e),
        },
    }
}

/// Check the mirror tracks exactly the registry URL
fn validate(handle: &CacheHandle, scm: &dyn SourceControl) -> RegistryResult<Box<dyn Repository>> {
    let repository = scm
        .open(handle.root())
        .map_err(|e| RegistryError::CacheCorrupt(format!("could not open registry cache: {e}")))?;

    let remotes = repository
        .remotes()
        .map_err(|e| RegistryError::CacheCorrupt(format!("could not access registry cache: {e}")))?;

    match remotes.as_slice() {
        [remote] if remote.urls.len() == 1 => {
            if remote.urls[0] != handle.url() {
                return Err(RegistryError::CacheCorrupt(format!(
                    "origin {} does not match {}",
                    remote.urls[0],
                    handle.url()
                )));
            }
        }
        _ => {
            return Err(RegistryError::CacheCorrupt(format!(
                "expected one remote with one URL, found {} remotes",
                remotes.len()
            )))
        }
    }

    Ok(repository)
}

/// Clone into a staging sibling of the root, then move it into place
fn create(handle: &CacheHandle, scm: &dyn SourceControl) -> RegistryResult<()> {
    let staging = staging_dir(handle.root());
    debug!("Staging registry clone in {}", staging.display());

    let result = scm.clone_repo(handle.url(), &staging).and_then(|repository| {
        fs::rename(repository.worktree_root(), handle.root()).map_err(|e| {
            RegistryError::io(
                format!("moving clone into place at {}", handle.root().display()),
                e,
            )
        })
    });

    if let Err(e) = result {
        if staging.exists() {
            if let Err(cleanup) = fs::remove_dir_all(&staging) {
                warn!("Failed to remove {}: {}", staging.display(), cleanup);
            }
        }
        return Err(RegistryError::CacheCreate {
            source: Box::new(e),
        });
    }

    info!("Created registry cache at {}", handle.root().display());
    Ok(())
}

/// Remove the mirror root entirely
fn reset(root: &Path) -> RegistryResult<()> {
    let result = match fs::symlink_metadata(root) {
        Ok(meta) if meta.is_dir() => fs::remove_dir_all(root),
        Ok(_) => fs::remove_file(root),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    };

    result.map_err(|e| RegistryError::CacheReset {
        path: root.to_path_buf(),
        source: e,
    })?;

    info!("Reset registry cache at {}", root.display());
    Ok(())
}

/// Same-filesystem sibling so the final rename is atomic
fn staging_dir(root: &Path) -> PathBuf {
    let name = root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "registry".to_string());
    root.with_file_name(format!(".{}.tmp-{}", name, Uuid::new_v4().simple()))
}
