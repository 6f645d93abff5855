//! Error types for the registry cache
//!
//! All modules use `RegistryResult<T>` as their return type. Errors carry an
//! [`ErrorKind`] so callers can branch on the failure class without matching
//! on every variant, and context layers added while propagating are looked
//! through by [`RegistryError::kind`].

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for registry cache operations
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Failure classes surfaced to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Home directory missing or configuration file unreadable
    Configuration,
    /// Mirror has the wrong remote setup; normally repaired before surfacing
    CacheCorruption,
    /// Clone or move into place failed
    Creation,
    /// Removing a corrupt mirror failed
    Reset,
    /// Pull failed for a reason other than already being up to date
    Refresh,
    /// Index file, entry or version missing
    NotFound,
    /// Malformed coordinate or index line
    Parse,
    /// Address failed reference or digest validation
    Validation,
    /// Source control command could not run or failed
    Transport,
    /// Filesystem error outside the lifecycle transitions
    Io,
    /// Bug or runtime failure
    Internal,
}

/// All errors that can occur in the registry cache
#[derive(Error, Debug)]
pub enum RegistryError {
    // Configuration errors
    #[error("home directory {path} is not accessible: {source}")]
    HomeNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    // Cache lifecycle errors
    #[error("invalid registry cache: {0}")]
    CacheCorrupt(String),

    #[error("could not create registry cache: {source}")]
    CacheCreate {
        #[source]
        source: Box<RegistryError>,
    },

    #[error("could not reset registry cache {path}: {source}")]
    CacheReset {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not refresh registry cache {path}: {source}")]
    CacheRefresh {
        path: PathBuf,
        #[source]
        source: Box<RegistryError>,
    },

    // Index errors
    #[error("could not find buildpack: {namespace}/{name}")]
    BuildpackNotFound { namespace: String, name: String },

    #[error("no entries for buildpack: {0}")]
    NoEntries(String),

    #[error("could not find version for buildpack: {0}")]
    VersionNotFound(String),

    #[error("could not parse index for buildpack: {namespace}/{name} (line {line}): {source}")]
    IndexParse {
        namespace: String,
        name: String,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid registry ID: {0}")]
    InvalidCoordinate(String),

    // Address validation errors
    #[error("address is a required field")]
    AddressMissing,

    #[error("invalid reference '{reference}': {reason}")]
    InvalidReference { reference: String, reason: String },

    #[error("'{0}' is not a digest reference")]
    NotDigest(String),

    // Transport errors
    #[error("Command failed: {command}: {source}")]
    CommandFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command execution error: {command}, stderr: {stderr}")]
    CommandExecution { command: String, stderr: String },

    #[error("not a repository: {0}")]
    NotARepository(PathBuf),

    // IO errors
    #[error("IO error: {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // Wrapping
    #[error("{context}: {source}")]
    Context {
        context: String,
        #[source]
        source: Box<RegistryError>,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl RegistryError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a command failed error
    pub fn command_failed(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::CommandFailed {
            command: command.into(),
            source,
        }
    }

    /// Create a command execution error
    pub fn command_exec(command: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self::CommandExecution {
            command: command.into(),
            stderr: stderr.into(),
        }
    }

    /// Wrap this error with a context message
    pub fn context(self, context: impl Into<String>) -> Self {
        Self::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Failure class, looking through context layers
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Context { source, .. } => source.kind(),
            Self::HomeNotFound { .. } | Self::ConfigInvalid { .. } => ErrorKind::Configuration,
            Self::CacheCorrupt(_) => ErrorKind::CacheCorruption,
            Self::CacheCreate { .. } => ErrorKind::Creation,
            Self::CacheReset { .. } => ErrorKind::Reset,
            Self::CacheRefresh { .. } => ErrorKind::Refresh,
            Self::BuildpackNotFound { .. } | Self::NoEntries(_) | Self::VersionNotFound(_) => {
                ErrorKind::NotFound
            }
            Self::IndexParse { .. } | Self::InvalidCoordinate(_) | Self::Json(_) => {
                ErrorKind::Parse
            }
            Self::AddressMissing | Self::InvalidReference { .. } | Self::NotDigest(_) => {
                ErrorKind::Validation
            }
            Self::CommandFailed { .. }
            | Self::CommandExecution { .. }
            | Self::NotARepository(_) => ErrorKind::Transport,
            Self::Io { .. } => ErrorKind::Io,
            Self::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Context { source, .. } => source.hint(),
            Self::CacheCreate { source } | Self::CacheRefresh { source, .. } => source.hint(),
            Self::HomeNotFound { .. } => Some("Create the directory or pass --home <dir>"),
            Self::CommandFailed { .. } => Some("Install git and make sure it is on PATH"),
            Self::CacheReset { .. } => Some("Remove the cache directory manually and retry"),
            Self::InvalidCoordinate(_) => Some("Use the form <namespace>/<name>[@<version>]"),
            _ => None,
        }
    }
}

/// Context helpers for `RegistryResult`
pub trait ResultExt<T> {
    /// Wrap the error, if any, with a fixed message
    fn context(self, context: impl Into<String>) -> RegistryResult<T>;

    /// Wrap the error, if any, with a lazily built message
    fn with_context<F>(self, f: F) -> RegistryResult<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for RegistryResult<T> {
    fn context(self, context: impl Into<String>) -> RegistryResult<T> {
        self.map_err(|e| e.context(context))
    }

    fn with_context<F>(self, f: F) -> RegistryResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.context(f()))
    }
}
