//! registry-cache - Buildpack registry index cache
//!
//! Keeps a local git mirror of a buildpack registry index and resolves
//! `namespace/name[@version]` coordinates to digest-pinned image addresses.
//! The mirror is created on first use, rebuilt when it tracks the wrong
//! remote, and pulled before every lookup.
//!
//! ```no_run
//! use registry_cache::RegistryCache;
//! use std::path::Path;
//!
//! let cache = RegistryCache::new_default(Path::new("/home/me/.cache/registry-cache"))?;
//! let buildpack = cache.locate_buildpack("paketo-buildpacks/nodejs")?;
//! buildpack.validate()?;
//! println!("{}", buildpack.address);
//! # Ok::<(), registry_cache::RegistryError>(())
//! ```

pub mod cache;
pub mod cli;
pub mod config;
pub mod coordinate;
pub mod error;
pub mod git;
pub mod index;
pub mod reference;
pub mod registry;

pub use cache::{CacheHandle, LocatorConfig};
pub use coordinate::{parse_registry_id, Coordinate};
pub use error::{ErrorKind, RegistryError, RegistryResult};
pub use index::{Buildpack, Entry};
pub use registry::RegistryCache;
