//! Buildpack lookups against a registry cache
//!
//! Ties the pieces together: refresh the mirror, parse the coordinate, read
//! the sharded index file and pick a version.

use crate::cache::{self, CacheHandle, LocatorConfig};
use crate::coordinate::parse_registry_id;
use crate::error::{RegistryResult, ResultExt};
use crate::git::{GitCli, SourceControl};
use crate::index::{self, Buildpack};
use std::path::Path;
use tracing::{debug, info};

/// A registry cache bound to a source control client
pub struct RegistryCache {
    handle: CacheHandle,
    scm: Box<dyn SourceControl>,
}

impl RegistryCache {
    /// Cache for `registry_url` under `home`, using `git`
    pub fn new(home: &Path, registry_url: &str) -> RegistryResult<Self> {
        Ok(Self::with_handle(
            cache::locate(home, registry_url)?,
            Box::new(GitCli::new()),
        ))
    }

    /// Cache for the default registry under `home`, using `git`
    pub fn new_default(home: &Path) -> RegistryResult<Self> {
        Ok(Self::with_handle(
            cache::locate_default(home)?,
            Box::new(GitCli::new()),
        ))
    }

    /// Cache located with custom naming
    pub fn with_config(
        config: &LocatorConfig,
        home: &Path,
        registry_url: &str,
        scm: Box<dyn SourceControl>,
    ) -> RegistryResult<Self> {
        Ok(Self::with_handle(config.locate(home, registry_url)?, scm))
    }

    /// Cache for an already located handle
    pub fn with_handle(handle: CacheHandle, scm: Box<dyn SourceControl>) -> Self {
        Self { handle, scm }
    }

    pub fn handle(&self) -> &CacheHandle {
        &self.handle
    }

    /// Make sure a valid mirror exists, without pulling
    pub fn initialize(&self) -> RegistryResult<()> {
        cache::initialize(&self.handle, self.scm.as_ref())
    }

    /// Make sure a valid mirror exists and is up to date
    pub fn refresh(&self) -> RegistryResult<()> {
        cache::ensure_ready(&self.handle, self.scm.as_ref())
    }

    /// Resolve `namespace/name[@version]` to its index entry
    ///
    /// The returned entry is not validated; call [`Buildpack::validate`]
    /// before pulling its address.
    pub fn locate_buildpack(&self, registry_id: &str) -> RegistryResult<Buildpack> {
        self.refresh().context("refreshing cache")?;

        let coordinate = parse_registry_id(registry_id)?;
        debug!("Locating {} in {}", coordinate, self.handle.root().display());

        let entry = index::read_entry(self.handle.root(), &coordinate.namespace, &coordinate.name)
            .context("reading entry")?;

        let buildpack = index::select(&entry, &coordinate)?;
        info!("Resolved {} to {}", coordinate, buildpack.version);
        Ok(buildpack)
    }
}
