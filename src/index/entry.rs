//! Index entries
//!
//! One line of an index file is one published buildpack version:
//!
//! ```json
//! {"ns":"example","name":"foo","version":"1.0.0","yanked":false,"addr":"example.com/foo@sha256:..."}
//! ```

use crate::error::{RegistryError, RegistryResult};
use crate::reference;
use serde::{Deserialize, Serialize};

/// One published version of a buildpack
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Buildpack {
    #[serde(rename = "ns")]
    pub namespace: String,
    pub name: String,
    /// Semantic version without a leading `v`
    pub version: String,
    pub yanked: bool,
    /// Image reference the version is published at
    #[serde(rename = "addr")]
    pub address: String,
}

impl Buildpack {
    /// Check the address pins an immutable digest
    ///
    /// Lookups return entries as they appear in the index; callers that are
    /// about to pull the address are expected to validate it first.
    pub fn validate(&self) -> RegistryResult<()> {
        if self.address.is_empty() {
            return Err(RegistryError::AddressMissing);
        }

        reference::parse_reference(&self.address)?;
        reference::parse_digest(&self.address)
            .map_err(|_| RegistryError::NotDigest(self.address.clone()))?;

        Ok(())
    }
}

/// All versions of one buildpack, in index file order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub buildpacks: Vec<Buildpack>,
}

impl Entry {
    pub fn is_empty(&self) -> bool {
        self.buildpacks.is_empty()
    }
}
