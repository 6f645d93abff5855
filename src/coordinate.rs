//! Buildpack coordinates
//!
//! Parses human-given registry IDs of the form `namespace/name[@version]`,
//! optionally prefixed with `urn:cnb:registry:`.

use crate::error::{RegistryError, RegistryResult};
use std::fmt;

const REGISTRY_URN_PREFIX: &str = "urn:cnb:registry:";

/// A parsed registry ID
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coordinate {
    pub namespace: String,
    pub name: String,
    /// Requested version; `None` selects the highest available
    pub version: Option<String>,
}

impl Coordinate {
    /// `namespace/name` without the version
    pub fn id(&self) -> String {
        format!("{}/{}", self.namespace, self.name)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(version) => write!(f, "{}/{}@{}", self.namespace, self.name, version),
            None => write!(f, "{}/{}", self.namespace, self.name),
        }
    }
}

/// Parse a registry ID into namespace, name and optional version
pub fn parse_registry_id(registry_id: &str) -> RegistryResult<Coordinate> {
    let locator = registry_id
        .strip_prefix(REGISTRY_URN_PREFIX)
        .unwrap_or(registry_id);

    let (id, version) = match locator.split_once('@') {
        Some((id, version)) => (id, Some(version)),
        None => (locator, None),
    };

    let parts: Vec<&str> = id.split('/').collect();
    if parts.len() != 2 || parts.iter().any(|p| p.is_empty()) {
        return Err(RegistryError::InvalidCoordinate(registry_id.to_string()));
    }

    Ok(Coordinate {
        namespace: parts[0].to_string(),
        name: parts[1].to_string(),
        version: version.filter(|v| !v.is_empty()).map(str::to_string),
    })
}
