//! OCI image reference validation
//!
//! Weak validation of image references in the Docker distribution style:
//!
//! ```text
//! [registry[:port]/]repository[:tag][@sha256:<64 hex>]
//! ```
//!
//! A reference without a registry resolves against Docker Hub. Index entries
//! are only trustworthy when they pin a digest, see [`parse_digest`].

use crate::error::{RegistryError, RegistryResult};

/// Registry used when a reference names none
pub const DEFAULT_REGISTRY: &str = "index.docker.io";

const DIGEST_ALGORITHM: &str = "sha256:";
const DIGEST_HEX_LEN: usize = 64;
const MAX_TAG_LEN: usize = 128;
const MIN_REPOSITORY_LEN: usize = 2;
const MAX_REPOSITORY_LEN: usize = 255;

/// A parsed image reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageReference {
    pub registry: String,
    pub repository: String,
    pub tag: Option<String>,
    pub digest: Option<String>,
}

impl ImageReference {
    /// Whether the reference pins an immutable content digest
    pub fn is_digest(&self) -> bool {
        self.digest.is_some()
    }
}

fn invalid(reference: &str, reason: impl Into<String>) -> RegistryError {
    RegistryError::InvalidReference {
        reference: reference.to_string(),
        reason: reason.into(),
    }
}

/// Parse a tag or digest reference with weak validation
pub fn parse_reference(reference: &str) -> RegistryResult<ImageReference> {
    if reference.is_empty() {
        return Err(invalid(reference, "reference is empty"));
    }

    let (name, digest) = match reference.split_once('@') {
        Some((name, digest)) => {
            check_digest(reference, digest)?;
            (name, Some(digest.to_string()))
        }
        None => (reference, None),
    };

    let (repo_part, tag) = split_tag(name);
    if let Some(tag) = tag {
        check_tag(reference, tag)?;
    }

    let (registry, repository) = split_registry(repo_part);
    check_registry(reference, registry)?;
    check_repository(reference, repository)?;

    Ok(ImageReference {
        registry: registry.to_string(),
        repository: repository.to_string(),
        tag: tag.map(str::to_string),
        digest,
    })
}

/// Parse a reference that must pin a digest
pub fn parse_digest(reference: &str) -> RegistryResult<ImageReference> {
    let parsed = parse_reference(reference)?;
    if !parsed.is_digest() {
        return Err(invalid(reference, "a digest must be specified"));
    }
    Ok(parsed)
}

/// Split `name[:tag]`; a colon followed by a path is a registry port
fn split_tag(name: &str) -> (&str, Option<&str>) {
    match name.rsplit_once(':') {
        Some((repo, tag)) if !tag.contains('/') => (repo, Some(tag)),
        _ => (name, None),
    }
}

/// Split off the registry when the first component looks like a host
fn split_registry(name: &str) -> (&str, &str) {
    match name.split_once('/') {
        Some((host, rest))
            if host.contains('.') || host.contains(':') || host == "localhost" =>
        {
            (host, rest)
        }
        _ => (DEFAULT_REGISTRY, name),
    }
}

fn check_digest(reference: &str, digest: &str) -> RegistryResult<()> {
    let hex = digest
        .strip_prefix(DIGEST_ALGORITHM)
        .ok_or_else(|| invalid(reference, "digest must use sha256"))?;

    if hex.len() != DIGEST_HEX_LEN
        || !hex
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
    {
        return Err(invalid(
            reference,
            "digest must be 64 lowercase hex characters",
        ));
    }
    Ok(())
}

fn check_tag(reference: &str, tag: &str) -> RegistryResult<()> {
    if tag.is_empty() || tag.len() > MAX_TAG_LEN {
        return Err(invalid(reference, "tag must be 1 to 128 characters"));
    }
    if tag.starts_with(['.', '-']) {
        return Err(invalid(reference, "tag must start with a word character"));
    }
    if !tag
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
    {
        return Err(invalid(reference, "tag contains invalid characters"));
    }
    Ok(())
}

fn check_registry(reference: &str, registry: &str) -> RegistryResult<()> {
    if registry.is_empty() {
        return Err(invalid(reference, "registry is empty"));
    }
    if !registry
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | ':' | '[' | ']'))
    {
        return Err(invalid(reference, "registry contains invalid characters"));
    }
    Ok(())
}

fn check_repository(reference: &str, repository: &str) -> RegistryResult<()> {
    if repository.len() < MIN_REPOSITORY_LEN || repository.len() > MAX_REPOSITORY_LEN {
        return Err(invalid(
            reference,
            "repository must be 2 to 255 characters",
        ));
    }
    if repository.split('/').any(str::is_empty) {
        return Err(invalid(reference, "repository has an empty path component"));
    }
    // Lowercase only
    if !repository.chars().all(|c| {
        c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '_' | '-' | '.' | '/')
    }) {
        return Err(invalid(
            reference,
            "repository contains invalid characters",
        ));
    }
    Ok(())
}
