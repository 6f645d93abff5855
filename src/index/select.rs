//! Version selection
//!
//! Versions are compared as semantic versions. Shorthand cores (`1`, `1.2`)
//! are widened to `1.0.0` / `1.2.0`, build metadata is ignored, and anything
//! that still fails to parse orders below every valid version. Yanked
//! entries are not filtered.

use crate::coordinate::Coordinate;
use crate::error::{RegistryError, RegistryResult};
use crate::index::entry::{Buildpack, Entry};
use semver::{BuildMetadata, Version};
use std::cmp::Ordering;

/// Pick the requested version, or the highest one when none is requested
pub fn select(entry: &Entry, coordinate: &Coordinate) -> RegistryResult<Buildpack> {
    if entry.is_empty() {
        return Err(RegistryError::NoEntries(coordinate.to_string()));
    }

    let chosen = match coordinate.version.as_deref() {
        None => highest(&entry.buildpacks),
        Some(version) => entry.buildpacks.iter().find(|b| b.version == version),
    };

    chosen
        .cloned()
        .ok_or_else(|| RegistryError::VersionNotFound(coordinate.to_string()))
}

/// First entry with the greatest version
fn highest(buildpacks: &[Buildpack]) -> Option<&Buildpack> {
    let mut iter = buildpacks.iter();
    let mut best = iter.next()?;
    let mut best_version = parse_version(&best.version);

    for candidate in iter {
        let version = parse_version(&candidate.version);
        if compare(&version, &best_version) == Ordering::Greater {
            best = candidate;
            best_version = version;
        }
    }

    Some(best)
}

/// Parse an index version, `None` when it is not semver
pub fn parse_version(raw: &str) -> Option<Version> {
    let mut version = Version::parse(raw)
        .ok()
        .or_else(|| Version::parse(&widen_shorthand(raw)?).ok())?;
    version.build = BuildMetadata::EMPTY;
    Some(version)
}

/// `1` → `1.0.0`, `1.2` → `1.2.0`; shorthand may not carry suffixes
fn widen_shorthand(raw: &str) -> Option<String> {
    let parts: Vec<&str> = raw.split('.').collect();
    if parts.len() > 2
        || parts
            .iter()
            .any(|p| p.is_empty() || !p.chars().all(|c| c.is_ascii_digit()))
    {
        return None;
    }

    let mut widened = parts.join(".");
    for _ in parts.len()..3 {
        widened.push_str(".0");
    }
    Some(widened)
}

/// Unparsable versions are equal to each other and below everything else
fn compare(a: &Option<Version>, b: &Option<Version>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}
