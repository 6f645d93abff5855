//! Index file sharding
//!
//! Index files are spread over directories by the first characters of the
//! buildpack name, bounding the number of files per directory:
//!
//! | Name length | Directory |
//! |-------------|-----------|
//! | 1-2 | `{name}` |
//! | 3 | `{name[0..2]}/{name[2..3]}` |
//! | 4+ | `{name[0..2]}/{name[2..4]}` |
//!
//! Ranges are in characters. Index tooling that slices bytes files a
//! non-ASCII name elsewhere (`ñandú` under `ñ/an` rather than `ña/nd`), so
//! such names only resolve in indexes written with character ranges.

use std::path::PathBuf;

/// Shard directory for a buildpack name, relative to the mirror root
///
/// Lengths are counted in characters so multi-byte names never split a
/// code point.
pub fn shard_dir(name: &str) -> PathBuf {
    let chars: Vec<char> = name.chars().collect();
    let prefix = |range: std::ops::Range<usize>| chars[range].iter().collect::<String>();

    match chars.len() {
        0..=2 => PathBuf::from(name),
        3 => PathBuf::from(prefix(0..2)).join(prefix(2..3)),
        _ => PathBuf::from(prefix(0..2)).join(prefix(2..4)),
    }
}

/// Index file for a buildpack, relative to the mirror root
pub fn index_path(namespace: &str, name: &str) -> PathBuf {
    shard_dir(name).join(format!("{}_{}", namespace, name))
}
