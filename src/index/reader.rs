//! Index file reader

use crate::error::{RegistryError, RegistryResult};
use crate::index::entry::{Buildpack, Entry};
use crate::index::shard::index_path;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use tracing::debug;

/// Read every version of `namespace/name` from the mirror at `root`
///
/// Each line is parsed independently; the first malformed line fails the
/// whole read, and nothing parsed before an I/O error is returned. A line
/// that is not valid UTF-8 is an I/O error.
pub fn read_entry(root: &Path, namespace: &str, name: &str) -> RegistryResult<Entry> {
    let path = root.join(index_path(namespace, name));

    let file = File::open(&path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => RegistryError::BuildpackNotFound {
            namespace: namespace.to_string(),
            name: name.to_string(),
        },
        _ => RegistryError::io(
            format!("could not open index for buildpack: {}/{}", namespace, name),
            e,
        ),
    })?;

    let mut entry = Entry::default();
    for (idx, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|e| {
            RegistryError::io(
                format!("could not read index for buildpack: {}/{}", namespace, name),
                e,
            )
        })?;

        let buildpack: Buildpack =
            serde_json::from_str(&line).map_err(|e| RegistryError::IndexParse {
                namespace: namespace.to_string(),
                name: name.to_string(),
                line: idx + 1,
                source: e,
            })?;
        entry.buildpacks.push(buildpack);
    }

    debug!(
        "Read {} entries for {}/{} from {}",
        entry.buildpacks.len(),
        namespace,
        name,
        path.display()
    );
    Ok(entry)
}
