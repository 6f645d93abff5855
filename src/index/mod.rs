//! Registry index lookups
//!
//! The index is a flat set of files, one per buildpack, sharded by name.
//! Every line of a file is one published version as JSON.

pub mod entry;
pub mod reader;
pub mod select;
pub mod shard;

pub use entry::{Buildpack, Entry};
pub use reader::read_entry;
pub use select::{parse_version, select};
pub use shard::{index_path, shard_dir};
