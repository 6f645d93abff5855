//! Local mirror of the registry index
//!
//! Each registry URL is mirrored into its own directory under the cache
//! home. The mirror is checked before every lookup and rebuilt when it no
//! longer tracks the registry URL.
//!
//! # Mirror States
//!
//! | State | Action |
//! |-------|--------|
//! | Absent | clone into a staging directory, rename into place |
//! | Invalid | remove, then clone again once |
//! | Valid | pull `origin` |
//!
//! Only one process may use a cache root at a time; no locks are taken.

pub mod lifecycle;
pub mod locator;

pub use lifecycle::{ensure_ready, initialize, inspect, MirrorState, ORIGIN};
pub use locator::{
    locate, locate_default, CacheHandle, LocatorConfig, DEFAULT_REGISTRY_DIR,
    DEFAULT_REGISTRY_URL,
};
