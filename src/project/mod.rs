//! Project config discovery
//!
//! Finds every `tsconfig.json` / `jsconfig.json` below a workspace root,
//! flattens each one (see [`tsconfig`]) and registers a path-mapping resolver
//! for every config that governs files of its own.

pub mod discovery;
pub mod tsconfig;

pub use discovery::{DiscoveryOutcome, ProjectDiscovery};
pub use tsconfig::{FileSelector, PathAlias, ProjectConfig};
