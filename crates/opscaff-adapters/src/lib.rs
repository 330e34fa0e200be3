//! Infrastructure adapters for opscaff.
//!
//! This crate implements the ports defined in `opscaff-core::application::ports`
//! and ships the compiled-in plugin catalogue. It contains all I/O.

pub mod builtin_plugins;
pub mod project_file;

// Re-export commonly used adapters
pub use builtin_plugins::builtin_registry;
pub use project_file::{InMemoryProjectStore, YamlProjectFile};
