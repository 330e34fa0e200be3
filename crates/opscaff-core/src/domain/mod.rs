// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for opscaff.
//!
//! This module contains the plugin identity and resolution rules. All I/O
//! (reading the `PROJECT` file, configuration, terminal output) is handled
//! via ports defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **No logging**: Errors carry all context; services decide what to log
//! - **Immutable entities**: Plugins and registries are read-only once built
//! - **Rich domain model**: Behavior lives in entities, not services
//!
// Public API - what the world sees
pub mod capabilities;
pub mod entities;
pub mod error;
pub mod key;
pub mod resolver;
pub mod value_objects;

// Private implementation details - not visible outside domain
mod validation;

// Re-exports for convenience
pub use capabilities::{Capabilities, Capability};
pub use entities::{
    BundleBuilder, Plugin, PluginBuilder, PluginRegistry, ProjectConfig,
    common_supported_versions,
};
pub use error::{DomainError, ErrorCategory, NoMatchReason};
pub use resolver::Resolver;
pub use validation::DomainValidator;
pub use value_objects::{Stage, Version, VersionError};
