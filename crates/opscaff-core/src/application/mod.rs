//! Application layer for opscaff.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (ResolutionService, PluginService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All business rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    ConfiguredDefaults, Deprecation, InputSource, PluginInfo, PluginService, Resolution,
    ResolutionRequest, ResolutionService, ResolutionSummary, Sources,
};

// Re-export port traits (for adapter implementation)
pub use ports::ProjectConfigStore;

pub use error::ApplicationError;
