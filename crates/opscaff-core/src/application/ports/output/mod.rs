//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `opscaff-adapters` crate provides implementations.

use crate::domain::ProjectConfig;
use crate::error::OpscaffResult;

/// Port for reading the project configuration (`PROJECT` file).
///
/// Implemented by:
/// - `opscaff_adapters::project_file::YamlProjectFile` (production)
/// - `opscaff_adapters::project_file::InMemoryProjectStore` (testing)
///
/// Read-only: writing the file back belongs to the scaffolding machinery.
#[cfg_attr(test, mockall::automock)]
pub trait ProjectConfigStore: Send + Sync {
    /// Load the project configuration.
    ///
    /// Returns `Ok(None)` when there is no project file yet, which is the
    /// normal state before `init`.
    fn load(&self) -> OpscaffResult<Option<ProjectConfig>>;
}
