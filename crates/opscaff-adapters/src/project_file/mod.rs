//! Project configuration adapters.

pub mod memory;
pub mod yaml;

pub use memory::InMemoryProjectStore;
pub use yaml::{DEFAULT_PROJECT_FILE, YamlProjectFile};
