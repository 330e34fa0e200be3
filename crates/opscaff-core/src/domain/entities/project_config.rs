use crate::domain::value_objects::Version;

/// The parts of a project's `PROJECT` file that plugin resolution reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectConfig {
    /// Project-configuration version (`version:`).
    pub version: Version,
    /// Plugin keys that scaffolded the project (`layout:`), in order.
    pub plugin_chain: Vec<String>,
}

impl ProjectConfig {
    pub fn new(version: Version, plugin_chain: Vec<String>) -> Self {
        Self {
            version,
            plugin_chain,
        }
    }
}
