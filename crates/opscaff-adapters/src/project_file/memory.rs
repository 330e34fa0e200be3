//! In-memory project store for testing.

use std::sync::{Arc, RwLock};

use opscaff_core::{
    application::ports::ProjectConfigStore,
    domain::ProjectConfig,
    error::{OpscaffError, OpscaffResult},
};

/// Thread-safe in-memory project store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProjectStore {
    inner: Arc<RwLock<Option<ProjectConfig>>>,
}

impl InMemoryProjectStore {
    /// Create a store with no project file.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `config`.
    pub fn with(config: ProjectConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Some(config))),
        }
    }

    /// Replace (or remove) the stored configuration.
    pub fn set(&self, config: Option<ProjectConfig>) -> OpscaffResult<()> {
        let mut inner = self.inner.write().map_err(|_| lock_error())?;
        *inner = config;
        Ok(())
    }
}

impl ProjectConfigStore for InMemoryProjectStore {
    fn load(&self) -> OpscaffResult<Option<ProjectConfig>> {
        let inner = self.inner.read().map_err(|_| lock_error())?;
        Ok(inner.clone())
    }
}

fn lock_error() -> OpscaffError {
    OpscaffError::Internal {
        message: "project store lock poisoned".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opscaff_core::domain::Version;

    #[test]
    fn empty_by_default() {
        assert_eq!(InMemoryProjectStore::new().load().unwrap(), None);
    }

    #[test]
    fn clones_share_state() {
        let store = InMemoryProjectStore::new();
        let handle = store.clone();
        store
            .set(Some(ProjectConfig::new(Version::stable(3), vec![])))
            .unwrap();
        assert_eq!(handle.load().unwrap().unwrap().version, Version::stable(3));
        store.set(None).unwrap();
        assert!(handle.load().unwrap().is_none());
    }
}
