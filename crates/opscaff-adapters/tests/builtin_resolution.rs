//! Resolution against the compiled-in catalogue, with the project file held
//! in memory.

use std::sync::Arc;

use opscaff_adapters::{InMemoryProjectStore, builtin_registry};
use opscaff_core::{
    application::{ConfiguredDefaults, InputSource, ResolutionRequest, ResolutionService},
    domain::{Capability, DomainError, Plugin, ProjectConfig, Version},
    error::OpscaffError,
};

fn service(store: InMemoryProjectStore) -> ResolutionService {
    ResolutionService::new(
        Arc::new(builtin_registry().unwrap()),
        Box::new(store),
        ConfiguredDefaults::default(),
    )
}

fn keys(plugins: Vec<&Plugin>) -> Vec<String> {
    plugins.into_iter().map(Plugin::key).collect()
}

#[test]
fn layout_drives_create_api_chain() {
    let store = InMemoryProjectStore::with(ProjectConfig::new(
        Version::stable(3),
        vec![
            "go.kubebuilder.io/v4".into(),
            "deploy-image.go.kubebuilder.io/v1-alpha".into(),
        ],
    ));
    let resolution = service(store).resolve(&ResolutionRequest::default()).unwrap();

    assert_eq!(resolution.sources().plugins, InputSource::ProjectFile);
    assert_eq!(
        keys(resolution.providers(Capability::CreateApi).unwrap()),
        vec![
            "kustomize.common.kubebuilder.io/v2",
            "base.go.kubebuilder.io/v4",
            "deploy-image.go.kubebuilder.io/v1-alpha",
        ]
    );
    assert_eq!(
        keys(resolution.providers(Capability::Edit).unwrap()),
        vec!["base.go.kubebuilder.io/v4"]
    );
}

#[test]
fn store_changes_are_seen_by_the_next_resolution() {
    let store = InMemoryProjectStore::new();
    let service = service(store.clone());

    let fresh = service.resolve(&ResolutionRequest::default()).unwrap();
    assert_eq!(fresh.sources().project_version, InputSource::Builtin);

    store
        .set(Some(ProjectConfig::new(Version::stable(3), vec!["go/v3".into()])))
        .unwrap();
    let legacy = service.resolve(&ResolutionRequest::default()).unwrap();
    assert_eq!(legacy.keys(), &["go/v3".to_string()]);
    assert_eq!(legacy.deprecations().len(), 1);
}

#[test]
fn unsupported_project_version_for_fully_qualified_key() {
    let request = ResolutionRequest {
        project_version: Some("2".into()),
        plugins: vec!["go.kubebuilder.io/v4".into()],
    };
    let err = service(InMemoryProjectStore::new())
        .resolve(&request)
        .unwrap_err();
    assert!(matches!(
        err,
        OpscaffError::Domain(DomainError::UnsupportedProjectVersion { .. })
    ));
}
