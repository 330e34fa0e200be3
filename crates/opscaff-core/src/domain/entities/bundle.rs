//! Bundle composition.
//!
//! A bundle groups plugins that run in order as if they were one. Nested
//! bundles are flattened on construction so every bundle holds only plain
//! plugins, and its supported project versions are the intersection of its
//! members'.

use crate::domain::{
    capabilities::Capabilities,
    entities::Plugin,
    error::DomainError,
    key,
    value_objects::Version,
};

/// Project versions supported by every plugin in `plugins`, sorted ascending.
///
/// Returns an empty list for an empty input.
pub fn common_supported_versions(plugins: &[Plugin]) -> Vec<Version> {
    let Some((first, rest)) = plugins.split_first() else {
        return Vec::new();
    };

    let mut common: Vec<Version> = first
        .supported_project_versions()
        .iter()
        .filter(|v| rest.iter().all(|p| p.supports(v)))
        .copied()
        .collect();
    common.sort();
    common.dedup();
    common
}

impl Plugin {
    /// Start building a bundle named `name` at `version`.
    ///
    /// # Example
    /// ```rust
    /// use opscaff_core::domain::{Plugin, Version};
    ///
    /// let kustomize = Plugin::builder("kustomize.common.kubebuilder.io", Version::stable(2))
    ///     .supports(Version::stable(3))
    ///     .build()
    ///     .unwrap();
    /// let base = Plugin::builder("base.go.kubebuilder.io", Version::stable(4))
    ///     .supports(Version::stable(3))
    ///     .build()
    ///     .unwrap();
    ///
    /// let go = Plugin::bundle("go.kubebuilder.io", Version::stable(4))
    ///     .member(kustomize)
    ///     .member(base)
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(go.members().len(), 2);
    /// ```
    pub fn bundle(name: impl Into<String>, version: Version) -> BundleBuilder {
        BundleBuilder {
            name: name.into(),
            version,
            members: Vec::new(),
            deprecation: None,
            description: None,
        }
    }
}

/// Builder for bundles.
///
/// Members are added in composition order; `build()` flattens and
/// intersects.
#[derive(Debug, Clone)]
pub struct BundleBuilder {
    name: String,
    version: Version,
    members: Vec<Plugin>,
    deprecation: Option<String>,
    description: Option<String>,
}

impl BundleBuilder {
    pub fn member(mut self, plugin: Plugin) -> Self {
        self.members.push(plugin);
        self
    }

    pub fn members(mut self, plugins: impl IntoIterator<Item = Plugin>) -> Self {
        self.members.extend(plugins);
        self
    }

    pub fn deprecated(mut self, warning: impl Into<String>) -> Self {
        self.deprecation = Some(warning.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Consume builder and construct the bundle.
    ///
    /// # Errors
    ///
    /// - `InvalidName` / `MalformedVersion` for a bad bundle identity
    /// - `NoCommonVersion` if the flattened members share no project version
    pub fn build(self) -> Result<Plugin, DomainError> {
        key::validate_name(&self.name)?;
        self.version
            .validate()
            .map_err(|e| DomainError::malformed_version(self.version.prefixed(), e))?;

        let flattened: Vec<Plugin> = self
            .members
            .into_iter()
            .flat_map(|mut member| match member.members.take() {
                Some(inner) => inner,
                None => vec![member],
            })
            .collect();

        let supported = common_supported_versions(&flattened);
        if supported.is_empty() {
            return Err(DomainError::NoCommonVersion {
                bundle: key::key(&self.name, &self.version.to_string()),
                members: flattened.iter().map(Plugin::key).collect(),
            });
        }

        let capabilities = flattened
            .iter()
            .fold(Capabilities::none(), |acc, p| acc.union(p.capabilities()));

        let bundle = Plugin {
            name: self.name,
            version: self.version,
            supported_project_versions: supported,
            capabilities,
            deprecation: self.deprecation,
            description: self.description,
            members: Some(flattened),
        };
        bundle.validate()?;
        Ok(bundle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::capabilities::Capability;

    fn plugin(name: &str, supported: &[Version]) -> Plugin {
        Plugin::builder(name, Version::stable(1))
            .supports_all(supported.iter().copied())
            .build()
            .unwrap()
    }

    fn p1() -> Plugin {
        plugin("p1.example.com", &[Version::stable(1), Version::stable(2), Version::stable(3)])
    }

    fn p2() -> Plugin {
        plugin("p2.example.com", &[Version::stable(1), Version::beta(2), Version::alpha(3)])
    }

    fn p3() -> Plugin {
        plugin("p3.example.com", &[Version::stable(1), Version::stable(2), Version::beta(3)])
    }

    fn p4() -> Plugin {
        plugin("p4.example.com", &[Version::stable(2), Version::stable(3)])
    }

    #[test]
    fn common_versions_of_pairs_and_triples() {
        let cases: Vec<(Vec<Plugin>, Vec<Version>)> = vec![
            (vec![p1(), p2()], vec![Version::stable(1)]),
            (vec![p1(), p3()], vec![Version::stable(1), Version::stable(2)]),
            (vec![p1(), p4()], vec![Version::stable(2), Version::stable(3)]),
            (vec![p2(), p3()], vec![Version::stable(1)]),
            (vec![p3(), p4()], vec![Version::stable(2)]),
            (vec![p1(), p2(), p3()], vec![Version::stable(1)]),
            (vec![p1(), p3(), p4()], vec![Version::stable(2)]),
        ];
        for (plugins, expected) in cases {
            assert_eq!(common_supported_versions(&plugins), expected);
        }
    }

    #[test]
    fn common_versions_can_be_empty() {
        assert!(common_supported_versions(&[p2(), p4()]).is_empty());
        assert!(common_supported_versions(&[p1(), p2(), p4()]).is_empty());
        assert!(common_supported_versions(&[p2(), p3(), p4()]).is_empty());
        assert!(common_supported_versions(&[p1(), p2(), p3(), p4()]).is_empty());
        assert!(common_supported_versions(&[]).is_empty());
    }

    #[test]
    fn common_versions_are_sorted() {
        let a = plugin("a.io", &[Version::stable(3), Version::stable(1), Version::stable(2)]);
        let b = plugin("b.io", &[Version::stable(2), Version::stable(3), Version::stable(1)]);
        assert_eq!(
            common_supported_versions(&[a, b]),
            vec![Version::stable(1), Version::stable(2), Version::stable(3)]
        );
    }

    #[test]
    fn bundle_intersects_members() {
        let a = plugin("a.io", &[Version::stable(1), Version::stable(2), Version::stable(3)]);
        let b = plugin("b.io", &[Version::stable(2), Version::stable(3)]);
        let bundle = Plugin::bundle("ab.io", Version::stable(1))
            .members([a, b])
            .build()
            .unwrap();
        assert!(bundle.is_bundle());
        assert_eq!(
            bundle.supported_project_versions(),
            &[Version::stable(2), Version::stable(3)]
        );
    }

    #[test]
    fn bundle_rejects_disjoint_members() {
        let a = plugin("a.io", &[Version::stable(2), Version::stable(3)]);
        let b = plugin("b.io", &[Version::stable(4)]);
        let result = Plugin::bundle("ab.io", Version::stable(1)).members([a, b]).build();
        assert_eq!(
            result,
            Err(DomainError::NoCommonVersion {
                bundle: "ab.io/v1".into(),
                members: vec!["a.io/v1".into(), "b.io/v1".into()],
            })
        );
    }

    #[test]
    fn nested_bundles_are_flattened() {
        let inner = Plugin::bundle("a.example.com", Version::stable(1))
            .members([p1(), p2()])
            .build()
            .unwrap();
        let outer = Plugin::bundle("b.example.com", Version::stable(1))
            .member(inner)
            .member(p3())
            .build()
            .unwrap();

        let names: Vec<&str> = outer.members().iter().map(Plugin::name).collect();
        assert_eq!(names, vec!["p1.example.com", "p2.example.com", "p3.example.com"]);
        assert!(outer.members().iter().all(|m| !m.is_bundle()));
    }

    #[test]
    fn flattening_is_idempotent() {
        let once = Plugin::bundle("a.example.com", Version::stable(1))
            .members([p1(), p3()])
            .build()
            .unwrap();
        let twice = Plugin::bundle("a.example.com", Version::stable(1))
            .member(once.clone())
            .build()
            .unwrap();
        assert_eq!(once.members(), twice.members());
        assert_eq!(
            once.supported_project_versions(),
            twice.supported_project_versions()
        );
    }

    #[test]
    fn bundle_unions_capabilities() {
        let init = Plugin::builder("init.io", Version::stable(1))
            .supports(Version::stable(3))
            .capability(Capability::Init)
            .build()
            .unwrap();
        let edit = Plugin::builder("edit.io", Version::stable(1))
            .supports(Version::stable(3))
            .capability(Capability::Edit)
            .build()
            .unwrap();
        let bundle = Plugin::bundle("both.io", Version::stable(1))
            .members([init, edit])
            .build()
            .unwrap();
        assert!(bundle.provides(Capability::Init));
        assert!(bundle.provides(Capability::Edit));
        assert!(!bundle.provides(Capability::CreateApi));
    }

    #[test]
    fn bundle_validates_identity() {
        let result = Plugin::bundle("Bad Name", Version::stable(1)).member(p1()).build();
        assert!(matches!(result, Err(DomainError::InvalidName { .. })));
    }
}
