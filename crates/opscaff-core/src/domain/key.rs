//! Plugin key codec.
//!
//! A key is `name` or `name/v<version>`, e.g. `go.kubebuilder.io/v4`.
//! The part of the name before the first `.` is its short name (`go`);
//! a name with no `.` is a short name itself.

use crate::domain::{
    entities::Plugin,
    error::DomainError,
    validation::DomainValidator,
    value_objects::Version,
};

/// Join a name and a version into a key.
///
/// An empty `version` yields the bare name. A leading `v` on `version`
/// is normalized so both `"4"` and `"v4"` give `name/v4`.
pub fn key(name: &str, version: &str) -> String {
    if version.is_empty() {
        return name.to_string();
    }
    format!("{name}/v{}", version.trim_start_matches('v'))
}

/// Canonical key of a plugin.
pub fn key_for(plugin: &Plugin) -> String {
    key(plugin.name(), &plugin.version().to_string())
}

/// Split a key on its first `/`; the version part is empty when absent.
pub fn split_key(key: &str) -> (&str, &str) {
    key.split_once('/').unwrap_or((key, ""))
}

/// The part of `name` before the first `.`.
pub fn short_name(name: &str) -> &str {
    name.split_once('.').map_or(name, |(short, _)| short)
}

pub fn is_fully_qualified(name: &str) -> bool {
    short_name(name) != name
}

pub fn validate_name(name: &str) -> Result<(), DomainError> {
    let reasons = DomainValidator::dns1123_subdomain(name);
    if reasons.is_empty() {
        Ok(())
    } else {
        Err(DomainError::InvalidName {
            name: name.to_string(),
            reasons,
        })
    }
}

/// A key is valid when its name is valid and its version, if any, parses.
pub fn validate_key(key: &str) -> Result<(), DomainError> {
    let (name, version) = split_key(key);
    validate_name(name)?;
    if !version.is_empty() {
        Version::parse(version).map_err(|e| DomainError::malformed_version(version, e))?;
    }
    Ok(())
}

/// Parse the comma separated `--plugins` format.
pub fn parse_key_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_normalizes_prefix() {
        assert_eq!(key("go.kubebuilder.io", "v4"), "go.kubebuilder.io/v4");
        assert_eq!(key("go.kubebuilder.io", "4"), "go.kubebuilder.io/v4");
        assert_eq!(key("go.kubebuilder.io", "3-alpha"), "go.kubebuilder.io/v3-alpha");
        assert_eq!(key("go.kubebuilder.io", ""), "go.kubebuilder.io");
    }

    #[test]
    fn split_is_inverse_of_key() {
        for (name, version) in [("go.kubebuilder.io", "v4"), ("go", "v1-beta"), ("go", "")] {
            assert_eq!(split_key(&key(name, version)), (name, version));
        }
    }

    #[test]
    fn split_uses_first_slash() {
        assert_eq!(split_key("a/b/c"), ("a", "b/c"));
    }

    #[test]
    fn short_names() {
        assert_eq!(short_name("go.kubebuilder.io"), "go");
        assert_eq!(short_name("go"), "go");
        assert!(is_fully_qualified("go.kubebuilder.io"));
        assert!(!is_fully_qualified("go"));
    }

    #[test]
    fn validate_key_checks_both_halves() {
        assert!(validate_key("go.kubebuilder.io/v4").is_ok());
        assert!(validate_key("go").is_ok());
        assert!(matches!(
            validate_key("Go/v4"),
            Err(DomainError::InvalidName { .. })
        ));
        assert!(matches!(
            validate_key("go/v0"),
            Err(DomainError::MalformedVersion { .. })
        ));
        // A trailing slash carries no version.
        assert!(validate_key("go/").is_ok());
    }

    #[test]
    fn key_list_trims_and_drops_empties() {
        assert_eq!(
            parse_key_list(" go/v4 , ,kustomize.common.kubebuilder.io/v2,"),
            vec!["go/v4", "kustomize.common.kubebuilder.io/v2"]
        );
        assert!(parse_key_list("").is_empty());
    }
}
