use std::sync::LazyLock;

use regex::Regex;

use crate::domain::{error::DomainError, key};

const DNS1123_LABEL_FMT: &str = "[a-z0-9]([-a-z0-9]*[a-z0-9])?";
const DNS1123_LABEL_MAX_LENGTH: usize = 63;
const DNS1123_SUBDOMAIN_MAX_LENGTH: usize = 253;

const DNS1123_SUBDOMAIN_ERR: &str = "a lowercase RFC 1123 subdomain must consist of lower case \
alphanumeric characters, '-' or '.', and must start and end with an alphanumeric character";

static DNS1123_SUBDOMAIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^{DNS1123_LABEL_FMT}(\.{DNS1123_LABEL_FMT})*$"))
        .expect("subdomain pattern is a valid regex")
});

/// Centralized domain validation.
///
/// All validation logic lives here, not scattered across entities.
pub struct DomainValidator;

impl DomainValidator {
    /// Check a plugin name against the DNS-1123 subdomain grammar, including
    /// the 63 character limit of each dot-separated label.
    ///
    /// Returns every violated rule; an empty list means the name is valid.
    pub fn dns1123_subdomain(value: &str) -> Vec<String> {
        let mut errs = Vec::new();
        if value.len() > DNS1123_SUBDOMAIN_MAX_LENGTH {
            errs.push(format!(
                "must be no more than {DNS1123_SUBDOMAIN_MAX_LENGTH} characters"
            ));
        }
        if value.split('.').any(|label| label.len() > DNS1123_LABEL_MAX_LENGTH) {
            errs.push(format!(
                "must be no more than {DNS1123_LABEL_MAX_LENGTH} characters"
            ));
        }
        if !DNS1123_SUBDOMAIN.is_match(value) {
            errs.push(format!("{DNS1123_SUBDOMAIN_ERR} (e.g. 'example.com')"));
        }
        errs
    }

    pub fn validate_key(key: &str) -> Result<(), DomainError> {
        key::validate_key(key)
    }
}
