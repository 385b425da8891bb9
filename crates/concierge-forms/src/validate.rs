//! Shared field validators.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid email regex"));

/// Record an error when the value is empty after trimming.
pub(crate) fn require(
    errors: &mut BTreeMap<String, String>,
    field: &str,
    value: &str,
    message: &str,
) {
    if value.trim().is_empty() {
        errors.insert(field.to_string(), message.to_string());
    }
}

/// Required email with format check; two distinct messages.
pub(crate) fn require_email(errors: &mut BTreeMap<String, String>, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.insert(field.to_string(), "Email is required".to_string());
    } else if !EMAIL_RE.is_match(value) {
        errors.insert(
            field.to_string(),
            "Please enter a valid email address".to_string(),
        );
    }
}
