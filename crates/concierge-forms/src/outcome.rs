//! Submission results.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// How the anti-abuse gate classified an accepted submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Review {
    /// The token verified cleanly.
    Verified,
    /// No usable token; accepted anyway and queued for a human look.
    Manual,
}

/// The single result type every submission path returns.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FormOutcome {
    pub success: bool,
    /// Top-level status line shown to the visitor.
    pub message: String,
    /// Per-field messages; present only on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, String>>,
    /// Present only on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review: Option<Review>,
}

impl FormOutcome {
    pub fn field_errors(errors: BTreeMap<String, String>) -> Self {
        Self {
            success: false,
            message: "Please fix the errors below".to_string(),
            errors: Some(errors),
            review: None,
        }
    }

    pub fn verification_failed() -> Self {
        let mut errors = BTreeMap::new();
        errors.insert(
            "recaptcha".to_string(),
            "reCAPTCHA verification failed".to_string(),
        );
        Self {
            success: false,
            message: "Security verification failed. Please try again.".to_string(),
            errors: Some(errors),
            review: None,
        }
    }

    pub fn accepted(message: impl Into<String>, review: Review) -> Self {
        Self {
            success: true,
            message: message.into(),
            errors: None,
            review: Some(review),
        }
    }
}
