//! The general contact form.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Deserialize;
use tracing::info;

use crate::outcome::FormOutcome;
use crate::pipeline::gate;
use crate::recaptcha::CaptchaVerifier;
use crate::validate::{require, require_email};

/// Incoming contact-form payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactSubmission {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
    /// Service checkboxes; optional.
    #[serde(default)]
    pub services: Vec<String>,
    #[serde(default)]
    pub recaptcha_token: Option<String>,
    /// Set by the client when the challenge script never became ready.
    #[serde(default)]
    pub recaptcha_client_error: bool,
}

impl ContactSubmission {
    fn validate(&self) -> BTreeMap<String, String> {
        let mut errors = BTreeMap::new();
        require(&mut errors, "name", &self.name, "Name is required");
        require_email(&mut errors, "email", &self.email);
        require(&mut errors, "subject", &self.subject, "Subject is required");
        require(&mut errors, "message", &self.message, "Message is required");
        errors
    }
}

/// Contact-form submission service.
pub struct ContactForm {
    verifier: Arc<dyn CaptchaVerifier>,
    min_score: f64,
}

impl ContactForm {
    /// Action name contact tokens are minted for.
    pub const ACTION: &'static str = "contact_form";

    pub fn new(verifier: Arc<dyn CaptchaVerifier>, min_score: f64) -> Self {
        Self { verifier, min_score }
    }

    /// Run the full pipeline for one submission.
    pub async fn submit(&self, submission: &ContactSubmission) -> FormOutcome {
        let review = match gate(
            submission.validate(),
            self.verifier.as_ref(),
            Self::ACTION,
            self.min_score,
            submission.recaptcha_token.as_deref(),
            submission.recaptcha_client_error,
        )
        .await
        {
            Ok(review) => review,
            Err(outcome) => return outcome,
        };

        // Submission side effect stands in for mail delivery.
        info!(
            name = %submission.name,
            email = %submission.email,
            subject = %submission.subject,
            services = submission.services.len(),
            review = ?review,
            "Contact form submitted"
        );

        FormOutcome::accepted(
            "Thank you for your message! We'll get back to you soon.",
            review,
        )
    }
}

// =============================================================================
// Tests
// =============================================================================
