//! The student-program application form.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Deserialize;
use tracing::info;

use crate::outcome::FormOutcome;
use crate::pipeline::gate;
use crate::recaptcha::CaptchaVerifier;
use crate::validate::{require, require_email};

/// Incoming mentorship-program application payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StudentApplication {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub university: String,
    #[serde(default)]
    pub graduation_year: String,
    #[serde(default)]
    pub major: String,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub motivation: String,
    /// Uploaded resume size in bytes; zero means no file arrived.
    #[serde(default)]
    pub resume_size: u64,
    /// Technology checkboxes; optional.
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub recaptcha_token: Option<String>,
    #[serde(default)]
    pub recaptcha_client_error: bool,
}

impl StudentApplication {
    fn validate(&self) -> BTreeMap<String, String> {
        let mut errors = BTreeMap::new();
        require(&mut errors, "first_name", &self.first_name, "First name is required");
        require(&mut errors, "last_name", &self.last_name, "Last name is required");
        require_email(&mut errors, "email", &self.email);
        require(&mut errors, "university", &self.university, "University is required");
        require(
            &mut errors,
            "graduation_year",
            &self.graduation_year,
            "Graduation year is required",
        );
        require(&mut errors, "major", &self.major, "Major is required");
        require(
            &mut errors,
            "experience",
            &self.experience,
            "Experience description is required",
        );
        require(&mut errors, "motivation", &self.motivation, "Motivation is required");
        if self.resume_size == 0 {
            errors.insert("resume".to_string(), "Resume is required".to_string());
        }
        errors
    }
}

/// Student-application submission service.
pub struct StudentProgramForm {
    verifier: Arc<dyn CaptchaVerifier>,
    min_score: f64,
}

impl StudentProgramForm {
    /// Action name application tokens are minted for.
    pub const ACTION: &'static str = "student_application";

    pub fn new(verifier: Arc<dyn CaptchaVerifier>, min_score: f64) -> Self {
        Self { verifier, min_score }
    }

    /// Run the full pipeline for one application.
    pub async fn submit(&self, application: &StudentApplication) -> FormOutcome {
        let review = match gate(
            application.validate(),
            self.verifier.as_ref(),
            Self::ACTION,
            self.min_score,
            application.recaptcha_token.as_deref(),
            application.recaptcha_client_error,
        )
        .await
        {
            Ok(review) => review,
            Err(outcome) => return outcome,
        };

        // Side effect stands in for persistence and the resume upload.
        info!(
            first_name = %application.first_name,
            last_name = %application.last_name,
            university = %application.university,
            resume_size = application.resume_size,
            technologies = application.technologies.len(),
            review = ?review,
            "Student program application submitted"
        );

        FormOutcome::accepted(
            "Application submitted successfully! We'll review it and get back to you within 3-5 business days.",
            review,
        )
    }
}

// =============================================================================
// Tests
// =============================================================================
