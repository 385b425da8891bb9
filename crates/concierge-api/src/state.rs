//! Application state shared across all route handlers.
//!
//! AppState holds references to all services and shared resources.
//! It is passed to handlers via axum's State extractor.

use std::sync::Arc;
use std::time::Instant;

use concierge_assistant::{GatewayClient, ReplyProvider};
use concierge_core::config::ConciergeConfig;
use concierge_forms::{CaptchaVerifier, ContactForm, RecaptchaClient, StudentProgramForm};
use concierge_session::SessionEngine;
use concierge_storage::{Database, SessionRepository};

/// Shared application state.
///
/// All fields use `Arc` for cheap cloning across handler tasks.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<ConciergeConfig>,
    /// Conversational session engine.
    pub engine: Arc<SessionEngine>,
    /// Contact-form pipeline.
    pub contact_form: Arc<ContactForm>,
    /// Student-application pipeline.
    pub student_form: Arc<StudentProgramForm>,
    /// Server start time for uptime calculation.
    pub start_time: Instant,
}

impl AppState {
    /// Create an AppState with the live gateway client and reCAPTCHA
    /// verifier built from configuration.
    pub fn new(config: ConciergeConfig, database: Database) -> Self {
        let provider: Arc<dyn ReplyProvider> =
            Arc::new(GatewayClient::new(config.assistant.clone()));
        let verifier: Arc<dyn CaptchaVerifier> =
            Arc::new(RecaptchaClient::new(config.recaptcha.clone()));
        Self::with_collaborators(config, database, provider, verifier)
    }

    /// Create an AppState with explicit collaborators.
    ///
    /// Tests use this to inject scripted reply providers and verifiers.
    pub fn with_collaborators(
        config: ConciergeConfig,
        database: Database,
        provider: Arc<dyn ReplyProvider>,
        verifier: Arc<dyn CaptchaVerifier>,
    ) -> Self {
        let repo = Arc::new(SessionRepository::new(Arc::new(database)));
        let engine = Arc::new(SessionEngine::new(
            repo,
            provider,
            config.chat.clone(),
            config.assistant.system_prompt.clone(),
        ));
        let contact_form = Arc::new(ContactForm::new(
            Arc::clone(&verifier),
            config.recaptcha.min_score,
        ));
        let student_form = Arc::new(StudentProgramForm::new(
            verifier,
            config.recaptcha.min_score,
        ));

        Self {
            config: Arc::new(config),
            engine,
            contact_form,
            student_form,
            start_time: Instant::now(),
        }
    }
}
