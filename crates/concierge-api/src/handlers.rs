//! Route handler functions for all API endpoints.
//!
//! Each handler extracts path/body parameters via axum extractors,
//! interacts with AppState services, and returns JSON responses.

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use concierge_core::types::Message;
use concierge_forms::{ContactSubmission, FormOutcome, StudentApplication};
use concierge_session::{SessionState, SubmitOutcome};

use crate::error::ApiError;
use crate::state::AppState;

/// Longest accepted session key. Keys are shell identifiers, not user
/// content.
const MAX_SESSION_KEY_LENGTH: usize = 100;

// =============================================================================
// Request types
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct QuickReplyRequest {
    pub label: String,
}

#[derive(Debug, Deserialize)]
pub struct HandoffRequest {
    /// Session key of the shell the conversation continues in.
    pub target: String,
}

// =============================================================================
// Response types
// =============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    pub session_key: String,
    pub messages: Vec<Message>,
    pub exchange_count: u32,
    pub exchange_limit: u32,
    pub limit_reached: bool,
    pub state: SessionState,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExchangeResponse {
    /// The appended user message followed by the assistant reply.
    pub messages: Vec<Message>,
    pub exchange_count: u32,
    pub limit_reached: bool,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuickReplyResponse {
    /// Reserved contact label: the shell should navigate instead.
    Navigate { navigate: String },
    /// Anything else re-entered the submission flow.
    Exchange(ExchangeResponse),
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HandoffResponse {
    pub success: bool,
    pub target: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

// =============================================================================
// Handler functions
// =============================================================================

fn validate_key(key: &str) -> Result<(), ApiError> {
    if key.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "Session key must not be empty".to_string(),
        ));
    }
    if key.len() > MAX_SESSION_KEY_LENGTH {
        return Err(ApiError::BadRequest(format!(
            "Session key exceeds {} characters",
            MAX_SESSION_KEY_LENGTH
        )));
    }
    Ok(())
}

/// GET /health - liveness and uptime.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

/// GET /chat/{key} - open (restore, seed, or greet) the session.
pub async fn open_session(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<SessionResponse>, ApiError> {
    validate_key(&key)?;
    let session = state.engine.open(&key)?;
    let session_state = state.engine.state(&key)?;
    Ok(Json(SessionResponse {
        limit_reached: session.is_limit_reached(),
        session_key: session.session_key,
        messages: session.transcript,
        exchange_count: session.exchange_count,
        exchange_limit: session.exchange_limit,
        state: session_state,
    }))
}

/// POST /chat/{key}/messages - typed user submission.
pub async fn submit_message(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(req): Json<SubmitRequest>,
) -> Result<Json<ExchangeResponse>, ApiError> {
    validate_key(&key)?;
    match state.engine.submit(&key, &req.text).await? {
        SubmitOutcome::Replied {
            user,
            assistant,
            exchange_count,
            limit_reached,
        } => Ok(Json(ExchangeResponse {
            messages: vec![user, assistant],
            exchange_count,
            limit_reached,
        })),
        // Typed submissions never navigate.
        SubmitOutcome::Navigate { .. } => Err(ApiError::Internal(
            "unexpected navigation outcome for typed submission".to_string(),
        )),
    }
}

/// POST /chat/{key}/quick-reply - tapped quick-reply label.
pub async fn quick_reply(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(req): Json<QuickReplyRequest>,
) -> Result<Json<QuickReplyResponse>, ApiError> {
    validate_key(&key)?;
    match state.engine.quick_reply(&key, &req.label).await? {
        SubmitOutcome::Navigate { action } => Ok(Json(QuickReplyResponse::Navigate {
            navigate: action.uri(),
        })),
        SubmitOutcome::Replied {
            user,
            assistant,
            exchange_count,
            limit_reached,
        } => Ok(Json(QuickReplyResponse::Exchange(ExchangeResponse {
            messages: vec![user, assistant],
            exchange_count,
            limit_reached,
        }))),
    }
}

/// POST /chat/{key}/handoff - continue this conversation in another shell.
pub async fn request_handoff(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(req): Json<HandoffRequest>,
) -> Result<Json<HandoffResponse>, ApiError> {
    validate_key(&key)?;
    validate_key(&req.target)?;
    if req.target == key {
        return Err(ApiError::BadRequest(
            "Handoff target must differ from the source session".to_string(),
        ));
    }
    state.engine.request_handoff(&req.target, &key)?;
    Ok(Json(HandoffResponse {
        success: true,
        target: req.target,
    }))
}

/// POST /forms/contact - contact-form submission pipeline.
pub async fn submit_contact_form(
    State(state): State<AppState>,
    Json(submission): Json<ContactSubmission>,
) -> Json<FormOutcome> {
    Json(state.contact_form.submit(&submission).await)
}

/// POST /forms/student-program - mentorship application pipeline.
pub async fn submit_student_application(
    State(state): State<AppState>,
    Json(application): Json<StudentApplication>,
) -> Json<FormOutcome> {
    Json(state.student_form.submit(&application).await)
}
