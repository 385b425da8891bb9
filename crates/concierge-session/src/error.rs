//! Error types for the session engine.

use concierge_core::error::ConciergeError;

/// Errors from the conversational session engine.
///
/// Gateway failures never appear here — they are absorbed by the
/// assistant crate's fallback path. These variants cover caller mistakes
/// and storage I/O only.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("message cannot be empty")]
    EmptyMessage,
    #[error("message exceeds maximum length of {0} characters")]
    MessageTooLong(usize),
    #[error("a reply is already pending for this session")]
    ReplyPending,
    #[error("storage error: {0}")]
    Storage(String),
}

impl From<ConciergeError> for SessionError {
    fn from(err: ConciergeError) -> Self {
        SessionError::Storage(err.to_string())
    }
}
