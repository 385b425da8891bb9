use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// Enums
// =============================================================================

/// Who authored a chat message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Author {
    /// The site visitor typing into a widget.
    User,
    /// The assistant (remote generation or local fallback).
    Assistant,
}

// =============================================================================
// Message / Transcript
// =============================================================================

/// A single entry in a conversation transcript.
///
/// Ordering is insertion order; `created_at` is display metadata only.
/// `quick_replies` is only ever present on assistant messages and is never
/// an empty list — constructors normalize empty to `None`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub author: Author,
    pub text: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quick_replies: Option<Vec<String>>,
}

impl Message {
    /// Create a user message.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            author: Author::User,
            text: text.into(),
            created_at: Utc::now(),
            quick_replies: None,
        }
    }

    /// Create an assistant message with optional quick replies.
    ///
    /// An empty quick-reply list is normalized to `None` so that downstream
    /// code can treat `Some` as "at least one tappable option".
    pub fn assistant(text: impl Into<String>, quick_replies: Option<Vec<String>>) -> Self {
        let quick_replies = quick_replies.filter(|qr| !qr.is_empty());
        Self {
            id: Uuid::new_v4(),
            author: Author::Assistant,
            text: text.into(),
            created_at: Utc::now(),
            quick_replies,
        }
    }
}

/// Ordered, append-only sequence of messages for one session.
pub type Transcript = Vec<Message>;

// =============================================================================
// Tests
// =============================================================================
