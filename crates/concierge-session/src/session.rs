//! Session state types.

use serde::{Deserialize, Serialize};

use concierge_core::types::Transcript;

/// Where a session sits in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// Ready to accept a submission.
    Idle,
    /// One gateway call outstanding; further submissions are rejected.
    AwaitingReply,
    /// The exchange budget is spent; submissions get the canned reply.
    LimitReached,
}

/// A snapshot of one conversational session.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatSession {
    /// Durable storage slot this session binds to.
    pub session_key: String,
    /// Append-only message history, oldest first.
    pub transcript: Transcript,
    /// Completed user->assistant round trips so far.
    pub exchange_count: u32,
    /// Round trips allowed in total.
    pub exchange_limit: u32,
}

impl ChatSession {
    /// Whether further submissions will receive the canned limit reply.
    pub fn is_limit_reached(&self) -> bool {
        self.exchange_count >= self.exchange_limit
    }

    /// Gateway-backed exchanges still available.
    pub fn remaining_exchanges(&self) -> u32 {
        self.exchange_limit.saturating_sub(self.exchange_count)
    }

    /// Lifecycle state as observable from the durable counter alone.
    ///
    /// `AwaitingReply` is transient and tracked by the engine, not here.
    pub fn state(&self) -> SessionState {
        if self.is_limit_reached() {
            SessionState::LimitReached
        } else {
            SessionState::Idle
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_session(count: u32, limit: u32) -> ChatSession {
        ChatSession {
            session_key: "floatingChat".to_string(),
            transcript: Vec::new(),
            exchange_count: count,
            exchange_limit: limit,
        }
    }

    #[test]
    fn test_fresh_session_idle() {
        let s = make_session(0, 5);
        assert!(!s.is_limit_reached());
        assert_eq!(s.remaining_exchanges(), 5);
        assert_eq!(s.state(), SessionState::Idle);
    }

    #[test]
    fn test_at_limit() {
        let s = make_session(5, 5);
        assert!(s.is_limit_reached());
        assert_eq!(s.remaining_exchanges(), 0);
        assert_eq!(s.state(), SessionState::LimitReached);
    }

    #[test]
    fn test_over_limit_saturates() {
        let s = make_session(7, 5);
        assert!(s.is_limit_reached());
        assert_eq!(s.remaining_exchanges(), 0);
    }

    #[test]
    fn test_one_below_limit() {
        let s = make_session(4, 5);
        assert!(!s.is_limit_reached());
        assert_eq!(s.remaining_exchanges(), 1);
    }
}
