//! Session engine: the state machine behind every chat widget.
//!
//! Glues user input to transcript mutation and reply production, and
//! enforces the exchange-limit policy. Every transcript mutation is
//! persisted before control returns to the caller; the exchange counter
//! is persisted on every increment.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tracing::{debug, info};

use concierge_assistant::{ReplyProvider, RollingContext};
use concierge_core::config::ChatConfig;
use concierge_core::types::Message;
use concierge_storage::SessionRepository;

use crate::error::SessionError;
use crate::messages;
use crate::session::{ChatSession, SessionState};

// =============================================================================
// Outcomes
// =============================================================================

/// Out-of-band contact channels reachable from the limit-reached quick
/// replies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContactAction {
    Email,
    Call,
}

impl ContactAction {
    /// Map a reserved quick-reply label to its action, if it is one.
    fn from_label(label: &str) -> Option<Self> {
        match label {
            "Contact Us" | "Send Email" => Some(ContactAction::Email),
            "Schedule Call" => Some(ContactAction::Call),
            _ => None,
        }
    }

    /// The navigation target the shell should open.
    pub fn uri(&self) -> String {
        match self {
            ContactAction::Email => format!("mailto:{}", messages::SUPPORT_EMAIL),
            ContactAction::Call => format!("tel:{}", messages::SUPPORT_PHONE),
        }
    }
}

/// Result of a user submission or quick-reply tap.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// The transcript grew by one user message and one assistant message.
    Replied {
        user: Message,
        assistant: Message,
        exchange_count: u32,
        /// True once the exchange budget is spent; shells disable input.
        limit_reached: bool,
    },
    /// A reserved limit-reached label was tapped; the shell should
    /// navigate instead of sending anything.
    Navigate { action: ContactAction },
}

// =============================================================================
// SessionEngine
// =============================================================================

/// Orchestrates sessions across storage and the assistant gateway.
pub struct SessionEngine {
    repo: Arc<SessionRepository>,
    provider: Arc<dyn ReplyProvider>,
    config: ChatConfig,
    system_prompt: String,
    /// Keys with one outstanding reply; guards double submission.
    pending: Mutex<HashSet<String>>,
}

impl SessionEngine {
    pub fn new(
        repo: Arc<SessionRepository>,
        provider: Arc<dyn ReplyProvider>,
        config: ChatConfig,
        system_prompt: String,
    ) -> Self {
        Self {
            repo,
            provider,
            config,
            system_prompt,
            pending: Mutex::new(HashSet::new()),
        }
    }

    /// Open the session bound to `key`.
    ///
    /// Restores a stored transcript when one exists; otherwise consumes a
    /// pending handoff flag and seeds from the source shell's transcript;
    /// otherwise starts fresh with the greeting. The resulting state is
    /// persisted before returning.
    pub fn open(&self, key: &str) -> Result<ChatSession, SessionError> {
        if let Some(stored) = self.repo.load(key)? {
            return Ok(self.snapshot(key, stored.transcript, stored.exchange_count));
        }

        if let Some(source) = self.repo.take_handoff(key)? {
            if let Some(stored) = self.repo.load(&source)? {
                info!(key, source, "Seeding session from handoff");
                self.repo.save_transcript(key, &stored.transcript)?;
                self.repo.save_count(key, stored.exchange_count)?;
                return Ok(self.snapshot(key, stored.transcript, stored.exchange_count));
            }
            debug!(key, source, "Handoff source had no stored session");
        }

        let transcript = vec![messages::greeting()];
        self.repo.save_transcript(key, &transcript)?;
        self.repo.save_count(key, 0)?;
        Ok(self.snapshot(key, transcript, 0))
    }

    /// Record that the next session opened under `target_key` should
    /// continue `source_key`'s conversation. One-shot.
    pub fn request_handoff(&self, target_key: &str, source_key: &str) -> Result<(), SessionError> {
        self.repo.set_handoff(target_key, source_key)?;
        Ok(())
    }

    /// Handle a typed user submission.
    pub async fn submit(&self, key: &str, text: &str) -> Result<SubmitOutcome, SessionError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(SessionError::EmptyMessage);
        }
        if trimmed.chars().count() > self.config.max_message_length {
            return Err(SessionError::MessageTooLong(self.config.max_message_length));
        }

        let _guard = self.mark_pending(key)?;

        let session = self.open(key)?;
        let mut transcript = session.transcript;
        let count = session.exchange_count;

        let user = Message::user(trimmed);
        transcript.push(user.clone());
        self.repo.save_transcript(key, &transcript)?;

        // Past the budget: canned reply, no gateway call.
        if count >= self.config.exchange_limit {
            self.thinking_pause().await;
            let assistant = messages::limit_reached();
            transcript.push(assistant.clone());
            self.repo.save_transcript(key, &transcript)?;
            debug!(key, "Submission past exchange limit answered with canned reply");
            return Ok(SubmitOutcome::Replied {
                user,
                assistant,
                exchange_count: count,
                limit_reached: true,
            });
        }

        // Context is the conversation as it stood before this submission.
        let prior = &transcript[..transcript.len() - 1];
        let ctx =
            RollingContext::from_transcript(&self.system_prompt, prior, self.config.context_turns);

        self.thinking_pause().await;
        let reply = self.provider.reply(trimmed, &ctx).await;

        let new_count = count + 1;
        let mut reply_text = reply.text;
        if new_count == self.config.exchange_limit {
            // The boundary exchange is still answered by the gateway; only
            // the warning rides along with it.
            reply_text.push_str(messages::FINAL_EXCHANGE_NOTICE);
        }

        let assistant = Message::assistant(reply_text, reply.quick_replies);
        transcript.push(assistant.clone());
        self.repo.save_transcript(key, &transcript)?;
        self.repo.save_count(key, new_count)?;

        Ok(SubmitOutcome::Replied {
            user,
            assistant,
            exchange_count: new_count,
            limit_reached: new_count >= self.config.exchange_limit,
        })
    }

    /// Handle a quick-reply tap.
    ///
    /// Reserved contact labels in a limit-reached session navigate out of
    /// band; every other label re-enters the submission flow verbatim.
    pub async fn quick_reply(&self, key: &str, label: &str) -> Result<SubmitOutcome, SessionError> {
        if let Some(action) = ContactAction::from_label(label) {
            let session = self.open(key)?;
            if session.is_limit_reached() {
                debug!(key, label, "Reserved quick reply; navigating");
                return Ok(SubmitOutcome::Navigate { action });
            }
        }
        self.submit(key, label).await
    }

    /// Observable lifecycle state for a key.
    pub fn state(&self, key: &str) -> Result<SessionState, SessionError> {
        if self.pending_contains(key)? {
            return Ok(SessionState::AwaitingReply);
        }
        match self.repo.load(key)? {
            Some(stored) if stored.exchange_count >= self.config.exchange_limit => {
                Ok(SessionState::LimitReached)
            }
            _ => Ok(SessionState::Idle),
        }
    }

    // -- Private helpers --

    fn snapshot(&self, key: &str, transcript: Vec<Message>, exchange_count: u32) -> ChatSession {
        ChatSession {
            session_key: key.to_string(),
            transcript,
            exchange_count,
            exchange_limit: self.config.exchange_limit,
        }
    }

    async fn thinking_pause(&self) {
        if self.config.thinking_delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.config.thinking_delay_ms)).await;
        }
    }

    fn pending_contains(&self, key: &str) -> Result<bool, SessionError> {
        let pending = self
            .pending
            .lock()
            .map_err(|e| SessionError::Storage(format!("pending lock poisoned: {}", e)))?;
        Ok(pending.contains(key))
    }

    fn mark_pending(&self, key: &str) -> Result<PendingGuard<'_>, SessionError> {
        let mut pending = self
            .pending
            .lock()
            .map_err(|e| SessionError::Storage(format!("pending lock poisoned: {}", e)))?;
        if !pending.insert(key.to_string()) {
            return Err(SessionError::ReplyPending);
        }
        Ok(PendingGuard {
            pending: &self.pending,
            key: key.to_string(),
        })
    }
}

/// Clears the pending mark when a submission finishes, on every exit path.
struct PendingGuard<'a> {
    pending: &'a Mutex<HashSet<String>>,
    key: String,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        if let Ok(mut pending) = self.pending.lock() {
            pending.remove(&self.key);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
