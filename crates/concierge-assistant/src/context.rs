//! Rolling context sent alongside each utterance.
//!
//! Carries the fixed system prompt plus the last few transcript entries
//! so the remote model can resolve short follow-ups.

use concierge_core::types::{Author, Message};

/// The short context window attached to a gateway request.
#[derive(Debug, Clone, Default)]
pub struct RollingContext {
    /// System prompt framing the conversation.
    pub system_prompt: String,
    /// Most recent transcript entries, oldest first.
    pub recent: Vec<(Author, String)>,
}

impl RollingContext {
    /// Build a context from the system prompt and the tail of a transcript.
    pub fn from_transcript(system_prompt: &str, transcript: &[Message], turns: usize) -> Self {
        let start = transcript.len().saturating_sub(turns);
        let recent = transcript[start..]
            .iter()
            .map(|m| (m.author, m.text.clone()))
            .collect();
        Self {
            system_prompt: system_prompt.to_string(),
            recent,
        }
    }

    /// Render the recent turns as a plain-text block for the upstream
    /// request, or `None` when there is no history to carry.
    pub fn render_recent(&self) -> Option<String> {
        if self.recent.is_empty() {
            return None;
        }
        let lines: Vec<String> = self
            .recent
            .iter()
            .map(|(author, text)| {
                let who = match author {
                    Author::User => "user",
                    Author::Assistant => "assistant",
                };
                format!("{}: {}", who, text)
            })
            .collect();
        Some(format!("Previous conversation:\n{}", lines.join("\n")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use concierge_core::types::Message;

    #[test]
    fn test_empty_transcript_empty_context() {
        let ctx = RollingContext::from_transcript("prompt", &[], 3);
        assert!(ctx.recent.is_empty());
        assert!(ctx.render_recent().is_none());
    }

    #[test]
    fn test_takes_tail_of_transcript() {
        let transcript = vec![
            Message::assistant("greeting", None),
            Message::user("one"),
            Message::assistant("two", None),
            Message::user("three"),
        ];
        let ctx = RollingContext::from_transcript("prompt", &transcript, 2);
        assert_eq!(ctx.recent.len(), 2);
        assert_eq!(ctx.recent[0].1, "two");
        assert_eq!(ctx.recent[1].1, "three");
    }

    #[test]
    fn test_short_transcript_kept_whole() {
        let transcript = vec![Message::user("only")];
        let ctx = RollingContext::from_transcript("prompt", &transcript, 5);
        assert_eq!(ctx.recent.len(), 1);
    }

    #[test]
    fn test_render_labels_authors() {
        let transcript = vec![Message::user("hi"), Message::assistant("hello", None)];
        let ctx = RollingContext::from_transcript("prompt", &transcript, 3);
        let rendered = ctx.render_recent().unwrap();
        assert!(rendered.contains("user: hi"));
        assert!(rendered.contains("assistant: hello"));
        assert!(rendered.starts_with("Previous conversation:"));
    }
}
