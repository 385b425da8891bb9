//! Fixed conversational copy.
//!
//! The greeting is the only hand-authored message a fresh session sees;
//! the limit-reached message and the final-exchange notice are appended
//! by the engine when the exchange budget runs out.

use concierge_core::types::Message;

/// Out-of-band contact email offered when the bot bows out.
pub const SUPPORT_EMAIL: &str = "support@ctrlplustech.com";

/// Out-of-band contact phone number.
pub const SUPPORT_PHONE: &str = "+918220123488";

pub(crate) const GREETING_TEXT: &str = "Hi! I'm your AI assistant powered by Grok. I can help you with questions about our services or schedule an appointment. How can I help you today?";

pub(crate) const GREETING_OPTIONS: &[&str] = &[
    "Tell me about your services",
    "Schedule an appointment",
    "Student program details",
];

pub(crate) const LIMIT_REACHED_TEXT: &str = "\u{1f916} This AI bot has reached its conversation limit of 5 exchanges.\n\nFor further assistance, please contact us directly:\n\n\u{1f4e7} Email: support@ctrlplustech.com\n\u{1f4de} Phone: +91 8220123488\n\nOur team will be happy to help you with any questions or requirements you may have!";

pub(crate) const LIMIT_REACHED_OPTIONS: &[&str] = &["Contact Us", "Schedule Call", "Send Email"];

pub(crate) const FINAL_EXCHANGE_NOTICE: &str = "\n\n\u{26a0}\u{fe0f} Note: This is your final exchange with the AI bot. For further assistance, please contact us directly.";

/// The greeting shown when no prior transcript exists.
pub fn greeting() -> Message {
    Message::assistant(
        GREETING_TEXT,
        Some(GREETING_OPTIONS.iter().map(|s| s.to_string()).collect()),
    )
}

/// The canned reply for submissions past the exchange limit.
pub fn limit_reached() -> Message {
    Message::assistant(
        LIMIT_REACHED_TEXT,
        Some(LIMIT_REACHED_OPTIONS.iter().map(|s| s.to_string()).collect()),
    )
}
