//! Conversational session management for the Concierge chat widgets.
//!
//! Owns the transcript, the exchange-limit policy, and the orchestration
//! between durable session storage and the assistant gateway. The three
//! widget shells (floating, main-page, help-center) consume this crate
//! identically and differ only by session key.

pub mod engine;
pub mod error;
pub mod messages;
pub mod session;

pub use engine::{ContactAction, SessionEngine, SubmitOutcome};
pub use error::SessionError;
pub use session::{ChatSession, SessionState};
