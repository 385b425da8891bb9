//! Assistant gateway for the Concierge chat widgets.
//!
//! Produces assistant replies for user utterances: a remote
//! text-generation endpoint when configured, and a local keyword-matched
//! fallback table when the remote path fails or is disabled. Callers
//! never see an error from this crate — conversational continuity
//! survives upstream outages by design.

pub mod context;
pub mod fallback;
pub mod gateway;
pub mod options;

pub use context::RollingContext;
pub use fallback::FallbackResponder;
pub use gateway::{AssistantReply, GatewayClient, ReplyProvider};
pub use options::suggest_options;
