//! Concierge API crate - axum HTTP server and route handlers.
//!
//! Exposes the chat session engine and the form pipelines to the
//! presentation shells: session open/submit/quick-reply/handoff, the two
//! form endpoints, and a health check.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
