//! Shared kernel for the Concierge services.
//!
//! Defines the configuration tree, the top-level error type, and the
//! conversation domain types used by every other crate.

pub mod config;
pub mod error;
pub mod types;

pub use config::ConciergeConfig;
pub use error::{ConciergeError, Result};
pub use types::{Author, Message, Transcript};
