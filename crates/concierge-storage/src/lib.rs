//! Concierge storage crate - SQLite persistence for chat sessions.
//!
//! Provides a WAL-mode SQLite database with migrations, and the
//! `SessionRepository` that stores per-key transcripts, exchange
//! counters, and the one-shot cross-shell handoff flags.

pub mod db;
pub mod migrations;
pub mod repository;

pub use db::Database;
pub use repository::{SessionRepository, StoredSession};
