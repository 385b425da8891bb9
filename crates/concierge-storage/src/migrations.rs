//! Database schema migrations.
//!
//! Applies the initial schema: the sessions table (one row per session
//! key), the handoffs table (one-shot seeding flags), and the
//! schema_migrations tracking table.

use rusqlite::Connection;
use tracing::info;

use concierge_core::error::ConciergeError;

/// Run all pending database migrations.
///
/// Currently implements the initial schema (version 1). Future migrations
/// can be added by checking the current version and applying incremental changes.
pub fn run_migrations(conn: &Connection) -> Result<(), ConciergeError> {
    // Create the migrations tracking table first.
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version     INTEGER PRIMARY KEY NOT NULL,
            name        TEXT NOT NULL,
            applied_at  INTEGER NOT NULL DEFAULT (strftime('%s', 'now'))
        );",
    )
    .map_err(|e| ConciergeError::Storage(format!("Failed to create migrations table: {}", e)))?;

    let current_version: i64 = conn
        .query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
            [],
            |row| row.get(0),
        )
        .map_err(|e| ConciergeError::Storage(format!("Failed to query migration version: {}", e)))?;

    if current_version < 1 {
        apply_v1(conn)?;
        info!("Applied migration v1: initial_schema");
    }

    Ok(())
}

/// Version 1: Initial schema.
fn apply_v1(conn: &Connection) -> Result<(), ConciergeError> {
    conn.execute_batch(
        "
        -- One row per session key. The transcript is a JSON array of
        -- messages; the exchange counter is stored alongside so the two
        -- can be written independently.
        CREATE TABLE IF NOT EXISTS sessions (
            session_key     TEXT PRIMARY KEY NOT NULL,
            transcript      TEXT NOT NULL DEFAULT '[]',
            exchange_count  INTEGER NOT NULL DEFAULT 0,
            updated_at      INTEGER NOT NULL DEFAULT (strftime('%s', 'now'))
        );

        -- One-shot seeding flags: 'the next session opened under
        -- target_key starts from source_key's transcript'. Consumed on
        -- read.
        CREATE TABLE IF NOT EXISTS handoffs (
            target_key  TEXT PRIMARY KEY NOT NULL,
            source_key  TEXT NOT NULL,
            created_at  INTEGER NOT NULL DEFAULT (strftime('%s', 'now'))
        );

        INSERT INTO schema_migrations (version, name) VALUES (1, 'initial_schema');
        ",
    )
    .map_err(|e| ConciergeError::Storage(format!("Failed to apply migration v1: {}", e)))?;

    Ok(())
}
