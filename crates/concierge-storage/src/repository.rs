//! Session persistence keyed by session key.
//!
//! Each presentation shell binds one session key; this repository stores
//! its transcript (as JSON) and exchange counter, and the one-shot
//! handoff flags used to continue a conversation in a different shell.

use std::sync::Arc;

use rusqlite::OptionalExtension;
use tracing::warn;

use concierge_core::error::ConciergeError;
use concierge_core::types::Transcript;

use crate::db::Database;

/// A session's durable state as read back from storage.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredSession {
    pub transcript: Transcript,
    pub exchange_count: u32,
}

/// Repository for chat session state.
pub struct SessionRepository {
    db: Arc<Database>,
}

impl SessionRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Load the stored transcript and counter for a key.
    ///
    /// Returns `Ok(None)` when no row exists or when the stored transcript
    /// fails to parse — a corrupt row is treated as "no prior session",
    /// never surfaced to the caller.
    pub fn load(&self, session_key: &str) -> Result<Option<StoredSession>, ConciergeError> {
        let row: Option<(String, u32)> = self.db.with_conn(|conn| {
            conn.query_row(
                "SELECT transcript, exchange_count FROM sessions WHERE session_key = ?1",
                rusqlite::params![session_key],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()
            .map_err(|e| ConciergeError::Storage(format!("Failed to load session: {}", e)))
        })?;

        let Some((raw, exchange_count)) = row else {
            return Ok(None);
        };

        match serde_json::from_str::<Transcript>(&raw) {
            Ok(transcript) => Ok(Some(StoredSession {
                transcript,
                exchange_count,
            })),
            Err(e) => {
                warn!(session_key, error = %e, "Stored transcript unreadable; starting fresh");
                Ok(None)
            }
        }
    }

    /// Overwrite the stored transcript for a key, preserving the counter.
    pub fn save_transcript(
        &self,
        session_key: &str,
        transcript: &Transcript,
    ) -> Result<(), ConciergeError> {
        let json = serde_json::to_string(transcript)?;
        self.db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO sessions (session_key, transcript, updated_at)
                 VALUES (?1, ?2, strftime('%s', 'now'))
                 ON CONFLICT(session_key) DO UPDATE SET
                     transcript = excluded.transcript,
                     updated_at = excluded.updated_at",
                rusqlite::params![session_key, json],
            )
            .map_err(|e| ConciergeError::Storage(format!("Failed to save transcript: {}", e)))?;
            Ok(())
        })
    }

    /// Overwrite the stored exchange counter for a key, preserving the
    /// transcript.
    pub fn save_count(&self, session_key: &str, exchange_count: u32) -> Result<(), ConciergeError> {
        self.db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO sessions (session_key, exchange_count, updated_at)
                 VALUES (?1, ?2, strftime('%s', 'now'))
                 ON CONFLICT(session_key) DO UPDATE SET
                     exchange_count = excluded.exchange_count,
                     updated_at = excluded.updated_at",
                rusqlite::params![session_key, exchange_count],
            )
            .map_err(|e| ConciergeError::Storage(format!("Failed to save counter: {}", e)))?;
            Ok(())
        })
    }

    /// Delete a session row entirely.
    pub fn delete(&self, session_key: &str) -> Result<(), ConciergeError> {
        self.db.with_conn(|conn| {
            conn.execute(
                "DELETE FROM sessions WHERE session_key = ?1",
                rusqlite::params![session_key],
            )
            .map_err(|e| ConciergeError::Storage(format!("Failed to delete session: {}", e)))?;
            Ok(())
        })
    }

    /// Mark that the next session opened under `target_key` should be
    /// seeded from `source_key`'s stored transcript.
    pub fn set_handoff(&self, target_key: &str, source_key: &str) -> Result<(), ConciergeError> {
        self.db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO handoffs (target_key, source_key)
                 VALUES (?1, ?2)
                 ON CONFLICT(target_key) DO UPDATE SET
                     source_key = excluded.source_key,
                     created_at = strftime('%s', 'now')",
                rusqlite::params![target_key, source_key],
            )
            .map_err(|e| ConciergeError::Storage(format!("Failed to set handoff: {}", e)))?;
            Ok(())
        })
    }

    /// Consume the handoff flag for `target_key`, if any.
    ///
    /// The flag is cleared on read; a second call returns `None`.
    pub fn take_handoff(&self, target_key: &str) -> Result<Option<String>, ConciergeError> {
        self.db.with_conn(|conn| {
            let source: Option<String> = conn
                .query_row(
                    "SELECT source_key FROM handoffs WHERE target_key = ?1",
                    rusqlite::params![target_key],
                    |row| row.get(0),
                )
                .optional()
                .map_err(|e| ConciergeError::Storage(format!("Failed to read handoff: {}", e)))?;

            if source.is_some() {
                conn.execute(
                    "DELETE FROM handoffs WHERE target_key = ?1",
                    rusqlite::params![target_key],
                )
                .map_err(|e| ConciergeError::Storage(format!("Failed to clear handoff: {}", e)))?;
            }

            Ok(source)
        })
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use concierge_core::types::Message;

    fn make_repo() -> SessionRepository {
        SessionRepository::new(Arc::new(Database::in_memory().unwrap()))
    }

    fn make_transcript(len: usize) -> Transcript {
        (0..len)
            .map(|i| {
                if i % 2 == 0 {
                    Message::assistant(format!("reply {}", i), Some(vec!["Opt".to_string()]))
                } else {
                    Message::user(format!("question {}", i))
                }
            })
            .collect()
    }

    // ---- Load / save ----

    #[test]
    fn test_load_missing_key_returns_none() {
        let repo = make_repo();
        assert!(repo.load("floatingChat").unwrap().is_none());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let repo = make_repo();
        let transcript = make_transcript(4);
        repo.save_transcript("mainPageChat", &transcript).unwrap();

        let stored = repo.load("mainPageChat").unwrap().unwrap();
        assert_eq!(stored.transcript, transcript);
        assert_eq!(stored.exchange_count, 0);
    }

    #[test]
    fn test_reload_preserves_length_and_order() {
        let repo = make_repo();
        let transcript = make_transcript(7);
        repo.save_transcript("helpCenterChat", &transcript).unwrap();

        let stored = repo.load("helpCenterChat").unwrap().unwrap();
        assert_eq!(stored.transcript.len(), 7);
        for (a, b) in stored.transcript.iter().zip(transcript.iter()) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.text, b.text);
        }
    }

    #[test]
    fn test_save_overwrites_previous_transcript() {
        let repo = make_repo();
        repo.save_transcript("k", &make_transcript(2)).unwrap();
        let longer = make_transcript(5);
        repo.save_transcript("k", &longer).unwrap();

        let stored = repo.load("k").unwrap().unwrap();
        assert_eq!(stored.transcript, longer);
    }

    #[test]
    fn test_keys_are_independent() {
        let repo = make_repo();
        let a = make_transcript(2);
        let b = make_transcript(3);
        repo.save_transcript("floatingChat", &a).unwrap();
        repo.save_transcript("mainPageChat", &b).unwrap();

        assert_eq!(repo.load("floatingChat").unwrap().unwrap().transcript, a);
        assert_eq!(repo.load("mainPageChat").unwrap().unwrap().transcript, b);
    }

    // ---- Counter ----

    #[test]
    fn test_save_count_preserves_transcript() {
        let repo = make_repo();
        let transcript = make_transcript(3);
        repo.save_transcript("k", &transcript).unwrap();
        repo.save_count("k", 4).unwrap();

        let stored = repo.load("k").unwrap().unwrap();
        assert_eq!(stored.exchange_count, 4);
        assert_eq!(stored.transcript, transcript);
    }

    #[test]
    fn test_save_transcript_preserves_count() {
        let repo = make_repo();
        repo.save_count("k", 2).unwrap();
        repo.save_transcript("k", &make_transcript(1)).unwrap();

        let stored = repo.load("k").unwrap().unwrap();
        assert_eq!(stored.exchange_count, 2);
    }

    #[test]
    fn test_save_count_before_transcript_creates_row() {
        let repo = make_repo();
        repo.save_count("fresh", 1).unwrap();
        let stored = repo.load("fresh").unwrap().unwrap();
        assert_eq!(stored.exchange_count, 1);
        assert!(stored.transcript.is_empty());
    }

    // ---- Corruption ----

    #[test]
    fn test_corrupt_transcript_treated_as_absent() {
        let repo = make_repo();
        repo.db
            .with_conn(|conn| {
                conn.execute(
                    "INSERT INTO sessions (session_key, transcript, exchange_count)
                     VALUES ('broken', '{not json', 3)",
                    [],
                )
                .map_err(|e| ConciergeError::Storage(e.to_string()))?;
                Ok(())
            })
            .unwrap();

        assert!(repo.load("broken").unwrap().is_none());
    }

    #[test]
    fn test_wrong_shape_transcript_treated_as_absent() {
        let repo = make_repo();
        repo.db
            .with_conn(|conn| {
                conn.execute(
                    "INSERT INTO sessions (session_key, transcript, exchange_count)
                     VALUES ('odd', '{\"not\": \"an array\"}', 0)",
                    [],
                )
                .map_err(|e| ConciergeError::Storage(e.to_string()))?;
                Ok(())
            })
            .unwrap();

        assert!(repo.load("odd").unwrap().is_none());
    }

    // ---- Delete ----

    #[test]
    fn test_delete_removes_row() {
        let repo = make_repo();
        repo.save_transcript("k", &make_transcript(1)).unwrap();
        repo.delete("k").unwrap();
        assert!(repo.load("k").unwrap().is_none());
    }

    #[test]
    fn test_delete_missing_key_ok() {
        let repo = make_repo();
        assert!(repo.delete("ghost").is_ok());
    }

    // ---- Handoff ----

    #[test]
    fn test_take_handoff_missing_returns_none() {
        let repo = make_repo();
        assert!(repo.take_handoff("helpCenterChat").unwrap().is_none());
    }

    #[test]
    fn test_handoff_is_one_shot() {
        let repo = make_repo();
        repo.set_handoff("helpCenterChat", "mainPageChat").unwrap();

        let first = repo.take_handoff("helpCenterChat").unwrap();
        assert_eq!(first.as_deref(), Some("mainPageChat"));

        let second = repo.take_handoff("helpCenterChat").unwrap();
        assert!(second.is_none());
    }

    #[test]
    fn test_handoff_overwrite_keeps_latest_source() {
        let repo = make_repo();
        repo.set_handoff("helpCenterChat", "mainPageChat").unwrap();
        repo.set_handoff("helpCenterChat", "floatingChat").unwrap();

        let taken = repo.take_handoff("helpCenterChat").unwrap();
        assert_eq!(taken.as_deref(), Some("floatingChat"));
    }

    #[test]
    fn test_handoff_keys_independent() {
        let repo = make_repo();
        repo.set_handoff("helpCenterChat", "mainPageChat").unwrap();
        assert!(repo.take_handoff("faqChat").unwrap().is_none());
        assert!(repo.take_handoff("helpCenterChat").unwrap().is_some());
    }

    // ---- Unicode / formatting survives the round trip ----

    #[test]
    fn test_round_trip_preserves_line_breaks_and_glyphs() {
        let repo = make_repo();
        let transcript: Transcript = vec![Message::assistant(
            "We offer:\n\n\u{2022} Web Design\n\u{1f4c5} Book online",
            Some(vec!["Web Development".to_string()]),
        )];
        repo.save_transcript("k", &transcript).unwrap();

        let stored = repo.load("k").unwrap().unwrap();
        assert_eq!(stored.transcript[0].text, transcript[0].text);
    }
}
