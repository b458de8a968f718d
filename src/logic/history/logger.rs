//! IOC History Logger
//!
//! Records every fused verdict in a SQLite table. Inserts are never
//! retried: a duplicate row would corrupt the history, so a failure goes
//! straight back to the caller.

use std::path::Path;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rusqlite::{params, Connection};

use super::types::{HistoryEntry, HistoryOwner, HistoryRecord};

// ============================================================================
// SCHEMA
// ============================================================================

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS ioc_history (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    owner_type  TEXT NOT NULL,
    owner_id    TEXT NOT NULL,
    ioc_type    TEXT NOT NULL,
    ioc_value   TEXT NOT NULL,
    verdict     TEXT NOT NULL,
    score       INTEGER NOT NULL,
    created_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
);
CREATE INDEX IF NOT EXISTS idx_ioc_history_owner
    ON ioc_history (owner_type, owner_id, created_at);
";

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("history database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("failed to create history directory: {0}")]
    Io(#[from] std::io::Error),
    #[error("bad timestamp '{value}' in history row: {source}")]
    Timestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

// ============================================================================
// LOGGER
// ============================================================================

/// Sink for verdict history
pub trait HistoryLogger: Send + Sync {
    fn log_ioc_history(
        &self,
        owner: &HistoryOwner,
        ioc_type: &str,
        ioc_value: &str,
        verdict: &str,
        score: i64,
    ) -> Result<(), HistoryError>;

    fn record(&self, record: &HistoryRecord) -> Result<(), HistoryError> {
        self.log_ioc_history(
            &record.owner,
            &record.ioc_type,
            &record.ioc_value,
            &record.verdict,
            record.score,
        )
    }
}

/// SQLite-backed history
pub struct SqliteHistoryLogger {
    conn: Mutex<Connection>,
}

impl SqliteHistoryLogger {
    /// Open (or create) the database at `path`
    pub fn open(path: &Path) -> Result<Self, HistoryError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path)?;
        log::info!("Opened IOC history database: {:?}", path);
        Self::with_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self, HistoryError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, HistoryError> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Most recent rows for an owner, newest first
    pub fn recent_for_owner(
        &self,
        owner: &HistoryOwner,
        limit: usize,
    ) -> Result<Vec<HistoryEntry>, HistoryError> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(
            "SELECT id, owner_type, owner_id, ioc_type, ioc_value, verdict, score, created_at
             FROM ioc_history
             WHERE owner_type = ?1 AND owner_id = ?2
             ORDER BY created_at DESC, id DESC
             LIMIT ?3",
        )?;

        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = stmt.query_map(params![owner.owner_type, owner.id, limit], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
                row.get::<_, String>(5)?,
                row.get::<_, i64>(6)?,
                row.get::<_, String>(7)?,
            ))
        })?;

        let mut entries = Vec::new();
        for row in rows {
            let (id, owner_type, owner_id, ioc_type, ioc_value, verdict, score, created_at) = row?;
            entries.push(HistoryEntry {
                id,
                owner: HistoryOwner {
                    owner_type,
                    id: owner_id,
                },
                ioc_type,
                ioc_value,
                verdict,
                score,
                created_at: parse_timestamp(&created_at)?,
            });
        }

        Ok(entries)
    }

    /// Total rows stored
    pub fn count(&self) -> Result<u64, HistoryError> {
        let conn = self.conn.lock();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM ioc_history", [], |row| row.get(0))?;
        Ok(count.max(0) as u64)
    }
}

impl HistoryLogger for SqliteHistoryLogger {
    fn log_ioc_history(
        &self,
        owner: &HistoryOwner,
        ioc_type: &str,
        ioc_value: &str,
        verdict: &str,
        score: i64,
    ) -> Result<(), HistoryError> {
        let conn = self.conn.lock();
        conn.execute(
            "INSERT INTO ioc_history (owner_type, owner_id, ioc_type, ioc_value, verdict, score)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![owner.owner_type, owner.id, ioc_type, ioc_value, verdict, score],
        )
        .map_err(|e| {
            log::error!("Failed to record history for {} {}: {}", ioc_type, ioc_value, e);
            HistoryError::from(e)
        })?;

        log::info!(
            "Recorded {} {} = {} ({}) for {}:{}",
            ioc_type,
            ioc_value,
            verdict,
            score,
            owner.owner_type,
            owner.id
        );
        Ok(())
    }
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, HistoryError> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|source| HistoryError::Timestamp {
            value: value.to_string(),
            source,
        })
}

// ============================================================================
// TESTS
// ============================================================================
