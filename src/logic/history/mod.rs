//! History Module
//!
//! Persists fused verdicts per owner and indicator.
//!
//! ## Structure
//! - `types`: Owner, record and stored entry types
//! - `logger`: `HistoryLogger` trait + SQLite implementation

pub mod types;
pub mod logger;

pub use types::{HistoryEntry, HistoryOwner, HistoryRecord, SENTINEL_SCORE};
pub use logger::{HistoryError, HistoryLogger, SqliteHistoryLogger};
