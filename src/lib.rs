//! IOC Fusion - multi-provider threat verdict scoring
//!
//! Converts per-provider threat-intel verdicts on an indicator of
//! compromise into one score, verdict and confidence grade, and records
//! the outcome in a history store.

pub mod constants;
pub mod logic;

pub use logic::scoring::{
    score, score_providers, ConfidenceLevel, NormalizedProviderResponse, ProcessedProvider,
    ProviderExecutionResult, ProviderStatus, ScoringEngine, ScoringInput, ScoringMeta,
    ScoringResult, ScoringRules, TrustLevel, TrustResolver, Verdict,
};

pub use logic::history::{HistoryLogger, HistoryOwner, HistoryRecord, SqliteHistoryLogger};
