//! History Types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::logic::scoring::{ScoringResult, Verdict};

/// Score stored when the fused score is null
pub const SENTINEL_SCORE: i64 = 0;

/// Who asked for the lookup (user, org, api key...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryOwner {
    #[serde(rename = "type")]
    pub owner_type: String,
    pub id: String,
}

impl HistoryOwner {
    pub fn new(owner_type: &str, id: &str) -> Self {
        Self {
            owner_type: owner_type.to_string(),
            id: id.to_string(),
        }
    }
}

/// One row to insert. `verdict` and `score` are never null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub owner: HistoryOwner,
    pub ioc_type: String,
    pub ioc_value: String,
    pub verdict: String,
    pub score: i64,
}

impl HistoryRecord {
    /// Build a row from a scoring result, substituting the sentinel
    /// (`score = 0`, `verdict = "unknown"`) when there was no usable evidence
    pub fn from_result(
        owner: HistoryOwner,
        ioc_type: &str,
        ioc_value: &str,
        result: &ScoringResult,
    ) -> Self {
        let (verdict, score) = match result.final_score {
            Some(score) => (result.verdict, i64::from(score)),
            None => (Verdict::Unknown, SENTINEL_SCORE),
        };

        Self {
            owner,
            ioc_type: ioc_type.to_string(),
            ioc_value: ioc_value.to_string(),
            verdict: verdict.as_str().to_string(),
            score,
        }
    }
}

/// A stored row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: i64,
    pub owner: HistoryOwner,
    pub ioc_type: String,
    pub ioc_value: String,
    pub verdict: String,
    pub score: i64,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::scoring::{ConfidenceLevel, ScoringMeta};

    fn result(final_score: Option<u8>, verdict: Verdict) -> ScoringResult {
        ScoringResult {
            final_score,
            verdict,
            confidence: ConfidenceLevel::Low,
            processed_providers: vec![],
            meta: ScoringMeta::default(),
        }
    }

    #[test]
    fn test_record_from_scored_result() {
        let record = HistoryRecord::from_result(
            HistoryOwner::new("user", "42"),
            "domain",
            "evil.example",
            &result(Some(85), Verdict::Malicious),
        );
        assert_eq!(record.verdict, "malicious");
        assert_eq!(record.score, 85);
        assert_eq!(record.ioc_value, "evil.example");
    }

    #[test]
    fn test_record_substitutes_sentinel() {
        let record = HistoryRecord::from_result(
            HistoryOwner::new("user", "42"),
            "sha256",
            "abc",
            &result(None, Verdict::Unknown),
        );
        assert_eq!(record.verdict, "unknown");
        assert_eq!(record.score, SENTINEL_SCORE);
    }

    #[test]
    fn test_owner_wire_format() {
        let value = serde_json::to_value(HistoryOwner::new("org", "7")).unwrap();
        assert_eq!(value["type"], "org");
        assert_eq!(value["id"], "7");
    }
}
