//! Scoring Types
//!
//! Core types for provider results and the fused verdict.
//! No decision logic here - only data structures and their wire format.

use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer, Serialize};

// ============================================================================
// VERDICT
// ============================================================================

/// Categorical judgment on an indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    /// Known good
    Benign,
    /// Worth a closer look
    Suspicious,
    /// Known bad
    Malicious,
    /// No usable judgment
    #[default]
    Unknown,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Benign => "benign",
            Verdict::Suspicious => "suspicious",
            Verdict::Malicious => "malicious",
            Verdict::Unknown => "unknown",
        }
    }

    /// Lenient parse: anything unrecognized is `Unknown`.
    /// Case and surrounding whitespace are ignored on purpose, so " Benign\n"
    /// from a sloppy provider adapter still counts as benign.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "benign" => Verdict::Benign,
            "suspicious" => Verdict::Suspicious,
            "malicious" => Verdict::Malicious,
            _ => Verdict::Unknown,
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// LEVELS
// ============================================================================

/// Certainty of a single signal, or of the fused result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

impl ConfidenceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceLevel::High => "high",
            ConfidenceLevel::Medium => "medium",
            ConfidenceLevel::Low => "low",
        }
    }
}

impl std::fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Reliability of a provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrustLevel {
    High,
    #[default]
    Medium,
    Low,
}

impl TrustLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrustLevel::High => "high",
            TrustLevel::Medium => "medium",
            TrustLevel::Low => "low",
        }
    }
}

// ============================================================================
// PROVIDER INPUT
// ============================================================================

/// Outcome of one provider call, resolved by the executor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderStatus {
    Success,
    Timeout,
    Failure,
}

impl ProviderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderStatus::Success => "success",
            ProviderStatus::Timeout => "timeout",
            ProviderStatus::Failure => "failure",
        }
    }
}

/// Provider answer after the executor mapped it to the common shape
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NormalizedProviderResponse {
    /// Missing, non-string or unrecognized values read as `unknown`
    #[serde(default, deserialize_with = "lenient_verdict")]
    pub verdict: Verdict,
    /// Provider's own score, carried but not used for fusion
    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    /// Reported confidence, 0-100
    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub tags: BTreeSet<String>,
}

/// One entry of the scoring input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderExecutionResult {
    pub provider: String,
    pub status: ProviderStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<NormalizedProviderResponse>,
}

impl ProviderExecutionResult {
    pub fn success(provider: &str, data: NormalizedProviderResponse) -> Self {
        Self {
            provider: provider.to_string(),
            status: ProviderStatus::Success,
            data: Some(data),
        }
    }

    pub fn timeout(provider: &str) -> Self {
        Self {
            provider: provider.to_string(),
            status: ProviderStatus::Timeout,
            data: None,
        }
    }

    pub fn failure(provider: &str) -> Self {
        Self {
            provider: provider.to_string(),
            status: ProviderStatus::Failure,
            data: None,
        }
    }
}

/// Full scoring request
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoringInput {
    #[serde(default)]
    pub providers: Vec<ProviderExecutionResult>,
}

// ============================================================================
// PIPELINE INTERNALS
// ============================================================================

/// Usable evidence extracted from a successful provider result
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderSignal {
    pub provider: String,
    pub verdict: Verdict,
    pub confidence: ConfidenceLevel,
    pub status: ProviderStatus,
}

// ============================================================================
// OUTPUT
// ============================================================================

/// Per-provider breakdown, one per input in input order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedProvider {
    pub provider: String,
    pub status: ProviderStatus,
    pub normalized_score: Option<f64>,
    pub effective_weight: Option<f64>,
    pub verdict: Option<Verdict>,
    pub confidence: Option<ConfidenceLevel>,
}

impl ProcessedProvider {
    /// Breakdown entry for an input that produced no signal
    pub fn unusable(result: &ProviderExecutionResult) -> Self {
        Self {
            provider: result.provider.clone(),
            status: result.status,
            normalized_score: None,
            effective_weight: None,
            verdict: None,
            confidence: None,
        }
    }
}

/// Summary counters
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringMeta {
    pub total_providers: usize,
    pub successful_providers: usize,
    pub failed_providers: usize,
    pub timed_out_providers: usize,
    pub single_provider_mode: bool,
    pub has_conflicting_signals: bool,
}

/// Fused verdict for one indicator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringResult {
    /// 0-100, `None` when no provider produced a usable signal
    pub final_score: Option<u8>,
    pub verdict: Verdict,
    pub confidence: ConfidenceLevel,
    pub processed_providers: Vec<ProcessedProvider>,
    pub meta: ScoringMeta,
}

// ============================================================================
// LENIENT DESERIALIZERS
// ============================================================================

fn lenient_verdict<'de, D>(deserializer: D) -> Result<Verdict, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(|v| v.as_str())
        .map(Verdict::parse)
        .unwrap_or_default())
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|v| v.as_f64()).filter(|n| n.is_finite()))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_parse_is_lenient() {
        assert_eq!(Verdict::parse("Malicious"), Verdict::Malicious);
        assert_eq!(Verdict::parse(" benign "), Verdict::Benign);
        assert_eq!(Verdict::parse(" SUSPICIOUS\n"), Verdict::Suspicious);
        assert_eq!(Verdict::parse("phishing"), Verdict::Unknown);
        assert_eq!(Verdict::parse(""), Verdict::Unknown);
    }

    #[test]
    fn test_response_defaults_unknown_verdict() {
        let data: NormalizedProviderResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(data.verdict, Verdict::Unknown);
        assert_eq!(data.confidence, None);

        let data: NormalizedProviderResponse =
            serde_json::from_str(r#"{"verdict": 7, "confidence": "high"}"#).unwrap();
        assert_eq!(data.verdict, Verdict::Unknown);
        assert_eq!(data.confidence, None);

        let data: NormalizedProviderResponse =
            serde_json::from_str(r#"{"verdict": null, "confidence": null}"#).unwrap();
        assert_eq!(data.verdict, Verdict::Unknown);
    }

    #[test]
    fn test_input_wire_format() {
        let json = r#"{
            "providers": [
                {"provider": "vt", "status": "success",
                 "data": {"verdict": "malicious", "confidence": 90, "tags": ["c2", "c2"]}},
                {"provider": "otx", "status": "timeout"}
            ]
        }"#;
        let input: ScoringInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.providers.len(), 2);
        assert_eq!(input.providers[0].status, ProviderStatus::Success);
        let data = input.providers[0].data.as_ref().unwrap();
        assert_eq!(data.confidence, Some(90.0));
        assert_eq!(data.tags.len(), 1);
        assert_eq!(input.providers[1].status, ProviderStatus::Timeout);
        assert!(input.providers[1].data.is_none());
    }

    #[test]
    fn test_result_uses_camel_case() {
        let result = ScoringResult {
            final_score: None,
            verdict: Verdict::Unknown,
            confidence: ConfidenceLevel::Low,
            processed_providers: vec![ProcessedProvider::unusable(
                &ProviderExecutionResult::timeout("otx"),
            )],
            meta: ScoringMeta {
                total_providers: 1,
                timed_out_providers: 1,
                ..Default::default()
            },
        };

        let value = serde_json::to_value(&result).unwrap();
        assert!(value["finalScore"].is_null());
        assert_eq!(value["verdict"], "unknown");
        assert_eq!(value["confidence"], "low");
        assert_eq!(value["meta"]["timedOutProviders"], 1);
        assert_eq!(value["meta"]["singleProviderMode"], false);
        assert!(value["processedProviders"][0]["normalizedScore"].is_null());
        assert_eq!(value["processedProviders"][0]["status"], "timeout");
    }
}
