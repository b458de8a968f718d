//! Signal Extractor
//!
//! Turns one raw provider result into a usable signal, or nothing.

use super::rules::ConfidenceBands;
use super::types::{ConfidenceLevel, ProviderExecutionResult, ProviderSignal, ProviderStatus};

/// Extract a signal from a provider result.
///
/// Only `success` results carrying data yield a signal.
pub fn extract_signal(
    result: &ProviderExecutionResult,
    bands: &ConfidenceBands,
) -> Option<ProviderSignal> {
    if result.status != ProviderStatus::Success {
        return None;
    }
    let data = result.data.as_ref()?;

    Some(ProviderSignal {
        provider: result.provider.clone(),
        verdict: data.verdict,
        confidence: confidence_level(data.confidence, bands),
        status: result.status,
    })
}

/// Map a reported 0-100 confidence to a level. Missing means medium.
pub fn confidence_level(confidence: Option<f64>, bands: &ConfidenceBands) -> ConfidenceLevel {
    match confidence {
        None => ConfidenceLevel::Medium,
        Some(c) if c >= bands.high_min => ConfidenceLevel::High,
        Some(c) if c >= bands.medium_min => ConfidenceLevel::Medium,
        Some(_) => ConfidenceLevel::Low,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::scoring::types::{NormalizedProviderResponse, Verdict};

    fn response(verdict: Verdict, confidence: Option<f64>) -> NormalizedProviderResponse {
        NormalizedProviderResponse {
            verdict,
            confidence,
            ..Default::default()
        }
    }

    #[test]
    fn test_confidence_bands() {
        let bands = ConfidenceBands::default();
        assert_eq!(confidence_level(None, &bands), ConfidenceLevel::Medium);
        assert_eq!(confidence_level(Some(100.0), &bands), ConfidenceLevel::High);
        assert_eq!(confidence_level(Some(70.0), &bands), ConfidenceLevel::High);
        assert_eq!(confidence_level(Some(69.9), &bands), ConfidenceLevel::Medium);
        assert_eq!(confidence_level(Some(40.0), &bands), ConfidenceLevel::Medium);
        assert_eq!(confidence_level(Some(39.0), &bands), ConfidenceLevel::Low);
        assert_eq!(confidence_level(Some(0.0), &bands), ConfidenceLevel::Low);
    }

    #[test]
    fn test_success_yields_signal() {
        let result = ProviderExecutionResult::success("vt", response(Verdict::Malicious, Some(90.0)));
        let signal = extract_signal(&result, &ConfidenceBands::default()).unwrap();

        assert_eq!(signal.provider, "vt");
        assert_eq!(signal.verdict, Verdict::Malicious);
        assert_eq!(signal.confidence, ConfidenceLevel::High);
        assert_eq!(signal.status, ProviderStatus::Success);
    }

    #[test]
    fn test_non_success_yields_nothing() {
        let bands = ConfidenceBands::default();
        assert!(extract_signal(&ProviderExecutionResult::timeout("a"), &bands).is_none());
        assert!(extract_signal(&ProviderExecutionResult::failure("b"), &bands).is_none());
    }

    #[test]
    fn test_success_without_data_yields_nothing() {
        let result = ProviderExecutionResult {
            provider: "c".to_string(),
            status: ProviderStatus::Success,
            data: None,
        };
        assert!(extract_signal(&result, &ConfidenceBands::default()).is_none());
    }

    #[test]
    fn test_data_on_failed_status_is_ignored() {
        let result = ProviderExecutionResult {
            provider: "d".to_string(),
            status: ProviderStatus::Failure,
            data: Some(response(Verdict::Malicious, Some(99.0))),
        };
        assert!(extract_signal(&result, &ConfidenceBands::default()).is_none());
    }
}
