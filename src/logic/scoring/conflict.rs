//! Conflict Detector & Confidence Grader
//!
//! A high-threat and a low-threat signal in the same set is a conflict;
//! a conflict forces the verdict to Suspicious and caps confidence at medium.

use super::rules::ConflictThresholds;
use super::types::{ConfidenceLevel, Verdict};

/// Threat spread across the valid signals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConflictAssessment {
    pub has_high_threat: bool,
    pub has_low_threat: bool,
}

impl ConflictAssessment {
    pub fn is_conflicting(&self) -> bool {
        self.has_high_threat && self.has_low_threat
    }
}

pub fn detect_conflict(scores: &[f64], thresholds: &ConflictThresholds) -> ConflictAssessment {
    ConflictAssessment {
        has_high_threat: scores.iter().any(|s| *s >= thresholds.high_threat_min),
        has_low_threat: scores.iter().any(|s| *s <= thresholds.low_threat_max),
    }
}

/// Conflicting evidence never resolves to benign or malicious
pub fn resolve_verdict(banded: Verdict, conflicting: bool) -> Verdict {
    if conflicting {
        Verdict::Suspicious
    } else {
        banded
    }
}

/// Overall confidence from sample size and conflict state.
///
/// One signal is always low; two signals or a conflict is medium;
/// otherwise high.
pub fn grade_confidence(valid_signals: usize, conflicting: bool) -> ConfidenceLevel {
    if valid_signals == 1 {
        ConfidenceLevel::Low
    } else if valid_signals == 2 || conflicting {
        ConfidenceLevel::Medium
    } else {
        ConfidenceLevel::High
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_conflict() {
        let thresholds = ConflictThresholds::default();
        let assessment = detect_conflict(&[100.0, 0.0], &thresholds);
        assert!(assessment.has_high_threat);
        assert!(assessment.has_low_threat);
        assert!(assessment.is_conflicting());
    }

    #[test]
    fn test_threshold_edges() {
        let thresholds = ConflictThresholds::default();
        assert!(detect_conflict(&[70.0, 29.0], &thresholds).is_conflicting());
        assert!(!detect_conflict(&[69.0, 29.0], &thresholds).is_conflicting());
        assert!(!detect_conflict(&[70.0, 30.0], &thresholds).is_conflicting());
    }

    #[test]
    fn test_agreeing_signals_do_not_conflict() {
        let thresholds = ConflictThresholds::default();
        assert!(!detect_conflict(&[100.0, 60.0, 100.0], &thresholds).is_conflicting());
        assert!(!detect_conflict(&[0.0, 0.0, 30.0], &thresholds).is_conflicting());
        assert!(!detect_conflict(&[], &thresholds).is_conflicting());
    }

    #[test]
    fn test_conflict_overrides_verdict() {
        assert_eq!(resolve_verdict(Verdict::Malicious, true), Verdict::Suspicious);
        assert_eq!(resolve_verdict(Verdict::Benign, true), Verdict::Suspicious);
        assert_eq!(resolve_verdict(Verdict::Benign, false), Verdict::Benign);
    }

    #[test]
    fn test_confidence_grades() {
        assert_eq!(grade_confidence(1, false), ConfidenceLevel::Low);
        assert_eq!(grade_confidence(1, true), ConfidenceLevel::Low);
        assert_eq!(grade_confidence(2, false), ConfidenceLevel::Medium);
        assert_eq!(grade_confidence(3, true), ConfidenceLevel::Medium);
        assert_eq!(grade_confidence(3, false), ConfidenceLevel::High);
        assert_eq!(grade_confidence(7, false), ConfidenceLevel::High);
    }
}
