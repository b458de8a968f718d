//! Score Normalizer
//!
//! Verdict category -> base threat score.

use super::rules::BaseScores;
use super::types::Verdict;

pub fn normalize_score(verdict: Verdict, scores: &BaseScores) -> f64 {
    scores.for_verdict(verdict)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table() {
        let scores = BaseScores::default();
        assert_eq!(normalize_score(Verdict::Malicious, &scores), 100.0);
        assert_eq!(normalize_score(Verdict::Suspicious, &scores), 60.0);
        assert_eq!(normalize_score(Verdict::Unknown, &scores), 30.0);
        assert_eq!(normalize_score(Verdict::Benign, &scores), 0.0);
    }

    #[test]
    fn test_custom_table() {
        let scores = BaseScores {
            unknown: 45.0,
            ..Default::default()
        };
        assert_eq!(normalize_score(Verdict::Unknown, &scores), 45.0);
        assert_eq!(normalize_score(Verdict::Malicious, &scores), 100.0);
    }
}
