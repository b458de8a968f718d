//! Aggregator
//!
//! Weighted average of the valid signals, clamped to 0-100, then banded
//! into a verdict.
//! Input: (normalized score, effective weight) per valid signal
//! Output: integer score + verdict band

use super::rules::VerdictBands;
use super::types::Verdict;

/// One valid signal as seen by the aggregator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedScore {
    pub score: f64,
    pub weight: f64,
}

/// Weighted average score, rounded and clamped to 0-100.
///
/// Rounding is half away from zero (`f64::round`), so 29.5 -> 30 and
/// 69.5 -> 70. A zero total weight gives 0 instead of NaN.
pub fn weighted_average(signals: &[WeightedScore]) -> u8 {
    let weighted_sum: f64 = signals.iter().map(|s| s.score * s.weight).sum();
    let weight_sum: f64 = signals.iter().map(|s| s.weight).sum();

    let average = if weight_sum > 0.0 {
        weighted_sum / weight_sum
    } else {
        0.0
    };

    if !average.is_finite() {
        return 0;
    }

    average.round().clamp(0.0, 100.0) as u8
}

/// Map a fused score to a verdict. Never returns `Unknown`.
pub fn band_verdict(score: u8, bands: &VerdictBands) -> Verdict {
    let score = f64::from(score);
    if score >= bands.malicious_min {
        Verdict::Malicious
    } else if score >= bands.suspicious_min {
        Verdict::Suspicious
    } else {
        Verdict::Benign
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn ws(score: f64, weight: f64) -> WeightedScore {
        WeightedScore { score, weight }
    }

    #[test]
    fn test_weighted_average() {
        assert_eq!(weighted_average(&[ws(100.0, 0.7), ws(0.0, 0.7)]), 50);
        assert_eq!(weighted_average(&[ws(100.0, 1.0), ws(0.0, 0.25)]), 80);
        assert_eq!(weighted_average(&[ws(60.0, 0.525)]), 60);
    }

    #[test]
    fn test_rounds_half_away_from_zero() {
        assert_eq!(weighted_average(&[ws(100.0, 1.0), ws(1.0, 1.0)]), 51); // 50.5
        assert_eq!(weighted_average(&[ws(0.0, 1.0), ws(59.0, 1.0)]), 30); // 29.5
        assert_eq!(weighted_average(&[ws(40.0, 1.0), ws(99.0, 1.0)]), 70); // 69.5
        assert_eq!(weighted_average(&[ws(0.0, 3.0), ws(1.0, 1.0)]), 0); // 0.25
    }

    #[test]
    fn test_zero_weight_falls_back_to_zero() {
        assert_eq!(weighted_average(&[ws(100.0, 0.0), ws(60.0, 0.0)]), 0);
        assert_eq!(weighted_average(&[]), 0);
    }

    #[test]
    fn test_result_is_clamped() {
        assert_eq!(weighted_average(&[ws(250.0, 1.0)]), 100);
        assert_eq!(weighted_average(&[ws(-20.0, 1.0)]), 0);
    }

    #[test]
    fn test_verdict_bands() {
        let bands = VerdictBands::default();
        assert_eq!(band_verdict(100, &bands), Verdict::Malicious);
        assert_eq!(band_verdict(70, &bands), Verdict::Malicious);
        assert_eq!(band_verdict(69, &bands), Verdict::Suspicious);
        assert_eq!(band_verdict(30, &bands), Verdict::Suspicious);
        assert_eq!(band_verdict(29, &bands), Verdict::Benign);
        assert_eq!(band_verdict(0, &bands), Verdict::Benign);
    }

    #[test]
    fn test_banding_never_unknown() {
        let bands = VerdictBands::default();
        for score in 0..=100u8 {
            assert_ne!(band_verdict(score, &bands), Verdict::Unknown);
        }
    }
}
