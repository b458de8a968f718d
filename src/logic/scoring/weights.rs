//! Weight Calculator
//!
//! effective weight = trust weight x confidence multiplier

use super::rules::ScoringRules;
use super::types::{ConfidenceLevel, TrustLevel};

pub fn effective_weight(trust: TrustLevel, confidence: ConfidenceLevel, rules: &ScoringRules) -> f64 {
    rules.trust_weights.get(trust) * rules.confidence_multipliers.get(confidence)
}
