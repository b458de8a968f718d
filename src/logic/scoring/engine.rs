//! Scoring Engine
//!
//! Runs the full pipeline over one scoring input:
//! extract -> normalize/weight -> aggregate -> conflict -> confidence.
//!
//! Pure and synchronous: the same input always yields the same result and
//! nothing is kept between calls.

use super::aggregator::{band_verdict, weighted_average, WeightedScore};
use super::conflict::{detect_conflict, grade_confidence, resolve_verdict};
use super::extractor::extract_signal;
use super::normalizer::normalize_score;
use super::rules::{self, ScoringRules};
use super::trust::{TableTrustResolver, TrustResolver};
use super::weights::effective_weight;
use super::types::{
    ConfidenceLevel, ProcessedProvider, ProviderExecutionResult, ProviderStatus, ScoringInput,
    ScoringMeta, ScoringResult, Verdict,
};

// ============================================================================
// ENGINE
// ============================================================================

/// Rules snapshot plus a trust policy
pub struct ScoringEngine {
    rules: ScoringRules,
    trust: Box<dyn TrustResolver>,
}

impl ScoringEngine {
    /// Engine whose trust policy is the rules' trust table
    pub fn new(rules: ScoringRules) -> Self {
        let trust = TableTrustResolver::from_table(&rules.trust);
        if !trust.is_empty() {
            log::debug!("Trust table: {} provider overrides", trust.len());
        }
        Self {
            rules,
            trust: Box::new(trust),
        }
    }

    /// Engine with a custom trust policy
    pub fn with_trust_resolver(rules: ScoringRules, trust: Box<dyn TrustResolver>) -> Self {
        Self { rules, trust }
    }

    /// Engine over the process-wide rules
    pub fn from_current_rules() -> Self {
        Self::new(rules::current())
    }

    pub fn rules(&self) -> &ScoringRules {
        &self.rules
    }

    pub fn score(&self, input: &ScoringInput) -> ScoringResult {
        score_providers(&input.providers, &self.rules, self.trust.as_ref())
    }
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::new(ScoringRules::default())
    }
}

// ============================================================================
// PIPELINE
// ============================================================================

/// Score an input using the process-wide rules
pub fn score(input: &ScoringInput) -> ScoringResult {
    ScoringEngine::from_current_rules().score(input)
}

/// Fuse provider results into one verdict
pub fn score_providers(
    providers: &[ProviderExecutionResult],
    rules: &ScoringRules,
    trust: &dyn TrustResolver,
) -> ScoringResult {
    let mut processed = Vec::with_capacity(providers.len());
    let mut weighted = Vec::with_capacity(providers.len());

    for result in providers {
        match extract_signal(result, &rules.confidence_bands) {
            Some(signal) => {
                let score = normalize_score(signal.verdict, &rules.base_scores);
                let trust_level = trust.trust_level(&signal.provider);
                let weight = effective_weight(trust_level, signal.confidence, rules);

                weighted.push(WeightedScore { score, weight });
                processed.push(ProcessedProvider {
                    provider: signal.provider,
                    status: signal.status,
                    normalized_score: Some(score),
                    effective_weight: Some(weight),
                    verdict: Some(signal.verdict),
                    confidence: Some(signal.confidence),
                });
            }
            None => processed.push(ProcessedProvider::unusable(result)),
        }
    }

    let mut meta = count_statuses(providers);

    if weighted.is_empty() {
        log::debug!(
            "No usable signal from {} providers ({} timed out, {} failed)",
            meta.total_providers,
            meta.timed_out_providers,
            meta.failed_providers
        );
        return ScoringResult {
            final_score: None,
            verdict: Verdict::Unknown,
            confidence: ConfidenceLevel::Low,
            processed_providers: processed,
            meta,
        };
    }

    let final_score = weighted_average(&weighted);
    let banded = band_verdict(final_score, &rules.verdict_bands);

    let scores: Vec<f64> = weighted.iter().map(|w| w.score).collect();
    let conflicting = detect_conflict(&scores, &rules.conflict).is_conflicting();
    let verdict = resolve_verdict(banded, conflicting);
    let confidence = grade_confidence(weighted.len(), conflicting);

    meta.single_provider_mode = weighted.len() == 1;
    meta.has_conflicting_signals = conflicting;

    log::debug!(
        "Fused {} of {} providers: score={}, verdict={}, confidence={}, conflict={}",
        weighted.len(),
        meta.total_providers,
        final_score,
        verdict,
        confidence,
        conflicting
    );

    ScoringResult {
        final_score: Some(final_score),
        verdict,
        confidence,
        processed_providers: processed,
        meta,
    }
}

fn count_statuses(providers: &[ProviderExecutionResult]) -> ScoringMeta {
    let mut meta = ScoringMeta {
        total_providers: providers.len(),
        ..Default::default()
    };
    for result in providers {
        match result.status {
            ProviderStatus::Success => meta.successful_providers += 1,
            ProviderStatus::Failure => meta.failed_providers += 1,
            ProviderStatus::Timeout => meta.timed_out_providers += 1,
        }
    }
    meta
}
