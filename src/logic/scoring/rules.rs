//! Scoring Rules & Thresholds
//!
//! Lookup tables and thresholds used by the fusion pipeline.
//! No scoring logic here - only constants, config and loading.
//!
//! Rules are loaded once at process start (`init`) from a JSON file so
//! operators can retune thresholds without a rebuild. Any field left out
//! of the file keeps its default.

use std::collections::BTreeMap;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use super::types::{ConfidenceLevel, TrustLevel, Verdict};

// ============================================================================
// BASE SCORES (verdict -> threat score)
// ============================================================================

pub const MALICIOUS_SCORE: f64 = 100.0;
pub const SUSPICIOUS_SCORE: f64 = 60.0;
pub const UNKNOWN_SCORE: f64 = 30.0;
pub const BENIGN_SCORE: f64 = 0.0;

// ============================================================================
// WEIGHTS
// ============================================================================

pub const HIGH_TRUST_WEIGHT: f64 = 1.0;
pub const MEDIUM_TRUST_WEIGHT: f64 = 0.7;
pub const LOW_TRUST_WEIGHT: f64 = 0.5;

pub const HIGH_CONFIDENCE_MULTIPLIER: f64 = 1.0;
pub const MEDIUM_CONFIDENCE_MULTIPLIER: f64 = 0.75;
pub const LOW_CONFIDENCE_MULTIPLIER: f64 = 0.5;

// ============================================================================
// THRESHOLDS
// ============================================================================

/// Reported confidence at or above this = high
pub const HIGH_CONFIDENCE_MIN: f64 = 70.0;

/// Reported confidence at or above this = medium (below = low)
pub const MEDIUM_CONFIDENCE_MIN: f64 = 40.0;

/// Fused score at or above this = Malicious
pub const MALICIOUS_THRESHOLD: f64 = 70.0;

/// Fused score at or above this = Suspicious (below = Benign)
pub const SUSPICIOUS_THRESHOLD: f64 = 30.0;

/// A signal scoring at or above this counts as high threat
pub const HIGH_THREAT_MIN: f64 = 70.0;

/// A signal scoring at or below this counts as low threat
pub const LOW_THREAT_MAX: f64 = 29.0;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum RulesError {
    #[error("failed to read rules file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse rules: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid rules: {0}")]
    Invalid(String),
}

// ============================================================================
// TABLES
// ============================================================================

/// Base threat score per verdict
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseScores {
    pub malicious: f64,
    pub suspicious: f64,
    pub unknown: f64,
    pub benign: f64,
}

impl Default for BaseScores {
    fn default() -> Self {
        Self {
            malicious: MALICIOUS_SCORE,
            suspicious: SUSPICIOUS_SCORE,
            unknown: UNKNOWN_SCORE,
            benign: BENIGN_SCORE,
        }
    }
}

impl BaseScores {
    pub fn for_verdict(&self, verdict: Verdict) -> f64 {
        match verdict {
            Verdict::Malicious => self.malicious,
            Verdict::Suspicious => self.suspicious,
            Verdict::Unknown => self.unknown,
            Verdict::Benign => self.benign,
        }
    }
}

/// A high/medium/low level that keys a `LevelTable`
pub trait TableLevel: Copy {
    /// Default (high, medium, low) values
    const DEFAULTS: (f64, f64, f64);

    fn select(self, high: f64, medium: f64, low: f64) -> f64;
}

impl TableLevel for TrustLevel {
    const DEFAULTS: (f64, f64, f64) = (HIGH_TRUST_WEIGHT, MEDIUM_TRUST_WEIGHT, LOW_TRUST_WEIGHT);

    fn select(self, high: f64, medium: f64, low: f64) -> f64 {
        match self {
            TrustLevel::High => high,
            TrustLevel::Medium => medium,
            TrustLevel::Low => low,
        }
    }
}

impl TableLevel for ConfidenceLevel {
    const DEFAULTS: (f64, f64, f64) = (
        HIGH_CONFIDENCE_MULTIPLIER,
        MEDIUM_CONFIDENCE_MULTIPLIER,
        LOW_CONFIDENCE_MULTIPLIER,
    );

    fn select(self, high: f64, medium: f64, low: f64) -> f64 {
        match self {
            ConfidenceLevel::High => high,
            ConfidenceLevel::Medium => medium,
            ConfidenceLevel::Low => low,
        }
    }
}

/// One value per level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, bound(serialize = "", deserialize = "L: TableLevel"))]
pub struct LevelTable<L> {
    pub high: f64,
    pub medium: f64,
    pub low: f64,
    #[serde(skip)]
    level: PhantomData<L>,
}

impl<L: TableLevel> Default for LevelTable<L> {
    fn default() -> Self {
        let (high, medium, low) = L::DEFAULTS;
        Self {
            high,
            medium,
            low,
            level: PhantomData,
        }
    }
}

impl<L: TableLevel> LevelTable<L> {
    pub fn get(&self, level: L) -> f64 {
        level.select(self.high, self.medium, self.low)
    }
}

/// Weight per provider trust level
pub type TrustWeights = LevelTable<TrustLevel>;

/// Multiplier per signal confidence level
pub type ConfidenceMultipliers = LevelTable<ConfidenceLevel>;

/// Cut points mapping a reported 0-100 confidence to a level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidenceBands {
    pub high_min: f64,
    pub medium_min: f64,
}

impl Default for ConfidenceBands {
    fn default() -> Self {
        Self {
            high_min: HIGH_CONFIDENCE_MIN,
            medium_min: MEDIUM_CONFIDENCE_MIN,
        }
    }
}

/// Cut points mapping the fused score to a verdict
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerdictBands {
    pub malicious_min: f64,
    pub suspicious_min: f64,
}

impl Default for VerdictBands {
    fn default() -> Self {
        Self {
            malicious_min: MALICIOUS_THRESHOLD,
            suspicious_min: SUSPICIOUS_THRESHOLD,
        }
    }
}

/// Per-signal thresholds for conflict detection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConflictThresholds {
    pub high_threat_min: f64,
    pub low_threat_max: f64,
}

impl Default for ConflictThresholds {
    fn default() -> Self {
        Self {
            high_threat_min: HIGH_THREAT_MIN,
            low_threat_max: LOW_THREAT_MAX,
        }
    }
}

/// Provider trust table. Empty by default, so every provider gets `default_level`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TrustTable {
    pub default_level: TrustLevel,
    pub providers: BTreeMap<String, TrustLevel>,
}

// ============================================================================
// SCORING RULES
// ============================================================================

/// Everything tunable about fusion, loadable from a JSON file
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringRules {
    pub base_scores: BaseScores,
    pub trust_weights: TrustWeights,
    pub confidence_multipliers: ConfidenceMultipliers,
    pub confidence_bands: ConfidenceBands,
    pub verdict_bands: VerdictBands,
    pub conflict: ConflictThresholds,
    pub trust: TrustTable,
}

impl ScoringRules {
    /// Parse and validate rules from JSON text
    pub fn from_json_str(json: &str) -> Result<Self, RulesError> {
        let rules: ScoringRules = serde_json::from_str(json)?;
        rules.validate()?;
        Ok(rules)
    }

    /// Load and validate rules from a JSON file
    pub fn load(path: &Path) -> Result<Self, RulesError> {
        let content = std::fs::read_to_string(path).map_err(|source| RulesError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    /// Check ranges and ordering of every table
    pub fn validate(&self) -> Result<(), RulesError> {
        let scores = [
            ("base_scores.malicious", self.base_scores.malicious),
            ("base_scores.suspicious", self.base_scores.suspicious),
            ("base_scores.unknown", self.base_scores.unknown),
            ("base_scores.benign", self.base_scores.benign),
            ("confidence_bands.high_min", self.confidence_bands.high_min),
            ("confidence_bands.medium_min", self.confidence_bands.medium_min),
            ("verdict_bands.malicious_min", self.verdict_bands.malicious_min),
            ("verdict_bands.suspicious_min", self.verdict_bands.suspicious_min),
            ("conflict.high_threat_min", self.conflict.high_threat_min),
            ("conflict.low_threat_max", self.conflict.low_threat_max),
        ];
        for (name, value) in scores {
            if !value.is_finite() || !(0.0..=100.0).contains(&value) {
                return Err(RulesError::Invalid(format!("{} must be within 0-100, got {}", name, value)));
            }
        }

        // Zero is allowed: an all-zero weight set falls back to a score of 0
        let weights = [
            ("trust_weights.high", self.trust_weights.high),
            ("trust_weights.medium", self.trust_weights.medium),
            ("trust_weights.low", self.trust_weights.low),
            ("confidence_multipliers.high", self.confidence_multipliers.high),
            ("confidence_multipliers.medium", self.confidence_multipliers.medium),
            ("confidence_multipliers.low", self.confidence_multipliers.low),
        ];
        for (name, value) in weights {
            if !value.is_finite() || value < 0.0 {
                return Err(RulesError::Invalid(format!("{} must be a non-negative number, got {}", name, value)));
            }
        }

        if self.confidence_bands.medium_min > self.confidence_bands.high_min {
            return Err(RulesError::Invalid(
                "confidence_bands.medium_min must not exceed high_min".to_string(),
            ));
        }
        if self.verdict_bands.suspicious_min > self.verdict_bands.malicious_min {
            return Err(RulesError::Invalid(
                "verdict_bands.suspicious_min must not exceed malicious_min".to_string(),
            ));
        }
        if self.conflict.low_threat_max >= self.conflict.high_threat_min {
            return Err(RulesError::Invalid(
                "conflict.low_threat_max must be below high_threat_min".to_string(),
            ));
        }

        Ok(())
    }
}

// ============================================================================
// STATE
// ============================================================================

static RULES: Lazy<RwLock<ScoringRules>> = Lazy::new(|| RwLock::new(ScoringRules::default()));

// ============================================================================
// PUBLIC API
// ============================================================================

/// Load process-wide rules. Call once at startup.
///
/// Uses `path`, else `IOC_FUSION_RULES`, else built-in defaults. A file that
/// cannot be loaded is an error only when given explicitly; from the
/// environment it falls back to defaults with a warning.
pub fn init(path: Option<&Path>) -> Result<ScoringRules, RulesError> {
    let rules = match path {
        Some(p) => ScoringRules::load(p)?,
        None => match crate::constants::get_rules_path() {
            Some(p) => ScoringRules::load(&p).unwrap_or_else(|e| {
                log::warn!("{} - using default scoring rules", e);
                ScoringRules::default()
            }),
            None => ScoringRules::default(),
        },
    };

    install(rules.clone());
    log::info!(
        "Scoring rules loaded: malicious>={}, suspicious>={}, {} trust overrides",
        rules.verdict_bands.malicious_min,
        rules.verdict_bands.suspicious_min,
        rules.trust.providers.len()
    );

    Ok(rules)
}

/// Replace process-wide rules
pub fn install(rules: ScoringRules) {
    *RULES.write() = rules;
}

/// Snapshot of process-wide rules
pub fn current() -> ScoringRules {
    RULES.read().clone()
}

// ============================================================================
// TESTS
// ============================================================================
