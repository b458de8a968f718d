//! Scoring Module
//!
//! Fuses verdicts from many threat-intel providers into one score,
//! verdict and confidence grade. This is where disagreeing sources get
//! reconciled.
//!
//! ## Structure
//! - `types`: Provider input, signal and result types
//! - `rules`: Lookup tables, thresholds, rules loading
//! - `extractor`: Raw provider result -> signal
//! - `trust`: Provider -> trust level policies
//! - `normalizer`: Verdict -> base score
//! - `weights`: Trust x confidence -> weight
//! - `aggregator`: Weighted average + verdict banding
//! - `conflict`: Conflict override + confidence grading
//! - `engine`: The pipeline
//!
//! ## Usage
//! ```ignore
//! use ioc_fusion::logic::scoring::{self, ScoringInput};
//!
//! scoring::rules::init(None)?;
//! let result = scoring::score(&input);
//! match result.final_score {
//!     Some(score) => println!("{} ({}) {}", result.verdict, result.confidence, score),
//!     None => println!("no usable evidence"),
//! }
//! ```

pub mod types;
pub mod rules;
pub mod extractor;
pub mod trust;
pub mod normalizer;
pub mod weights;
pub mod aggregator;
pub mod conflict;
pub mod engine;


pub use types::{
    ConfidenceLevel,
    NormalizedProviderResponse,
    ProcessedProvider,
    ProviderExecutionResult,
    ProviderSignal,
    ProviderStatus,
    ScoringInput,
    ScoringMeta,
    ScoringResult,
    TrustLevel,
    Verdict,
};

pub use rules::{RulesError, ScoringRules};

pub use trust::{FixedTrustResolver, TableTrustResolver, TrustResolver};

pub use engine::{score, score_providers, ScoringEngine};
