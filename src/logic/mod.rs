//! Logic Module - Business Logic
//!
//! - `scoring/` - Multi-provider verdict fusion
//! - `history/` - Verdict history persistence

pub mod scoring;
pub mod history;
