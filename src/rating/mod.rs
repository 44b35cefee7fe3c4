//! Post-match rating updates
//!
//! Dynamic-K Elo over team MMR: game length and score margin set the K
//! factor, and optional contribution weights split a side's change across
//! its members. Pair synergy is learned from the same outcome.

pub mod calculator;
pub mod contribution;
pub mod dynamic_elo;
pub mod importance;
pub mod learning;
pub mod validation;

// Re-export commonly used types
pub use calculator::{RatingCalculator, RatingDelta, RatingUpdateResult};
pub use dynamic_elo::DynamicEloCalculator;
pub use importance::MatchImportance;
pub use learning::SynergyLearner;
