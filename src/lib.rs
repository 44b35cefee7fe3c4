//! Scrim Balancer - Team balancing and rating updates for 5v5 custom matches
//!
//! This crate splits ten players into the most evenly matched pair of teams,
//! assigning each player a position, and turns finished matches into
//! dynamic-K Elo rating deltas and updated pair synergy.

pub mod balance;
pub mod config;
pub mod error;
pub mod matchmaker;
pub mod rating;
pub mod skill;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{BalancerError, Result};
pub use types::*;

// Re-export key components
pub use balance::{ScoredMatch, TeamBalancer};
pub use matchmaker::Matchmaker;
pub use rating::{DynamicEloCalculator, RatingCalculator, RatingUpdateResult, SynergyLearner};
pub use skill::{SkillModel, SynergyTable};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
