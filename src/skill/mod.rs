//! Skill model: effective ratings, form, and synergy
//!
//! Leaf dependency for both the balancer and the rating engine.

pub mod model;
pub mod synergy;

// Re-export commonly used types
pub use model::{expected_win_rates, win_probability, Familiarity, SkillModel, TeamRating, ELO_SCALE};
pub use synergy::{SynergyEntry, SynergyTable};
