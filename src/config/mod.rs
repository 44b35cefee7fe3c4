//! Configuration management for the balancer
//!
//! This module handles configuration loading from environment variables and
//! TOML files, validation, and default values for balancing, rating and synergy learning.

pub mod app;
pub mod balance;
pub mod learning;
pub mod rating;

// Re-export commonly used types
pub use app::{startup_banner, validate_config, AppConfig, ServiceSettings};
pub use balance::{BalanceConfig, PenaltyConfig, SkillConfig};
pub use learning::SynergyLearningConfig;
pub use rating::RatingConfig;
