//! Rating update configuration

use crate::error::{BalancerError, Result};
use serde::{Deserialize, Serialize};

/// Dynamic K-factor and contribution weighting settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingConfig {
    pub k_base: f64,
    /// Lower clamp for the effective K, as a multiple of `k_base`
    pub min_k_multiplier: f64,
    /// Upper clamp for the effective K, as a multiple of `k_base`
    pub max_k_multiplier: f64,
    /// Games at or under this length get the full short-game factor
    pub short_game_secs: f64,
    /// Games at or over this length get the full long-game factor
    pub long_game_secs: f64,
    pub short_game_factor: f64,
    pub long_game_factor: f64,
    /// Gold equivalent of one kill when folding kill difference into the margin
    pub gold_per_kill: f64,
    /// Margin at which the margin factor saturates
    pub margin_cap: f64,
    pub max_margin_factor: f64,
    pub contribution_weighting: bool,
    pub min_contribution: f64,
    pub max_contribution: f64,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            k_base: 32.0,
            min_k_multiplier: 0.5,
            max_k_multiplier: 2.0,
            short_game_secs: 20.0 * 60.0,
            long_game_secs: 40.0 * 60.0,
            short_game_factor: 1.5,
            long_game_factor: 0.6,
            gold_per_kill: 1000.0,
            margin_cap: 10_000.0,
            max_margin_factor: 1.5,
            contribution_weighting: false,
            min_contribution: 0.5,
            max_contribution: 1.5,
        }
    }
}

impl RatingConfig {
    pub fn min_k(&self) -> f64 {
        self.k_base * self.min_k_multiplier
    }

    pub fn max_k(&self) -> f64 {
        self.k_base * self.max_k_multiplier
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        let error = |message: &str| BalancerError::ConfigurationError {
            message: message.to_string(),
        };
        let positive = |value: f64| value.is_finite() && value > 0.0;

        if !positive(self.k_base) {
            return Err(error("K base must be positive"));
        }
        if !positive(self.min_k_multiplier)
            || !positive(self.max_k_multiplier)
            || self.min_k_multiplier > 1.0
            || self.max_k_multiplier < 1.0
        {
            return Err(error("K multipliers must bracket 1.0"));
        }
        if !self.short_game_secs.is_finite()
            || self.short_game_secs < 0.0
            || !self.long_game_secs.is_finite()
            || self.long_game_secs <= self.short_game_secs
        {
            return Err(error("Long game threshold must exceed short game threshold"));
        }
        if !positive(self.short_game_factor)
            || !positive(self.long_game_factor)
            || self.long_game_factor > self.short_game_factor
        {
            return Err(error(
                "Duration factors must be positive and not increase with game length",
            ));
        }
        if !positive(self.gold_per_kill) || !positive(self.margin_cap) {
            return Err(error("Margin scaling values must be positive"));
        }
        if !self.max_margin_factor.is_finite() || self.max_margin_factor < 1.0 {
            return Err(error("Max margin factor must be at least 1.0"));
        }
        if !positive(self.min_contribution)
            || !self.max_contribution.is_finite()
            || self.min_contribution > 1.0
            || self.max_contribution < 1.0
        {
            return Err(error("Contribution bounds must bracket 1.0"));
        }

        Ok(())
    }
}
