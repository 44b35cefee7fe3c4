//! Team balancing configuration

use crate::error::{BalancerError, Result};
use serde::{Deserialize, Serialize};

/// Positional familiarity weights and adjustments applied to base ratings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillConfig {
    pub primary_weight: f64,
    pub secondary_weight: f64,
    pub unfamiliar_weight: f64,
    /// Effective rating is scaled by `1 + (form - 0.5) * form_coefficient`
    pub form_coefficient: f64,
    /// Multiplier applied to raw synergy entries before they reach team MMR
    pub synergy_scale: f64,
}

impl Default for SkillConfig {
    fn default() -> Self {
        Self {
            primary_weight: 1.0,
            secondary_weight: 0.85,
            unfamiliar_weight: 0.70,
            form_coefficient: 0.10,
            synergy_scale: 1.0,
        }
    }
}

impl SkillConfig {
    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        let error = |message: &str| BalancerError::ConfigurationError {
            message: message.to_string(),
        };

        let weights = [
            self.primary_weight,
            self.secondary_weight,
            self.unfamiliar_weight,
        ];
        if weights.iter().any(|w| !w.is_finite() || *w <= 0.0) {
            return Err(error("Position weights must be positive"));
        }
        if self.secondary_weight > self.primary_weight
            || self.unfamiliar_weight > self.secondary_weight
        {
            return Err(error(
                "Position weights must not increase from primary to unfamiliar",
            ));
        }
        if !self.form_coefficient.is_finite()
            || !(0.0..2.0).contains(&self.form_coefficient)
        {
            return Err(error("Form coefficient must be within [0, 2)"));
        }
        if !self.synergy_scale.is_finite() {
            return Err(error("Synergy scale must be finite"));
        }

        Ok(())
    }
}

/// Position penalties used by the assignment search and the cost function
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PenaltyConfig {
    pub primary: f64,
    pub secondary: f64,
    pub unfamiliar: f64,
}

impl Default for PenaltyConfig {
    fn default() -> Self {
        Self {
            primary: 0.0,
            secondary: 10.0,
            unfamiliar: 30.0,
        }
    }
}

/// Settings for the balancing search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalanceConfig {
    /// Number of proposals returned
    pub top_k: usize,
    pub skill: SkillConfig,
    pub penalties: PenaltyConfig,
}

impl Default for BalanceConfig {
    fn default() -> Self {
        Self {
            top_k: 3,
            skill: SkillConfig::default(),
            penalties: PenaltyConfig::default(),
        }
    }
}

impl BalanceConfig {
    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        let error = |message: &str| BalancerError::ConfigurationError {
            message: message.to_string(),
        };

        if self.top_k == 0 {
            return Err(error("top_k must be at least 1"));
        }

        self.skill.validate()?;

        let penalties = [
            self.penalties.primary,
            self.penalties.secondary,
            self.penalties.unfamiliar,
        ];
        if penalties.iter().any(|p| !p.is_finite() || *p < 0.0) {
            return Err(error("Position penalties must be non-negative"));
        }

        Ok(())
    }
}
