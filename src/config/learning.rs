//! Post-match synergy learning configuration

use crate::error::{BalancerError, Result};
use serde::{Deserialize, Serialize};

/// How pair synergy moves after a finished match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynergyLearningConfig {
    /// Target for teammates who won together
    pub win_bonus: f64,
    /// Target for teammates who lost together
    pub loss_penalty: f64,
    /// Added to the win target when the win was dominant
    pub dominant_win_bonus: f64,
    /// Added to the loss target when the loss was close
    pub close_loss_penalty: f64,
    /// Fraction of the gap to the target closed per match
    pub learning_rate: f64,
    /// Game length at which the time factor reaches 1.0
    pub reference_secs: f64,
    pub max_time_factor: f64,
    /// A win is dominant above either margin
    pub dominant_gold: f64,
    pub dominant_kills: f64,
    /// A loss is close when longer than this with a gold gap under `close_gold`
    pub close_game_secs: f64,
    pub close_gold: f64,
    /// Scoreline factor is `contribution_base + contribution_span × mean KDA score`
    pub contribution_base: f64,
    pub contribution_span: f64,
    /// Applied to every cross-team pair, never below `cross_team_floor`
    pub cross_team_penalty: f64,
    pub cross_team_floor: f64,
    /// Learned values stay within `[-max_synergy, max_synergy]`
    pub max_synergy: f64,
}

impl Default for SynergyLearningConfig {
    fn default() -> Self {
        Self {
            win_bonus: 0.05,
            loss_penalty: -0.03,
            dominant_win_bonus: 0.08,
            close_loss_penalty: -0.01,
            learning_rate: 0.3,
            reference_secs: 30.0 * 60.0,
            max_time_factor: 1.5,
            dominant_gold: 10_000.0,
            dominant_kills: 15.0,
            close_game_secs: 40.0 * 60.0,
            close_gold: 5_000.0,
            contribution_base: 0.7,
            contribution_span: 0.6,
            cross_team_penalty: -0.01,
            cross_team_floor: -0.5,
            max_synergy: 1.0,
        }
    }
}

impl SynergyLearningConfig {
    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        let error = |message: &str| BalancerError::ConfigurationError {
            message: message.to_string(),
        };
        let positive = |value: f64| value.is_finite() && value > 0.0;

        let targets = [
            self.win_bonus,
            self.loss_penalty,
            self.dominant_win_bonus,
            self.close_loss_penalty,
            self.cross_team_penalty,
            self.cross_team_floor,
        ];
        if targets.iter().any(|value| !value.is_finite()) {
            return Err(error("Synergy targets must be finite"));
        }
        if !positive(self.learning_rate) || self.learning_rate > 1.0 {
            return Err(error("Learning rate must be within (0, 1]"));
        }
        if !positive(self.reference_secs) || !positive(self.max_time_factor) {
            return Err(error("Time factor settings must be positive"));
        }
        if !positive(self.dominant_gold)
            || !positive(self.dominant_kills)
            || !positive(self.close_game_secs)
            || !positive(self.close_gold)
        {
            return Err(error("Margin thresholds must be positive"));
        }
        if !self.contribution_base.is_finite()
            || !self.contribution_span.is_finite()
            || self.contribution_base < 0.0
            || self.contribution_span < 0.0
        {
            return Err(error("Contribution factor must not be negative"));
        }
        if !positive(self.max_synergy) || self.cross_team_floor < -self.max_synergy {
            return Err(error("Cross-team floor must lie within the synergy bound"));
        }

        Ok(())
    }

    /// Scale on the target for longer games, capped at `max_time_factor`
    pub fn time_factor(&self, duration_secs: f64) -> f64 {
        (duration_secs / self.reference_secs).min(self.max_time_factor)
    }
}
