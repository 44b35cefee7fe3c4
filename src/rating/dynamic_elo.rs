//! Dynamic-K Elo rating calculator
//!
//! Teams are rated as a whole: each side's MMR comes from the skill model at
//! the positions actually played, the side-level Elo step runs with a K
//! weighted by game length and margin, and the side's change is handed to
//! every member scaled by their contribution weight.

use crate::config::{RatingConfig, SkillConfig};
use crate::error::{BalancerError, Result};
use crate::rating::calculator::{RatingCalculator, RatingDelta, RatingUpdateResult};
use crate::rating::contribution::team_contributions;
use crate::rating::importance::MatchImportance;
use crate::rating::validation::{validate_match_data, validate_rosters};
use crate::skill::{win_probability, SkillModel, SynergyTable, TeamRating};
use crate::types::{MatchOutcome, PlayerPool, PlayerSkill, Position, Side};
use serde::Serialize;
use skillratings::elo::{elo, EloConfig, EloRating};
use skillratings::Outcomes;
use tracing::debug;

/// Production rating engine
#[derive(Debug, Clone)]
pub struct DynamicEloCalculator {
    config: RatingConfig,
    model: SkillModel,
}

#[derive(Serialize)]
struct CalculatorSettings<'a> {
    rating: &'a RatingConfig,
    skill: &'a SkillConfig,
}

impl DynamicEloCalculator {
    /// Create a calculator using the default skill weights
    pub fn new(config: RatingConfig) -> Result<Self> {
        Self::with_skill_config(config, SkillConfig::default())
    }

    /// Create a calculator rating teams with the given skill weights
    pub fn with_skill_config(config: RatingConfig, skill: SkillConfig) -> Result<Self> {
        config.validate()?;
        skill.validate()?;

        Ok(Self {
            config,
            model: SkillModel::new(skill),
        })
    }

    pub fn rating_config(&self) -> &RatingConfig {
        &self.config
    }

    /// Team rating at match time for one side's roster
    fn side_rating(
        &self,
        outcome: &MatchOutcome,
        side: Side,
        players: &PlayerPool,
        synergy: &SynergyTable,
    ) -> Result<TeamRating> {
        let lineup = outcome
            .roster(side)
            .iter()
            .map(|name| {
                let player = players.get(name)?;
                Ok((player, played_position(outcome, player)))
            })
            .collect::<Result<Vec<(&PlayerSkill, Position)>>>()?;

        Ok(self.model.team_rating(&lineup, synergy))
    }

    fn side_deltas(&self, outcome: &MatchOutcome, side: Side, side_delta: f64) -> Vec<RatingDelta> {
        let roster = outcome.roster(side);
        let lines: Vec<_> = roster.iter().map(|name| outcome.performance.get(name)).collect();
        let weights = team_contributions(&self.config, &lines);

        roster
            .iter()
            .zip(weights)
            .map(|(name, weight)| RatingDelta {
                player: name.clone(),
                side,
                delta: side_delta * weight,
            })
            .collect()
    }
}

fn played_position(outcome: &MatchOutcome, player: &PlayerSkill) -> Position {
    outcome
        .positions
        .get(&player.name)
        .copied()
        .unwrap_or(player.primary)
}

impl RatingCalculator for DynamicEloCalculator {
    fn calculate_rating_changes(
        &self,
        outcome: &MatchOutcome,
        players: &PlayerPool,
        synergy: Option<&SynergyTable>,
    ) -> Result<RatingUpdateResult> {
        validate_rosters(outcome)?;
        validate_match_data(outcome)?;

        let empty = SynergyTable::new();
        let synergy = synergy.unwrap_or(&empty);

        let mmr_a = self.side_rating(outcome, Side::A, players, synergy)?.mmr();
        let mmr_b = self.side_rating(outcome, Side::B, players, synergy)?.mmr();
        if !mmr_a.is_finite() || !mmr_b.is_finite() {
            return Err(BalancerError::RatingCalculationFailed {
                reason: "team MMR is not finite".to_string(),
            });
        }

        let importance =
            MatchImportance::evaluate(&self.config, outcome.duration_secs, outcome.gold_diff, outcome.kill_diff);

        let result = match outcome.winner {
            Side::A => Outcomes::WIN,
            Side::B => Outcomes::LOSS,
        };
        let (new_a, new_b) = elo(
            &EloRating { rating: mmr_a },
            &EloRating { rating: mmr_b },
            &result,
            &EloConfig {
                k: importance.k_factor,
            },
        );

        let mut deltas = self.side_deltas(outcome, Side::A, new_a.rating - mmr_a);
        deltas.extend(self.side_deltas(outcome, Side::B, new_b.rating - mmr_b));

        debug!(
            winner = %outcome.winner,
            mmr_a,
            mmr_b,
            duration_factor = importance.duration_factor,
            margin_factor = importance.margin_factor,
            k_factor = importance.k_factor,
            "Calculated rating changes"
        );

        Ok(RatingUpdateResult {
            deltas,
            k_factor: importance.k_factor,
            expected_a: win_probability(mmr_a, mmr_b),
            mmr_a,
            mmr_b,
        })
    }

    fn config(&self) -> serde_json::Value {
        let settings = CalculatorSettings {
            rating: &self.config,
            skill: self.model.config(),
        };
        serde_json::to_value(settings).unwrap_or(serde_json::Value::Null)
    }
}
