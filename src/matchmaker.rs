//! Matchmaker facade
//!
//! Ties the balancer, the rating engine and the synergy learner together
//! behind the operations the web layer calls: propose teams before a match,
//! then compute rating deltas and learned synergy after it.

use crate::balance::{ScoredMatch, TeamBalancer};
use crate::config::AppConfig;
use crate::error::{BalancerError, Result};
use crate::rating::{DynamicEloCalculator, RatingCalculator, RatingUpdateResult, SynergyLearner};
use crate::skill::{SynergyEntry, SynergyTable};
use crate::types::{MatchOutcome, PlayerPool, PlayerSkill, MATCH_SIZE};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn};

pub struct Matchmaker {
    balancer: TeamBalancer,
    calculator: Arc<dyn RatingCalculator>,
    learner: SynergyLearner,
}

impl Matchmaker {
    /// Build the balancer and the dynamic Elo calculator from configuration
    pub fn new(config: &AppConfig) -> Result<Self> {
        let balancer = TeamBalancer::new(config.balance.clone())?;
        let calculator =
            DynamicEloCalculator::with_skill_config(config.rating.clone(), config.balance.skill.clone())?;
        let learner = SynergyLearner::new(config.learning.clone())?;

        Ok(Self {
            balancer,
            calculator: Arc::new(calculator),
            learner,
        })
    }

    /// Replace the rating engine
    pub fn with_calculator(mut self, calculator: Arc<dyn RatingCalculator>) -> Self {
        self.calculator = calculator;
        self
    }

    /// Propose up to `top_k` balanced splits of ten players, best first
    pub fn balance(&self, players: &[PlayerSkill], synergy: &SynergyTable) -> Result<Vec<ScoredMatch>> {
        self.balancer.balance(players, synergy)
    }

    /// Rating deltas for every participant of a finished match
    ///
    /// Fails without a partial result unless the calculator produced exactly
    /// one delta for each roster member.
    pub fn update_ratings(
        &self,
        outcome: &MatchOutcome,
        players: &PlayerPool,
        synergy: Option<&SynergyTable>,
    ) -> Result<RatingUpdateResult> {
        let result = self.calculator.calculate_rating_changes(outcome, players, synergy)?;

        let roster: HashSet<&str> = outcome
            .team_a
            .iter()
            .chain(&outcome.team_b)
            .map(String::as_str)
            .collect();
        let rated: HashSet<&str> = result.deltas.iter().map(|delta| delta.player.as_str()).collect();

        if result.deltas.len() != MATCH_SIZE || rated.len() != MATCH_SIZE || rated != roster {
            warn!(
                deltas = result.deltas.len(),
                "Rating calculator output does not match the rosters"
            );
            return Err(BalancerError::RatingCalculationFailed {
                reason: format!(
                    "expected one delta for each of {} players, got {}",
                    MATCH_SIZE,
                    result.deltas.len()
                ),
            });
        }
        if let Some(bad) = result.deltas.iter().find(|delta| !delta.delta.is_finite()) {
            return Err(BalancerError::RatingCalculationFailed {
                reason: format!("non-finite delta for {}", bad.player),
            });
        }

        debug!(k_factor = result.k_factor, "Rating update ready");
        Ok(result)
    }

    /// Updated synergy for every pair in a finished match
    ///
    /// The returned entries replace the matching pairs in `current`; the
    /// table itself is left untouched.
    pub fn learn_synergy(&self, outcome: &MatchOutcome, current: &SynergyTable) -> Result<Vec<SynergyEntry>> {
        self.learner.learn(outcome, current)
    }

    pub fn calculator_config(&self) -> serde_json::Value {
        self.calculator.config()
    }
}

impl std::fmt::Debug for Matchmaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Matchmaker")
            .field("balancer", &self.balancer)
            .field("calculator", &self.calculator.config())
            .field("learner", &self.learner)
            .finish()
    }
}
