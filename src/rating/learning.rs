//! Post-match synergy learning
//!
//! Every pair of teammates moves a fraction of the way toward a target set by
//! the result: up after a win (more after a dominant one), down after a loss
//! (more after a long, close one). Longer games count for more, up to a cap.
//! When scorelines are reported, pairs who played well shift further.
//! Opponents drift slightly apart so the balancer keeps trying new mixes.

use crate::config::SynergyLearningConfig;
use crate::error::Result;
use crate::rating::contribution::kda_score;
use crate::rating::validation::{validate_match_data, validate_rosters};
use crate::skill::{SynergyEntry, SynergyTable};
use crate::types::{MatchOutcome, Side};
use tracing::debug;

/// KDA score assumed for a player missing from a reported scoreline
const DEFAULT_CONTRIBUTION: f64 = 0.5;

/// Learns pair synergy from finished matches
#[derive(Debug, Clone, Default)]
pub struct SynergyLearner {
    config: SynergyLearningConfig,
}

impl SynergyLearner {
    /// Create a learner; fails if the configuration is invalid
    pub fn new(config: SynergyLearningConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SynergyLearningConfig {
        &self.config
    }

    /// Updated synergy for every pair in the match
    ///
    /// Returns the ten pairs of side A, the ten pairs of side B and then the
    /// twenty-five cross-team pairs. `current` is not modified; feed the
    /// entries back with [`SynergyTable::apply`] to keep them.
    pub fn learn(&self, outcome: &MatchOutcome, current: &SynergyTable) -> Result<Vec<SynergyEntry>> {
        validate_rosters(outcome)?;
        validate_match_data(outcome)?;

        let mut updates = Vec::with_capacity(45);
        for side in [Side::A, Side::B] {
            updates.extend(self.teammate_updates(outcome, side, current));
        }

        for first in &outcome.team_a {
            for second in &outcome.team_b {
                let bonus = (current.get(first, second) + self.config.cross_team_penalty)
                    .max(self.config.cross_team_floor);
                updates.push(SynergyEntry::new(first.clone(), second.clone(), bonus));
            }
        }

        debug!(
            winner = %outcome.winner,
            duration_secs = outcome.duration_secs,
            pairs = updates.len(),
            "Learned synergy from match"
        );
        Ok(updates)
    }

    /// Value teammates on `side` move toward
    pub fn target(&self, outcome: &MatchOutcome, side: Side) -> f64 {
        let gold = outcome.gold_diff.unwrap_or(0.0).abs();
        let kills = outcome.kill_diff.unwrap_or(0.0).abs();

        let base = if side == outcome.winner {
            let dominant = gold > self.config.dominant_gold || kills > self.config.dominant_kills;
            if dominant {
                self.config.win_bonus + self.config.dominant_win_bonus
            } else {
                self.config.win_bonus
            }
        } else {
            let close = outcome.duration_secs > self.config.close_game_secs && gold < self.config.close_gold;
            if close {
                self.config.loss_penalty + self.config.close_loss_penalty
            } else {
                self.config.loss_penalty
            }
        };

        base * self.config.time_factor(outcome.duration_secs)
    }

    fn teammate_updates(&self, outcome: &MatchOutcome, side: Side, current: &SynergyTable) -> Vec<SynergyEntry> {
        let roster = outcome.roster(side);
        let target = self.target(outcome, side);
        let limit = self.config.max_synergy;

        let mut updates = Vec::new();
        for (i, first) in roster.iter().enumerate() {
            for second in &roster[i + 1..] {
                let existing = current.get(first, second);
                let mut bonus = existing + (target - existing) * self.config.learning_rate;
                if let Some(factor) = self.contribution_factor(outcome, first, second) {
                    bonus *= factor;
                }
                updates.push(SynergyEntry::new(
                    first.clone(),
                    second.clone(),
                    bonus.clamp(-limit, limit),
                ));
            }
        }
        updates
    }

    /// Scale for a pair's new value, or `None` when no scorelines were reported
    fn contribution_factor(&self, outcome: &MatchOutcome, first: &str, second: &str) -> Option<f64> {
        if outcome.performance.is_empty() {
            return None;
        }

        let score = |name: &str| {
            outcome
                .performance
                .get(name)
                .map(kda_score)
                .unwrap_or(DEFAULT_CONTRIBUTION)
        };
        let mean = (score(first) + score(second)) / 2.0;
        Some(self.config.contribution_base + self.config.contribution_span * mean)
    }
}
