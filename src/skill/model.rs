//! Position-weighted effective ratings and team MMR
//!
//! Everything here is a pure function of the player snapshot and the
//! configured weights; form is read but never written.

use crate::config::SkillConfig;
use crate::skill::synergy::SynergyTable;
use crate::types::{PlayerSkill, Position};
use serde::{Deserialize, Serialize};
use skillratings::elo::{expected_score, EloRating};

/// Logistic scale of the win-probability transform
pub const ELO_SCALE: f64 = 400.0;

/// How well a player knows a position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Familiarity {
    Primary,
    Secondary,
    Unfamiliar,
}

impl Familiarity {
    pub fn of(player: &PlayerSkill, position: Position) -> Self {
        if position == player.primary {
            Familiarity::Primary
        } else if player.secondary.contains(&position) {
            Familiarity::Secondary
        } else {
            Familiarity::Unfamiliar
        }
    }
}

/// Aggregate rating of one side
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamRating {
    /// Sum of effective player ratings
    pub rating_sum: f64,
    pub synergy: f64,
}

impl TeamRating {
    /// Effective ratings plus synergy
    pub fn mmr(&self) -> f64 {
        self.rating_sum + self.synergy
    }
}

/// Computes effective ratings and team MMR from skill records
#[derive(Debug, Clone, Default)]
pub struct SkillModel {
    config: SkillConfig,
}

impl SkillModel {
    pub fn new(config: SkillConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SkillConfig {
        &self.config
    }

    pub fn position_weight(&self, player: &PlayerSkill, position: Position) -> f64 {
        match Familiarity::of(player, position) {
            Familiarity::Primary => self.config.primary_weight,
            Familiarity::Secondary => self.config.secondary_weight,
            Familiarity::Unfamiliar => self.config.unfamiliar_weight,
        }
    }

    /// Multiplicative adjustment for recent form; 1.0 at neutral form
    pub fn form_factor(&self, player: &PlayerSkill) -> f64 {
        1.0 + (player.form - 0.5) * self.config.form_coefficient
    }

    pub fn effective_rating(&self, player: &PlayerSkill, position: Position) -> f64 {
        player.rating * self.position_weight(player, position) * self.form_factor(player)
    }

    /// Scaled sum of synergy over every pair of the given players
    pub fn team_synergy<'a, I>(&self, names: I, synergy: &SynergyTable) -> f64
    where
        I: IntoIterator<Item = &'a str>,
    {
        let names: Vec<&str> = names.into_iter().collect();
        let mut total = 0.0;
        for (i, first) in names.iter().enumerate() {
            for second in &names[i + 1..] {
                total += synergy.get(first, second);
            }
        }
        total * self.config.synergy_scale
    }

    /// Team rating for players at the given positions
    pub fn team_rating(&self, lineup: &[(&PlayerSkill, Position)], synergy: &SynergyTable) -> TeamRating {
        let rating_sum = lineup
            .iter()
            .map(|(player, position)| self.effective_rating(player, *position))
            .sum();
        let synergy = self.team_synergy(lineup.iter().map(|(player, _)| player.name.as_str()), synergy);

        TeamRating { rating_sum, synergy }
    }
}

/// Probability in (0, 1) that the side with `mmr` beats the side with `opponent_mmr`
pub fn win_probability(mmr: f64, opponent_mmr: f64) -> f64 {
    let (expected, _) = expected_score(&EloRating { rating: mmr }, &EloRating { rating: opponent_mmr });
    expected
}

/// Expected win rates in percent for both sides; they always sum to 100
pub fn expected_win_rates(mmr_a: f64, mmr_b: f64) -> (f64, f64) {
    let win_rate_a = win_probability(mmr_a, mmr_b) * 100.0;
    (win_rate_a, 100.0 - win_rate_a)
}
