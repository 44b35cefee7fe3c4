//! Rating calculator trait and result types
//!
//! This module defines the interface for post-match rating updates. The
//! production implementation is the dynamic-K Elo calculator; the trait is
//! the seam for alternative engines.

use crate::error::Result;
use crate::skill::SynergyTable;
use crate::types::{MatchOutcome, PlayerName, PlayerPool, Side};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Signed rating change for one participant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingDelta {
    pub player: PlayerName,
    pub side: Side,
    pub delta: f64,
}

/// Result of a rating calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingUpdateResult {
    /// One delta per participant, side A first
    pub deltas: Vec<RatingDelta>,
    /// Effective K-factor after duration and margin weighting
    pub k_factor: f64,
    /// Side A's pre-match win probability in (0, 1)
    pub expected_a: f64,
    pub mmr_a: f64,
    pub mmr_b: f64,
}

impl RatingUpdateResult {
    pub fn delta_for(&self, player: &str) -> Option<f64> {
        self.deltas
            .iter()
            .find(|delta| delta.player == player)
            .map(|delta| delta.delta)
    }

    /// Sum of deltas on one side
    pub fn side_total(&self, side: Side) -> f64 {
        self.deltas
            .iter()
            .filter(|delta| delta.side == side)
            .map(|delta| delta.delta)
            .sum()
    }

    /// Name-to-delta mapping for the persistence layer
    pub fn as_map(&self) -> HashMap<PlayerName, f64> {
        self.deltas
            .iter()
            .map(|delta| (delta.player.clone(), delta.delta))
            .collect()
    }
}

/// Trait for calculating rating changes after games
pub trait RatingCalculator: Send + Sync {
    /// Calculate rating deltas for every participant of a finished match
    ///
    /// # Arguments
    /// * `outcome` - Rosters, winner, duration and margin signals
    /// * `players` - Skill snapshot covering all ten participants
    /// * `synergy` - Optional synergy lookup feeding team MMR
    ///
    /// # Returns
    /// All ten deltas, or an error with no partial result
    fn calculate_rating_changes(
        &self,
        outcome: &MatchOutcome,
        players: &PlayerPool,
        synergy: Option<&SynergyTable>,
    ) -> Result<RatingUpdateResult>;

    /// Get current configuration as JSON
    fn config(&self) -> serde_json::Value;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result() -> RatingUpdateResult {
        RatingUpdateResult {
            deltas: vec![
                RatingDelta {
                    player: "a1".to_string(),
                    side: Side::A,
                    delta: 12.0,
                },
                RatingDelta {
                    player: "a2".to_string(),
                    side: Side::A,
                    delta: 4.0,
                },
                RatingDelta {
                    player: "b1".to_string(),
                    side: Side::B,
                    delta: -16.0,
                },
            ],
            k_factor: 32.0,
            expected_a: 0.5,
            mmr_a: 6000.0,
            mmr_b: 6000.0,
        }
    }

    #[test]
    fn test_side_totals() {
        let result = result();
        assert_eq!(result.side_total(Side::A), 16.0);
        assert_eq!(result.side_total(Side::B), -16.0);
    }

    #[test]
    fn test_lookup_and_map() {
        let result = result();
        assert_eq!(result.delta_for("a2"), Some(4.0));
        assert_eq!(result.delta_for("nobody"), None);

        let map = result.as_map();
        assert_eq!(map.len(), 3);
        assert_eq!(map["b1"], -16.0);
    }
}
