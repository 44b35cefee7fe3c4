//! Cost function and top-K selection of balanced matches

use crate::balance::partition::Partition;
use crate::error::{BalancerError, Result};
use crate::skill::{Familiarity, TeamRating};
use crate::types::{PlayerName, Position, Side};
use crate::utils::rating_difference;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One player's slot in a proposed lineup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignedPlayer {
    pub position: Position,
    pub player: PlayerName,
    pub familiarity: Familiarity,
    pub effective_rating: f64,
}

/// Position-to-player bijection for one side, in canonical position order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionAssignment {
    pub slots: Vec<AssignedPlayer>,
    pub penalty: f64,
}

impl PositionAssignment {
    pub fn player_at(&self, position: Position) -> Option<&str> {
        self.slots
            .iter()
            .find(|slot| slot.position == position)
            .map(|slot| slot.player.as_str())
    }

    pub fn position_of(&self, player: &str) -> Option<Position> {
        self.slots
            .iter()
            .find(|slot| slot.player == player)
            .map(|slot| slot.position)
    }

    pub fn players(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().map(|slot| slot.player.as_str())
    }
}

/// One side of a proposal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamProposal {
    pub assignment: PositionAssignment,
    pub rating: TeamRating,
    pub mmr: f64,
}

impl TeamProposal {
    pub fn new(assignment: PositionAssignment, rating: TeamRating) -> Self {
        Self {
            assignment,
            mmr: rating.mmr(),
            rating,
        }
    }
}

/// A scored partition ready for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredMatch {
    pub partition: Partition,
    pub team_a: TeamProposal,
    pub team_b: TeamProposal,
    /// Lower is better balanced
    pub cost: f64,
    /// Expected win rate of side A in percent
    pub win_rate_a: f64,
    /// Expected win rate of side B in percent; `100 - win_rate_a`
    pub win_rate_b: f64,
}

impl ScoredMatch {
    pub fn team(&self, side: Side) -> &TeamProposal {
        match side {
            Side::A => &self.team_a,
            Side::B => &self.team_b,
        }
    }

    /// Which side a player was placed on
    pub fn side_of(&self, player: &str) -> Option<Side> {
        [Side::A, Side::B]
            .into_iter()
            .find(|side| self.team(*side).assignment.position_of(player).is_some())
    }
}

/// Balance cost: MMR gap plus both sides' position penalties
pub fn match_cost(team_a: &TeamRating, penalty_a: f64, team_b: &TeamRating, penalty_b: f64) -> f64 {
    rating_difference(team_a.mmr(), team_b.mmr()) + penalty_a + penalty_b
}

/// Ranks scored partitions and keeps the best distinct ones
#[derive(Debug, Clone)]
pub struct ResultSelector {
    top_k: usize,
}

impl ResultSelector {
    pub fn new(top_k: usize) -> Self {
        Self { top_k }
    }

    /// Sort ascending by cost (stable on input order) and keep up to `top_k`
    /// partitions, never two that are mirrors of each other.
    pub fn select(&self, mut candidates: Vec<ScoredMatch>) -> Result<Vec<ScoredMatch>> {
        if candidates.is_empty() {
            return Err(BalancerError::NoFeasibleMatch {
                reason: "constraints eliminate every partition".to_string(),
            });
        }

        let evaluated = candidates.len();
        candidates.sort_by(|a, b| a.cost.total_cmp(&b.cost));

        let mut selected: Vec<ScoredMatch> = Vec::with_capacity(self.top_k);
        for candidate in candidates {
            if selected.len() == self.top_k {
                break;
            }
            if selected
                .iter()
                .any(|chosen| chosen.partition.same_split(&candidate.partition))
            {
                continue;
            }
            selected.push(candidate);
        }

        if let Some(best) = selected.first() {
            debug!(
                "Selected {} of {} feasible partitions (best cost {:.2})",
                selected.len(),
                evaluated,
                best.cost
            );
        }

        Ok(selected)
    }
}

impl Default for ResultSelector {
    fn default() -> Self {
        Self::new(3)
    }
}
