//! Minimum-penalty position assignment for a single team
//!
//! With five players and five positions the assignment problem has only 120
//! candidate bijections, so the optimizer walks all of them in lexicographic
//! order and keeps the exact minimum.

use crate::config::PenaltyConfig;
use crate::error::{BalancerError, Result};
use crate::skill::{Familiarity, SynergyTable};
use crate::types::{PlayerSkill, Position, TEAM_SIZE};
use crate::utils::ratings_within_tolerance;

/// Role pairs whose synergy breaks ties between equal-penalty assignments
pub const ADJACENT_ROLES: [(Position, Position); 3] = [
    (Position::Top, Position::Jungle),
    (Position::Jungle, Position::Mid),
    (Position::Bottom, Position::Support),
];

/// Penalties closer than this are considered equal
const PENALTY_EPSILON: f64 = 1e-9;

/// Best assignment found for one team
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TeamLineup {
    /// `players[p]` is the team-local index of the player at `Position::ALL[p]`
    pub players: [usize; TEAM_SIZE],
    pub penalty: f64,
    pub adjacent_synergy: f64,
}

impl TeamLineup {
    /// Position of a team-local player index
    pub fn position_of(&self, local: usize) -> Option<Position> {
        self.players
            .iter()
            .position(|&player| player == local)
            .map(|p| Position::ALL[p])
    }
}

/// Exhaustive search over the 120 position permutations
#[derive(Debug, Clone)]
pub struct AssignmentOptimizer {
    penalties: PenaltyConfig,
    permutations: Vec<[usize; TEAM_SIZE]>,
}

impl AssignmentOptimizer {
    pub fn new(penalties: PenaltyConfig) -> Self {
        Self {
            penalties,
            permutations: lexicographic_permutations(),
        }
    }

    /// Penalty for a player at a position; `None` when constraints forbid it
    pub fn position_penalty(&self, player: &PlayerSkill, position: Position) -> Option<f64> {
        if !player.allows(position) {
            return None;
        }
        Some(match Familiarity::of(player, position) {
            Familiarity::Primary => self.penalties.primary,
            Familiarity::Secondary => self.penalties.secondary,
            Familiarity::Unfamiliar => self.penalties.unfamiliar,
        })
    }

    /// Find the minimum-penalty lineup for exactly five players
    ///
    /// Ties on penalty go to the higher adjacent-role synergy, then to the
    /// earliest permutation. Fails with `NoFeasibleMatch` when constraints
    /// leave no valid bijection.
    pub fn optimize(&self, team: &[&PlayerSkill], synergy: &SynergyTable) -> Result<TeamLineup> {
        if team.len() != TEAM_SIZE {
            return Err(BalancerError::InvalidInputSize {
                expected: TEAM_SIZE,
                actual: team.len(),
            });
        }

        let mut penalty = [[None; TEAM_SIZE]; TEAM_SIZE];
        for (local, player) in team.iter().enumerate() {
            for position in Position::ALL {
                penalty[local][position.index()] = self.position_penalty(player, position);
            }
        }

        let mut pair_synergy = [[0.0; TEAM_SIZE]; TEAM_SIZE];
        for i in 0..TEAM_SIZE {
            for j in i + 1..TEAM_SIZE {
                let bonus = synergy.get(&team[i].name, &team[j].name);
                pair_synergy[i][j] = bonus;
                pair_synergy[j][i] = bonus;
            }
        }

        let mut best: Option<TeamLineup> = None;
        'permutations: for players in &self.permutations {
            let mut total = 0.0;
            for (p, &local) in players.iter().enumerate() {
                match penalty[local][p] {
                    Some(value) => total += value,
                    None => continue 'permutations,
                }
            }

            let adjacent_synergy: f64 = ADJACENT_ROLES
                .iter()
                .map(|(first, second)| pair_synergy[players[first.index()]][players[second.index()]])
                .sum();

            let better = match &best {
                None => true,
                Some(current) if ratings_within_tolerance(total, current.penalty, PENALTY_EPSILON) => {
                    adjacent_synergy > current.adjacent_synergy
                }
                Some(current) => total < current.penalty,
            };

            if better {
                best = Some(TeamLineup {
                    players: *players,
                    penalty: total,
                    adjacent_synergy,
                });
            }
        }

        best.ok_or_else(|| BalancerError::NoFeasibleMatch {
            reason: format!(
                "no position assignment satisfies constraints for team [{}]",
                team.iter().map(|p| p.name.as_str()).collect::<Vec<_>>().join(", ")
            ),
        })
    }
}

impl Default for AssignmentOptimizer {
    fn default() -> Self {
        Self::new(PenaltyConfig::default())
    }
}

/// All permutations of `0..TEAM_SIZE` in lexicographic order
fn lexicographic_permutations() -> Vec<[usize; TEAM_SIZE]> {
    let mut current: [usize; TEAM_SIZE] = [0, 1, 2, 3, 4];
    let mut all = vec![current];

    loop {
        // Standard next-permutation step
        let Some(pivot) = (0..TEAM_SIZE - 1).rev().find(|&i| current[i] < current[i + 1]) else {
            break;
        };
        let successor = (pivot + 1..TEAM_SIZE)
            .rev()
            .find(|&j| current[j] > current[pivot])
            .unwrap_or(pivot + 1);
        current.swap(pivot, successor);
        current[pivot + 1..].reverse();
        all.push(current);
    }

    all
}
