//! Full balancing search over all partitions of ten players

use crate::balance::assignment::{AssignmentOptimizer, TeamLineup};
use crate::balance::partition::{Partition, PartitionEnumerator};
use crate::balance::selector::{
    match_cost, AssignedPlayer, PositionAssignment, ResultSelector, ScoredMatch, TeamProposal,
};
use crate::config::BalanceConfig;
use crate::error::Result;
use crate::skill::{expected_win_rates, Familiarity, SkillModel, SynergyTable, TeamRating};
use crate::types::{PlayerSkill, Position, Side, TEAM_SIZE};
use tracing::{debug, trace};

/// Finds the most evenly matched 5v5 splits
#[derive(Debug, Clone)]
pub struct TeamBalancer {
    skill: SkillModel,
    optimizer: AssignmentOptimizer,
    selector: ResultSelector,
}

impl TeamBalancer {
    /// Create a balancer; fails if the configuration is invalid
    pub fn new(config: BalanceConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            skill: SkillModel::new(config.skill),
            optimizer: AssignmentOptimizer::new(config.penalties),
            selector: ResultSelector::new(config.top_k),
        })
    }

    pub fn skill_model(&self) -> &SkillModel {
        &self.skill
    }

    /// Return the lowest-cost distinct splits of exactly ten players
    pub fn balance(&self, players: &[PlayerSkill], synergy: &SynergyTable) -> Result<Vec<ScoredMatch>> {
        let mut enumerator = PartitionEnumerator::new(players)?;
        for player in players {
            player.validate()?;
        }

        let mut candidates = Vec::new();
        let mut rejected = 0usize;
        for partition in enumerator.by_ref() {
            match self.score_partition(players, partition, synergy) {
                Ok(scored) => candidates.push(scored),
                Err(e) => {
                    trace!("Rejected split: {}", e);
                    rejected += 1;
                }
            }
        }

        debug!(
            "Scored {} partitions ({} skipped structurally, {} without a valid assignment)",
            candidates.len(),
            enumerator.skipped(),
            rejected
        );

        self.selector.select(candidates)
    }

    /// Resolve positions for both sides and compute cost and win rates
    pub fn score_partition(
        &self,
        players: &[PlayerSkill],
        partition: Partition,
        synergy: &SynergyTable,
    ) -> Result<ScoredMatch> {
        let (team_a, penalty_a) = self.resolve_side(players, partition.side(Side::A), synergy)?;
        let (team_b, penalty_b) = self.resolve_side(players, partition.side(Side::B), synergy)?;

        let cost = match_cost(&team_a.rating, penalty_a, &team_b.rating, penalty_b);
        let (win_rate_a, win_rate_b) = expected_win_rates(team_a.mmr, team_b.mmr);

        Ok(ScoredMatch {
            partition,
            team_a,
            team_b,
            cost,
            win_rate_a,
            win_rate_b,
        })
    }

    fn resolve_side(
        &self,
        players: &[PlayerSkill],
        indices: &[usize; TEAM_SIZE],
        synergy: &SynergyTable,
    ) -> Result<(TeamProposal, f64)> {
        let team: Vec<&PlayerSkill> = indices.iter().map(|&index| &players[index]).collect();
        let lineup = self.optimizer.optimize(&team, synergy)?;

        let placed = placements(&team, &lineup);
        let rating: TeamRating = self.skill.team_rating(&placed, synergy);

        let slots = placed
            .iter()
            .map(|(player, position)| AssignedPlayer {
                position: *position,
                player: player.name.clone(),
                familiarity: Familiarity::of(player, *position),
                effective_rating: self.skill.effective_rating(player, *position),
            })
            .collect();

        let assignment = PositionAssignment {
            slots,
            penalty: lineup.penalty,
        };

        Ok((TeamProposal::new(assignment, rating), lineup.penalty))
    }
}

impl Default for TeamBalancer {
    fn default() -> Self {
        Self {
            skill: SkillModel::default(),
            optimizer: AssignmentOptimizer::default(),
            selector: ResultSelector::default(),
        }
    }
}

/// Players paired with their assigned positions, in canonical position order
fn placements<'a>(team: &[&'a PlayerSkill], lineup: &TeamLineup) -> Vec<(&'a PlayerSkill, Position)> {
    Position::ALL
        .iter()
        .zip(lineup.players.iter())
        .map(|(position, &local)| (team[local], *position))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BalancerError;

    fn mirrored_roster(rating: f64) -> Vec<PlayerSkill> {
        (0..10)
            .map(|i| PlayerSkill::new(format!("p{}", i), rating, Position::ALL[i % TEAM_SIZE]))
            .collect()
    }

    #[test]
    fn test_equal_players_balance_perfectly() {
        let players = mirrored_roster(1200.0);
        let matches = TeamBalancer::default()
            .balance(&players, &SynergyTable::new())
            .unwrap();

        assert_eq!(matches.len(), 3);
        let best = &matches[0];
        assert!(best.cost.abs() < 1e-9);
        assert!((best.win_rate_a - 50.0).abs() < 1e-9);
        assert_eq!(best.team_a.assignment.penalty, 0.0);
        assert_eq!(best.team_a.mmr, 6000.0);
    }

    #[test]
    fn test_synergy_shifts_mmr() {
        let players = mirrored_roster(1200.0);
        let mut synergy = SynergyTable::new();
        synergy.insert("p0", "p1", 50.0);

        let matches = TeamBalancer::default().balance(&players, &synergy).unwrap();
        for scored in &matches {
            let together = scored.side_of("p0") == scored.side_of("p1");
            let synergy_a = scored.team_a.rating.synergy;
            let synergy_b = scored.team_b.rating.synergy;
            if together {
                assert_eq!(synergy_a + synergy_b, 50.0);
            } else {
                assert_eq!(synergy_a + synergy_b, 0.0);
            }
        }
        // A zero-cost split keeps p0 and p1 apart
        assert!(matches[0].cost.abs() < 1e-9);
        assert_ne!(matches[0].side_of("p0"), matches[0].side_of("p1"));
    }

    #[test]
    fn test_non_finite_synergy_keeps_costs_finite() {
        let players = mirrored_roster(1200.0);
        let mut synergy = SynergyTable::new();
        synergy.insert("p0", "p1", f64::NAN);
        synergy.insert("p2", "p3", f64::INFINITY);

        let matches = TeamBalancer::default().balance(&players, &synergy).unwrap();
        for scored in &matches {
            assert!(scored.cost.is_finite());
            assert!(scored.win_rate_a.is_finite() && scored.win_rate_b.is_finite());
            assert_eq!(scored.team_a.rating.synergy + scored.team_b.rating.synergy, 0.0);
        }
    }

    #[test]
    fn test_invalid_player_record_rejected() {
        let mut players = mirrored_roster(1200.0);
        players[4].rating = f64::NAN;

        let result = TeamBalancer::default().balance(&players, &SynergyTable::new());
        assert!(matches!(result, Err(BalancerError::InvalidPlayer { player, .. }) if player == "p4"));
    }

    #[test]
    fn test_excluded_primary_moves_player_elsewhere() {
        let mut players = mirrored_roster(1200.0);
        let primary = players[4].primary;
        players[4].excluded.insert(primary);

        let matches = TeamBalancer::default()
            .balance(&players, &SynergyTable::new())
            .unwrap();
        assert_eq!(matches.len(), 3);
        for scored in &matches {
            let side = scored.side_of("p4").unwrap();
            let position = scored.team(side).assignment.position_of("p4");
            assert!(position.is_some());
            assert_ne!(position, Some(primary));
        }
    }

    #[test]
    fn test_fewer_feasible_splits_than_requested() {
        // Pinning everyone leaves only the 16 ways of choosing a side per position pair
        let players: Vec<PlayerSkill> = mirrored_roster(1200.0)
            .into_iter()
            .map(|player| {
                let primary = player.primary;
                player.with_fixed(primary)
            })
            .collect();
        let balancer = TeamBalancer::new(BalanceConfig {
            top_k: 20,
            ..BalanceConfig::default()
        })
        .unwrap();

        let matches = balancer.balance(&players, &SynergyTable::new()).unwrap();
        assert_eq!(matches.len(), 16);
        for (i, first) in matches.iter().enumerate() {
            for second in &matches[i + 1..] {
                assert!(!first.partition.same_split(&second.partition));
            }
        }
    }

    #[test]
    fn test_no_assignment_for_any_split() {
        // Every split passes the structural filter but nobody can play top
        let players: Vec<PlayerSkill> = mirrored_roster(1200.0)
            .into_iter()
            .map(|player| player.with_excluded(Position::Top))
            .collect();

        let mut enumerator = PartitionEnumerator::new(&players).unwrap();
        assert_eq!(enumerator.by_ref().count(), 126);
        assert_eq!(enumerator.skipped(), 0);

        let result = TeamBalancer::default().balance(&players, &SynergyTable::new());
        assert!(matches!(result, Err(BalancerError::NoFeasibleMatch { .. })));
    }

    #[test]
    fn test_wrong_player_count() {
        let players = mirrored_roster(1200.0)[..8].to_vec();
        let result = TeamBalancer::default().balance(&players, &SynergyTable::new());
        assert_eq!(
            result.unwrap_err(),
            BalancerError::InvalidInputSize {
                expected: 10,
                actual: 8
            }
        );
    }

    #[test]
    fn test_all_partitions_infeasible() {
        let mut players = mirrored_roster(1200.0);
        // Three players pinned to support can never fit two teams
        for player in players.iter_mut().take(3) {
            player.fixed.insert(Position::Support);
        }

        let result = TeamBalancer::default().balance(&players, &SynergyTable::new());
        assert!(matches!(result, Err(BalancerError::NoFeasibleMatch { .. })));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = BalanceConfig {
            top_k: 0,
            ..BalanceConfig::default()
        };
        assert!(TeamBalancer::new(config).is_err());
    }
}
