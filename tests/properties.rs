//! Property-based tests for balancing and rating updates.
//!
//! Uses proptest to check the invariants that must hold for every roster and
//! every match outcome, not just the hand-picked scenarios.

use proptest::prelude::*;
use scrim_balancer::balance::{PartitionEnumerator, TeamBalancer};
use scrim_balancer::config::RatingConfig;
use scrim_balancer::rating::{DynamicEloCalculator, RatingCalculator};
use scrim_balancer::skill::SynergyTable;
use scrim_balancer::types::{MatchOutcome, PerformanceLine, PlayerPool, PlayerSkill, Position, Side};

fn roster() -> impl Strategy<Value = Vec<PlayerSkill>> {
    prop::collection::vec((800.0f64..2500.0, 0usize..5, 0.0f64..=1.0), 10).prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (rating, primary, form))| {
                PlayerSkill::new(format!("p{}", i), rating, Position::ALL[primary]).with_form(form)
            })
            .collect()
    })
}

fn performance() -> impl Strategy<Value = PerformanceLine> {
    (0u32..20, 0u32..15, 0u32..25).prop_map(|(kills, deaths, assists)| PerformanceLine {
        kills,
        deaths,
        assists,
    })
}

// =============================================================================
// Balancing Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    /// Unconstrained rosters always yield three ranked proposals whose win rates sum to 100
    #[test]
    fn prop_balance_returns_three_ranked_matches(players in roster()) {
        let matches = TeamBalancer::default().balance(&players, &SynergyTable::new()).unwrap();

        prop_assert_eq!(matches.len(), 3);
        for pair in matches.windows(2) {
            prop_assert!(pair[0].cost <= pair[1].cost);
            prop_assert!(!pair[0].partition.same_split(&pair[1].partition));
        }
        for scored in &matches {
            prop_assert!((scored.win_rate_a + scored.win_rate_b - 100.0).abs() < 1e-9);
            prop_assert!(scored.cost >= 0.0);
        }
    }

    /// An excluded position is never handed out, even when it is the primary
    #[test]
    fn prop_excluded_position_never_assigned(players in roster(), who in 0usize..10, offset in 0usize..5) {
        let mut players = players;
        let banned = Position::ALL[(players[who].primary.index() + offset) % 5];
        players[who].excluded.insert(banned);
        let name = players[who].name.clone();

        let matches = TeamBalancer::default().balance(&players, &SynergyTable::new()).unwrap();
        for scored in &matches {
            let side = scored.side_of(&name).unwrap();
            prop_assert_ne!(scored.team(side).assignment.position_of(&name), Some(banned));
        }
    }

    /// Ten unconstrained players always split exactly 126 ways
    #[test]
    fn prop_unconstrained_partition_count(players in roster()) {
        let enumerator = PartitionEnumerator::new(&players).unwrap();
        prop_assert_eq!(enumerator.count(), 126);
    }
}

// =============================================================================
// Rating Properties
// =============================================================================

proptest! {
    /// Uniform contributions make the update zero-sum with winners up and losers down
    #[test]
    fn prop_uniform_update_zero_sum(
        players in roster(),
        a_wins in any::<bool>(),
        duration in 0.0f64..4000.0,
        gold in -25_000.0f64..25_000.0,
        kills in -30.0f64..30.0,
    ) {
        let calculator = DynamicEloCalculator::new(RatingConfig::default()).unwrap();
        let winner = if a_wins { Side::A } else { Side::B };
        let names: Vec<String> = players.iter().map(|p| p.name.clone()).collect();
        let outcome = MatchOutcome::new(names[..5].to_vec(), names[5..].to_vec(), winner, duration)
            .with_margins(gold, kills);

        let result = calculator
            .calculate_rating_changes(&outcome, &PlayerPool::from_players(players), None)
            .unwrap();

        prop_assert_eq!(result.deltas.len(), 10);
        prop_assert!((result.side_total(Side::A) + result.side_total(Side::B)).abs() < 1e-6);
        prop_assert!(result.k_factor >= 16.0 && result.k_factor <= 64.0);
        for delta in &result.deltas {
            if delta.side == winner {
                prop_assert!(delta.delta >= 0.0);
            } else {
                prop_assert!(delta.delta <= 0.0);
            }
        }
    }

    /// Contribution weighting keeps every sign and each side's total change
    #[test]
    fn prop_weighted_update_keeps_signs(
        players in roster(),
        lines in prop::collection::vec(performance(), 10),
        a_wins in any::<bool>(),
    ) {
        let config = RatingConfig {
            contribution_weighting: true,
            ..RatingConfig::default()
        };
        let calculator = DynamicEloCalculator::new(config).unwrap();
        let uniform = DynamicEloCalculator::new(RatingConfig::default()).unwrap();

        let winner = if a_wins { Side::A } else { Side::B };
        let names: Vec<String> = players.iter().map(|p| p.name.clone()).collect();
        let mut outcome = MatchOutcome::new(names[..5].to_vec(), names[5..].to_vec(), winner, 1800.0);
        for (name, line) in names.iter().zip(lines) {
            outcome.performance.insert(name.clone(), line);
        }

        let pool = PlayerPool::from_players(players);
        let weighted = calculator.calculate_rating_changes(&outcome, &pool, None).unwrap();
        let baseline = uniform.calculate_rating_changes(&outcome, &pool, None).unwrap();

        for side in [Side::A, Side::B] {
            prop_assert!((weighted.side_total(side) - baseline.side_total(side)).abs() < 1e-6);
        }
        for delta in &weighted.deltas {
            if delta.side == winner {
                prop_assert!(delta.delta >= 0.0);
            } else {
                prop_assert!(delta.delta <= 0.0);
            }
        }
    }
}
