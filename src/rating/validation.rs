//! Validation passes over a reported match outcome
//!
//! Each check returns a tagged error so the caller can tell a malformed
//! roster from non-physical match data.

use crate::error::{BalancerError, Result};
use crate::types::{MatchOutcome, Position, Side, TEAM_SIZE};
use std::collections::HashSet;

/// Both rosters hold exactly five distinct players and do not overlap.
/// Recorded positions and scorelines only name roster members, and no
/// position is recorded twice on one side.
pub fn validate_rosters(outcome: &MatchOutcome) -> Result<()> {
    let invalid = |reason: String| BalancerError::InvalidRoster { reason };

    for side in [Side::A, Side::B] {
        let roster = outcome.roster(side);
        if roster.len() != TEAM_SIZE {
            return Err(invalid(format!(
                "side {} has {} players, expected {}",
                side,
                roster.len(),
                TEAM_SIZE
            )));
        }
        let distinct: HashSet<&str> = roster.iter().map(String::as_str).collect();
        if distinct.len() != TEAM_SIZE {
            return Err(invalid(format!("side {} lists a player twice", side)));
        }
    }

    let team_a: HashSet<&str> = outcome.team_a.iter().map(String::as_str).collect();
    if let Some(shared) = outcome.team_b.iter().find(|name| team_a.contains(name.as_str())) {
        return Err(invalid(format!("{} appears on both sides", shared)));
    }

    let roster: HashSet<&str> = team_a
        .iter()
        .copied()
        .chain(outcome.team_b.iter().map(String::as_str))
        .collect();
    let mut recorded: Vec<&str> = outcome
        .positions
        .keys()
        .chain(outcome.performance.keys())
        .map(String::as_str)
        .collect();
    recorded.sort_unstable();
    if let Some(stranger) = recorded.into_iter().find(|name| !roster.contains(name)) {
        return Err(invalid(format!("{} is recorded but not on either roster", stranger)));
    }

    for side in [Side::A, Side::B] {
        let mut taken: HashSet<Position> = HashSet::new();
        for name in outcome.roster(side) {
            if let Some(position) = outcome.positions.get(name) {
                if !taken.insert(*position) {
                    return Err(invalid(format!("side {} records {} twice", side, position)));
                }
            }
        }
    }

    Ok(())
}

/// Duration is a non-negative finite number and margins are finite
pub fn validate_match_data(outcome: &MatchOutcome) -> Result<()> {
    let invalid = |reason: &str| BalancerError::InvalidMatchData {
        reason: reason.to_string(),
    };

    if !outcome.duration_secs.is_finite() {
        return Err(invalid("duration must be finite"));
    }
    if outcome.duration_secs < 0.0 {
        return Err(invalid("duration must not be negative"));
    }
    if outcome.gold_diff.is_some_and(|gold| !gold.is_finite()) {
        return Err(invalid("gold difference must be finite"));
    }
    if outcome.kill_diff.is_some_and(|kills| !kills.is_finite()) {
        return Err(invalid("kill difference must be finite"));
    }

    Ok(())
}
