//! Lazy enumeration of 5v5 splits
//!
//! Every unordered split of the ten participants is produced exactly once:
//! the first participant always lands on side A, which removes mirror
//! duplicates and leaves C(9, 4) = 126 candidates. Splits that are provably
//! infeasible under fixed-position constraints are skipped before any
//! position search runs.

use crate::error::{BalancerError, Result};
use crate::types::{PlayerSkill, Side, MATCH_SIZE, TEAM_SIZE};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::trace;

/// Unordered split of the participants, stored as indices into the input slice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Partition {
    team_a: [usize; TEAM_SIZE],
    team_b: [usize; TEAM_SIZE],
}

impl Partition {
    /// Build from side A's indices; side B is the complement
    fn from_side_a(team_a: [usize; TEAM_SIZE]) -> Self {
        let mut team_b = [0; TEAM_SIZE];
        let mut next = 0;
        for index in 0..MATCH_SIZE {
            if !team_a.contains(&index) {
                team_b[next] = index;
                next += 1;
            }
        }
        Self { team_a, team_b }
    }

    pub fn side(&self, side: Side) -> &[usize; TEAM_SIZE] {
        match side {
            Side::A => &self.team_a,
            Side::B => &self.team_b,
        }
    }

    pub fn mirrored(&self) -> Partition {
        Partition {
            team_a: self.team_b,
            team_b: self.team_a,
        }
    }

    /// Orientation with participant 0 on side A
    pub fn canonical(&self) -> Partition {
        if self.team_a.contains(&0) {
            *self
        } else {
            self.mirrored()
        }
    }

    /// Whether two partitions are the same split, ignoring orientation
    pub fn same_split(&self, other: &Partition) -> bool {
        self.canonical() == other.canonical()
    }
}

/// Cheap structural check: can this team possibly satisfy its fixed positions?
pub fn is_structurally_feasible(players: &[PlayerSkill], team: &[usize]) -> bool {
    let mut claimed = HashSet::new();
    for &index in team {
        let player = &players[index];
        if player.fixed.len() > 1 {
            return false;
        }
        if let Some(position) = player.sole_fixed() {
            if !claimed.insert(position) {
                return false;
            }
        }
    }
    true
}

/// Iterator over feasible partitions of exactly ten players
#[derive(Debug, Clone)]
pub struct PartitionEnumerator<'a> {
    players: &'a [PlayerSkill],
    /// Side A partners of participant 0, in lexicographic order
    next_partners: Option<[usize; TEAM_SIZE - 1]>,
    skipped: usize,
}

impl<'a> PartitionEnumerator<'a> {
    /// Fails with `InvalidInputSize` unless given exactly ten distinct names
    pub fn new(players: &'a [PlayerSkill]) -> Result<Self> {
        if players.len() != MATCH_SIZE {
            return Err(BalancerError::InvalidInputSize {
                expected: MATCH_SIZE,
                actual: players.len(),
            });
        }
        let distinct: HashSet<&str> = players.iter().map(|p| p.name.as_str()).collect();
        if distinct.len() != MATCH_SIZE {
            return Err(BalancerError::InvalidInputSize {
                expected: MATCH_SIZE,
                actual: distinct.len(),
            });
        }

        Ok(Self {
            players,
            next_partners: Some([1, 2, 3, 4]),
            skipped: 0,
        })
    }

    /// Number of partitions rejected by the structural check so far
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    fn advance(partners: &mut [usize; TEAM_SIZE - 1]) -> bool {
        let k = partners.len();
        for i in (0..k).rev() {
            let max = MATCH_SIZE - k + i;
            if partners[i] < max {
                partners[i] += 1;
                for j in i + 1..k {
                    partners[j] = partners[j - 1] + 1;
                }
                return true;
            }
        }
        false
    }
}

impl Iterator for PartitionEnumerator<'_> {
    type Item = Partition;

    fn next(&mut self) -> Option<Partition> {
        while let Some(partners) = self.next_partners {
            let mut following = partners;
            self.next_partners = Self::advance(&mut following).then_some(following);

            let mut team_a = [0; TEAM_SIZE];
            team_a[1..].copy_from_slice(&partners);
            let partition = Partition::from_side_a(team_a);

            if is_structurally_feasible(self.players, partition.side(Side::A))
                && is_structurally_feasible(self.players, partition.side(Side::B))
            {
                return Some(partition);
            }

            trace!("Skipping structurally infeasible split {:?}", partition);
            self.skipped += 1;
        }
        None
    }
}
