//! Pairwise synergy lookup
//!
//! Entries are unordered: `(a, b)` and `(b, a)` address the same value.
//! Absent pairs count as zero.

use crate::types::PlayerName;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

/// Historical joint-performance adjustment between two players
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynergyEntry {
    pub first: PlayerName,
    pub second: PlayerName,
    pub bonus: f64,
}

impl SynergyEntry {
    pub fn new(first: impl Into<PlayerName>, second: impl Into<PlayerName>, bonus: f64) -> Self {
        Self {
            first: first.into(),
            second: second.into(),
            bonus,
        }
    }
}

/// Symmetric synergy table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<SynergyEntry>", into = "Vec<SynergyEntry>")]
pub struct SynergyTable {
    bonuses: HashMap<PlayerName, HashMap<PlayerName, f64>>,
}

impl SynergyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the bonus for an unordered pair.
    ///
    /// Self-pairs and non-finite bonuses are ignored, leaving any earlier
    /// value for the pair in place.
    pub fn insert(&mut self, first: &str, second: &str, bonus: f64) {
        if first == second {
            return;
        }
        if !bonus.is_finite() {
            warn!("Ignoring non-finite synergy {} for {} and {}", bonus, first, second);
            return;
        }
        self.bonuses
            .entry(first.to_string())
            .or_default()
            .insert(second.to_string(), bonus);
        self.bonuses
            .entry(second.to_string())
            .or_default()
            .insert(first.to_string(), bonus);
    }

    /// Insert every entry, replacing the pairs it names
    pub fn apply<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = SynergyEntry>,
    {
        for entry in entries {
            self.insert(&entry.first, &entry.second, entry.bonus);
        }
    }

    /// Bonus for a pair, zero when unknown
    pub fn get(&self, first: &str, second: &str) -> f64 {
        self.bonuses
            .get(first)
            .and_then(|partners| partners.get(second))
            .copied()
            .unwrap_or(0.0)
    }

    /// Number of distinct pairs
    pub fn len(&self) -> usize {
        self.bonuses.values().map(HashMap::len).sum::<usize>() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.bonuses.is_empty()
    }

    /// All pairs once each, ordered by name for stable output
    pub fn entries(&self) -> Vec<SynergyEntry> {
        let mut entries: Vec<SynergyEntry> = self
            .bonuses
            .iter()
            .flat_map(|(first, partners)| {
                partners
                    .iter()
                    .filter(move |(second, _)| first < *second)
                    .map(move |(second, bonus)| SynergyEntry::new(first.clone(), second.clone(), *bonus))
            })
            .collect();
        entries.sort_by(|a, b| (&a.first, &a.second).cmp(&(&b.first, &b.second)));
        entries
    }
}

impl FromIterator<SynergyEntry> for SynergyTable {
    fn from_iter<I: IntoIterator<Item = SynergyEntry>>(iter: I) -> Self {
        let mut table = SynergyTable::new();
        table.apply(iter);
        table
    }
}

impl From<Vec<SynergyEntry>> for SynergyTable {
    fn from(entries: Vec<SynergyEntry>) -> Self {
        entries.into_iter().collect()
    }
}

impl From<SynergyTable> for Vec<SynergyEntry> {
    fn from(table: SynergyTable) -> Self {
        table.entries()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_symmetric() {
        let mut table = SynergyTable::new();
        table.insert("ahri", "lee", 12.0);

        assert_eq!(table.get("ahri", "lee"), 12.0);
        assert_eq!(table.get("lee", "ahri"), 12.0);
        assert_eq!(table.get("ahri", "nami"), 0.0);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_insert_replaces_and_ignores_self_pairs() {
        let mut table = SynergyTable::new();
        table.insert("ahri", "lee", 12.0);
        table.insert("lee", "ahri", -4.0);
        table.insert("ahri", "ahri", 99.0);

        assert_eq!(table.get("ahri", "lee"), -4.0);
        assert_eq!(table.get("ahri", "ahri"), 0.0);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_non_finite_bonus_ignored() {
        let mut table = SynergyTable::new();
        table.insert("ahri", "lee", 12.0);
        table.insert("ahri", "lee", f64::NAN);
        table.insert("ahri", "nami", f64::INFINITY);
        table.insert("lee", "nami", f64::NEG_INFINITY);

        assert_eq!(table.get("ahri", "lee"), 12.0);
        assert_eq!(table.get("ahri", "nami"), 0.0);
        assert_eq!(table.len(), 1);

        let collected: SynergyTable = vec![
            SynergyEntry::new("a", "b", f64::NAN),
            SynergyEntry::new("a", "c", 3.0),
        ]
        .into_iter()
        .collect();
        assert_eq!(collected.entries(), vec![SynergyEntry::new("a", "c", 3.0)]);
    }

    #[test]
    fn test_apply_replaces_named_pairs_only() {
        let mut table = SynergyTable::new();
        table.insert("a", "b", 1.0);
        table.insert("a", "c", 2.0);

        table.apply(vec![SynergyEntry::new("b", "a", 0.5), SynergyEntry::new("c", "d", -1.0)]);
        assert_eq!(table.get("a", "b"), 0.5);
        assert_eq!(table.get("a", "c"), 2.0);
        assert_eq!(table.get("d", "c"), -1.0);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_json_round_trip_as_entry_list() {
        let table: SynergyTable = vec![
            SynergyEntry::new("b", "a", 5.0),
            SynergyEntry::new("c", "a", -2.5),
        ]
        .into();

        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 2);
        assert_eq!(json[0]["first"], "a");
        assert_eq!(json[0]["second"], "b");

        let parsed: SynergyTable = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, table);
    }
}
