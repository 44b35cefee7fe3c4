//! Common types shared by the balancer and the rating engine

use crate::error::{BalancerError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::str::FromStr;

/// Unique player identifier (display name)
pub type PlayerName = String;

/// Number of players per side
pub const TEAM_SIZE: usize = 5;

/// Number of participants in a match
pub const MATCH_SIZE: usize = TEAM_SIZE * 2;

/// The five standard roles, in canonical order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Position {
    Top,
    Jungle,
    Mid,
    Bottom,
    Support,
}

impl Position {
    pub const ALL: [Position; TEAM_SIZE] = [
        Position::Top,
        Position::Jungle,
        Position::Mid,
        Position::Bottom,
        Position::Support,
    ];

    /// Index in canonical order
    pub fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Position::Top => write!(f, "TOP"),
            Position::Jungle => write!(f, "JUNGLE"),
            Position::Mid => write!(f, "MID"),
            Position::Bottom => write!(f, "BOTTOM"),
            Position::Support => write!(f, "SUPPORT"),
        }
    }
}

impl FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "top" => Ok(Position::Top),
            "jungle" | "jg" => Ok(Position::Jungle),
            "mid" | "middle" => Ok(Position::Mid),
            "bottom" | "bot" | "adc" => Ok(Position::Bottom),
            "support" | "utility" | "sup" => Ok(Position::Support),
            other => Err(format!("Unknown position: {}", other)),
        }
    }
}

impl TryFrom<String> for Position {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Position> for String {
    fn from(position: Position) -> Self {
        position.to_string()
    }
}

/// One of the two sides of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    A,
    B,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::A => write!(f, "A"),
            Side::B => write!(f, "B"),
        }
    }
}

fn default_form() -> f64 {
    0.5
}

/// Skill record for one participant, owned by the player-management layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSkill {
    pub name: PlayerName,
    pub rating: f64,
    pub primary: Position,
    #[serde(default)]
    pub secondary: Vec<Position>,
    /// Recent performance trend in [0, 1]; 0.5 is neutral
    #[serde(default = "default_form")]
    pub form: f64,
    /// Must-play positions
    #[serde(default)]
    pub fixed: BTreeSet<Position>,
    /// Must-not-play positions
    #[serde(default)]
    pub excluded: BTreeSet<Position>,
}

impl PlayerSkill {
    pub fn new(name: impl Into<PlayerName>, rating: f64, primary: Position) -> Self {
        Self {
            name: name.into(),
            rating,
            primary,
            secondary: Vec::new(),
            form: default_form(),
            fixed: BTreeSet::new(),
            excluded: BTreeSet::new(),
        }
    }

    pub fn with_secondary(mut self, positions: &[Position]) -> Self {
        self.secondary = positions.to_vec();
        self
    }

    pub fn with_form(mut self, form: f64) -> Self {
        self.form = form;
        self
    }

    pub fn with_fixed(mut self, position: Position) -> Self {
        self.fixed.insert(position);
        self
    }

    pub fn with_excluded(mut self, position: Position) -> Self {
        self.excluded.insert(position);
        self
    }

    /// Whether constraints allow this player at `position`
    pub fn allows(&self, position: Position) -> bool {
        if self.excluded.contains(&position) {
            return false;
        }
        self.fixed.is_empty() || self.fixed.contains(&position)
    }

    /// The single position this player is pinned to, if any
    pub fn sole_fixed(&self) -> Option<Position> {
        if self.fixed.len() == 1 {
            self.fixed.iter().next().copied()
        } else {
            None
        }
    }

    /// Check the record invariants
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: &str| BalancerError::InvalidPlayer {
            player: self.name.clone(),
            reason: reason.to_string(),
        };

        if self.name.trim().is_empty() {
            return Err(invalid("name must not be empty"));
        }
        if !self.rating.is_finite() {
            return Err(invalid("rating must be finite"));
        }
        if !self.form.is_finite() || !(0.0..=1.0).contains(&self.form) {
            return Err(invalid("form must be within [0, 1]"));
        }
        if self.fixed.intersection(&self.excluded).next().is_some() {
            return Err(invalid("fixed and excluded positions overlap"));
        }

        Ok(())
    }
}

/// Read-only snapshot of skill records keyed by name
#[derive(Debug, Clone, Default)]
pub struct PlayerPool {
    players: HashMap<PlayerName, PlayerSkill>,
}

impl PlayerPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_players<I>(players: I) -> Self
    where
        I: IntoIterator<Item = PlayerSkill>,
    {
        Self {
            players: players
                .into_iter()
                .map(|player| (player.name.clone(), player))
                .collect(),
        }
    }

    pub fn insert(&mut self, player: PlayerSkill) {
        self.players.insert(player.name.clone(), player);
    }

    /// Look up a record, failing if the snapshot is incomplete
    pub fn get(&self, name: &str) -> Result<&PlayerSkill> {
        self.players
            .get(name)
            .ok_or_else(|| BalancerError::MissingPlayerRecord {
                player: name.to_string(),
            })
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

/// Individual scoreline used for contribution weighting
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceLine {
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
}

/// A finished match as reported by the match-recording layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub team_a: Vec<PlayerName>,
    pub team_b: Vec<PlayerName>,
    pub winner: Side,
    pub duration_secs: f64,
    /// Team gold difference from side A's perspective
    #[serde(default)]
    pub gold_diff: Option<f64>,
    /// Team kill difference from side A's perspective
    #[serde(default)]
    pub kill_diff: Option<f64>,
    /// Positions played; players missing here are rated at their primary
    #[serde(default)]
    pub positions: HashMap<PlayerName, Position>,
    #[serde(default)]
    pub performance: HashMap<PlayerName, PerformanceLine>,
}

impl MatchOutcome {
    pub fn new(team_a: Vec<PlayerName>, team_b: Vec<PlayerName>, winner: Side, duration_secs: f64) -> Self {
        Self {
            team_a,
            team_b,
            winner,
            duration_secs,
            gold_diff: None,
            kill_diff: None,
            positions: HashMap::new(),
            performance: HashMap::new(),
        }
    }

    pub fn with_margins(mut self, gold_diff: f64, kill_diff: f64) -> Self {
        self.gold_diff = Some(gold_diff);
        self.kill_diff = Some(kill_diff);
        self
    }

    pub fn roster(&self, side: Side) -> &[PlayerName] {
        match side {
            Side::A => &self.team_a,
            Side::B => &self.team_b,
        }
    }
}
