//! Shared roster builders for integration testing

#![allow(dead_code)]

use scrim_balancer::types::{MatchOutcome, PlayerPool, PlayerSkill, Position, Side};

/// Ten players of equal rating, two per primary position
pub fn mirrored_roster(rating: f64) -> Vec<PlayerSkill> {
    (0..10)
        .map(|i| PlayerSkill::new(format!("player_{}", i), rating, Position::ALL[i % 5]))
        .collect()
}

/// Ten players with spread-out ratings and a few secondary positions
pub fn mixed_roster() -> Vec<PlayerSkill> {
    vec![
        PlayerSkill::new("ahri", 1850.0, Position::Mid).with_secondary(&[Position::Top]),
        PlayerSkill::new("brand", 1420.0, Position::Support).with_form(0.8),
        PlayerSkill::new("corki", 1610.0, Position::Bottom).with_secondary(&[Position::Mid]),
        PlayerSkill::new("darius", 1300.0, Position::Top).with_form(0.2),
        PlayerSkill::new("elise", 1555.0, Position::Jungle).with_secondary(&[Position::Support]),
        PlayerSkill::new("fiora", 1720.0, Position::Top).with_secondary(&[Position::Jungle]),
        PlayerSkill::new("graves", 1480.0, Position::Jungle),
        PlayerSkill::new("heimer", 1390.0, Position::Mid).with_secondary(&[Position::Support]),
        PlayerSkill::new("irelia", 1660.0, Position::Bottom),
        PlayerSkill::new("janna", 1505.0, Position::Support).with_secondary(&[Position::Bottom]),
    ]
}

/// A 4000-rated star fixed at Mid, four 1000-rated teammates and five
/// 1200-rated opponents, with every player pinned to their primary so the
/// star and the 1200-rated Mid can never share a side
pub fn forced_star_roster() -> Vec<PlayerSkill> {
    let mut players = vec![PlayerSkill::new("star", 4000.0, Position::Mid).with_fixed(Position::Mid)];
    for position in [Position::Top, Position::Jungle, Position::Bottom, Position::Support] {
        players.push(PlayerSkill::new(format!("low_{}", position), 1000.0, position).with_fixed(position));
    }
    for position in Position::ALL {
        players.push(PlayerSkill::new(format!("mid_{}", position), 1200.0, position).with_fixed(position));
    }
    players
}

/// Side A takes the first five players, side B the rest
pub fn outcome_for(players: &[PlayerSkill], winner: Side, duration_secs: f64) -> MatchOutcome {
    let names: Vec<String> = players.iter().map(|p| p.name.clone()).collect();
    MatchOutcome::new(names[..5].to_vec(), names[5..].to_vec(), winner, duration_secs)
}

pub fn pool(players: &[PlayerSkill]) -> PlayerPool {
    PlayerPool::from_players(players.iter().cloned())
}
