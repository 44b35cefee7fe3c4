//! Per-player contribution weights
//!
//! A player's scoreline maps to a raw weight inside the configured bounds.
//! The team's weights are then rescaled so they sum to the team size while
//! every weight stays within bounds.

use crate::config::RatingConfig;
use crate::types::PerformanceLine;

/// KDA normalized to [0, 1]: a 0.5 KDA scores 0, a 3.0 KDA or better scores 1
pub fn kda_score(line: &PerformanceLine) -> f64 {
    let kda = f64::from(line.kills + line.assists) / f64::from(line.deaths.max(1));
    ((kda - 0.5) / 2.5).clamp(0.0, 1.0)
}

/// Map a scoreline (or its absence) to a raw weight within bounds
pub fn raw_weight(config: &RatingConfig, line: Option<&PerformanceLine>) -> f64 {
    match line {
        Some(line) => {
            config.min_contribution + kda_score(line) * (config.max_contribution - config.min_contribution)
        }
        None => 1.0,
    }
}

/// Rescale raw weights so they sum to their count while staying in bounds
///
/// Weights that would leave the band are pinned to the nearest bound and the
/// remainder is spread over the others proportionally. Each pass pins at
/// least one weight or finishes, so this ends within `raw.len()` passes.
pub fn normalize_weights(raw: &[f64], min: f64, max: f64) -> Vec<f64> {
    let target = raw.len() as f64;
    let mut weights = raw.to_vec();
    let mut pinned = vec![false; raw.len()];

    for _ in 0..=raw.len() {
        let pinned_sum: f64 = weights
            .iter()
            .zip(&pinned)
            .filter(|(_, &is_pinned)| is_pinned)
            .map(|(w, _)| w)
            .sum();
        let free_sum: f64 = raw
            .iter()
            .zip(&pinned)
            .filter(|(_, &is_pinned)| !is_pinned)
            .map(|(w, _)| w)
            .sum();
        if free_sum <= 0.0 {
            break;
        }

        let scale = (target - pinned_sum) / free_sum;
        let mut changed = false;
        for i in 0..raw.len() {
            if pinned[i] {
                continue;
            }
            let scaled = raw[i] * scale;
            if scaled > max {
                weights[i] = max;
                pinned[i] = true;
                changed = true;
            } else if scaled < min {
                weights[i] = min;
                pinned[i] = true;
                changed = true;
            } else {
                weights[i] = scaled;
            }
        }

        if !changed {
            break;
        }
    }

    weights
}

/// Contribution weights for one roster, in roster order
pub fn team_contributions(config: &RatingConfig, lines: &[Option<&PerformanceLine>]) -> Vec<f64> {
    if !config.contribution_weighting {
        return vec![1.0; lines.len()];
    }

    let raw: Vec<f64> = lines.iter().map(|line| raw_weight(config, *line)).collect();
    normalize_weights(&raw, config.min_contribution, config.max_contribution)
}
