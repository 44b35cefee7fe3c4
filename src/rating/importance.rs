//! Dynamic K-factor from game length and score margin
//!
//! Short, lopsided games say more about the skill gap than long, even ones.
//! The duration factor eases from the short-game factor at the short-game
//! threshold down to the long-game factor at the long-game threshold along a
//! smoothstep curve. The margin factor grows linearly with the combined
//! gold/kill margin until it saturates at the cap. Their product scales the
//! base K, and the result is clamped to the configured band.

use crate::config::RatingConfig;
use crate::utils::smoothstep;
use serde::{Deserialize, Serialize};

/// Weighting applied to one finished match
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchImportance {
    pub duration_factor: f64,
    pub margin_factor: f64,
    /// Absolute gold margin with kills converted to gold
    pub score_margin: f64,
    pub k_factor: f64,
}

impl MatchImportance {
    pub fn evaluate(
        config: &RatingConfig,
        duration_secs: f64,
        gold_diff: Option<f64>,
        kill_diff: Option<f64>,
    ) -> Self {
        let duration_factor = duration_factor(config, duration_secs);
        let score_margin = score_margin(config, gold_diff, kill_diff);
        let margin_factor = margin_factor(config, score_margin);

        let k_factor = (config.k_base * duration_factor * margin_factor).clamp(config.min_k(), config.max_k());

        Self {
            duration_factor,
            margin_factor,
            score_margin,
            k_factor,
        }
    }
}

pub fn duration_factor(config: &RatingConfig, duration_secs: f64) -> f64 {
    let t = smoothstep(config.short_game_secs, config.long_game_secs, duration_secs);
    config.short_game_factor + (config.long_game_factor - config.short_game_factor) * t
}

pub fn score_margin(config: &RatingConfig, gold_diff: Option<f64>, kill_diff: Option<f64>) -> f64 {
    gold_diff.unwrap_or(0.0).abs() + kill_diff.unwrap_or(0.0).abs() * config.gold_per_kill
}

pub fn margin_factor(config: &RatingConfig, score_margin: f64) -> f64 {
    let saturation = (score_margin / config.margin_cap).min(1.0);
    1.0 + (config.max_margin_factor - 1.0) * saturation
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINUTE: f64 = 60.0;

    #[test]
    fn test_short_blowout_raises_k() {
        let config = RatingConfig::default();
        let importance = MatchImportance::evaluate(&config, 18.0 * MINUTE, Some(12_000.0), Some(15.0));

        assert_eq!(importance.duration_factor, 1.5);
        assert_eq!(importance.margin_factor, 1.5);
        assert!(importance.k_factor > config.k_base);
        // 32 * 2.25 clamps to 64
        assert_eq!(importance.k_factor, config.max_k());
    }

    #[test]
    fn test_long_even_game_lowers_k() {
        let config = RatingConfig::default();
        let importance = MatchImportance::evaluate(&config, 45.0 * MINUTE, Some(150.0), Some(0.0));

        assert!((importance.duration_factor - 0.6).abs() < 1e-12);
        assert!(importance.k_factor < config.k_base);
        assert!(importance.k_factor >= config.min_k());
    }

    #[test]
    fn test_duration_curve_continuous_and_monotonic() {
        let config = RatingConfig::default();
        let samples: Vec<f64> = (0..=60 * 60)
            .step_by(30)
            .map(|secs| duration_factor(&config, secs as f64))
            .collect();

        assert!(samples.windows(2).all(|w| w[1] <= w[0]));
        assert!(samples.windows(2).all(|w| (w[0] - w[1]).abs() < 0.05));
        assert!((duration_factor(&config, 30.0 * MINUTE) - 1.05).abs() < 1e-9);
    }

    #[test]
    fn test_margin_factor_saturates() {
        let config = RatingConfig::default();
        assert_eq!(score_margin(&config, Some(-4000.0), Some(-2.0)), 6000.0);
        assert_eq!(score_margin(&config, None, None), 0.0);

        assert_eq!(margin_factor(&config, 0.0), 1.0);
        assert!((margin_factor(&config, 5000.0) - 1.25).abs() < 1e-9);
        assert_eq!(margin_factor(&config, 50_000.0), 1.5);
    }

    #[test]
    fn test_k_always_within_band() {
        let config = RatingConfig::default();
        for minutes in [0.0, 10.0, 25.0, 35.0, 60.0, 120.0] {
            for gold in [0.0, 3000.0, 20_000.0] {
                let k = MatchImportance::evaluate(&config, minutes * MINUTE, Some(gold), None).k_factor;
                assert!(k >= config.min_k() && k <= config.max_k());
            }
        }
    }
}
