//! Command line driver for the scrim balancer
//!
//! Reads players, synergy and match results as JSON files, runs the balancer
//! or the rating engine and synergy learner, and prints the result as JSON on
//! stdout.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use scrim_balancer::config::{startup_banner, AppConfig};
use scrim_balancer::utils::round_to;
use scrim_balancer::{Matchmaker, MatchOutcome, PlayerPool, PlayerSkill, ScoredMatch, SynergyTable};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tracing::info;

/// Scrim Balancer - fair 5v5 teams and dynamic-K rating updates
#[derive(Parser)]
#[command(
    name = "scrim-balancer",
    version,
    about = "Balance ten players into two teams of five and rate finished matches",
    long_about = "Scrim Balancer enumerates every 5v5 split of ten players, assigns positions \
                 on each side, and proposes the most evenly matched teams. After a match it \
                 computes Elo rating deltas weighted by game length and score margin."
)]
struct Args {
    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// Enable debug mode
    #[arg(short, long, help = "Enable debug mode with verbose logging")]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Propose the most balanced splits of ten players
    Balance {
        /// JSON array of player skill records
        #[arg(short, long, value_name = "FILE")]
        players: PathBuf,

        /// JSON array of synergy entries
        #[arg(short, long, value_name = "FILE")]
        synergy: Option<PathBuf>,
    },
    /// Compute rating deltas and learned synergy for a finished match
    Rate {
        /// JSON array of player skill records covering both rosters
        #[arg(short, long, value_name = "FILE")]
        players: PathBuf,

        /// JSON match outcome
        #[arg(short, long, value_name = "FILE")]
        outcome: PathBuf,

        /// JSON array of synergy entries
        #[arg(short, long, value_name = "FILE")]
        synergy: Option<PathBuf>,
    },
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_target(false)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Log service information once logging is up
fn display_startup_banner(config: &AppConfig) {
    info!("{}", startup_banner(config));
    info!("   Log level: {}", config.service.log_level);
    info!("   Proposals per balance: {}", config.balance.top_k);
    info!("   Base K: {}", config.rating.k_base);
    info!(
        "   Contribution weighting: {}",
        config.rating.contribution_weighting
    );
}

/// Load configuration and apply CLI overrides
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }

    if args.debug {
        config.service.log_level = "debug".to_string();
    }

    Ok(config)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("Failed to parse {}", path.display()))
}

fn read_synergy(path: Option<&Path>) -> Result<SynergyTable> {
    match path {
        Some(path) => read_json(path),
        None => Ok(SynergyTable::new()),
    }
}

fn render_match(rank: usize, scored: &ScoredMatch) -> Value {
    let team = |proposal: &scrim_balancer::balance::TeamProposal| {
        let lineup: Vec<Value> = proposal
            .assignment
            .slots
            .iter()
            .map(|slot| {
                json!({
                    "position": slot.position,
                    "player": slot.player,
                    "effective_rating": round_to(slot.effective_rating, 1),
                })
            })
            .collect();
        json!({
            "mmr": round_to(proposal.mmr, 1),
            "penalty": proposal.assignment.penalty,
            "lineup": lineup,
        })
    };

    json!({
        "rank": rank,
        "cost": round_to(scored.cost, 2),
        "win_rate_a": round_to(scored.win_rate_a, 2),
        "win_rate_b": round_to(scored.win_rate_b, 2),
        "team_a": team(&scored.team_a),
        "team_b": team(&scored.team_b),
    })
}

fn run(matchmaker: &Matchmaker, command: &Command) -> Result<Value> {
    match command {
        Command::Balance { players, synergy } => {
            let players: Vec<PlayerSkill> = read_json(players)?;
            let synergy = read_synergy(synergy.as_deref())?;

            let matches = matchmaker.balance(&players, &synergy)?;
            info!("Proposed {} balanced splits", matches.len());

            let rendered: Vec<Value> = matches
                .iter()
                .enumerate()
                .map(|(i, scored)| render_match(i + 1, scored))
                .collect();
            Ok(Value::Array(rendered))
        }
        Command::Rate {
            players,
            outcome,
            synergy,
        } => {
            let players: Vec<PlayerSkill> = read_json(players)?;
            let outcome: MatchOutcome = read_json(outcome)?;
            let synergy = synergy.as_deref().map(|path| read_synergy(Some(path))).transpose()?;

            let pool = PlayerPool::from_players(players);
            let result = matchmaker.update_ratings(&outcome, &pool, synergy.as_ref())?;
            let current = synergy.unwrap_or_default();
            let learned = matchmaker.learn_synergy(&outcome, &current)?;
            info!("Rated match won by side {}", outcome.winner);

            let deltas: Vec<Value> = result
                .deltas
                .iter()
                .map(|delta| {
                    json!({
                        "player": delta.player,
                        "side": delta.side,
                        "delta": round_to(delta.delta, 2),
                    })
                })
                .collect();
            let synergy: Vec<Value> = learned
                .iter()
                .map(|entry| {
                    json!({
                        "first": entry.first,
                        "second": entry.second,
                        "bonus": round_to(entry.bonus, 4),
                    })
                })
                .collect();
            Ok(json!({
                "k_factor": round_to(result.k_factor, 2),
                "expected_a": round_to(result.expected_a, 4),
                "deltas": deltas,
                "synergy": synergy,
            }))
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {:#}", e);
        std::process::exit(1);
    });

    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    display_startup_banner(&config);

    let matchmaker = Matchmaker::new(&config)?;
    let output = run(&matchmaker, &args.command)?;
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
