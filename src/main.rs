//! Decision Engine binary entry point.
//!
//! Reads a decision document (JSON) and prints analysis results as JSON.
//! All logs go to stderr; stdout is reserved for results.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;
use thiserror::Error;

use decision_engine::application::{
    EvaluateDecisionCommand, EvaluateDecisionHandler, EvaluationError, EvaluationSettings,
    ExploreWeightsHandler, TippingPointQuery, WhatIfQuery,
};
use decision_engine::config::{AppConfig, ConfigError};
use decision_engine::domain::decision::Decision;

#[derive(Debug, Parser)]
#[command(name = "decision-engine", version, about = "Multi-criteria decision analysis")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Rank options and run confidence, rationale, sensitivity and simulation
    Evaluate {
        /// Decision document
        path: PathBuf,

        /// Monte Carlo trials (overrides configuration)
        #[arg(long)]
        simulations: Option<u32>,

        /// Monte Carlo seed (overrides configuration)
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Re-rank with one criterion set to a different weight
    WhatIf {
        /// Decision document
        path: PathBuf,

        /// Criterion id
        #[arg(long)]
        criterion: String,

        /// New weight, 1-10
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=10))]
        weight: u8,
    },

    /// Find the closest weight of one criterion that changes the winner
    TippingPoint {
        /// Decision document
        path: PathBuf,

        /// Criterion id
        #[arg(long)]
        criterion: String,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Load configuration from environment
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };

    config.logging.init_tracing();

    match run(cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, config: &AppConfig) -> Result<(), CliError> {
    config.validate().map_err(ConfigError::from)?;

    let settings = EvaluationSettings::from(&config.engine);
    tracing::debug!(?settings, "Configuration loaded");

    match cli.command {
        Command::Evaluate {
            path,
            simulations,
            seed,
        } => {
            let cmd = EvaluateDecisionCommand {
                decision: read_decision(&path)?,
                simulations,
                seed,
            };
            let report = EvaluateDecisionHandler::new(settings).handle(cmd)?;
            print_json(&report, cli.pretty)
        }
        Command::WhatIf {
            path,
            criterion,
            weight,
        } => {
            let query = WhatIfQuery {
                decision: read_decision(&path)?,
                criterion_id: criterion,
                new_weight: weight,
            };
            let result = ExploreWeightsHandler::new(settings).what_if(query)?;
            print_json(&result, cli.pretty)
        }
        Command::TippingPoint { path, criterion } => {
            let query = TippingPointQuery {
                decision: read_decision(&path)?,
                criterion_id: criterion,
            };
            let result = ExploreWeightsHandler::new(settings).tipping_point(query)?;
            print_json(&result, cli.pretty)
        }
    }
}

fn read_decision(path: &Path) -> Result<Decision, CliError> {
    let raw = std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let decision: Decision = serde_json::from_str(&raw)?;

    tracing::info!(
        path = %path.display(),
        decision_id = %decision.id,
        options = decision.options.len(),
        criteria = decision.criteria.len(),
        "Decision loaded"
    );

    Ok(decision)
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<(), CliError> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{json}");
    Ok(())
}
