// ABOUTME: reptrack CLI - analyze recorded landmark streams and manage workout history
// ABOUTME: Handles frame analysis, history queries, ratings, recommendations, and difficulty status
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Count and judge bicep curls from a JSON-lines frame file
//! reptrack-cli analyze --frames session.jsonl --exercise bicep_curl
//!
//! # Stop automatically after 12 reps
//! reptrack-cli analyze --frames session.jsonl --exercise squat --target-reps 12
//!
//! # Browse workout history
//! reptrack-cli history list --limit 10
//! reptrack-cli history show 7d3c9a2e-...
//! reptrack-cli history stats
//! reptrack-cli history delete 7d3c9a2e-...
//!
//! # Rate a workout and get suggestions
//! reptrack-cli rate 7d3c9a2e-... 4
//! reptrack-cli recommend
//!
//! # Inspect the newest difficulty batch
//! reptrack-cli difficulty
//! ```

mod commands;
mod helpers;

use anyhow::Result;
use clap::{Parser, Subcommand};
use reptrack::config::RuntimeConfig;
use reptrack::database::{SqliteStore, Store};
use reptrack::logging::LoggingConfig;
use reptrack_core::models::ExerciseKind;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "reptrack-cli",
    about = "Exercise repetition counting and form analysis",
    long_about = "Counts repetitions and judges form from recorded body landmarks, keeps a workout history, and suggests what to train next."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Database URL override
    #[arg(long, global = true)]
    database_url: Option<String>,

    /// Print JSON instead of tables where supported
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Analyze a JSON-lines frame file as one workout
    Analyze {
        /// Frame file, one JSON object per line
        #[arg(long)]
        frames: PathBuf,

        /// Exercise performed (`bicep_curl`, squat, `lateral_raise`, lunge, `shoulder_press`)
        #[arg(long, value_parser = parse_exercise)]
        exercise: ExerciseKind,

        /// Stop counting after this many reps
        #[arg(long)]
        target_reps: Option<u32>,

        /// Print every frame, not only completed reps
        #[arg(long)]
        show_frames: bool,
    },

    /// Workout history commands
    History {
        #[command(subcommand)]
        action: HistoryCommand,
    },

    /// Rate a saved workout from 1 to 5
    Rate {
        /// Workout ID
        workout_id: String,

        /// Rating value
        #[arg(value_parser = clap::value_parser!(u8).range(1..=5))]
        rating: u8,
    },

    /// Suggest workouts similar to the most recently rated one
    Recommend {
        /// Number of suggestions (defaults to configuration)
        #[arg(long, short = 'k')]
        top_k: Option<usize>,
    },

    /// Show the newest difficulty batch and the reward it earns
    Difficulty,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum HistoryCommand {
    /// List saved workouts, newest first
    List {
        /// Maximum number of workouts
        #[arg(long)]
        limit: Option<u32>,
    },

    /// Show one workout with its reps
    Show {
        /// Workout ID
        workout_id: String,
    },

    /// Totals across all workouts
    Stats,

    /// Delete a workout and its reps
    Delete {
        /// Workout ID
        workout_id: String,
    },
}

fn parse_exercise(raw: &str) -> Result<ExerciseKind, String> {
    raw.parse::<ExerciseKind>().map_err(|e| e.message)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let mut logging = LoggingConfig::from_env();
    if cli.verbose {
        "debug".clone_into(&mut logging.level);
    }
    logging.init()?;

    // Load configuration
    let mut config = RuntimeConfig::from_env()?;
    if let Some(database_url) = cli.database_url {
        config.database_url = database_url;
    }

    info!("Connecting to database: {}", config.database_url);
    let store: Arc<dyn Store> = Arc::new(SqliteStore::connect(&config.database_url).await?);

    match cli.command {
        Command::Analyze {
            frames,
            exercise,
            target_reps,
            show_frames,
        } => {
            let options = commands::analyze::AnalyzeOptions {
                frames,
                exercise,
                target_reps,
                show_frames,
            };
            commands::analyze::run(store, &config, options).await?;
        }
        Command::History { action } => match action {
            HistoryCommand::List { limit } => {
                commands::history::list(store.as_ref(), limit, cli.json).await?;
            }
            HistoryCommand::Show { workout_id } => {
                commands::history::show(store.as_ref(), &workout_id, cli.json).await?;
            }
            HistoryCommand::Stats => {
                commands::history::stats(store.as_ref(), cli.json).await?;
            }
            HistoryCommand::Delete { workout_id } => {
                commands::history::delete(store.as_ref(), &workout_id).await?;
            }
        },
        Command::Rate { workout_id, rating } => {
            commands::training::rate(store, &config, workout_id, rating).await?;
        }
        Command::Recommend { top_k } => {
            let top_k = top_k.unwrap_or(config.intelligence.recommendation.top_k);
            commands::training::recommend(store.as_ref(), top_k).await?;
        }
        Command::Difficulty => {
            commands::training::difficulty(store.as_ref(), &config).await?;
        }
    }

    Ok(())
}
