// ABOUTME: Prescription CLI - command-line access to the Pierre prescription engine
// ABOUTME: Computes ratios, prescribes blocks, analyzes plateaus and validates periodization tables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Ratios, weakness flags and lift levels for an athlete row
//! prescription-cli ratios --athlete athlete.json
//!
//! # Prescribe one block (athlete, catalog, assignment and optional logs)
//! prescription-cli prescribe --request request.json
//!
//! # Plateau report from performance logs
//! prescription-cli plateau --logs logs.json --as-of 2025-03-01T00:00:00Z
//!
//! # Validate the embedded or an alternate periodization table
//! prescription-cli table validate --path periodization.yaml
//!
//! # Read any input from stdin
//! cat athlete.json | prescription-cli ratios --athlete -
//! ```

mod commands;
mod helpers;

use std::path::PathBuf;

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use pierre_prescription_engine::config::EngineEnvironment;
use pierre_prescription_engine::engine::PrescriptionEngine;
use pierre_prescription_engine::logging::LoggingConfig;
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "prescription-cli",
    about = "Pierre Prescription Engine CLI",
    long_about = "Strength ratios, block prescriptions, plateau reports and periodization table checks. Output is pretty-printed JSON on stdout."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Ratios, weakness flags, technical focus and lift levels
    Ratios {
        /// Athlete row JSON file, an array of rows, or "-" for stdin
        #[arg(long)]
        athlete: PathBuf,
    },

    /// Prescribe one training block
    Prescribe {
        /// Prescription request JSON file or "-" for stdin
        #[arg(long)]
        request: PathBuf,
    },

    /// Plateau analysis over performance logs
    Plateau {
        /// Log rows as an array, or an object of athlete id to rows, or "-" for stdin
        #[arg(long)]
        logs: PathBuf,

        /// End of the analysis window (RFC 3339, defaults to now)
        #[arg(long)]
        as_of: Option<DateTime<Utc>>,
    },

    /// Periodization table commands
    Table {
        #[command(subcommand)]
        action: TableCommand,
    },
}

#[non_exhaustive]
#[derive(Subcommand)]
enum TableCommand {
    /// Validate a periodization table
    Validate {
        /// JSON or YAML table (defaults to the configured or embedded table)
        #[arg(long)]
        path: Option<PathBuf>,
    },

    /// Show the scheme for one category, level and week
    Lookup {
        /// Lift category (Squats, Olympic Lifts, Presses)
        #[arg(long)]
        category: String,

        /// Ability level (Beginner, Intermediate, Advanced)
        #[arg(long)]
        level: String,

        /// Program week, wraps after 12
        #[arg(long)]
        week: u32,

        /// JSON or YAML table (defaults to the configured or embedded table)
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    if cli.verbose {
        logging = logging.with_level("debug");
    }
    logging.init()?;

    let mut environment = EngineEnvironment::from_env()?;
    debug!(?environment, "Prescription CLI starting");

    match cli.command {
        Command::Ratios { athlete } => {
            let engine = PrescriptionEngine::from_environment(&environment)?;
            commands::ratios::run(&engine, &athlete)?;
        }
        Command::Prescribe { request } => {
            let engine = PrescriptionEngine::from_environment(&environment)?;
            commands::prescribe::run(&engine, &request)?;
        }
        Command::Plateau { logs, as_of } => {
            let engine = PrescriptionEngine::from_environment(&environment)?;
            commands::plateau::run(&engine, &logs, as_of.unwrap_or_else(Utc::now))?;
        }
        Command::Table { action } => match action {
            TableCommand::Validate { path } => {
                commands::table::validate(path.as_deref(), &environment)?;
            }
            TableCommand::Lookup {
                category,
                level,
                week,
                path,
            } => {
                if let Some(path) = path {
                    environment = environment.with_table(path);
                }
                let engine = PrescriptionEngine::from_environment(&environment)?;
                commands::table::lookup(&engine, &category, &level, week)?;
            }
        },
    }

    Ok(())
}
