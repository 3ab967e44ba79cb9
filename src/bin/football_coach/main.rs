// ABOUTME: Football coach CLI - generates, parses, illustrates, and exports training plans
// ABOUTME: Wires configuration, logging, the Gemini provider, and the session into subcommands
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Generate a plan from a description, with diagrams, and export it as PDF
//! football-coach plan --description "Mejorar el regate" --group-size small-group --diagrams --export pdf
//!
//! # Walk through the structured wizard
//! football-coach wizard
//!
//! # Parse a saved plan offline and export it as HTML
//! football-coach parse --file plan.txt --diagrams diagrams.json --export html
//!
//! # Request diagrams for a saved plan
//! football-coach diagrams --file plan.txt --output diagrams.json
//! ```

mod commands;
mod helpers;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use football_coach::config::{CoachConfig, DiagramAlignment, LogLevel};
use football_coach::export::ExportFormat;
use football_coach::logging;
use football_coach_core::models::GroupSize;
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "football-coach",
    about = "AI football coach",
    long_about = "Generates football training plans with Gemini, adds tactical diagrams, and exports them."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Gemini model override
    #[arg(long, global = true)]
    model: Option<String>,

    /// Directory exports are written to
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    /// Diagram alignment
    #[arg(long, global = true, value_enum)]
    alignment: Option<DiagramAlignment>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Generate a plan from a free-text description
    Plan {
        /// What you want to train
        #[arg(long, short = 'd')]
        description: String,

        /// solo, small-group, or team
        #[arg(long, short = 'g', default_value = "solo")]
        group_size: GroupSize,

        /// Also generate diagrams for the main exercises
        #[arg(long)]
        diagrams: bool,

        /// Export format (html, svg, png, pdf, json)
        #[arg(long, short = 'e')]
        export: Option<ExportFormat>,
    },

    /// Build a plan step by step on the terminal
    Wizard,

    /// Parse a saved plan without contacting the service
    Parse {
        /// Plan text file
        #[arg(long, short = 'f')]
        file: PathBuf,

        /// Diagrams JSON written by the `diagrams` command
        #[arg(long)]
        diagrams: Option<PathBuf>,

        /// Export format (html, svg, png, pdf, json)
        #[arg(long, short = 'e')]
        export: Option<ExportFormat>,
    },

    /// Request diagrams for a saved plan
    Diagrams {
        /// Plan text file
        #[arg(long, short = 'f')]
        file: PathBuf,

        /// Where to write the diagrams JSON (stdout if omitted)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = CoachConfig::from_env();
    if let Some(model) = cli.model {
        config.model = model;
    }
    if let Some(dir) = cli.output_dir {
        config.export_dir = dir;
    }
    if let Some(alignment) = cli.alignment {
        config.diagram_alignment = alignment;
    }

    let level = if cli.verbose {
        LogLevel::Debug
    } else {
        config.log_level
    };
    logging::init_from_env(level)?;
    debug!(model = %config.model, alignment = %config.diagram_alignment, "CLI configured");

    match cli.command {
        Command::Plan {
            description,
            group_size,
            diagrams,
            export,
        } => {
            commands::plan::run(&config, description, group_size, diagrams, export).await?;
        }
        Command::Wizard => {
            commands::wizard::run(&config).await?;
        }
        Command::Parse {
            file,
            diagrams,
            export,
        } => {
            commands::parse::run(&config, &file, diagrams.as_deref(), export).await?;
        }
        Command::Diagrams { file, output } => {
            commands::diagrams::run(&config, &file, output.as_deref()).await?;
        }
    }

    Ok(())
}
