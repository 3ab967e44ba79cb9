// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Offline parse command for the football coach CLI
// ABOUTME: Parses a saved plan with optional saved diagrams and exports it without an API key

use std::path::Path;

use anyhow::{Context, Result};
use football_coach::config::CoachConfig;
use football_coach::diagrams::Diagrams;
use football_coach::export::{ExportFormat, Exporter};
use football_coach::plan::{parse_plan, ParsedPlan};
use tokio::fs;
use tracing::debug;

use crate::helpers::display;

/// Parse a plan file, print it, and optionally export it
pub async fn run(
    config: &CoachConfig,
    file: &Path,
    diagrams_file: Option<&Path>,
    export: Option<ExportFormat>,
) -> Result<()> {
    let text = fs::read_to_string(file)
        .await
        .with_context(|| format!("Failed to read plan file {}", file.display()))?;

    let diagrams = match diagrams_file {
        Some(path) => Some(read_diagrams(path).await?),
        None => None,
    };

    let plan = parse_plan(&text, diagrams.as_ref());
    debug!(
        blocks = plan.content.len(),
        exercises = plan.exercises().count(),
        "Plan file parsed"
    );

    display::display_plan(&plan);
    if let Some(diagrams) = &diagrams {
        display::display_diagram_summary(diagrams, &plan);
    }

    if let Some(format) = export {
        export_and_report(config, &plan, format).await;
    }
    Ok(())
}

async fn read_diagrams(path: &Path) -> Result<Diagrams> {
    let raw = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read diagrams file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Invalid diagrams JSON in {}", path.display()))
}

/// Export into the configured directory and report the outcome
pub async fn export_and_report(config: &CoachConfig, plan: &ParsedPlan, format: ExportFormat) {
    let exporter = Exporter::new(&config.export_dir);
    let path = exporter.export(plan, format).await;
    display::display_export_result(format, path.as_deref());
}
