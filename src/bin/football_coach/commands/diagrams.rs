// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Diagram request command for the football coach CLI
// ABOUTME: Requests diagrams for a saved plan and writes them as JSON for later parsing

use std::path::Path;

use anyhow::{Context, Result};
use football_coach::config::CoachConfig;
use football_coach::diagrams::DiagramRequestor;
use football_coach::plan::parse_plan;
use football_coach_core::constants::messages;
use tokio::fs;
use tracing::info;

use crate::helpers::display;
use crate::helpers::provider::build_provider;

/// Request diagrams for the plan in `file`
pub async fn run(config: &CoachConfig, file: &Path, output: Option<&Path>) -> Result<()> {
    let text = fs::read_to_string(file)
        .await
        .with_context(|| format!("Failed to read plan file {}", file.display()))?;

    let provider = build_provider(config)?;
    let requestor = DiagramRequestor::new(provider)
        .with_model(&config.model)
        .with_alignment(config.diagram_alignment);

    display::display_status(messages::GENERATING_DIAGRAMS);
    let diagrams = match requestor.request(&text).await {
        Ok(diagrams) => diagrams,
        Err(e) => {
            display::display_error(messages::DIAGRAM_GENERATION_FAILED);
            return Err(e.into());
        }
    };

    let plan = parse_plan(&text, Some(&diagrams));
    display::display_diagram_summary(&diagrams, &plan);

    let json = serde_json::to_string_pretty(&diagrams)?;
    match output {
        Some(path) => {
            fs::write(path, json)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), count = diagrams.len(), "Diagrams written");
        }
        None => println!("{json}"),
    }
    Ok(())
}
