// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Free-text plan generation command for the football coach CLI
// ABOUTME: Generates the plan, optionally adds diagrams, prints it, and exports it

use anyhow::Result;
use football_coach::config::CoachConfig;
use football_coach::export::ExportFormat;
use football_coach::session::CoachSession;
use football_coach_core::constants::messages;
use football_coach_core::models::GroupSize;
use tracing::info;

use super::parse::export_and_report;
use crate::helpers::display;
use crate::helpers::provider::build_provider;

/// Generate, display, and optionally export a free-text plan
pub async fn run(
    config: &CoachConfig,
    description: String,
    group_size: GroupSize,
    with_diagrams: bool,
    export: Option<ExportFormat>,
) -> Result<()> {
    let provider = build_provider(config)?;
    let mut session = CoachSession::from_config(provider, config);
    session.set_description(description);
    session.set_group_size(group_size);

    display::display_status(messages::GENERATING_PLAN);
    display::display_status(messages::GENERATING_PLAN_DETAIL);
    if let Err(e) = session.generate_plan().await {
        display::display_error(session.error().unwrap_or(&e.message));
        return Err(e.into());
    }
    info!(%group_size, "Plan generated");

    if with_diagrams {
        display::display_status(messages::GENERATING_DIAGRAMS);
        // The plan is still shown when diagrams fail
        if session.generate_diagrams().await.is_err() {
            display::display_error(messages::DIAGRAM_GENERATION_FAILED);
        }
    }

    let Some(plan) = session.parsed_plan() else {
        return Ok(());
    };
    display::display_plan(&plan);
    if let Some(diagrams) = session.diagrams() {
        display::display_diagram_summary(diagrams, &plan);
    }

    if let Some(format) = export {
        export_and_report(config, &plan, format).await;
    }
    Ok(())
}
