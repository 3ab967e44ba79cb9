// ABOUTME: Plain-text rendering of a parsed plan for terminal output
// ABOUTME: Underlines the title and headings and indents exercise descriptions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt::Write;

use crate::plan::{ParsedPlan, PlanBlock};

/// Render a plan as terminal text
#[must_use]
pub fn render_text(plan: &ParsedPlan) -> String {
    let mut out = String::new();

    if !plan.title.is_empty() {
        let _ = writeln!(out, "{}", plan.title);
        let _ = writeln!(out, "{}", "=".repeat(plan.title.chars().count()));
        out.push('\n');
    }

    for block in &plan.content {
        match block {
            PlanBlock::Heading { text, .. } => {
                let _ = writeln!(out, "\n{text}");
                let _ = writeln!(out, "{}", "-".repeat(text.chars().count()));
            }
            PlanBlock::Paragraph(text) => {
                let _ = writeln!(out, "{text}");
            }
            PlanBlock::Exercise(exercise) => {
                let _ = writeln!(out, "  • {}", exercise.title);
                for line in exercise.description.lines() {
                    let _ = writeln!(out, "    {line}");
                }
                if exercise.diagram.is_some() {
                    let _ = writeln!(out, "    [diagrama disponible]");
                }
            }
        }
    }

    out
}
