// ABOUTME: Prompt templates for plan and diagram generation loaded at compile time
// ABOUTME: Fills {placeholder} slots with preferences and extracted exercise lists
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Prompts
//!
//! Prompts are markdown files embedded with `include_str!` so they can be
//! edited without touching code. Placeholders use `{name}` syntax and are
//! substituted in a single pass, so user text containing braces is inserted
//! verbatim and never re-expanded.

use football_coach_core::models::{Preferences, Selections};

use crate::config::DiagramAlignment;
use crate::diagrams::ExerciseSummary;

/// Free-text plan prompt (plain layout)
pub const PLAN_FREE_TEXT_PROMPT: &str = include_str!("plan_free_text.md");

/// Structured plan prompt (markdown and emoji layout)
pub const PLAN_STRUCTURED_PROMPT: &str = include_str!("plan_structured.md");

/// Diagram prompt asking for `{name, svg}` objects
pub const DIAGRAMS_NAMED_PROMPT: &str = include_str!("diagrams_named.md");

/// Diagram prompt asking for an ordered array of SVG strings
pub const DIAGRAMS_POSITIONAL_PROMPT: &str = include_str!("diagrams_positional.md");

/// SVG drawing conventions shared by both diagram prompts
pub const SVG_CONVENTIONS: &str = include_str!("svg_conventions.md");

/// Build the plan-generation prompt for either preference variant
#[must_use]
pub fn plan_prompt(preferences: &Preferences) -> String {
    match preferences {
        Preferences::FreeText {
            description,
            group_size,
        } => fill_template(
            PLAN_FREE_TEXT_PROMPT,
            &[
                ("description", description.trim()),
                ("group_size", group_size.label()),
            ],
        ),
        Preferences::Structured(selections) => structured_prompt(selections),
    }
}

fn structured_prompt(selections: &Selections) -> String {
    let duration = selections.duration.get().to_string();
    fill_template(
        PLAN_STRUCTURED_PROMPT,
        &[
            ("training_type", selections.training_type.label()),
            ("difficulty", selections.difficulty.label()),
            ("duration", &duration),
            ("group_size", selections.group_size.label()),
        ],
    )
}

/// Build the diagram prompt for the extracted main-phase exercises
#[must_use]
pub fn diagram_prompt(exercises: &[ExerciseSummary], alignment: DiagramAlignment) -> String {
    match alignment {
        DiagramAlignment::Named => {
            let list = exercises
                .iter()
                .map(|ex| format!("{}: {}", ex.name, ex.description))
                .collect::<Vec<_>>()
                .join("\n");
            fill_template(
                DIAGRAMS_NAMED_PROMPT,
                &[("exercises", &list), ("svg_conventions", SVG_CONVENTIONS)],
            )
        }
        DiagramAlignment::Positional => {
            let list = exercises
                .iter()
                .enumerate()
                .map(|(i, ex)| format!("{}. {}: {}", i + 1, ex.name, ex.description))
                .collect::<Vec<_>>()
                .join("\n");
            let count = exercises.len().to_string();
            fill_template(
                DIAGRAMS_POSITIONAL_PROMPT,
                &[
                    ("exercises", &list),
                    ("count", &count),
                    ("svg_conventions", SVG_CONVENTIONS),
                ],
            )
        }
    }
}

/// Replace `{key}` slots in one pass; unknown slots are left untouched
#[must_use]
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let replacement = after.find('}').and_then(|close| {
            let key = &after[..close];
            values
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v, close))
        });

        match replacement {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}
