// ABOUTME: Extracts the main-phase exercises a diagram request is made for
// ABOUTME: Runs the plan parser so names and counts match what the renderer will look up
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use crate::plan::parse_plan;

/// Name and description of an exercise sent for illustration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseSummary {
    /// Cleaned exercise name
    pub name: String,
    /// Description flattened to one line
    pub description: String,
}

/// Main-phase exercises of a plan, in order
///
/// Uses the same parse as rendering, so a positional response of the same
/// length lines up with the exercises that will display it.
#[must_use]
pub fn extract_main_exercises(plan_text: &str) -> Vec<ExerciseSummary> {
    parse_plan(plan_text, None)
        .main_exercises()
        .map(|exercise| ExerciseSummary {
            name: exercise.title.clone(),
            description: exercise
                .description
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .collect::<Vec<_>>()
                .join(" "),
        })
        .collect()
}
