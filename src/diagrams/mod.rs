// ABOUTME: Diagram collection types and lookup by exercise name or main-phase position
// ABOUTME: Re-exports the main-phase exercise extractor and the structured diagram requestor
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Diagrams
//!
//! Diagrams are SVG illustrations of main-phase exercises, generated in a
//! separate request after the plan is displayed. A collection is produced
//! once per plan and either keyed by exercise name or aligned by position
//! with the exercises that were sent.

mod extract;
mod requestor;

pub use extract::{extract_main_exercises, ExerciseSummary};
pub use requestor::{decode_named, decode_positional, response_schema, DiagramRequestor};

use serde::{Deserialize, Serialize};

use crate::config::DiagramAlignment;

/// One SVG illustration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagram {
    /// Cleaned name of the exercise this diagram illustrates
    pub exercise_name: String,
    /// Complete SVG markup
    pub svg: String,
}

/// Diagrams generated for one plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagrams {
    /// How entries map back to exercises
    pub alignment: DiagramAlignment,
    /// Entries; in positional mode, index `i` belongs to main-phase exercise `i`
    pub entries: Vec<Diagram>,
}

impl Diagrams {
    /// An empty collection, meaning "no diagrams available"
    #[must_use]
    pub const fn empty(alignment: DiagramAlignment) -> Self {
        Self {
            alignment,
            entries: Vec::new(),
        }
    }

    /// Number of diagrams
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no diagram is available
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert or replace the diagram for a name; the latest insert wins
    pub fn upsert(&mut self, exercise_name: String, svg: String) {
        if let Some(existing) = self
            .entries
            .iter_mut()
            .find(|d| d.exercise_name == exercise_name)
        {
            existing.svg = svg;
        } else {
            self.entries.push(Diagram { exercise_name, svg });
        }
    }

    /// Diagram for the main-phase exercise `name` at `position`
    ///
    /// Positional collections look up by index, named ones by name. A miss
    /// means the exercise is shown without a diagram.
    #[must_use]
    pub fn diagram_for(&self, name: &str, position: usize) -> Option<&str> {
        match self.alignment {
            DiagramAlignment::Positional => self.entries.get(position),
            DiagramAlignment::Named => self.entries.iter().find(|d| d.exercise_name == name),
        }
        .map(|d| d.svg.as_str())
        .filter(|svg| !svg.is_empty())
    }
}
