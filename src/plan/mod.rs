// ABOUTME: Training plan data model and entry points for requesting and parsing plans
// ABOUTME: Defines ParsedPlan, PlanBlock, Exercise, and PhaseKind shared by rendering and export
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Training Plans
//!
//! A plan arrives from the generation service as opaque text. [`parse_plan`]
//! turns it into a [`ParsedPlan`]: a title plus an ordered list of blocks.
//! The parsed value is derived data; callers re-parse whenever the plan text
//! or the diagram collection changes instead of mutating it.

pub mod parser;
mod requestor;

pub use parser::{clean_exercise_title, is_duration_line, parse_plan};
pub use requestor::PlanRequestor;

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

/// Phase of a training session a heading introduces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseKind {
    /// Calentamiento
    WarmUp,
    /// Entrenamiento principal; the only phase eligible for diagrams
    Main,
    /// Enfriamiento / vuelta a la calma
    CoolDown,
    /// Numbered section that is none of the above
    Other,
}

impl PhaseKind {
    /// Whether exercises in this phase get diagrams
    #[must_use]
    pub const fn is_main(self) -> bool {
        matches!(self, Self::Main)
    }

    /// Phase implied by a section ordinal (1, 2, 3)
    #[must_use]
    pub const fn from_ordinal(ordinal: u32) -> Self {
        match ordinal {
            1 => Self::WarmUp,
            2 => Self::Main,
            3 => Self::CoolDown,
            _ => Self::Other,
        }
    }
}

impl Display for PhaseKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::WarmUp => write!(f, "warm_up"),
            Self::Main => write!(f, "main"),
            Self::CoolDown => write!(f, "cool_down"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// A single exercise parsed from a `name: description` line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    /// Cleaned exercise name; the join key for named diagrams
    pub title: String,
    /// Description, continuation lines joined with newlines
    pub description: String,
    /// True when the exercise belongs to the main phase
    pub diagram_eligible: bool,
    /// SVG markup attached from the diagram collection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagram: Option<String>,
}

/// One display block of a parsed plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum PlanBlock {
    /// Phase header such as `2. Entrenamiento principal (30 minutos)`
    Heading {
        /// Header text with emphasis removed
        text: String,
        /// Phase this header opens
        phase: PhaseKind,
    },
    /// Standalone line that is neither a header nor part of an exercise
    Paragraph(String),
    /// A parsed exercise
    Exercise(Exercise),
}

/// Structured view of a plan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedPlan {
    /// Plan title with decoration stripped; empty when none was found
    pub title: String,
    /// Blocks in source order
    pub content: Vec<PlanBlock>,
}

impl ParsedPlan {
    /// All exercises in order
    pub fn exercises(&self) -> impl Iterator<Item = &Exercise> {
        self.content.iter().filter_map(|block| match block {
            PlanBlock::Exercise(exercise) => Some(exercise),
            _ => None,
        })
    }

    /// Exercises of the main phase, in order
    pub fn main_exercises(&self) -> impl Iterator<Item = &Exercise> {
        self.exercises().filter(|e| e.diagram_eligible)
    }

    /// Heading texts and phases, in order
    pub fn headings(&self) -> impl Iterator<Item = (&str, PhaseKind)> {
        self.content.iter().filter_map(|block| match block {
            PlanBlock::Heading { text, phase } => Some((text.as_str(), *phase)),
            _ => None,
        })
    }

    /// True when nothing at all was recognized
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.content.is_empty()
    }

    /// Number of exercises that received a diagram
    #[must_use]
    pub fn diagram_count(&self) -> usize {
        self.exercises().filter(|e| e.diagram.is_some()).count()
    }
}
