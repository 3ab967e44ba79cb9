// ABOUTME: Requests SVG diagrams for main-phase exercises with a strict JSON response schema
// ABOUTME: Decodes named responses by merge and positional responses by length-checked zip
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use serde_json::{json, Value};
use tracing::{info, instrument, warn};

use super::{Diagram, Diagrams, ExerciseSummary};
use crate::config::DiagramAlignment;
use crate::diagrams::extract_main_exercises;
use crate::errors::{AppError, AppResult};
use crate::llm::prompts::diagram_prompt;
use crate::llm::{ChatMessage, ChatRequest, LlmProvider};
use crate::plan::clean_exercise_title;

/// Requests diagrams from an [`LlmProvider`] with structured output
#[derive(Clone)]
pub struct DiagramRequestor {
    provider: Arc<dyn LlmProvider>,
    model: Option<String>,
    alignment: DiagramAlignment,
}

impl DiagramRequestor {
    /// Create a requestor with positional alignment
    #[must_use]
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self {
            provider,
            model: None,
            alignment: DiagramAlignment::default(),
        }
    }

    /// Override the model for diagram requests
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Choose how responses are matched to exercises
    #[must_use]
    pub const fn with_alignment(mut self, alignment: DiagramAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Alignment used by this requestor
    #[must_use]
    pub const fn alignment(&self) -> DiagramAlignment {
        self.alignment
    }

    /// Request diagrams for the main-phase exercises of a plan
    ///
    /// # Errors
    ///
    /// Returns an external service error when the request fails or the
    /// response is not JSON. Shape or count mismatches are not errors; they
    /// yield an empty collection.
    pub async fn request(&self, plan_text: &str) -> AppResult<Diagrams> {
        let exercises = extract_main_exercises(plan_text);
        self.request_for(&exercises).await
    }

    /// Request diagrams for an already extracted exercise list
    ///
    /// # Errors
    ///
    /// See [`DiagramRequestor::request`].
    #[instrument(skip(self, exercises), fields(alignment = %self.alignment, exercises = exercises.len()))]
    pub async fn request_for(&self, exercises: &[ExerciseSummary]) -> AppResult<Diagrams> {
        if exercises.is_empty() {
            warn!("No exercises found in the main training section to generate diagrams for");
            return Ok(Diagrams::empty(self.alignment));
        }

        let mut request = ChatRequest::new(vec![ChatMessage::user(diagram_prompt(
            exercises,
            self.alignment,
        ))])
        .with_json_schema(response_schema(self.alignment));
        if let Some(model) = &self.model {
            request = request.with_model(model.clone());
        }

        let response = self.provider.complete(&request).await?;

        let diagrams = match self.alignment {
            DiagramAlignment::Named => decode_named(&response.content)?,
            DiagramAlignment::Positional => decode_positional(&response.content, exercises)?,
        };

        info!(
            requested = exercises.len(),
            received = diagrams.len(),
            total_tokens = response.total_tokens(),
            "Diagrams generated"
        );
        Ok(diagrams)
    }
}

/// Response schema for the structured diagram request
#[must_use]
pub fn response_schema(alignment: DiagramAlignment) -> Value {
    let items = match alignment {
        DiagramAlignment::Named => json!({
            "type": "OBJECT",
            "properties": {
                "name": { "type": "STRING", "description": "El nombre del ejercicio." },
                "svg": { "type": "STRING", "description": "El código SVG del diagrama." }
            },
            "required": ["name", "svg"]
        }),
        DiagramAlignment::Positional => json!({
            "type": "STRING",
            "description": "El código SVG del diagrama, en el mismo orden que los ejercicios."
        }),
    };

    json!({
        "type": "OBJECT",
        "properties": {
            "diagrams": {
                "type": "ARRAY",
                "description": "Un diagrama por ejercicio.",
                "items": items
            }
        },
        "required": ["diagrams"]
    })
}

/// Decode a `{ "diagrams": [{name, svg}] }` response
///
/// Items with an empty name or svg are skipped; a repeated name keeps the
/// last svg. Names go through the same cleaning as parsed exercise titles.
///
/// # Errors
///
/// Returns an external service error if the body is not JSON.
pub fn decode_named(body: &str) -> AppResult<Diagrams> {
    let mut diagrams = Diagrams::empty(DiagramAlignment::Named);

    let parsed = parse_body(body)?;
    let Some(items) = diagrams_array(&parsed) else {
        warn!("Diagram response has no \"diagrams\" array");
        return Ok(diagrams);
    };

    for item in items {
        let name = item
            .get("name")
            .and_then(Value::as_str)
            .map(clean_exercise_title)
            .unwrap_or_default();
        let svg = item
            .get("svg")
            .and_then(Value::as_str)
            .map(str::trim)
            .unwrap_or_default();

        if name.is_empty() || svg.is_empty() {
            continue;
        }
        diagrams.upsert(name, svg.to_owned());
    }

    Ok(diagrams)
}

/// Decode a `{ "diagrams": ["<svg>...", ...] }` response against the sent list
///
/// Every item must be a string and the array must have exactly one entry per
/// exercise; anything else yields an empty collection.
///
/// # Errors
///
/// Returns an external service error if the body is not JSON.
pub fn decode_positional(body: &str, exercises: &[ExerciseSummary]) -> AppResult<Diagrams> {
    let empty = Diagrams::empty(DiagramAlignment::Positional);

    let parsed = parse_body(body)?;
    let Some(items) = diagrams_array(&parsed) else {
        warn!("Diagram response has no \"diagrams\" array");
        return Ok(empty);
    };

    if items.len() != exercises.len() {
        warn!(
            expected = exercises.len(),
            received = items.len(),
            "Diagram count does not match exercise count; discarding diagrams"
        );
        return Ok(empty);
    }

    let svgs: Option<Vec<&str>> = items.iter().map(Value::as_str).collect();
    let Some(svgs) = svgs else {
        warn!("Positional diagram response contains non-string items; discarding diagrams");
        return Ok(empty);
    };

    Ok(Diagrams {
        alignment: DiagramAlignment::Positional,
        entries: exercises
            .iter()
            .zip(svgs)
            .map(|(exercise, svg)| Diagram {
                exercise_name: exercise.name.clone(),
                svg: svg.trim().to_owned(),
            })
            .collect(),
    })
}

/// Parse a JSON body, tolerating a surrounding markdown code fence
fn parse_body(body: &str) -> AppResult<Value> {
    let trimmed = body.trim();
    let unfenced = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.trim_end().strip_suffix("```"))
        .unwrap_or(trimmed);

    serde_json::from_str(unfenced.trim()).map_err(|e| {
        warn!(error = %e, "Diagram response is not valid JSON");
        AppError::external_service("Gemini", format!("invalid diagram JSON: {e}")).with_source(e)
    })
}

fn diagrams_array(value: &Value) -> Option<&Vec<Value>> {
    value.get("diagrams").and_then(Value::as_array)
}
