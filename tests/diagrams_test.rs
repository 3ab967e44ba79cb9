// ABOUTME: Integration tests for diagram extraction, requests, and response decoding
// ABOUTME: Verifies positional count checks, named merging, and the no-exercise short circuit
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

mod common;

use common::{svg, FakeProvider, MARKDOWN_PLAN, PLAIN_PLAN};
use football_coach::config::DiagramAlignment;
use football_coach::diagrams::{
    decode_named, decode_positional, extract_main_exercises, response_schema, DiagramRequestor,
    ExerciseSummary,
};
use football_coach::errors::{AppError, ErrorCode};
use football_coach::plan::parse_plan;
use serde_json::json;

fn summaries(names: &[&str]) -> Vec<ExerciseSummary> {
    names
        .iter()
        .map(|name| ExerciseSummary {
            name: (*name).to_owned(),
            description: String::new(),
        })
        .collect()
}

// ============================================================================
// Extraction
// ============================================================================

#[test]
fn test_extract_main_exercises_plain() {
    let exercises = extract_main_exercises(PLAIN_PLAN);
    assert_eq!(
        exercises,
        vec![ExerciseSummary {
            name: "Regate".to_owned(),
            description: "Conducción de balón entre conos.".to_owned(),
        }]
    );
}

#[test]
fn test_extract_main_exercises_flattens_details() {
    let exercises = extract_main_exercises(MARKDOWN_PLAN);
    assert_eq!(exercises.len(), 2);
    assert_eq!(exercises[0].name, "Rondo 4v2");
    assert_eq!(
        exercises[0].description,
        "Cuatro jugadores mantienen la posesión frente a dos. Material: 6 conos y 1 balón."
    );
}

#[test]
fn test_extracted_names_match_parsed_titles() {
    let plan = parse_plan(MARKDOWN_PLAN, None);
    let parsed: Vec<_> = plan.main_exercises().map(|e| e.title.clone()).collect();
    let extracted: Vec<_> = extract_main_exercises(MARKDOWN_PLAN)
        .into_iter()
        .map(|e| e.name)
        .collect();
    assert_eq!(parsed, extracted);
}

// ============================================================================
// Positional Decoding
// ============================================================================

#[test]
fn test_positional_assigns_every_exercise_in_order() {
    let exercises = summaries(&["Rondo 4v2", "Pase y desmarque"]);
    let body = json!({ "diagrams": [svg("a"), svg("b")] }).to_string();

    let diagrams = decode_positional(&body, &exercises).unwrap();

    assert_eq!(diagrams.alignment, DiagramAlignment::Positional);
    assert_eq!(diagrams.len(), 2);
    assert_eq!(diagrams.diagram_for("Rondo 4v2", 0), Some(svg("a").as_str()));
    assert_eq!(diagrams.diagram_for("Pase y desmarque", 1), Some(svg("b").as_str()));
}

#[test]
fn test_positional_count_mismatch_yields_empty() {
    let exercises = summaries(&["Rondo 4v2", "Pase y desmarque"]);

    let short = json!({ "diagrams": [svg("a")] }).to_string();
    assert!(decode_positional(&short, &exercises).unwrap().is_empty());

    let long = json!({ "diagrams": [svg("a"), svg("b"), svg("c")] }).to_string();
    assert!(decode_positional(&long, &exercises).unwrap().is_empty());
}

#[test]
fn test_positional_non_string_item_yields_empty() {
    let exercises = summaries(&["Rondo 4v2", "Pase y desmarque"]);
    let body = json!({ "diagrams": [svg("a"), { "svg": svg("b") }] }).to_string();
    assert!(decode_positional(&body, &exercises).unwrap().is_empty());
}

#[test]
fn test_positional_accepts_fenced_json() {
    let exercises = summaries(&["Regate"]);
    let body = format!("```json\n{}\n```", json!({ "diagrams": [svg("r")] }));
    assert_eq!(decode_positional(&body, &exercises).unwrap().len(), 1);
}

#[test]
fn test_invalid_json_is_external_service_error() {
    let err = decode_positional("not json", &summaries(&["Regate"])).unwrap_err();
    assert_eq!(err.code, ErrorCode::ExternalServiceError);
}

// ============================================================================
// Named Decoding
// ============================================================================

#[test]
fn test_named_merges_and_skips_empty_items() {
    let body = json!({
        "diagrams": [
            { "name": "**Rondo 4v2**", "svg": svg("rondo") },
            { "name": "", "svg": svg("nameless") },
            { "name": "Pase y desmarque", "svg": "" },
        ]
    })
    .to_string();

    let diagrams = decode_named(&body).unwrap();

    assert_eq!(diagrams.len(), 1);
    assert_eq!(diagrams.diagram_for("Rondo 4v2", 7), Some(svg("rondo").as_str()));
    assert_eq!(diagrams.diagram_for("Pase y desmarque", 1), None);
}

#[test]
fn test_named_repeated_name_keeps_last() {
    let body = json!({
        "diagrams": [
            { "name": "Regate", "svg": svg("first") },
            { "name": "Regate", "svg": svg("second") },
        ]
    })
    .to_string();

    let diagrams = decode_named(&body).unwrap();
    assert_eq!(diagrams.len(), 1);
    assert_eq!(diagrams.diagram_for("Regate", 0), Some(svg("second").as_str()));
}

#[test]
fn test_missing_diagrams_key_yields_empty() {
    assert!(decode_named(r#"{"other": []}"#).unwrap().is_empty());
}

// ============================================================================
// Requestor
// ============================================================================

#[tokio::test]
async fn test_request_without_main_exercises_sends_nothing() {
    let provider = FakeProvider::new();
    let requestor = DiagramRequestor::new(provider.clone());

    let diagrams = requestor
        .request("Plan\n1. Calentamiento\nTrote: suave")
        .await
        .unwrap();

    assert!(diagrams.is_empty());
    assert_eq!(provider.request_count(), 0);
}

#[tokio::test]
async fn test_positional_request_uses_schema_and_lists_exercises() {
    let provider = FakeProvider::replying(json!({ "diagrams": [svg("r")] }).to_string());
    let requestor = DiagramRequestor::new(provider.clone()).with_model("gemini-2.5-flash");

    let diagrams = requestor.request(PLAIN_PLAN).await.unwrap();
    assert_eq!(diagrams.len(), 1);

    let requests = provider.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].model.as_deref(), Some("gemini-2.5-flash"));
    assert_eq!(
        requests[0].json_schema(),
        Some(&response_schema(DiagramAlignment::Positional))
    );

    let prompt = provider.last_prompt().unwrap();
    assert!(prompt.contains("Regate: Conducción de balón entre conos."));
    assert!(!prompt.contains("Trote"));
}

#[tokio::test]
async fn test_named_request_schema_requires_objects() {
    let provider = FakeProvider::replying(
        json!({ "diagrams": [{ "name": "Regate", "svg": svg("r") }] }).to_string(),
    );
    let requestor =
        DiagramRequestor::new(provider.clone()).with_alignment(DiagramAlignment::Named);

    let diagrams = requestor.request(PLAIN_PLAN).await.unwrap();
    assert_eq!(diagrams.alignment, DiagramAlignment::Named);

    let schema = response_schema(DiagramAlignment::Named);
    assert_eq!(schema["properties"]["diagrams"]["items"]["type"], "OBJECT");
    assert_eq!(provider.requests()[0].json_schema(), Some(&schema));
}

#[tokio::test]
async fn test_upstream_failure_surfaces_once() {
    let provider = FakeProvider::with_responses([Err(AppError::external_service(
        "Gemini",
        "API error (503): overloaded",
    ))]);
    let requestor = DiagramRequestor::new(provider.clone());

    let err = requestor.request(PLAIN_PLAN).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ExternalServiceError);
    assert_eq!(provider.request_count(), 1);
}
