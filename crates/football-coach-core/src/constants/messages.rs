// ABOUTME: Fixed, localized messages surfaced to the user on validation and upstream failures
// ABOUTME: Kept in one place so the CLI, the session, and the tests agree on exact wording
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Blank free-text description
pub const EMPTY_DESCRIPTION: &str = "Por favor, describe qué te gustaría entrenar.";

/// Structured wizard submitted with a missing selection
pub const INCOMPLETE_SELECTIONS: &str =
    "Por favor, completa todas las opciones antes de generar el plan.";

/// Plan generation failed upstream
pub const PLAN_GENERATION_FAILED: &str =
    "Hubo un problema al generar el plan. Por favor, intenta de nuevo.";

/// Diagram generation failed upstream
pub const DIAGRAM_GENERATION_FAILED: &str =
    "No se pudieron generar los diagramas. Inténtalo de nuevo.";

/// Diagrams requested before a plan exists
pub const NO_PLAN_YET: &str = "Primero genera un plan de entrenamiento.";

/// Progress line while the plan is generated
pub const GENERATING_PLAN: &str = "Generando tu plan...";

/// Progress detail while the plan is generated
pub const GENERATING_PLAN_DETAIL: &str = "El coach está preparando tus ejercicios.";

/// Progress line while diagrams are generated
pub const GENERATING_DIAGRAMS: &str = "Creando Diagramas...";
