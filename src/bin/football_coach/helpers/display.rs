// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Output formatting helpers for the football coach CLI
// ABOUTME: Plans go to stdout; progress, menus, and errors go to stderr

use std::fmt::Display;
use std::path::Path;

use football_coach::diagrams::Diagrams;
use football_coach::export::ExportFormat;
use football_coach::plan::ParsedPlan;
use football_coach::render::render_text;

/// Print a rendered plan on stdout
pub fn display_plan(plan: &ParsedPlan) {
    println!("{}", render_text(plan));
}

/// Progress line, e.g. "Generando tu plan..."
pub fn display_status(message: &str) {
    eprintln!("⏳ {message}");
}

/// User-facing error message
pub fn display_error(message: &str) {
    eprintln!("❌ {message}");
}

/// Outcome of an export request
pub fn display_export_result(format: ExportFormat, path: Option<&Path>) {
    match path {
        Some(path) => eprintln!("✅ Plan exportado ({format}): {}", path.display()),
        None => eprintln!("❌ No se pudo exportar el plan ({format})."),
    }
}

/// How many main exercises received a diagram
pub fn display_diagram_summary(diagrams: &Diagrams, plan: &ParsedPlan) {
    let eligible = plan.main_exercises().count();
    eprintln!(
        "🖼  Diagramas: {} de {eligible} ejercicios principales ({})",
        plan.diagram_count(),
        diagrams.alignment
    );
}

/// Numbered menu of options
pub fn display_options<T: Display>(title: &str, options: &[T]) {
    eprintln!("\n{title}");
    eprintln!("{}", "-".repeat(title.chars().count()));
    for (index, option) in options.iter().enumerate() {
        eprintln!("  {}. {option}", index + 1);
    }
}

/// One-line hint shown under a prompt
pub fn display_hint(hint: &str) {
    eprintln!("   ({hint})");
}
