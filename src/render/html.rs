// ABOUTME: Standalone HTML rendering of a parsed plan with diagrams embedded as images
// ABOUTME: Escapes all generated text and embeds SVG through data URLs rather than raw markup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Diagrams come from the generation service, so they are embedded as
//! `<img>` data URLs; an SVG loaded that way cannot run script.

use std::fmt::Write;

use html_escape::{encode_double_quoted_attribute, encode_text};

use super::svg_data_url;
use crate::plan::{is_duration_line, ParsedPlan, PlanBlock};

const STYLE: &str = "\
body{margin:0;background:#111827;color:#d1d5db;font-family:system-ui,sans-serif}\
main{max-width:56rem;margin:2rem auto;padding:2rem;background:#1f2937;border-radius:1rem}\
h1{color:#4ade80;text-align:center}\
h2{color:#4ade80;margin-top:1.5rem}\
p.duration{text-align:center;color:#9ca3af;font-weight:600}\
p{margin-left:1rem}\
section.exercise{margin-top:1rem;padding:1rem;background:#11182780;border-radius:.5rem}\
section.exercise h3{color:#f3f4f6;margin:0}\
section.exercise p{white-space:pre-line;margin:.25rem 0 0}\
img.diagram{display:block;margin-top:1rem;max-width:100%;border:1px solid #374151;border-radius:.375rem}";

/// Render a plan as a complete HTML document
#[must_use]
pub fn render_html(plan: &ParsedPlan) -> String {
    let mut out = String::new();
    let title = if plan.title.is_empty() {
        "Plan de entrenamiento"
    } else {
        plan.title.as_str()
    };

    out.push_str("<!DOCTYPE html>\n<html lang=\"es\">\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(out, "<title>{}</title>", encode_text(title));
    let _ = writeln!(out, "<style>{STYLE}</style>");
    out.push_str("</head>\n<body>\n<main>\n");
    let _ = writeln!(out, "<h1>{}</h1>", encode_text(title));

    for block in &plan.content {
        match block {
            PlanBlock::Heading { text, phase } => {
                let _ = writeln!(
                    out,
                    "<h2 data-phase=\"{phase}\">{}</h2>",
                    encode_text(text)
                );
            }
            PlanBlock::Paragraph(text) if is_duration_line(text) => {
                let _ = writeln!(out, "<p class=\"duration\">{}</p>", encode_text(text));
            }
            PlanBlock::Paragraph(text) => {
                let _ = writeln!(out, "<p>{}</p>", encode_text(text));
            }
            PlanBlock::Exercise(exercise) => {
                out.push_str("<section class=\"exercise\">\n");
                let _ = writeln!(out, "<h3>{}</h3>", encode_text(&exercise.title));
                let _ = writeln!(out, "<p>{}</p>", encode_text(&exercise.description));
                if let Some(svg) = &exercise.diagram {
                    let _ = writeln!(
                        out,
                        "<img class=\"diagram\" alt=\"Diagrama: {}\" src=\"{}\">",
                        encode_double_quoted_attribute(&exercise.title),
                        svg_data_url(svg)
                    );
                }
                out.push_str("</section>\n");
            }
        }
    }

    out.push_str("</main>\n</body>\n</html>\n");
    out
}
