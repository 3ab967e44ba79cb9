// ABOUTME: Line-based heuristic parser turning generated plan text into structured blocks
// ABOUTME: Recognizes titles, numbered or keycap phase headers, exercises, and duration lines
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Plan Parser
//!
//! The generation service is asked to follow an example layout but nothing
//! enforces it, so the parser never fails: unrecognized lines degrade to
//! paragraphs.
//!
//! Two layouts are understood:
//!
//! - **plain**: `1. Calentamiento (10 minutos)` headers and `Nombre: descripción`
//!   exercise lines.
//! - **markdown**: `**1️⃣ Calentamiento**` headers and `- **Nombre**: descripción`
//!   exercise lines, with detail bullets underneath.
//!
//! When any bold-name exercise line is present the text is treated as
//! markdown and only bold-name lines open exercises, so detail bullets such
//! as `- Material: conos` stay attached to the exercise above them.

use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use super::{Exercise, ParsedPlan, PhaseKind, PlanBlock};
use crate::diagrams::Diagrams;

/// `1. Calentamiento` / `2) Parte principal`
fn numbered_header_regex() -> Option<&'static Regex> {
    static NUMBERED: OnceLock<Option<Regex>> = OnceLock::new();
    NUMBERED
        .get_or_init(|| Regex::new(r"^(\d{1,2})[.)]\s+(.+)$").ok())
        .as_ref()
}

/// `1️⃣ Calentamiento` (digit, optional variation selector, combining keycap)
fn keycap_header_regex() -> Option<&'static Regex> {
    static KEYCAP: OnceLock<Option<Regex>> = OnceLock::new();
    KEYCAP
        .get_or_init(|| Regex::new(r"^(\d)\x{FE0F}?\x{20E3}\s*(.*)$").ok())
        .as_ref()
}

/// `- **Nombre**: descripción` or `**Nombre:** descripción`
fn bold_exercise_regex() -> Option<&'static Regex> {
    static BOLD: OnceLock<Option<Regex>> = OnceLock::new();
    BOLD.get_or_init(|| {
        Regex::new(r"^(?:(?:[-*•+]|\d{1,2}[.)])\s+)?\*\*(.+?)(?::\*\*|\*\*\s*:)\s*(.*)$").ok()
    })
    .as_ref()
}

/// Leading bullet or ordinal list marker
fn list_marker_regex() -> Option<&'static Regex> {
    static MARKER: OnceLock<Option<Regex>> = OnceLock::new();
    MARKER
        .get_or_init(|| Regex::new(r"^(?:[-*•+]|\d{1,2}[.)])\s+").ok())
        .as_ref()
}

/// Parse raw plan text, attaching diagrams to main-phase exercises when given
#[must_use]
pub fn parse_plan(text: &str, diagrams: Option<&Diagrams>) -> ParsedPlan {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let markdown_style = lines.iter().any(|line| is_bold_exercise_line(line));

    let mut plan = ParsedPlan::default();
    let mut title_found = false;
    let mut phase: Option<PhaseKind> = None;
    let mut current: Option<Exercise> = None;
    let mut main_index = 0usize;

    for (index, line) in lines.iter().enumerate() {
        let header = phase_header(line);

        if !title_found && phase.is_none() && header.is_none() {
            let cleaned = strip_decoration(line);
            if (index == 0 && !is_duration_line(line)) || cleaned.starts_with("Entrenamiento") {
                plan.title = cleaned;
                title_found = true;
                continue;
            }
        }

        if let Some((text, kind)) = header {
            close_exercise(&mut plan, &mut current);
            phase = Some(kind);
            plan.content.push(PlanBlock::Heading { text, phase: kind });
            continue;
        }

        if !is_duration_line(line) {
            if let Some((title, description)) = split_exercise_line(line, markdown_style) {
                close_exercise(&mut plan, &mut current);

                let diagram_eligible = phase.is_some_and(PhaseKind::is_main);
                let diagram = if diagram_eligible {
                    let found = diagrams
                        .and_then(|d| d.diagram_for(&title, main_index))
                        .map(str::to_owned);
                    main_index += 1;
                    found
                } else {
                    None
                };

                current = Some(Exercise {
                    title,
                    description,
                    diagram_eligible,
                    diagram,
                });
                continue;
            }
        }

        if let Some(exercise) = current.as_mut() {
            let continuation = line.strip_prefix("- ").unwrap_or(line).trim();
            if !exercise.description.is_empty() {
                exercise.description.push('\n');
            }
            exercise.description.push_str(continuation);
        } else {
            plan.content
                .push(PlanBlock::Paragraph(strip_emphasis(line).trim().to_owned()));
        }
    }

    close_exercise(&mut plan, &mut current);

    debug!(
        title = %plan.title,
        blocks = plan.content.len(),
        exercises = plan.exercises().count(),
        markdown_style,
        "Parsed training plan"
    );

    plan
}

fn close_exercise(plan: &mut ParsedPlan, current: &mut Option<Exercise>) {
    if let Some(exercise) = current.take() {
        plan.content.push(PlanBlock::Exercise(exercise));
    }
}

/// Normalize an exercise name into its join key
///
/// Removes emphasis characters (`*`, `_`, backtick) and leading bullet or
/// ordinal markers (`-`, `*`, `•`, `1.`, `1)`), then trims. Applying it to
/// its own output returns the same string.
#[must_use]
pub fn clean_exercise_title(raw: &str) -> String {
    let without_emphasis: String = raw
        .chars()
        .filter(|c| !matches!(c, '*' | '_' | '`'))
        .collect();

    let mut title = without_emphasis.trim();
    if let Some(marker) = list_marker_regex() {
        while let Some(found) = marker.find(title) {
            title = title[found.end()..].trim_start();
        }
    }
    title.trim().to_owned()
}

/// Whether a line announces a duration rather than an exercise
///
/// Matches lines starting with "duración"/"duracion" and lines containing
/// "duración total", case-insensitively and ignoring decoration.
#[must_use]
pub fn is_duration_line(line: &str) -> bool {
    let lowered = strip_decoration(line).to_lowercase();
    lowered.starts_with("duración")
        || lowered.starts_with("duracion")
        || lowered.contains("duración total")
        || lowered.contains("duracion total")
}

/// Split an exercise line into cleaned name and description
///
/// In markdown style only bold-name lines qualify; in plain style any line
/// with a non-empty name before its first colon does.
fn split_exercise_line(line: &str, markdown_style: bool) -> Option<(String, String)> {
    if let Some(caps) = bold_exercise_regex().and_then(|re| re.captures(line)) {
        let name = clean_exercise_title(caps.get(1).map_or("", |m| m.as_str()));
        let description = caps.get(2).map_or("", |m| m.as_str()).trim().to_owned();
        return (!name.is_empty()).then_some((name, description));
    }

    if markdown_style {
        return None;
    }

    let separator = line.find(':')?;
    if separator == 0 {
        return None;
    }
    let name = clean_exercise_title(&line[..separator]);
    let description = line[separator + 1..].trim().to_owned();
    (!name.is_empty()).then_some((name, description))
}

fn is_bold_exercise_line(line: &str) -> bool {
    !is_duration_line(line)
        && phase_header(line).is_none()
        && bold_exercise_regex().is_some_and(|re| re.is_match(line))
}

/// Recognize a phase header, returning its display text and phase
///
/// A numbered or keycap line is a header when it has no colon, or when the
/// text before its colon starts with a phase name. A bold-name line is a
/// header only when its label starts with a phase name and nothing but a
/// duration follows. A `#` heading is a header only when it names a phase.
fn phase_header(line: &str) -> Option<(String, PhaseKind)> {
    if let Some(caps) = bold_exercise_regex().and_then(|re| re.captures(line)) {
        let label = clean_exercise_title(caps.get(1).map_or("", |m| m.as_str()));
        let remainder = caps.get(2).map_or("", |m| m.as_str()).trim();
        let duration_only = remainder.is_empty()
            || remainder.starts_with(|c: char| c.is_ascii_digit() || c == '(');
        if !duration_only || leading_phase(&label).is_none() {
            return None;
        }
    }

    let hashed = line.starts_with('#');
    let stripped = line
        .trim_start_matches('#')
        .trim_start()
        .trim_start_matches(['*', '_']);

    let numbered = numbered_header_regex()
        .and_then(|re| re.captures(stripped))
        .or_else(|| keycap_header_regex().and_then(|re| re.captures(stripped)));

    let kind = if let Some(caps) = numbered {
        let ordinal = caps
            .get(1)
            .and_then(|m| m.as_str().parse::<u32>().ok())
            .unwrap_or(0);
        let rest = strip_emphasis(caps.get(2).map_or("", |m| m.as_str()));
        match rest.split_once(':') {
            Some((label, _)) => leading_phase(label)?,
            None => phase_keyword(&rest).unwrap_or_else(|| PhaseKind::from_ordinal(ordinal)),
        }
    } else if hashed {
        phase_keyword(&strip_emphasis(stripped))?
    } else {
        return None;
    };

    let text = strip_emphasis(line).trim_start_matches('#').trim().to_owned();
    Some((text, kind))
}

/// Phase names a header label may open with
const PHASE_PREFIXES: [(&str, PhaseKind); 6] = [
    ("calentamiento", PhaseKind::WarmUp),
    ("entrenamiento principal", PhaseKind::Main),
    ("parte principal", PhaseKind::Main),
    ("principal", PhaseKind::Main),
    ("enfriamiento", PhaseKind::CoolDown),
    ("vuelta a la calma", PhaseKind::CoolDown),
];

/// Phase whose name opens a label, skipping leading digits and symbols
fn leading_phase(label: &str) -> Option<PhaseKind> {
    let lowered = label
        .trim_start_matches(|c: char| !c.is_alphabetic())
        .to_lowercase();
    PHASE_PREFIXES
        .iter()
        .find(|(prefix, _)| lowered.starts_with(prefix))
        .map(|&(_, kind)| kind)
}

/// Phase named anywhere in a header's words, if any
fn phase_keyword(text: &str) -> Option<PhaseKind> {
    let lowered = text.to_lowercase();
    if lowered.contains("calentamiento") {
        Some(PhaseKind::WarmUp)
    } else if lowered.contains("principal") {
        Some(PhaseKind::Main)
    } else if lowered.contains("enfriamiento") || lowered.contains("vuelta a la calma") {
        Some(PhaseKind::CoolDown)
    } else {
        None
    }
}

/// Remove bold/italic markers (`**`, `__`)
fn strip_emphasis(text: &str) -> String {
    text.replace("**", "").replace("__", "")
}

/// Remove emphasis, heading hashes, and leading emoji or bullet symbols
fn strip_decoration(line: &str) -> String {
    let without_emphasis = strip_emphasis(line);
    without_emphasis
        .trim_start_matches('#')
        .trim_start_matches(|c: char| {
            !c.is_alphanumeric() && !matches!(c, '¿' | '¡' | '(' | '"' | '\'')
        })
        .trim()
        .to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbered_header_with_colon_needs_leading_phase_name() {
        assert!(phase_header("1. Calentamiento (10 minutos)").is_some());
        assert!(phase_header("2. Entrenamiento principal: 30 minutos").is_some());
        assert!(phase_header("1. Rondo 4v2: circulación rápida").is_none());
        assert!(phase_header("1. Rondo de calentamiento: 4v2 rápido").is_none());
        assert!(phase_header("2. Juego de posesión en la parte principal: 6v3").is_none());
    }

    #[test]
    fn test_bold_exercise_line_is_not_a_header() {
        assert!(phase_header("1. **Rondo de calentamiento**: 4v2 rápido.").is_none());
        assert!(phase_header("2. **Calentamiento dinámico**: trote y movilidad").is_none());

        let (_, kind) = phase_header("1. **Calentamiento (10 minutos):**").unwrap();
        assert_eq!(kind, PhaseKind::WarmUp);
        let (_, kind) = phase_header("**3️⃣ Vuelta a la calma:** 5 minutos").unwrap();
        assert_eq!(kind, PhaseKind::CoolDown);
    }

    #[test]
    fn test_keycap_and_hash_headers() {
        let (text, kind) = phase_header("**2️⃣ Entrenamiento principal (30 minutos)**").unwrap();
        assert_eq!(text, "2️⃣ Entrenamiento principal (30 minutos)");
        assert_eq!(kind, PhaseKind::Main);

        let (text, kind) = phase_header("## Vuelta a la calma").unwrap();
        assert_eq!(text, "Vuelta a la calma");
        assert_eq!(kind, PhaseKind::CoolDown);

        assert!(phase_header("## Notas del entrenador").is_none());
    }

    #[test]
    fn test_ordinal_fallback_when_no_keyword() {
        let (_, kind) = phase_header("3. Estiramientos (5 minutos)").unwrap();
        assert_eq!(kind, PhaseKind::CoolDown);
        let (_, kind) = phase_header("4. Extra").unwrap();
        assert_eq!(kind, PhaseKind::Other);
    }

    #[test]
    fn test_bold_exercise_forms() {
        let (name, desc) = split_exercise_line("- **Rondo 4v2**: Circulación rápida.", true).unwrap();
        assert_eq!(name, "Rondo 4v2");
        assert_eq!(desc, "Circulación rápida.");

        let (name, _) = split_exercise_line("**Pase largo:** En parejas.", true).unwrap();
        assert_eq!(name, "Pase largo");

        assert!(split_exercise_line("- Material: conos", true).is_none());
        assert!(split_exercise_line("- Material: conos", false).is_some());
    }

    #[test]
    fn test_strip_decoration_drops_leading_emoji() {
        assert_eq!(
            strip_decoration("⚽ **Entrenamiento de Técnica**"),
            "Entrenamiento de Técnica"
        );
        assert_eq!(strip_decoration("# Entrenamiento"), "Entrenamiento");
    }
}
