// ABOUTME: Fixed-width page layout of a parsed plan shared by the SVG snapshot and PDF writers
// ABOUTME: Word-wraps text, stacks blocks vertically, and reserves space for diagrams
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Coordinates are logical pixels with the origin at the top-left corner and
//! text positioned by its baseline. Writers apply the capture scale.

use football_coach_core::constants::export::{DIAGRAM_HEIGHT, DIAGRAM_WIDTH, VIEW_WIDTH};

use crate::plan::{is_duration_line, ParsedPlan, PlanBlock};

const MARGIN: u32 = 32;
const PANEL_PADDING: u32 = 16;
const TITLE_SIZE: u32 = 28;
const HEADING_SIZE: u32 = 22;
const EXERCISE_TITLE_SIZE: u32 = 17;
const BODY_SIZE: u32 = 15;

/// Page background
pub const BACKGROUND: &str = "#1f2937";
/// Exercise panel fill
pub const PANEL_FILL: &str = "#111827";
const ACCENT: &str = "#4ade80";
const BODY: &str = "#d1d5db";
const MUTED: &str = "#9ca3af";
const BRIGHT: &str = "#f3f4f6";

/// Horizontal text anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// Left-aligned at `x`
    Start,
    /// Centered on `x`
    Middle,
}

/// A positioned drawing primitive
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    /// One line of text
    Text {
        /// Anchor x
        x: u32,
        /// Baseline y
        y: u32,
        /// Font size in logical pixels
        size: u32,
        /// Bold face
        bold: bool,
        /// Hex fill colour
        color: &'static str,
        /// Horizontal anchor
        anchor: Anchor,
        /// Line content
        text: String,
    },
    /// Rounded background behind an exercise
    Panel {
        /// Left edge
        x: u32,
        /// Top edge
        y: u32,
        /// Width
        width: u32,
        /// Height
        height: u32,
    },
    /// Diagram slot
    Diagram {
        /// Left edge
        x: u32,
        /// Top edge
        y: u32,
        /// Width
        width: u32,
        /// Height
        height: u32,
        /// Exercise the diagram belongs to
        label: String,
        /// SVG markup
        svg: String,
    },
}

/// Laid-out page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// Page width in logical pixels
    pub width: u32,
    /// Page height in logical pixels
    pub height: u32,
    /// Primitives in paint order
    pub elements: Vec<Element>,
}

#[derive(Clone, Copy)]
struct TextStyle {
    size: u32,
    bold: bool,
    color: &'static str,
    anchor: Anchor,
}

const TITLE: TextStyle = TextStyle {
    size: TITLE_SIZE,
    bold: true,
    color: ACCENT,
    anchor: Anchor::Middle,
};
const HEADING: TextStyle = TextStyle {
    size: HEADING_SIZE,
    bold: true,
    color: ACCENT,
    anchor: Anchor::Start,
};
const DURATION: TextStyle = TextStyle {
    size: BODY_SIZE,
    bold: true,
    color: MUTED,
    anchor: Anchor::Middle,
};
const PARAGRAPH: TextStyle = TextStyle {
    size: BODY_SIZE,
    bold: false,
    color: BODY,
    anchor: Anchor::Start,
};
const EXERCISE_TITLE: TextStyle = TextStyle {
    size: EXERCISE_TITLE_SIZE,
    bold: true,
    color: BRIGHT,
    anchor: Anchor::Start,
};

struct Cursor {
    y: u32,
    elements: Vec<Element>,
}

impl Cursor {
    fn text_lines(&mut self, text: &str, x: u32, width: u32, style: TextStyle) {
        let line_height = style.size * 3 / 2;
        for line in wrap(text, max_chars(width, style.size)) {
            self.y += line_height;
            self.elements.push(Element::Text {
                x,
                y: self.y,
                size: style.size,
                bold: style.bold,
                color: style.color,
                anchor: style.anchor,
                text: line,
            });
        }
    }
}

/// Lay out a plan on a page [`VIEW_WIDTH`] pixels wide
#[must_use]
pub fn layout_plan(plan: &ParsedPlan) -> Layout {
    let width = VIEW_WIDTH;
    let content_width = width - 2 * MARGIN;
    let mut cursor = Cursor {
        y: MARGIN,
        elements: Vec::new(),
    };

    if !plan.title.is_empty() {
        cursor.text_lines(&plan.title, width / 2, content_width, TITLE);
        cursor.y += 12;
    }

    for block in &plan.content {
        match block {
            PlanBlock::Heading { text, .. } => {
                cursor.y += 20;
                cursor.text_lines(text, MARGIN, content_width, HEADING);
                cursor.y += 4;
            }
            PlanBlock::Paragraph(text) if is_duration_line(text) => {
                cursor.text_lines(text, width / 2, content_width, DURATION);
                cursor.y += 8;
            }
            PlanBlock::Paragraph(text) => {
                cursor.text_lines(text, MARGIN + 16, content_width - 16, PARAGRAPH);
            }
            PlanBlock::Exercise(exercise) => {
                cursor.y += 12;
                let panel_top = cursor.y;
                let panel_index = cursor.elements.len();
                let inner_x = MARGIN + PANEL_PADDING;
                let inner_width = content_width - 2 * PANEL_PADDING;

                cursor.y += PANEL_PADDING / 2;
                cursor.text_lines(&exercise.title, inner_x, inner_width, EXERCISE_TITLE);
                for line in exercise.description.lines() {
                    cursor.text_lines(line, inner_x, inner_width, PARAGRAPH);
                }
                if let Some(svg) = &exercise.diagram {
                    cursor.y += PANEL_PADDING;
                    cursor.elements.push(Element::Diagram {
                        x: inner_x,
                        y: cursor.y,
                        width: DIAGRAM_WIDTH,
                        height: DIAGRAM_HEIGHT,
                        label: exercise.title.clone(),
                        svg: svg.clone(),
                    });
                    cursor.y += DIAGRAM_HEIGHT;
                }
                cursor.y += PANEL_PADDING;

                cursor.elements.insert(
                    panel_index,
                    Element::Panel {
                        x: MARGIN,
                        y: panel_top,
                        width: content_width,
                        height: cursor.y - panel_top,
                    },
                );
            }
        }
    }

    Layout {
        width,
        height: cursor.y + MARGIN,
        elements: cursor.elements,
    }
}

/// Approximate characters per line for a proportional sans-serif face
fn max_chars(width: u32, size: u32) -> usize {
    let average_glyph = (size * 11 / 20).max(1);
    usize::try_from(width / average_glyph).unwrap_or(usize::MAX).max(8)
}

/// Greedy word wrap; words longer than a line are hard-split
fn wrap(text: &str, max: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_len = 0usize;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > max {
            if line_len > 0 {
                lines.push(std::mem::take(&mut line));
                line_len = 0;
            }
            let rest = word.split_off(max);
            lines.push(word.into_iter().collect());
            word = rest;
        }

        let needed = if line_len == 0 { word.len() } else { line_len + 1 + word.len() };
        if needed > max && line_len > 0 {
            lines.push(std::mem::take(&mut line));
            line_len = 0;
        }
        if line_len > 0 {
            line.push(' ');
            line_len += 1;
        }
        line.extend(word.iter());
        line_len += word.len();
    }

    if line_len > 0 {
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_respects_width() {
        let lines = wrap("uno dos tres cuatro cinco", 9);
        assert_eq!(lines, vec!["uno dos", "tres", "cuatro", "cinco"]);
    }

    #[test]
    fn test_wrap_splits_long_words() {
        let lines = wrap("abcdefghijkl", 5);
        assert_eq!(lines, vec!["abcde", "fghij", "kl"]);
    }

    #[test]
    fn test_empty_plan_has_margins_only() {
        let layout = layout_plan(&ParsedPlan::default());
        assert_eq!(layout.height, 2 * MARGIN);
        assert!(layout.elements.is_empty());
    }
}
