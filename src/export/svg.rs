// ABOUTME: Renders the laid-out plan as a standalone SVG image at the capture scale
// ABOUTME: Embeds diagrams as base64 data-URL images so the snapshot is self-contained
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt::Write;

use html_escape::encode_text;

use super::layout::{Anchor, Element, Layout, BACKGROUND, PANEL_FILL};
use crate::render::svg_data_url;

/// Render a layout as an SVG document whose pixel size is `scale` times the layout
#[must_use]
pub fn render_snapshot(layout: &Layout, scale: u32) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\" viewBox=\"0 0 {} {}\" font-family=\"sans-serif\">",
        layout.width * scale,
        layout.height * scale,
        layout.width,
        layout.height
    );
    let _ = writeln!(
        out,
        "<rect width=\"{}\" height=\"{}\" fill=\"{BACKGROUND}\"/>",
        layout.width, layout.height
    );

    for element in &layout.elements {
        match element {
            Element::Text {
                x,
                y,
                size,
                bold,
                color,
                anchor,
                text,
            } => {
                let anchor = match anchor {
                    Anchor::Start => "start",
                    Anchor::Middle => "middle",
                };
                let weight = if *bold { " font-weight=\"bold\"" } else { "" };
                let _ = writeln!(
                    out,
                    "<text x=\"{x}\" y=\"{y}\" font-size=\"{size}\" fill=\"{color}\" text-anchor=\"{anchor}\"{weight}>{}</text>",
                    encode_text(text)
                );
            }
            Element::Panel {
                x,
                y,
                width,
                height,
            } => {
                let _ = writeln!(
                    out,
                    "<rect x=\"{x}\" y=\"{y}\" width=\"{width}\" height=\"{height}\" rx=\"8\" fill=\"{PANEL_FILL}\"/>"
                );
            }
            Element::Diagram {
                x,
                y,
                width,
                height,
                label,
                svg,
            } => {
                let _ = writeln!(
                    out,
                    "<image x=\"{x}\" y=\"{y}\" width=\"{width}\" height=\"{height}\" href=\"{}\"><title>{}</title></image>",
                    svg_data_url(svg),
                    encode_text(label)
                );
            }
        }
    }

    out.push_str("</svg>\n");
    out
}
