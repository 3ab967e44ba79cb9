// ABOUTME: Renderers that turn a parsed plan into terminal text or a standalone HTML document
// ABOUTME: Shares the SVG data-URL encoding used wherever diagrams are embedded as images
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod html;
pub mod text;

pub use html::render_html;
pub use text::render_text;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Encode SVG markup as a `data:image/svg+xml;base64,` URL
#[must_use]
pub fn svg_data_url(svg: &str) -> String {
    format!("data:image/svg+xml;base64,{}", STANDARD.encode(svg.as_bytes()))
}
