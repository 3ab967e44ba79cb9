// ABOUTME: Integration tests for plan rendering and file export
// ABOUTME: Covers HTML escaping, snapshot sizing, PNG and PDF output, and the in-flight export guard
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

mod common;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use common::{svg, MARKDOWN_PLAN, PLAIN_PLAN};
use football_coach::config::DiagramAlignment;
use football_coach::diagrams::Diagrams;
use football_coach::export::{
    layout_plan, render_document, snapshot_data_url, ExportFormat, Exporter,
};
use football_coach::plan::{parse_plan, ParsedPlan};
use football_coach::render::{render_html, render_text, svg_data_url};
use tempfile::TempDir;

const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";

fn plan_with_diagrams() -> ParsedPlan {
    let mut diagrams = Diagrams::empty(DiagramAlignment::Positional);
    diagrams.upsert("Rondo 4v2".to_owned(), svg("rondo"));
    diagrams.upsert("Pase y desmarque".to_owned(), svg("pase"));
    parse_plan(MARKDOWN_PLAN, Some(&diagrams))
}

// ============================================================================
// Text and HTML
// ============================================================================

#[test]
fn test_render_text_marks_diagrams() {
    let text = render_text(&plan_with_diagrams());

    assert!(text.starts_with("Entrenamiento de Técnica - Nivel Intermedio\n"));
    assert!(text.contains("  • Rondo 4v2\n"));
    assert!(text.contains("    Material: 6 conos y 1 balón.\n"));
    assert_eq!(text.matches("[diagrama disponible]").count(), 2);
}

#[test]
fn test_render_html_structure_and_images() {
    let html = render_html(&plan_with_diagrams());

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<h1>Entrenamiento de Técnica - Nivel Intermedio</h1>"));
    assert!(html.contains("<h2 data-phase=\"main\">"));
    assert!(html.contains("<p class=\"duration\">Duración total: 60 minutos</p>"));
    assert_eq!(html.matches("<section class=\"exercise\">").count(), 5);
    assert!(html.contains(&svg_data_url(&svg("rondo"))));
    assert!(!html.contains("<svg"));
}

#[test]
fn test_render_html_escapes_generated_text() {
    let plan = parse_plan(
        "Plan <b>\n2. Entrenamiento principal\nTiro: Usar \"conos\" & <script>",
        None,
    );
    let html = render_html(&plan);

    assert!(html.contains("<h1>Plan &lt;b&gt;</h1>"));
    assert!(html.contains("&amp; &lt;script&gt;"));
    assert!(!html.contains("<script>"));
}

#[test]
fn test_svg_data_url_round_trips() {
    let url = svg_data_url("<svg/>");
    let encoded = url.strip_prefix("data:image/svg+xml;base64,").unwrap();
    assert_eq!(STANDARD.decode(encoded).unwrap(), b"<svg/>");
}

// ============================================================================
// Snapshot and PDF
// ============================================================================

#[test]
fn test_snapshot_is_twice_the_layout_size() {
    let plan = plan_with_diagrams();
    let layout = layout_plan(&plan);
    let snapshot = String::from_utf8(render_document(&plan, ExportFormat::Svg).unwrap()).unwrap();

    assert!(snapshot.starts_with(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"1600\" height=\"{}\"",
        layout.height * 2
    )));
    assert_eq!(snapshot.matches("<image ").count(), 2);
    assert!(snapshot.trim_end().ends_with("</svg>"));
}

#[test]
fn test_snapshot_data_url_is_png() {
    let url = snapshot_data_url(&parse_plan(PLAIN_PLAN, None)).unwrap();
    let encoded = url.strip_prefix("data:image/png;base64,").unwrap();
    assert!(STANDARD.decode(encoded).unwrap().starts_with(PNG_SIGNATURE));
}

#[test]
fn test_png_is_a_real_raster_at_twice_the_layout_size() {
    let plan = plan_with_diagrams();
    let layout = layout_plan(&plan);
    let png = render_document(&plan, ExportFormat::Png).unwrap();

    assert!(png.starts_with(PNG_SIGNATURE));
    assert_eq!(&png[12..16], b"IHDR");
    let width = u32::from_be_bytes(png[16..20].try_into().unwrap());
    let height = u32::from_be_bytes(png[20..24].try_into().unwrap());
    assert_eq!(width, 1600);
    assert_eq!(height, layout.height * 2);
}

#[test]
fn test_layout_grows_with_diagrams() {
    let without = layout_plan(&parse_plan(MARKDOWN_PLAN, None));
    let with = layout_plan(&plan_with_diagrams());
    assert!(with.height > without.height);
    assert_eq!(with.width, 800);
}

#[test]
fn test_pdf_embeds_snapshot_image() {
    let plan = plan_with_diagrams();
    let layout = layout_plan(&plan);
    let bytes = render_document(&plan, ExportFormat::Pdf).unwrap();
    let pdf = String::from_utf8_lossy(&bytes);
    let height = layout.height * 2;

    assert!(pdf.starts_with("%PDF-1.4\n"));
    assert!(pdf.ends_with("%%EOF\n"));
    assert!(pdf.contains(&format!("/MediaBox [0 0 1600 {height}]")));
    assert!(pdf.contains(&format!(
        "/Subtype /Image /Width 1600 /Height {height} /ColorSpace /DeviceRGB"
    )));
    assert!(pdf.contains("/Filter /FlateDecode"));
    assert!(pdf.contains(&format!("q 1600 0 0 {height} 0 0 cm /Im1 Do Q")));
    assert!(pdf.contains("(Diagrama: Rondo 4v2) Tj"));

    let xref = bytes.windows(6).rposition(|w| w == b"\nxref\n").unwrap() + 1;
    let startxref: usize = pdf
        .split("startxref\n")
        .nth(1)
        .and_then(|rest| rest.lines().next())
        .unwrap()
        .parse()
        .unwrap();
    assert_eq!(startxref, xref);
}

#[test]
fn test_json_export_round_trips_plan() {
    let plan = plan_with_diagrams();
    let bytes = render_document(&plan, ExportFormat::Json).unwrap();
    let decoded: ParsedPlan = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(decoded, plan);
}

// ============================================================================
// Export Formats
// ============================================================================

#[test]
fn test_export_format_parsing() {
    assert_eq!("PDF".parse::<ExportFormat>().unwrap(), ExportFormat::Pdf);
    assert_eq!("png".parse::<ExportFormat>().unwrap(), ExportFormat::Png);
    assert_eq!("svg".parse::<ExportFormat>().unwrap(), ExportFormat::Svg);
    assert_eq!(ExportFormat::Png.extension(), "png");
    assert_eq!("htm".parse::<ExportFormat>().unwrap(), ExportFormat::Html);
    assert!("docx".parse::<ExportFormat>().is_err());
    assert_eq!(ExportFormat::Json.to_string(), "json");
}

// ============================================================================
// Exporter
// ============================================================================

#[tokio::test]
async fn test_export_writes_timestamped_files() {
    let dir = TempDir::new().unwrap();
    let exporter = Exporter::new(dir.path().join("descargas"));
    let plan = plan_with_diagrams();

    for format in ExportFormat::ALL {
        let path = exporter.export(&plan, format).await.unwrap();
        let name = path.file_name().unwrap().to_str().unwrap();

        assert!(name.starts_with("plan-entrenamiento-"));
        assert_eq!(path.extension().unwrap(), format.extension());
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }
    assert!(!exporter.is_exporting());
}

#[tokio::test]
async fn test_concurrent_export_is_refused() {
    let dir = TempDir::new().unwrap();
    let exporter = Exporter::new(dir.path());
    let plan = parse_plan(PLAIN_PLAN, None);

    let (first, second) = tokio::join!(
        exporter.export(&plan, ExportFormat::Html),
        exporter.export(&plan, ExportFormat::Pdf)
    );

    assert!(first.is_some());
    assert!(second.is_none());
    assert!(!exporter.is_exporting());
}

#[tokio::test]
async fn test_export_failure_is_logged_not_returned() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, b"file").unwrap();

    let exporter = Exporter::new(&blocker);
    let result = exporter
        .export(&parse_plan(PLAIN_PLAN, None), ExportFormat::Html)
        .await;

    assert!(result.is_none());
    assert!(!exporter.is_exporting());
}
