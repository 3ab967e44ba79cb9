// ABOUTME: Writes the laid-out plan as a single-page PDF sized to the image snapshot
// ABOUTME: Embeds the rasterized snapshot as the page image under an invisible Helvetica text layer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! The page is the rasterized snapshot drawn as one image, with the text laid
//! over it in invisible render mode so the PDF stays searchable. Text uses
//! WinAnsi bytes written as octal escapes, so only the image stream is binary.
//! Characters outside WinAnsi (emoji, keycap marks) are dropped from the text
//! layer.

use std::fmt::Write as _;
use std::io::Write as _;

use flate2::write::ZlibEncoder;
use flate2::Compression;

use super::layout::{Anchor, Element, Layout};
use super::raster::Raster;
use crate::errors::AppResult;

/// Render a one-page PDF holding `image`, with the layout's text as a hidden layer
///
/// The page is sized to the image; `scale` maps layout units onto it.
///
/// # Errors
///
/// Returns an IO error if compressing the image fails.
pub fn render_pdf(layout: &Layout, image: &Raster, scale: u32) -> AppResult<Vec<u8>> {
    let page_width = image.width();
    let page_height = image.height();
    let content = content_stream(layout, page_width, page_height, scale);

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&image.rgb_samples())?;
    let pixels = encoder.finish()?;

    let mut image_object = format!(
        "<< /Type /XObject /Subtype /Image /Width {page_width} /Height {page_height} \
         /ColorSpace /DeviceRGB /BitsPerComponent 8 /Filter /FlateDecode /Length {} >>\nstream\n",
        pixels.len()
    )
    .into_bytes();
    image_object.extend_from_slice(&pixels);
    image_object.extend_from_slice(b"\nendstream");

    let objects: [Vec<u8>; 7] = [
        b"<< /Type /Catalog /Pages 2 0 R >>".to_vec(),
        b"<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_vec(),
        format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {page_width} {page_height}] \
             /Resources << /Font << /F1 5 0 R /F2 6 0 R >> /XObject << /Im1 7 0 R >> >> \
             /Contents 4 0 R >>"
        )
        .into_bytes(),
        format!(
            "<< /Length {} >>\nstream\n{content}\nendstream",
            content.len()
        )
        .into_bytes(),
        b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
            .to_vec(),
        b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold /Encoding /WinAnsiEncoding >>"
            .to_vec(),
        image_object,
    ];

    // Binary comment line marks the file as containing binary data
    let mut out = b"%PDF-1.4\n%\xe2\xe3\xcf\xd3\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (index, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n", index + 1).as_bytes());
        out.extend_from_slice(body);
        out.extend_from_slice(b"\nendobj\n");
    }

    let xref_offset = out.len();
    let mut trailer = format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
    for offset in offsets {
        let _ = write!(trailer, "{offset:010} 00000 n \n");
    }
    let _ = write!(
        trailer,
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n",
        objects.len() + 1
    );
    out.extend_from_slice(trailer.as_bytes());

    Ok(out)
}

fn content_stream(layout: &Layout, page_width: u32, page_height: u32, scale: u32) -> String {
    let height = layout.height;
    let mut out = String::new();

    let _ = writeln!(out, "q {page_width} 0 0 {page_height} 0 0 cm /Im1 Do Q");
    let _ = writeln!(out, "q {scale} 0 0 {scale} 0 0 cm");

    for element in &layout.elements {
        match element {
            Element::Text {
                x,
                y,
                size,
                bold,
                anchor,
                text,
                ..
            } => {
                let encoded = encode_win_ansi(text);
                let start_x = match anchor {
                    Anchor::Start => *x,
                    Anchor::Middle => x.saturating_sub(estimated_width(encoded.len(), *size) / 2),
                };
                push_text(
                    &mut out,
                    &encoded,
                    start_x,
                    height.saturating_sub(*y),
                    *size,
                    *bold,
                );
            }
            Element::Diagram {
                x,
                y,
                height: box_height,
                label,
                ..
            } => {
                let encoded = encode_win_ansi(&format!("Diagrama: {label}"));
                push_text(
                    &mut out,
                    &encoded,
                    *x,
                    height.saturating_sub(y + box_height / 2),
                    13,
                    false,
                );
            }
            Element::Panel { .. } => {}
        }
    }

    out.push('Q');
    out
}

fn push_text(out: &mut String, encoded: &[u8], x: u32, y: u32, size: u32, bold: bool) {
    let font = if bold { "F2" } else { "F1" };
    let _ = writeln!(
        out,
        "BT 3 Tr /{font} {size} Tf {x} {y} Td ({}) Tj ET",
        escape_pdf_string(encoded)
    );
}

/// Average Helvetica advance is roughly half the font size
fn estimated_width(chars: usize, size: u32) -> u32 {
    u32::try_from(chars)
        .unwrap_or(u32::MAX)
        .saturating_mul(size)
        / 2
}

/// Map text to WinAnsi bytes, dropping characters the encoding lacks
fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .filter_map(|c| match c {
            ' '..='~' | '\u{a0}'..='\u{ff}' => u8::try_from(u32::from(c)).ok(),
            '€' => Some(0x80),
            '‚' => Some(0x82),
            '…' => Some(0x85),
            '‘' => Some(0x91),
            '’' => Some(0x92),
            '“' => Some(0x93),
            '”' => Some(0x94),
            '•' => Some(0x95),
            '–' => Some(0x96),
            '—' => Some(0x97),
            '™' => Some(0x99),
            _ => None,
        })
        .collect()
}

/// Escape bytes for a PDF literal string, keeping the output ASCII
fn escape_pdf_string(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for &byte in bytes {
        match byte {
            b'(' | b')' | b'\\' => {
                out.push('\\');
                out.push(char::from(byte));
            }
            0x20..=0x7e => out.push(char::from(byte)),
            _ => {
                let _ = write!(out, "\\{byte:03o}");
            }
        }
    }
    out
}
