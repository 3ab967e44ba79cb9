// ABOUTME: Exports a parsed plan to HTML, an SVG or PNG snapshot, a single-image PDF, or JSON
// ABOUTME: Guards against overlapping exports and writes timestamped files to the download directory
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Export
//!
//! [`render_document`] is pure and returns the bytes of a document.
//! [`Exporter`] adds the file side: one export at a time, timestamped names,
//! and failures that are logged rather than returned, so a failed export
//! never disturbs the plan being shown. Rasterizing runs on the blocking
//! pool.

pub mod layout;
pub mod pdf;
pub mod raster;
pub mod svg;

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::Local;
use football_coach_core::constants::export::{CAPTURE_SCALE, FILE_STEM};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::{error, info, warn};

use crate::errors::{AppError, AppResult};
use crate::plan::ParsedPlan;
use crate::render::render_html;

pub use layout::layout_plan;

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Standalone HTML document
    Html,
    /// SVG image snapshot at the capture scale
    Svg,
    /// PNG raster of the snapshot
    Png,
    /// Single-page PDF holding the PNG raster
    Pdf,
    /// Serialized parsed plan
    Json,
}

impl ExportFormat {
    /// All formats, in CLI help order
    pub const ALL: [Self; 5] = [Self::Html, Self::Svg, Self::Png, Self::Pdf, Self::Json];

    /// File extension without the dot
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Svg => "svg",
            Self::Png => "png",
            Self::Pdf => "pdf",
            Self::Json => "json",
        }
    }
}

impl Display for ExportFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "html" | "htm" => Ok(Self::Html),
            "svg" => Ok(Self::Svg),
            "png" | "image" => Ok(Self::Png),
            "pdf" => Ok(Self::Pdf),
            "json" => Ok(Self::Json),
            other => Err(AppError::invalid_input(format!(
                "Unknown export format '{other}' (expected html, svg, png, pdf, or json)"
            ))),
        }
    }
}

/// Render a plan into the bytes of the requested document
///
/// PNG and PDF rasterize the snapshot, which is CPU-bound.
///
/// # Errors
///
/// Returns a serialization error if JSON or PNG encoding fails, or an
/// invalid-format error if the snapshot cannot be rasterized.
pub fn render_document(plan: &ParsedPlan, format: ExportFormat) -> AppResult<Vec<u8>> {
    let bytes = match format {
        ExportFormat::Html => render_html(plan).into_bytes(),
        ExportFormat::Svg => svg::render_snapshot(&layout_plan(plan), CAPTURE_SCALE).into_bytes(),
        ExportFormat::Png => rasterize_plan(&layout_plan(plan))?.encode_png()?,
        ExportFormat::Pdf => {
            let layout = layout_plan(plan);
            let image = rasterize_plan(&layout)?;
            pdf::render_pdf(&layout, &image, CAPTURE_SCALE)?
        }
        ExportFormat::Json => serde_json::to_vec_pretty(plan)?,
    };
    Ok(bytes)
}

fn rasterize_plan(layout: &layout::Layout) -> AppResult<raster::Raster> {
    raster::rasterize(&svg::render_snapshot(layout, CAPTURE_SCALE))
}

/// The plan snapshot as a `data:image/png;base64,` URL at the capture scale
///
/// # Errors
///
/// Fails as [`render_document`] does for [`ExportFormat::Png`].
pub fn snapshot_data_url(plan: &ParsedPlan) -> AppResult<String> {
    let png = render_document(plan, ExportFormat::Png)?;
    Ok(format!("data:image/png;base64,{}", STANDARD.encode(png)))
}

/// Writes exports into a directory, one at a time
#[derive(Debug)]
pub struct Exporter {
    dir: PathBuf,
    in_flight: AtomicBool,
}

/// Clears the in-flight flag when an export ends, however it ends
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Exporter {
    /// Create an exporter writing into `dir`
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Target directory
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Whether an export is currently running
    #[must_use]
    pub fn is_exporting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Export a plan, returning the written path
    ///
    /// Returns `None` without doing anything while another export is in
    /// flight, and `None` after logging when rendering or writing fails.
    pub async fn export(&self, plan: &ParsedPlan, format: ExportFormat) -> Option<PathBuf> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!(%format, "Export already in progress; ignoring request");
            return None;
        }
        let _guard = InFlightGuard(&self.in_flight);

        match self.write(plan, format).await {
            Ok(path) => {
                info!(%format, path = %path.display(), "Plan exported");
                Some(path)
            }
            Err(e) => {
                error!(%format, error = %e, "Failed to export plan");
                None
            }
        }
    }

    async fn write(&self, plan: &ParsedPlan, format: ExportFormat) -> AppResult<PathBuf> {
        let owned = plan.clone();
        let bytes = tokio::task::spawn_blocking(move || render_document(&owned, format))
            .await
            .map_err(|e| AppError::internal(format!("Export renderer stopped: {e}")))??;
        fs::create_dir_all(&self.dir).await?;

        let path = self.dir.join(file_name(format));
        fs::write(&path, bytes).await?;
        Ok(path)
    }
}

/// `plan-entrenamiento-20250114-183005123.pdf`
fn file_name(format: ExportFormat) -> String {
    format!(
        "{FILE_STEM}-{}.{}",
        Local::now().format("%Y%m%d-%H%M%S%3f"),
        format.extension()
    )
}
