// ABOUTME: Rasterizes the SVG plan snapshot into a pixel image for PNG and PDF export
// ABOUTME: Shares one system font database across exports and encodes PNG bytes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::{Arc, OnceLock};

use resvg::usvg::{self, fontdb};
use tiny_skia::{Pixmap, Transform};
use tracing::debug;

use crate::errors::{AppError, AppResult, ErrorCode};

/// A rendered snapshot
#[derive(Debug)]
pub struct Raster {
    pixmap: Pixmap,
}

impl Raster {
    /// Width in pixels
    #[must_use]
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    /// Height in pixels
    #[must_use]
    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Encode as PNG
    ///
    /// # Errors
    ///
    /// Returns a serialization error if the encoder fails.
    pub fn encode_png(&self) -> AppResult<Vec<u8>> {
        self.pixmap.encode_png().map_err(|e| {
            AppError::new(
                ErrorCode::SerializationError,
                format!("Failed to encode PNG: {e}"),
            )
            .with_source(e)
        })
    }

    /// Straight-alpha RGB samples, row by row, without the alpha channel
    #[must_use]
    pub fn rgb_samples(&self) -> Vec<u8> {
        self.pixmap
            .pixels()
            .iter()
            .flat_map(|pixel| {
                let color = pixel.demultiply();
                [color.red(), color.green(), color.blue()]
            })
            .collect()
    }
}

/// System fonts, loaded once
fn fonts() -> Arc<fontdb::Database> {
    static FONTS: OnceLock<Arc<fontdb::Database>> = OnceLock::new();
    FONTS
        .get_or_init(|| {
            let mut db = fontdb::Database::new();
            db.load_system_fonts();
            debug!(faces = db.len(), "Loaded system fonts for rasterization");
            Arc::new(db)
        })
        .clone()
}

/// Render an SVG document at its declared pixel size
///
/// # Errors
///
/// Returns `InvalidFormat` when the SVG cannot be parsed or has no area.
pub fn rasterize(svg: &str) -> AppResult<Raster> {
    let options = usvg::Options {
        fontdb: fonts(),
        ..usvg::Options::default()
    };
    let tree = usvg::Tree::from_str(svg, &options).map_err(|e| {
        AppError::new(
            ErrorCode::InvalidFormat,
            format!("Snapshot is not valid SVG: {e}"),
        )
        .with_source(e)
    })?;

    let size = tree.size().to_int_size();
    let mut pixmap = Pixmap::new(size.width(), size.height()).ok_or_else(|| {
        AppError::new(
            ErrorCode::InvalidFormat,
            format!(
                "Snapshot has no drawable area ({}x{})",
                size.width(),
                size.height()
            ),
        )
    })?;
    resvg::render(&tree, Transform::identity(), &mut pixmap.as_mut());

    Ok(Raster { pixmap })
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED_SQUARE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="4" height="2" viewBox="0 0 2 1"><rect width="2" height="1" fill="#ff0000"/></svg>"##;

    #[test]
    fn test_rasterize_uses_declared_pixel_size() {
        let raster = rasterize(RED_SQUARE).unwrap();
        assert_eq!((raster.width(), raster.height()), (4, 2));
        assert_eq!(&raster.rgb_samples()[..3], &[255, 0, 0]);
        assert_eq!(raster.rgb_samples().len(), 4 * 2 * 3);
    }

    #[test]
    fn test_png_signature() {
        let png = rasterize(RED_SQUARE).unwrap().encode_png().unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_invalid_svg_is_rejected() {
        let err = rasterize("not an svg").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidFormat);
    }
}
