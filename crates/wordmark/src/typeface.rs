//! TrueType-backed glyph rasterization.
//!
//! [`Typeface`] loads a TTF/OTF font at runtime and renders text centered
//! into a [`CoverageMask`]. It is the shipped [`GlyphRaster`]
//! implementation; hosts with their own text pipeline can substitute any
//! other one.

use constel_core::{CoverageMask, EngineError, Extent, GlyphRaster};
use rusttype::{point, Font, Scale};
use std::path::Path;

/// A runtime-loaded TrueType font.
#[derive(Debug)]
pub struct Typeface {
    font: Font<'static>,
}

impl Typeface {
    /// Parses a font from raw TTF/OTF bytes.
    ///
    /// Returns `EngineError::Font` when the data is not a parseable font.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, EngineError> {
        let font = Font::try_from_vec(bytes)
            .ok_or_else(|| EngineError::Font("unrecognized font data".to_string()))?;
        Ok(Self { font })
    }

    /// Reads and parses a font file.
    pub fn from_path(path: &Path) -> Result<Self, EngineError> {
        let bytes = std::fs::read(path)
            .map_err(|e| EngineError::Io(format!("read font {}: {e}", path.display())))?;
        Self::from_bytes(bytes)
    }
}

impl GlyphRaster for Typeface {
    /// Renders `text` at `size_px` glyph height, centered in the extent.
    ///
    /// Empty text or a non-positive size produce an empty mask. Glyph
    /// fragments that overhang the extent are clipped by the mask itself.
    fn rasterize(
        &self,
        text: &str,
        size_px: f64,
        extent: Extent,
    ) -> Result<CoverageMask, EngineError> {
        let mut mask = CoverageMask::new(extent.width() as usize, extent.height() as usize)?;
        if text.is_empty() || size_px <= 0.0 {
            return Ok(mask);
        }

        let scale = Scale::uniform(size_px as f32);
        let v_metrics = self.font.v_metrics(scale);

        // Lay the line out once at the origin to measure its advance width,
        // then again at the centered position.
        let measured: Vec<_> = self.font.layout(text, scale, point(0.0, 0.0)).collect();
        let line_width = measured
            .last()
            .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
            .unwrap_or(0.0);
        let x0 = ((extent.width() as f32 - line_width) / 2.0).max(0.0);
        // rusttype descent is negative, so this lands the optical middle of
        // the line on the vertical center.
        let baseline = (extent.height() as f32 + v_metrics.ascent + v_metrics.descent) / 2.0;

        for glyph in self.font.layout(text, scale, point(x0, baseline)) {
            if let Some(bb) = glyph.pixel_bounding_box() {
                glyph.draw(|gx, gy, coverage| {
                    let x = bb.min.x + gx as i32;
                    let y = bb.min.y + gy as i32;
                    if x >= 0 && y >= 0 {
                        mask.stamp(x as usize, y as usize, (coverage * 255.0) as u8);
                    }
                });
            }
        }
        Ok(mask)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Rendering output depends on a real font file, which the binary loads
    // from disk at runtime; these cover the loading failure paths.

    #[test]
    fn from_bytes_rejects_garbage() {
        let result = Typeface::from_bytes(vec![0xde, 0xad, 0xbe, 0xef]);
        assert!(matches!(result, Err(EngineError::Font(_))));
    }

    #[test]
    fn from_bytes_rejects_empty_input() {
        assert!(matches!(
            Typeface::from_bytes(Vec::new()),
            Err(EngineError::Font(_))
        ));
    }

    #[test]
    fn from_path_reports_missing_file_with_path() {
        let path = Path::new("definitely-missing-typeface.ttf");
        let err = Typeface::from_path(path).unwrap_err();
        match err {
            EngineError::Io(msg) => {
                assert!(msg.contains("definitely-missing-typeface.ttf"), "message: {msg}")
            }
            other => panic!("expected an I/O error, got {other:?}"),
        }
    }
}
