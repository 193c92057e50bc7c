//! Glyph coverage rasters.
//!
//! A [`CoverageMask`] is a single-channel grid of 0..=255 coverage values
//! the size of a field, produced by rendering text into it. The wordmark
//! field samples the mask to place particle targets; it never reads fonts
//! directly. [`GlyphRaster`] is the seam: the text backend implements it,
//! and anything that can fill a mask (including test stubs) slots in the
//! same way.

use crate::error::EngineError;
use crate::extent::Extent;

/// A width x height grid of glyph coverage values, row-major.
///
/// 0 means uncovered, 255 fully covered. Reads outside the grid return 0
/// and writes outside it are dropped, so callers can stamp glyph fragments
/// that overhang the edges without pre-clipping.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverageMask {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl CoverageMask {
    /// Creates an all-zero mask.
    ///
    /// Returns `EngineError::InvalidExtent` when either dimension is zero or
    /// the pixel count overflows.
    pub fn new(width: usize, height: usize) -> Result<Self, EngineError> {
        if width == 0 || height == 0 {
            return Err(EngineError::InvalidExtent);
        }
        let len = width.checked_mul(height).ok_or(EngineError::InvalidExtent)?;
        Ok(Self {
            width,
            height,
            data: vec![0; len],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Coverage at a cell, or 0 outside the grid.
    pub fn coverage(&self, x: usize, y: usize) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.data[y * self.width + x]
    }

    /// Writes a coverage value, keeping the higher of old and new.
    ///
    /// Max-blending lets overlapping glyphs (kerned pairs, italic
    /// overhangs) stamp into the same cells without darkening artifacts.
    /// Writes outside the grid are ignored.
    pub fn stamp(&mut self, x: usize, y: usize, value: u8) {
        if x >= self.width || y >= self.height {
            return;
        }
        let cell = &mut self.data[y * self.width + x];
        *cell = (*cell).max(value);
    }

    /// True when no cell has any coverage.
    pub fn is_empty(&self) -> bool {
        self.data.iter().all(|&v| v == 0)
    }
}

/// Renders text into a coverage mask sized to a field.
///
/// `size_px` is the glyph height in pixels; the implementation chooses
/// placement within the extent. Implementations report font and layout
/// failures through `EngineError`; an empty mask is a valid result (the
/// wordmark field degrades to ambient drift when nothing is covered).
pub trait GlyphRaster {
    fn rasterize(
        &self,
        text: &str,
        size_px: f64,
        extent: Extent,
    ) -> Result<CoverageMask, EngineError>;
}
