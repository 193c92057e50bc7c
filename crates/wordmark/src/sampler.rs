//! Target point sampling from glyph coverage.
//!
//! Turns a rendered [`CoverageMask`] into the ordered point set the
//! wordmark particles seek. Sampling walks the mask row by row at a fixed
//! stride and keeps the cells whose coverage clears an opacity threshold,
//! so the point density tracks the stride rather than the font size.

use constel_core::{CoverageMask, Extent};
use glam::{dvec2, DVec2};

/// Coverage strictly above this value counts as opaque.
pub const OPACITY_THRESHOLD: u8 = 128;

/// Font size for a region: an eighth of the width capped by a third of the
/// height, so the rendered text fits both axes.
pub fn font_size_for(extent: Extent) -> f64 {
    (extent.width() / 8.0).min(extent.height() / 3.0)
}

/// Collects the opaque sample points of a mask, scanning rows then columns
/// at the stride.
///
/// The threshold comparison is strict: a cell at exactly
/// [`OPACITY_THRESHOLD`] is skipped. A zero stride yields no points.
pub fn sample_points(mask: &CoverageMask, stride: usize) -> Vec<DVec2> {
    if stride == 0 {
        return Vec::new();
    }
    let mut points = Vec::new();
    for y in (0..mask.height()).step_by(stride) {
        for x in (0..mask.width()).step_by(stride) {
            if mask.coverage(x, y) > OPACITY_THRESHOLD {
                points.push(dvec2(x as f64, y as f64));
            }
        }
    }
    points
}
