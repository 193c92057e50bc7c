//! CPU raster surface and per-frame renderer.
//!
//! [`Surface`] is a plain RGBA8 buffer with the three primitives a field
//! frame needs: clear, filled circle, alpha-blended line. [`draw_frame`]
//! composes them: background, particles, then proximity links on top, the
//! same stacking the animation uses everywhere. Field coordinates map 1:1
//! onto surface pixels.

use constel_core::connector;
use constel_core::error::EngineError;
use constel_core::palette::Rgba;
use constel_core::FieldEngine;
use glam::DVec2;

/// An RGBA8 pixel buffer, row-major.
///
/// Drawing outside the surface is clipped, so callers never pre-clamp
/// geometry; particles straddling an edge just lose their off-surface part.
pub struct Surface {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Surface {
    /// Creates a transparent-black surface.
    ///
    /// Returns `EngineError::InvalidExtent` when either dimension is zero.
    pub fn new(width: u32, height: u32) -> Result<Self, EngineError> {
        if width == 0 || height == 0 {
            return Err(EngineError::InvalidExtent);
        }
        let len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4))
            .ok_or(EngineError::InvalidExtent)?;
        Ok(Self {
            width,
            height,
            data: vec![0; len],
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// The raw pixel buffer, `width * height * 4` bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// One pixel as `[r, g, b, a]`, or all zeros outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        if x >= self.width || y >= self.height {
            return [0; 4];
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        [
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ]
    }

    /// Fills the whole surface with an opaque color.
    pub fn clear(&mut self, color: Rgba) {
        for px in self.data.chunks_exact_mut(4) {
            px[0] = color.r;
            px[1] = color.g;
            px[2] = color.b;
            px[3] = 255;
        }
    }

    /// Draws a filled circle, blending by the color's alpha.
    pub fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba) {
        if radius <= 0.0 {
            return;
        }
        let x0 = (center.x - radius).floor() as i64;
        let x1 = (center.x + radius).ceil() as i64;
        let y0 = (center.y - radius).floor() as i64;
        let y1 = (center.y + radius).ceil() as i64;
        let radius_sq = radius * radius;
        for y in y0..=y1 {
            for x in x0..=x1 {
                let dx = x as f64 + 0.5 - center.x;
                let dy = y as f64 + 0.5 - center.y;
                if dx * dx + dy * dy <= radius_sq {
                    self.blend_pixel(x, y, color, 1.0);
                }
            }
        }
    }

    /// Draws a line segment, endpoints inclusive.
    ///
    /// Sub-pixel widths are approximated by scaling the stroke alpha, so a
    /// 0.4-wide link reads as a fainter single-pixel line. Widths of one
    /// pixel and above draw at the full alpha.
    pub fn stroke_line(&mut self, from: DVec2, to: DVec2, color: Rgba, alpha: f64, width: f64) {
        if width <= 0.0 || alpha <= 0.0 {
            return;
        }
        let alpha = alpha * width.min(1.0);
        let delta = to - from;
        let steps = delta.x.abs().max(delta.y.abs()).ceil() as i64;
        if steps <= 0 {
            self.blend_pixel(from.x.round() as i64, from.y.round() as i64, color, alpha);
            return;
        }
        let step = delta / steps as f64;
        let mut p = from;
        for _ in 0..=steps {
            self.blend_pixel(p.x.round() as i64, p.y.round() as i64, color, alpha);
            p += step;
        }
    }

    /// Source-over blend of one pixel; writes outside the surface are
    /// dropped. The output alpha stays opaque, matching a cleared surface.
    fn blend_pixel(&mut self, x: i64, y: i64, color: Rgba, alpha: f64) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let a = (color.a * alpha).clamp(0.0, 1.0);
        if a <= 0.0 {
            return;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        self.data[idx] = blend_channel(self.data[idx], color.r, a);
        self.data[idx + 1] = blend_channel(self.data[idx + 1], color.g, a);
        self.data[idx + 2] = blend_channel(self.data[idx + 2], color.b, a);
        self.data[idx + 3] = 255;
    }
}

/// Renders one frame of a field: clear, particles, then links on top.
pub fn draw_frame(engine: &dyn FieldEngine, surface: &mut Surface, background: Rgba) {
    surface.clear(background);
    let palette = *engine.palette();
    let particles = engine.particles();
    for p in particles {
        surface.fill_circle(p.pos, p.radius, palette.of(p.tint));
    }
    let style = engine.link_style();
    for link in connector::links(particles, style.threshold, style.base_alpha) {
        surface.stroke_line(
            particles[link.a].pos,
            particles[link.b].pos,
            palette.link,
            link.alpha,
            style.width,
        );
    }
}

fn blend_channel(dst: u8, src: u8, alpha: f64) -> u8 {
    (src as f64 * alpha + dst as f64 * (1.0 - alpha)).round() as u8
}
