#![deny(unsafe_code)]
//! Constellation that assembles a text wordmark.
//!
//! Particles spawn scattered and seek target points sampled from rendered
//! glyph coverage: a proportional pull toward the assigned point, damped
//! every frame, and a fresh random target drawn on arrival so the settled
//! set keeps shimmering inside the letterforms. Away from its section, or
//! with nothing to spell, the field falls back to ambient drift. Bounds
//! reflect instead of wrapping.

use constel_core::params::{param_f64, param_string, param_usize};
use constel_core::{
    EngineError, Extent, FieldEngine, FieldPalette, GlyphRaster, LinkStyle, Particle, Tint,
    Xorshift64,
};
use glam::{dvec2, DVec2};
use serde_json::{json, Value};

pub mod sampler;
#[cfg(feature = "typeface")]
pub mod typeface;

#[cfg(feature = "typeface")]
pub use typeface::Typeface;

/// Text the field spells when the params leave it unset.
pub const DEFAULT_TEXT: &str = "CONSTEL";
/// Proportional pull toward the assigned target per frame.
pub const DEFAULT_GAIN: f64 = 0.01;
/// Distance at or under which a particle counts as arrived.
pub const DEFAULT_ARRIVE_DISTANCE: f64 = 2.0;
/// Ambient drift span per axis when no target applies.
pub const DEFAULT_DRIFT: f64 = 0.1;
/// Fraction of velocity kept every frame.
pub const DEFAULT_DAMPING: f64 = 0.95;
/// Pairs strictly closer than this distance link.
pub const DEFAULT_LINK_DISTANCE: f64 = 80.0;
/// Link alpha at distance zero.
pub const DEFAULT_LINK_ALPHA: f64 = 0.15;
/// Link stroke width in pixels.
pub const DEFAULT_LINK_WIDTH: f64 = 0.5;
/// Alpha applied to both particle color slots.
pub const DEFAULT_PARTICLE_ALPHA: f64 = 0.8;
/// Particle count cap when the target set is large.
pub const DEFAULT_MAX_COUNT: usize = 300;
/// Particle count when the target set is empty.
pub const DEFAULT_FALLBACK_COUNT: usize = 200;
/// Sampling stride over the coverage mask, in cells.
pub const DEFAULT_STRIDE: usize = 4;
/// Palette the field draws with.
pub const DEFAULT_PALETTE: &str = "aurora";

/// Spawn radius in pixels: `rand * RADIUS_SPAN + RADIUS_MIN`.
const RADIUS_SPAN: f64 = 2.0;
const RADIUS_MIN: f64 = 1.0;

/// Tunable parameters for the wordmark field.
#[derive(Debug, Clone)]
pub struct WordmarkParams {
    pub text: String,
    pub gain: f64,
    pub arrive_distance: f64,
    pub drift: f64,
    pub damping: f64,
    pub link_distance: f64,
    pub link_alpha: f64,
    pub link_width: f64,
    pub particle_alpha: f64,
    pub max_count: usize,
    pub fallback_count: usize,
    pub stride: usize,
    pub palette: String,
}

impl Default for WordmarkParams {
    fn default() -> Self {
        Self {
            text: DEFAULT_TEXT.to_string(),
            gain: DEFAULT_GAIN,
            arrive_distance: DEFAULT_ARRIVE_DISTANCE,
            drift: DEFAULT_DRIFT,
            damping: DEFAULT_DAMPING,
            link_distance: DEFAULT_LINK_DISTANCE,
            link_alpha: DEFAULT_LINK_ALPHA,
            link_width: DEFAULT_LINK_WIDTH,
            particle_alpha: DEFAULT_PARTICLE_ALPHA,
            max_count: DEFAULT_MAX_COUNT,
            fallback_count: DEFAULT_FALLBACK_COUNT,
            stride: DEFAULT_STRIDE,
            palette: DEFAULT_PALETTE.to_string(),
        }
    }
}

impl WordmarkParams {
    /// Extracts parameters from a JSON object, falling back to defaults for
    /// missing or mistyped keys.
    pub fn from_json(value: &Value) -> Self {
        Self {
            text: param_string(value, "text", DEFAULT_TEXT),
            gain: param_f64(value, "gain", DEFAULT_GAIN),
            arrive_distance: param_f64(value, "arrive_distance", DEFAULT_ARRIVE_DISTANCE),
            drift: param_f64(value, "drift", DEFAULT_DRIFT),
            damping: param_f64(value, "damping", DEFAULT_DAMPING),
            link_distance: param_f64(value, "link_distance", DEFAULT_LINK_DISTANCE),
            link_alpha: param_f64(value, "link_alpha", DEFAULT_LINK_ALPHA),
            link_width: param_f64(value, "link_width", DEFAULT_LINK_WIDTH),
            particle_alpha: param_f64(value, "particle_alpha", DEFAULT_PARTICLE_ALPHA),
            max_count: param_usize(value, "max_count", DEFAULT_MAX_COUNT),
            fallback_count: param_usize(value, "fallback_count", DEFAULT_FALLBACK_COUNT),
            stride: param_usize(value, "stride", DEFAULT_STRIDE),
            palette: param_string(value, "palette", DEFAULT_PALETTE),
        }
    }
}

/// The glyph-seeking name field.
///
/// Holds a target index per particle, parallel to the particle set. The
/// index is redrawn on arrival; a stale index (possible only if a host
/// swaps targets out from under the set) is remapped lazily at the next
/// check instead of being chased out of bounds.
pub struct Wordmark {
    extent: Extent,
    params: WordmarkParams,
    palette: FieldPalette,
    raster: Option<Box<dyn GlyphRaster>>,
    targets: Vec<DVec2>,
    particles: Vec<Particle>,
    assigned: Vec<usize>,
    active: bool,
    rng: Xorshift64,
}

impl Wordmark {
    /// Creates the field and builds an initial target and particle set.
    ///
    /// The field starts inactive; the host activates it when its section
    /// scrolls into view, which rebuilds both sets. Without a raster (or
    /// when rasterization fails) the target set is empty and the particles
    /// drift instead of seeking.
    ///
    /// Returns an error when the params name an unknown palette.
    pub fn new(
        extent: Extent,
        seed: u64,
        params: &Value,
        raster: Option<Box<dyn GlyphRaster>>,
    ) -> Result<Self, EngineError> {
        let params = WordmarkParams::from_json(params);
        let palette =
            FieldPalette::from_name(&params.palette)?.with_particle_alpha(params.particle_alpha);
        let mut field = Self {
            extent,
            params,
            palette,
            raster,
            targets: Vec::new(),
            particles: Vec::new(),
            assigned: Vec::new(),
            active: false,
            rng: Xorshift64::new(seed),
        };
        field.rebuild();
        Ok(field)
    }

    /// The glyph sample points the particles currently seek.
    pub fn targets(&self) -> &[DVec2] {
        &self.targets
    }

    /// Re-renders the text and replaces targets, particles, and target
    /// assignments wholesale. The PRNG stream continues across rebuilds.
    fn rebuild(&mut self) {
        let size = sampler::font_size_for(self.extent);
        self.targets = match &self.raster {
            Some(raster) => match raster.rasterize(&self.params.text, size, self.extent) {
                Ok(mask) => sampler::sample_points(&mask, self.params.stride),
                Err(_) => Vec::new(),
            },
            None => Vec::new(),
        };

        let count = if self.targets.is_empty() {
            self.params.fallback_count
        } else {
            self.targets.len().min(self.params.max_count)
        };
        let extent = self.extent;
        self.particles = Vec::with_capacity(count);
        self.assigned = Vec::with_capacity(count);
        for _ in 0..count {
            let particle = spawn_particle(&mut self.rng, extent);
            self.particles.push(particle);
            let slot = if self.targets.is_empty() {
                0
            } else {
                self.rng.next_usize(self.targets.len())
            };
            self.assigned.push(slot);
        }
    }
}

impl FieldEngine for Wordmark {
    /// One frame: seek (or drift), damp, integrate, reflect.
    ///
    /// Seeking applies only while active with a non-empty target set. A
    /// particle at or within the arrival distance of its target redraws its
    /// assignment and coasts this frame; so does one holding a stale index.
    fn step(&mut self) -> Result<(), EngineError> {
        let extent = self.extent;
        let gain = self.params.gain;
        let arrive = self.params.arrive_distance;
        let drift = self.params.drift;
        let damping = self.params.damping;
        let seeking = self.active && !self.targets.is_empty();
        for (p, slot) in self.particles.iter_mut().zip(self.assigned.iter_mut()) {
            if seeking {
                if *slot >= self.targets.len() {
                    *slot = self.rng.next_usize(self.targets.len());
                } else {
                    let delta = self.targets[*slot] - p.pos;
                    if delta.length() > arrive {
                        p.vel += delta * gain;
                    } else {
                        *slot = self.rng.next_usize(self.targets.len());
                    }
                }
            } else {
                p.vel += dvec2(self.rng.next_centered(drift), self.rng.next_centered(drift));
            }
            p.vel *= damping;
            p.pos += p.vel;
            p.vel = extent.reflect(p.pos, p.vel);
        }
        Ok(())
    }

    fn particles(&self) -> &[Particle] {
        &self.particles
    }

    fn extent(&self) -> Extent {
        self.extent
    }

    /// Stores the new extent; rebuilds only while active. An inactive
    /// field keeps its stale sets and rebuilds them on the next activation.
    fn resize(&mut self, extent: Extent) -> Result<(), EngineError> {
        self.extent = extent;
        if self.active {
            self.rebuild();
        }
        Ok(())
    }

    fn link_style(&self) -> LinkStyle {
        LinkStyle {
            threshold: self.params.link_distance,
            base_alpha: self.params.link_alpha,
            width: self.params.link_width,
        }
    }

    fn palette(&self) -> &FieldPalette {
        &self.palette
    }

    fn params(&self) -> Value {
        json!({
            "count": self.particles.len(),
            "text": self.params.text,
            "gain": self.params.gain,
            "arrive_distance": self.params.arrive_distance,
            "drift": self.params.drift,
            "damping": self.params.damping,
            "link_distance": self.params.link_distance,
            "link_alpha": self.params.link_alpha,
            "link_width": self.params.link_width,
            "particle_alpha": self.params.particle_alpha,
            "max_count": self.params.max_count,
            "fallback_count": self.params.fallback_count,
            "stride": self.params.stride,
            "palette": self.params.palette,
        })
    }

    fn param_schema(&self) -> Value {
        json!({
            "text": {
                "type": "string",
                "default": DEFAULT_TEXT,
                "description": "Text the particles spell"
            },
            "gain": {
                "type": "number",
                "min": 0.0,
                "default": DEFAULT_GAIN,
                "description": "Proportional pull toward the assigned target per frame"
            },
            "arrive_distance": {
                "type": "number",
                "min": 0.0,
                "default": DEFAULT_ARRIVE_DISTANCE,
                "description": "Distance at or under which a particle counts as arrived"
            },
            "drift": {
                "type": "number",
                "min": 0.0,
                "default": DEFAULT_DRIFT,
                "description": "Ambient drift span per axis when no target applies"
            },
            "damping": {
                "type": "number",
                "min": 0.0,
                "max": 1.0,
                "default": DEFAULT_DAMPING,
                "description": "Velocity kept every frame"
            },
            "link_distance": {
                "type": "number",
                "min": 0.0,
                "default": DEFAULT_LINK_DISTANCE,
                "description": "Distance threshold below which pairs link"
            },
            "link_alpha": {
                "type": "number",
                "min": 0.0,
                "max": 1.0,
                "default": DEFAULT_LINK_ALPHA,
                "description": "Link alpha at distance zero"
            },
            "link_width": {
                "type": "number",
                "min": 0.0,
                "default": DEFAULT_LINK_WIDTH,
                "description": "Link stroke width in pixels"
            },
            "particle_alpha": {
                "type": "number",
                "min": 0.0,
                "max": 1.0,
                "default": DEFAULT_PARTICLE_ALPHA,
                "description": "Alpha applied to both particle color slots"
            },
            "max_count": {
                "type": "integer",
                "min": 0,
                "default": DEFAULT_MAX_COUNT,
                "description": "Particle count cap when the target set is large"
            },
            "fallback_count": {
                "type": "integer",
                "min": 0,
                "default": DEFAULT_FALLBACK_COUNT,
                "description": "Particle count when the target set is empty"
            },
            "stride": {
                "type": "integer",
                "min": 0,
                "default": DEFAULT_STRIDE,
                "description": "Sampling stride over the coverage mask"
            },
            "palette": {
                "type": "string",
                "default": DEFAULT_PALETTE,
                "description": "Named palette the field draws with"
            }
        })
    }

    /// Activation rebuilds the target and particle sets from the stored
    /// extent; deactivation pauses seeking but keeps all state.
    fn set_active(&mut self, active: bool) {
        self.active = active;
        if active {
            self.rebuild();
        }
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

fn spawn_particle(rng: &mut Xorshift64, extent: Extent) -> Particle {
    let pos = dvec2(
        rng.next_f64() * extent.width(),
        rng.next_f64() * extent.height(),
    );
    let radius = rng.next_f64() * RADIUS_SPAN + RADIUS_MIN;
    Particle::new(pos, DVec2::ZERO, radius, Tint::random(rng))
}
