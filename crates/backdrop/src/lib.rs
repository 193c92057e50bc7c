#![deny(unsafe_code)]
//! Drifting constellation that fills the viewport behind page content.
//!
//! Particles drift with a constant velocity assigned at spawn, wrap
//! toroidally across an overscan margin so edge crossings never pop, and
//! lean toward (or away from) the pointer inside an interaction radius.
//! The connector links nearby pairs with distance-faded strokes. The field
//! is always active; it reacts to pointer events but needs no activity
//! gating.

use constel_core::params::{param_f64, param_string, param_usize};
use constel_core::{
    EngineError, Extent, FieldEngine, FieldPalette, LinkStyle, Particle, Tint, Xorshift64,
};
use glam::{dvec2, DVec2};
use serde_json::{json, Value};

/// Pairs strictly closer than this distance link.
pub const DEFAULT_LINK_DISTANCE: f64 = 150.0;
/// Link alpha at distance zero.
pub const DEFAULT_LINK_ALPHA: f64 = 0.22;
/// Link stroke width in pixels.
pub const DEFAULT_LINK_WIDTH: f64 = 0.4;
/// Pointer interaction radius in pixels.
pub const DEFAULT_POINTER_RADIUS: f64 = 180.0;
/// Pointer force scale. Positive attracts particles, negative repels them.
pub const DEFAULT_POINTER_STRENGTH: f64 = 0.12;
/// Fraction of velocity kept each frame the pointer force applies.
pub const DEFAULT_DAMPING: f64 = 0.96;
/// Overscan beyond each edge before a particle wraps, in pixels.
pub const DEFAULT_MARGIN: f64 = 50.0;
/// Spawn velocity span per axis; components land in `[-span/2, span/2)`.
pub const DEFAULT_SPEED: f64 = 0.18;
/// Alpha applied to both particle color slots.
pub const DEFAULT_PARTICLE_ALPHA: f64 = 0.9;
/// Palette the field draws with.
pub const DEFAULT_PALETTE: &str = "aurora";

/// Spawn radius in pixels: `rand * RADIUS_SPAN + RADIUS_MIN`.
const RADIUS_SPAN: f64 = 1.5;
const RADIUS_MIN: f64 = 0.8;

/// Tunable parameters for the backdrop field.
#[derive(Debug, Clone)]
pub struct BackdropParams {
    /// Explicit particle count; `0` derives the count from the surface area.
    pub count: usize,
    pub link_distance: f64,
    pub link_alpha: f64,
    pub link_width: f64,
    pub pointer_radius: f64,
    pub pointer_strength: f64,
    pub damping: f64,
    pub margin: f64,
    pub speed: f64,
    pub particle_alpha: f64,
    pub palette: String,
}

impl Default for BackdropParams {
    fn default() -> Self {
        Self {
            count: 0,
            link_distance: DEFAULT_LINK_DISTANCE,
            link_alpha: DEFAULT_LINK_ALPHA,
            link_width: DEFAULT_LINK_WIDTH,
            pointer_radius: DEFAULT_POINTER_RADIUS,
            pointer_strength: DEFAULT_POINTER_STRENGTH,
            damping: DEFAULT_DAMPING,
            margin: DEFAULT_MARGIN,
            speed: DEFAULT_SPEED,
            particle_alpha: DEFAULT_PARTICLE_ALPHA,
            palette: DEFAULT_PALETTE.to_string(),
        }
    }
}

impl BackdropParams {
    /// Extracts parameters from a JSON object, falling back to defaults for
    /// missing or mistyped keys.
    pub fn from_json(value: &Value) -> Self {
        Self {
            count: param_usize(value, "count", 0),
            link_distance: param_f64(value, "link_distance", DEFAULT_LINK_DISTANCE),
            link_alpha: param_f64(value, "link_alpha", DEFAULT_LINK_ALPHA),
            link_width: param_f64(value, "link_width", DEFAULT_LINK_WIDTH),
            pointer_radius: param_f64(value, "pointer_radius", DEFAULT_POINTER_RADIUS),
            pointer_strength: param_f64(value, "pointer_strength", DEFAULT_POINTER_STRENGTH),
            damping: param_f64(value, "damping", DEFAULT_DAMPING),
            margin: param_f64(value, "margin", DEFAULT_MARGIN),
            speed: param_f64(value, "speed", DEFAULT_SPEED),
            particle_alpha: param_f64(value, "particle_alpha", DEFAULT_PARTICLE_ALPHA),
            palette: param_string(value, "palette", DEFAULT_PALETTE),
        }
    }
}

/// The background constellation field.
pub struct Backdrop {
    extent: Extent,
    params: BackdropParams,
    palette: FieldPalette,
    particles: Vec<Particle>,
    pointer: Option<DVec2>,
    rng: Xorshift64,
}

impl Backdrop {
    /// Creates the field and spawns a particle set sized to the extent (or
    /// to the `count` override).
    ///
    /// Returns an error when the params name an unknown palette.
    pub fn new(extent: Extent, seed: u64, params: &Value) -> Result<Self, EngineError> {
        let params = BackdropParams::from_json(params);
        let palette =
            FieldPalette::from_name(&params.palette)?.with_particle_alpha(params.particle_alpha);
        let mut field = Self {
            extent,
            params,
            palette,
            particles: Vec::new(),
            pointer: None,
            rng: Xorshift64::new(seed),
        };
        field.respawn();
        Ok(field)
    }

    /// Last pointer position pushed by the host, in field coordinates.
    pub fn pointer(&self) -> Option<DVec2> {
        self.pointer
    }

    /// Discards the particle set and spawns a fresh one for the current
    /// extent. The PRNG stream continues, so consecutive respawns differ.
    fn respawn(&mut self) {
        let count = if self.params.count > 0 {
            self.params.count
        } else {
            count_for_area(self.extent.area())
        };
        let extent = self.extent;
        let speed = self.params.speed;
        self.particles = (0..count)
            .map(|_| spawn_particle(&mut self.rng, extent, speed))
            .collect();
    }
}

impl FieldEngine for Backdrop {
    /// One frame: integrate, wrap into the overscan band, then apply the
    /// pointer force and damping to particles inside the interaction radius.
    ///
    /// Without a pointer (or for particles out of range) velocities are
    /// untouched, damping included. A particle coincident with the pointer
    /// has no direction toward it and is left alone that frame.
    fn step(&mut self) -> Result<(), EngineError> {
        let extent = self.extent;
        let margin = self.params.margin;
        let radius = self.params.pointer_radius;
        let strength = self.params.pointer_strength;
        let damping = self.params.damping;
        let pointer = self.pointer;
        for p in &mut self.particles {
            p.pos += p.vel;
            p.pos = extent.wrap(p.pos, margin);
            if let Some(pointer) = pointer {
                let delta = pointer - p.pos;
                let dist = delta.length();
                if dist > 0.0 && dist < radius {
                    let falloff = (radius - dist) / radius;
                    p.vel += delta / dist * (falloff * strength);
                    p.vel *= damping;
                }
            }
        }
        Ok(())
    }

    fn particles(&self) -> &[Particle] {
        &self.particles
    }

    fn extent(&self) -> Extent {
        self.extent
    }

    fn resize(&mut self, extent: Extent) -> Result<(), EngineError> {
        self.extent = extent;
        self.respawn();
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
            "link_distance": self.params.link_distance,
            "link_alpha": self.params.link_alpha,
            "link_width": self.params.link_width,
            "pointer_radius": self.params.pointer_radius,
            "pointer_strength": self.params.pointer_strength,
            "damping": self.params.damping,
            "margin": self.params.margin,
            "speed": self.params.speed,
            "particle_alpha": self.params.particle_alpha,
            "palette": self.params.palette,
        })
    }

    fn param_schema(&self) -> Value {
        json!({
            "count": {
                "type": "integer",
                "min": 0,
                "default": 0,
                "description": "Explicit particle count; 0 derives it from the surface area"
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
            "pointer_radius": {
                "type": "number",
                "min": 0.0,
                "default": DEFAULT_POINTER_RADIUS,
                "description": "Pointer interaction radius in pixels"
            },
            "pointer_strength": {
                "type": "number",
                "default": DEFAULT_POINTER_STRENGTH,
                "description": "Pointer force scale; positive attracts, negative repels"
            },
            "damping": {
                "type": "number",
                "min": 0.0,
                "max": 1.0,
                "default": DEFAULT_DAMPING,
                "description": "Velocity kept per frame while the pointer force applies"
            },
            "margin": {
                "type": "number",
                "min": 0.0,
                "default": DEFAULT_MARGIN,
                "description": "Overscan beyond each edge before a particle wraps"
            },
            "speed": {
                "type": "number",
                "min": 0.0,
                "default": DEFAULT_SPEED,
                "description": "Spawn velocity span per axis"
            },
            "particle_alpha": {
                "type": "number",
                "min": 0.0,
                "max": 1.0,
                "default": DEFAULT_PARTICLE_ALPHA,
                "description": "Alpha applied to both particle color slots"
            },
            "palette": {
                "type": "string",
                "default": DEFAULT_PALETTE,
                "description": "Named palette the field draws with"
            }
        })
    }

    fn pointer_moved(&mut self, pos: DVec2) {
        self.pointer = Some(pos);
    }

    fn pointer_left(&mut self) {
        self.pointer = None;
    }
}

/// Particle count for a surface area. Larger regions get denser tiers so
/// the field reads the same at phone and desktop sizes.
fn count_for_area(area: f64) -> usize {
    if area < 500_000.0 {
        30
    } else if area < 1_000_000.0 {
        40
    } else {
        55
    }
}

fn spawn_particle(rng: &mut Xorshift64, extent: Extent, speed: f64) -> Particle {
    let pos = dvec2(
        rng.next_f64() * extent.width(),
        rng.next_f64() * extent.height(),
    );
    let vel = dvec2(rng.next_centered(speed), rng.next_centered(speed));
    let radius = rng.next_f64() * RADIUS_SPAN + RADIUS_MIN;
    Particle::new(pos, vel, radius, Tint::random(rng))
}
