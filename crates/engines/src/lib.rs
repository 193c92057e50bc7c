#![deny(unsafe_code)]
//! Engine registry: maps field names to implementations and provides the
//! CPU-side frame renderer, animation session, and PNG snapshot.
//!
//! This crate sits between `constel-core` (which defines the `FieldEngine`
//! trait) and the individual field crates (`constel-backdrop`,
//! `constel-wordmark`). The CLI depends on this crate so dispatch logic is
//! not duplicated per frontend.

pub mod session;
pub mod surface;

#[cfg(feature = "png")]
pub mod snapshot;

use constel_core::error::EngineError;
use constel_core::palette::FieldPalette;
use constel_core::raster::GlyphRaster;
use constel_core::{Extent, FieldEngine, LinkStyle, Particle};
use glam::DVec2;
use serde_json::Value;

/// All available field names.
const ENGINE_NAMES: &[&str] = &["backdrop", "wordmark"];

/// Enumeration of all available particle fields.
///
/// Wraps each field implementation and delegates `FieldEngine` trait
/// methods. Use [`EngineKind::from_name`] for string-based construction.
pub enum EngineKind {
    /// Viewport-filling drifting constellation.
    Backdrop(constel_backdrop::Backdrop),
    /// Glyph-seeking wordmark constellation.
    Wordmark(constel_wordmark::Wordmark),
}

impl EngineKind {
    /// Constructs a field by name.
    ///
    /// The raster feeds glyph-seeking fields; fields without text ignore
    /// it, and a glyph-seeking field built without one degrades to ambient
    /// drift.
    ///
    /// Returns `EngineError::UnknownEngine` if the name is not recognized.
    pub fn from_name(
        name: &str,
        extent: Extent,
        seed: u64,
        params: &Value,
        raster: Option<Box<dyn GlyphRaster>>,
    ) -> Result<Self, EngineError> {
        match name {
            "backdrop" => Ok(EngineKind::Backdrop(constel_backdrop::Backdrop::new(
                extent, seed, params,
            )?)),
            "wordmark" => Ok(EngineKind::Wordmark(constel_wordmark::Wordmark::new(
                extent, seed, params, raster,
            )?)),
            _ => Err(EngineError::UnknownEngine(name.to_string())),
        }
    }

    /// Returns a slice of all recognized field names.
    pub fn list_engines() -> &'static [&'static str] {
        ENGINE_NAMES
    }
}

impl FieldEngine for EngineKind {
    fn step(&mut self) -> Result<(), EngineError> {
        match self {
            EngineKind::Backdrop(e) => e.step(),
            EngineKind::Wordmark(e) => e.step(),
        }
    }

    fn particles(&self) -> &[Particle] {
        match self {
            EngineKind::Backdrop(e) => e.particles(),
            EngineKind::Wordmark(e) => e.particles(),
        }
    }

    fn extent(&self) -> Extent {
        match self {
            EngineKind::Backdrop(e) => e.extent(),
            EngineKind::Wordmark(e) => e.extent(),
        }
    }

    fn resize(&mut self, extent: Extent) -> Result<(), EngineError> {
        match self {
            EngineKind::Backdrop(e) => e.resize(extent),
            EngineKind::Wordmark(e) => e.resize(extent),
        }
    }

    fn link_style(&self) -> LinkStyle {
        match self {
            EngineKind::Backdrop(e) => e.link_style(),
            EngineKind::Wordmark(e) => e.link_style(),
        }
    }

    fn palette(&self) -> &FieldPalette {
        match self {
            EngineKind::Backdrop(e) => e.palette(),
            EngineKind::Wordmark(e) => e.palette(),
        }
    }

    fn params(&self) -> Value {
        match self {
            EngineKind::Backdrop(e) => e.params(),
            EngineKind::Wordmark(e) => e.params(),
        }
    }

    fn param_schema(&self) -> Value {
        match self {
            EngineKind::Backdrop(e) => e.param_schema(),
            EngineKind::Wordmark(e) => e.param_schema(),
        }
    }

    fn pointer_moved(&mut self, pos: DVec2) {
        match self {
            EngineKind::Backdrop(e) => e.pointer_moved(pos),
            EngineKind::Wordmark(e) => e.pointer_moved(pos),
        }
    }

    fn pointer_left(&mut self) {
        match self {
            EngineKind::Backdrop(e) => e.pointer_left(),
            EngineKind::Wordmark(e) => e.pointer_left(),
        }
    }

    fn set_active(&mut self, active: bool) {
        match self {
            EngineKind::Backdrop(e) => e.set_active(active),
            EngineKind::Wordmark(e) => e.set_active(active),
        }
    }

    fn is_active(&self) -> bool {
        match self {
            EngineKind::Backdrop(e) => e.is_active(),
            EngineKind::Wordmark(e) => e.is_active(),
        }
    }
}
