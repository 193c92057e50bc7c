#![deny(unsafe_code)]
//! Core types and traits for the constel particle fields.
//!
//! Provides the `FieldEngine` trait, `Particle`/`Tint` data model, `Extent`
//! region math, the proximity `connector`, color types (`Rgba`,
//! `FieldPalette`), glyph rasters (`CoverageMask`, `GlyphRaster`),
//! `Xorshift64` PRNG, `Seed`, and parameter helpers.

pub mod connector;
pub mod engine;
pub mod error;
pub mod extent;
pub mod palette;
pub mod params;
pub mod particle;
pub mod prng;
pub mod raster;
pub mod seed;

pub use connector::Link;
pub use engine::{FieldEngine, LinkStyle};
pub use error::EngineError;
pub use extent::Extent;
pub use palette::{FieldPalette, Rgba};
pub use particle::{Particle, Tint};
pub use prng::Xorshift64;
pub use raster::{CoverageMask, GlyphRaster};
pub use seed::Seed;
