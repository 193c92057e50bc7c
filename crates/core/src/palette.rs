//! Colors for particle and link rendering.
//!
//! A field draws with exactly three colors: two particle slots (picked
//! 50/50 at spawn, see [`Tint`](crate::particle::Tint)) and one link stroke
//! whose alpha the connector computes per pair. [`FieldPalette`] bundles the
//! three; named presets cover the stock looks.

use crate::error::EngineError;
use crate::particle::Tint;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// 8-bit RGB color with a fractional alpha in [0, 1].
///
/// Serializes as a hex string: `"#rrggbb"` when fully opaque, `"#rrggbbaa"`
/// otherwise. The alpha hex round-trip has 8-bit quantization (1/255
/// precision loss), acceptable for display colors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    /// Creates a color, clamping alpha to [0, 1].
    pub fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self {
            r,
            g,
            b,
            a: a.clamp(0.0, 1.0),
        }
    }

    /// Creates a fully opaque color.
    pub fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Parses a hex color like `"#38bdf8"` or `"#38bdf8e6"` (case
    /// insensitive, leading `#` optional). Six digits parse as opaque;
    /// eight digits carry alpha in the last pair.
    ///
    /// Returns `EngineError::InvalidColor` for any other shape.
    pub fn from_hex(hex: &str) -> Result<Rgba, EngineError> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 && hex.len() != 8 {
            return Err(EngineError::InvalidColor(format!(
                "expected 6 or 8 hex digits, got {}",
                hex.len()
            )));
        }
        let byte = |range: std::ops::Range<usize>, name: &str| {
            u8::from_str_radix(&hex[range], 16)
                .map_err(|e| EngineError::InvalidColor(format!("invalid {name} component: {e}")))
        };
        let r = byte(0..2, "red")?;
        let g = byte(2..4, "green")?;
        let b = byte(4..6, "blue")?;
        let a = if hex.len() == 8 {
            byte(6..8, "alpha")? as f64 / 255.0
        } else {
            1.0
        };
        Ok(Rgba { r, g, b, a })
    }

    /// Formats as a hex string, appending the alpha pair only when the color
    /// is not fully opaque.
    pub fn to_hex(self) -> String {
        if (self.a - 1.0).abs() < f64::EPSILON {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            let a = (self.a.clamp(0.0, 1.0) * 255.0).round() as u8;
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, a)
        }
    }

    /// Returns the same color with a different alpha, clamped to [0, 1].
    pub fn with_alpha(self, a: f64) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }
}

impl Serialize for Rgba {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgba {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Rgba::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Names of the stock palettes, in the order `from_name` recognizes them.
const PALETTE_NAMES: &[&str] = &["aurora", "ember", "meadow", "mono"];

/// The three colors a field renders with.
///
/// `primary` and `secondary` are the particle slots; `link` is the stroke
/// color for proximity lines (its alpha is supplied per link by the
/// connector, so presets keep it opaque).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldPalette {
    pub primary: Rgba,
    pub secondary: Rgba,
    pub link: Rgba,
}

impl FieldPalette {
    /// Sky-blue and pink particles over slate links. The default.
    pub fn aurora() -> Self {
        Self {
            primary: Rgba::opaque(0x38, 0xbd, 0xf8),
            secondary: Rgba::opaque(0xf4, 0x72, 0xb6),
            link: Rgba::opaque(0x94, 0xa3, 0xb8),
        }
    }

    /// Amber and red particles over warm gray links.
    pub fn ember() -> Self {
        Self {
            primary: Rgba::opaque(0xfb, 0xbf, 0x24),
            secondary: Rgba::opaque(0xf8, 0x71, 0x71),
            link: Rgba::opaque(0xa8, 0xa2, 0x9e),
        }
    }

    /// Green and teal particles over slate links.
    pub fn meadow() -> Self {
        Self {
            primary: Rgba::opaque(0x4a, 0xde, 0x80),
            secondary: Rgba::opaque(0x2d, 0xd4, 0xbf),
            link: Rgba::opaque(0x94, 0xa3, 0xb8),
        }
    }

    /// Grayscale: light and mid-gray particles over darker links.
    pub fn mono() -> Self {
        Self {
            primary: Rgba::opaque(0xe2, 0xe8, 0xf0),
            secondary: Rgba::opaque(0x64, 0x74, 0x8b),
            link: Rgba::opaque(0x47, 0x55, 0x69),
        }
    }

    /// Looks up a stock palette by name.
    ///
    /// Returns `EngineError::UnknownPalette` for unrecognized names.
    pub fn from_name(name: &str) -> Result<Self, EngineError> {
        match name {
            "aurora" => Ok(Self::aurora()),
            "ember" => Ok(Self::ember()),
            "meadow" => Ok(Self::meadow()),
            "mono" => Ok(Self::mono()),
            _ => Err(EngineError::UnknownPalette(name.to_string())),
        }
    }

    /// Returns the names of all stock palettes.
    pub fn list_names() -> &'static [&'static str] {
        PALETTE_NAMES
    }

    /// The color for a particle's palette slot.
    pub fn of(&self, tint: Tint) -> Rgba {
        match tint {
            Tint::Primary => self.primary,
            Tint::Secondary => self.secondary,
        }
    }

    /// Returns the palette with both particle slots set to the given alpha.
    ///
    /// The link color is untouched; link alpha is computed per pair at
    /// render time.
    pub fn with_particle_alpha(self, a: f64) -> Self {
        Self {
            primary: self.primary.with_alpha(a),
            secondary: self.secondary.with_alpha(a),
            link: self.link,
        }
    }
}

impl Default for FieldPalette {
    fn default() -> Self {
        Self::aurora()
    }
}
