//! Error types for the constel core.

use thiserror::Error;

/// Errors produced by field-engine operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A surface extent had a zero, negative, or non-finite dimension.
    #[error("invalid extent: width and height must be finite and positive")]
    InvalidExtent,

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// A requested engine name was not recognized by the registry.
    #[error("unknown engine: {0}")]
    UnknownEngine(String),

    /// A requested palette name was not recognized.
    #[error("unknown palette: {0}")]
    UnknownPalette(String),

    /// A font could not be loaded or parsed for glyph rasterization.
    #[error("font error: {0}")]
    Font(String),

    /// An I/O failure (snapshot write, font file read).
    #[error("io error: {0}")]
    Io(String),
}
