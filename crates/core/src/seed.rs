//! Reproducible run descriptor for a rendered field.
//!
//! A [`Seed`] captures everything needed to recreate a run: field name,
//! region dimensions, wordmark text, palette, parameters, PRNG seed, and
//! frame count.

use crate::error::EngineError;
use serde::{Deserialize, Serialize};

/// Reproducible run descriptor for a rendered field.
///
/// Contains the field name, region dimensions, optional wordmark text,
/// palette name, parameter overrides, PRNG seed, and frame count. Two
/// identical `Seed` values fed to the same binary produce bit-identical
/// output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Seed {
    pub engine: String,
    pub width: usize,
    pub height: usize,
    pub text: Option<String>,
    pub palette: String,
    pub params: serde_json::Value,
    pub seed: u64,
    pub frames: usize,
}

impl Seed {
    /// Creates a new Seed with no text, the default palette, empty params
    /// (`{}`), and zero frames.
    pub fn new(engine: &str, width: usize, height: usize, seed: u64) -> Self {
        Self {
            engine: engine.to_string(),
            width,
            height,
            text: None,
            palette: "aurora".to_string(),
            params: serde_json::Value::Object(serde_json::Map::new()),
            seed,
            frames: 0,
        }
    }

    /// Validates that the seed has non-zero dimensions and that
    /// `width * height` does not overflow.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.width == 0 || self.height == 0 {
            return Err(EngineError::InvalidExtent);
        }
        self.width
            .checked_mul(self.height)
            .ok_or(EngineError::InvalidExtent)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_creates_seed_with_defaults() {
        let s = Seed::new("backdrop", 960, 540, 42);
        assert_eq!(s.engine, "backdrop");
        assert_eq!(s.width, 960);
        assert_eq!(s.height, 540);
        assert_eq!(s.text, None);
        assert_eq!(s.palette, "aurora");
        assert_eq!(s.seed, 42);
        assert_eq!(s.frames, 0);
        assert_eq!(s.params, serde_json::json!({}));
    }

    #[test]
    fn json_round_trip_with_defaults() {
        let original = Seed::new("backdrop", 1920, 1080, 8675309);
        let json = serde_json::to_string(&original).unwrap();
        let restored: Seed = serde_json::from_str(&json).unwrap();
        assert_eq!(original, restored);
    }

    #[test]
    fn json_round_trip_with_text_and_params() {
        let mut s = Seed::new("wordmark", 640, 240, 99);
        s.text = Some("CONSTEL".to_string());
        s.palette = "ember".to_string();
        s.params = serde_json::json!({
            "gain": 0.01,
            "link_distance": 80.0,
            "count": 250
        });
        s.frames = 600;

        let json = serde_json::to_string_pretty(&s).unwrap();
        let restored: Seed = serde_json::from_str(&json).unwrap();
        assert_eq!(s, restored);
    }

    #[test]
    fn json_contains_expected_keys() {
        let s = Seed::new("wordmark", 640, 240, 1);
        let v: serde_json::Value = serde_json::to_value(&s).unwrap();
        assert!(v.get("engine").is_some());
        assert!(v.get("width").is_some());
        assert!(v.get("height").is_some());
        assert!(v.get("text").is_some());
        assert!(v.get("palette").is_some());
        assert!(v.get("params").is_some());
        assert!(v.get("seed").is_some());
        assert!(v.get("frames").is_some());
    }

    #[test]
    fn missing_text_deserializes_as_none() {
        let json = r#"{
            "engine": "backdrop",
            "width": 960,
            "height": 540,
            "palette": "mono",
            "params": {},
            "seed": 7,
            "frames": 120
        }"#;
        let s: Seed = serde_json::from_str(json).unwrap();
        assert_eq!(s.text, None);
        assert_eq!(s.palette, "mono");
    }

    #[test]
    fn clone_produces_equal_value() {
        let s = Seed::new("backdrop", 800, 600, 777);
        let cloned = s.clone();
        assert_eq!(s, cloned);
    }

    #[test]
    fn validate_succeeds_for_valid_seed() {
        let s = Seed::new("backdrop", 960, 540, 42);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn validate_fails_for_zero_width() {
        let s = Seed::new("backdrop", 0, 540, 42);
        assert!(s.validate().is_err());
    }

    #[test]
    fn validate_fails_for_zero_height() {
        let s = Seed::new("backdrop", 960, 0, 42);
        assert!(s.validate().is_err());
    }

    #[test]
    fn validate_fails_for_overflow() {
        let s = Seed::new("backdrop", usize::MAX, 2, 42);
        assert!(s.validate().is_err());
    }
}
