//! The core `FieldEngine` trait that every particle field must implement.
//!
//! The trait is object-safe so fields can be driven as `dyn FieldEngine` by
//! the session loop and the renderer without knowing which field they hold.

use crate::error::EngineError;
use crate::extent::Extent;
use crate::palette::FieldPalette;
use crate::particle::Particle;
use glam::DVec2;
use serde_json::Value;

/// How a field wants its proximity links drawn.
///
/// The connector consumes `threshold` and `base_alpha`; `width` is the
/// stroke width the renderer uses for every link.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinkStyle {
    /// Pairs strictly closer than this distance link.
    pub threshold: f64,
    /// Link alpha at distance zero; fades linearly to zero at the threshold.
    pub base_alpha: f64,
    /// Stroke width in pixels.
    pub width: f64,
}

/// Core trait for particle fields.
///
/// Each field owns a particle set and advances it one frame per [`step`]
/// call; the renderer reads [`particles`], [`link_style`], and [`palette`]
/// to draw the frame. Input and lifecycle notifications have no-op defaults
/// so fields opt in only to the ones they react to.
///
/// This trait is **object-safe**: you can use `Box<dyn FieldEngine>` or
/// `&dyn FieldEngine` for runtime polymorphism.
///
/// [`step`]: FieldEngine::step
/// [`particles`]: FieldEngine::particles
/// [`link_style`]: FieldEngine::link_style
/// [`palette`]: FieldEngine::palette
pub trait FieldEngine {
    /// Advance the simulation by one frame.
    fn step(&mut self) -> Result<(), EngineError>;

    /// The current particle set.
    fn particles(&self) -> &[Particle];

    /// The region the particles move in.
    fn extent(&self) -> Extent;

    /// Replace the region and respawn state sized to it.
    fn resize(&mut self, extent: Extent) -> Result<(), EngineError>;

    /// Link threshold, base alpha, and stroke width for this field.
    fn link_style(&self) -> LinkStyle;

    /// The three colors this field draws with.
    fn palette(&self) -> &FieldPalette;

    /// Current parameter values as a JSON object.
    fn params(&self) -> Value;

    /// Schema describing all available parameters, their types, ranges, and defaults.
    fn param_schema(&self) -> Value;

    /// The pointer moved to `pos` in field coordinates.
    ///
    /// No-op by default. The backdrop overrides this to steer its pointer
    /// force.
    fn pointer_moved(&mut self, pos: DVec2) {
        let _ = pos;
    }

    /// The pointer left the field.
    ///
    /// No-op by default.
    fn pointer_left(&mut self) {}

    /// The field's section became visible (`true`) or was left (`false`).
    ///
    /// No-op by default. The wordmark overrides this to rebuild on entry
    /// and pause while away.
    fn set_active(&mut self, active: bool) {
        let _ = active;
    }

    /// Whether the field currently wants to be stepped and drawn.
    ///
    /// Always `true` by default.
    fn is_active(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::Tint;
    use glam::dvec2;
    use serde_json::json;

    /// Minimal field implementation used to verify trait object safety.
    struct MockField {
        extent: Extent,
        particles: Vec<Particle>,
        palette: FieldPalette,
        step_count: usize,
    }

    impl MockField {
        fn new() -> Self {
            Self {
                extent: Extent::new(100.0, 50.0).unwrap(),
                particles: vec![Particle::new(
                    dvec2(10.0, 10.0),
                    dvec2(0.0, 0.0),
                    1.0,
                    Tint::Primary,
                )],
                palette: FieldPalette::default(),
                step_count: 0,
            }
        }
    }

    impl FieldEngine for MockField {
        fn step(&mut self) -> Result<(), EngineError> {
            self.step_count += 1;
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
            Ok(())
        }

        fn link_style(&self) -> LinkStyle {
            LinkStyle {
                threshold: 150.0,
                base_alpha: 0.22,
                width: 0.4,
            }
        }

        fn palette(&self) -> &FieldPalette {
            &self.palette
        }

        fn params(&self) -> Value {
            json!({"step_count": self.step_count})
        }

        fn param_schema(&self) -> Value {
            json!({
                "step_count": {
                    "type": "integer",
                    "default": 0,
                    "description": "Number of frames stepped"
                }
            })
        }
    }

    #[test]
    fn field_engine_trait_is_object_safe() {
        // This test verifies that FieldEngine can be used as a trait object.
        // If the trait were not object-safe, this would fail to compile.
        let field: Box<dyn FieldEngine> = Box::new(MockField::new());
        assert_eq!(field.particles().len(), 1);
        assert_eq!(field.extent().width(), 100.0);
    }

    #[test]
    fn mock_field_step_advances_state() {
        let mut field = MockField::new();
        assert_eq!(field.step_count, 0);
        field.step().unwrap();
        field.step().unwrap();
        assert_eq!(field.step_count, 2);
    }

    #[test]
    fn mock_field_params_reflects_state() {
        let mut field = MockField::new();
        field.step().unwrap();
        let params = field.params();
        assert_eq!(params["step_count"], 1);
    }

    #[test]
    fn mock_field_param_schema_has_expected_structure() {
        let field = MockField::new();
        let schema = field.param_schema();
        assert!(schema.get("step_count").is_some());
        assert_eq!(schema["step_count"]["type"], "integer");
    }

    #[test]
    fn default_pointer_handlers_are_no_ops() {
        let mut field = MockField::new();
        let before = field.particles().to_vec();
        field.pointer_moved(dvec2(50.0, 25.0));
        field.pointer_left();
        assert_eq!(field.particles(), &before[..]);
        assert_eq!(field.step_count, 0);
    }

    #[test]
    fn default_activity_is_always_active() {
        let mut field = MockField::new();
        assert!(field.is_active());
        field.set_active(false);
        // MockField keeps the default no-op, so it stays active.
        assert!(field.is_active());
    }

    #[test]
    fn resize_replaces_the_extent() {
        let mut field = MockField::new();
        field.resize(Extent::new(640.0, 480.0).unwrap()).unwrap();
        assert_eq!(field.extent().width(), 640.0);
        assert_eq!(field.extent().height(), 480.0);
    }

    #[test]
    fn dyn_field_reference_works() {
        let field = MockField::new();
        let field_ref: &dyn FieldEngine = &field;
        assert_eq!(field_ref.particles().len(), 1);
        assert!(field_ref.is_active());
    }

    #[test]
    fn dyn_field_mut_reference_works() {
        let mut field = MockField::new();
        let field_ref: &mut dyn FieldEngine = &mut field;
        field_ref.step().unwrap();
        field_ref.pointer_moved(dvec2(1.0, 1.0));
        assert_eq!(field_ref.params()["step_count"], 1);
    }

    #[test]
    fn link_style_is_plain_data() {
        let style = MockField::new().link_style();
        let copy = style;
        assert_eq!(style, copy);
        assert_eq!(copy.threshold, 150.0);
        assert_eq!(copy.base_alpha, 0.22);
        assert_eq!(copy.width, 0.4);
    }
}
