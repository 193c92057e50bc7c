//! Validated drawing-surface geometry and the boundary rules applied to it.
//!
//! An [`Extent`] is the width/height of a field's drawing surface in device
//! pixels. The two boundary behaviors live here as pure functions of the
//! extent: toroidal [`wrap`](Extent::wrap) with an overscan margin (backdrop
//! field) and velocity [`reflect`](Extent::reflect) on contact (wordmark
//! field).

use crate::error::EngineError;
use glam::DVec2;

/// Drawing-surface dimensions, validated finite and positive at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    width: f64,
    height: f64,
}

impl Extent {
    /// Creates a new extent.
    ///
    /// Returns `EngineError::InvalidExtent` if either dimension is zero,
    /// negative, or non-finite.
    pub fn new(width: f64, height: f64) -> Result<Self, EngineError> {
        if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
            return Err(EngineError::InvalidExtent);
        }
        Ok(Self { width, height })
    }

    /// Surface width in device pixels.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Surface height in device pixels.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Surface area, the input to particle-count tier heuristics.
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Whether a point lies on the surface, boundary included.
    pub fn contains(&self, p: DVec2) -> bool {
        (0.0..=self.width).contains(&p.x) && (0.0..=self.height).contains(&p.y)
    }

    /// Toroidal wrap with an overscan margin.
    ///
    /// A coordinate past `dimension + margin` teleports to `-margin` on that
    /// axis, and symmetrically on the low side, so a particle slides fully
    /// off-screen before reappearing on the opposite edge. For any input the
    /// result lies within `[-margin, dimension + margin]` on both axes.
    pub fn wrap(&self, p: DVec2, margin: f64) -> DVec2 {
        DVec2::new(
            wrap_axis(p.x, self.width, margin),
            wrap_axis(p.y, self.height, margin),
        )
    }

    /// Velocity reflection on surface contact.
    ///
    /// Inverts a velocity component when the position is outside `[0, dim]`
    /// on that axis. The position itself is left to the caller unchanged;
    /// the next integration step carries the particle back inside.
    pub fn reflect(&self, pos: DVec2, vel: DVec2) -> DVec2 {
        let vx = if pos.x < 0.0 || pos.x > self.width {
            -vel.x
        } else {
            vel.x
        };
        let vy = if pos.y < 0.0 || pos.y > self.height {
            -vel.y
        } else {
            vel.y
        };
        DVec2::new(vx, vy)
    }
}

fn wrap_axis(coord: f64, dim: f64, margin: f64) -> f64 {
    if coord < -margin {
        dim + margin
    } else if coord > dim + margin {
        -margin
    } else {
        coord
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::dvec2;

    fn extent(w: f64, h: f64) -> Extent {
        Extent::new(w, h).unwrap()
    }

    // ---- Construction tests ----

    #[test]
    fn new_accepts_positive_dimensions() {
        let e = extent(1920.0, 1080.0);
        assert_eq!(e.width(), 1920.0);
        assert_eq!(e.height(), 1080.0);
    }

    #[test]
    fn new_rejects_zero_dimensions() {
        assert!(Extent::new(0.0, 100.0).is_err());
        assert!(Extent::new(100.0, 0.0).is_err());
    }

    #[test]
    fn new_rejects_negative_dimensions() {
        assert!(Extent::new(-1.0, 100.0).is_err());
        assert!(Extent::new(100.0, -0.5).is_err());
    }

    #[test]
    fn new_rejects_non_finite_dimensions() {
        assert!(Extent::new(f64::NAN, 100.0).is_err());
        assert!(Extent::new(100.0, f64::INFINITY).is_err());
        assert!(Extent::new(f64::NEG_INFINITY, 100.0).is_err());
    }

    #[test]
    fn area_is_width_times_height() {
        assert_eq!(extent(2000.0, 1000.0).area(), 2_000_000.0);
        assert_eq!(extent(800.0, 500.0).area(), 400_000.0);
    }

    // ---- contains tests ----

    #[test]
    fn contains_interior_point() {
        assert!(extent(100.0, 50.0).contains(dvec2(10.0, 10.0)));
    }

    #[test]
    fn contains_boundary_points() {
        let e = extent(100.0, 50.0);
        assert!(e.contains(dvec2(0.0, 0.0)));
        assert!(e.contains(dvec2(100.0, 50.0)));
    }

    #[test]
    fn contains_rejects_outside_points() {
        let e = extent(100.0, 50.0);
        assert!(!e.contains(dvec2(-0.1, 10.0)));
        assert!(!e.contains(dvec2(10.0, 50.1)));
    }

    // ---- wrap tests ----

    #[test]
    fn wrap_leaves_interior_point_unchanged() {
        let e = extent(800.0, 600.0);
        let p = dvec2(400.0, 300.0);
        assert_eq!(e.wrap(p, 50.0), p);
    }

    #[test]
    fn wrap_leaves_overscan_point_unchanged() {
        let e = extent(800.0, 600.0);
        // Inside the margin band on both sides: no teleport yet.
        assert_eq!(e.wrap(dvec2(-49.0, 630.0), 50.0), dvec2(-49.0, 630.0));
    }

    #[test]
    fn wrap_at_exact_margin_boundary_is_unchanged() {
        let e = extent(800.0, 600.0);
        assert_eq!(e.wrap(dvec2(-50.0, 650.0), 50.0), dvec2(-50.0, 650.0));
        assert_eq!(e.wrap(dvec2(850.0, -50.0), 50.0), dvec2(850.0, -50.0));
    }

    #[test]
    fn wrap_teleports_past_high_edge_to_low_overscan() {
        let e = extent(800.0, 600.0);
        let wrapped = e.wrap(dvec2(850.01, 300.0), 50.0);
        assert_eq!(wrapped, dvec2(-50.0, 300.0));
    }

    #[test]
    fn wrap_teleports_past_low_edge_to_high_overscan() {
        let e = extent(800.0, 600.0);
        let wrapped = e.wrap(dvec2(400.0, -50.01), 50.0);
        assert_eq!(wrapped, dvec2(400.0, 650.0));
    }

    #[test]
    fn wrap_handles_both_axes_independently() {
        let e = extent(800.0, 600.0);
        let wrapped = e.wrap(dvec2(900.0, -100.0), 50.0);
        assert_eq!(wrapped, dvec2(-50.0, 650.0));
    }

    #[test]
    fn wrap_with_zero_margin_teleports_at_surface_edge() {
        let e = extent(100.0, 100.0);
        assert_eq!(e.wrap(dvec2(100.5, 50.0), 0.0), dvec2(0.0, 50.0));
        assert_eq!(e.wrap(dvec2(-0.5, 50.0), 0.0), dvec2(100.0, 50.0));
    }

    // ---- reflect tests ----

    #[test]
    fn reflect_leaves_interior_velocity_unchanged() {
        let e = extent(200.0, 100.0);
        let vel = dvec2(1.5, -2.5);
        assert_eq!(e.reflect(dvec2(50.0, 50.0), vel), vel);
    }

    #[test]
    fn reflect_inverts_x_past_left_edge() {
        let e = extent(200.0, 100.0);
        let reflected = e.reflect(dvec2(-1.0, 50.0), dvec2(-2.0, 1.0));
        assert_eq!(reflected, dvec2(2.0, 1.0));
    }

    #[test]
    fn reflect_inverts_x_past_right_edge() {
        let e = extent(200.0, 100.0);
        let reflected = e.reflect(dvec2(201.0, 50.0), dvec2(3.0, 1.0));
        assert_eq!(reflected, dvec2(-3.0, 1.0));
    }

    #[test]
    fn reflect_inverts_y_past_either_edge() {
        let e = extent(200.0, 100.0);
        assert_eq!(
            e.reflect(dvec2(50.0, -0.5), dvec2(1.0, -2.0)),
            dvec2(1.0, 2.0)
        );
        assert_eq!(
            e.reflect(dvec2(50.0, 100.5), dvec2(1.0, 2.0)),
            dvec2(1.0, -2.0)
        );
    }

    #[test]
    fn reflect_at_exact_edge_is_unchanged() {
        let e = extent(200.0, 100.0);
        let vel = dvec2(1.0, 1.0);
        assert_eq!(e.reflect(dvec2(0.0, 0.0), vel), vel);
        assert_eq!(e.reflect(dvec2(200.0, 100.0), vel), vel);
    }

    #[test]
    fn reflect_corner_inverts_both_components() {
        let e = extent(200.0, 100.0);
        let reflected = e.reflect(dvec2(-1.0, 101.0), dvec2(-1.0, 2.0));
        assert_eq!(reflected, dvec2(1.0, -2.0));
    }

    // ---- Property-based tests ----

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn dimension() -> impl Strategy<Value = f64> {
            1.0_f64..4000.0
        }

        fn coord() -> impl Strategy<Value = f64> {
            -10_000.0_f64..10_000.0
        }

        proptest! {
            #[test]
            fn wrap_always_lands_in_overscan_band(
                w in dimension(),
                h in dimension(),
                x in coord(),
                y in coord(),
                margin in 0.0_f64..100.0,
            ) {
                let e = Extent::new(w, h).unwrap();
                let p = e.wrap(dvec2(x, y), margin);
                prop_assert!(p.x >= -margin && p.x <= w + margin, "x = {} out of band", p.x);
                prop_assert!(p.y >= -margin && p.y <= h + margin, "y = {} out of band", p.y);
            }

            #[test]
            fn wrap_is_idempotent(
                w in dimension(),
                h in dimension(),
                x in coord(),
                y in coord(),
                margin in 0.0_f64..100.0,
            ) {
                let e = Extent::new(w, h).unwrap();
                let once = e.wrap(dvec2(x, y), margin);
                let twice = e.wrap(once, margin);
                prop_assert_eq!(once, twice);
            }

            #[test]
            fn reflect_preserves_speed(
                w in dimension(),
                h in dimension(),
                x in coord(),
                y in coord(),
                vx in -10.0_f64..10.0,
                vy in -10.0_f64..10.0,
            ) {
                let e = Extent::new(w, h).unwrap();
                let reflected = e.reflect(dvec2(x, y), dvec2(vx, vy));
                prop_assert_eq!(reflected.x.abs().to_bits(), vx.abs().to_bits());
                prop_assert_eq!(reflected.y.abs().to_bits(), vy.abs().to_bits());
            }
        }
    }
}
