//! The point entity animated by a field engine.

use crate::prng::Xorshift64;
use glam::DVec2;

/// Which of the two palette slots a particle renders with.
///
/// Assigned once, uniformly at random, when the particle is spawned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tint {
    Primary,
    Secondary,
}

impl Tint {
    /// Draws a slot with equal probability.
    pub fn random(rng: &mut Xorshift64) -> Self {
        if rng.next_chance(0.5) {
            Tint::Primary
        } else {
            Tint::Secondary
        }
    }
}

/// A single particle: position, velocity, visual radius, palette slot.
///
/// Particles are value-like and owned by their field's set; they hold no
/// references to each other. Proximity links are computed by read-only
/// pairwise scans, never stored on the particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub pos: DVec2,
    pub vel: DVec2,
    pub radius: f64,
    pub tint: Tint,
}

impl Particle {
    pub fn new(pos: DVec2, vel: DVec2, radius: f64, tint: Tint) -> Self {
        Self {
            pos,
            vel,
            radius,
            tint,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::dvec2;

    #[test]
    fn new_stores_all_fields() {
        let p = Particle::new(dvec2(1.0, 2.0), dvec2(0.1, -0.2), 1.5, Tint::Primary);
        assert_eq!(p.pos, dvec2(1.0, 2.0));
        assert_eq!(p.vel, dvec2(0.1, -0.2));
        assert_eq!(p.radius, 1.5);
        assert_eq!(p.tint, Tint::Primary);
    }

    #[test]
    fn particle_is_copy() {
        let p = Particle::new(dvec2(0.0, 0.0), dvec2(0.0, 0.0), 1.0, Tint::Secondary);
        let q = p;
        assert_eq!(p, q);
    }

    #[test]
    fn tint_random_is_deterministic_per_seed() {
        let mut rng_a = Xorshift64::new(99);
        let mut rng_b = Xorshift64::new(99);
        for _ in 0..100 {
            assert_eq!(Tint::random(&mut rng_a), Tint::random(&mut rng_b));
        }
    }

    #[test]
    fn tint_random_produces_both_slots() {
        let mut rng = Xorshift64::new(3);
        let picks: Vec<Tint> = (0..200).map(|_| Tint::random(&mut rng)).collect();
        assert!(picks.contains(&Tint::Primary));
        assert!(picks.contains(&Tint::Secondary));
    }

    #[test]
    fn tint_random_is_roughly_balanced() {
        let mut rng = Xorshift64::new(1234);
        let primaries = (0..10_000)
            .filter(|_| Tint::random(&mut rng) == Tint::Primary)
            .count();
        // Loose bound to avoid flakiness.
        assert!(
            (4000..6000).contains(&primaries),
            "primary picked {primaries}/10000 times"
        );
    }
}
