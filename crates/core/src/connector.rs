//! Proximity links between particles.
//!
//! Every frame, each unordered pair of particles closer than a threshold
//! gets a link whose alpha fades linearly from a base value at distance zero
//! to zero at the threshold. The scan is the plain O(n²) pass; at the
//! particle counts the fields run (tens to low hundreds) it is cheaper than
//! maintaining a spatial index.

use crate::particle::Particle;

/// A line between two particles, by index into the set that produced it.
///
/// `a < b` always holds; each unordered pair appears at most once.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub a: usize,
    pub b: usize,
    /// Stroke alpha in (0, base]; higher when the pair is closer.
    pub alpha: f64,
}

/// Computes the links for one frame.
///
/// A pair links only when its distance is strictly below `threshold`; a pair
/// exactly at the threshold does not link. Link alpha is
/// `base_alpha * (1 - d / threshold)`, so coincident particles get the full
/// base alpha and the value tapers to zero approaching the cutoff.
///
/// A non-positive threshold yields no links.
pub fn links(particles: &[Particle], threshold: f64, base_alpha: f64) -> Vec<Link> {
    if threshold <= 0.0 {
        return Vec::new();
    }
    let threshold_sq = threshold * threshold;
    let mut out = Vec::new();
    for a in 0..particles.len() {
        for b in (a + 1)..particles.len() {
            let dist_sq = (particles[a].pos - particles[b].pos).length_squared();
            if dist_sq < threshold_sq {
                let dist = dist_sq.sqrt();
                out.push(Link {
                    a,
                    b,
                    alpha: base_alpha * (1.0 - dist / threshold),
                });
            }
        }
    }
    out
}
