//! Exhaustive pairwise overlap detection

use crate::body::BodyId;
use crate::world::World;

/// A detected overlap between two live bodies
///
/// `a` always precedes `b` in the world's iteration order, which fixes the
/// resolution order when several contacts touch the same body in one pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactPair {
    pub a: BodyId,
    pub b: BodyId,
    /// Center distance at detection time
    pub separation: f64,
}

/// Find every overlapping pair of live bodies
///
/// Tests circular bounds (`distance <= rA + rB`, tangency included) over
/// all ascending index pairs. O(n^2) by design: the populations this engine
/// targets are tens to low hundreds of bodies, below where a spatial index
/// pays for itself.
pub fn detect_pairs(world: &World) -> Vec<ContactPair> {
    let bodies = world.bodies();
    let n = bodies.len();
    let mut pairs = Vec::new();

    for i in 0..n {
        let a = &bodies[i];
        if a.is_dead() {
            continue;
        }
        for j in (i + 1)..n {
            let b = &bodies[j];
            if b.is_dead() {
                continue;
            }
            let separation = a.distance_to(b);
            if separation <= a.radius + b.radius {
                pairs.push(ContactPair {
                    a: a.id,
                    b: b.id,
                    separation,
                });
            }
        }
    }

    pairs
}
