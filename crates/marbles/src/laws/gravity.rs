//! Universal gravitation over every unordered pair of live bodies

use crate::body::Body;
use crate::laws::Law;
use crate::pointer::PointerState;
use crate::world::World;

/// Default floor for the pair separation used in the force magnitude
pub const DEFAULT_MIN_DISTANCE: f64 = 1e-3;

/// Newtonian attraction between every pair of live bodies
///
/// For each unordered pair, `F = g * mA * mB / r^2` along the line of
/// centers, accumulated as equal and opposite accelerations `F / m` on each
/// side. O(n^2) with no allocation; the target population is small enough
/// that no spatial index is warranted.
///
/// Near-coincident pairs are the one hazard: the separation used for the
/// magnitude is floored at `min_distance`, and a pair at exactly zero
/// separation is skipped outright since no direction exists. A non-finite
/// value never reaches body state.
pub struct Gravity {
    pub g: f64,
    pub min_distance: f64,
}

impl Gravity {
    pub fn new(g: f64) -> Self {
        Self {
            g,
            min_distance: DEFAULT_MIN_DISTANCE,
        }
    }

    pub fn with_min_distance(g: f64, min_distance: f64) -> Self {
        Self { g, min_distance }
    }

    fn attract(&self, a: &mut Body, b: &mut Body) {
        let offset = b.position - a.position;
        let distance = offset.norm();
        if distance == 0.0 {
            return;
        }
        let unit = offset / distance;

        let r = distance.max(self.min_distance);
        let force = self.g * a.mass * b.mass / (r * r);

        a.acceleration += unit * (force / a.mass);
        b.acceleration -= unit * (force / b.mass);
    }
}

impl Law for Gravity {
    fn apply(&mut self, world: &mut World, _pointer: &PointerState) {
        let n = world.len();
        for i in 0..n {
            for j in (i + 1)..n {
                let (a, b) = world.index_pair_mut(i, j);
                if a.is_dead() || b.is_dead() {
                    continue;
                }
                self.attract(a, b);
            }
        }
    }
}

/// The pointer as an invisible attracting mass
///
/// While the pointer is pressed, every live body is pulled toward the cursor
/// as if a body of mass `mass` sat there. The cursor itself has no state to
/// update, so only one side of the usual pair accumulation applies.
pub struct PointerGravity {
    pub g: f64,
    pub mass: f64,
    pub min_distance: f64,
}

impl PointerGravity {
    pub fn new(g: f64, mass: f64) -> Self {
        Self {
            g,
            mass,
            min_distance: DEFAULT_MIN_DISTANCE,
        }
    }
}

impl Law for PointerGravity {
    fn apply(&mut self, world: &mut World, pointer: &PointerState) {
        if !pointer.pressed {
            return;
        }
        for body in world.iter_mut() {
            if body.is_dead() {
                continue;
            }
            let offset = pointer.position - body.position;
            let distance = offset.norm();
            if distance == 0.0 {
                continue;
            }
            let unit = offset / distance;

            let r = distance.max(self.min_distance);
            let force = self.g * body.mass * self.mass / (r * r);
            body.acceleration += unit * (force / body.mass);
        }
    }
}
