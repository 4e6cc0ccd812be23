//! Global velocity-proportional drag

use crate::laws::Law;
use crate::pointer::PointerState;
use crate::world::World;

/// Linear drag applied to every live body
///
/// Accumulates `a -= v * coefficient` each sub-step. This is the global
/// drag scale of the simulation; the per-body `friction` field is separate
/// multiplicative damping applied during integration.
pub struct LinearDrag {
    pub coefficient: f64,
}

impl LinearDrag {
    pub fn new(coefficient: f64) -> Self {
        Self { coefficient }
    }
}

impl Law for LinearDrag {
    fn apply(&mut self, world: &mut World, _pointer: &PointerState) {
        for body in world.iter_mut() {
            if body.is_dead() {
                continue;
            }
            let drag = body.velocity * self.coefficient;
            body.acceleration -= drag;
        }
    }
}
