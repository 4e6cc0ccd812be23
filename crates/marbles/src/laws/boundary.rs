//! Play-zone edge bounce

use serde::{Deserialize, Serialize};

use crate::laws::Law;
use crate::pointer::PointerState;
use crate::world::World;

/// Axis-aligned rectangle bounding the play area
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayZone {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl PlayZone {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }
}

/// Reflect bodies off the play-zone edges
///
/// A body whose circular bounds cross an edge has that axis's velocity
/// reversed and scaled by the restitution coefficient, the acceleration on
/// that axis flipped, and its position snapped back inside by its radius.
/// The snap-back is immediate rather than along the incoming path.
pub struct BoundaryBounce {
    pub zone: PlayZone,
    pub restitution: f64,
}

impl BoundaryBounce {
    pub fn new(zone: PlayZone, restitution: f64) -> Self {
        Self { zone, restitution }
    }
}

impl Law for BoundaryBounce {
    fn apply(&mut self, world: &mut World, _pointer: &PointerState) {
        let zone = self.zone;
        for body in world.iter_mut() {
            if body.is_dead() {
                continue;
            }
            if body.position.x + body.radius >= zone.right {
                body.velocity.x = -body.velocity.x * self.restitution;
                body.acceleration.x = -body.acceleration.x;
                body.position.x = zone.right - body.radius;
            }
            if body.position.x - body.radius <= zone.left {
                body.velocity.x = -body.velocity.x * self.restitution;
                body.acceleration.x = -body.acceleration.x;
                body.position.x = zone.left + body.radius;
            }
            if body.position.y + body.radius >= zone.bottom {
                body.velocity.y = -body.velocity.y * self.restitution;
                body.acceleration.y = -body.acceleration.y;
                body.position.y = zone.bottom - body.radius;
            }
            if body.position.y - body.radius <= zone.top {
                body.velocity.y = -body.velocity.y * self.restitution;
                body.acceleration.y = -body.acceleration.y;
                body.position.y = zone.top + body.radius;
            }
        }
    }
}
