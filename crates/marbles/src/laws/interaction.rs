//! Pointer-driven interaction laws
//!
//! All three laws share one capture rule and differ only in how they move
//! the gripped body: set its position outright, pull its velocity toward
//! the cursor, or load it like a slingshot.

use crate::body::BodyId;
use crate::laws::Law;
use crate::pointer::PointerState;
use crate::world::World;

/// Speed and acceleration magnitude below which a body counts as at rest
const REST_THRESHOLD: f64 = 0.5;

/// Shared capture state: which body the pointer is locked onto
///
/// The lock exists so a fast drag cannot slip off the body between
/// sub-steps: once acquired on the press instant it follows the pointer
/// until release, not the cursor-over-body test. The lock is an id, not a
/// reference; if the body dies the lookup fails and the lock is dropped.
#[derive(Debug, Default)]
struct Grip {
    locked: Option<BodyId>,
}

impl Grip {
    /// Advance the capture state machine for one sub-step
    ///
    /// Returns the id whose move rule should run, or `None`. On the
    /// just-pressed instant inside a body's bounds the grip locks on (the
    /// last hit in iteration order wins, matching draw order, so the body
    /// painted on top is the one grabbed). `captures` decides whether the
    /// locked body has normal integration suppressed while held.
    fn update(
        &mut self,
        world: &mut World,
        pointer: &PointerState,
        captures: bool,
    ) -> Option<BodyId> {
        if let Some(id) = self.locked {
            if world.get(id).map_or(true, |b| b.is_dead()) {
                self.locked = None;
            }
        }

        if pointer.pressed && pointer.just_pressed {
            let hit = world
                .live()
                .filter(|b| b.contains_point(pointer.position))
                .map(|b| b.id)
                .last();
            if let Some(id) = hit {
                self.lock(world, id, captures);
            }
        }

        if !pointer.pressed {
            self.release(world);
            return None;
        }
        self.locked
    }

    fn lock(&mut self, world: &mut World, id: BodyId, captures: bool) {
        if let Some(prev) = self.locked.take() {
            if prev != id {
                if let Some(body) = world.get_mut(prev) {
                    body.set_captured(false);
                }
            }
        }
        if let Some(body) = world.get_mut(id) {
            body.set_captured(captures);
        }
        self.locked = Some(id);
    }

    fn release(&mut self, world: &mut World) {
        if let Some(id) = self.locked.take() {
            if let Some(body) = world.get_mut(id) {
                body.set_captured(false);
            }
        }
    }
}

/// Drag the gripped body to the pointer position
///
/// The body is captured while held: its position is written directly and
/// its velocity becomes the position delta of this sub-step, an
/// instantaneous estimate rather than an integrated value, so releasing
/// mid-motion throws the body with the drag speed.
#[derive(Default)]
pub struct DirectDrag {
    grip: Grip,
}

impl DirectDrag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn locked(&self) -> Option<BodyId> {
        self.grip.locked
    }
}

impl Law for DirectDrag {
    fn apply(&mut self, world: &mut World, pointer: &PointerState) {
        let Some(id) = self.grip.update(world, pointer, true) else {
            return;
        };
        let Some(body) = world.get_mut(id) else {
            return;
        };
        let delta = pointer.position - body.position;
        body.velocity = delta;
        body.position = pointer.position;
    }
}

/// Pull the gripped body toward the pointer through its velocity
///
/// Does not capture: the velocity is set proportionally to the vector from
/// body to pointer and the position integrates normally next sub-step, so
/// the body trails the cursor with an eased feel.
pub struct EasedPull {
    pub easing: f64,
    grip: Grip,
}

impl EasedPull {
    pub fn new(easing: f64) -> Self {
        Self {
            easing,
            grip: Grip::default(),
        }
    }

    pub fn locked(&self) -> Option<BodyId> {
        self.grip.locked
    }
}

impl Law for EasedPull {
    fn apply(&mut self, world: &mut World, pointer: &PointerState) {
        let Some(id) = self.grip.update(world, pointer, false) else {
            return;
        };
        let Some(body) = world.get_mut(id) else {
            return;
        };
        body.velocity = (pointer.position - body.position) * self.easing;
    }
}

/// Load the gripped body like a slingshot band
///
/// Captures while held. Only a body at rest (or currently held) takes the
/// band: its velocity is set opposite the pull vector, scaled by the
/// elasticity. Past the configured edge length the band stops obeying
/// Hooke's law and the elasticity attenuates by the overshoot ratio, so a
/// longer pull stiffens and then gives instead of growing without bound.
pub struct Slingshot {
    pub elasticity: f64,
    pub edge: f64,
    grip: Grip,
}

impl Slingshot {
    pub fn new(elasticity: f64, edge: f64) -> Self {
        Self {
            elasticity,
            edge,
            grip: Grip::default(),
        }
    }

    pub fn locked(&self) -> Option<BodyId> {
        self.grip.locked
    }
}

impl Law for Slingshot {
    fn apply(&mut self, world: &mut World, pointer: &PointerState) {
        let Some(id) = self.grip.update(world, pointer, true) else {
            return;
        };
        let Some(body) = world.get_mut(id) else {
            return;
        };

        let at_rest =
            body.speed() < REST_THRESHOLD && body.acceleration.norm() < REST_THRESHOLD;
        if !(at_rest || body.is_captured()) {
            return;
        }

        let pull = pointer.position - body.position;
        let len = pull.norm();
        let mut elasticity = self.elasticity;
        if len > self.edge {
            elasticity /= len / self.edge;
        }
        body.velocity = -pull * (elasticity * 0.1);
    }
}
