//! Composable per-sub-step behavior laws
//!
//! A law is the unit of behavior in the simulation: gravity, drag, pointer
//! interaction, and collision response are all laws. The pipeline runs every
//! registered law once per sub-step, in registration order.

use crate::pointer::PointerState;
use crate::world::World;

pub mod boundary;
pub mod drag;
pub mod gravity;
pub mod interaction;


pub use boundary::{BoundaryBounce, PlayZone};
pub use drag::LinearDrag;
pub use gravity::{Gravity, PointerGravity};
pub use interaction::{DirectDrag, EasedPull, Slingshot};

/// A unit of behavior invoked once per sub-step
///
/// Side effects are the whole contract: a law may read and write any body's
/// kinematic fields and may tombstone bodies, but it must not add or remove
/// world membership mid-pass (removal is deferred to the end-of-frame sweep
/// so pairwise iteration keeps stable indices). Laws must skip bodies that
/// an earlier law in the same pass already tombstoned.
///
/// Laws that carry no pointer interaction simply ignore the pointer
/// argument.
pub trait Law: Send + Sync {
    fn apply(&mut self, world: &mut World, pointer: &PointerState);
}

/// Ordered collection of laws, run once each per sub-step
///
/// # Examples
///
/// ```
/// use marbles::laws::{Gravity, LawPipeline, LinearDrag};
/// use marbles::pointer::PointerState;
/// use marbles::world::{BodySpec, World};
///
/// let mut world = World::new();
/// world.add_body(BodySpec::new(0.0, 0.0, 5.0, 10.0, 0.0)).unwrap();
/// world.add_body(BodySpec::new(100.0, 0.0, 5.0, 10.0, 0.0)).unwrap();
///
/// let mut pipeline = LawPipeline::new()
///     .with_law(Gravity::new(1.0))
///     .with_law(LinearDrag::new(0.01));
///
/// pipeline.run_once(&mut world, &PointerState::default());
/// assert!(world.bodies()[0].acceleration.x > 0.0);
/// ```
#[derive(Default)]
pub struct LawPipeline {
    laws: Vec<Box<dyn Law>>,
}

impl LawPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a law; laws run in registration order
    pub fn register<L: Law + 'static>(&mut self, law: L) {
        self.laws.push(Box::new(law));
    }

    pub fn with_law<L: Law + 'static>(mut self, law: L) -> Self {
        self.register(law);
        self
    }

    /// Invoke every law exactly once, in registration order
    pub fn run_once(&mut self, world: &mut World, pointer: &PointerState) {
        for law in &mut self.laws {
            law.apply(world, pointer);
        }
    }

    pub fn len(&self) -> usize {
        self.laws.len()
    }

    pub fn is_empty(&self) -> bool {
        self.laws.is_empty()
    }
}
