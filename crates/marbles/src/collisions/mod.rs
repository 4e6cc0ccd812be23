//! Pairwise collision detection and resolution
//!
//! Detection is exhaustive over every unordered pair of live bodies; the
//! resolution strategies are composable per pair: an area- and
//! momentum-conserving merge, or a fully elastic bounce.

pub mod detection;
pub mod resolution;

#[cfg(test)]
mod resolution_test;

pub use detection::{detect_pairs, ContactPair};
pub use resolution::{elastic_collision, inelastic_merge, separate, size_merge};

use crate::laws::Law;
use crate::pointer::PointerState;
use crate::world::World;

/// What happens to a colliding pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactResponse {
    /// Fuse the pair into the first body: area-conserving radius, combined
    /// mass, momentum-conserving velocity; the second body is tombstoned.
    Merge,
    /// Momentum- and energy-conserving bounce; both bodies survive.
    Elastic,
}

/// Collision handling as a pipeline law
///
/// Detects contacts at the top of the pass, then resolves them in detection
/// order (ascending index pairs). Pairs whose bodies were tombstoned by an
/// earlier resolution in the same pass are skipped; the sweep itself is
/// deferred to the end of the frame.
///
/// # Examples
///
/// ```
/// use marbles::collisions::{ContactLaw, ContactResponse};
/// use marbles::laws::LawPipeline;
/// use marbles::pointer::PointerState;
/// use marbles::world::{BodySpec, World};
///
/// let mut world = World::new();
/// world.add_body(BodySpec::new(0.0, 0.0, 6.0, 10.0, 0.0).with_velocity(1.0, 0.0)).unwrap();
/// world.add_body(BodySpec::new(10.0, 0.0, 6.0, 10.0, 0.0).with_velocity(-1.0, 0.0)).unwrap();
///
/// let mut pipeline = LawPipeline::new().with_law(ContactLaw::new(ContactResponse::Merge));
/// pipeline.run_once(&mut world, &PointerState::default());
/// world.sweep_dead();
///
/// assert_eq!(world.len(), 1);
/// ```
pub struct ContactLaw {
    response: ContactResponse,
    clamped_axes: u64,
}

impl ContactLaw {
    pub fn new(response: ContactResponse) -> Self {
        Self {
            response,
            clamped_axes: 0,
        }
    }

    pub fn response(&self) -> ContactResponse {
        self.response
    }

    /// How many elastic recompositions produced a non-finite component that
    /// was clamped to zero. Stays 0 outside the degenerate geometry cases.
    pub fn clamped_axes(&self) -> u64 {
        self.clamped_axes
    }
}

impl Law for ContactLaw {
    fn apply(&mut self, world: &mut World, _pointer: &PointerState) {
        for pair in detect_pairs(world) {
            let Some((a, b)) = world.get_pair_mut(pair.a, pair.b) else {
                continue;
            };
            if a.is_dead() || b.is_dead() {
                continue;
            }
            match self.response {
                ContactResponse::Merge => {
                    size_merge(a, b);
                    inelastic_merge(a, b);
                }
                ContactResponse::Elastic => {
                    // push back to tangency first so the pair does not sit
                    // overlapped and re-trigger on every subsequent pass
                    separate(a, b);
                    if elastic_collision(a, b) {
                        self.clamped_axes += 1;
                    }
                }
            }
        }
    }
}
