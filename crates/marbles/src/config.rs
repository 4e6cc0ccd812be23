//! Simulation constants as an explicit configuration struct
//!
//! Everything the embedding application tunes lives here instead of in
//! module-level globals: the gravitational constant, the global drag scale,
//! boundary restitution and play-zone bounds, and the sub-step ceiling.

use serde::{Deserialize, Serialize};

use crate::laws::boundary::PlayZone;
use crate::laws::gravity::DEFAULT_MIN_DISTANCE;
use crate::laws::{BoundaryBounce, Gravity, LawPipeline, LinearDrag};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Gravitational constant, in whatever units the embedding uses
    pub g: f64,
    /// Global linear drag coefficient; 0 disables the drag law
    pub drag: f64,
    /// Velocity retained by a boundary bounce
    pub restitution: f64,
    /// Bounds for the boundary law; `None` means an unbounded plane
    pub play_zone: Option<PlayZone>,
    /// Separation floor for gravity's force magnitude
    pub min_distance: f64,
    /// Ceiling for the adaptive sub-step count
    pub max_substeps: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            g: 0.1,
            drag: 0.0,
            restitution: 0.8,
            play_zone: None,
            min_distance: DEFAULT_MIN_DISTANCE,
            max_substeps: 240,
        }
    }
}

impl SimConfig {
    /// The law set most embeddings start from
    ///
    /// Gravity always; the drag law when a coefficient is configured; the
    /// boundary bounce when a play zone is configured. Collision response
    /// and pointer interaction are strategy choices, so they are left to
    /// the caller to register.
    pub fn standard_pipeline(&self) -> LawPipeline {
        let mut pipeline =
            LawPipeline::new().with_law(Gravity::with_min_distance(self.g, self.min_distance));
        if self.drag > 0.0 {
            pipeline.register(LinearDrag::new(self.drag));
        }
        if let Some(zone) = self.play_zone {
            pipeline.register(BoundaryBounce::new(zone, self.restitution));
        }
        pipeline
    }
}
